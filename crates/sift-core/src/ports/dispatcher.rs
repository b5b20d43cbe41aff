//! ActionDispatcher port - エンジンの外部作用はすべてここを通る
//!
//! # 設計原則
//! - dispatch は fire-and-forget（エンジンは完了を待たない）
//! - 失敗は dispatcher 側の責務。エンジンは結果に依存しない
//! - fetch 結果は後から `InboundEvent::CandidatesArrived` で戻ってくる

use std::sync::Arc;

use crate::domain::IntentEnvelope;

/// Receives typed intents from the engine.
///
/// Implementations must not block: the engine calls this while holding its
/// lock. Queue the work and return.
pub trait ActionDispatcher: Send + Sync {
    fn dispatch(&self, envelope: IntentEnvelope);
}

impl<D: ActionDispatcher + ?Sized> ActionDispatcher for Arc<D> {
    fn dispatch(&self, envelope: IntentEnvelope) {
        (**self).dispatch(envelope)
    }
}
