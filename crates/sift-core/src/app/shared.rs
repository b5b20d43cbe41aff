//! SharedEngine - エンジンを一つの Mutex で包む
//!
//! # 設計原則
//! - queue と undo memory は同じロックの内側にある
//! - pop + dispatch + 補充チェックは一つのクリティカルセクション
//! - fetch 結果の append も同じロックを通るので、割り込めない
//!
//! Views are published on a `watch` channel after every event, so a UI can
//! redraw without polling.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};

use super::engine::{Applied, DiscoverEngine, EngineView};
use crate::domain::{Decider, DefaultDecider, InboundEvent};
use crate::ports::ActionDispatcher;

pub struct SharedEngine<D, K = DefaultDecider> {
    inner: Arc<Mutex<DiscoverEngine<D, K>>>,
    views: Arc<watch::Sender<EngineView>>,
}

impl<D, K> Clone for SharedEngine<D, K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            views: Arc::clone(&self.views),
        }
    }
}

impl<D: ActionDispatcher, K: Decider> SharedEngine<D, K> {
    pub fn new(engine: DiscoverEngine<D, K>) -> Self {
        let (views, _) = watch::channel(engine.view());
        Self {
            inner: Arc::new(Mutex::new(engine)),
            views: Arc::new(views),
        }
    }

    /// Apply one event under the lock and publish the resulting view.
    pub async fn apply(&self, event: InboundEvent) -> Applied {
        let mut engine = self.inner.lock().await;
        let applied = engine.apply(event);
        // no receivers is fine
        self.views.send_replace(engine.view());
        applied
    }

    pub async fn view(&self) -> EngineView {
        self.inner.lock().await.view()
    }

    /// Run `f` against the engine under the lock (read-only).
    pub async fn inspect<R>(&self, f: impl FnOnce(&DiscoverEngine<D, K>) -> R) -> R {
        let engine = self.inner.lock().await;
        f(&engine)
    }

    /// Watch the view; updated after every applied event.
    pub fn subscribe(&self) -> watch::Receiver<EngineView> {
        self.views.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CandidateId, GestureOutcome, Intent};
    use crate::impls::RecordingDispatcher;
    use std::collections::HashSet;

    fn c(raw: u64) -> CandidateId {
        CandidateId::new(raw)
    }

    #[tokio::test]
    async fn apply_publishes_view() {
        let shared = SharedEngine::new(DiscoverEngine::new(RecordingDispatcher::new()));
        let mut rx = shared.subscribe();

        shared
            .apply(InboundEvent::CandidatesArrived {
                candidates: vec![c(1), c(2)],
            })
            .await;

        rx.changed().await.unwrap();
        let view = *rx.borrow();
        assert_eq!(view.current, Some(c(2)));
        assert_eq!(view.size, 2);
        assert_eq!(shared.view().await, view);
    }

    #[tokio::test]
    async fn concurrent_appends_and_decisions_never_duplicate() {
        let shared = SharedEngine::new(DiscoverEngine::new(RecordingDispatcher::new()));

        let mut joins = Vec::new();
        for worker in 0..4u64 {
            let shared = shared.clone();
            joins.push(tokio::spawn(async move {
                for round in 0..25u64 {
                    // overlapping batches on purpose
                    let batch = (round..round + 5).map(|n| c(n + worker)).collect();
                    shared
                        .apply(InboundEvent::CandidatesArrived { candidates: batch })
                        .await;
                    shared
                        .apply(InboundEvent::GestureEnd {
                            outcome: GestureOutcome::Left,
                        })
                        .await;
                    shared.apply(InboundEvent::UndoTap).await;
                }
            }));
        }
        for j in joins {
            j.await.unwrap();
        }

        let (len, unique) = shared
            .inspect(|e| {
                let unique: HashSet<_> = e.candidates().iter().copied().collect();
                (e.len(), unique.len())
            })
            .await;
        assert_eq!(len, unique);
    }

    #[tokio::test]
    async fn inspect_sees_dispatched_intents() {
        let shared = SharedEngine::new(DiscoverEngine::new(RecordingDispatcher::new()));
        shared.apply(InboundEvent::EngineStart).await;

        let intents = shared.inspect(|e| e.dispatcher().intents()).await;
        assert_eq!(intents, vec![Intent::FetchMore]);
    }
}
