//! ChannelDispatcher - intent を tokio mpsc に流す dispatcher
//!
//! `dispatch` は unbounded channel への send だけなので、エンジンのロック中に
//! 呼んでもブロックしない。受信側は `app::FetchWorker`。

use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::IntentEnvelope;
use crate::ports::ActionDispatcher;

#[derive(Debug, Clone)]
pub struct ChannelDispatcher {
    tx: mpsc::UnboundedSender<IntentEnvelope>,
}

impl ChannelDispatcher {
    /// Dispatcher plus the receiving end for the worker.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<IntentEnvelope>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ActionDispatcher for ChannelDispatcher {
    fn dispatch(&self, envelope: IntentEnvelope) {
        if let Err(err) = self.tx.send(envelope) {
            // worker gone: the engine stays consistent, the intent is lost
            warn!(
                intent = err.0.intent().name(),
                intent_id = %err.0.intent_id(),
                "intent channel closed, dropping intent"
            );
        }
    }
}
