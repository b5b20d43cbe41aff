//! RecordingDispatcher - dispatch された intent を記録するだけの dispatcher
//!
//! テストや dry-run 用。外部作用は一切起こさない。

use std::sync::{Mutex, PoisonError};

use crate::domain::{Intent, IntentEnvelope};
use crate::ports::ActionDispatcher;

#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    log: Mutex<Vec<IntentEnvelope>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every envelope seen so far, in dispatch order.
    pub fn envelopes(&self) -> Vec<IntentEnvelope> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Just the intents, in dispatch order.
    pub fn intents(&self) -> Vec<Intent> {
        self.envelopes().iter().map(IntentEnvelope::intent).collect()
    }

    pub fn count(&self, intent: Intent) -> usize {
        self.intents().into_iter().filter(|i| *i == intent).count()
    }

    pub fn clear(&self) {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl ActionDispatcher for RecordingDispatcher {
    fn dispatch(&self, envelope: IntentEnvelope) {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(envelope);
    }
}
