//! Single-slot undo memory.

use serde::{Deserialize, Serialize};

use crate::domain::{CandidateId, Decision};

/// How the remembered candidate left the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "via", content = "decision", rename_all = "snake_case")]
pub enum UndoKind {
    /// Removed by a Like/Seen decision that was dispatched for recording.
    Decision(Decision),
    /// Removed by the reject control; nothing was recorded.
    Reject,
}

/// The remembered removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoEntry {
    pub candidate: CandidateId,
    pub kind: UndoKind,
}

/// Holds at most one entry: the latest removal.
///
/// A new `remember` overwrites the slot; `take` consumes it.
#[derive(Debug, Clone, Default)]
pub struct UndoMemory {
    slot: Option<UndoEntry>,
}

impl UndoMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remember(&mut self, candidate: CandidateId, kind: UndoKind) {
        self.slot = Some(UndoEntry { candidate, kind });
    }

    /// Consume the slot, leaving it empty.
    pub fn take(&mut self) -> Option<UndoEntry> {
        self.slot.take()
    }

    pub fn peek(&self) -> Option<&UndoEntry> {
        self.slot.as_ref()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    pub fn is_available(&self) -> bool {
        self.slot.is_some()
    }
}
