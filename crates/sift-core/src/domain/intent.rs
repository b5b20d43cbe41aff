//! Intents - エンジンから ActionDispatcher へ送る指示
//!
//! The engine never performs I/O. Every external effect is expressed as an
//! `Intent`, wrapped in an `IntentEnvelope` and handed to the dispatcher.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CandidateId, IntentId};

/// Typed request for an external effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "candidate", rename_all = "snake_case")]
pub enum Intent {
    /// Fetch another page and append it through `push_back`.
    FetchMore,
    /// Invalidate the externally held pagination/filter cursor.
    ResetRemoteState,
    RecordAsLiked(CandidateId),
    RecordAsSeen(CandidateId),
    /// Undo re-queued this candidate. No persistence change required.
    PushBack(CandidateId),
}

impl Intent {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Intent::FetchMore => "fetch-more",
            Intent::ResetRemoteState => "reset-remote-state",
            Intent::RecordAsLiked(_) => "record-as-liked",
            Intent::RecordAsSeen(_) => "record-as-seen",
            Intent::PushBack(_) => "push-back",
        }
    }
}

/// An intent plus the metadata needed to correlate it later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentEnvelope {
    intent_id: IntentId,
    issued_at: DateTime<Utc>,
    intent: Intent,
}

impl IntentEnvelope {
    pub fn new(intent_id: IntentId, issued_at: DateTime<Utc>, intent: Intent) -> Self {
        Self {
            intent_id,
            issued_at,
            intent,
        }
    }

    pub fn intent_id(&self) -> IntentId {
        self.intent_id
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn intent(&self) -> Intent {
        self.intent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ulid::Ulid;

    #[test]
    fn intent_is_tagged_enum() {
        let v = serde_json::to_value(Intent::RecordAsSeen(CandidateId::new(3))).unwrap();
        assert_eq!(v["kind"], "record_as_seen");
        assert_eq!(v["candidate"], 3);

        let v = serde_json::to_value(Intent::FetchMore).unwrap();
        assert_eq!(v["kind"], "fetch_more");
    }

    #[test]
    fn envelope_keeps_metadata() {
        let id = IntentId::from_ulid(Ulid::new());
        let now = Utc::now();
        let env = IntentEnvelope::new(id, now, Intent::FetchMore);
        assert_eq!(env.intent_id(), id);
        assert_eq!(env.issued_at(), now);
        assert_eq!(env.intent(), Intent::FetchMore);
        assert_eq!(env.intent().name(), "fetch-more");
    }
}
