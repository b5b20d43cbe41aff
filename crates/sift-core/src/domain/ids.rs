//! Domain identifiers (strongly-typed IDs).
//!
//! - `CandidateId`: 外部ストアが払い出す候補の ID。エンジンは中身を見ない。
//! - `IntentId`: dispatch した intent の相関 ID（ULID ベース）。
//!
//! ## ULID を使う理由
//! - 時刻でソート可能なので、dispatcher のログを発行順に並べられる
//! - 調整なしで生成できる

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Opaque identifier of a candidate item.
///
/// The value is owned by the external catalog (e.g. a movie id); the engine
/// only compares and hashes it.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(u64);

impl CandidateId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for CandidateId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "candidate-{}", self.0)
    }
}

/// Correlation id attached to every dispatched intent.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IntentId(Ulid);

impl IntentId {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl From<Ulid> for IntentId {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl fmt::Display for IntentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "intent-{}", self.0)
    }
}
