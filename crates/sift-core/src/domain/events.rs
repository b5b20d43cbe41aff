//! Events - プレゼンテーション層からエンジンへ届く入力

use serde::{Deserialize, Serialize};

use super::decision::GestureOutcome;
use super::ids::CandidateId;

/// Everything the engine accepts from the outside world.
///
/// `CandidatesArrived` is the append path used by the fetch collaborator;
/// the others come from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InboundEvent {
    EngineStart,
    GestureEnd { outcome: GestureOutcome },
    ManualReject,
    UndoTap,
    ResetTap,
    CandidatesArrived { candidates: Vec<CandidateId> },
}
