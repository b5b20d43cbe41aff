//! DecisionLedger port - liked / seen リストの永続化先
//!
//! Storage format is up to the implementation.

use async_trait::async_trait;

use crate::domain::{CandidateId, Result};

#[async_trait]
pub trait DecisionLedger: Send + Sync {
    async fn record_liked(&self, candidate: CandidateId) -> Result<()>;

    async fn record_seen(&self, candidate: CandidateId) -> Result<()>;

    /// Liked candidates, oldest first.
    async fn liked(&self) -> Result<Vec<CandidateId>>;

    /// Seen candidates, oldest first.
    async fn seen(&self) -> Result<Vec<CandidateId>>;
}
