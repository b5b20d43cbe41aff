//! CandidateSource port - 候補の取得元（カタログ API など）
//!
//! The source owns the remote pagination/filter cursor. The engine never
//! calls it directly: `FetchWorker` does, in response to intents.

use async_trait::async_trait;

use crate::domain::{CandidateId, Result};

#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Fetch the next page at the current cursor and advance it.
    async fn fetch_next(&self) -> Result<Vec<CandidateId>>;

    /// Invalidate the cursor; the next fetch starts a fresh query.
    async fn reset(&self) -> Result<()>;
}
