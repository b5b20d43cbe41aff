//! InMemoryDecisionLedger - liked（wishlist）/ seen リストの開発用実装
//!
//! Each list keeps a candidate once. A candidate can appear in both lists.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{CandidateId, Result};
use crate::ports::DecisionLedger;

#[derive(Debug, Default)]
struct Lists {
    liked: Vec<CandidateId>,
    seen: Vec<CandidateId>,
}

#[derive(Debug, Default)]
pub struct InMemoryDecisionLedger {
    lists: Mutex<Lists>,
}

impl InMemoryDecisionLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

fn insert_once(list: &mut Vec<CandidateId>, candidate: CandidateId) {
    if !list.contains(&candidate) {
        list.push(candidate);
    }
}

#[async_trait]
impl DecisionLedger for InMemoryDecisionLedger {
    async fn record_liked(&self, candidate: CandidateId) -> Result<()> {
        insert_once(&mut self.lists.lock().await.liked, candidate);
        Ok(())
    }

    async fn record_seen(&self, candidate: CandidateId) -> Result<()> {
        insert_once(&mut self.lists.lock().await.seen, candidate);
        Ok(())
    }

    async fn liked(&self) -> Result<Vec<CandidateId>> {
        Ok(self.lists.lock().await.liked.clone())
    }

    async fn seen(&self) -> Result<Vec<CandidateId>> {
        Ok(self.lists.lock().await.seen.clone())
    }
}
