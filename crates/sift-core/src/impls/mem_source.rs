//! InMemoryCandidateSource - 開発用の候補ソース
//!
//! Simulates a "random discover" catalog API: each query picks a random
//! release year and sort order, then pages through a shuffled catalog.
//! `reset` drops the cursor so the next fetch starts a new random query.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::{MAX_CATALOG_SIZE, SourceConfig};
use crate::domain::{CandidateId, Result, SiftError};
use crate::ports::CandidateSource;

const SORT_ORDERS: &[&str] = &[
    "popularity.desc",
    "popularity.asc",
    "vote_average.desc",
    "vote_average.asc",
    "release_date.desc",
    "release_date.asc",
];

const YEARS: std::ops::RangeInclusive<u16> = 1950..=2019;

/// The remote query a page belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoverCursor {
    pub year: u16,
    pub sort_by: String,
    /// Next page to serve, 1-based.
    pub page: u32,
}

struct SourceState {
    rng: StdRng,
    cursor: Option<DiscoverCursor>,
    /// Shuffled result set of the current query.
    results: Vec<CandidateId>,
}

pub struct InMemoryCandidateSource {
    state: Mutex<SourceState>,
    page_size: usize,
    catalog_size: u64,
    remaining_failures: AtomicU32,
}

impl InMemoryCandidateSource {
    pub fn new(config: &SourceConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            state: Mutex::new(SourceState {
                rng,
                cursor: None,
                results: Vec::new(),
            }),
            page_size: config.page_size.max(1),
            catalog_size: config.catalog_size.clamp(1, MAX_CATALOG_SIZE),
            remaining_failures: AtomicU32::new(0),
        }
    }

    /// Make the next `n` fetches fail.
    pub fn with_failures(self, n: u32) -> Self {
        self.remaining_failures.store(n, Ordering::Relaxed);
        self
    }

    /// The active query, if one was started.
    pub async fn cursor(&self) -> Option<DiscoverCursor> {
        self.state.lock().await.cursor.clone()
    }

    fn start_query(&self, state: &mut SourceState) {
        let mut results: Vec<CandidateId> = (1..=self.catalog_size).map(CandidateId::new).collect();
        results.shuffle(&mut state.rng);

        let years: Vec<u16> = YEARS.collect();
        let year = years.choose(&mut state.rng).copied().unwrap_or(*YEARS.start());
        let sort_by = SORT_ORDERS
            .choose(&mut state.rng)
            .copied()
            .unwrap_or(SORT_ORDERS[0])
            .to_string();

        debug!(year, %sort_by, "starting new discover query");
        state.results = results;
        state.cursor = Some(DiscoverCursor {
            year,
            sort_by,
            page: 1,
        });
    }
}

#[async_trait]
impl CandidateSource for InMemoryCandidateSource {
    async fn fetch_next(&self) -> Result<Vec<CandidateId>> {
        let failing = self
            .remaining_failures
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1));
        if let Ok(left) = failing {
            return Err(SiftError::candidate_source(format!(
                "intentional failure (left={left})"
            )));
        }

        let mut state = self.state.lock().await;
        let exhausted = match &state.cursor {
            None => true,
            Some(cursor) => (cursor.page as usize - 1) * self.page_size >= state.results.len(),
        };
        if exhausted {
            self.start_query(&mut state);
        }

        let Some(page) = state.cursor.as_ref().map(|c| c.page) else {
            return Ok(Vec::new());
        };
        let start = (page as usize - 1) * self.page_size;
        let end = (start + self.page_size).min(state.results.len());
        let batch = state.results[start..end].to_vec();
        if let Some(cursor) = state.cursor.as_mut() {
            cursor.page += 1;
        }
        Ok(batch)
    }

    async fn reset(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        state.cursor = None;
        state.results.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn config(page_size: usize, catalog_size: u64) -> SourceConfig {
        SourceConfig {
            page_size,
            catalog_size,
            seed: Some(7),
        }
    }

    #[tokio::test]
    async fn pages_do_not_overlap_within_a_query() {
        let source = InMemoryCandidateSource::new(&config(5, 20));

        let mut seen = HashSet::new();
        for _ in 0..4 {
            let page = source.fetch_next().await.unwrap();
            assert_eq!(page.len(), 5);
            for id in page {
                assert!(seen.insert(id), "{id} served twice");
            }
        }
        assert_eq!(source.cursor().await.map(|c| c.page), Some(5));
    }

    #[tokio::test]
    async fn exhausted_query_starts_over() {
        let source = InMemoryCandidateSource::new(&config(10, 10));
        source.fetch_next().await.unwrap();

        let next = source.fetch_next().await.unwrap();

        assert_eq!(next.len(), 10);
        assert_eq!(source.cursor().await.map(|c| c.page), Some(2));
    }

    #[tokio::test]
    async fn reset_drops_cursor() {
        let source = InMemoryCandidateSource::new(&config(5, 20));
        source.fetch_next().await.unwrap();
        source.fetch_next().await.unwrap();

        source.reset().await.unwrap();
        assert_eq!(source.cursor().await, None);

        source.fetch_next().await.unwrap();
        let cursor = source.cursor().await.unwrap();
        assert_eq!(cursor.page, 2);
        assert!(YEARS.contains(&cursor.year));
        assert!(SORT_ORDERS.contains(&cursor.sort_by.as_str()));
    }

    #[tokio::test]
    async fn seeded_sources_agree() {
        let a = InMemoryCandidateSource::new(&config(5, 50));
        let b = InMemoryCandidateSource::new(&config(5, 50));
        assert_eq!(a.fetch_next().await.unwrap(), b.fetch_next().await.unwrap());
    }

    #[tokio::test]
    async fn empty_catalog_serves_a_single_candidate() {
        let source = InMemoryCandidateSource::new(&config(5, 0));

        let first = source.fetch_next().await.unwrap();
        let second = source.fetch_next().await.unwrap();

        assert_eq!(first, vec![CandidateId::new(1)]);
        assert_eq!(second, vec![CandidateId::new(1)]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_fetches_consume_each_failure_once() {
        let source = Arc::new(InMemoryCandidateSource::new(&config(2, 50)).with_failures(3));

        let mut joins = Vec::new();
        for _ in 0..16 {
            let source = Arc::clone(&source);
            joins.push(tokio::spawn(async move { source.fetch_next().await.is_err() }));
        }
        let mut failures = 0;
        for j in joins {
            if j.await.unwrap() {
                failures += 1;
            }
        }

        assert_eq!(failures, 3);
        assert!(source.fetch_next().await.is_ok());
    }

    #[tokio::test]
    async fn injected_failures_are_consumed() {
        let source = InMemoryCandidateSource::new(&config(5, 20)).with_failures(1);

        assert!(matches!(
            source.fetch_next().await,
            Err(SiftError::Source { .. })
        ));
        assert_eq!(source.fetch_next().await.unwrap().len(), 5);
    }
}
