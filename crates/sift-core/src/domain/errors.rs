//! Errors - エラー型と分類
//!
//! The engine itself has no fatal errors. `QueueError` is the expected,
//! non-exceptional rejection from `DiscoverQueue::push_back`; `SiftError`
//! covers collaborator-side failures (config, source, ledger, io).

use thiserror::Error;

use super::ids::CandidateId;

/// Rejection from the queue's insert contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("{0} is already queued")]
    DuplicateCandidate(CandidateId),
}

/// Failures outside the in-memory core.
#[derive(Debug, Error)]
pub enum SiftError {
    #[error("config error: {message}")]
    Config { message: String },

    #[error("candidate source error: {message}")]
    Source { message: String },

    #[error("decision ledger error: {message}")]
    Ledger { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SiftError>;

impl SiftError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn candidate_source(message: impl Into<String>) -> Self {
        Self::Source {
            message: message.into(),
        }
    }
}

impl From<toml::de::Error> for SiftError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.to_string())
    }
}
