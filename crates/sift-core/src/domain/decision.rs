//! Decision model: what a finished gesture means.
//!
//! This module defines the discrete gesture outcome delivered by the external
//! gesture recognizer, the Decision it maps to, and the Decider trait
//! (how to map one to the other).

use serde::{Deserialize, Serialize};

/// End state of a drag gesture, as reported by the gesture recognizer.
///
/// The recognizer owns the thresholds; the engine only sees this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureOutcome {
    Left,
    Right,
    /// Released without crossing a classification threshold.
    None,
}

/// The classification of a gesture outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Persisted as "liked" (wishlist).
    Like,
    /// Persisted as "seen".
    Seen,
    /// No judgment: no queue mutation, no dispatch.
    None,
}

/// Trait for mapping a gesture outcome to a decision.
///
/// Deciders are pure functions: no queue access, no side effects.
/// The engine executes whatever the decider returns.
pub trait Decider: Send + Sync {
    fn decide(&self, outcome: GestureOutcome) -> Decision;
}

/// Default mapping: `Left → Like`, `Right → Seen`, `None → None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDecider;

impl Decider for DefaultDecider {
    fn decide(&self, outcome: GestureOutcome) -> Decision {
        match outcome {
            GestureOutcome::Left => Decision::Like,
            GestureOutcome::Right => Decision::Seen,
            GestureOutcome::None => Decision::None,
        }
    }
}
