//! Queue module: the candidate buffer, undo memory, and replenishment policy.
//!
//! These are plain synchronous data structures with no concurrency contract
//! of their own. `app::SharedEngine` provides the lock.

mod discover;
mod replenish;
mod undo;

pub use discover::DiscoverQueue;
pub use replenish::{DEFAULT_LOW_WATER_MARK, Replenishment, ReplenishmentPolicy};
pub use undo::{UndoEntry, UndoKind, UndoMemory};
