//! Domain model (ids, decisions, intents, inbound events, errors).

pub mod decision;
pub mod errors;
pub mod events;
pub mod ids;
pub mod intent;

pub use self::decision::{Decider, Decision, DefaultDecider, GestureOutcome};
pub use self::errors::{QueueError, Result, SiftError};
pub use self::events::InboundEvent;
pub use self::ids::{CandidateId, IntentId};
pub use self::intent::{Intent, IntentEnvelope};
