//! Replenishment policy: decides when to ask for more candidates.

use serde::{Deserialize, Serialize};

/// Default low-water mark.
pub const DEFAULT_LOW_WATER_MARK: usize = 10;

/// What the controller should do after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Replenishment {
    /// Queue is below the low-water mark; ask for another page.
    FetchMore,
    /// Drop everything, invalidate the remote cursor, then fetch.
    ResetAndRefetch,
    /// Enough candidates buffered.
    Sufficient,
}

/// Low-water-mark policy.
///
/// Pure: given a queue size, answers whether a fetch is due. Dispatching the
/// intent is the engine's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplenishmentPolicy {
    low_water_mark: usize,
}

impl ReplenishmentPolicy {
    /// Marks below 1 are raised to 1 so an empty queue always fetches.
    pub fn new(low_water_mark: usize) -> Self {
        Self {
            low_water_mark: low_water_mark.max(1),
        }
    }

    pub fn low_water_mark(&self) -> usize {
        self.low_water_mark
    }

    /// Decision after an ordinary mutation.
    pub fn assess(&self, queue_len: usize) -> Replenishment {
        if queue_len < self.low_water_mark {
            Replenishment::FetchMore
        } else {
            Replenishment::Sufficient
        }
    }

    /// Decision for an explicit session reset.
    pub fn on_reset(&self) -> Replenishment {
        Replenishment::ResetAndRefetch
    }
}

impl Default for ReplenishmentPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_LOW_WATER_MARK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, Replenishment::FetchMore)]
    #[case(8, Replenishment::FetchMore)]
    #[case(9, Replenishment::FetchMore)]
    #[case(10, Replenishment::Sufficient)]
    #[case(14, Replenishment::Sufficient)]
    fn default_policy_fetches_below_ten(#[case] len: usize, #[case] expected: Replenishment) {
        assert_eq!(ReplenishmentPolicy::default().assess(len), expected);
    }

    #[test]
    fn custom_mark_is_respected() {
        let policy = ReplenishmentPolicy::new(3);
        assert_eq!(policy.low_water_mark(), 3);
        assert_eq!(policy.assess(2), Replenishment::FetchMore);
        assert_eq!(policy.assess(3), Replenishment::Sufficient);
    }

    #[test]
    fn reset_always_refetches() {
        assert_eq!(
            ReplenishmentPolicy::default().on_reset(),
            Replenishment::ResetAndRefetch
        );
        assert_eq!(ReplenishmentPolicy::new(1).on_reset(), Replenishment::ResetAndRefetch);
    }

    #[test]
    fn zero_mark_still_fetches_when_empty() {
        let policy = ReplenishmentPolicy::new(0);
        assert_eq!(policy.low_water_mark(), 1);
        assert_eq!(policy.assess(0), Replenishment::FetchMore);
    }
}
