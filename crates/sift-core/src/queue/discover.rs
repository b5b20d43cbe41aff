//! DiscoverQueue: the ordered buffer of candidates.

use std::collections::HashSet;

use crate::domain::{CandidateId, QueueError};

/// Ordered candidate buffer with tail-as-top semantics.
///
/// Design:
/// - `order` is the presentation sequence; the last element is the current item.
/// - `members` mirrors `order` for O(1) duplicate checks.
/// - Invariant: `order` and `members` hold exactly the same ids, no duplicates.
#[derive(Debug, Clone, Default)]
pub struct DiscoverQueue {
    order: Vec<CandidateId>,
    members: HashSet<CandidateId>,
}

impl DiscoverQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// The candidate on top (the tail), if any.
    pub fn current(&self) -> Option<CandidateId> {
        self.order.last().copied()
    }

    /// Remove and return the current candidate. `None` on an empty queue.
    pub fn pop_current(&mut self) -> Option<CandidateId> {
        let id = self.order.pop()?;
        self.members.remove(&id);
        Some(id)
    }

    /// Append `id` to the tail, making it the new current item.
    ///
    /// An id that is already queued is rejected and the queue is left as is.
    pub fn push_back(&mut self, id: CandidateId) -> Result<(), QueueError> {
        if !self.members.insert(id) {
            return Err(QueueError::DuplicateCandidate(id));
        }
        self.order.push(id);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: CandidateId) -> bool {
        self.members.contains(&id)
    }

    /// Queue contents, bottom first (the last element is current).
    pub fn as_slice(&self) -> &[CandidateId] {
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ids(raw: &[u64]) -> Vec<CandidateId> {
        raw.iter().copied().map(CandidateId::new).collect()
    }

    fn queue_of(raw: &[u64]) -> DiscoverQueue {
        let mut q = DiscoverQueue::new();
        for id in ids(raw) {
            q.push_back(id).unwrap();
        }
        q
    }

    #[test]
    fn empty_queue_has_no_current() {
        let mut q = DiscoverQueue::new();
        assert_eq!(q.current(), None);
        assert_eq!(q.pop_current(), None);
        assert_eq!(q.len(), 0);
        assert!(q.is_empty());
    }

    #[test]
    fn current_is_the_last_pushed() {
        let q = queue_of(&[1, 2, 3]);
        assert_eq!(q.current(), Some(CandidateId::new(3)));
        assert_eq!(q.as_slice(), ids(&[1, 2, 3]).as_slice());
    }

    #[test]
    fn pop_current_walks_down_the_stack() {
        let mut q = queue_of(&[1, 2, 3]);
        assert_eq!(q.pop_current(), Some(CandidateId::new(3)));
        assert_eq!(q.current(), Some(CandidateId::new(2)));
        assert!(!q.contains(CandidateId::new(3)));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn duplicate_push_is_rejected_without_mutation() {
        let mut q = queue_of(&[1, 2, 3]);
        let err = q.push_back(CandidateId::new(2)).unwrap_err();
        assert_eq!(err, QueueError::DuplicateCandidate(CandidateId::new(2)));
        assert_eq!(q.as_slice(), ids(&[1, 2, 3]).as_slice());
        assert_eq!(q.current(), Some(CandidateId::new(3)));
    }

    #[test]
    fn popped_id_can_be_pushed_again() {
        let mut q = queue_of(&[1, 2]);
        let top = q.pop_current().unwrap();
        q.push_back(top).unwrap();
        assert_eq!(q.current(), Some(top));
    }

    #[test]
    fn reset_clears_everything() {
        let mut q = queue_of(&[1, 2, 3]);
        q.reset();
        assert!(q.is_empty());
        assert_eq!(q.current(), None);
        // ids are free again after reset
        q.push_back(CandidateId::new(1)).unwrap();
        assert_eq!(q.len(), 1);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Push(u64),
        Pop,
        Reset,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => (0u64..16).prop_map(Op::Push),
            3 => Just(Op::Pop),
            1 => Just(Op::Reset),
        ]
    }

    proptest! {
        #[test]
        fn never_holds_duplicates(ops in prop::collection::vec(op(), 0..200)) {
            let mut q = DiscoverQueue::new();
            for op in ops {
                match op {
                    Op::Push(raw) => { let _ = q.push_back(CandidateId::new(raw)); }
                    Op::Pop => { q.pop_current(); }
                    Op::Reset => q.reset(),
                }
                let unique: HashSet<_> = q.as_slice().iter().copied().collect();
                prop_assert_eq!(unique.len(), q.len());
                prop_assert_eq!(q.current().is_none(), q.is_empty());
            }
        }
    }
}
