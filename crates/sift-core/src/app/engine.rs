//! DiscoverEngine - 分類・undo・補充をまとめた単一ライターのエンジン
//!
//! # フロー
//! 1. gesture-end → Decider で Decision に変換
//! 2. UndoMemory に記録 → record intent を dispatch → pop
//! 3. 補充チェック（low-water mark 未満なら fetch-more）
//!
//! Every method here is synchronous and non-blocking. For concurrent use,
//! wrap the engine in `SharedEngine`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{
    CandidateId, Decider, Decision, DefaultDecider, GestureOutcome, InboundEvent, Intent,
    IntentEnvelope,
};
use crate::ports::{ActionDispatcher, Clock, IdGenerator, SystemClock, UlidGenerator};
use crate::queue::{
    DiscoverQueue, Replenishment, ReplenishmentPolicy, UndoEntry, UndoKind, UndoMemory,
};

/// Result of `handle_gesture_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEffect {
    /// The outcome mapped to `Decision::None`.
    Ignored,
    /// Nothing to classify.
    EmptyQueue,
    Decided {
        candidate: CandidateId,
        decision: Decision,
    },
}

/// Result of `undo_last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoEffect {
    /// The candidate is current again.
    Restored(UndoEntry),
    /// A fetch already brought the candidate back; the slot was dropped.
    AlreadyQueued(UndoEntry),
    NothingToUndo,
}

/// Outcome of appending a fetched batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendReport {
    pub inserted: Vec<CandidateId>,
    /// Ids already present; skipped.
    pub rejected: Vec<CandidateId>,
}

/// What `DiscoverEngine::apply` did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Started(Replenishment),
    Gesture(GestureEffect),
    Rejected(Option<CandidateId>),
    Undo(UndoEffect),
    Reset(Replenishment),
    Appended(AppendReport),
}

/// Read-only projection for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineView {
    pub current: Option<CandidateId>,
    pub size: usize,
    pub undo_available: bool,
}

/// The decision queue engine.
///
/// Owns the queue and the undo slot; every external effect goes out
/// through the injected `ActionDispatcher`.
pub struct DiscoverEngine<D, K = DefaultDecider> {
    queue: DiscoverQueue,
    undo: UndoMemory,
    policy: ReplenishmentPolicy,
    decider: K,
    dispatcher: D,
    clock: Arc<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl<D: ActionDispatcher> DiscoverEngine<D> {
    /// Engine with the default decider, a low-water mark of 10 and the wall clock.
    pub fn new(dispatcher: D) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        Self {
            queue: DiscoverQueue::new(),
            undo: UndoMemory::new(),
            policy: ReplenishmentPolicy::default(),
            decider: DefaultDecider,
            dispatcher,
            ids: Box::new(UlidGenerator::new(Arc::clone(&clock))),
            clock,
        }
    }
}

impl<D: ActionDispatcher, K: Decider> DiscoverEngine<D, K> {
    pub fn with_policy(mut self, policy: ReplenishmentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Use `clock` for envelope timestamps and intent id generation.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.ids = Box::new(UlidGenerator::new(Arc::clone(&clock)));
        self.clock = clock;
        self
    }

    pub fn with_decider<K2: Decider>(self, decider: K2) -> DiscoverEngine<D, K2> {
        DiscoverEngine {
            queue: self.queue,
            undo: self.undo,
            policy: self.policy,
            decider,
            dispatcher: self.dispatcher,
            clock: self.clock,
            ids: self.ids,
        }
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn policy(&self) -> ReplenishmentPolicy {
        self.policy
    }

    // ------------------------------------------------------------------
    // Inbound events
    // ------------------------------------------------------------------

    /// Single entry point for every inbound event.
    pub fn apply(&mut self, event: InboundEvent) -> Applied {
        match event {
            InboundEvent::EngineStart => Applied::Started(self.start()),
            InboundEvent::GestureEnd { outcome } => {
                Applied::Gesture(self.handle_gesture_end(outcome))
            }
            InboundEvent::ManualReject => Applied::Rejected(self.manual_reject()),
            InboundEvent::UndoTap => Applied::Undo(self.undo_last()),
            InboundEvent::ResetTap => Applied::Reset(self.reset_session()),
            InboundEvent::CandidatesArrived { candidates } => {
                Applied::Appended(self.receive_candidates(candidates))
            }
        }
    }

    /// Initial replenishment check.
    pub fn start(&mut self) -> Replenishment {
        info!(size = self.queue.len(), "discover engine started");
        self.check_and_replenish()
    }

    /// Classify a finished gesture and act on it.
    pub fn handle_gesture_end(&mut self, outcome: GestureOutcome) -> GestureEffect {
        let decision = self.decider.decide(outcome);
        let intent_for: fn(CandidateId) -> Intent = match decision {
            Decision::Like => Intent::RecordAsLiked,
            Decision::Seen => Intent::RecordAsSeen,
            Decision::None => {
                debug!(?outcome, "gesture ended without a decision");
                return GestureEffect::Ignored;
            }
        };

        let Some(candidate) = self.queue.current() else {
            debug!(?outcome, "gesture ended on an empty queue");
            return GestureEffect::EmptyQueue;
        };

        self.undo.remember(candidate, UndoKind::Decision(decision));
        self.dispatch(intent_for(candidate));
        self.queue.pop_current();
        debug!(%candidate, ?decision, size = self.queue.len(), "candidate classified");

        self.check_and_replenish();
        GestureEffect::Decided {
            candidate,
            decision,
        }
    }

    /// Discard the current candidate without recording a decision.
    ///
    /// The candidate is still remembered for undo.
    pub fn manual_reject(&mut self) -> Option<CandidateId> {
        let Some(candidate) = self.queue.current() else {
            debug!("reject on an empty queue");
            return None;
        };

        self.undo.remember(candidate, UndoKind::Reject);
        self.queue.pop_current();
        debug!(%candidate, size = self.queue.len(), "candidate rejected");

        self.check_and_replenish();
        Some(candidate)
    }

    /// Put the last removed candidate back on top.
    ///
    /// Never dispatches an "un-record": a Like/Seen stays persisted.
    pub fn undo_last(&mut self) -> UndoEffect {
        let Some(entry) = self.undo.take() else {
            return UndoEffect::NothingToUndo;
        };

        match self.queue.push_back(entry.candidate) {
            Ok(()) => {
                self.dispatch(Intent::PushBack(entry.candidate));
                debug!(candidate = %entry.candidate, kind = ?entry.kind, "undo restored candidate");
                UndoEffect::Restored(entry)
            }
            Err(err) => {
                debug!(%err, "undo target already re-fetched, dropping");
                UndoEffect::AlreadyQueued(entry)
            }
        }
    }

    /// Dispatch `fetch-more` if the queue is below the low-water mark.
    pub fn check_and_replenish(&mut self) -> Replenishment {
        let verdict = self.policy.assess(self.queue.len());
        self.enact(verdict)
    }

    /// Start over: invalidate the remote cursor, drop every candidate and
    /// the undo slot, then fetch.
    pub fn reset_session(&mut self) -> Replenishment {
        let verdict = self.policy.on_reset();
        self.enact(verdict)
    }

    fn enact(&mut self, verdict: Replenishment) -> Replenishment {
        match verdict {
            Replenishment::FetchMore => {
                debug!(
                    size = self.queue.len(),
                    low_water_mark = self.policy.low_water_mark(),
                    "queue below low-water mark, requesting more"
                );
                self.dispatch(Intent::FetchMore);
            }
            Replenishment::ResetAndRefetch => {
                info!(dropped = self.queue.len(), "resetting discover session");
                self.dispatch(Intent::ResetRemoteState);
                self.queue.reset();
                self.undo.clear();
                self.check_and_replenish();
            }
            Replenishment::Sufficient => {}
        }
        verdict
    }

    /// Append a fetched batch through the queue's insert contract.
    ///
    /// Stale or overlapping pages are fine: already-present ids are skipped.
    pub fn receive_candidates<I>(&mut self, candidates: I) -> AppendReport
    where
        I: IntoIterator<Item = CandidateId>,
    {
        let mut report = AppendReport::default();
        for candidate in candidates {
            match self.queue.push_back(candidate) {
                Ok(()) => report.inserted.push(candidate),
                Err(_) => report.rejected.push(candidate),
            }
        }
        debug!(
            inserted = report.inserted.len(),
            rejected = report.rejected.len(),
            size = self.queue.len(),
            "candidates appended"
        );
        report
    }

    // ------------------------------------------------------------------
    // Projections
    // ------------------------------------------------------------------

    pub fn current(&self) -> Option<CandidateId> {
        self.queue.current()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn undo_available(&self) -> bool {
        self.undo.is_available()
    }

    pub fn undo_entry(&self) -> Option<UndoEntry> {
        self.undo.peek().copied()
    }

    /// Queue contents, bottom first.
    pub fn candidates(&self) -> &[CandidateId] {
        self.queue.as_slice()
    }

    pub fn view(&self) -> EngineView {
        EngineView {
            current: self.current(),
            size: self.len(),
            undo_available: self.undo_available(),
        }
    }

    fn dispatch(&self, intent: Intent) {
        let envelope =
            IntentEnvelope::new(self.ids.generate_intent_id(), self.clock.now(), intent);
        debug!(intent = intent.name(), intent_id = %envelope.intent_id(), "dispatching intent");
        self.dispatcher.dispatch(envelope);
    }
}
