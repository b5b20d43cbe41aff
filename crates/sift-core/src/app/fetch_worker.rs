//! FetchWorker - intent を実際の I/O に変換するバックグラウンドタスク
//!
//! # フロー
//! 1. ChannelDispatcher から IntentEnvelope を受信
//! 2. intent ごとに CandidateSource / DecisionLedger を呼ぶ
//! 3. fetch 結果は `CandidatesArrived` として SharedEngine に戻す
//!
//! Intents are executed one at a time, in dispatch order. Collaborator
//! failures are logged and dropped; the engine never sees them.
//! Intents already queued when shutdown is requested are still executed.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::shared::SharedEngine;
use crate::domain::{Decider, InboundEvent, Intent, IntentEnvelope};
use crate::ports::{ActionDispatcher, CandidateSource, DecisionLedger};

/// Handle to a running worker.
/// - `shutdown_and_join()` で停止して終了を待つ
pub struct FetchWorker {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

struct Collaborators<D, K> {
    engine: SharedEngine<D, K>,
    source: Arc<dyn CandidateSource>,
    ledger: Arc<dyn DecisionLedger>,
}

impl FetchWorker {
    pub fn spawn<D, K>(
        intents: mpsc::UnboundedReceiver<IntentEnvelope>,
        engine: SharedEngine<D, K>,
        source: Arc<dyn CandidateSource>,
        ledger: Arc<dyn DecisionLedger>,
    ) -> Self
    where
        D: ActionDispatcher + 'static,
        K: Decider + 'static,
    {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let collaborators = Collaborators {
            engine,
            source,
            ledger,
        };
        let join = tokio::spawn(worker_loop(intents, collaborators, shutdown_rx));
        Self { shutdown_tx, join }
    }

    pub fn request_shutdown(&self) {
        // ignore send error: the loop may already be gone
        let _ = self.shutdown_tx.send(true);
    }

    pub async fn shutdown_and_join(self) {
        self.request_shutdown();
        if let Err(err) = self.join.await {
            warn!(%err, "fetch worker panicked");
        }
    }
}

async fn worker_loop<D, K>(
    mut intents: mpsc::UnboundedReceiver<IntentEnvelope>,
    collaborators: Collaborators<D, K>,
    mut shutdown_rx: watch::Receiver<bool>,
) where
    D: ActionDispatcher,
    K: Decider,
{
    loop {
        if *shutdown_rx.borrow() {
            break;
        }

        let envelope = tokio::select! {
            changed = shutdown_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                continue;
            }
            envelope = intents.recv() => envelope,
        };

        let Some(envelope) = envelope else {
            debug!("intent channel closed");
            break;
        };

        execute(&collaborators, envelope).await;
    }

    while let Ok(envelope) = intents.try_recv() {
        execute(&collaborators, envelope).await;
    }
    info!("fetch worker stopped");
}

async fn execute<D, K>(c: &Collaborators<D, K>, envelope: IntentEnvelope)
where
    D: ActionDispatcher,
    K: Decider,
{
    let intent_id = envelope.intent_id();
    let result = match envelope.intent() {
        Intent::FetchMore => match c.source.fetch_next().await {
            Ok(candidates) => {
                debug!(%intent_id, fetched = candidates.len(), "page fetched");
                c.engine
                    .apply(InboundEvent::CandidatesArrived { candidates })
                    .await;
                Ok(())
            }
            Err(err) => Err(err),
        },
        Intent::ResetRemoteState => c.source.reset().await,
        Intent::RecordAsLiked(candidate) => c.ledger.record_liked(candidate).await,
        Intent::RecordAsSeen(candidate) => c.ledger.record_seen(candidate).await,
        Intent::PushBack(candidate) => {
            // re-queue only; nothing to persist
            debug!(%intent_id, %candidate, "push-back acknowledged");
            Ok(())
        }
    };

    if let Err(err) = result {
        warn!(%intent_id, intent = envelope.intent().name(), %err, "intent failed");
    }
}
