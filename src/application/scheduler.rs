use super::orchestrator::{Orchestrator, RunOutcome, RunState, transition};
use crate::domain::event::IncomingPaymentEvent;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, oneshot};
use tokio::task::AbortHandle;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOutcome {
    Scheduled,
    /// A run for the same event identifier is already pending.
    Duplicate,
}

/// Handle to a scheduled run. Dropping it does not cancel the run.
pub struct RunHandle {
    outcome: oneshot::Receiver<RunOutcome>,
}

impl RunHandle {
    /// Waits for the run to finish. Returns `None` if the run never produced
    /// an outcome: it was cancelled, or its task panicked.
    pub async fn outcome(self) -> Option<RunOutcome> {
        self.outcome.await.ok()
    }
}

/// Arms one delayed, independent run per accepted event.
///
/// Runs are keyed by event identifier. While a run is still waiting out its
/// delay it can be cancelled, and a second event with the same identifier is
/// absorbed. Once the delay elapses the run leaves the registry and proceeds
/// to completion. Nothing survives a process restart.
#[derive(Clone)]
pub struct DisbursementScheduler {
    orchestrator: Arc<Orchestrator>,
    delay: Duration,
    pending: Arc<Mutex<HashMap<String, AbortHandle>>>,
}

impl DisbursementScheduler {
    pub fn new(orchestrator: Arc<Orchestrator>, delay: Duration) -> Self {
        Self {
            orchestrator,
            delay,
            pending: Arc::default(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn orchestrator(&self) -> &Arc<Orchestrator> {
        &self.orchestrator
    }

    pub async fn schedule(&self, event: IncomingPaymentEvent) -> (ScheduleOutcome, Option<RunHandle>) {
        let event_id = event.event_id.clone();
        transition(&event_id, RunState::Received);

        // Held across spawn + insert so the task cannot look itself up first.
        let mut pending = self.pending.lock().await;
        if pending.contains_key(&event_id) {
            info!(event_id = %event_id, "Duplicate event absorbed, run already pending");
            return (ScheduleOutcome::Duplicate, None);
        }

        let (tx, rx) = oneshot::channel();
        let orchestrator = self.orchestrator.clone();
        let registry = self.pending.clone();
        let delay = self.delay;
        let key = event_id.clone();

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if registry.lock().await.remove(&key).is_none() {
                return;
            }
            let outcome = orchestrator.run(event).await;
            let _ = tx.send(outcome);
        });

        pending.insert(event_id.clone(), task.abort_handle());
        transition(&event_id, RunState::Scheduled);
        info!(event_id = %event_id, delay_secs = delay.as_secs(), "Split run scheduled");

        (ScheduleOutcome::Scheduled, Some(RunHandle { outcome: rx }))
    }

    /// Cancels a run still waiting out its delay. Returns whether one was
    /// cancelled.
    pub async fn cancel(&self, event_id: &str) -> bool {
        match self.pending.lock().await.remove(event_id) {
            Some(handle) => {
                handle.abort();
                info!(event_id, "Scheduled split run cancelled");
                true
            }
            None => false,
        }
    }

    /// Identifiers of runs still waiting out their delay, sorted.
    pub async fn pending(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.pending.lock().await.keys().cloned().collect();
        ids.sort();
        ids
    }
}
