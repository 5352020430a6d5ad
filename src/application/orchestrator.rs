use super::allocator::allocate;
use super::disburser::DisbursementClient;
use super::resolver::SplitResolver;
use crate::domain::disbursement::DisbursementReport;
use crate::domain::event::IncomingPaymentEvent;
use crate::domain::notification::Notification;
use crate::domain::ports::NotifierRef;
use crate::domain::split::SplitResolution;
use tracing::{debug, error, info, warn};

/// Stages of one run. `Received` and `Scheduled` are owned by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Received,
    Scheduled,
    Resolving,
    Unconfigured,
    Allocating,
    Disbursing,
    Reporting,
    Done,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// No record for the payer. Nothing is sent.
    PayerNotFound,
    /// Record without a usable template. A setup notice was sent.
    Unconfigured,
    /// Every entry was attempted and the report was sent.
    Completed(DisbursementReport),
    /// The store could not be reached. Nothing is sent.
    StoreUnavailable(String),
}

/// Drives one event from split resolution to the final report.
///
/// Entries are disbursed strictly one after another, in template order, and
/// a failed entry never stops the run.
#[derive(Clone)]
pub struct Orchestrator {
    resolver: SplitResolver,
    client: DisbursementClient,
    notifier: NotifierRef,
}

impl Orchestrator {
    pub fn new(resolver: SplitResolver, client: DisbursementClient, notifier: NotifierRef) -> Self {
        Self {
            resolver,
            client,
            notifier,
        }
    }

    pub fn currency(&self) -> &str {
        self.client.currency()
    }

    pub fn notifier(&self) -> &NotifierRef {
        &self.notifier
    }

    pub async fn run(&self, event: IncomingPaymentEvent) -> RunOutcome {
        let event_id = event.event_id.as_str();

        transition(event_id, RunState::Resolving);
        let config = match self.resolver.resolve(&event.payer).await {
            Ok(SplitResolution::Configured(config)) => config,
            Ok(SplitResolution::NotFound) => {
                warn!(event_id, payer = %event.payer, "Payer not found, nothing to split");
                transition(event_id, RunState::Done);
                return RunOutcome::PayerNotFound;
            }
            Ok(SplitResolution::Unconfigured) => {
                transition(event_id, RunState::Unconfigured);
                warn!(event_id, payer = %event.payer, "Split template missing or malformed");
                self.notifier
                    .notify(Notification::setup_required(&event))
                    .await;
                transition(event_id, RunState::Done);
                return RunOutcome::Unconfigured;
            }
            Err(e) => {
                error!(event_id, payer = %event.payer, error = %e, "Split store unavailable, aborting run");
                return RunOutcome::StoreUnavailable(e.to_string());
            }
        };

        transition(event_id, RunState::Allocating);
        let shares = allocate(event.gross_amount, config.entries());

        transition(event_id, RunState::Disbursing);
        let mut report = DisbursementReport::new(event.payer.clone(), event.gross_amount);
        for (entry, amount) in shares {
            report.push(self.client.disburse(entry, amount).await);
        }

        transition(event_id, RunState::Reporting);
        self.notifier
            .notify(Notification::report(&event, &report, self.currency()))
            .await;

        info!(
            event_id,
            payer = %event.payer,
            succeeded = report.succeeded(),
            failed = report.failed(),
            disbursed = %report.total_disbursed(),
            "Split run complete"
        );
        transition(event_id, RunState::Done);
        RunOutcome::Completed(report)
    }
}

pub(crate) fn transition(event_id: &str, state: RunState) {
    debug!(event_id, ?state, "Run state");
}
