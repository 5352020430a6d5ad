use super::money::{Amount, Percentage};
use thiserror::Error;

/// Per-entry failure. Recorded in the report; never aborts a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DisbursementError {
    #[error("Unknown Bank ({0})")]
    UnknownBank(String),
    #[error("recipient registration failed: {0}")]
    RecipientRegistration(String),
    #[error("transfer failed: {0}")]
    TransferExecution(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisbursementOutcome {
    Sent { transfer_code: Option<String> },
    Failed(DisbursementError),
}

/// Result of disbursing one split entry.
#[derive(Debug, Clone, PartialEq)]
pub struct DisbursementResult {
    pub label: String,
    pub percentage: Percentage,
    pub bank: String,
    pub amount: Amount,
    pub outcome: DisbursementOutcome,
}

impl DisbursementResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, DisbursementOutcome::Sent { .. })
    }

    /// Human-readable status naming the failed stage, if any.
    pub fn status_message(&self) -> String {
        match &self.outcome {
            DisbursementOutcome::Sent { .. } => format!("Sent to {}", self.bank),
            DisbursementOutcome::Failed(e @ DisbursementError::UnknownBank(_)) => {
                format!("Failed: {e}")
            }
            DisbursementOutcome::Failed(e) => format!("Failed to {}: {e}", self.bank),
        }
    }
}

/// Aggregate outcome of one orchestrator run, in split-template order.
#[derive(Debug, Clone, PartialEq)]
pub struct DisbursementReport {
    pub payer: String,
    pub gross_amount: Amount,
    pub results: Vec<DisbursementResult>,
}

impl DisbursementReport {
    pub fn new(payer: impl Into<String>, gross_amount: Amount) -> Self {
        Self {
            payer: payer.into(),
            gross_amount,
            results: Vec::new(),
        }
    }

    pub fn push(&mut self, result: DisbursementResult) {
        self.results.push(result);
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    pub fn total_disbursed(&self) -> Amount {
        self.results
            .iter()
            .filter(|r| r.is_success())
            .fold(Amount::ZERO, |acc, r| acc + r.amount)
    }

    /// Renders one line per entry under a fixed heading.
    pub fn render(&self, currency: &str) -> String {
        let mut body = String::from("Funds Distributed:\n");
        for result in &self.results {
            body.push_str(&format!(
                "- {} ({}%): {} {} [{}]\n",
                result.label,
                result.percentage,
                currency,
                result.amount,
                result.status_message()
            ));
        }
        body
    }
}
