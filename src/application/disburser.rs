use crate::domain::bank;
use crate::domain::disbursement::{DisbursementError, DisbursementOutcome, DisbursementResult};
use crate::domain::money::Amount;
use crate::domain::ports::{NewRecipient, PaymentRailRef, TransferRequest};
use crate::domain::split::SplitEntry;
use tracing::{debug, warn};

/// Executes a single payout: resolve the bank, register the recipient, then
/// transfer.
///
/// Each step can fail on its own. A registration that succeeds before a
/// failed transfer is left in place on the rail.
#[derive(Clone)]
pub struct DisbursementClient {
    rail: PaymentRailRef,
    recipient_display_name: String,
    currency: String,
}

impl DisbursementClient {
    pub fn new(
        rail: PaymentRailRef,
        recipient_display_name: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            rail,
            recipient_display_name: recipient_display_name.into(),
            currency: currency.into(),
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Never fails: every error becomes a failed `DisbursementResult`.
    pub async fn disburse(&self, entry: &SplitEntry, amount: Amount) -> DisbursementResult {
        let outcome = match self
            .send(amount, &entry.bank, &entry.account_number, &entry.label)
            .await
        {
            Ok(transfer_code) => DisbursementOutcome::Sent {
                transfer_code: Some(transfer_code),
            },
            Err(e) => {
                warn!(label = %entry.label, bank = %entry.bank, %amount, error = %e, "Disbursement failed");
                DisbursementOutcome::Failed(e)
            }
        };

        DisbursementResult {
            label: entry.label.clone(),
            percentage: entry.percentage,
            bank: entry.bank.clone(),
            amount,
            outcome,
        }
    }

    async fn send(
        &self,
        amount: Amount,
        bank_name: &str,
        account_number: &str,
        memo: &str,
    ) -> Result<String, DisbursementError> {
        let bank_code = bank::lookup(bank_name)
            .ok_or_else(|| DisbursementError::UnknownBank(bank_name.to_string()))?;

        let recipient_code = self
            .rail
            .create_recipient(&NewRecipient {
                display_name: self.recipient_display_name.clone(),
                account_number: account_number.to_string(),
                bank_code,
                currency: self.currency.clone(),
            })
            .await
            .map_err(|e| DisbursementError::RecipientRegistration(e.to_string()))?;
        debug!(%recipient_code, "Recipient registered");

        self.rail
            .initiate_transfer(&TransferRequest {
                amount,
                recipient_code,
                memo: memo.to_string(),
            })
            .await
            .map_err(|e| DisbursementError::TransferExecution(e.to_string()))
    }
}
