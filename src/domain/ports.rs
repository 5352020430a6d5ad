use super::bank::BankCode;
use super::money::Amount;
use super::notification::Notification;
use super::split::PayerRecord;
use crate::error::{RailError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Read-only lookup of payer records.
#[async_trait]
pub trait SplitStore: Send + Sync {
    /// Exact match on the payer's wallet email. Errors mean the store could
    /// not be reached, not that the payer is unknown.
    async fn find_by_payer(&self, payer: &str) -> Result<Option<PayerRecord>>;
}

/// Recipient registration request sent to the rail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipient {
    pub display_name: String,
    pub account_number: String,
    pub bank_code: BankCode,
    pub currency: String,
}

/// Transfer request sent to the rail. `amount` is converted to minor units
/// by the adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub amount: Amount,
    pub recipient_code: String,
    pub memo: String,
}

/// The external, non-transactional payment rail.
#[async_trait]
pub trait PaymentRail: Send + Sync {
    /// Returns the rail's recipient reference.
    async fn create_recipient(&self, recipient: &NewRecipient) -> std::result::Result<String, RailError>;

    /// Returns the rail's transfer reference.
    async fn initiate_transfer(&self, transfer: &TransferRequest) -> std::result::Result<String, RailError>;
}

/// Best-effort outbound messaging. Implementations log failures themselves.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification);
}

pub type SplitStoreRef = Arc<dyn SplitStore>;
pub type PaymentRailRef = Arc<dyn PaymentRail>;
pub type NotifierRef = Arc<dyn Notifier>;
