#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{Value, json};
use splitpay::application::disburser::DisbursementClient;
use splitpay::application::orchestrator::Orchestrator;
use splitpay::application::resolver::SplitResolver;
use splitpay::application::scheduler::DisbursementScheduler;
use splitpay::domain::event::IncomingPaymentEvent;
use splitpay::domain::money::Amount;
use splitpay::domain::notification::Notification;
use splitpay::domain::ports::{
    NewRecipient, Notifier, PaymentRail, SplitStore, SplitStoreRef, TransferRequest,
};
use splitpay::domain::split::PayerRecord;
use splitpay::error::{RailError, Result, SplitPayError};
use splitpay::infrastructure::in_memory::InMemorySplitStore;
use splitpay::interfaces::http::webhook::{self, AppState};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

pub const SECRET: &str = "sk_test_shared_secret";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const PAYER: &str = "ada@example.com";

/// Notifier that keeps everything it is asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }

    pub fn subjects(&self) -> Vec<String> {
        self.sent().into_iter().map(|n| n.subject).collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: Notification) {
        self.sent.lock().unwrap().push(notification);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RailCall {
    Recipient { bank_code: String, account: String },
    Transfer { recipient: String, minor_units: i64, memo: String },
}

/// Rail that succeeds unless told to fail a stage for an account number.
/// Recipient codes are `RCP_<account>` so transfers can be traced back.
#[derive(Default)]
pub struct ScriptedRail {
    calls: Mutex<Vec<RailCall>>,
    fail_registration: HashSet<String>,
    fail_transfer: HashSet<String>,
}

impl ScriptedRail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_registration(mut self, account: &str) -> Self {
        self.fail_registration.insert(account.to_string());
        self
    }

    pub fn failing_transfer(mut self, account: &str) -> Self {
        self.fail_transfer.insert(account.to_string());
        self
    }

    pub fn calls(&self) -> Vec<RailCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentRail for ScriptedRail {
    async fn create_recipient(&self, recipient: &NewRecipient) -> std::result::Result<String, RailError> {
        self.calls.lock().unwrap().push(RailCall::Recipient {
            bank_code: recipient.bank_code.to_string(),
            account: recipient.account_number.clone(),
        });
        if self.fail_registration.contains(&recipient.account_number) {
            return Err(RailError::Rejected {
                status: 422,
                message: "Could not resolve account name".into(),
            });
        }
        // Yield so concurrent runs interleave.
        tokio::task::yield_now().await;
        Ok(format!("RCP_{}", recipient.account_number))
    }

    async fn initiate_transfer(&self, transfer: &TransferRequest) -> std::result::Result<String, RailError> {
        self.calls.lock().unwrap().push(RailCall::Transfer {
            recipient: transfer.recipient_code.clone(),
            minor_units: transfer.amount.to_minor_units().unwrap_or(-1),
            memo: transfer.memo.clone(),
        });
        let account = transfer.recipient_code.trim_start_matches("RCP_");
        if self.fail_transfer.contains(account) {
            return Err(RailError::Rejected {
                status: 400,
                message: "Your balance is not enough to fulfil this request".into(),
            });
        }
        Ok(format!("TRF_{account}"))
    }
}

/// Store whose backend is never reachable.
pub struct UnreachableStore;

#[async_trait]
impl SplitStore for UnreachableStore {
    async fn find_by_payer(&self, _payer: &str) -> Result<Option<PayerRecord>> {
        Err(SplitPayError::StoreUnavailable("connection refused".into()))
    }
}

pub fn entry(percent: u32, bank: &str, number: &str, name: &str) -> Value {
    json!({"percent": percent, "bank": bank, "number": number, "name": name})
}

pub fn store_with(records: Vec<PayerRecord>) -> SplitStoreRef {
    Arc::new(InMemorySplitStore::from_records(records))
}

pub fn orchestrator(
    store: SplitStoreRef,
    rail: Arc<ScriptedRail>,
    notifier: Arc<RecordingNotifier>,
) -> Orchestrator {
    Orchestrator::new(
        SplitResolver::new(store),
        DisbursementClient::new(rail, "Split Beneficiary", "NGN"),
        notifier,
    )
}

pub fn payment_event(event_id: &str, payer: &str, amount: u32) -> IncomingPaymentEvent {
    IncomingPaymentEvent {
        event_id: event_id.to_string(),
        gross_amount: Amount::new(amount.into()).unwrap(),
        payer: payer.to_string(),
        payer_name: "Ada".to_string(),
        raw_payload: Vec::new(),
        signature: String::new(),
    }
}

/// Serialized `charge.success` body with `amount_minor` in kobo.
pub fn charge_body(reference: &str, email: &str, amount_minor: i64) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "event": "charge.success",
        "data": {
            "id": 4099260516u64,
            "reference": reference,
            "amount": amount_minor,
            "currency": "NGN",
            "customer": {"email": email, "first_name": "Ada"}
        }
    }))
    .unwrap()
}

pub struct TestApp {
    pub base_url: String,
    pub scheduler: DisbursementScheduler,
    pub notifier: Arc<RecordingNotifier>,
    pub rail: Arc<ScriptedRail>,
}

/// Serves the webhook router on an ephemeral port.
pub async fn spawn_app(
    secret: Option<&str>,
    records: Vec<PayerRecord>,
    rail: ScriptedRail,
    delay: Duration,
) -> TestApp {
    let notifier = Arc::new(RecordingNotifier::default());
    let rail = Arc::new(rail);
    let scheduler = DisbursementScheduler::new(
        Arc::new(orchestrator(store_with(records), rail.clone(), notifier.clone())),
        delay,
    );
    let state = Arc::new(AppState {
        webhook_secret: secret.map(str::to_string),
        admin_token: Some(ADMIN_TOKEN.to_string()),
        scheduler: scheduler.clone(),
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(webhook::serve(listener, state));

    TestApp {
        base_url: format!("http://{addr}"),
        scheduler,
        notifier,
        rail,
    }
}

/// Polls `check` until it holds or five seconds pass.
pub async fn wait_until(mut check: impl FnMut() -> bool) -> bool {
    for _ in 0..500 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}
