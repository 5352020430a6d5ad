use super::{DEFAULT_TIMEOUT, http_client};
use crate::domain::ports::{NewRecipient, PaymentRail, TransferRequest};
use crate::error::RailError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.paystack.co";

/// `PaymentRail` over the Paystack transfer API.
///
/// Authenticates with the secret key as a bearer token. Without a key (or with
/// an empty one) every call fails with `RailError::MissingCredential` and no
/// request is made. Each call is bounded by a request timeout.
#[derive(Clone)]
pub struct PaystackRail {
    http: reqwest::Client,
    base_url: String,
    secret: Option<String>,
}

#[derive(Serialize)]
struct RecipientBody<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    name: &'a str,
    account_number: &'a str,
    bank_code: &'a str,
    currency: &'a str,
}

#[derive(Serialize)]
struct TransferBody<'a> {
    source: &'a str,
    amount: i64,
    recipient: &'a str,
    reason: &'a str,
}

#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    message: Option<String>,
    data: Option<T>,
}

#[derive(Deserialize)]
struct RecipientData {
    recipient_code: String,
}

#[derive(Deserialize)]
struct TransferData {
    #[serde(default)]
    transfer_code: Option<String>,
    #[serde(default)]
    reference: Option<String>,
}

impl PaystackRail {
    pub fn new(base_url: impl Into<String>, secret: Option<String>) -> Self {
        Self::with_timeout(base_url, secret, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        secret: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http: http_client(timeout),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, RailError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let secret = self.secret.as_deref().ok_or(RailError::MissingCredential)?;
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(secret)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        let envelope: Option<Envelope<T>> = serde_json::from_slice(&bytes).ok();

        if !status.is_success() {
            let message = envelope
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(RailError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        envelope
            .and_then(|e| e.data)
            .ok_or_else(|| RailError::MalformedResponse(format!("{path} returned no data")))
    }
}

#[async_trait]
impl PaymentRail for PaystackRail {
    async fn create_recipient(&self, recipient: &NewRecipient) -> Result<String, RailError> {
        let data: RecipientData = self
            .post(
                "/transferrecipient",
                &RecipientBody {
                    kind: "nuban",
                    name: &recipient.display_name,
                    account_number: &recipient.account_number,
                    bank_code: recipient.bank_code.as_str(),
                    currency: &recipient.currency,
                },
            )
            .await?;
        Ok(data.recipient_code)
    }

    async fn initiate_transfer(&self, transfer: &TransferRequest) -> Result<String, RailError> {
        let amount = transfer.amount.to_minor_units().ok_or_else(|| {
            RailError::InvalidRequest(format!("amount {} out of range", transfer.amount))
        })?;
        let data: TransferData = self
            .post(
                "/transfer",
                &TransferBody {
                    source: "balance",
                    amount,
                    recipient: &transfer.recipient_code,
                    reason: &transfer.memo,
                },
            )
            .await?;
        Ok(data
            .transfer_code
            .or(data.reference)
            .unwrap_or_default())
    }
}
