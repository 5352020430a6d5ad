use super::money::Amount;
use crate::error::{Result, SplitPayError};
use serde::Deserialize;
use serde_json::Value;

/// Upstream event type that carries an incoming payment.
pub const CHARGE_SUCCESS: &str = "charge.success";

const DEFAULT_DISPLAY_NAME: &str = "User";

/// A verified incoming payment, created at webhook receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingPaymentEvent {
    /// Stable identifier used to absorb redelivered events.
    pub event_id: String,
    pub gross_amount: Amount,
    pub payer: String,
    pub payer_name: String,
    pub raw_payload: Vec<u8>,
    pub signature: String,
}

/// A signature-verified inbound webhook body.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    ChargeSuccess(IncomingPaymentEvent),
    /// Any other event type; acknowledged and ignored.
    Ignored(String),
}

#[derive(Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: Value,
}

#[derive(Deserialize)]
struct ChargeData {
    /// Minor units.
    amount: i64,
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    id: Option<Value>,
    customer: Customer,
}

#[derive(Deserialize)]
struct Customer {
    email: String,
    #[serde(default)]
    first_name: Option<String>,
}

impl InboundEvent {
    /// Parses the exact bytes received. The signature is carried along and
    /// doubles as the event identifier when the body has none.
    pub fn parse(body: &[u8], signature: &str) -> Result<Self> {
        let envelope: Envelope = serde_json::from_slice(body)?;
        if envelope.event != CHARGE_SUCCESS {
            return Ok(Self::Ignored(envelope.event));
        }

        let data: ChargeData = serde_json::from_value(envelope.data)?;
        let gross_amount = Amount::from_minor_units(data.amount)?;
        if data.customer.email.trim().is_empty() {
            return Err(SplitPayError::ValidationError(
                "charge event has no customer email".to_string(),
            ));
        }

        let event_id = data
            .reference
            .filter(|r| !r.is_empty())
            .or_else(|| data.id.as_ref().and_then(id_to_string))
            .unwrap_or_else(|| signature.to_string());
        let payer_name = data
            .customer
            .first_name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());

        Ok(Self::ChargeSuccess(IncomingPaymentEvent {
            event_id,
            gross_amount,
            payer: data.customer.email,
            payer_name,
            raw_payload: body.to_vec(),
            signature: signature.to_string(),
        }))
    }
}

fn id_to_string(id: &Value) -> Option<String> {
    match id {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
