use super::money::Percentage;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One line of a payer's split template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitEntry {
    /// Human label, also used as the transfer memo.
    #[serde(rename = "name")]
    pub label: String,
    #[serde(rename = "percent", alias = "percentage")]
    pub percentage: Percentage,
    /// Free-text bank name, resolved to a canonical code at disbursement time.
    pub bank: String,
    #[serde(rename = "number")]
    pub account_number: String,
}

/// Ordered split template for one payer identity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SplitConfig(Vec<SplitEntry>);

impl SplitConfig {
    pub fn new(entries: Vec<SplitEntry>) -> Self {
        Self(entries)
    }

    /// Parses a raw template field.
    ///
    /// Returns `None` unless the value is an array whose every element is a
    /// well-formed entry.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_array() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    pub fn entries(&self) -> &[SplitEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub email: String,
}

/// A payer document as held by the backing store.
///
/// The template is kept as raw JSON so that a malformed shape can be told
/// apart from a missing record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayerRecord {
    pub wallet: Wallet,
    #[serde(rename = "splitConfig", default, skip_serializing_if = "Option::is_none")]
    pub split_config: Option<Value>,
}

impl PayerRecord {
    pub fn new(email: impl Into<String>, split_config: Option<Value>) -> Self {
        Self {
            wallet: Wallet {
                email: email.into(),
            },
            split_config,
        }
    }

    pub fn email(&self) -> &str {
        &self.wallet.email
    }
}

/// Outcome of looking up a payer's split template.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitResolution {
    NotFound,
    /// A record exists but its template is absent or malformed.
    Unconfigured,
    Configured(SplitConfig),
}
