//! Adapters implementing the domain ports.

use std::time::Duration;

pub mod emailjs;
pub mod in_memory;
pub mod log_notifier;
pub mod paystack;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;

/// Upper bound on any single outbound HTTP call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client with a per-request timeout. Falls back to the default client if
/// the builder cannot initialise its TLS backend.
pub(crate) fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_default()
}
