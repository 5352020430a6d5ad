use crate::domain::ports::SplitStore;
use crate::domain::split::PayerRecord;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store of payer records, keyed by wallet email.
///
/// Uses `Arc<RwLock<HashMap<String, PayerRecord>>>` to allow shared concurrent access.
/// Ideal for testing or for small deployments seeded from a JSON file.
#[derive(Default, Clone)]
pub struct InMemorySplitStore {
    records: Arc<RwLock<HashMap<String, PayerRecord>>>,
}

impl InMemorySplitStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given records. Later duplicates win.
    pub fn from_records(records: Vec<PayerRecord>) -> Self {
        let map = records
            .into_iter()
            .map(|r| (r.email().to_string(), r))
            .collect();
        Self {
            records: Arc::new(RwLock::new(map)),
        }
    }

    /// Loads a JSON array of payer records.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let records: Vec<PayerRecord> = serde_json::from_slice(&bytes)?;
        Ok(Self::from_records(records))
    }

    /// Inserts or replaces the record for the record's email.
    pub async fn put(&self, record: PayerRecord) {
        let mut records = self.records.write().await;
        records.insert(record.email().to_string(), record);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl SplitStore for InMemorySplitStore {
    async fn find_by_payer(&self, payer: &str) -> Result<Option<PayerRecord>> {
        let records = self.records.read().await;
        Ok(records.get(payer).cloned())
    }
}
