use crate::domain::ports::SplitStore;
use crate::domain::split::PayerRecord;
use crate::error::{Result, SplitPayError};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing payer records.
pub const CF_PAYERS: &str = "payers";

/// A persistent payer store using RocksDB.
///
/// Records live in the `payers` column family, keyed by wallet email and
/// stored as JSON.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBSplitStore {
    db: Arc<DB>,
}

impl RocksDBSplitStore {
    /// Opens or creates a RocksDB instance at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_payers = ColumnFamilyDescriptor::new(CF_PAYERS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_payers])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn payers(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(CF_PAYERS).ok_or_else(|| {
            SplitPayError::StoreUnavailable("Payers column family not found".to_string())
        })
    }

    /// Inserts or replaces a payer record.
    pub fn put(&self, record: &PayerRecord) -> Result<()> {
        let cf = self.payers()?;
        let value = serde_json::to_vec(record)?;
        self.db.put_cf(cf, record.email().as_bytes(), value)?;
        Ok(())
    }
}

#[async_trait]
impl SplitStore for RocksDBSplitStore {
    async fn find_by_payer(&self, payer: &str) -> Result<Option<PayerRecord>> {
        let cf = self.payers()?;
        match self.db.get_pinned_cf(cf, payer.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}
