use crate::domain::ports::SplitStoreRef;
use crate::domain::split::{SplitConfig, SplitResolution};
use crate::error::Result;

/// Looks up a payer's split template in the backing store.
#[derive(Clone)]
pub struct SplitResolver {
    store: SplitStoreRef,
}

impl SplitResolver {
    pub fn new(store: SplitStoreRef) -> Self {
        Self { store }
    }

    /// A store error is returned as-is; the caller decides how to abort.
    pub async fn resolve(&self, payer: &str) -> Result<SplitResolution> {
        let Some(record) = self.store.find_by_payer(payer).await? else {
            return Ok(SplitResolution::NotFound);
        };

        Ok(record
            .split_config
            .as_ref()
            .and_then(SplitConfig::from_value)
            .map_or(SplitResolution::Unconfigured, SplitResolution::Configured))
    }
}
