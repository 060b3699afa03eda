//! The data source keeper: add, edit and read registered data sources.
//!
//! Validation runs against a parameter snapshot read from the store at the
//! start of each mutating call. Authorization (who may edit a data source)
//! is decided by the message-dispatch layer before the keeper is called.

use std::sync::Arc;

use oracle_registry_core::{
    validate_data_source, Address, Coins, DataSource, DataSourceId, ParamKey, Params,
    DEFAULT_CHAIN_ID,
};
use oracle_registry_store::Store;

use crate::error::{RegistryError, Result};

/// Configuration for the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Parameters in effect until governance writes a set to the store.
    pub default_params: Params,
    /// Chain id written by bridge genesis.
    pub chain_id: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_params: Params::default(),
            chain_id: DEFAULT_CHAIN_ID.to_string(),
        }
    }
}

/// The data source keeper.
///
/// Provides the registry's public operations:
/// - Adding data sources under freshly allocated ids
/// - Replacing a data source in full
/// - Point lookup and ordered enumeration
/// - Reading and (for governance callers) writing parameters
pub struct DataSourceKeeper<S: Store> {
    /// The storage backend.
    store: Arc<S>,
    /// Configuration.
    config: RegistryConfig,
}

impl<S: Store> DataSourceKeeper<S> {
    /// Create a new keeper over `store`.
    pub fn new(store: S, config: RegistryConfig) -> Self {
        Self::with_shared_store(Arc::new(store), config)
    }

    /// Create a keeper over a store shared with other keepers.
    pub fn with_shared_store(store: Arc<S>, config: RegistryConfig) -> Self {
        Self { store, config }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a shared handle to the store.
    pub fn shared_store(&self) -> Arc<S> {
        Arc::clone(&self.store)
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a new data source and return its id.
    ///
    /// On a validation failure nothing is written and the sequence counter
    /// does not move.
    pub async fn add_data_source(
        &self,
        owner: Address,
        name: impl Into<String>,
        description: impl Into<String>,
        fee: Coins,
        executable: impl Into<Vec<u8>>,
    ) -> Result<DataSourceId> {
        let data_source = DataSource::new(owner, name, description, fee, executable);

        let params = self.params().await?;
        if let Err(e) = data_source.validate(&params) {
            tracing::warn!(name = %data_source.name, error = %e, "rejected data source");
            return Err(e.into());
        }

        let id = self.store.append_data_source(&data_source).await?;
        tracing::debug!(
            %id,
            owner = %data_source.owner,
            executable_size = data_source.executable_size(),
            "added data source"
        );
        Ok(id)
    }

    /// Replace every field of the data source at `id`.
    ///
    /// Fails with [`RegistryError::NotFound`] before any validation if no
    /// data source exists at `id`. Ownership may be reassigned here.
    #[allow(clippy::too_many_arguments)]
    pub async fn edit_data_source(
        &self,
        id: DataSourceId,
        owner: Address,
        name: impl Into<String>,
        description: impl Into<String>,
        fee: Coins,
        executable: impl Into<Vec<u8>>,
    ) -> Result<()> {
        let previous = self.get_data_source(id).await?;

        let updated = DataSource::new(owner, name, description, fee, executable);

        let params = self.params().await?;
        if let Err(e) = validate_data_source(
            &updated.name,
            &updated.description,
            &updated.executable,
            &params,
        ) {
            tracing::warn!(%id, error = %e, "rejected data source edit");
            return Err(e.into());
        }

        self.store.set_data_source(id, &updated).await?;
        tracing::debug!(
            %id,
            owner_changed = previous.owner != updated.owner,
            executable_size = updated.executable_size(),
            "edited data source"
        );
        Ok(())
    }

    /// Write `data_source` at `id` without validation or id allocation.
    ///
    /// Used by state import; regular callers go through
    /// [`add_data_source`](Self::add_data_source).
    pub async fn set_data_source(&self, id: DataSourceId, data_source: &DataSource) -> Result<()> {
        Ok(self.store.set_data_source(id, data_source).await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Get the data source at `id`.
    pub async fn get_data_source(&self, id: DataSourceId) -> Result<DataSource> {
        self.store
            .get_data_source(id)
            .await?
            .ok_or(RegistryError::NotFound(id))
    }

    /// All data sources in ascending id order.
    pub async fn get_all_data_sources(&self) -> Result<Vec<DataSource>> {
        let all = self.store.data_sources().await?;
        Ok(all.into_iter().map(|(_, ds)| ds).collect())
    }

    /// Check if a data source exists at `id`.
    pub async fn has_data_source(&self, id: DataSourceId) -> Result<bool> {
        Ok(self.store.has_data_source(id).await?)
    }

    /// The last id handed out, 0 if none.
    pub async fn data_source_count(&self) -> Result<u64> {
        Ok(self.store.data_source_count().await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Parameters
    // ─────────────────────────────────────────────────────────────────────────

    /// Current parameters: the stored set, or the configured defaults.
    pub async fn params(&self) -> Result<Params> {
        Ok(self
            .store
            .get_params()
            .await?
            .unwrap_or(self.config.default_params))
    }

    /// Replace all parameters. Governance path only.
    pub async fn set_params(&self, params: Params) -> Result<()> {
        params.validate()?;
        self.store.set_params(&params).await?;
        tracing::info!(?params, "updated registry params");
        Ok(())
    }

    /// Change a single parameter. Governance path only.
    pub async fn set_param(&self, key: ParamKey, value: u64) -> Result<()> {
        let params = self.params().await?.with(key, value);
        self.set_params(params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oracle_registry_core::ValidationError;
    use oracle_registry_store::MemoryStore;

    fn owner(bytes: &[u8]) -> Address {
        Address::new(bytes.to_vec()).unwrap()
    }

    fn fee(amount: u64) -> Coins {
        Coins::single("uband", amount).unwrap()
    }

    fn keeper() -> DataSourceKeeper<MemoryStore> {
        DataSourceKeeper::new(MemoryStore::new(), RegistryConfig::default())
    }

    #[tokio::test]
    async fn test_add_then_get() {
        let keeper = keeper();
        let id = keeper
            .add_data_source(owner(b"owner"), "data_source", "description", fee(10), b"executable".to_vec())
            .await
            .unwrap();
        assert_eq!(id, DataSourceId(1));

        let ds = keeper.get_data_source(id).await.unwrap();
        assert_eq!(ds.owner, owner(b"owner"));
        assert_eq!(ds.name, "data_source");
        assert_eq!(ds.description, "description");
        assert_eq!(ds.fee, fee(10));
        assert_eq!(ds.executable, b"executable");
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let keeper = keeper();
        let err = keeper.get_data_source(DataSourceId(1)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_rejected_add_does_not_allocate() {
        let keeper = keeper();
        keeper.set_param(ParamKey::MaxNameLength, 5).await.unwrap();

        let err = keeper
            .add_data_source(owner(b"owner"), "data_source", "", fee(1), b"x".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err.validation(), Some(ValidationError::NameTooLong { .. })));
        assert_eq!(keeper.data_source_count().await.unwrap(), 0);

        let id = keeper
            .add_data_source(owner(b"owner"), "short", "", fee(1), b"x".to_vec())
            .await
            .unwrap();
        assert_eq!(id, DataSourceId(1));
    }

    #[tokio::test]
    async fn test_edit_missing_checks_existence_first() {
        let keeper = keeper();
        keeper
            .set_param(ParamKey::MaxDataSourceExecutableSize, 1)
            .await
            .unwrap();

        let err = keeper
            .edit_data_source(DataSourceId(9), owner(b"o"), "n", "d", fee(1), b"too long".to_vec())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_params_default_from_config() {
        let config = RegistryConfig {
            default_params: Params::default().with(ParamKey::MaxDescriptionLength, 3),
            ..RegistryConfig::default()
        };
        let keeper = DataSourceKeeper::new(MemoryStore::new(), config);
        assert_eq!(keeper.params().await.unwrap().max_description_length, 3);

        let err = keeper
            .add_data_source(owner(b"o"), "n", "long", fee(1), Vec::<u8>::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err.validation(),
            Some(ValidationError::DescriptionTooLong { len: 4, max: 3 })
        ));
    }

    #[tokio::test]
    async fn test_set_param_rejects_zero() {
        let keeper = keeper();
        let err = keeper.set_param(ParamKey::MaxNameLength, 0).await.unwrap_err();
        assert!(matches!(err.validation(), Some(ValidationError::InvalidParams(_))));
        assert_eq!(keeper.params().await.unwrap(), Params::default());
    }
}
