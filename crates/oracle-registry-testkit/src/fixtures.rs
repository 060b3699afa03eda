//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use oracle_registry::{DataSourceKeeper, RegistryConfig, Result};
use oracle_registry_core::{Address, Coins, DataSource, DataSourceId};
use oracle_registry_store::MemoryStore;

/// An 80-byte executable, larger than any small test limit.
pub const TOO_LONG_EXECUTABLE: &[u8] =
    b"The number of bytes of this data source is 80 which is obviously longer than 20.";

/// Owner address from raw bytes. Panics on empty input.
pub fn owner(bytes: &[u8]) -> Address {
    Address::new(bytes.to_vec()).expect("test owner must not be empty")
}

/// A single-coin `uband` fee.
pub fn uband(amount: u64) -> Coins {
    Coins::single("uband", amount).expect("uband is a valid denom")
}

/// The canonical record every fixture registers first.
///
/// The executable is 10 bytes.
pub fn mock_data_source_record() -> DataSource {
    DataSource::new(
        owner(b"owner"),
        "data_source",
        "description",
        uband(10),
        b"executable".to_vec(),
    )
}

/// A test fixture with a keeper over a fresh memory store.
pub struct TestFixture {
    pub keeper: DataSourceKeeper<MemoryStore>,
}

impl TestFixture {
    /// Create a fixture with default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a fixture with a custom configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            keeper: DataSourceKeeper::new(MemoryStore::new(), config),
        }
    }

    /// Register [`mock_data_source_record`] through the keeper.
    pub async fn mock_data_source(&self) -> Result<DataSourceId> {
        let ds = mock_data_source_record();
        self.keeper
            .add_data_source(ds.owner, ds.name, ds.description, ds.fee, ds.executable)
            .await
    }

    /// Register `count` distinct records, named `name1`, `name2`, ...
    pub async fn populate(&self, count: u64) -> Result<Vec<DataSourceId>> {
        let mut ids = Vec::with_capacity(count as usize);
        for i in 1..=count {
            let id = self
                .keeper
                .add_data_source(
                    owner(format!("owner{i}").as_bytes()),
                    format!("name{i}"),
                    format!("description{i}"),
                    uband(i),
                    format!("code{i}").into_bytes(),
                )
                .await?;
            ids.push(id);
        }
        Ok(ids)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
