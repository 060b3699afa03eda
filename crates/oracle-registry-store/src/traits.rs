//! Store trait: the abstract interface for registry persistence.
//!
//! This trait allows the registry to be storage-agnostic. Implementations
//! include SQLite (primary) and in-memory (for tests).

use std::fmt;

use async_trait::async_trait;
use oracle_registry_core::{DataSource, DataSourceId, Params};

use crate::error::Result;

/// Named scalar counters persisted next to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cell {
    /// Last data source id handed out by the sequence allocator.
    DataSourceCount,
    /// Highest block height relayed by the bridge.
    LatestRelayBlockHeight,
    /// Block height of the last validator set update relayed by the bridge.
    LatestValidatorsUpdateBlockHeight,
}

impl Cell {
    pub const ALL: [Cell; 3] = [
        Cell::DataSourceCount,
        Cell::LatestRelayBlockHeight,
        Cell::LatestValidatorsUpdateBlockHeight,
    ];

    /// Stable key used in persisted state.
    pub const fn as_str(self) -> &'static str {
        match self {
            Cell::DataSourceCount => "DataSourceCount",
            Cell::LatestRelayBlockHeight => "LatestRelayBlockHeight",
            Cell::LatestValidatorsUpdateBlockHeight => "LatestValidatorsUpdateBlockHeight",
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The Store trait: async interface for registry persistence.
///
/// All methods are async to support both sync (SQLite) and async backends.
/// For SQLite, we use `spawn_blocking` internally to avoid blocking the runtime.
///
/// # Design Notes
///
/// - **Atomic writes**: every mutating method either commits fully or leaves
///   state untouched. Readers never observe half of a write.
/// - **Ordered enumeration**: [`Store::data_sources`] always yields ascending ids.
/// - **No validation**: the store persists whatever it is given. Parameter
///   checks happen in the keeper before any write.
#[async_trait]
pub trait Store: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Data Source Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Get a data source by id.
    async fn get_data_source(&self, id: DataSourceId) -> Result<Option<DataSource>>;

    /// Write a data source at `id`, overwriting any existing record.
    ///
    /// Does not touch the sequence counter.
    async fn set_data_source(&self, id: DataSourceId, data_source: &DataSource) -> Result<()>;

    /// Allocate the next id and write `data_source` under it.
    ///
    /// The counter advance and the record write commit together.
    async fn append_data_source(&self, data_source: &DataSource) -> Result<DataSourceId>;

    /// All data sources, ordered by ascending id.
    ///
    /// Each call is a fresh pass over current state.
    async fn data_sources(&self) -> Result<Vec<(DataSourceId, DataSource)>>;

    /// Check if a data source exists.
    async fn has_data_source(&self, id: DataSourceId) -> Result<bool>;

    /// Current value of the sequence counter (the last id handed out).
    async fn data_source_count(&self) -> Result<u64> {
        self.get_cell(Cell::DataSourceCount).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Scalar Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Read a counter cell; cells never written read as 0.
    async fn get_cell(&self, cell: Cell) -> Result<u64>;

    /// Overwrite a counter cell.
    async fn set_cell(&self, cell: Cell, value: u64) -> Result<()>;

    /// Get the chain identifier, if genesis has set one.
    async fn get_chain_id(&self) -> Result<Option<String>>;

    /// Set the chain identifier.
    async fn set_chain_id(&self, chain_id: &str) -> Result<()>;

    // ─────────────────────────────────────────────────────────────────────────
    // Parameter Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Get the stored parameters, or `None` if never written.
    async fn get_params(&self) -> Result<Option<Params>>;

    /// Overwrite all parameters.
    async fn set_params(&self, params: &Params) -> Result<()>;
}
