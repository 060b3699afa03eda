//! Genesis bootstrap, import and export.
//!
//! Genesis runs once per chain, before the first block, so these functions
//! do not guard against being called twice.

use serde::{Deserialize, Serialize};

use oracle_registry_core::{BridgeState, OracleGenesis};
use oracle_registry_store::{Cell, Store};

use crate::bridge::BridgeKeeper;
use crate::error::Result;
use crate::keeper::DataSourceKeeper;

/// Complete genesis file contents for the registry and bridge.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenesisState {
    pub oracle: OracleGenesis,
    pub bridge: BridgeState,
}

impl GenesisState {
    /// Parse a genesis document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        Ok(self.oracle.validate()?)
    }
}

/// Bridge genesis: set the chain id and zero both height trackers.
pub async fn init_bridge_genesis<S: Store>(bridge: &BridgeKeeper<S>, chain_id: &str) -> Result<()> {
    bridge.apply(&BridgeState::new(chain_id)).await?;
    tracing::info!(chain_id, "initialized bridge genesis");
    Ok(())
}

/// Restore the registry from a snapshot.
///
/// Records are written as-is, then the sequence counter is set so the next
/// add continues after the snapshot's last allocated id.
pub async fn init_oracle_genesis<S: Store>(
    keeper: &DataSourceKeeper<S>,
    genesis: &OracleGenesis,
) -> Result<()> {
    genesis.validate()?;

    keeper.set_params(genesis.params).await?;
    for (id, data_source) in &genesis.data_sources {
        keeper.set_data_source(*id, data_source).await?;
    }
    keeper
        .store()
        .set_cell(Cell::DataSourceCount, genesis.data_source_count)
        .await?;

    tracing::info!(
        data_sources = genesis.data_sources.len(),
        data_source_count = genesis.data_source_count,
        "initialized oracle genesis"
    );
    Ok(())
}

/// Capture params, the sequence counter and all records.
pub async fn export_oracle_genesis<S: Store>(keeper: &DataSourceKeeper<S>) -> Result<OracleGenesis> {
    let genesis = OracleGenesis {
        params: keeper.params().await?,
        data_source_count: keeper.data_source_count().await?,
        data_sources: keeper.store().data_sources().await?,
    };
    tracing::info!(data_sources = genesis.data_sources.len(), "exported oracle genesis");
    Ok(genesis)
}

/// Apply a full genesis document.
///
/// The bridge chain id comes from the document; heights always start at 0.
pub async fn init_genesis<S: Store>(keeper: &DataSourceKeeper<S>, genesis: &GenesisState) -> Result<()> {
    genesis.validate()?;

    init_oracle_genesis(keeper, &genesis.oracle).await?;

    let bridge = BridgeKeeper::new(keeper.shared_store());
    init_bridge_genesis(&bridge, &genesis.bridge.chain_id).await
}

/// Export a full genesis document.
pub async fn export_genesis<S: Store>(keeper: &DataSourceKeeper<S>) -> Result<GenesisState> {
    let bridge = BridgeKeeper::new(keeper.shared_store());
    Ok(GenesisState {
        oracle: export_oracle_genesis(keeper).await?,
        bridge: bridge.state().await?,
    })
}

/// Genesis document for a fresh chain using `keeper`'s configuration.
pub fn default_genesis<S: Store>(keeper: &DataSourceKeeper<S>) -> GenesisState {
    GenesisState {
        oracle: OracleGenesis {
            params: keeper.config().default_params,
            ..OracleGenesis::default()
        },
        bridge: BridgeState::new(keeper.config().chain_id.clone()),
    }
}
