//! Bridge scalars: chain id and relay height trackers.
//!
//! The registry only initializes these at genesis. Relay and validator-update
//! logic outside this crate advances the heights through the setters.

use std::sync::Arc;

use oracle_registry_core::BridgeState;
use oracle_registry_store::{Cell, Store};

use crate::error::Result;

/// Accessor for the bridge scalars stored next to the registry.
pub struct BridgeKeeper<S: Store> {
    store: Arc<S>,
}

impl<S: Store> BridgeKeeper<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The chain id, if genesis has run.
    pub async fn chain_id(&self) -> Result<Option<String>> {
        Ok(self.store.get_chain_id().await?)
    }

    pub async fn set_chain_id(&self, chain_id: &str) -> Result<()> {
        Ok(self.store.set_chain_id(chain_id).await?)
    }

    pub async fn latest_relay_block_height(&self) -> Result<u64> {
        Ok(self.store.get_cell(Cell::LatestRelayBlockHeight).await?)
    }

    pub async fn set_latest_relay_block_height(&self, height: u64) -> Result<()> {
        Ok(self
            .store
            .set_cell(Cell::LatestRelayBlockHeight, height)
            .await?)
    }

    pub async fn latest_validators_update_block_height(&self) -> Result<u64> {
        Ok(self
            .store
            .get_cell(Cell::LatestValidatorsUpdateBlockHeight)
            .await?)
    }

    pub async fn set_latest_validators_update_block_height(&self, height: u64) -> Result<()> {
        Ok(self
            .store
            .set_cell(Cell::LatestValidatorsUpdateBlockHeight, height)
            .await?)
    }

    /// Snapshot of all three scalars. A missing chain id reads as empty.
    pub async fn state(&self) -> Result<BridgeState> {
        Ok(BridgeState {
            chain_id: self.chain_id().await?.unwrap_or_default(),
            latest_relay_block_height: self.latest_relay_block_height().await?,
            latest_validators_update_block_height: self
                .latest_validators_update_block_height()
                .await?,
        })
    }

    /// Write all three scalars.
    pub async fn apply(&self, state: &BridgeState) -> Result<()> {
        self.set_chain_id(&state.chain_id).await?;
        self.set_latest_relay_block_height(state.latest_relay_block_height)
            .await?;
        self.set_latest_validators_update_block_height(state.latest_validators_update_block_height)
            .await
    }
}
