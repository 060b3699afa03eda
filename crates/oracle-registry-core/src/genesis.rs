//! Genesis snapshot types.
//!
//! These are plain values; applying them to a store is the job of the
//! `oracle-registry` crate.

use serde::{Deserialize, Serialize};

use crate::data_source::DataSource;
use crate::error::ValidationError;
use crate::params::Params;
use crate::types::DataSourceId;

/// Chain identifier written at genesis when none is configured.
pub const DEFAULT_CHAIN_ID: &str = "bandchain";

/// Bridge scalars colocated with the registry at genesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeState {
    pub chain_id: String,
    pub latest_relay_block_height: u64,
    pub latest_validators_update_block_height: u64,
}

impl BridgeState {
    /// State written by bridge genesis: the chain id and zeroed heights.
    pub fn new(chain_id: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
            latest_relay_block_height: 0,
            latest_validators_update_block_height: 0,
        }
    }
}

impl Default for BridgeState {
    fn default() -> Self {
        Self::new(DEFAULT_CHAIN_ID)
    }
}

/// Full registry snapshot for chain export/import.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OracleGenesis {
    pub params: Params,
    /// Value of the sequence counter: the last id handed out.
    pub data_source_count: u64,
    /// Records in ascending id order.
    pub data_sources: Vec<(DataSourceId, DataSource)>,
}

impl OracleGenesis {
    /// Check that the snapshot can be imported without breaking id invariants.
    ///
    /// Records must have strictly ascending non-zero ids, none above the
    /// counter, so that the next allocated id is fresh. Records are not
    /// re-validated against `params`: limits apply only at write time.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.params.validate()?;

        let mut prev = DataSourceId::default();
        for (id, _) in &self.data_sources {
            if id.get() == 0 {
                return Err(ValidationError::InvalidGenesis("data source id 0".into()));
            }
            if *id <= prev {
                return Err(ValidationError::InvalidGenesis(format!(
                    "data source ids not strictly ascending at {id}"
                )));
            }
            if id.get() > self.data_source_count {
                return Err(ValidationError::InvalidGenesis(format!(
                    "data source {id} above counter {}",
                    self.data_source_count
                )));
            }
            prev = *id;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coin::Coins;
    use crate::types::Address;

    fn record(name: &str) -> DataSource {
        DataSource::new(
            Address::new(b"owner".to_vec()).unwrap(),
            name,
            "",
            Coins::empty(),
            b"x".to_vec(),
        )
    }

    #[test]
    fn test_default_is_valid() {
        assert!(OracleGenesis::default().validate().is_ok());
        assert_eq!(BridgeState::default().chain_id, "bandchain");
    }

    #[test]
    fn test_ids_must_ascend() {
        let genesis = OracleGenesis {
            params: Params::default(),
            data_source_count: 3,
            data_sources: vec![(DataSourceId(2), record("b")), (DataSourceId(1), record("a"))],
        };
        assert!(matches!(genesis.validate(), Err(ValidationError::InvalidGenesis(_))));
    }

    #[test]
    fn test_id_above_counter_rejected() {
        let genesis = OracleGenesis {
            params: Params::default(),
            data_source_count: 1,
            data_sources: vec![(DataSourceId(1), record("a")), (DataSourceId(2), record("b"))],
        };
        assert!(genesis.validate().is_err());
    }

    #[test]
    fn test_gaps_allowed() {
        let genesis = OracleGenesis {
            params: Params::default(),
            data_source_count: 5,
            data_sources: vec![(DataSourceId(1), record("a")), (DataSourceId(4), record("b"))],
        };
        assert!(genesis.validate().is_ok());
    }
}
