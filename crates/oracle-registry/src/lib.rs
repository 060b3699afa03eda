//! # Oracle Registry
//!
//! A deterministic registry of oracle data sources for a replicated ledger.
//!
//! ## Overview
//!
//! A data source is a registered external data-fetching script: an owner,
//! a name and description, a fee charged to requesters, and an opaque
//! executable. The registry:
//!
//! - **Allocates ids**: strictly increasing from 1, never reused
//! - **Validates sizes**: against parameters read at write time
//! - **Replaces in place**: edits overwrite every field of a record
//! - **Enumerates in order**: ascending id, every time
//!
//! Authorization, fee collection and executable execution happen outside
//! this crate.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use oracle_registry::{DataSourceKeeper, RegistryConfig};
//! use oracle_registry::core::{Address, Coins};
//! use oracle_registry::store::SqliteStore;
//!
//! async fn example() {
//!     let store = SqliteStore::open("registry.db").unwrap();
//!     let keeper = DataSourceKeeper::new(store, RegistryConfig::default());
//!
//!     let owner = Address::new(b"owner".to_vec()).unwrap();
//!     let fee = Coins::single("uband", 10u64).unwrap();
//!     let id = keeper
//!         .add_data_source(owner, "price", "spot price", fee, b"#!/bin/sh".to_vec())
//!         .await
//!         .unwrap();
//!
//!     let ds = keeper.get_data_source(id).await.unwrap();
//!     assert_eq!(ds.name, "price");
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `oracle_registry::core` - Domain types, params and validation
//! - `oracle_registry::store` - Storage abstraction and SQLite

pub mod bridge;
pub mod error;
pub mod genesis;
pub mod keeper;

// Re-export component crates
pub use oracle_registry_core as core;
pub use oracle_registry_store as store;

pub use bridge::BridgeKeeper;
pub use error::{RegistryError, Result};
pub use genesis::{
    default_genesis, export_genesis, export_oracle_genesis, init_bridge_genesis, init_genesis,
    init_oracle_genesis, GenesisState,
};
pub use keeper::{DataSourceKeeper, RegistryConfig};

pub use oracle_registry_core::{
    Address, BridgeState, Coin, Coins, DataSource, DataSourceId, OracleGenesis, ParamKey, Params,
    ValidationError,
};
