//! # Oracle Registry Core
//!
//! Pure primitives for the oracle registry: data source records, fee coins,
//! size-limit parameters, validation and canonical record encoding.
//!
//! This crate contains no I/O, no storage, no networking. It is pure computation
//! over the registry's value types.
//!
//! ## Key Types
//!
//! - [`DataSource`] - A registered external data-fetching script and its metadata
//! - [`DataSourceId`] - Monotonic identifier assigned by the registry
//! - [`Address`] - Opaque owner account in the host chain's address format
//! - [`Coins`] - Sorted, de-duplicated fee schedule
//! - [`Params`] - Runtime-configurable size ceilings
//!
//! ## Canonicalization
//!
//! Records are persisted using deterministic CBOR. See [`canonical`] module.

pub mod canonical;
pub mod coin;
pub mod data_source;
pub mod error;
pub mod genesis;
pub mod params;
pub mod types;
pub mod validation;

pub use canonical::{canonical_bytes, decode_data_source};
pub use coin::{Coin, Coins};
pub use data_source::DataSource;
pub use error::{CoreError, ValidationError};
pub use genesis::{BridgeState, OracleGenesis, DEFAULT_CHAIN_ID};
pub use params::{ParamKey, Params};
pub use primitive_types::U256;
pub use types::{Address, DataSourceId};
pub use validation::validate_data_source;
