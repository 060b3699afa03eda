//! # Oracle Registry Store
//!
//! Storage abstraction for the oracle registry. Provides a trait-based interface
//! for data source persistence with SQLite and in-memory implementations.
//!
//! ## Overview
//!
//! The store module abstracts registry storage behind the [`Store`] trait,
//! allowing the keeper to be storage-agnostic. The primary implementation
//! is [`SqliteStore`], with [`MemoryStore`] for testing.
//!
//! ## Key Types
//!
//! - [`Store`] - The async trait for all storage operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//! - [`Cell`] - Named u64 counters (sequence allocator, bridge heights)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use oracle_registry_store::{SqliteStore, Store};
//! use oracle_registry_core::{Address, Coins, DataSource};
//!
//! async fn example() {
//!     let store = SqliteStore::open("registry.db").unwrap();
//!
//!     let owner = Address::new(b"owner".to_vec()).unwrap();
//!     let ds = DataSource::new(owner, "price", "", Coins::empty(), b"#!/bin/sh".to_vec());
//!     let id = store.append_data_source(&ds).await.unwrap();
//!     assert_eq!(store.get_data_source(id).await.unwrap(), Some(ds));
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Monotonic ids**: the counter only moves forward, inside the same
//!   atomic write as the record it was allocated for
//! - **Ordered enumeration**: records always come back in ascending id order
//! - **Canonical records**: SQLite stores deterministic CBOR, see
//!   [`oracle_registry_core::canonical`]

pub mod error;
pub mod memory;
pub mod migration;
pub mod sequence;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{Cell, Store};
