//! # Oracle Registry Testkit
//!
//! Testing utilities for the oracle registry.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a keeper over a fresh in-memory store plus canned records
//! - **Generators**: Proptest strategies for property-based testing
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use oracle_registry_testkit::generators::data_source;
//!
//! proptest! {
//!     #[test]
//!     fn encoding_is_deterministic(ds in data_source()) {
//!         let a = oracle_registry_core::canonical_bytes(&ds);
//!         let b = oracle_registry_core::canonical_bytes(&ds.clone());
//!         prop_assert_eq!(a, b);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use oracle_registry_testkit::fixtures::TestFixture;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let fixture = TestFixture::new();
//! let id = fixture.mock_data_source().await.unwrap();
//! assert_eq!(id.get(), 1);
//! # });
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{mock_data_source_record, owner, uband, TestFixture, TOO_LONG_EXECUTABLE};
pub use generators::{data_source, data_source_from_params, DataSourceParams};
