//! Error types for the registry.

use oracle_registry_core::{CoreError, DataSourceId, ValidationError};
use oracle_registry_store::StoreError;
use thiserror::Error;

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No data source is stored at the id.
    #[error("data source not found: {0}")]
    NotFound(DataSourceId),

    /// A field exceeded its parameter limit, or a parameter set was rejected.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Malformed domain value.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// Genesis JSON could not be read or written.
    #[error("genesis encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RegistryError {
    /// Whether the failure is a lookup on an absent id.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::NotFound(_))
    }

    /// The validation failure, if this error is one.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            RegistryError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
