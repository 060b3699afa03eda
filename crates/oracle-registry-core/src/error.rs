//! Error types for the Oracle Registry Core.

use thiserror::Error;

/// Core errors raised while constructing or decoding registry values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("owner address must not be empty")]
    EmptyAddress,

    #[error("invalid coin denomination: {0:?}")]
    InvalidDenom(String),

    #[error("duplicate coin denomination: {0}")]
    DuplicateDenom(String),

    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("decoding error: {0}")]
    DecodingError(String),
}

/// Validation errors for data source fields and parameter sets.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("executable too large: {len} bytes exceeds maximum of {max}")]
    ExecutableTooLarge { len: u64, max: u64 },

    #[error("name too long: {len} bytes exceeds maximum of {max}")]
    NameTooLong { len: u64, max: u64 },

    #[error("description too long: {len} bytes exceeds maximum of {max}")]
    DescriptionTooLong { len: u64, max: u64 },

    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error("invalid genesis: {0}")]
    InvalidGenesis(String),
}
