//! Size-limit parameters.
//!
//! Parameters live in chain state and are changed only through a governance
//! path outside the registry. The registry reads a fresh [`Params`] snapshot
//! at the start of every validating operation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Default ceiling for `name`, in bytes.
pub const DEFAULT_MAX_NAME_LENGTH: u64 = 280;

/// Default ceiling for `description`, in bytes.
pub const DEFAULT_MAX_DESCRIPTION_LENGTH: u64 = 4096;

/// Default ceiling for `executable`, in bytes (10 KiB).
pub const DEFAULT_MAX_DATA_SOURCE_EXECUTABLE_SIZE: u64 = 10 * 1024;

/// Individually addressable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ParamKey {
    MaxNameLength,
    MaxDescriptionLength,
    MaxDataSourceExecutableSize,
}

impl ParamKey {
    /// All keys, in storage order.
    pub const ALL: [ParamKey; 3] = [
        ParamKey::MaxNameLength,
        ParamKey::MaxDescriptionLength,
        ParamKey::MaxDataSourceExecutableSize,
    ];

    /// Stable key used in persisted state.
    pub const fn as_str(self) -> &'static str {
        match self {
            ParamKey::MaxNameLength => "MaxNameLength",
            ParamKey::MaxDescriptionLength => "MaxDescriptionLength",
            ParamKey::MaxDataSourceExecutableSize => "MaxDataSourceExecutableSize",
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidParams(format!("unknown param key: {s}")))
    }
}

/// Snapshot of all registry parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    pub max_name_length: u64,
    pub max_description_length: u64,
    pub max_data_source_executable_size: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
            max_description_length: DEFAULT_MAX_DESCRIPTION_LENGTH,
            max_data_source_executable_size: DEFAULT_MAX_DATA_SOURCE_EXECUTABLE_SIZE,
        }
    }
}

impl Params {
    /// Read a single parameter.
    pub fn get(&self, key: ParamKey) -> u64 {
        match key {
            ParamKey::MaxNameLength => self.max_name_length,
            ParamKey::MaxDescriptionLength => self.max_description_length,
            ParamKey::MaxDataSourceExecutableSize => self.max_data_source_executable_size,
        }
    }

    /// Overwrite a single parameter.
    pub fn set(&mut self, key: ParamKey, value: u64) {
        match key {
            ParamKey::MaxNameLength => self.max_name_length = value,
            ParamKey::MaxDescriptionLength => self.max_description_length = value,
            ParamKey::MaxDataSourceExecutableSize => self.max_data_source_executable_size = value,
        }
    }

    /// Builder-style variant of [`Params::set`].
    pub fn with(mut self, key: ParamKey, value: u64) -> Self {
        self.set(key, value);
        self
    }

    /// Reject parameter sets that would make every data source invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for key in ParamKey::ALL {
            if self.get(key) == 0 {
                return Err(ValidationError::InvalidParams(format!("{key} must be positive")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = Params::default();
        assert_eq!(params.get(ParamKey::MaxNameLength), 280);
        assert_eq!(params.get(ParamKey::MaxDescriptionLength), 4096);
        assert_eq!(params.get(ParamKey::MaxDataSourceExecutableSize), 10240);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_set_single_key() {
        let params = Params::default().with(ParamKey::MaxDataSourceExecutableSize, 20);
        assert_eq!(params.max_data_source_executable_size, 20);
        assert_eq!(params.max_name_length, DEFAULT_MAX_NAME_LENGTH);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let params = Params::default().with(ParamKey::MaxNameLength, 0);
        assert!(matches!(params.validate(), Err(ValidationError::InvalidParams(_))));
    }

    #[test]
    fn test_key_string_roundtrip() {
        for key in ParamKey::ALL {
            assert_eq!(key.as_str().parse::<ParamKey>().unwrap(), key);
        }
        assert!("MaxCalldataSize".parse::<ParamKey>().is_err());
    }
}
