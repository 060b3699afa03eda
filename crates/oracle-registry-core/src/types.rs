//! Strong type definitions for the Oracle Registry.
//!
//! All identifiers are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Identifier of a registered data source.
///
/// Assigned by the registry's sequence allocator starting at 1. The value 0
/// is never handed out and marks "no data source yet".
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataSourceId(pub u64);

impl DataSourceId {
    /// Create an identifier from its raw value.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The first identifier ever assigned.
    pub const FIRST: Self = Self(1);
}

impl fmt::Debug for DataSourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataSourceId({})", self.0)
    }
}

impl fmt::Display for DataSourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for DataSourceId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<DataSourceId> for u64 {
    fn from(id: DataSourceId) -> Self {
        id.0
    }
}

/// An owner account in the host chain's address format.
///
/// The bytes are opaque to the registry; the only structural rule is that
/// an address is never empty. Serialized as a lowercase hex string.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(Vec<u8>);

impl Address {
    /// Create an address from raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, CoreError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(CoreError::EmptyAddress);
        }
        Ok(Self(bytes))
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let bytes = hex::decode(s).map_err(|e| CoreError::DecodingError(e.to_string()))?;
        Self::new(bytes)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = CoreError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        Self::new(slice)
    }
}

impl TryFrom<String> for Address {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_address_rejected() {
        assert_eq!(Address::new(Vec::<u8>::new()), Err(CoreError::EmptyAddress));
        assert_eq!(Address::from_hex(""), Err(CoreError::EmptyAddress));
    }

    #[test]
    fn test_address_hex_roundtrip() {
        let owner = Address::new(b"owner".to_vec()).unwrap();
        assert_eq!(owner.to_hex(), "6f776e6572");
        assert_eq!(Address::from_hex("6f776e6572").unwrap(), owner);
    }

    #[test]
    fn test_address_json_is_hex() {
        let owner = Address::new(b"owner".to_vec()).unwrap();
        let json = serde_json::to_string(&owner).unwrap();
        assert_eq!(json, "\"6f776e6572\"");

        let err = serde_json::from_str::<Address>("\"\"");
        assert!(err.is_err());
    }

    #[test]
    fn test_data_source_id_display() {
        let id = DataSourceId::new(42);
        assert_eq!(format!("{}", id), "42");
        assert_eq!(format!("{:?}", id), "DataSourceId(42)");
        assert!(DataSourceId::FIRST > DataSourceId::default());
    }
}
