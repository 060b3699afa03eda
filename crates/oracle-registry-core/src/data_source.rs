//! The data source record.

use serde::{Deserialize, Serialize};

use crate::coin::Coins;
use crate::types::Address;

/// A registered external data-fetching script.
///
/// The identifier is not part of the record; it is the key the registry
/// stores the record under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
    /// Account allowed to edit this data source (enforced outside the registry).
    pub owner: Address,
    /// Human-readable name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Fee charged to requesters for each invocation.
    pub fee: Coins,
    /// Opaque script or binary run off-chain when the data source is invoked.
    #[serde(with = "hex::serde")]
    pub executable: Vec<u8>,
}

impl DataSource {
    /// Create a new data source record.
    pub fn new(
        owner: Address,
        name: impl Into<String>,
        description: impl Into<String>,
        fee: Coins,
        executable: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            owner,
            name: name.into(),
            description: description.into(),
            fee,
            executable: executable.into(),
        }
    }

    /// Size of the executable in bytes.
    pub fn executable_size(&self) -> usize {
        self.executable.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let ds = DataSource::new(
            Address::new(b"owner".to_vec()).unwrap(),
            "data_source",
            "description",
            Coins::single("uband", 10u64).unwrap(),
            b"exec".to_vec(),
        );

        let value = serde_json::to_value(&ds).unwrap();
        assert_eq!(value["owner"], "6f776e6572");
        assert_eq!(value["executable"], "65786563");
        assert_eq!(value["fee"][0]["amount"], "10");

        let back: DataSource = serde_json::from_value(value).unwrap();
        assert_eq!(back, ds);
    }
}
