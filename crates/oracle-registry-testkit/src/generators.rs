//! Proptest generators for property-based testing.

use proptest::prelude::*;

use oracle_registry_core::{Address, Coin, Coins, DataSource, Params, U256};

/// Generate a non-empty owner address (20 bytes, like an account address).
pub fn address() -> impl Strategy<Value = Address> {
    any::<[u8; 20]>().prop_map(|bytes| Address::new(bytes.to_vec()).expect("non-empty"))
}

/// Generate a valid denomination.
pub fn denom() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{2,15}".prop_map(String::from)
}

/// Generate a coin amount, covering the full 256-bit range.
pub fn amount() -> impl Strategy<Value = U256> {
    prop_oneof![
        any::<u64>().prop_map(U256::from),
        any::<[u8; 32]>().prop_map(|b| U256::from_big_endian(&b)),
    ]
}

/// Generate a canonical fee schedule of up to four coins.
pub fn coins() -> impl Strategy<Value = Coins> {
    prop::collection::btree_map(denom(), amount(), 0..4).prop_map(|map| {
        Coins::new(
            map.into_iter()
                .map(|(d, a)| Coin::new(d, a).expect("generated denom is valid")),
        )
        .expect("generated denoms are unique")
    })
}

/// Generate executable bytes of specified max length.
pub fn executable(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a parameter set with small limits, so both outcomes are common.
pub fn small_params() -> impl Strategy<Value = Params> {
    (1u64..64, 1u64..64, 1u64..128).prop_map(|(name, description, exec)| Params {
        max_name_length: name,
        max_description_length: description,
        max_data_source_executable_size: exec,
    })
}

/// Parameters for generating a data source.
#[derive(Debug, Clone)]
pub struct DataSourceParams {
    pub owner: Address,
    pub name: String,
    pub description: String,
    pub fee: Coins,
    pub executable: Vec<u8>,
}

impl Arbitrary for DataSourceParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            address(),
            "\\PC{0,48}",
            "\\PC{0,96}",
            coins(),
            executable(160),
        )
            .prop_map(|(owner, name, description, fee, executable)| DataSourceParams {
                owner,
                name,
                description,
                fee,
                executable,
            })
            .boxed()
    }
}

/// Build a data source from parameters.
pub fn data_source_from_params(params: &DataSourceParams) -> DataSource {
    DataSource::new(
        params.owner.clone(),
        params.name.clone(),
        params.description.clone(),
        params.fee.clone(),
        params.executable.clone(),
    )
}

/// Generate a data source.
pub fn data_source() -> impl Strategy<Value = DataSource> {
    any::<DataSourceParams>().prop_map(|p| data_source_from_params(&p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use oracle_registry_core::{canonical_bytes, decode_data_source};

    proptest! {
        #[test]
        fn test_canonical_bytes_deterministic(params: DataSourceParams) {
            let a = data_source_from_params(&params);
            let b = data_source_from_params(&params);
            prop_assert_eq!(canonical_bytes(&a), canonical_bytes(&b));
        }

        #[test]
        fn test_decode_inverts_encode(ds in data_source()) {
            prop_assert_eq!(decode_data_source(&canonical_bytes(&ds)).unwrap(), ds);
        }

        #[test]
        fn test_generated_coins_are_sorted(fee in coins()) {
            let denoms: Vec<&str> = fee.iter().map(|c| c.denom.as_str()).collect();
            let mut sorted = denoms.clone();
            sorted.sort();
            prop_assert_eq!(denoms, sorted);
        }
    }
}
