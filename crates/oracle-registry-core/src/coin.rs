//! Fee coins: denominated, non-negative amounts.
//!
//! A [`Coins`] value is the fee schedule a data source charges requesters.
//! It is kept in canonical form at all times: sorted by denomination, no
//! duplicate denominations, no zero amounts.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Maximum denomination length in bytes.
pub const MAX_DENOM_LEN: usize = 128;

/// Minimum denomination length in bytes.
pub const MIN_DENOM_LEN: usize = 3;

/// A single denominated amount.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    #[serde(with = "amount_serde")]
    pub amount: U256,
}

impl Coin {
    /// Create a coin, checking the denomination.
    pub fn new(denom: impl Into<String>, amount: impl Into<U256>) -> Result<Self, CoreError> {
        let denom = denom.into();
        validate_denom(&denom)?;
        Ok(Self {
            denom,
            amount: amount.into(),
        })
    }

    /// Whether this coin carries a zero amount.
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Debug for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coin({}{})", self.amount, self.denom)
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Check a denomination against `[a-z][a-z0-9/]{2,127}`.
pub fn validate_denom(denom: &str) -> Result<(), CoreError> {
    let bytes = denom.as_bytes();
    let len_ok = (MIN_DENOM_LEN..=MAX_DENOM_LEN).contains(&bytes.len());
    let head_ok = bytes.first().is_some_and(|b| b.is_ascii_lowercase());
    let tail_ok = bytes
        .iter()
        .skip(1)
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'/');

    if len_ok && head_ok && tail_ok {
        Ok(())
    } else {
        Err(CoreError::InvalidDenom(denom.to_string()))
    }
}

/// An ordered set of coins, unique by denomination.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coin>", into = "Vec<Coin>")]
pub struct Coins(Vec<Coin>);

impl Coins {
    /// Build a canonical coin set.
    ///
    /// Sorts by denomination and drops zero amounts. Fails on a malformed or
    /// repeated denomination.
    pub fn new(coins: impl IntoIterator<Item = Coin>) -> Result<Self, CoreError> {
        let mut coins: Vec<Coin> = coins.into_iter().collect();
        for coin in &coins {
            validate_denom(&coin.denom)?;
        }

        coins.sort_by(|a, b| a.denom.cmp(&b.denom));
        if let Some(pair) = coins.windows(2).find(|w| w[0].denom == w[1].denom) {
            return Err(CoreError::DuplicateDenom(pair[0].denom.clone()));
        }

        coins.retain(|c| !c.is_zero());
        Ok(Self(coins))
    }

    /// The empty fee schedule.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Shorthand for a single-coin set.
    pub fn single(denom: impl Into<String>, amount: impl Into<U256>) -> Result<Self, CoreError> {
        Self::new([Coin::new(denom, amount)?])
    }

    /// Amount held in `denom`, zero when absent.
    pub fn amount_of(&self, denom: &str) -> U256 {
        self.0
            .binary_search_by(|c| c.denom.as_str().cmp(denom))
            .map(|i| self.0[i].amount)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coin> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Coin] {
        &self.0
    }
}

impl fmt::Debug for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(Coin::to_string).collect();
        write!(f, "{}", parts.join(","))
    }
}

impl TryFrom<Vec<Coin>> for Coins {
    type Error = CoreError;

    fn try_from(coins: Vec<Coin>) -> Result<Self, Self::Error> {
        Self::new(coins)
    }
}

impl From<Coins> for Vec<Coin> {
    fn from(coins: Coins) -> Self {
        coins.0
    }
}

impl<'a> IntoIterator for &'a Coins {
    type Item = &'a Coin;
    type IntoIter = std::slice::Iter<'a, Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Amounts travel as decimal strings so JSON consumers never lose precision.
mod amount_serde {
    use primitive_types::U256;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(amount: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&amount.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let s = String::deserialize(deserializer)?;
        U256::from_dec_str(&s).map_err(|e| D::Error::custom(format!("invalid amount {s:?}: {e:?}")))
    }
}
