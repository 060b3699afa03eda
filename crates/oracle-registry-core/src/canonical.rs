//! Canonical CBOR encoding for persisted data source records.
//!
//! This module follows RFC 8949 Core Deterministic Encoding:
//! - Map keys are small integers emitted in ascending order
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - Coin amounts are minimal big-endian byte strings (no leading zeros)
//!
//! Every replica must persist byte-identical records, so decoding rejects
//! anything that does not re-encode to the exact input.

use ciborium::value::Value;
use primitive_types::U256;

use crate::coin::{Coin, Coins};
use crate::data_source::DataSource;
use crate::error::CoreError;
use crate::types::Address;

/// Record format version.
pub const RECORD_VERSION: u8 = 1;

/// Record field keys (integer keys for compact encoding).
///
/// Keys 0-23 encode as single bytes in CBOR.
mod keys {
    pub const VERSION: u64 = 0;
    pub const OWNER: u64 = 1;
    pub const NAME: u64 = 2;
    pub const DESCRIPTION: u64 = 3;
    pub const FEE: u64 = 4;
    pub const EXECUTABLE: u64 = 5;

    pub const COUNT: u64 = 6;
}

/// Encode a data source record to canonical CBOR bytes.
pub fn canonical_bytes(ds: &DataSource) -> Vec<u8> {
    let mut buf = Vec::with_capacity(64 + ds.executable.len());

    encode_uint(&mut buf, 5, keys::COUNT);

    encode_uint(&mut buf, 0, keys::VERSION);
    encode_uint(&mut buf, 0, RECORD_VERSION as u64);

    encode_uint(&mut buf, 0, keys::OWNER);
    encode_bytes(&mut buf, ds.owner.as_bytes());

    encode_uint(&mut buf, 0, keys::NAME);
    encode_text(&mut buf, &ds.name);

    encode_uint(&mut buf, 0, keys::DESCRIPTION);
    encode_text(&mut buf, &ds.description);

    // fee: array of [denom, amount] pairs, already sorted by denom
    encode_uint(&mut buf, 0, keys::FEE);
    encode_uint(&mut buf, 4, ds.fee.len() as u64);
    for coin in &ds.fee {
        encode_uint(&mut buf, 4, 2);
        encode_text(&mut buf, &coin.denom);
        encode_bytes(&mut buf, &amount_to_bytes(&coin.amount));
    }

    encode_uint(&mut buf, 0, keys::EXECUTABLE);
    encode_bytes(&mut buf, &ds.executable);

    buf
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffffffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a byte string (major type 2).
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Encode a text string (major type 3).
fn encode_text(buf: &mut Vec<u8>, s: &str) {
    encode_uint(buf, 3, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

fn amount_to_bytes(amount: &U256) -> Vec<u8> {
    let mut full = [0u8; 32];
    amount.to_big_endian(&mut full);
    let first = full.iter().position(|b| *b != 0).unwrap_or(full.len());
    full[first..].to_vec()
}

fn amount_from_bytes(bytes: &[u8]) -> Result<U256, CoreError> {
    if bytes.len() > 32 {
        return Err(CoreError::MalformedRecord("amount exceeds 256 bits".into()));
    }
    Ok(U256::from_big_endian(bytes))
}

/// Decode a data source record from canonical bytes.
pub fn decode_data_source(bytes: &[u8]) -> Result<DataSource, CoreError> {
    let value: Value =
        ciborium::from_reader(bytes).map_err(|e| CoreError::DecodingError(e.to_string()))?;

    let ds = cbor_value_to_data_source(&value)?;

    if canonical_bytes(&ds) != bytes {
        return Err(CoreError::MalformedRecord("non-canonical encoding".into()));
    }

    Ok(ds)
}

/// Convert a CBOR Value (map) back to a DataSource.
fn cbor_value_to_data_source(value: &Value) -> Result<DataSource, CoreError> {
    let map = match value {
        Value::Map(m) => m,
        _ => return Err(CoreError::MalformedRecord("expected map".into())),
    };

    let get = |key: u64| -> Option<&Value> {
        map.iter()
            .find(|(k, _)| matches!(k, Value::Integer(i) if i128::from(*i) == key as i128))
            .map(|(_, v)| v)
    };

    match get(keys::VERSION) {
        Some(Value::Integer(i)) if i128::from(*i) == RECORD_VERSION as i128 => {}
        Some(Value::Integer(i)) => {
            return Err(CoreError::MalformedRecord(format!(
                "unsupported record version: {}",
                i128::from(*i)
            )))
        }
        _ => return Err(CoreError::MalformedRecord("missing version".into())),
    }

    let owner = match get(keys::OWNER) {
        Some(Value::Bytes(b)) => Address::new(b.clone())?,
        _ => return Err(CoreError::MalformedRecord("invalid owner".into())),
    };

    let name = match get(keys::NAME) {
        Some(Value::Text(s)) => s.clone(),
        _ => return Err(CoreError::MalformedRecord("invalid name".into())),
    };

    let description = match get(keys::DESCRIPTION) {
        Some(Value::Text(s)) => s.clone(),
        _ => return Err(CoreError::MalformedRecord("invalid description".into())),
    };

    let fee = match get(keys::FEE) {
        Some(Value::Array(items)) => {
            let mut coins = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Array(pair) => match pair.as_slice() {
                        [Value::Text(denom), Value::Bytes(amount)] => {
                            coins.push(Coin::new(denom.clone(), amount_from_bytes(amount)?)?);
                        }
                        _ => return Err(CoreError::MalformedRecord("invalid coin".into())),
                    },
                    _ => return Err(CoreError::MalformedRecord("invalid coin".into())),
                }
            }
            Coins::new(coins)?
        }
        _ => return Err(CoreError::MalformedRecord("invalid fee".into())),
    };

    let executable = match get(keys::EXECUTABLE) {
        Some(Value::Bytes(b)) => b.clone(),
        _ => return Err(CoreError::MalformedRecord("invalid executable".into())),
    };

    Ok(DataSource {
        owner,
        name,
        description,
        fee,
        executable,
    })
}
