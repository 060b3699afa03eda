//! Sequence allocator for data source identifiers.
//!
//! The counter holds the last id handed out, starting at 0. Allocation is a
//! pre-increment, so the first id is 1. Backends persist the advanced counter
//! in the same atomic write as the record it was allocated for.

use oracle_registry_core::DataSourceId;

use crate::error::{Result, StoreError};

/// Compute the next id from the current counter value.
///
/// Returns the fresh id, which is also the new counter value. Fails instead
/// of wrapping once the counter is exhausted.
pub fn next_id(counter: u64) -> Result<DataSourceId> {
    counter
        .checked_add(1)
        .map(DataSourceId::new)
        .ok_or(StoreError::SequenceExhausted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_one() {
        assert_eq!(next_id(0).unwrap(), DataSourceId::FIRST);
        assert_eq!(next_id(41).unwrap(), DataSourceId::new(42));
    }

    #[test]
    fn test_exhausted() {
        assert!(matches!(next_id(u64::MAX), Err(StoreError::SequenceExhausted)));
    }
}
