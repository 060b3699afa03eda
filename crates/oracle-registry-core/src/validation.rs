//! Data source validation against the current parameter snapshot.

use crate::data_source::DataSource;
use crate::error::ValidationError;
use crate::params::Params;

/// Validate candidate data source fields.
///
/// Checks, first failure wins:
/// 1. executable size
/// 2. name length
/// 3. description length
///
/// Lengths are counted in bytes of the UTF-8 encoding.
pub fn validate_data_source(
    name: &str,
    description: &str,
    executable: &[u8],
    params: &Params,
) -> Result<(), ValidationError> {
    let exec_len = executable.len() as u64;
    if exec_len > params.max_data_source_executable_size {
        return Err(ValidationError::ExecutableTooLarge {
            len: exec_len,
            max: params.max_data_source_executable_size,
        });
    }

    let name_len = name.len() as u64;
    if name_len > params.max_name_length {
        return Err(ValidationError::NameTooLong {
            len: name_len,
            max: params.max_name_length,
        });
    }

    let desc_len = description.len() as u64;
    if desc_len > params.max_description_length {
        return Err(ValidationError::DescriptionTooLong {
            len: desc_len,
            max: params.max_description_length,
        });
    }

    Ok(())
}

impl DataSource {
    /// Validate this record's fields against `params`.
    pub fn validate(&self, params: &Params) -> Result<(), ValidationError> {
        validate_data_source(&self.name, &self.description, &self.executable, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamKey;
    use proptest::prelude::*;

    const TOO_LONG_EXECUTABLE: &[u8] =
        b"The number of bytes of this data source is 80 which is obviously longer than 20.";

    #[test]
    fn test_within_limits() {
        let params = Params::default();
        assert!(validate_data_source("data_source", "description", b"executable", &params).is_ok());
    }

    #[test]
    fn test_limit_is_inclusive() {
        let params = Params::default().with(ParamKey::MaxNameLength, 5);
        assert!(validate_data_source("abcde", "", b"", &params).is_ok());
        assert!(validate_data_source("abcdef", "", b"", &params).is_err());
    }

    #[test]
    fn test_executable_too_large() {
        let params = Params::default().with(ParamKey::MaxDataSourceExecutableSize, 20);
        let err = validate_data_source("name", "desc", TOO_LONG_EXECUTABLE, &params).unwrap_err();
        assert_eq!(err, ValidationError::ExecutableTooLarge { len: 80, max: 20 });
    }

    #[test]
    fn test_name_too_long() {
        let params = Params::default().with(ParamKey::MaxNameLength, 5);
        let err = validate_data_source("data_source", "desc", b"exec", &params).unwrap_err();
        assert_eq!(err, ValidationError::NameTooLong { len: 11, max: 5 });
    }

    #[test]
    fn test_description_too_long() {
        let params = Params::default().with(ParamKey::MaxDescriptionLength, 5);
        let err = validate_data_source("name", "description", b"exec", &params).unwrap_err();
        assert_eq!(err, ValidationError::DescriptionTooLong { len: 11, max: 5 });
    }

    #[test]
    fn test_priority_order() {
        let params = Params {
            max_name_length: 1,
            max_description_length: 1,
            max_data_source_executable_size: 1,
        };

        let err = validate_data_source("nn", "dd", b"ee", &params).unwrap_err();
        assert!(matches!(err, ValidationError::ExecutableTooLarge { .. }));

        let err = validate_data_source("nn", "dd", b"e", &params).unwrap_err();
        assert!(matches!(err, ValidationError::NameTooLong { .. }));

        let err = validate_data_source("n", "dd", b"e", &params).unwrap_err();
        assert!(matches!(err, ValidationError::DescriptionTooLong { .. }));
    }

    #[test]
    fn test_length_counts_bytes_not_chars() {
        // "ééé" is three chars but six bytes.
        let params = Params::default().with(ParamKey::MaxNameLength, 3);
        let err = validate_data_source("ééé", "", b"", &params).unwrap_err();
        assert_eq!(err, ValidationError::NameTooLong { len: 6, max: 3 });
    }

    proptest! {
        #[test]
        fn test_matches_byte_length_comparison(
            name in ".{0,40}",
            description in ".{0,40}",
            executable in prop::collection::vec(any::<u8>(), 0..40),
            max_name in 1u64..40,
            max_desc in 1u64..40,
            max_exec in 1u64..40,
        ) {
            let params = Params {
                max_name_length: max_name,
                max_description_length: max_desc,
                max_data_source_executable_size: max_exec,
            };
            let result = validate_data_source(&name, &description, &executable, &params);

            let expected = if executable.len() as u64 > max_exec {
                Some("exec")
            } else if name.len() as u64 > max_name {
                Some("name")
            } else if description.len() as u64 > max_desc {
                Some("desc")
            } else {
                None
            };

            let actual = match result {
                Ok(()) => None,
                Err(ValidationError::ExecutableTooLarge { .. }) => Some("exec"),
                Err(ValidationError::NameTooLong { .. }) => Some("name"),
                Err(ValidationError::DescriptionTooLong { .. }) => Some("desc"),
                Err(_) => Some("other"),
            };
            prop_assert_eq!(actual, expected);
        }
    }
}
