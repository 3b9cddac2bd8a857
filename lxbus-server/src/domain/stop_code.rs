//! Stop code types.

use std::fmt;

/// Error returned when parsing an invalid stop code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop code: {reason}")]
pub struct InvalidStopCode {
    reason: &'static str,
}

/// A valid Carris bus stop code.
///
/// Stop codes are 1 to 8 ASCII digits as printed on the physical stop
/// plate. This type guarantees that any `StopCode` value is valid by
/// construction.
///
/// # Examples
///
/// ```
/// use lxbus_server::domain::StopCode;
///
/// let stop = StopCode::parse("758").unwrap();
/// assert_eq!(stop.as_str(), "758");
///
/// // Empty input is rejected
/// assert!(StopCode::parse("").is_err());
///
/// // Non-digit input is rejected
/// assert!(StopCode::parse("75a").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StopCode(String);

/// Maximum number of digits in a stop code.
const MAX_LEN: usize = 8;

impl StopCode {
    /// Parse a stop code from a string.
    ///
    /// The input must be 1 to 8 ASCII digits (0-9).
    pub fn parse(s: &str) -> Result<Self, InvalidStopCode> {
        let bytes = s.as_bytes();

        if bytes.is_empty() {
            return Err(InvalidStopCode {
                reason: "must not be empty",
            });
        }

        if bytes.len() > MAX_LEN {
            return Err(InvalidStopCode {
                reason: "must be at most 8 digits",
            });
        }

        for &b in bytes {
            if !b.is_ascii_digit() {
                return Err(InvalidStopCode {
                    reason: "must be ASCII digits 0-9",
                });
            }
        }

        Ok(StopCode(s.to_string()))
    }

    /// Returns the stop code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopCode({})", self.0)
    }
}

impl fmt::Display for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating valid stop codes: 1-8 ASCII digits
    fn valid_stop_code_string() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[0-9]{1,8}").unwrap()
    }

    proptest! {
        /// Roundtrip: parse then as_str returns the original
        #[test]
        fn roundtrip(s in valid_stop_code_string()) {
            let stop = StopCode::parse(&s).unwrap();
            prop_assert_eq!(stop.as_str(), s.as_str());
        }

        /// Any valid stop code can be parsed
        #[test]
        fn valid_always_parses(s in valid_stop_code_string()) {
            prop_assert!(StopCode::parse(&s).is_ok());
        }

        /// Over-long strings are always rejected
        #[test]
        fn too_long_rejected(s in "[0-9]{9,16}") {
            prop_assert!(StopCode::parse(&s).is_err());
        }

        /// Strings with letters are rejected
        #[test]
        fn letters_rejected(s in "[0-9a-z]{1,8}".prop_filter("has letter", |s| s.chars().any(|c| c.is_ascii_lowercase()))) {
            prop_assert!(StopCode::parse(&s).is_err());
        }
    }
}
