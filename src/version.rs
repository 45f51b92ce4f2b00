//! Version token codec for optimistic concurrency
//!
//! Wire format is a quoted decimal integer, e.g. `"0"` or `"17"`, carried in
//! `ETag` / `If-Match` / `If-None-Match` headers.
//!
//! The whole token must match: an opening quote, one or more ASCII digits,
//! a closing quote, nothing else. The value must fit in a `u64`.

use thiserror::Error;

/// A token that could not be decoded. `token` is `None` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version token: {token:?}")]
pub struct VersionInvalid {
    pub token: Option<String>,
}

/// Codec for version tokens
pub struct VersionToken;

impl VersionToken {
    /// Encode a version as a token
    pub fn format(version: u64) -> String {
        format!("\"{}\"", version)
    }

    /// Decode a token into a version
    pub fn parse(token: Option<&str>) -> Result<u64, VersionInvalid> {
        let invalid = || VersionInvalid {
            token: token.map(str::to_string),
        };

        let raw = token.ok_or_else(invalid)?;
        let digits = raw
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .ok_or_else(invalid)?;

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        digits.parse::<u64>().map_err(|_| invalid())
    }

    /// Whether a conditional-GET token names the given version
    pub fn matches(token: Option<&str>, version: u64) -> bool {
        matches!(Self::parse(token), Ok(v) if v == version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(VersionToken::format(0), "\"0\"");
        assert_eq!(VersionToken::format(17), "\"17\"");
    }

    #[test]
    fn test_roundtrip_boundaries() {
        for n in [0, 1, 9, 10, 99, 12345, u64::MAX] {
            assert_eq!(VersionToken::parse(Some(&VersionToken::format(n))), Ok(n));
        }
    }

    #[test]
    fn test_absent_token_invalid() {
        assert_eq!(VersionToken::parse(None), Err(VersionInvalid { token: None }));
    }

    #[test]
    fn test_malformed_tokens_invalid() {
        for token in ["", "abc", "0", "\"\"", "\"1", "1\"", "\"1a\"", "\"-1\"", "\" 1\"", "\"1\"x"] {
            let result = VersionToken::parse(Some(token));
            assert_eq!(
                result,
                Err(VersionInvalid { token: Some(token.to_string()) }),
                "token {:?}",
                token
            );
        }
    }

    #[test]
    fn test_overflow_invalid() {
        assert!(VersionToken::parse(Some("\"18446744073709551616\"")).is_err());
    }

    #[test]
    fn test_matches() {
        assert!(VersionToken::matches(Some("\"3\""), 3));
        assert!(!VersionToken::matches(Some("\"2\""), 3));
        assert!(!VersionToken::matches(None, 0));
    }
}
