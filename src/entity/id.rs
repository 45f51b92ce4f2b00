//! Opaque record identifier
//!
//! A 12-byte value rendered as 24 lowercase hex characters. Layout of
//! generated ids:
//!
//! ```text
//! +-----------------+-------------------+-----------------+
//! | unix seconds    | random            | counter         |
//! | (4 bytes, BE)   | (5 bytes)         | (3 bytes, BE)   |
//! +-----------------+-------------------+-----------------+
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Length of the hex rendering
const HEX_LEN: usize = 24;

/// Error for identifiers that are not 24 hex digits
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid id: {0}")]
pub struct InvalidFahrradId(pub String);

/// Server-assigned identifier of a bicycle record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FahrradId([u8; 12]);

impl FahrradId {
    /// Create an id from raw bytes
    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Generate a fresh id
    pub fn generate() -> Self {
        static COUNTER: OnceLock<AtomicU32> = OnceLock::new();
        let counter = COUNTER.get_or_init(|| AtomicU32::new(rand::random::<u32>()));

        let seconds = u32::try_from(Utc::now().timestamp()).unwrap_or(u32::MAX);
        let random: [u8; 5] = rand::random();
        let count = counter.fetch_add(1, Ordering::Relaxed).to_be_bytes();

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(&random);
        bytes[9..].copy_from_slice(&count[1..]);
        Self(bytes)
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; 12] {
        &self.0
    }

    /// Check whether a string is a syntactically valid id
    pub fn is_valid(s: &str) -> bool {
        s.len() == HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

impl fmt::Display for FahrradId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl FromStr for FahrradId {
    type Err = InvalidFahrradId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !Self::is_valid(s) {
            return Err(InvalidFahrradId(s.to_string()));
        }

        let mut bytes = [0u8; 12];
        for (i, chunk) in s.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk).map_err(|_| InvalidFahrradId(s.to_string()))?;
            bytes[i] = u8::from_str_radix(pair, 16).map_err(|_| InvalidFahrradId(s.to_string()))?;
        }
        Ok(Self(bytes))
    }
}

impl Serialize for FahrradId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FahrradId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_24_lowercase_hex() {
        let id = FahrradId::from_bytes([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xab, 0x01]);
        assert_eq!(id.to_string(), "00000000000000000000ab01");
    }

    #[test]
    fn test_parse_accepts_upper_case() {
        let id: FahrradId = "00000000000000000000AB01".parse().unwrap();
        assert_eq!(id.to_string(), "00000000000000000000ab01");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("".parse::<FahrradId>().is_err());
        assert!("12345".parse::<FahrradId>().is_err());
        assert!("zzzzzzzzzzzzzzzzzzzzzzzz".parse::<FahrradId>().is_err());
        assert!("0000000000000000000000001".parse::<FahrradId>().is_err());
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = FahrradId::generate();
        let b = FahrradId::generate();
        assert_ne!(a, b);
        assert_eq!(a.to_string().parse::<FahrradId>().unwrap(), a);
    }

    #[test]
    fn test_serde_as_string() {
        let id: FahrradId = "000000000000000000000001".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"000000000000000000000001\"");
        let back: FahrradId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
