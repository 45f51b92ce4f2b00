//! Sidecar metadata stored next to every blob

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Suffix of metadata sidecar files
pub const METADATA_SUFFIX: &str = ".json";

/// Metadata of one stored attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobMetadata {
    pub content_type: String,
    pub size: u64,
    /// Lowercase hex SHA-256 of the content
    pub checksum: String,
    pub uploaded_at: DateTime<Utc>,
}

impl BlobMetadata {
    /// Describe `data` stored with `content_type`
    pub fn describe(content_type: &str, data: &[u8]) -> Self {
        Self {
            content_type: content_type.to_string(),
            size: data.len() as u64,
            checksum: Self::calculate_checksum(data),
            uploaded_at: Utc::now(),
        }
    }

    /// Calculate checksum for data
    pub fn calculate_checksum(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }

    /// Whether `data` is the content this metadata describes
    pub fn verifies(&self, data: &[u8]) -> bool {
        self.size == data.len() as u64 && self.checksum == Self::calculate_checksum(data)
    }
}
