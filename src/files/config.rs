use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where attachments are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlobBackendKind {
    Local,
    Memory,
}

/// Attachment storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    /// Backend (default: local)
    #[serde(default = "default_backend")]
    pub backend: BlobBackendKind,

    /// Root directory of the local backend (default: "./files")
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Largest accepted upload in bytes (default: 16 MiB)
    #[serde(default = "default_max_size_bytes")]
    pub max_size_bytes: u64,
}

fn default_backend() -> BlobBackendKind {
    BlobBackendKind::Local
}

fn default_root() -> PathBuf {
    PathBuf::from("./files")
}

fn default_max_size_bytes() -> u64 {
    16 * 1024 * 1024
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            root: default_root(),
            max_size_bytes: default_max_size_bytes(),
        }
    }
}
