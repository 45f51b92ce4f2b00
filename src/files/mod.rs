//! # Attachment Blob Storage
//!
//! Backends storing raw attachment bytes plus a JSON metadata sidecar per
//! blob. Which blobs belong to which record is decided by the attachment
//! service; backends only see paths.

mod backend;
mod config;
mod errors;
mod local;
mod memory;
mod metadata;
mod sniff;

pub use backend::BlobBackend;
pub use config::{BlobBackendKind, FilesConfig};
pub use errors::{BlobError, BlobResult};
pub use local::LocalBackend;
pub use memory::MemoryBackend;
pub use metadata::{BlobMetadata, METADATA_SUFFIX};
pub use sniff::sniff_content_type;

use std::sync::Arc;

/// Create the configured backend
pub fn create_backend(config: &FilesConfig) -> Arc<dyn BlobBackend> {
    match config.backend {
        BlobBackendKind::Local => Arc::new(LocalBackend::new(config.root.clone())),
        BlobBackendKind::Memory => Arc::new(MemoryBackend::new()),
    }
}
