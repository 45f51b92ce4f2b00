//! # Blob Backend Trait

use super::errors::BlobResult;

/// Backend trait for attachment blobs
///
/// Paths are `/`-separated and relative to the backend root.
pub trait BlobBackend: Send + Sync + std::fmt::Debug {
    /// Write data to path, replacing any previous content
    fn write(&self, path: &str, data: &[u8]) -> BlobResult<()>;

    /// Read data from path
    fn read(&self, path: &str) -> BlobResult<Vec<u8>>;

    /// Delete file at path
    fn delete(&self, path: &str) -> BlobResult<()>;

    /// List file names directly below `prefix`, sorted
    fn list(&self, prefix: &str) -> BlobResult<Vec<String>>;
}
