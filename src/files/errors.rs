//! # Blob Storage Errors

use thiserror::Error;

/// Result type for blob operations
pub type BlobResult<T> = Result<T, BlobError>;

/// Blob storage errors
#[derive(Debug, Clone, Error)]
pub enum BlobError {
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("File too large: {0} bytes (max: {1})")]
    FileTooLarge(u64, u64),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),
}

impl BlobError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            BlobError::ObjectNotFound(_) => 404,
            BlobError::FileTooLarge(_, _) => 413,
            BlobError::IoError(_) | BlobError::InvalidMetadata(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(BlobError::ObjectNotFound("x".into()).status_code(), 404);
        assert_eq!(BlobError::FileTooLarge(10, 5).status_code(), 413);
        assert_eq!(BlobError::IoError("disk".into()).status_code(), 500);
    }
}
