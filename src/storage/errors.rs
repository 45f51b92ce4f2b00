//! Storage error types
//!
//! Every fault the record store can raise. `DuplicateModel` is the unique
//! index on `model`; `Corruption` is fatal when raised while opening a log
//! and `Halted` once a torn append could not be cut away.

use std::io;

use thiserror::Error;

use crate::entity::FahrradId;

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage error
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another record already owns this model
    #[error("model {model:?} is already taken by {id}")]
    DuplicateModel { model: String, id: FahrradId },

    /// A record with this id already exists
    #[error("a record with id {0} already exists")]
    DuplicateId(FahrradId),

    /// Checksum or framing failure in the record log
    #[error("corrupted record at offset {offset}: {details}")]
    Corruption { offset: u64, details: String },

    /// Disk I/O failure
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// Document could not be encoded or decoded
    #[error("document encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    /// A writer panicked while holding the store lock
    #[error("storage lock poisoned")]
    Poisoned,

    /// An earlier append could not be rolled back; the log takes no writes
    #[error("record log halted after an unrecoverable write failure")]
    Halted,

    /// A blocking storage task did not complete
    #[error("storage task failed: {0}")]
    Task(String),
}

impl StoreError {
    /// Wrap an I/O error with context
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Corruption detected at a byte offset
    pub fn corruption_at_offset(offset: u64, details: impl Into<String>) -> Self {
        Self::Corruption {
            offset,
            details: details.into(),
        }
    }

    /// Whether the store must not be used after this error
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Corruption { .. } | Self::Poisoned | Self::Halted)
    }
}
