//! Outcomes of the write path
//!
//! Closed unions consumed by the REST and GraphQL adapters. Infrastructure
//! faults travel in the `Storage` variants so adapters can still match
//! exhaustively.

use thiserror::Error;

use crate::entity::FahrradId;
use crate::files::BlobError;
use crate::storage::StoreError;

/// Why a create was rejected
#[derive(Debug, Error)]
pub enum CreateError {
    /// Schema validation failed; carries every message
    #[error("constraint violations: {}", messages.join("; "))]
    ConstraintViolations { messages: Vec<String> },

    /// Another record already uses this model
    #[error("the model {model:?} already exists")]
    ModelExists { model: String },

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Why an update was rejected
#[derive(Debug, Error)]
pub enum UpdateError {
    /// Schema validation failed; carries every message
    #[error("constraint violations: {}", messages.join("; "))]
    ConstraintViolations { messages: Vec<String> },

    /// A different record already uses this model
    #[error("the model {model:?} already exists")]
    ModelExists {
        model: String,
        id: Option<FahrradId>,
    },

    /// No record with this id, or the id is not well formed
    #[error("there is no bicycle with id {id}")]
    FahrradNotExists { id: String },

    /// The version token is absent or malformed
    #[error("invalid version token {token:?}")]
    VersionInvalid { token: Option<String> },

    /// The caller's version is older than the stored one
    #[error("version {version} of bicycle {id} is outdated")]
    VersionOutdated { id: String, version: u64 },

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Why an attachment could not be served
#[derive(Debug, Error)]
pub enum FileFindError {
    /// No record with this id
    #[error("there is no bicycle with id {id}")]
    FahrradNotExists { id: String },

    /// The record has no attachment
    #[error("no file for bicycle {id}")]
    FileNotFound { id: String },

    /// More than one attachment is stored for the record
    #[error("more than one file for bicycle {id}")]
    MultipleFiles { id: String },

    /// Metadata missing or naming an unusable content type
    #[error("invalid content type for bicycle {id}")]
    InvalidContentType { id: String },

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error(transparent)]
    Blob(#[from] BlobError),
}

/// Why an attachment could not be stored
#[derive(Debug, Error)]
pub enum FileSaveError {
    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error(transparent)]
    Blob(#[from] BlobError),
}
