//! # REST API Errors
//!
//! Maps the service outcomes onto status codes and bodies. Validation
//! failures travel as a JSON array of messages, precondition failures as
//! plain text.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::auth::AuthError;
use crate::files::BlobError;
use crate::service::{CreateError, FileFindError, FileSaveError, UpdateError};
use crate::storage::StoreError;

/// Result type for REST handlers
pub type RestResult<T> = Result<T, RestError>;

/// REST API errors
#[derive(Debug, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// `Accept` excludes both JSON and HTML
    #[error("Not Acceptable")]
    NotAcceptable,

    /// Resource not found; empty body
    #[error("Not Found")]
    NotFound,

    /// Not found with an explanation
    #[error("{0}")]
    NotFoundMessage(String),

    /// Malformed request (e.g. multipart without a `file` field)
    #[error("{0}")]
    BadRequest(String),

    /// Schema violations, reported in full
    #[error("constraint violations")]
    ConstraintViolations(Vec<String>),

    /// Model uniqueness violated
    #[error("The model \"{0}\" already exists")]
    ModelExists(String),

    /// A precondition on the record failed
    #[error("{0}")]
    PreconditionFailed(String),

    /// `If-Match` missing on an update
    #[error("Header \"If-Match\" is missing")]
    PreconditionRequired,

    /// Attachment exceeds the configured limit
    #[error("file of {0} bytes exceeds maximum of {1} bytes")]
    PayloadTooLarge(u64, u64),

    /// Request body exceeds the transport limit
    #[error("{0}")]
    BodyTooLarge(String),

    // ==================
    // Auth Errors
    // ==================
    #[error("{0}")]
    Auth(#[from] AuthError),

    // ==================
    // Server Errors (5xx)
    // ==================
    #[error("{0}")]
    Internal(String),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::NotAcceptable => StatusCode::NOT_ACCEPTABLE,
            RestError::NotFound | RestError::NotFoundMessage(_) => StatusCode::NOT_FOUND,
            RestError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RestError::ConstraintViolations(_) | RestError::ModelExists(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            RestError::PreconditionFailed(_) => StatusCode::PRECONDITION_FAILED,
            RestError::PreconditionRequired => StatusCode::PRECONDITION_REQUIRED,
            RestError::PayloadTooLarge(_, _) | RestError::BodyTooLarge(_) => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            RestError::Auth(auth_err) => {
                StatusCode::from_u16(auth_err.status_code()).unwrap_or(StatusCode::UNAUTHORIZED)
            }
            RestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body for auth failures
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        debug!(status = status.as_u16(), error = %self, "request failed");

        match self {
            RestError::NotAcceptable | RestError::NotFound => status.into_response(),
            RestError::ConstraintViolations(messages) => (status, Json(messages)).into_response(),
            RestError::Auth(auth_err) => auth_err.into_response(),
            RestError::Internal(details) => {
                error!(details = %details, "internal error");
                status.into_response()
            }
            other => (
                status,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                other.to_string(),
            )
                .into_response(),
        }
    }
}

impl From<StoreError> for RestError {
    fn from(err: StoreError) -> Self {
        RestError::Internal(err.to_string())
    }
}

impl From<BlobError> for RestError {
    fn from(err: BlobError) -> Self {
        match err {
            BlobError::FileTooLarge(size, max) => RestError::PayloadTooLarge(size, max),
            other => RestError::Internal(other.to_string()),
        }
    }
}

impl From<CreateError> for RestError {
    fn from(err: CreateError) -> Self {
        match err {
            CreateError::ConstraintViolations { messages } => RestError::ConstraintViolations(messages),
            CreateError::ModelExists { model } => RestError::ModelExists(model),
            CreateError::Storage(e) => e.into(),
        }
    }
}

impl From<UpdateError> for RestError {
    fn from(err: UpdateError) -> Self {
        match err {
            UpdateError::ConstraintViolations { messages } => RestError::ConstraintViolations(messages),
            UpdateError::ModelExists { model, .. } => RestError::ModelExists(model),
            UpdateError::FahrradNotExists { id } => {
                RestError::PreconditionFailed(format!("There is no bicycle with ID \"{}\".", id))
            }
            UpdateError::VersionInvalid { token } => RestError::PreconditionFailed(format!(
                "The version number \"{}\" is invalid.",
                token.unwrap_or_default()
            )),
            UpdateError::VersionOutdated { version, .. } => RestError::PreconditionFailed(format!(
                "The version number \"{}\" is outdated.",
                version
            )),
            UpdateError::Storage(e) => e.into(),
        }
    }
}

impl From<FileFindError> for RestError {
    fn from(err: FileFindError) -> Self {
        match err {
            FileFindError::FahrradNotExists { id } => {
                RestError::PreconditionFailed(format!("There is no bicycle with ID \"{}\".", id))
            }
            FileFindError::FileNotFound { id } => {
                RestError::NotFoundMessage(format!("There is no file for bicycle {}", id))
            }
            FileFindError::MultipleFiles { id } => {
                RestError::Internal(format!("more than one file for bicycle {}", id))
            }
            FileFindError::InvalidContentType { id } => {
                RestError::Internal(format!("invalid content type for bicycle {}", id))
            }
            FileFindError::Storage(e) => e.into(),
            FileFindError::Blob(e) => e.into(),
        }
    }
}

impl From<FileSaveError> for RestError {
    fn from(err: FileSaveError) -> Self {
        match err {
            FileSaveError::Storage(e) => e.into(),
            FileSaveError::Blob(e) => e.into(),
        }
    }
}
