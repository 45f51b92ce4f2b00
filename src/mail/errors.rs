//! Mail errors

use thiserror::Error;

/// Result type for mail operations
pub type MailResult<T> = Result<T, MailError>;

/// Notification mail errors
#[derive(Debug, Error)]
pub enum MailError {
    /// Sender or recipient could not be parsed
    #[error("invalid mailbox {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    /// Message could not be assembled
    #[error("failed to build mail: {0}")]
    Build(String),

    /// SMTP transport could not be created
    #[error("SMTP relay error: {0}")]
    Transport(String),

    /// Delivery failed
    #[error("failed to send mail: {0}")]
    Send(String),
}
