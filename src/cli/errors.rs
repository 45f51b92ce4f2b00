//! CLI-specific error types
//!
//! Every CLI error is fatal: it is printed and the process exits non-zero.

use thiserror::Error;

use crate::app::BootError;
use crate::auth::AuthError;
use crate::config::ConfigError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("boot failed: {0}")]
    Boot(#[from] BootError),

    #[error("HTTP server failed: {0}")]
    Server(#[source] std::io::Error),

    #[error("failed to initialise logging: {0}")]
    Logging(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Stable code printed alongside the message
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "FAHRRAD_CLI_CONFIG_ERROR",
            CliError::Boot(_) | CliError::Logging(_) => "FAHRRAD_CLI_BOOT_FAILED",
            CliError::Server(_) => "FAHRRAD_CLI_SERVER_FAILED",
            CliError::Auth(_) => "FAHRRAD_CLI_AUTH_ERROR",
            CliError::Io(_) | CliError::Json(_) => "FAHRRAD_CLI_IO_ERROR",
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let err = CliError::from(ConfigError::Invalid("x".into()));
        assert_eq!(err.code(), "FAHRRAD_CLI_CONFIG_ERROR");
        assert_eq!(err.to_string(), "invalid config: x");

        let err = CliError::from(AuthError::HashingFailed);
        assert_eq!(err.code(), "FAHRRAD_CLI_AUTH_ERROR");
    }
}
