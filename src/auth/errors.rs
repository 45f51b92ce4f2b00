//! # Auth Errors
//!
//! Error types for the authentication module.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication and authorization errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Unknown user or wrong password (deliberately indistinguishable)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No bearer token on a protected route
    #[error("Authentication required")]
    AuthenticationRequired,

    /// JWT token is malformed
    #[error("Malformed token")]
    MalformedToken,

    /// JWT token has expired
    #[error("Token expired")]
    TokenExpired,

    /// JWT signature is invalid
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Authenticated, but none of the required roles
    #[error("Forbidden")]
    Forbidden,

    /// Unknown role name
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Password hashing failed
    #[error("Internal error: password hashing failed")]
    HashingFailed,

    /// Token generation failed
    #[error("Internal error: token generation failed")]
    TokenGenerationFailed,
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::UnknownRole(_) => 400,

            AuthError::InvalidCredentials
            | AuthError::AuthenticationRequired
            | AuthError::MalformedToken
            | AuthError::TokenExpired
            | AuthError::InvalidSignature => 401,

            AuthError::Forbidden => 403,

            AuthError::HashingFailed | AuthError::TokenGenerationFailed => 500,
        }
    }

    /// Whether the caller is at fault (logged at debug, not error)
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AuthError::InvalidCredentials.status_code(), 401);
        assert_eq!(AuthError::TokenExpired.status_code(), 401);
        assert_eq!(AuthError::Forbidden.status_code(), 403);
        assert_eq!(AuthError::HashingFailed.status_code(), 500);
        assert!(!AuthError::TokenGenerationFailed.is_client_error());
    }

    #[test]
    fn test_invalid_credentials_does_not_leak_info() {
        let err = AuthError::InvalidCredentials;
        assert!(!err.to_string().contains("password"));
        assert!(!err.to_string().contains("user"));
    }
}
