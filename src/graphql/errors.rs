//! Resolver errors

use thiserror::Error;

use crate::auth::AuthError;
use crate::service::{CreateError, UpdateError};
use crate::storage::StoreError;

/// A failure the client can act on, reported with its message only
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct UserInputError {
    pub message: String,
}

impl UserInputError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors surfaced by the resolvers
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error(transparent)]
    UserInput(#[from] UserInputError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ResolverError {
    /// Error code in the `extensions` of a GraphQL error
    pub fn code(&self) -> &'static str {
        match self {
            ResolverError::UserInput(_) => "BAD_USER_INPUT",
            ResolverError::Auth(AuthError::Forbidden) => "FORBIDDEN",
            ResolverError::Auth(_) => "UNAUTHENTICATED",
            ResolverError::Storage(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

pub type ResolverResult<T> = Result<T, ResolverError>;

fn model_exists(model: &str) -> String {
    format!("The model \"{}\" already exists", model)
}

impl From<CreateError> for ResolverError {
    fn from(err: CreateError) -> Self {
        match err {
            CreateError::ConstraintViolations { messages } => UserInputError::new(messages.join(" ")).into(),
            CreateError::ModelExists { model } => UserInputError::new(model_exists(&model)).into(),
            CreateError::Storage(e) => e.into(),
        }
    }
}

impl From<UpdateError> for ResolverError {
    fn from(err: UpdateError) -> Self {
        let message = match err {
            UpdateError::ConstraintViolations { messages } => messages.join(" "),
            UpdateError::ModelExists { model, .. } => model_exists(&model),
            UpdateError::FahrradNotExists { id } => format!("There is no bicycle with ID {}", id),
            UpdateError::VersionInvalid { token } => {
                format!("\"{}\" is not a valid version number", token.unwrap_or_default())
            }
            UpdateError::VersionOutdated { version, .. } => {
                format!("The version number \"{}\" is outdated", version)
            }
            UpdateError::Storage(e) => return e.into(),
        };
        UserInputError::new(message).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violations_joined_by_space() {
        let err = ResolverError::from(CreateError::ConstraintViolations {
            messages: vec!["a.".into(), "b.".into()],
        });
        assert_eq!(err.to_string(), "a. b.");
        assert_eq!(err.code(), "BAD_USER_INPUT");
    }

    #[test]
    fn test_update_messages() {
        let err = ResolverError::from(UpdateError::VersionInvalid {
            token: Some("\"x\"".into()),
        });
        assert_eq!(err.to_string(), "\"\"x\"\" is not a valid version number");

        let err = ResolverError::from(UpdateError::FahrradNotExists { id: "42".into() });
        assert_eq!(err.to_string(), "There is no bicycle with ID 42");
    }

    #[test]
    fn test_codes() {
        assert_eq!(ResolverError::from(AuthError::Forbidden).code(), "FORBIDDEN");
        assert_eq!(
            ResolverError::from(AuthError::AuthenticationRequired).code(),
            "UNAUTHENTICATED"
        );
        assert_eq!(ResolverError::from(StoreError::Poisoned).code(), "INTERNAL_SERVER_ERROR");
    }
}
