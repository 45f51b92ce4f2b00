//! Authenticated caller extracted from `Authorization: Bearer <token>`

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error};

use super::errors::AuthError;
use super::jwt::JwtManager;
use super::role::Role;

/// Caller identity taken from a validated access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub roles: Vec<Role>,
}

impl Principal {
    /// Succeeds when the caller holds at least one of `allowed`
    pub fn require_any(&self, allowed: &[Role]) -> Result<(), AuthError> {
        if self.roles.iter().any(|r| allowed.contains(r)) {
            Ok(())
        } else {
            debug!(username = %self.username, "role check failed");
            Err(AuthError::Forbidden)
        }
    }
}

/// Extract the token from an `Authorization` header value
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    Arc<JwtManager>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthError::AuthenticationRequired)?;
        let jwt = Arc::<JwtManager>::from_ref(state);
        let claims = jwt.validate_token(token)?;

        Ok(Principal {
            username: claims.sub,
            roles: claims.roles,
        })
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    code: u16,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let code = self.status_code();
        if self.is_client_error() {
            debug!(code, error = %self, "request rejected");
        } else {
            error!(code, error = %self, "authentication failure");
        }
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
                code,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(roles: Vec<Role>) -> Principal {
        Principal {
            username: "u".into(),
            roles,
        }
    }

    #[test]
    fn test_require_any() {
        assert!(principal(vec![Role::Staff]).require_any(&[Role::Admin, Role::Staff]).is_ok());
        assert_eq!(
            principal(vec![Role::Staff]).require_any(&[Role::Admin]),
            Err(AuthError::Forbidden)
        );
        assert!(principal(vec![]).require_any(&[Role::Staff]).is_err());
    }

    #[test]
    fn test_error_response_status() {
        assert_eq!(
            AuthError::AuthenticationRequired.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::Forbidden.into_response().status(), StatusCode::FORBIDDEN);
    }
}
