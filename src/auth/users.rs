//! Directory of configured users

use std::collections::HashMap;

use tracing::{debug, instrument};

use super::config::UserEntry;
use super::crypto::verify_password;
use super::errors::{AuthError, AuthResult};
use super::jwt::{JwtManager, TokenResponse};

/// Username to account lookup plus login
pub struct UserDirectory {
    users: HashMap<String, UserEntry>,
    jwt: JwtManager,
}

impl UserDirectory {
    pub fn new(users: Vec<UserEntry>, jwt: JwtManager) -> Self {
        let users = users
            .into_iter()
            .map(|u| (u.username.clone(), u))
            .collect();
        Self { users, jwt }
    }

    /// Verify credentials and issue an access token
    #[instrument(skip(self, password))]
    pub fn login(&self, username: &str, password: &str) -> AuthResult<TokenResponse> {
        let user = self.users.get(username).ok_or_else(|| {
            debug!("unknown user");
            AuthError::InvalidCredentials
        })?;

        if !verify_password(password, &user.password_hash) {
            debug!("password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        self.jwt.generate_access_token(&user.username, &user.roles)
    }

    /// Number of configured users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
