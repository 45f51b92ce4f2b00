//! Authentication configuration

use serde::{Deserialize, Serialize};

use super::role::Role;

/// A configured user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    pub username: String,

    /// Argon2 PHC string, see `fahrrad hash-password`
    pub password_hash: String,

    #[serde(default)]
    pub roles: Vec<Role>,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret
    #[serde(default)]
    pub jwt_secret: String,

    /// Access token lifetime in seconds (default: 3600)
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,

    /// Token issuer (default: "fahrrad")
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Token audience (default: "fahrrad-api")
    #[serde(default = "default_audience")]
    pub audience: String,

    #[serde(default)]
    pub users: Vec<UserEntry>,
}

/// Minimum length of the signing secret
pub const MIN_SECRET_LEN: usize = 32;

fn default_token_ttl_secs() -> i64 {
    3600
}

fn default_issuer() -> String {
    "fahrrad".to_string()
}

fn default_audience() -> String {
    "fahrrad-api".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_secs: default_token_ttl_secs(),
            issuer: default_issuer(),
            audience: default_audience(),
            users: Vec::new(),
        }
    }
}

impl AuthConfig {
    /// JWT settings derived from this section
    pub fn jwt_config(&self) -> super::jwt::JwtConfig {
        super::jwt::JwtConfig {
            secret: self.jwt_secret.clone(),
            access_token_ttl: chrono::Duration::seconds(self.token_ttl_secs),
            issuer: self.issuer.clone(),
            audience: self.audience.clone(),
        }
    }
}
