//! # Auth Module
//!
//! Configured users, Argon2 password hashes, HS256 access tokens and the
//! role checks guarding the write routes.

pub mod config;
pub mod crypto;
pub mod errors;
pub mod jwt;
pub mod principal;
pub mod role;
pub mod users;

pub use config::{AuthConfig, UserEntry};
pub use errors::{AuthError, AuthResult};
pub use jwt::{JwtClaims, JwtConfig, JwtManager, TokenResponse};
pub use principal::Principal;
pub use role::{Role, DELETE_ROLES, WRITE_ROLES};
pub use users::UserDirectory;
