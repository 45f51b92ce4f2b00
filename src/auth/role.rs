//! Roles granted to catalog users

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::AuthError;

/// A role carried in access tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including deletion
    Admin,
    /// May create, update and upload
    #[serde(alias = "mitarbeiter")]
    Staff,
}

/// Roles that may create or update records and upload attachments
pub const WRITE_ROLES: &[Role] = &[Role::Admin, Role::Staff];

/// Roles that may delete records
pub const DELETE_ROLES: &[Role] = &[Role::Admin];

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "staff" | "mitarbeiter" => Ok(Role::Staff),
            _ => Err(AuthError::UnknownRole(s.to_string())),
        }
    }
}
