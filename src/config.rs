//! Application configuration
//!
//! One JSON file with a section per subsystem. Every field has a default,
//! so `{}` is a complete (if insecure) configuration; `validate` rejects
//! what cannot be served.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::config::MIN_SECRET_LEN;
use crate::auth::AuthConfig;
use crate::files::{BlobBackendKind, FilesConfig};
use crate::http_server::HttpServerConfig;
use crate::mail::MailConfig;
use crate::observability::LogConfig;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config {0} already exists")]
    AlreadyExists(PathBuf),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Record store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackendKind {
    Memory,
    Log,
}

/// Record store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Backend (default: log)
    #[serde(default = "default_store_backend")]
    pub backend: StoreBackendKind,

    /// Directory of the record log (default: "./data")
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Insert the test records on startup (default: false)
    #[serde(default)]
    pub seed_test_data: bool,
}

fn default_store_backend() -> StoreBackendKind {
    StoreBackendKind::Log
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            data_dir: default_data_dir(),
            seed_test_data: false,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub files: FilesConfig,

    #[serde(default)]
    pub mail: MailConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: AppConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> ConfigResult<()> {
        if self.auth.jwt_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Invalid(format!(
                "auth.jwt_secret must be at least {} characters",
                MIN_SECRET_LEN
            )));
        }

        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be > 0".into()));
        }

        if self.files.max_size_bytes == 0 {
            return Err(ConfigError::Invalid("files.max_size_bytes must be > 0".into()));
        }

        if self.database.backend == StoreBackendKind::Log
            && self.database.data_dir.as_os_str().is_empty()
        {
            return Err(ConfigError::Invalid("database.data_dir must not be empty".into()));
        }

        if self.files.backend == BlobBackendKind::Local && self.files.root.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("files.root must not be empty".into()));
        }

        for user in &self.auth.users {
            if user.username.is_empty() {
                return Err(ConfigError::Invalid("auth.users: empty username".into()));
            }
            if user.roles.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "auth.users: user {} has no roles",
                    user.username
                )));
            }
        }

        Ok(())
    }

    /// Write this configuration as pretty JSON; refuses to overwrite
    pub fn write_new(&self, path: &Path) -> ConfigResult<()> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
