//! CLI command implementations

use std::path::Path;

use serde_json::json;
use tracing::info;

use crate::app::Application;
use crate::auth::config::UserEntry;
use crate::auth::crypto::{self, generate_secret};
use crate::auth::Role;
use crate::config::AppConfig;
use crate::observability;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_json;

/// Length of the signing secret written by `init`
const GENERATED_SECRET_LEN: usize = 48;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init {
            config,
            admin_password,
            seed,
        } => init(&config, admin_password.as_deref(), seed),
        Command::Serve { config, port } => serve(&config, port),
        Command::HashPassword { password } => hash_password(&password),
    }
}

/// Configuration written by `init`
pub fn initial_config(admin_password: Option<&str>, seed: bool) -> CliResult<AppConfig> {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = generate_secret(GENERATED_SECRET_LEN);
    config.database.seed_test_data = seed;

    if let Some(password) = admin_password {
        config.auth.users.push(UserEntry {
            username: "admin".to_string(),
            password_hash: crypto::hash_password(password)?,
            roles: vec![Role::Admin, Role::Staff],
        });
    }

    Ok(config)
}

/// Write a new configuration file
///
/// Refuses to overwrite an existing file.
pub fn init(config_path: &Path, admin_password: Option<&str>, seed: bool) -> CliResult<()> {
    let config = initial_config(admin_password, seed)?;
    config.write_new(config_path)?;

    write_json(&json!({
        "initialized": true,
        "config": config_path.display().to_string(),
        "users": config.auth.users.len(),
    }))
}

/// Load the configuration and serve HTTP until Ctrl-C
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = AppConfig::load(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }

    observability::init(&config.log).map_err(|e| CliError::Logging(e.to_string()))?;
    info!(config = %config_path.display(), "starting");

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let app = Application::build(config).await?;
        app.into_server().start().await.map_err(CliError::Server)
    })
}

/// Print the Argon2 hash of `password`
pub fn hash_password(password: &str) -> CliResult<()> {
    let hash = crypto::hash_password(password)?;
    write_json(&json!({ "password_hash": hash }))
}
