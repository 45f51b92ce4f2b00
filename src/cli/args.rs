//! CLI argument definitions using clap
//!
//! Commands:
//! - fahrrad init --config <path> [--admin-password <pw>] [--seed]
//! - fahrrad serve --config <path> [--port <port>]
//! - fahrrad hash-password <password>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bicycle catalog service
#[derive(Parser, Debug)]
#[command(name = "fahrrad")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a new configuration file with a fresh signing secret
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./fahrrad.json")]
        config: PathBuf,

        /// Create an `admin` user with this password
        #[arg(long)]
        admin_password: Option<String>,

        /// Load the test records on startup
        #[arg(long)]
        seed: bool,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./fahrrad.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the Argon2 hash of a password for the `auth.users` section
    HashPassword {
        password: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["fahrrad", "serve", "--config", "c.json", "--port", "8080"]).unwrap();
        match cli.command {
            Command::Serve { config, port } => {
                assert_eq!(config, PathBuf::from("c.json"));
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_init_defaults() {
        let cli = Cli::try_parse_from(["fahrrad", "init"]).unwrap();
        match cli.command {
            Command::Init { config, admin_password, seed } => {
                assert_eq!(config, PathBuf::from("./fahrrad.json"));
                assert!(admin_password.is_none());
                assert!(!seed);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_hash_password() {
        let cli = Cli::try_parse_from(["fahrrad", "hash-password", "secret"]).unwrap();
        assert!(matches!(cli.command, Command::HashPassword { password } if password == "secret"));
    }
}
