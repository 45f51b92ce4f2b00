//! CLI module for fahrrad
//!
//! Provides command-line interface for:
//! - init: write a configuration file
//! - serve: start the HTTP server
//! - hash-password: hash a password for the user list

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{hash_password, init, run, run_command, serve};
pub use errors::{CliError, CliResult};
pub use io::{write_error, write_json};
