//! fahrrad CLI entry point
//!
//! Parses arguments, dispatches to the CLI commands and exits non-zero
//! with a JSON error on stderr when a command fails.

use fahrrad::cli;

fn main() {
    if let Err(e) = cli::run() {
        cli::write_error(&e);
        std::process::exit(1);
    }
}
