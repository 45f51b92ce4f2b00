//! Logging for the fahrrad service
//!
//! `tracing` events from every module are collected by one
//! `tracing-subscriber` registry configured from the `log` section.
//!
//! # Usage
//!
//! ```ignore
//! use fahrrad::observability::{self, LogConfig};
//!
//! observability::init(&LogConfig::default())?;
//! tracing::info!(port = 3000, "listening");
//! ```

mod config;
mod logger;

pub use config::{LogConfig, LogFormat};
pub use logger::{env_filter, init};
