//! # HTTP Server Module
//!
//! Axum server hosting the bicycle catalog.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/*` - Bicycle REST API
//! - `/file/*` - Attachments
//! - `/auth/login` - Access tokens

pub mod config;
pub mod health_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
