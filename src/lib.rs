//! fahrrad - bicycle catalog service
//!
//! Validated, version-checked writes over a record store with a unique
//! model index, a filter-based query engine, a REST adapter with HAL
//! bodies and ETags, GraphQL resolvers, attachments and JWT auth.

pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod dev;
pub mod entity;
pub mod files;
pub mod graphql;
pub mod http_server;
pub mod mail;
pub mod observability;
pub mod rest_api;
pub mod schema;
pub mod service;
pub mod storage;
pub mod version;
