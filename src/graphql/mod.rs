//! # GraphQL Resolvers
//!
//! Resolver layer for the `fahrrad`/`fahrraeder` queries and the
//! `create`/`update`/`delete` mutations. Parsing and executing GraphQL
//! documents is left to the transport.

mod errors;
mod mutation;
mod query;

pub use errors::{ResolverError, ResolverResult, UserInputError};
pub use mutation::{FahrradUpdateInput, MutationResolver};
pub use query::{FahrradOutput, QueryResolver};
