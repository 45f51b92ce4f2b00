//! Schema validator for bicycle candidates
//!
//! Candidates arrive as untyped JSON. Validation collects every violation
//! rather than stopping at the first, and reports them as human-readable
//! messages whose wording is part of the external contract.
//!
//! # Design Principles
//!
//! - Unknown fields are rejected, never dropped
//! - No coercion (a numeric string is not a number)
//! - Deterministic message order (field declaration order)
//! - No side effects

mod rules;
mod validator;

pub use rules::{FieldCheck, FieldRule, MAX_PRICE, MAX_WEIGHT};
pub use validator::SchemaValidator;
