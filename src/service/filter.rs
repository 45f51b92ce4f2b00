//! Query parameter normalization
//!
//! Turns loosely typed query parameters into a storage filter:
//!
//! - `kind`, `brand`, `price`, `weight` are exact matches
//! - `model` shorter than 10 characters is a case-insensitive pattern,
//!   longer values match exactly
//! - `mountainBike=true` / `roadBike=true` become `kind IN (...)` and
//!   replace any literal `kind`
//!
//! Any other key, or a numeric field that does not parse, makes the whole
//! query unsatisfiable. That is an empty result, not an error.

use std::collections::BTreeMap;

use regex::{Regex, RegexBuilder};
use serde_json::{Number, Value};
use tracing::debug;

use crate::entity::FahrradKind;
use crate::storage::{Filter, FilterExpr};

/// `model` values shorter than this are matched as patterns
pub const MODEL_PATTERN_THRESHOLD: usize = 10;

/// Compiled pattern size cap for caller-supplied `model` patterns
const PATTERN_SIZE_LIMIT: usize = 1 << 16;

const EXACT_FIELDS: &[&str] = &["kind", "brand", "price", "weight"];
const NUMERIC_FIELDS: &[&str] = &["price", "weight"];
const MOUNTAIN_BIKE: &str = "mountainBike";
const ROAD_BIKE: &str = "roadBike";

/// Normalize query parameters
///
/// `None` means no record can match.
pub fn normalize(params: &BTreeMap<String, String>) -> Option<Filter> {
    let mut filter = Filter::all();
    let mut kinds = Vec::new();
    let mut literal_kind = None;

    for (key, value) in params {
        match key.as_str() {
            "model" => filter.push(model_expr(value)?),
            MOUNTAIN_BIKE => {
                if value == "true" {
                    kinds.push(FahrradKind::MountainBike);
                }
            }
            ROAD_BIKE => {
                if value == "true" {
                    kinds.push(FahrradKind::RoadBike);
                }
            }
            "kind" => literal_kind = Some(value.clone()),
            field if NUMERIC_FIELDS.contains(&field) => {
                let number = value
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64);
                let Some(number) = number else {
                    debug!(field, value = %value, "unparsable numeric filter");
                    return None;
                };
                filter.push(FilterExpr::eq(field, Value::Number(number)));
            }
            field if EXACT_FIELDS.contains(&field) => {
                filter.push(FilterExpr::eq(field, value.as_str()));
            }
            other => {
                debug!(key = other, "unknown filter property");
                return None;
            }
        }
    }

    if !kinds.is_empty() {
        let values = kinds.iter().map(|k| Value::from(k.as_str())).collect();
        filter.push(FilterExpr::in_list("kind", values));
    } else if let Some(kind) = literal_kind {
        filter.push(FilterExpr::eq("kind", kind));
    }

    Some(filter)
}

fn model_expr(model: &str) -> Option<FilterExpr> {
    if model.chars().count() >= MODEL_PATTERN_THRESHOLD {
        return Some(FilterExpr::eq("model", model));
    }
    model_pattern(model).map(|p| FilterExpr::matches("model", p))
}

/// Case-insensitive pattern; invalid syntax falls back to a literal substring
fn model_pattern(model: &str) -> Option<Regex> {
    let build = |pattern: &str| {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()
    };

    match build(model) {
        Ok(regex) => Some(regex),
        Err(e) => {
            debug!(model, error = %e, "model pattern rejected, matching literally");
            build(&regex::escape(model)).ok()
        }
    }
}
