//! Declared fields of a bicycle and their constraints

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Upper bound for `weight` (kg, inclusive)
pub const MAX_WEIGHT: f64 = 30.0;

/// Upper bound for `price` (inclusive)
pub const MAX_PRICE: f64 = 9999.0;

static LEADING_WORD_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_].*").expect("static pattern compiles"));

/// Constraint applied to a present, non-null field value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldCheck {
    /// Any string
    AnyString,
    /// String starting with a letter, a digit, or `_`
    LeadingWordChar,
    /// Integer >= 0
    NonNegativeInt,
    /// Number within a range; the lower bound may be exclusive
    Range { min: f64, min_exclusive: bool, max: f64 },
    /// One of a fixed set of strings
    OneOf(&'static [&'static str]),
}

impl FieldCheck {
    /// Whether `value` satisfies this check
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldCheck::AnyString => value.is_string(),
            FieldCheck::LeadingWordChar => value
                .as_str()
                .map(|s| LEADING_WORD_CHAR.is_match(s))
                .unwrap_or(false),
            FieldCheck::NonNegativeInt => value.is_u64(),
            FieldCheck::Range { min, min_exclusive, max } => match value.as_f64() {
                Some(n) if *min_exclusive => n > *min && n <= *max,
                Some(n) => n >= *min && n <= *max,
                None => false,
            },
            FieldCheck::OneOf(allowed) => value
                .as_str()
                .map(|s| allowed.contains(&s))
                .unwrap_or(false),
        }
    }
}

/// A declared field
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub required: bool,
    pub check: FieldCheck,
    pub message: &'static str,
}

/// Allowed values of `kind`; "" means unset
pub const KIND_VALUES: &[&str] = &["MOUNTAIN_BIKE", "ROAD_BIKE", "TREKKING_BIKE", ""];

/// All declared fields, in declaration order
pub const FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        name: "id",
        required: false,
        check: FieldCheck::AnyString,
        message: "The id must be a string",
    },
    FieldRule {
        name: "version",
        required: false,
        check: FieldCheck::NonNegativeInt,
        message: "The version number must be at least 0",
    },
    FieldRule {
        name: "model",
        required: true,
        check: FieldCheck::LeadingWordChar,
        message: "A model must start with a letter, a digit, or _",
    },
    FieldRule {
        name: "weight",
        required: false,
        check: FieldCheck::Range { min: 0.0, min_exclusive: true, max: MAX_WEIGHT },
        message: "The weight must be between 0 and 30",
    },
    FieldRule {
        name: "kind",
        required: true,
        check: FieldCheck::OneOf(KIND_VALUES),
        message: "The kind of a bicycle must be ROAD_BIKE, MOUNTAIN_BIKE, or TREKKING_BIKE",
    },
    FieldRule {
        name: "brand",
        required: true,
        check: FieldCheck::LeadingWordChar,
        message: "The brand must start with a letter, a digit, or _",
    },
    FieldRule {
        name: "price",
        required: false,
        check: FieldCheck::Range { min: 0.0, min_exclusive: false, max: MAX_PRICE },
        message: "The price must be between 0 and 9999",
    },
];
