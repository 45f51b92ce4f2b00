//! # Storage Filter Expressions
//!
//! A filter is an AND-list of field conditions evaluated against the JSON
//! projection of a stored record. Field names are the wire names
//! (`model`, `kind`, `brand`, `price`, `weight`, `id`, `version`).

use regex::Regex;
use serde_json::Value;

/// Condition applied to a single field
#[derive(Debug, Clone)]
pub enum FilterOperator {
    /// Equals; numbers compare numerically
    Eq(Value),

    /// String field matches a pattern
    Matches(Regex),

    /// Value is one of a list
    In(Vec<Value>),
}

/// A filter expression
#[derive(Debug, Clone)]
pub struct FilterExpr {
    /// Field to filter on
    pub field: String,

    /// Condition on the field
    pub operator: FilterOperator,
}

impl FilterExpr {
    /// Create an equality filter
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator: FilterOperator::Eq(value.into()),
        }
    }

    /// Create a pattern filter
    pub fn matches(field: impl Into<String>, pattern: Regex) -> Self {
        Self {
            field: field.into(),
            operator: FilterOperator::Matches(pattern),
        }
    }

    /// Create an "in list" filter
    pub fn in_list(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            field: field.into(),
            operator: FilterOperator::In(values),
        }
    }

    /// Check if a document matches this filter
    pub fn matches_document(&self, doc: &Value) -> bool {
        let Some(field_value) = doc.get(&self.field) else {
            return false;
        };

        match &self.operator {
            FilterOperator::Eq(expected) => values_equal(field_value, expected),
            FilterOperator::Matches(pattern) => field_value
                .as_str()
                .map(|s| pattern.is_match(s))
                .unwrap_or(false),
            FilterOperator::In(values) => values.iter().any(|v| values_equal(field_value, v)),
        }
    }
}

/// Numbers compare by value so that `12` matches `12.0`
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) if a.is_number() && b.is_number() => x == y,
        _ => a == b,
    }
}

/// Conjunction of filter expressions; empty matches everything
#[derive(Debug, Clone, Default)]
pub struct Filter {
    exprs: Vec<FilterExpr>,
}

impl Filter {
    /// Filter that matches every record
    pub fn all() -> Self {
        Self::default()
    }

    /// Builder-style: add an expression
    pub fn and(mut self, expr: FilterExpr) -> Self {
        self.exprs.push(expr);
        self
    }

    /// Add an expression in place
    pub fn push(&mut self, expr: FilterExpr) {
        self.exprs.push(expr);
    }

    /// Expressions of this filter
    pub fn exprs(&self) -> &[FilterExpr] {
        &self.exprs
    }

    /// Whether no expression constrains the result
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    /// Check if a document matches all expressions
    pub fn matches(&self, doc: &Value) -> bool {
        self.exprs.iter().all(|e| e.matches_document(doc))
    }
}

impl From<FilterExpr> for Filter {
    fn from(expr: FilterExpr) -> Self {
        Self::all().and(expr)
    }
}
