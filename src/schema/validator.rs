//! Schema validator for bicycle candidates
//!
//! Validation semantics:
//! - All required fields are present
//! - No undeclared fields exist
//! - Every present field satisfies its constraint
//!
//! Message order is fixed: field constraint messages in declaration order,
//! then missing required fields in declaration order, then undeclared
//! fields in key order.

use serde_json::{Map, Value};

use super::rules::{FieldRule, FIELD_RULES};

/// Message for a candidate that is not a JSON object
const NOT_AN_OBJECT: &str = "must be object";

/// Schema validator for bicycle candidates.
///
/// Stateless; validation never mutates the candidate.
#[derive(Debug, Clone, Copy)]
pub struct SchemaValidator {
    rules: &'static [FieldRule],
}

impl SchemaValidator {
    /// Creates a validator over the declared bicycle fields.
    pub fn new() -> Self {
        Self { rules: FIELD_RULES }
    }

    /// Validates a candidate and returns every violation message.
    ///
    /// An empty list means the candidate is valid.
    pub fn validate(&self, candidate: &Value) -> Vec<String> {
        match candidate.as_object() {
            Some(obj) => self.validate_object(obj),
            None => vec![NOT_AN_OBJECT.to_string()],
        }
    }

    /// Validates a candidate and reports whether it is valid.
    pub fn is_valid(&self, candidate: &Value) -> bool {
        self.validate(candidate).is_empty()
    }

    fn validate_object(&self, obj: &Map<String, Value>) -> Vec<String> {
        let mut messages = Vec::new();

        // Constraint violations on present fields
        for rule in self.rules {
            if let Some(value) = obj.get(rule.name) {
                if !rule.check.accepts(value) {
                    messages.push(rule.message.to_string());
                }
            }
        }

        // Missing required fields
        for rule in self.rules.iter().filter(|r| r.required) {
            if !obj.contains_key(rule.name) {
                messages.push(format!("must have required property '{}'", rule.name));
            }
        }

        // Undeclared fields
        for key in obj.keys() {
            if !self.rules.iter().any(|r| r.name == key) {
                messages.push(format!("must NOT have additional property '{}'", key));
            }
        }

        messages
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_candidate_passes() {
        let validator = SchemaValidator::new();
        let candidate = json!({
            "model": "Neu",
            "weight": 12,
            "kind": "MOUNTAIN_BIKE",
            "brand": "FOO_Brand",
            "price": 99.99
        });

        assert!(validator.validate(&candidate).is_empty());
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        let validator = SchemaValidator::new();
        let candidate = json!({ "model": "Neu", "kind": "", "brand": "Cube" });

        assert!(validator.is_valid(&candidate));
    }

    #[test]
    fn test_collects_all_violations_in_declaration_order() {
        let validator = SchemaValidator::new();
        let candidate = json!({
            "model": "!?$",
            "weight": -1,
            "kind": "INVISIBLE",
            "brand": "NO_BRAND"
        });

        let messages = validator.validate(&candidate);
        assert_eq!(
            messages,
            vec![
                "A model must start with a letter, a digit, or _",
                "The weight must be between 0 and 30",
                "The kind of a bicycle must be ROAD_BIKE, MOUNTAIN_BIKE, or TREKKING_BIKE",
            ]
        );
    }

    #[test]
    fn test_missing_required_fields() {
        let validator = SchemaValidator::new();
        let candidate = json!({ "weight": 10 });

        let messages = validator.validate(&candidate);
        assert_eq!(
            messages,
            vec![
                "must have required property 'model'",
                "must have required property 'kind'",
                "must have required property 'brand'",
            ]
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let validator = SchemaValidator::new();
        let candidate = json!({
            "model": "Neu",
            "kind": "ROAD_BIKE",
            "brand": "Cube",
            "color": "red"
        });

        let messages = validator.validate(&candidate);
        assert_eq!(messages, vec!["must NOT have additional property 'color'"]);
    }

    #[test]
    fn test_type_mismatch_uses_field_message() {
        let validator = SchemaValidator::new();
        let candidate = json!({
            "model": "Neu",
            "kind": "ROAD_BIKE",
            "brand": "Cube",
            "price": "100"
        });

        assert_eq!(
            validator.validate(&candidate),
            vec!["The price must be between 0 and 9999"]
        );
    }

    #[test]
    fn test_null_fails_constraint() {
        let validator = SchemaValidator::new();
        let candidate = json!({
            "model": "Neu",
            "kind": "ROAD_BIKE",
            "brand": null
        });

        assert_eq!(
            validator.validate(&candidate),
            vec!["The brand must start with a letter, a digit, or _"]
        );
    }

    #[test]
    fn test_non_object_rejected() {
        let validator = SchemaValidator::new();
        assert_eq!(validator.validate(&json!([1, 2])), vec!["must be object"]);
        assert_eq!(validator.validate(&json!("x")), vec!["must be object"]);
    }

    #[test]
    fn test_server_fields_accepted() {
        let validator = SchemaValidator::new();
        let candidate = json!({
            "id": "000000000000000000000001",
            "version": 3,
            "model": "Neu",
            "kind": "ROAD_BIKE",
            "brand": "Cube"
        });
        assert!(validator.is_valid(&candidate));

        let negative = json!({ "version": -1, "model": "Neu", "kind": "", "brand": "Cube" });
        assert_eq!(
            validator.validate(&negative),
            vec!["The version number must be at least 0"]
        );
    }

    #[test]
    fn test_validation_is_deterministic() {
        let validator = SchemaValidator::new();
        let candidate = json!({ "model": "?", "zzz": 1, "aaa": 2, "price": 1e6 });
        let first = validator.validate(&candidate);
        for _ in 0..50 {
            assert_eq!(validator.validate(&candidate), first);
        }
    }
}
