//! Schema validation for outgoing documents.
//!
//! Every mutating operation runs its input through [`validate`] before a
//! single request is issued. A document that fails is never sent.
//!
//! Schemas are static tables of [`FieldRule`]s (see [`schemas`]), walked by
//! one generic function. Violations carry the concrete path of the
//! offending value, e.g. `variants[1].price`.
//!
//! # Example
//!
//! ```rust
//! use shopify_admin::validation::{validate, SchemaName};
//! use serde_json::json;
//!
//! let result = validate(
//!     SchemaName::CreateProduct,
//!     &json!({"title": "Hat", "variants": [{"price": "10.00"}, {"price": "ten"}]}),
//! );
//!
//! assert!(!result.is_ok());
//! assert_eq!(result.violations()[0].path, "variants[1].price");
//! ```

mod rules;
pub mod schemas;

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use rules::{Constraint, FieldRule, Mode, PatternKind, Presence, ValueKind};
pub use schemas::SchemaName;

/// A single field-level failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Path to the offending value.
    pub path: String,
    /// What is wrong with it.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// The outcome of validating one document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationResult {
    violations: Vec<Violation>,
}

impl ValidationResult {
    /// Returns `true` when no violations were found.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns the violations in document order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Converts a failed result into a [`ValidationError`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Failed`] if any violation was recorded.
    pub fn into_result(self, schema: SchemaName) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Failed {
                schema,
                violations: self.violations,
            })
        }
    }

    fn push(&mut self, path: String, message: impl Into<String>) {
        let violation = Violation {
            path,
            message: message.into(),
        };
        if !self.violations.contains(&violation) {
            self.violations.push(violation);
        }
    }
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors produced by the validation gate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The document violated its schema.
    #[error("Document failed {schema} validation: {}", format_violations(.violations))]
    Failed {
        /// The schema that was applied.
        schema: SchemaName,
        /// Every violation found.
        violations: Vec<Violation>,
    },

    /// No schema exists under the given name.
    #[error("Unknown validation schema: {name}")]
    UnknownSchema {
        /// The name that was looked up.
        name: String,
    },
}

/// Validates `document` against `schema`.
///
/// The document is only read. A document that is not a JSON object fails
/// with a single violation at the root path.
#[must_use]
pub fn validate(schema: SchemaName, document: &Value) -> ValidationResult {
    let mut result = ValidationResult::default();
    let mode = schema.mode();

    match document.as_object() {
        Some(_) => {
            for table in schema.tables() {
                check_object(table, document, "", mode, &mut result);
            }
        }
        None => result.push("$".to_string(), "must be an object"),
    }

    result
}

/// Validates `document` and fails on any violation.
///
/// # Errors
///
/// Returns [`ValidationError::Failed`] with every violation found.
pub fn ensure_valid(schema: SchemaName, document: &Value) -> Result<(), ValidationError> {
    validate(schema, document).into_result(schema)
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn check_object(
    rules: &[FieldRule],
    object: &Value,
    prefix: &str,
    mode: Mode,
    result: &mut ValidationResult,
) {
    for rule in rules {
        let path = join_path(prefix, rule.name);
        match object.get(rule.name) {
            None | Some(Value::Null) => {
                if rule.presence.required_for(mode, object) {
                    result.push(path, "is required");
                }
            }
            Some(value) => check_value(rule, value, &path, mode, result),
        }
    }
}

fn check_value(rule: &FieldRule, value: &Value, path: &str, mode: Mode, result: &mut ValidationResult) {
    let type_error = || format!("must be {}", rule.kind.describe());

    match rule.kind {
        ValueKind::Text => match value.as_str() {
            Some(s) if s.trim().is_empty() && rule.presence.required_in(mode) => {
                result.push(path.to_string(), "must not be blank");
                return;
            }
            Some(_) => {}
            None => return result.push(path.to_string(), type_error()),
        },
        ValueKind::Integer => {
            if !(value.is_i64() || value.is_u64()) {
                return result.push(path.to_string(), type_error());
            }
        }
        ValueKind::Number => {
            if !value.is_number() {
                return result.push(path.to_string(), type_error());
            }
        }
        ValueKind::Decimal => {
            let numeric = value.is_number()
                || value
                    .as_str()
                    .is_some_and(|s| s.trim().parse::<f64>().is_ok());
            if !numeric {
                return result.push(path.to_string(), type_error());
            }
        }
        ValueKind::Boolean => {
            if !value.is_boolean() {
                return result.push(path.to_string(), type_error());
            }
        }
        ValueKind::Identifier => {
            let valid = value.as_u64().is_some_and(|id| id > 0)
                || value.as_str().is_some_and(|s| !s.trim().is_empty());
            if !valid {
                return result.push(path.to_string(), type_error());
            }
        }
        ValueKind::TextList => {
            let valid = value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string));
            if !valid {
                return result.push(path.to_string(), type_error());
            }
        }
        ValueKind::ListOf(nested) => {
            let Some(items) = value.as_array() else {
                return result.push(path.to_string(), type_error());
            };
            for (index, item) in items.iter().enumerate() {
                let item_path = format!("{path}[{index}]");
                if item.is_object() {
                    check_object(nested, item, &item_path, mode, result);
                } else {
                    result.push(item_path, "must be an object");
                }
            }
            return;
        }
        ValueKind::Object(nested) => {
            if !value.is_object() {
                return result.push(path.to_string(), type_error());
            }
            check_object(nested, value, path, mode, result);
            return;
        }
    }

    if let Some(constraint) = rule.constraint {
        check_constraint(constraint, value, path, result);
    }
}

fn check_constraint(constraint: Constraint, value: &Value, path: &str, result: &mut ValidationResult) {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    match constraint {
        Constraint::OneOf(allowed) => {
            if !allowed.contains(&text.as_str()) {
                result.push(
                    path.to_string(),
                    format!("must be one of: {}", allowed.join(", ")),
                );
            }
        }
        Constraint::Pattern(pattern) => {
            if !pattern.regex().is_match(&text) {
                result.push(path.to_string(), format!("must be {}", pattern.describe()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(result: &ValidationResult) -> Vec<&str> {
        result.violations().iter().map(|v| v.path.as_str()).collect()
    }

    #[test]
    fn test_create_product_requires_title() {
        let result = validate(SchemaName::CreateProduct, &json!({"vendor": "Acme"}));
        assert_eq!(paths(&result), vec!["title"]);
        assert_eq!(result.violations()[0].message, "is required");

        let blank = validate(SchemaName::CreateProduct, &json!({"title": "  "}));
        assert_eq!(blank.violations()[0].message, "must not be blank");
    }

    #[test]
    fn test_update_product_requires_id_but_not_title() {
        let result = validate(SchemaName::UpdateProduct, &json!({"body_html": "<p>x</p>"}));
        assert_eq!(paths(&result), vec!["id"]);

        let result = validate(
            SchemaName::UpdateProduct,
            &json!({"id": 632_910_392, "body_html": "<p>x</p>"}),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_minimal_create_product_passes() {
        let result = validate(
            SchemaName::CreateProduct,
            &json!({"title": "Test", "variants": [], "options": []}),
        );
        assert!(result.is_ok(), "{:?}", result.violations());
    }

    #[test]
    fn test_nested_violations_report_concrete_paths() {
        let result = validate(
            SchemaName::CreateProduct,
            &json!({
                "title": "Shirt",
                "status": "published",
                "images": [{"src": "https://cdn.example.com/a.png"}, {"src": "ftp://x"}],
                "variants": [
                    {"price": "10.00", "weight_unit": "kg"},
                    {"price": "10.005", "weight_unit": "stone"},
                    {"sku": "NO-PRICE"}
                ]
            }),
        );

        assert_eq!(
            paths(&result),
            vec![
                "status",
                "images[1].src",
                "variants[1].price",
                "variants[1].weight_unit",
                "variants[2].price",
            ]
        );
    }

    #[test]
    fn test_weight_requires_unit() {
        let result = validate(
            SchemaName::CreateProduct,
            &json!({
                "title": "Anvil",
                "variants": [
                    {"price": "10.00", "weight": 40.0},
                    {"price": "10.00", "weight": 40.0, "weight_unit": "kg"},
                    {"price": "10.00", "weight_unit": "kg"}
                ]
            }),
        );
        assert_eq!(paths(&result), vec!["variants[0].weight_unit"]);
        assert_eq!(result.violations()[0].message, "is required");
    }

    #[test]
    fn test_numeric_prices_are_checked_against_pattern() {
        let ok = validate(SchemaName::CreateVariant, &json!({"price": 19.99}));
        assert!(ok.is_ok());

        let bad = validate(SchemaName::CreateVariant, &json!({"price": 19.999}));
        assert_eq!(paths(&bad), vec!["price"]);
    }

    #[test]
    fn test_update_variant_requires_id_once() {
        let result = validate(SchemaName::UpdateVariant, &json!({"price": "5.00"}));
        assert_eq!(paths(&result), vec!["id"]);

        let result = validate(SchemaName::UpdateVariant, &json!({"id": true}));
        assert_eq!(result.violations().len(), 1);
    }

    #[test]
    fn test_cancel_reason_enumeration() {
        let result = validate(
            SchemaName::CancelOrder,
            &json!({"order_id": "123", "reason": "MAYBE"}),
        );
        assert_eq!(paths(&result), vec!["reason"]);
        assert!(result.violations()[0].message.contains("CUSTOMER"));

        let result = validate(
            SchemaName::CancelOrder,
            &json!({"order_id": "123", "reason": "FRAUD", "restock": true}),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_order_email_and_currency_patterns() {
        let result = validate(
            SchemaName::CreateOrder,
            &json!({
                "email": "not-an-email",
                "currency": "usd",
                "line_items": [{"variant_id": 447_654_529, "quantity": 1}]
            }),
        );
        assert_eq!(paths(&result), vec!["email", "currency"]);
    }

    #[test]
    fn test_create_order_requires_line_items() {
        let result = validate(SchemaName::CreateOrder, &json!({"email": "a@b.co"}));
        assert_eq!(paths(&result), vec!["line_items"]);

        let result = validate(SchemaName::UpdateOrder, &json!({"id": 1, "note": "hi"}));
        assert!(result.is_ok());
    }

    #[test]
    fn test_metafield_type_enumeration() {
        let result = validate(
            SchemaName::SetMetafield,
            &json!({
                "owner_id": 1,
                "owner_resource": "order",
                "namespace": "sync",
                "key": "status",
                "value": "{}",
                "type": "blob"
            }),
        );
        assert_eq!(paths(&result), vec!["type"]);
    }

    #[test]
    fn test_non_object_document_fails_at_root() {
        let result = validate(SchemaName::CreateProduct, &json!(["not", "an", "object"]));
        assert_eq!(paths(&result), vec!["$"]);
    }

    #[test]
    fn test_validation_does_not_mutate_document() {
        let document = json!({"title": "Hat", "variants": [{"price": "bad"}]});
        let before = document.clone();
        let _ = validate(SchemaName::CreateProduct, &document);
        assert_eq!(document, before);
    }

    #[test]
    fn test_ensure_valid_builds_error() {
        let error = ensure_valid(SchemaName::AddOrderNote, &json!({"id": "1"})).unwrap_err();
        match &error {
            ValidationError::Failed { schema, violations } => {
                assert_eq!(*schema, SchemaName::AddOrderNote);
                assert_eq!(violations[0].path, "note");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            error.to_string(),
            "Document failed add-order-note validation: note: is required"
        );
    }
}
