//! Resource-specific error types for REST passthrough calls.
//!
//! Status codes are mapped to semantic variants:
//!
//! - **404**: [`ResourceError::NotFound`]
//! - **422**: [`ResourceError::ValidationFailed`] with the field -> messages map
//! - anything else: [`ResourceError::Rest`], unchanged
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_admin::model::Order;
//! use shopify_admin::rest::{ResourceError, RestResource};
//!
//! match Order::find(&client, 450789469).await {
//!     Ok(order) => println!("Found: {:?}", order.name),
//!     Err(ResourceError::NotFound { resource, id }) => println!("{resource} {id} is gone"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use std::collections::HashMap;

use thiserror::Error;

use crate::clients::{HttpError, RestError};
use crate::validation::ValidationError;

/// Error type for REST resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The resource was not found (HTTP 404).
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// The type name of the resource (e.g., "Product", "Order").
        resource: &'static str,
        /// The ID that was requested.
        id: String,
    },

    /// The API rejected the payload (HTTP 422).
    #[error("Validation failed: {errors:?}")]
    ValidationFailed {
        /// A map of field names to error messages.
        errors: HashMap<String, Vec<String>>,
        /// The request ID for debugging (from X-Request-Id header).
        request_id: Option<String>,
    },

    /// The document failed local validation; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// A REST-level error occurred.
    #[error(transparent)]
    Rest(#[from] RestError),

    /// The response body did not contain the expected resource.
    #[error("Failed to decode resource: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ResourceError {
    /// Maps a failed REST call onto a resource error.
    ///
    /// `resource` and `id` are used for [`ResourceError::NotFound`].
    #[must_use]
    pub fn from_rest_error(error: RestError, resource: &'static str, id: Option<u64>) -> Self {
        let response = match error {
            RestError::Http(HttpError::Response(response)) => response,
            other => return Self::Rest(other),
        };

        match response.code {
            404 => Self::NotFound {
                resource,
                id: id.map_or_else(|| "unknown".to_string(), |id| id.to_string()),
            },
            422 => {
                let body: serde_json::Value =
                    serde_json::from_str(&response.message).unwrap_or_default();
                Self::ValidationFailed {
                    errors: parse_validation_errors(&body),
                    request_id: response.error_reference,
                }
            }
            _ => Self::Rest(RestError::Http(HttpError::Response(response))),
        }
    }

    /// Returns the request ID if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::ValidationFailed { request_id, .. } => request_id.as_deref(),
            Self::Rest(RestError::Http(HttpError::Response(e))) => e.error_reference.as_deref(),
            _ => None,
        }
    }
}

/// Parses validation errors from a 422 body.
///
/// Shopify returns either `{"errors": {"field": ["message"]}}`,
/// `{"errors": ["message"]}` or `{"errors": "message"}`. The latter two are
/// filed under `base`.
fn parse_validation_errors(body: &serde_json::Value) -> HashMap<String, Vec<String>> {
    let mut result = HashMap::new();

    let strings = |values: &[serde_json::Value]| -> Vec<String> {
        values
            .iter()
            .filter_map(|v| v.as_str().map(ToString::to_string))
            .collect()
    };

    match body.get("errors") {
        Some(serde_json::Value::Object(map)) => {
            for (field, messages) in map {
                let messages = match messages {
                    serde_json::Value::Array(values) => strings(values),
                    serde_json::Value::String(s) => vec![s.clone()],
                    other => vec![other.to_string()],
                };
                result.insert(field.clone(), messages);
            }
        }
        Some(serde_json::Value::Array(values)) => {
            let messages = strings(values);
            if !messages.is_empty() {
                result.insert("base".to_string(), messages);
            }
        }
        Some(serde_json::Value::String(s)) => {
            result.insert("base".to_string(), vec![s.clone()]);
        }
        _ => {}
    }

    result
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;
    use serde_json::json;

    fn response_error(code: u16, message: &str) -> RestError {
        RestError::Http(HttpError::Response(HttpResponseError {
            code,
            message: message.to_string(),
            error_reference: Some("req-1".to_string()),
        }))
    }

    #[test]
    fn test_404_maps_to_not_found() {
        let error = ResourceError::from_rest_error(
            response_error(404, r#"{"errors":"Not Found"}"#),
            "Order",
            Some(450_789_469),
        );
        assert!(matches!(error, ResourceError::NotFound { resource: "Order", ref id } if id == "450789469"));
        assert_eq!(error.to_string(), "Order with id 450789469 not found");
    }

    #[test]
    fn test_422_maps_to_validation_failed() {
        let error = ResourceError::from_rest_error(
            response_error(422, r#"{"errors":{"amount":["must be greater than 0"]}}"#),
            "Transaction",
            None,
        );

        match &error {
            ResourceError::ValidationFailed { errors, .. } => {
                assert_eq!(
                    errors.get("amount"),
                    Some(&vec!["must be greater than 0".to_string()])
                );
            }
            other => panic!("expected ValidationFailed, got {other:?}"),
        }
        assert_eq!(error.request_id(), Some("req-1"));
    }

    #[test]
    fn test_other_statuses_pass_through() {
        let error = ResourceError::from_rest_error(
            response_error(500, r#"{"errors":"Internal"}"#),
            "Product",
            Some(1),
        );
        assert!(matches!(error, ResourceError::Rest(_)));

        let error = ResourceError::from_rest_error(
            RestError::InvalidPath { path: String::new() },
            "Product",
            None,
        );
        assert!(matches!(error, ResourceError::Rest(RestError::InvalidPath { .. })));
    }

    #[test]
    fn test_parse_validation_error_shapes() {
        let base = parse_validation_errors(&json!({"errors": ["Title can't be blank"]}));
        assert_eq!(base.get("base"), Some(&vec!["Title can't be blank".to_string()]));

        let single = parse_validation_errors(&json!({"errors": "Invalid"}));
        assert_eq!(single.get("base"), Some(&vec!["Invalid".to_string()]));

        assert!(parse_validation_errors(&json!({})).is_empty());
    }
}
