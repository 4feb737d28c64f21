//! GraphQL-specific error types.
//!
//! A GraphQL request can fail at three levels:
//!
//! - [`GraphqlError::Http`]: the transport failed or returned a non-2xx status
//! - [`GraphqlError::Query`]: the envelope carried a non-empty `errors` array
//! - [`GraphqlError::MissingData`] / [`GraphqlError::Decode`]: the envelope
//!   had no usable `data`
//!
//! Mutation-level `userErrors` are not errors at this layer; they are part
//! of `data` and are interpreted by the caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clients::HttpError;

/// One entry of a GraphQL envelope's top-level `errors` array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphqlResponseError {
    /// Error message.
    pub message: String,
    /// Path to the failing field, when the server reports one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<serde_json::Value>,
}

/// A mutation-level user error (`userErrors` and its variants).
///
/// `field` is the path to the offending input, e.g. `["media", "1", "originalSource"]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserError {
    /// Path to the offending input field.
    #[serde(default)]
    pub field: Option<Vec<String>>,
    /// Human-readable message.
    pub message: String,
    /// Machine-readable code, on payloads that expose one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl UserError {
    /// Returns the field path joined with `.`.
    #[must_use]
    pub fn field_path(&self) -> Option<String> {
        self.field.as_ref().map(|parts| parts.join("."))
    }
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.field_path() {
            Some(path) if !path.is_empty() => write!(f, "{path}: {}", self.message),
            _ => f.write_str(&self.message),
        }
    }
}

/// Joins user errors into a single `; `-separated message.
#[must_use]
pub fn format_user_errors(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn format_query_errors(errors: &[GraphqlResponseError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error type for GraphQL API operations.
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// The HTTP exchange failed.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The response carried top-level GraphQL errors.
    #[error("GraphQL errors: {}", format_query_errors(.errors))]
    Query {
        /// The reported errors, in server order.
        errors: Vec<GraphqlResponseError>,
    },

    /// The response had neither `errors` nor a `data` object.
    #[error("GraphQL response contained no data")]
    MissingData,

    /// `data` could not be decoded into the requested type.
    #[error("Failed to decode GraphQL data: {0}")]
    Decode(#[from] serde_json::Error),
}
