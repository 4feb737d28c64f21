//! Conversion between REST-shaped documents and GraphQL shapes.
//!
//! Each resource family has one module holding both directions:
//!
//! - `to_*` / `*_input` functions build GraphQL mutation inputs (camelCase
//!   fields, global ids) from [`model`](crate::model) documents
//! - `from_remote` functions flatten GraphQL read nodes back into
//!   documents (numeric ids, comma-joined tags, no edge/node wrappers)
//!
//! Everything here is pure: no I/O, no logging.

pub mod image;
pub mod metafield;
pub mod order;
pub mod product;
pub mod variant;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gid::{GlobalId, IdError, ResourceKind};

/// Errors produced while translating documents.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// A variant selects a value for an option the product does not declare.
    #[error(
        "Variant {} selects option {position} but the product declares {declared} option(s)",
        sku.as_deref().unwrap_or("<no sku>")
    )]
    MissingOptionDefinition {
        /// The 1-based option position the variant references.
        position: usize,
        /// How many options the product declares.
        declared: usize,
        /// The variant's SKU, when it has one.
        sku: Option<String>,
    },

    /// A field needed to build the remote shape is absent.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The absent field.
        field: &'static str,
    },

    /// A global id could not be converted.
    #[error(transparent)]
    Identifier(#[from] IdError),
}

/// A GraphQL connection (`{ edges: [{ node }] }`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Connection<T> {
    /// The wrapped nodes.
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

/// One edge of a [`Connection`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Edge<T> {
    /// The wrapped node.
    pub node: T,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

impl<T> Connection<T> {
    /// Unwraps the edges into plain nodes.
    #[must_use]
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }

    /// Returns `true` when the connection has no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl<T> FromIterator<T> for Connection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            edges: iter.into_iter().map(|node| Edge { node }).collect(),
        }
    }
}

/// Builds the global id string for an optional numeric REST id.
pub(crate) fn gid_string(kind: ResourceKind, id: Option<u64>) -> Option<String> {
    id.map(|id| GlobalId::from_numeric(kind, id).to_string())
}

/// Reads the numeric REST id out of an optional global id string.
pub(crate) fn rest_id(raw: Option<&str>) -> Result<Option<u64>, TranslateError> {
    raw.map(|raw| {
        let id = GlobalId::parse(raw)?;
        id.as_u64().ok_or_else(|| {
            TranslateError::Identifier(IdError::InvalidIdentifier {
                raw: raw.to_string(),
                kind: id.kind(),
            })
        })
    })
    .transpose()
}

/// Inserts `value` under `key` when it is `Some`.
pub(crate) fn put<T: Serialize>(
    object: &mut serde_json::Map<String, serde_json::Value>,
    key: &str,
    value: Option<T>,
) {
    if let Some(value) = value {
        if let Ok(value) = serde_json::to_value(value) {
            object.insert(key.to_string(), value);
        }
    }
}
