//! Multi-step provisioning against the GraphQL Admin API.
//!
//! The [`Provisioner`] owns one [`GraphqlClient`] and one [`RestClient`] and
//! exposes the composite workflows:
//!
//! - [`Provisioner::create_product`]: base create, media attach, variant
//!   batch create and placeholder variant cleanup, in that order
//! - [`Provisioner::update_product`]: independent base, media and variant
//!   sections
//!
//! along with single-shot variant, order, metafield and transaction
//! operations. Every operation checks its document against a
//! [`SchemaName`](crate::validation::SchemaName) before the first request
//! and normalizes every id it is given.
//!
//! # Error model
//!
//! Transport failures and top-level GraphQL errors surface as
//! [`ProvisioningError::Graphql`]. Mutation `userErrors` are recorded in
//! [`ProvisioningResult`] / [`UpdateResult`] by the composite workflows and
//! raised as [`ProvisioningError::Remote`] by single-shot operations.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_admin::model::{Product, ProductOption, ProductVariant};
//! use shopify_admin::provisioning::{Provisioner, Step};
//!
//! let provisioner = Provisioner::new(&config);
//!
//! let mut small = ProductVariant::default();
//! small.sku = Some("TEE-S".to_string());
//! small.price = Some("19.99".to_string());
//! small.option1 = Some("S".to_string());
//!
//! let product = Product {
//!     title: Some("Tee".to_string()),
//!     options: vec![ProductOption::new("Size", ["S"])],
//!     variants: vec![small],
//!     ..Default::default()
//! };
//!
//! let result = provisioner.create_product(&product).await?;
//! println!("created {:?}, cleanup {}", result.product_id, result.outcome(Step::DeleteDefaultVariant));
//! ```

mod hooks;
mod metafield;
mod order;
mod product;
mod queries;
mod result;
mod transaction;
mod variant;

pub use hooks::StatusSync;
pub use result::{
    CancelJob, Fulfillment, ImageOutcome, NoteResult, ProvisioningResult, Step, StepOutcome,
    UpdateResult, VariantOutcome,
};

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::clients::graphql::format_user_errors;
use crate::clients::{GraphqlClient, GraphqlError, RestClient, UserError};
use crate::config::ShopifyConfig;
use crate::gid::{normalize, GlobalId, IdError, ResourceKind};
use crate::rest::ResourceError;
use crate::translate::TranslateError;
use crate::validation::ValidationError;

use queries::Operation;

/// Error type for provisioning operations.
#[derive(Debug, Error)]
pub enum ProvisioningError {
    /// The document failed local validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The GraphQL call failed or returned top-level errors.
    #[error(transparent)]
    Graphql(#[from] GraphqlError),

    /// A REST passthrough call failed.
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// The API executed the mutation but rejected it.
    #[error("{operation} failed: {}", format_user_errors(.errors))]
    Remote {
        /// The mutation's root field, e.g. `orderCancel`.
        operation: &'static str,
        /// The reported user errors.
        errors: Vec<UserError>,
    },

    /// An upstream resource the operation depends on was not found.
    #[error("No {dependency} found for {resource}")]
    MissingDependency {
        /// What was looked for, e.g. `open fulfillment order`.
        dependency: &'static str,
        /// The resource it was looked for on.
        resource: String,
    },

    /// An id could not be normalized.
    #[error(transparent)]
    Identifier(#[from] IdError),

    /// The document could not be translated into its GraphQL shape.
    #[error(transparent)]
    Translate(#[from] TranslateError),

    /// The API answered with a payload of an unexpected shape.
    #[error("Unexpected {operation} response: {message}")]
    UnexpectedResponse {
        /// The root field that was read.
        operation: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// The document could not be serialized for validation.
    #[error("Failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ProvisioningError {
    /// Returns the user errors of a [`ProvisioningError::Remote`].
    #[must_use]
    pub fn user_errors(&self) -> &[UserError] {
        match self {
            Self::Remote { errors, .. } => errors,
            _ => &[],
        }
    }
}

// Verify ProvisioningError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ProvisioningError>();
};

/// Runs provisioning workflows for one shop.
///
/// # Thread Safety
///
/// `Provisioner` is `Send + Sync`. Every workflow awaits each request
/// before issuing the next, so one instance can serve concurrent tasks.
#[derive(Debug)]
pub struct Provisioner {
    graphql: GraphqlClient,
    rest: RestClient,
    status_sync: StatusSync,
}

// Verify Provisioner is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Provisioner>();
};

impl Provisioner {
    /// Creates a provisioner for the configured shop.
    #[must_use]
    pub fn new(config: &ShopifyConfig) -> Self {
        Self {
            graphql: GraphqlClient::new(config),
            rest: RestClient::new(config),
            status_sync: config.status_sync().clone(),
        }
    }

    /// Returns the GraphQL client.
    #[must_use]
    pub const fn graphql(&self) -> &GraphqlClient {
        &self.graphql
    }

    /// Returns the REST client.
    #[must_use]
    pub const fn rest(&self) -> &RestClient {
        &self.rest
    }

    /// Returns the status-sync metafield location.
    #[must_use]
    pub const fn status_sync(&self) -> &StatusSync {
        &self.status_sync
    }

    /// Runs `operation` and returns its root payload, `Null` when absent.
    async fn execute(&self, operation: Operation, variables: Value) -> Result<Value, GraphqlError> {
        debug!(operation = operation.name, "Executing GraphQL operation");
        let mut data = self
            .graphql
            .query(operation.document, Some(variables), None)
            .await?;
        Ok(data
            .get_mut(operation.name)
            .map_or(Value::Null, Value::take))
    }

    /// Runs a mutation whose payload must be present.
    async fn mutate(&self, operation: Operation, variables: Value) -> Result<Value, ProvisioningError> {
        let payload = self.execute(operation, variables).await?;
        if payload.is_null() {
            return Err(ProvisioningError::UnexpectedResponse {
                operation: operation.name,
                message: "payload is null".to_string(),
            });
        }
        Ok(payload)
    }
}

/// Collects the user errors listed under `keys` in a mutation payload.
fn user_errors(payload: &Value, keys: &[&str]) -> Vec<UserError> {
    keys.iter()
        .filter_map(|key| payload.get(*key).and_then(Value::as_array))
        .flatten()
        .map(|entry| {
            serde_json::from_value(entry.clone()).unwrap_or_else(|_| UserError {
                field: None,
                message: entry.to_string(),
                code: None,
            })
        })
        .collect()
}

/// Raises [`ProvisioningError::Remote`] when the payload reports user errors.
fn ensure_accepted(
    operation: Operation,
    payload: &Value,
    keys: &[&str],
) -> Result<(), ProvisioningError> {
    let errors = user_errors(payload, keys);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ProvisioningError::Remote {
            operation: operation.name,
            errors,
        })
    }
}

/// Decodes one member of a payload.
fn decode<T: DeserializeOwned>(
    operation: Operation,
    payload: &mut Value,
    key: &str,
) -> Result<T, ProvisioningError> {
    let value = payload.get_mut(key).map_or(Value::Null, Value::take);
    serde_json::from_value(value).map_err(|e| ProvisioningError::UnexpectedResponse {
        operation: operation.name,
        message: format!("{key}: {e}"),
    })
}

/// Decodes a whole payload, as returned by read queries.
fn decode_node<T: DeserializeOwned>(operation: Operation, node: Value) -> Result<T, ProvisioningError> {
    serde_json::from_value(node).map_err(|e| ProvisioningError::UnexpectedResponse {
        operation: operation.name,
        message: e.to_string(),
    })
}

/// Normalizes a caller-supplied id and returns its numeric REST form.
fn rest_id_of(raw: &str, kind: ResourceKind) -> Result<(GlobalId, u64), ProvisioningError> {
    let id = normalize(raw, kind)?;
    let numeric = id.as_u64().ok_or_else(|| IdError::InvalidIdentifier {
        raw: raw.to_string(),
        kind,
    })?;
    Ok((id, numeric))
}
