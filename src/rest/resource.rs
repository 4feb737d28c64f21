//! REST Resource trait for passthrough operations.
//!
//! Resources that implement [`RestResource`] gain `find()`, `all()`,
//! `count()` and `delete()`. These are single calls with no orchestration;
//! anything that needs several dependent calls lives in
//! [`provisioning`](crate::provisioning).
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_admin::model::Product;
//! use shopify_admin::rest::RestResource;
//!
//! let product = Product::find(&client, 632910392).await?;
//! let drafts = Product::all(&client, Some([("status".into(), "draft".into())].into())).await?;
//! let total = Product::count(&client, None).await?;
//! ```

use std::collections::HashMap;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::clients::RestClient;
use crate::model::{Metafield, Order, Product, ProductVariant};
use crate::rest::ResourceError;

/// A REST resource that can be fetched, listed, counted and deleted.
///
/// # Associated Constants
///
/// - `NAME`: The singular resource name used in errors (e.g., "Product")
/// - `KEY`: The body key for a single resource (e.g., "product")
/// - `PLURAL`: The path segment and body key for collections (e.g., "products")
#[allow(async_fn_in_trait)]
pub trait RestResource: Serialize + DeserializeOwned + Send + Sync + Sized {
    /// The singular name of the resource.
    const NAME: &'static str;

    /// The key wrapping a single resource in request and response bodies.
    const KEY: &'static str;

    /// The plural name used in URL paths and collection bodies.
    const PLURAL: &'static str;

    /// Finds a single resource by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the resource doesn't exist.
    async fn find(client: &RestClient, id: u64) -> Result<Self, ResourceError> {
        let response = client
            .get(&format!("{}/{id}", Self::PLURAL), None)
            .await
            .map_err(|e| ResourceError::from_rest_error(e, Self::NAME, Some(id)))?;

        take_key(response.body, Self::KEY)
    }

    /// Lists resources, optionally filtered by query parameters.
    ///
    /// Only the first page is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    async fn all(
        client: &RestClient,
        query: Option<HashMap<String, String>>,
    ) -> Result<Vec<Self>, ResourceError> {
        let response = client
            .get(Self::PLURAL, query)
            .await
            .map_err(|e| ResourceError::from_rest_error(e, Self::NAME, None))?;

        take_key(response.body, Self::PLURAL)
    }

    /// Counts resources, optionally filtered by query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    async fn count(
        client: &RestClient,
        query: Option<HashMap<String, String>>,
    ) -> Result<u64, ResourceError> {
        let response = client
            .get(&format!("{}/count", Self::PLURAL), query)
            .await
            .map_err(|e| ResourceError::from_rest_error(e, Self::NAME, None))?;

        take_key(response.body, "count")
    }

    /// Deletes a resource by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the resource doesn't exist.
    async fn delete(client: &RestClient, id: u64) -> Result<(), ResourceError> {
        client
            .delete(&format!("{}/{id}", Self::PLURAL), None)
            .await
            .map_err(|e| ResourceError::from_rest_error(e, Self::NAME, Some(id)))?;
        Ok(())
    }
}

/// Decodes the value stored under `key` in a response body.
pub(crate) fn take_key<T: DeserializeOwned>(mut body: Value, key: &str) -> Result<T, ResourceError> {
    let value = body.get_mut(key).map(Value::take).unwrap_or(Value::Null);
    Ok(serde_json::from_value(value)?)
}

impl RestResource for Product {
    const NAME: &'static str = "Product";
    const KEY: &'static str = "product";
    const PLURAL: &'static str = "products";
}

impl RestResource for ProductVariant {
    const NAME: &'static str = "Variant";
    const KEY: &'static str = "variant";
    const PLURAL: &'static str = "variants";
}

impl RestResource for Order {
    const NAME: &'static str = "Order";
    const KEY: &'static str = "order";
    const PLURAL: &'static str = "orders";
}

impl RestResource for Metafield {
    const NAME: &'static str = "Metafield";
    const KEY: &'static str = "metafield";
    const PLURAL: &'static str = "metafields";
}
