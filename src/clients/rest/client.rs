//! REST client implementation for the Shopify Admin API.

use std::collections::HashMap;

use crate::clients::rest::RestError;
use crate::clients::{DataType, HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::config::{ApiVersion, ShopifyConfig};

/// REST API client for the Shopify Admin API.
///
/// Paths are normalized before sending: leading slashes are stripped and a
/// `.json` suffix is added, so `"/orders/450789469/transactions"` and
/// `"orders/450789469/transactions.json"` address the same endpoint.
///
/// The REST surface covers the few operations that have no GraphQL
/// counterpart in this crate (order transactions) plus passthrough CRUD.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_admin::clients::RestClient;
///
/// let client = RestClient::new(&config);
/// let response = client.get("orders/450789469/transactions", None).await?;
/// println!("{}", response.body["transactions"]);
/// ```
#[derive(Debug)]
pub struct RestClient {
    http_client: HttpClient,
    api_version: ApiVersion,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a new REST client using the configured API version.
    #[must_use]
    pub fn new(config: &ShopifyConfig) -> Self {
        Self {
            http_client: HttpClient::new(config),
            api_version: config.api_version().clone(),
        }
    }

    /// Returns the API version being used by this client.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] for an empty path, or
    /// [`RestError::Http`] when the request fails.
    pub async fn get(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Get, path, None, query).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] for an empty path, or
    /// [`RestError::Http`] when the request fails.
    pub async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Post, path, Some(body), query)
            .await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] for an empty path, or
    /// [`RestError::Http`] when the request fails.
    pub async fn put(
        &self,
        path: &str,
        body: serde_json::Value,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Put, path, Some(body), query)
            .await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] for an empty path, or
    /// [`RestError::Http`] when the request fails.
    pub async fn delete(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Delete, path, None, query)
            .await
    }

    async fn make_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        let normalized_path = normalize_path(path)?;

        let mut builder = HttpRequest::builder(method, &normalized_path);
        if let Some(body_value) = body {
            builder = builder.body(body_value).body_type(DataType::Json);
        }
        if let Some(query_params) = query {
            builder = builder.query(query_params);
        }

        let request = builder.build().map_err(|e| RestError::Http(e.into()))?;
        self.http_client.request(request).await.map_err(Into::into)
    }
}

fn normalize_path(path: &str) -> Result<String, RestError> {
    let path = path.trim_start_matches('/');
    let path = path.strip_suffix(".json").unwrap_or(path);

    if path.is_empty() {
        return Err(RestError::InvalidPath {
            path: String::new(),
        });
    }

    Ok(format!("{path}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, ShopDomain};

    #[test]
    fn test_normalize_path_strips_leading_slash_and_suffix() {
        assert_eq!(normalize_path("/products").unwrap(), "products.json");
        assert_eq!(normalize_path("products.json").unwrap(), "products.json");
        assert_eq!(
            normalize_path("/orders/1/transactions.json").unwrap(),
            "orders/1/transactions.json"
        );
    }

    #[test]
    fn test_normalize_path_rejects_empty() {
        assert!(matches!(
            normalize_path("/"),
            Err(RestError::InvalidPath { .. })
        ));
        assert!(matches!(
            normalize_path(".json"),
            Err(RestError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_rest_client_uses_config_version() {
        let config = ShopifyConfig::builder()
            .shop(ShopDomain::new("test-shop").unwrap())
            .access_token(AccessToken::new("token").unwrap())
            .api_version(ApiVersion::V2025_04)
            .build()
            .unwrap();

        let client = RestClient::new(&config);
        assert_eq!(client.api_version(), &ApiVersion::V2025_04);
    }
}
