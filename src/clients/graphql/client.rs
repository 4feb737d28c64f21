//! GraphQL client implementation for the Shopify Admin API.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::clients::graphql::{GraphqlError, GraphqlResponseError};
use crate::clients::{DataType, HttpClient, HttpMethod, HttpRequest};
use crate::config::{ApiVersion, ShopifyConfig};

/// GraphQL API client for the Shopify Admin API.
///
/// Every call posts a `{query, variables}` envelope to `graphql.json` and
/// returns the envelope's `data` object. A non-empty `errors` array is
/// raised as [`GraphqlError::Query`], so callers never look at the
/// envelope themselves.
///
/// # Thread Safety
///
/// `GraphqlClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_admin::clients::GraphqlClient;
/// use serde_json::json;
///
/// let client = GraphqlClient::new(&config);
/// let data = client
///     .query(
///         "query GetProduct($id: ID!) { product(id: $id) { title } }",
///         Some(json!({ "id": "gid://shopify/Product/123" })),
///         None,
///     )
///     .await?;
/// println!("{}", data["product"]["title"]);
/// ```
#[derive(Debug)]
pub struct GraphqlClient {
    http_client: HttpClient,
    api_version: ApiVersion,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates a new GraphQL client using the configured API version.
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

    /// Executes a GraphQL document and returns its `data` object.
    ///
    /// # Errors
    ///
    /// - [`GraphqlError::Http`] for transport failures and non-2xx statuses
    /// - [`GraphqlError::Query`] when the envelope has a non-empty `errors` array
    /// - [`GraphqlError::MissingData`] when `data` is absent or null
    pub async fn query(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<serde_json::Value, GraphqlError> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables.unwrap_or_else(|| serde_json::json!({})),
        });

        let mut builder = HttpRequest::builder(HttpMethod::Post, "graphql.json")
            .body(body)
            .body_type(DataType::Json);
        if let Some(extra_headers) = headers {
            builder = builder.extra_headers(extra_headers);
        }

        let request = builder.build().map_err(|e| GraphqlError::Http(e.into()))?;
        let response = self.http_client.request(request).await?;

        Self::unwrap_envelope(response.body)
    }

    /// Executes a GraphQL document and decodes `data` into `T`.
    ///
    /// # Errors
    ///
    /// Everything [`query`](Self::query) returns, plus
    /// [`GraphqlError::Decode`] when `data` does not match `T`.
    pub async fn query_as<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<T, GraphqlError> {
        let data = self.query(query, variables, None).await?;
        Ok(serde_json::from_value(data)?)
    }

    fn unwrap_envelope(mut envelope: serde_json::Value) -> Result<serde_json::Value, GraphqlError> {
        if let Some(errors) = envelope.get("errors").and_then(serde_json::Value::as_array) {
            if !errors.is_empty() {
                let errors = errors
                    .iter()
                    .map(|e| {
                        serde_json::from_value::<GraphqlResponseError>(e.clone()).unwrap_or_else(
                            |_| GraphqlResponseError {
                                message: e.to_string(),
                                path: Vec::new(),
                            },
                        )
                    })
                    .collect();
                return Err(GraphqlError::Query { errors });
            }
        }

        match envelope.get_mut("data").map(serde_json::Value::take) {
            Some(data) if !data.is_null() => Ok(data),
            _ => Err(GraphqlError::MissingData),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, ShopDomain};
    use serde_json::json;

    #[test]
    fn test_graphql_client_uses_config_version() {
        let config = ShopifyConfig::builder()
            .shop(ShopDomain::new("test-shop").unwrap())
            .access_token(AccessToken::new("token").unwrap())
            .api_version(ApiVersion::V2024_10)
            .build()
            .unwrap();

        let client = GraphqlClient::new(&config);
        assert_eq!(client.api_version(), &ApiVersion::V2024_10);
    }

    #[test]
    fn test_unwrap_envelope_returns_data() {
        let data = GraphqlClient::unwrap_envelope(json!({
            "data": {"shop": {"name": "Test"}},
            "extensions": {"cost": {"requestedQueryCost": 1}}
        }))
        .unwrap();
        assert_eq!(data, json!({"shop": {"name": "Test"}}));
    }

    #[test]
    fn test_unwrap_envelope_raises_non_empty_errors() {
        let result = GraphqlClient::unwrap_envelope(json!({
            "data": null,
            "errors": [{"message": "Field 'bogus' doesn't exist", "path": ["query", "bogus"]}]
        }));

        match result {
            Err(GraphqlError::Query { errors }) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].message, "Field 'bogus' doesn't exist");
            }
            other => panic!("expected Query error, got {other:?}"),
        }
    }

    #[test]
    fn test_unwrap_envelope_ignores_empty_errors_array() {
        let data = GraphqlClient::unwrap_envelope(json!({"data": {"ok": true}, "errors": []}))
            .unwrap();
        assert_eq!(data["ok"], true);
    }

    #[test]
    fn test_unwrap_envelope_without_data() {
        assert!(matches!(
            GraphqlClient::unwrap_envelope(json!({})),
            Err(GraphqlError::MissingData)
        ));
        assert!(matches!(
            GraphqlClient::unwrap_envelope(json!({"data": null})),
            Err(GraphqlError::MissingData)
        ));
    }
}
