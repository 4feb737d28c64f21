//! Shared helpers for integration tests against a mock shop.

#![allow(dead_code)]

use serde_json::{json, Value};
use shopify_admin::{AccessToken, HostUrl, Provisioner, ShopDomain, ShopifyConfig};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// The GraphQL endpoint for the default API version.
pub const GRAPHQL_PATH: &str = "/admin/api/2025-10/graphql.json";

/// Builds a config pointing at the mock server.
pub fn config_for(server: &MockServer) -> ShopifyConfig {
    ShopifyConfig::builder()
        .shop(ShopDomain::new("test-shop").unwrap())
        .access_token(AccessToken::new("shpat_test").unwrap())
        .api_host(HostUrl::new(server.uri()).unwrap())
        .build()
        .unwrap()
}

/// Builds a provisioner pointing at the mock server.
pub fn provisioner_for(server: &MockServer) -> Provisioner {
    Provisioner::new(&config_for(server))
}

/// A GraphQL mock matching documents that contain `operation`.
pub fn graphql(operation: &str) -> wiremock::MockBuilder {
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains(operation))
}

/// A 200 response wrapping `data` in a GraphQL envelope.
pub fn data(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": data }))
}

/// Mounts a mock answering `operation` with `payload` under `root`, expected `times` times.
pub async fn mount(server: &MockServer, operation: &str, root: &str, payload: Value, times: u64) {
    let mut body = serde_json::Map::new();
    body.insert(root.to_string(), payload);
    graphql(operation)
        .respond_with(data(Value::Object(body)))
        .expect(times)
        .mount(server)
        .await;
}

/// Returns the JSON bodies of every request the server received, in order.
pub async fn request_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| serde_json::from_slice(&request.body).unwrap_or(Value::Null))
        .collect()
}

/// Returns the `variables` of every GraphQL request whose document contains `operation`.
pub async fn variables_of(server: &MockServer, operation: &str) -> Vec<Value> {
    request_bodies(server)
        .await
        .into_iter()
        .filter(|body| {
            body["query"]
                .as_str()
                .is_some_and(|query| query.contains(operation))
        })
        .map(|body| body["variables"].clone())
        .collect()
}

/// A `productCreate` payload for a product with one default variant.
pub fn product_created(product_id: u64, default_variant_id: u64, options: &[&str]) -> Value {
    let options: Vec<Value> = options
        .iter()
        .enumerate()
        .map(|(index, name)| {
            json!({
                "id": format!("gid://shopify/ProductOption/{}", index + 1),
                "name": name,
                "position": index + 1,
                "optionValues": [{ "name": "_" }]
            })
        })
        .collect();

    json!({
        "product": {
            "id": format!("gid://shopify/Product/{product_id}"),
            "title": "Test",
            "handle": "test",
            "status": "DRAFT",
            "tags": [],
            "options": options,
            "media": { "edges": [] },
            "variants": { "edges": [{
                "node": {
                    "id": format!("gid://shopify/ProductVariant/{default_variant_id}"),
                    "title": "Default Title",
                    "price": "0.00",
                    "selectedOptions": []
                }
            }] }
        },
        "userErrors": []
    })
}

/// A variant bulk payload returning one variant per `(id, sku)` pair.
pub fn variants_written(variants: &[(u64, &str)]) -> Value {
    let variants: Vec<Value> = variants
        .iter()
        .map(|(id, sku)| {
            json!({
                "id": format!("gid://shopify/ProductVariant/{id}"),
                "sku": sku,
                "selectedOptions": []
            })
        })
        .collect();
    json!({ "productVariants": variants, "userErrors": [] })
}

/// An order node as returned by `orderUpdate` and `order`.
pub fn order_node(id: u64, note: &str) -> Value {
    json!({
        "id": format!("gid://shopify/Order/{id}"),
        "name": "#1001",
        "email": "buyer@example.com",
        "note": note,
        "tags": ["vip"],
        "currencyCode": "USD",
        "displayFinancialStatus": "PAID",
        "lineItems": { "edges": [] }
    })
}
