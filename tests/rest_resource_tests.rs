//! Integration tests for REST passthrough resources and order transactions.

mod common;

use serde_json::json;
use shopify_admin::model::{Order, Product, Transaction, TransactionKind};
use shopify_admin::rest::{ResourceError, RestResource};
use shopify_admin::ProvisioningError;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::provisioner_for;

const TRANSACTIONS_PATH: &str = "/admin/api/2025-10/orders/450789469/transactions.json";

// ============================================================================
// Transactions
// ============================================================================

#[tokio::test]
async fn test_create_transaction_posts_wrapped_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TRANSACTIONS_PATH))
        .and(body_json(json!({
            "transaction": { "kind": "capture", "amount": "10.00", "currency": "USD", "parent_id": 389_404_469 }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "transaction": {
                "id": 1_068_278_509,
                "kind": "capture",
                "amount": "10.00",
                "currency": "USD",
                "parent_id": 389_404_469,
                "status": "success"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut capture = Transaction::new(TransactionKind::Capture);
    capture.amount = Some("10.00".to_string());
    capture.currency = Some("USD".to_string());
    capture.parent_id = Some(389_404_469);

    let provisioner = provisioner_for(&server);
    let created = assert_ok!(
        provisioner
            .create_transaction("gid://shopify/Order/450789469", &capture)
            .await
    );

    assert_eq!(created.id, Some(1_068_278_509));
    assert_eq!(created.order_id, Some(450_789_469));
    assert_eq!(created.status.as_deref(), Some("success"));
}

#[tokio::test]
async fn test_list_transactions_fills_order_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TRANSACTIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "transactions": [
                { "id": 1, "kind": "authorization", "amount": "598.94" },
                { "id": 2, "kind": "capture", "amount": "598.94", "order_id": 450_789_469 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provisioner = provisioner_for(&server);
    let transactions = provisioner.list_transactions("450789469").await.unwrap();

    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].kind, TransactionKind::Authorization);
    assert!(transactions.iter().all(|t| t.order_id == Some(450_789_469)));
}

#[tokio::test]
async fn test_list_transactions_for_missing_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TRANSACTIONS_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "errors": "Not Found" })))
        .expect(1)
        .mount(&server)
        .await;

    let provisioner = provisioner_for(&server);
    let error = assert_err!(provisioner.list_transactions("450789469").await);

    assert!(matches!(
        error,
        ProvisioningError::Resource(ResourceError::NotFound { resource: "Order", .. })
    ));
}

#[tokio::test]
async fn test_rejected_transaction_reports_field_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TRANSACTIONS_PATH))
        .respond_with(
            ResponseTemplate::new(422)
                .insert_header("x-request-id", "req-422")
                .set_body_json(json!({ "errors": { "amount": ["must be greater than 0"] } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut refund = Transaction::new(TransactionKind::Refund);
    refund.amount = Some("0.00".to_string());

    let provisioner = provisioner_for(&server);
    let error = provisioner
        .create_transaction("450789469", &refund)
        .await
        .unwrap_err();

    match error {
        ProvisioningError::Resource(ResourceError::ValidationFailed { errors, request_id }) => {
            assert_eq!(errors["amount"], vec!["must be greater than 0".to_string()]);
            assert_eq!(request_id.as_deref(), Some("req-422"));
        }
        other => panic!("expected ValidationFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_transaction_is_not_sent() {
    let server = MockServer::start().await;

    let mut sale = Transaction::new(TransactionKind::Sale);
    sale.amount = Some("ten dollars".to_string());

    let provisioner = provisioner_for(&server);
    let error = provisioner
        .create_transaction("450789469", &sale)
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        ProvisioningError::Resource(ResourceError::Invalid(_))
    ));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

// ============================================================================
// Passthrough Resources
// ============================================================================

#[tokio::test]
async fn test_find_product() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/api/2025-10/products/632910392.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "product": {
                "id": 632_910_392,
                "title": "IPod Nano - 8GB",
                "handle": "ipod-nano",
                "status": "active",
                "tags": "Emotive, Flash Memory"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provisioner = provisioner_for(&server);
    let product = Product::find(provisioner.rest(), 632_910_392).await.unwrap();

    assert_eq!(product.id, Some(632_910_392));
    assert_eq!(product.title.as_deref(), Some("IPod Nano - 8GB"));
    assert_eq!(product.tag_list(), vec!["Emotive", "Flash Memory"]);
}

#[tokio::test]
async fn test_find_missing_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/api/2025-10/orders/1.json"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "errors": "Not Found" })))
        .mount(&server)
        .await;

    let provisioner = provisioner_for(&server);
    let error = Order::find(provisioner.rest(), 1).await.unwrap_err();

    assert_eq!(error.to_string(), "Order with id 1 not found");
}

#[tokio::test]
async fn test_count_products_with_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/api/2025-10/products/count.json"))
        .and(query_param("status", "draft"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 3 })))
        .expect(1)
        .mount(&server)
        .await;

    let provisioner = provisioner_for(&server);
    let query = [("status".to_string(), "draft".to_string())].into();
    let count = Product::count(provisioner.rest(), Some(query)).await.unwrap();

    assert_eq!(count, 3);
}

#[tokio::test]
async fn test_all_orders_returns_first_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/api/2025-10/orders.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "orders": [{ "id": 1, "name": "#1001" }, { "id": 2, "name": "#1002" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provisioner = provisioner_for(&server);
    let orders = Order::all(provisioner.rest(), None).await.unwrap();

    let names: Vec<_> = orders.iter().filter_map(|o| o.name.as_deref()).collect();
    assert_eq!(names, vec!["#1001", "#1002"]);
}

#[tokio::test]
async fn test_delete_product() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/admin/api/2025-10/products/632910392.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let provisioner = provisioner_for(&server);
    assert_ok!(Product::delete(provisioner.rest(), 632_910_392).await);
}
