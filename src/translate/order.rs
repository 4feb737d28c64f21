//! Order translation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::gid::{GlobalId, ResourceKind};
use crate::model::{Address, CancelRequest, FulfillmentRequest, LineItem, Order};
use crate::translate::{gid_string, put, rest_id, Connection, TranslateError};

/// An order as read from the GraphQL API.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteOrder {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub note: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub currency_code: Option<String>,
    pub display_financial_status: Option<String>,
    pub total_price_set: Option<MoneyBag>,
    #[serde(default)]
    pub line_items: Connection<RemoteLineItem>,
    pub shipping_address: Option<RemoteAddress>,
    pub billing_address: Option<RemoteAddress>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// A `MoneyBag`; only the shop currency amount is read.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MoneyBag {
    pub shop_money: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: String,
    pub currency_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteLineItem {
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub quantity: u32,
    pub sku: Option<String>,
    pub variant: Option<super::variant::RemoteNodeRef>,
    pub original_unit_price_set: Option<MoneyBag>,
}

/// A `MailingAddress`, which is also the shape of `MailingAddressInput`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl From<&Address> for RemoteAddress {
    fn from(address: &Address) -> Self {
        Self {
            first_name: address.first_name.clone(),
            last_name: address.last_name.clone(),
            address1: address.address1.clone(),
            address2: address.address2.clone(),
            city: address.city.clone(),
            province: address.province.clone(),
            country: address.country.clone(),
            zip: address.zip.clone(),
            phone: address.phone.clone(),
        }
    }
}

impl From<RemoteAddress> for Address {
    fn from(address: RemoteAddress) -> Self {
        Self {
            first_name: address.first_name,
            last_name: address.last_name,
            address1: address.address1,
            address2: address.address2,
            city: address.city,
            province: address.province,
            country: address.country,
            zip: address.zip,
            phone: address.phone,
        }
    }
}

/// Flattens a remote order into an order.
///
/// # Errors
///
/// Returns [`TranslateError::Identifier`] if an embedded id is malformed.
pub fn from_remote(remote: RemoteOrder) -> Result<Order, TranslateError> {
    let line_items = remote
        .line_items
        .into_nodes()
        .into_iter()
        .map(|item| {
            Ok(LineItem {
                id: rest_id(item.id.as_deref())?,
                variant_id: rest_id(item.variant.as_ref().map(|v| v.id.as_str()))?,
                title: item.title,
                quantity: item.quantity,
                price: item.original_unit_price_set.map(|set| set.shop_money.amount),
                sku: item.sku,
            })
        })
        .collect::<Result<Vec<_>, TranslateError>>()?;

    Ok(Order {
        id: rest_id(remote.id.as_deref())?,
        name: remote.name,
        email: remote.email,
        note: remote.note,
        tags: (!remote.tags.is_empty()).then(|| remote.tags.join(", ")),
        currency: remote.currency_code,
        financial_status: remote
            .display_financial_status
            .map(|status| status.to_lowercase()),
        total_price: remote.total_price_set.map(|set| set.shop_money.amount),
        line_items,
        shipping_address: remote.shipping_address.map(Address::from),
        billing_address: remote.billing_address.map(Address::from),
        created_at: remote.created_at,
        updated_at: remote.updated_at,
        cancelled_at: remote.cancelled_at,
    })
}

fn tag_list(tags: Option<&str>) -> Option<Vec<&str>> {
    tags.map(|tags| {
        tags.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    })
}

fn line_item_input(item: &LineItem, currency: Option<&str>) -> Value {
    let mut input = Map::new();
    put(
        &mut input,
        "variantId",
        gid_string(ResourceKind::ProductVariant, item.variant_id),
    );
    put(&mut input, "title", item.title.as_deref());
    input.insert("quantity".to_string(), json!(item.quantity));
    put(&mut input, "sku", item.sku.as_deref());
    if let Some(amount) = item.price.as_deref() {
        let mut money = Map::new();
        money.insert("amount".to_string(), json!(amount));
        put(&mut money, "currencyCode", currency);
        input.insert(
            "priceSet".to_string(),
            json!({ "shopMoney": Value::Object(money) }),
        );
    }
    Value::Object(input)
}

/// Builds the `OrderCreateOrderInput` for `orderCreate`.
#[must_use]
pub fn create_input(order: &Order) -> Value {
    let mut input = Map::new();
    put(&mut input, "email", order.email.as_deref());
    put(&mut input, "note", order.note.as_deref());
    put(&mut input, "tags", tag_list(order.tags.as_deref()));
    put(&mut input, "currency", order.currency.as_deref());
    put(
        &mut input,
        "financialStatus",
        order.financial_status.as_deref().map(str::to_uppercase),
    );

    let line_items: Vec<Value> = order
        .line_items
        .iter()
        .map(|item| line_item_input(item, order.currency.as_deref()))
        .collect();
    input.insert("lineItems".to_string(), Value::Array(line_items));

    put(
        &mut input,
        "shippingAddress",
        order.shipping_address.as_ref().map(RemoteAddress::from),
    );
    put(
        &mut input,
        "billingAddress",
        order.billing_address.as_ref().map(RemoteAddress::from),
    );

    Value::Object(input)
}

/// Builds the `OrderInput` for `orderUpdate`.
///
/// Only the fields `orderUpdate` accepts are carried.
#[must_use]
pub fn update_input(order: &Order, id: &GlobalId) -> Value {
    let mut input = Map::new();
    input.insert("id".to_string(), json!(id.to_string()));
    put(&mut input, "email", order.email.as_deref());
    put(&mut input, "note", order.note.as_deref());
    put(&mut input, "tags", tag_list(order.tags.as_deref()));
    put(
        &mut input,
        "shippingAddress",
        order.shipping_address.as_ref().map(RemoteAddress::from),
    );
    Value::Object(input)
}

/// Builds the `OrderInput` that replaces an order's note.
#[must_use]
pub fn note_input(id: &GlobalId, note: &str) -> Value {
    json!({ "id": id.to_string(), "note": note })
}

/// Builds the `orderCancel` variables.
///
/// `refund` and `restock` default to `false`.
#[must_use]
pub fn cancel_variables(request: &CancelRequest, id: &GlobalId) -> Value {
    let mut variables = Map::new();
    variables.insert("orderId".to_string(), json!(id.to_string()));
    variables.insert("reason".to_string(), json!(request.reason));
    variables.insert("refund".to_string(), json!(request.refund.unwrap_or(false)));
    variables.insert("restock".to_string(), json!(request.restock.unwrap_or(false)));
    put(&mut variables, "notifyCustomer", request.notify_customer);
    put(&mut variables, "staffNote", request.staff_note.as_deref());
    Value::Object(variables)
}

/// Builds the `FulfillmentInput` for `fulfillmentCreate`.
#[must_use]
pub fn fulfillment_input(fulfillment_order_id: &GlobalId, request: &FulfillmentRequest) -> Value {
    let mut input = Map::new();
    input.insert(
        "lineItemsByFulfillmentOrder".to_string(),
        json!([{ "fulfillmentOrderId": fulfillment_order_id.to_string() }]),
    );
    put(&mut input, "notifyCustomer", request.notify_customer);
    if let Some(tracking) = &request.tracking_info {
        let mut info = Map::new();
        put(&mut info, "number", tracking.number.as_deref());
        put(&mut info, "company", tracking.company.as_deref());
        put(&mut info, "url", tracking.url.as_deref());
        input.insert("trackingInfo".to_string(), Value::Object(info));
    }
    Value::Object(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderCancelReason, TrackingInfo};

    #[test]
    fn test_from_remote_flattens_order() {
        let remote: RemoteOrder = serde_json::from_value(json!({
            "id": "gid://shopify/Order/450789469",
            "name": "#1001",
            "email": "bob@example.com",
            "tags": ["vip", "gift"],
            "currencyCode": "USD",
            "displayFinancialStatus": "PARTIALLY_PAID",
            "totalPriceSet": {"shopMoney": {"amount": "598.94", "currencyCode": "USD"}},
            "lineItems": {"edges": [{"node": {
                "id": "gid://shopify/LineItem/466157049",
                "title": "IPod Nano",
                "quantity": 1,
                "variant": {"id": "gid://shopify/ProductVariant/39072856"},
                "originalUnitPriceSet": {"shopMoney": {"amount": "199.00"}}
            }}]},
            "shippingAddress": {"firstName": "Bob", "city": "Ottawa"}
        }))
        .unwrap();

        let order = from_remote(remote).unwrap();
        assert_eq!(order.id, Some(450_789_469));
        assert_eq!(order.line_items[0].id, Some(466_157_049));
        assert_eq!(order.tags.as_deref(), Some("vip, gift"));
        assert_eq!(order.financial_status.as_deref(), Some("partially_paid"));
        assert_eq!(order.total_price.as_deref(), Some("598.94"));
        assert_eq!(order.line_items[0].variant_id, Some(39_072_856));
        assert_eq!(order.line_items[0].price.as_deref(), Some("199.00"));
        assert_eq!(
            order.shipping_address.and_then(|a| a.first_name).as_deref(),
            Some("Bob")
        );
    }

    #[test]
    fn test_create_input_shapes_line_items() {
        let order = Order {
            email: Some("bob@example.com".to_string()),
            currency: Some("EUR".to_string()),
            financial_status: Some("paid".to_string()),
            tags: Some("a, b".to_string()),
            line_items: vec![
                LineItem {
                    variant_id: Some(39_072_856),
                    quantity: 2,
                    ..Default::default()
                },
                LineItem {
                    title: Some("Gift wrap".to_string()),
                    quantity: 1,
                    price: Some("5.00".to_string()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        assert_eq!(
            create_input(&order),
            json!({
                "email": "bob@example.com",
                "tags": ["a", "b"],
                "currency": "EUR",
                "financialStatus": "PAID",
                "lineItems": [
                    {"variantId": "gid://shopify/ProductVariant/39072856", "quantity": 2},
                    {"title": "Gift wrap", "quantity": 1,
                     "priceSet": {"shopMoney": {"amount": "5.00", "currencyCode": "EUR"}}}
                ]
            })
        );
    }

    #[test]
    fn test_note_input_uses_global_id() {
        let id = GlobalId::from_numeric(ResourceKind::Order, 123);
        assert_eq!(
            note_input(&id, "Call first"),
            json!({"id": "gid://shopify/Order/123", "note": "Call first"})
        );
    }

    #[test]
    fn test_cancel_variables_default_flags() {
        let id = GlobalId::from_numeric(ResourceKind::Order, 1);
        let request = CancelRequest::new("1", OrderCancelReason::Customer).notify_customer(true);
        assert_eq!(
            cancel_variables(&request, &id),
            json!({
                "orderId": "gid://shopify/Order/1",
                "reason": "CUSTOMER",
                "refund": false,
                "restock": false,
                "notifyCustomer": true
            })
        );
    }

    #[test]
    fn test_fulfillment_input_with_tracking() {
        let id = GlobalId::from_numeric(ResourceKind::FulfillmentOrder, 7);
        let request = FulfillmentRequest {
            order_id: "1".to_string(),
            notify_customer: Some(false),
            tracking_info: Some(TrackingInfo {
                number: Some("1Z999".to_string()),
                company: Some("UPS".to_string()),
                url: None,
            }),
        };

        assert_eq!(
            fulfillment_input(&id, &request),
            json!({
                "lineItemsByFulfillmentOrder": [{"fulfillmentOrderId": "gid://shopify/FulfillmentOrder/7"}],
                "notifyCustomer": false,
                "trackingInfo": {"number": "1Z999", "company": "UPS"}
            })
        );
    }
}
