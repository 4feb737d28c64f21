//! Order documents and the requests for order operations.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A postal address.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Address {
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

/// A line item on an order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LineItem {
    /// The unique identifier of the line item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// The purchased variant. Custom items have none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<u64>,

    /// Title, required for custom items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Number of units.
    #[serde(default)]
    pub quantity: u32,

    /// Unit price as a decimal string, required for custom items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    /// Stock keeping unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
}

/// An order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Order {
    /// The unique identifier of the order. Required for updates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// The display name, e.g. `#1001`.
    #[serde(skip_serializing)]
    pub name: Option<String>,

    /// The customer's email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// A staff-visible note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Comma-separated tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,

    /// ISO 4217 currency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Payment status, e.g. `paid`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_status: Option<String>,

    /// Total price as a decimal string.
    #[serde(skip_serializing)]
    pub total_price: Option<String>,

    /// The purchased items.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<LineItem>,

    /// Where the order ships.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,

    /// Where the order is billed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,

    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing)]
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// The reason an order is cancelled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderCancelReason {
    /// The customer cancelled.
    Customer,
    /// Payment was declined.
    Declined,
    /// The order was fraudulent.
    Fraud,
    /// Items were unavailable.
    Inventory,
    /// Any other reason.
    Other,
    /// Staff made an error.
    Staff,
}

impl OrderCancelReason {
    /// Returns the GraphQL `OrderCancelReason` enum value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "CUSTOMER",
            Self::Declined => "DECLINED",
            Self::Fraud => "FRAUD",
            Self::Inventory => "INVENTORY",
            Self::Other => "OTHER",
            Self::Staff => "STAFF",
        }
    }
}

impl fmt::Display for OrderCancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderCancelReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CUSTOMER" => Ok(Self::Customer),
            "DECLINED" => Ok(Self::Declined),
            "FRAUD" => Ok(Self::Fraud),
            "INVENTORY" => Ok(Self::Inventory),
            "OTHER" => Ok(Self::Other),
            "STAFF" => Ok(Self::Staff),
            other => Err(format!("unknown cancel reason: {other}")),
        }
    }
}

/// A request to cancel an order.
///
/// `reason` is kept as the raw string the caller supplied; it is checked
/// against the allowed reasons before anything is sent.
///
/// # Example
///
/// ```rust
/// use shopify_admin::model::{CancelRequest, OrderCancelReason};
///
/// let request = CancelRequest::new("450789469", OrderCancelReason::Customer).restock(true);
/// assert_eq!(request.reason, "CUSTOMER");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CancelRequest {
    /// The order to cancel, as a numeric id or global id.
    pub order_id: String,
    /// One of `CUSTOMER`, `DECLINED`, `FRAUD`, `INVENTORY`, `OTHER`, `STAFF`.
    pub reason: String,
    /// Refund the customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund: Option<bool>,
    /// Restock the items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restock: Option<bool>,
    /// Email the customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_customer: Option<bool>,
    /// Note visible to staff.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_note: Option<String>,
}

impl CancelRequest {
    /// Creates a request with a typed reason.
    #[must_use]
    pub fn new(order_id: impl Into<String>, reason: OrderCancelReason) -> Self {
        Self {
            order_id: order_id.into(),
            reason: reason.as_str().to_string(),
            ..Default::default()
        }
    }

    /// Sets whether items are restocked.
    #[must_use]
    pub const fn restock(mut self, restock: bool) -> Self {
        self.restock = Some(restock);
        self
    }

    /// Sets whether the customer is refunded.
    #[must_use]
    pub const fn refund(mut self, refund: bool) -> Self {
        self.refund = Some(refund);
        self
    }

    /// Sets whether the customer is notified.
    #[must_use]
    pub const fn notify_customer(mut self, notify: bool) -> Self {
        self.notify_customer = Some(notify);
        self
    }
}

/// Carrier tracking details for a fulfillment.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TrackingInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A request to fulfill an order's open fulfillment order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FulfillmentRequest {
    /// The order to fulfill, as a numeric id or global id.
    pub order_id: String,
    /// Email the customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_customer: Option<bool>,
    /// Carrier tracking details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_info: Option<TrackingInfo>,
}
