//! The schema catalogue.
//!
//! Every schema is a [`Mode`] plus one or more rule tables. Create and
//! update schemas for the same resource share a table; the differences
//! live in each rule's [`Presence`].

use std::fmt;
use std::str::FromStr;

use super::rules::{FieldRule, Mode, PatternKind, Presence, ValueKind};
use super::ValidationError;

/// `status` of a product.
pub const PRODUCT_STATUSES: &[&str] = &["active", "archived", "draft"];
/// `published_scope` of a product.
pub const PUBLISHED_SCOPES: &[&str] = &["web", "global"];
/// `weight_unit` of a variant.
pub const WEIGHT_UNITS: &[&str] = &["g", "kg", "oz", "lb"];
/// `inventory_policy` of a variant.
pub const INVENTORY_POLICIES: &[&str] = &["deny", "continue"];
/// `reason` accepted by an order cancellation.
pub const CANCEL_REASONS: &[&str] = &["CUSTOMER", "DECLINED", "FRAUD", "INVENTORY", "OTHER", "STAFF"];
/// `financial_status` of an order.
pub const FINANCIAL_STATUSES: &[&str] = &[
    "pending",
    "authorized",
    "partially_paid",
    "paid",
    "partially_refunded",
    "refunded",
    "voided",
];
/// `kind` of a transaction.
pub const TRANSACTION_KINDS: &[&str] = &["authorization", "capture", "sale", "void", "refund"];
/// `owner_resource` of a metafield.
pub const METAFIELD_OWNERS: &[&str] = &["product", "variant", "order"];
/// `type` of a metafield.
pub const METAFIELD_TYPES: &[&str] = &[
    "single_line_text_field",
    "multi_line_text_field",
    "json",
    "number_integer",
    "number_decimal",
    "boolean",
    "date",
    "date_time",
    "url",
    "color",
];

use Presence::{Always, OnCreate, OnUpdate, Optional, With};
use ValueKind::{Boolean, Decimal, Identifier, Integer, ListOf, Number, Object, Text, TextList};

const OPTION_FIELDS: &[FieldRule] = &[
    FieldRule::new("name", Always, Text),
    FieldRule::new("values", Optional, TextList),
    FieldRule::new("position", Optional, Integer),
];

const IMAGE_FIELDS: &[FieldRule] = &[
    FieldRule::new("src", Always, Text).pattern(PatternKind::Url),
    FieldRule::new("alt", Optional, Text),
    FieldRule::new("position", Optional, Integer),
];

const VARIANT_FIELDS: &[FieldRule] = &[
    FieldRule::new("id", Optional, Identifier),
    FieldRule::new("product_id", Optional, Identifier),
    FieldRule::new("sku", Optional, Text),
    FieldRule::new("price", OnCreate, Decimal).pattern(PatternKind::Price),
    FieldRule::new("compare_at_price", Optional, Decimal).pattern(PatternKind::Price),
    FieldRule::new("option1", Optional, Text),
    FieldRule::new("option2", Optional, Text),
    FieldRule::new("option3", Optional, Text),
    FieldRule::new("barcode", Optional, Text),
    FieldRule::new("taxable", Optional, Boolean),
    FieldRule::new("weight", Optional, Number),
    FieldRule::new("weight_unit", With("weight"), Text).one_of(WEIGHT_UNITS),
    FieldRule::new("inventory_policy", Optional, Text).one_of(INVENTORY_POLICIES),
    FieldRule::new("image_id", Optional, Identifier),
];

const VARIANT_KEY: &[FieldRule] = &[FieldRule::new("id", Always, Identifier)];

const PRODUCT_FIELDS: &[FieldRule] = &[
    FieldRule::new("id", OnUpdate, Identifier),
    FieldRule::new("title", OnCreate, Text),
    FieldRule::new("body_html", Optional, Text),
    FieldRule::new("vendor", Optional, Text),
    FieldRule::new("product_type", Optional, Text),
    FieldRule::new("handle", Optional, Text).pattern(PatternKind::Handle),
    FieldRule::new("tags", Optional, Text),
    FieldRule::new("status", Optional, Text).one_of(PRODUCT_STATUSES),
    FieldRule::new("published_scope", Optional, Text).one_of(PUBLISHED_SCOPES),
    FieldRule::new("template_suffix", Optional, Text),
    FieldRule::new("options", Optional, ListOf(OPTION_FIELDS)),
    FieldRule::new("image", Optional, Object(IMAGE_FIELDS)),
    FieldRule::new("images", Optional, ListOf(IMAGE_FIELDS)),
    FieldRule::new("variants", Optional, ListOf(VARIANT_FIELDS)),
];

const ADDRESS_FIELDS: &[FieldRule] = &[
    FieldRule::new("first_name", Optional, Text),
    FieldRule::new("last_name", Optional, Text),
    FieldRule::new("address1", Optional, Text),
    FieldRule::new("address2", Optional, Text),
    FieldRule::new("city", Optional, Text),
    FieldRule::new("province", Optional, Text),
    FieldRule::new("country", Optional, Text),
    FieldRule::new("zip", Optional, Text),
    FieldRule::new("phone", Optional, Text),
];

const LINE_ITEM_FIELDS: &[FieldRule] = &[
    FieldRule::new("variant_id", Optional, Identifier),
    FieldRule::new("title", Optional, Text),
    FieldRule::new("quantity", Always, Integer),
    FieldRule::new("price", Optional, Decimal).pattern(PatternKind::Price),
    FieldRule::new("sku", Optional, Text),
];

const ORDER_FIELDS: &[FieldRule] = &[
    FieldRule::new("id", OnUpdate, Identifier),
    FieldRule::new("email", Optional, Text).pattern(PatternKind::Email),
    FieldRule::new("note", Optional, Text),
    FieldRule::new("tags", Optional, Text),
    FieldRule::new("currency", Optional, Text).pattern(PatternKind::Currency),
    FieldRule::new("financial_status", Optional, Text).one_of(FINANCIAL_STATUSES),
    FieldRule::new("line_items", OnCreate, ListOf(LINE_ITEM_FIELDS)),
    FieldRule::new("shipping_address", Optional, Object(ADDRESS_FIELDS)),
    FieldRule::new("billing_address", Optional, Object(ADDRESS_FIELDS)),
];

const ORDER_NOTE_FIELDS: &[FieldRule] = &[
    FieldRule::new("id", Always, Identifier),
    FieldRule::new("note", Always, Text),
];

const CANCEL_FIELDS: &[FieldRule] = &[
    FieldRule::new("order_id", Always, Identifier),
    FieldRule::new("reason", Always, Text).one_of(CANCEL_REASONS),
    FieldRule::new("refund", Optional, Boolean),
    FieldRule::new("restock", Optional, Boolean),
    FieldRule::new("notify_customer", Optional, Boolean),
    FieldRule::new("staff_note", Optional, Text),
];

const TRACKING_FIELDS: &[FieldRule] = &[
    FieldRule::new("number", Optional, Text),
    FieldRule::new("company", Optional, Text),
    FieldRule::new("url", Optional, Text).pattern(PatternKind::Url),
];

const FULFILLMENT_FIELDS: &[FieldRule] = &[
    FieldRule::new("order_id", Always, Identifier),
    FieldRule::new("notify_customer", Optional, Boolean),
    FieldRule::new("tracking_info", Optional, Object(TRACKING_FIELDS)),
];

const METAFIELD_FIELDS: &[FieldRule] = &[
    FieldRule::new("owner_id", Always, Identifier),
    FieldRule::new("owner_resource", Always, Text).one_of(METAFIELD_OWNERS),
    FieldRule::new("namespace", Always, Text),
    FieldRule::new("key", Always, Text),
    FieldRule::new("value", Always, Text),
    FieldRule::new("type", Always, Text).one_of(METAFIELD_TYPES),
];

const TRANSACTION_FIELDS: &[FieldRule] = &[
    FieldRule::new("kind", Always, Text).one_of(TRANSACTION_KINDS),
    FieldRule::new("amount", Optional, Decimal).pattern(PatternKind::Price),
    FieldRule::new("currency", Optional, Text).pattern(PatternKind::Currency),
    FieldRule::new("parent_id", Optional, Identifier),
    FieldRule::new("gateway", Optional, Text),
    FieldRule::new("status", Optional, Text),
    FieldRule::new("test", Optional, Boolean),
];

/// The named schemas a document can be validated against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SchemaName {
    /// A new product with its options, images and variants.
    CreateProduct,
    /// Changes to an existing product.
    UpdateProduct,
    /// A new variant on an existing product.
    CreateVariant,
    /// Changes to an existing variant.
    UpdateVariant,
    /// A new order.
    CreateOrder,
    /// Changes to an existing order.
    UpdateOrder,
    /// A note added to an order.
    AddOrderNote,
    /// An order cancellation.
    CancelOrder,
    /// A fulfillment of an order's open fulfillment order.
    FulfillOrder,
    /// A single metafield write.
    SetMetafield,
    /// A new transaction on an order.
    CreateTransaction,
}

impl SchemaName {
    /// Every schema, in catalogue order.
    pub const ALL: [Self; 11] = [
        Self::CreateProduct,
        Self::UpdateProduct,
        Self::CreateVariant,
        Self::UpdateVariant,
        Self::CreateOrder,
        Self::UpdateOrder,
        Self::AddOrderNote,
        Self::CancelOrder,
        Self::FulfillOrder,
        Self::SetMetafield,
        Self::CreateTransaction,
    ];

    /// Returns the schema's string name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateProduct => "create-product",
            Self::UpdateProduct => "update-product",
            Self::CreateVariant => "create-variant",
            Self::UpdateVariant => "update-variant",
            Self::CreateOrder => "create-order",
            Self::UpdateOrder => "update-order",
            Self::AddOrderNote => "add-order-note",
            Self::CancelOrder => "cancel-order",
            Self::FulfillOrder => "fulfill-order",
            Self::SetMetafield => "set-metafield",
            Self::CreateTransaction => "create-transaction",
        }
    }

    pub(crate) const fn mode(self) -> Mode {
        match self {
            Self::UpdateProduct | Self::UpdateVariant | Self::UpdateOrder => Mode::Update,
            _ => Mode::Create,
        }
    }

    pub(crate) const fn tables(self) -> &'static [&'static [FieldRule]] {
        match self {
            Self::CreateProduct | Self::UpdateProduct => &[PRODUCT_FIELDS],
            Self::CreateVariant => &[VARIANT_FIELDS],
            Self::UpdateVariant => &[VARIANT_KEY, VARIANT_FIELDS],
            Self::CreateOrder | Self::UpdateOrder => &[ORDER_FIELDS],
            Self::AddOrderNote => &[ORDER_NOTE_FIELDS],
            Self::CancelOrder => &[CANCEL_FIELDS],
            Self::FulfillOrder => &[FULFILLMENT_FIELDS],
            Self::SetMetafield => &[METAFIELD_FIELDS],
            Self::CreateTransaction => &[TRANSACTION_FIELDS],
        }
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|schema| schema.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownSchema {
                name: s.to_string(),
            })
    }
}
