//! Metafield documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gid::ResourceKind;

/// The kind of resource a metafield is attached to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MetafieldOwner {
    /// A product.
    Product,
    /// A product variant.
    Variant,
    /// An order.
    Order,
}

impl MetafieldOwner {
    /// Returns the global id kind of the owner.
    #[must_use]
    pub const fn resource_kind(self) -> ResourceKind {
        match self {
            Self::Product => ResourceKind::Product,
            Self::Variant => ResourceKind::ProductVariant,
            Self::Order => ResourceKind::Order,
        }
    }
}

/// A metafield.
///
/// # Example
///
/// ```rust
/// use shopify_admin::model::{Metafield, MetafieldOwner};
///
/// let metafield = Metafield::new(MetafieldOwner::Order, 450789469, "erp", "export_id", "A-1001")
///     .with_type("single_line_text_field");
/// assert_eq!(metafield.value_type.as_deref(), Some("single_line_text_field"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Metafield {
    /// The unique identifier of the metafield.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Groups related metafields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Name within the namespace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// The stored value, always as a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// The metafield type, e.g. `json`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,

    /// The owning resource's numeric id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,

    /// The owning resource's kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_resource: Option<MetafieldOwner>,

    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Metafield {
    /// Creates a metafield on an owner. The type defaults to `single_line_text_field`.
    #[must_use]
    pub fn new(
        owner: MetafieldOwner,
        owner_id: u64,
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            namespace: Some(namespace.into()),
            key: Some(key.into()),
            value: Some(value.into()),
            value_type: Some("single_line_text_field".to_string()),
            owner_id: Some(owner_id),
            owner_resource: Some(owner),
            ..Default::default()
        }
    }

    /// Sets the metafield type.
    #[must_use]
    pub fn with_type(mut self, value_type: impl Into<String>) -> Self {
        self.value_type = Some(value_type.into());
        self
    }
}
