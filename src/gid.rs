//! Global identifier handling.
//!
//! The REST API addresses resources by bare numeric ids (`632910392`) while
//! the GraphQL API uses namespaced global ids
//! (`gid://shopify/Product/632910392`). [`normalize`] converts anything that
//! carries the digits of an id into the namespaced form for a given
//! [`ResourceKind`], and [`GlobalId::parse`] goes the other way.
//!
//! # Example
//!
//! ```rust
//! use shopify_admin::gid::{normalize, ResourceKind};
//!
//! let id = normalize("123", ResourceKind::Order).unwrap();
//! assert_eq!(id.to_string(), "gid://shopify/Order/123");
//!
//! // Normalizing twice changes nothing.
//! let again = normalize(&id.to_string(), ResourceKind::Order).unwrap();
//! assert_eq!(again, id);
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const PREFIX: &str = "gid://shopify/";

/// The resource families that carry global ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A product.
    Product,
    /// A product variant.
    ProductVariant,
    /// A product option definition.
    ProductOption,
    /// An order.
    Order,
    /// A line item on an order.
    LineItem,
    /// The inventory item behind a variant.
    InventoryItem,
    /// A legacy product image.
    Image,
    /// A media image attached through `productCreateMedia`.
    MediaImage,
    /// A stock location.
    Location,
    /// A fulfillment order.
    FulfillmentOrder,
    /// An order transaction.
    OrderTransaction,
    /// A metafield.
    Metafield,
}

impl ResourceKind {
    /// Returns the type name used inside a global id.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::ProductVariant => "ProductVariant",
            Self::ProductOption => "ProductOption",
            Self::Order => "Order",
            Self::LineItem => "LineItem",
            Self::InventoryItem => "InventoryItem",
            Self::Image => "ProductImage",
            Self::MediaImage => "MediaImage",
            Self::Location => "Location",
            Self::FulfillmentOrder => "FulfillmentOrder",
            Self::OrderTransaction => "OrderTransaction",
            Self::Metafield => "Metafield",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const KINDS: [ResourceKind; 12] = [
            ResourceKind::Product,
            ResourceKind::ProductVariant,
            ResourceKind::ProductOption,
            ResourceKind::Order,
            ResourceKind::LineItem,
            ResourceKind::InventoryItem,
            ResourceKind::Image,
            ResourceKind::MediaImage,
            ResourceKind::Location,
            ResourceKind::FulfillmentOrder,
            ResourceKind::OrderTransaction,
            ResourceKind::Metafield,
        ];

        KINDS
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| IdError::UnknownKind {
                kind: s.to_string(),
            })
    }
}

/// Errors produced while handling identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// No digits were left after stripping the raw value.
    #[error("Invalid {kind} identifier: {raw:?}")]
    InvalidIdentifier {
        /// The value that was supplied.
        raw: String,
        /// The kind it was normalized for.
        kind: ResourceKind,
    },

    /// A global id named a type this crate does not model.
    #[error("Unknown global id type: {kind}")]
    UnknownKind {
        /// The type segment of the id.
        kind: String,
    },
}

/// A namespaced global identifier.
///
/// Displays as `gid://shopify/<Kind>/<digits>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GlobalId {
    kind: ResourceKind,
    numeric: String,
}

impl GlobalId {
    /// Builds a global id from a numeric REST id.
    #[must_use]
    pub fn from_numeric(kind: ResourceKind, id: u64) -> Self {
        Self {
            kind,
            numeric: id.to_string(),
        }
    }

    /// Parses a namespaced global id of any known kind.
    ///
    /// Query strings such as `?inventory_item_id=1` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidIdentifier`] if the string is not in the
    /// namespaced form, or [`IdError::UnknownKind`] for an unmodelled type.
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        let invalid = |kind| IdError::InvalidIdentifier {
            raw: raw.to_string(),
            kind,
        };

        let rest = raw
            .strip_prefix(PREFIX)
            .ok_or_else(|| invalid(ResourceKind::Product))?;
        let (kind, numeric) = rest
            .split_once('/')
            .ok_or_else(|| invalid(ResourceKind::Product))?;
        let kind: ResourceKind = kind.parse()?;
        let numeric = numeric.split('?').next().unwrap_or_default();

        if numeric.is_empty() || !numeric.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid(kind));
        }

        Ok(Self {
            kind,
            numeric: numeric.to_string(),
        })
    }

    /// Returns the resource kind.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Returns the bare numeric portion as a string.
    #[must_use]
    pub fn numeric(&self) -> &str {
        &self.numeric
    }

    /// Returns the numeric portion as a REST id, if it fits in a `u64`.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        self.numeric.parse().ok()
    }
}

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}/{}", self.kind, self.numeric)
    }
}

impl From<GlobalId> for String {
    fn from(id: GlobalId) -> Self {
        id.to_string()
    }
}

/// Converts `raw` into the namespaced global id for `kind`.
///
/// A value that is already a well-formed global id of `kind` comes back
/// unchanged. Anything else has every non-digit character stripped and the
/// remaining digits wrapped.
///
/// # Errors
///
/// Returns [`IdError::InvalidIdentifier`] when no digits remain.
pub fn normalize(raw: &str, kind: ResourceKind) -> Result<GlobalId, IdError> {
    if let Ok(id) = GlobalId::parse(raw) {
        if id.kind == kind {
            return Ok(id);
        }
    }

    let numeric: String = raw.chars().filter(char::is_ascii_digit).collect();
    if numeric.is_empty() {
        return Err(IdError::InvalidIdentifier {
            raw: raw.to_string(),
            kind,
        });
    }

    Ok(GlobalId { kind, numeric })
}

/// Normalizes a numeric REST id.
#[must_use]
pub fn from_rest_id(id: u64, kind: ResourceKind) -> GlobalId {
    GlobalId::from_numeric(kind, id)
}

/// Extracts the numeric REST id from a global id string, if it has one.
#[must_use]
pub fn to_rest_id(raw: &str) -> Option<u64> {
    GlobalId::parse(raw).ok().and_then(|id| id.as_u64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_wraps_bare_numeric_id() {
        let id = normalize("123", ResourceKind::Order).unwrap();
        assert_eq!(id.to_string(), "gid://shopify/Order/123");
        assert_eq!(id.as_u64(), Some(123));
    }

    #[test]
    fn test_normalize_returns_namespaced_id_unchanged() {
        let raw = "gid://shopify/ProductVariant/39072856";
        let id = normalize(raw, ResourceKind::ProductVariant).unwrap();
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for (raw, kind) in [
            ("632910392", ResourceKind::Product),
            ("#1001", ResourceKind::Order),
            (" 808950810 ", ResourceKind::ProductVariant),
            ("gid://shopify/InventoryItem/39072856", ResourceKind::InventoryItem),
            ("gid://shopify/Product/42", ResourceKind::Order),
            ("ProductImage-850703190", ResourceKind::Image),
        ] {
            let once = normalize(raw, kind).unwrap();
            let twice = normalize(&once.to_string(), kind).unwrap();
            assert_eq!(once, twice, "normalize not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_normalize_strips_noise() {
        let id = normalize("#1001", ResourceKind::Order).unwrap();
        assert_eq!(id.to_string(), "gid://shopify/Order/1001");
    }

    #[test]
    fn test_normalize_rewraps_other_kind() {
        let id = normalize("gid://shopify/Product/42", ResourceKind::Order).unwrap();
        assert_eq!(id.to_string(), "gid://shopify/Order/42");
    }

    #[test]
    fn test_normalize_rejects_values_without_digits() {
        let result = normalize("not-an-id", ResourceKind::Product);
        assert_eq!(
            result,
            Err(IdError::InvalidIdentifier {
                raw: "not-an-id".to_string(),
                kind: ResourceKind::Product,
            })
        );
        assert!(normalize("", ResourceKind::Order).is_err());
    }

    #[test]
    fn test_image_kind_uses_product_image_type() {
        let id = normalize("850703190", ResourceKind::Image).unwrap();
        assert_eq!(id.to_string(), "gid://shopify/ProductImage/850703190");
    }

    #[test]
    fn test_parse_ignores_query_suffix() {
        let id = GlobalId::parse("gid://shopify/ProductVariant/1?inventory_item_id=2").unwrap();
        assert_eq!(id.kind(), ResourceKind::ProductVariant);
        assert_eq!(id.numeric(), "1");
    }

    #[test]
    fn test_parse_rejects_unknown_types() {
        assert!(matches!(
            GlobalId::parse("gid://shopify/Collection/1"),
            Err(IdError::UnknownKind { .. })
        ));
        assert!(GlobalId::parse("123").is_err());
        assert!(GlobalId::parse("gid://shopify/Product/abc").is_err());
    }

    #[test]
    fn test_to_rest_id() {
        assert_eq!(to_rest_id("gid://shopify/Product/632910392"), Some(632_910_392));
        assert_eq!(to_rest_id("632910392"), None);
        assert_eq!(
            from_rest_id(7, ResourceKind::Location).to_string(),
            "gid://shopify/Location/7"
        );
    }
}
