//! Product documents: products, options, images and variants.
//!
//! # Example
//!
//! ```rust
//! use shopify_admin::model::{Product, ProductOption, ProductVariant};
//!
//! let product = Product {
//!     title: Some("T-Shirt".to_string()),
//!     options: vec![ProductOption::new("Size", ["S", "M"])],
//!     variants: vec![
//!         ProductVariant {
//!             sku: Some("TS-S".to_string()),
//!             price: Some("19.99".to_string()),
//!             option1: Some("S".to_string()),
//!             ..Default::default()
//!         },
//!     ],
//!     ..Default::default()
//! };
//!
//! assert_eq!(product.variants[0].option_value(1), Some("S"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// The status of a product.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// The product is ready to sell.
    #[default]
    Active,
    /// The product is no longer being sold.
    Archived,
    /// The product is not ready to sell.
    Draft,
}

impl ProductStatus {
    /// Returns the GraphQL `ProductStatus` enum value.
    #[must_use]
    pub const fn as_remote(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Archived => "ARCHIVED",
            Self::Draft => "DRAFT",
        }
    }

    /// Parses a GraphQL `ProductStatus` enum value.
    #[must_use]
    pub fn from_remote(value: &str) -> Option<Self> {
        match value {
            "ACTIVE" => Some(Self::Active),
            "ARCHIVED" => Some(Self::Archived),
            "DRAFT" => Some(Self::Draft),
            _ => None,
        }
    }
}

/// The unit a variant's weight is expressed in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WeightUnit {
    /// Grams.
    #[serde(rename = "g")]
    Grams,
    /// Kilograms.
    #[serde(rename = "kg")]
    Kilograms,
    /// Ounces.
    #[serde(rename = "oz")]
    Ounces,
    /// Pounds.
    #[serde(rename = "lb")]
    Pounds,
}

impl WeightUnit {
    /// Returns the GraphQL `WeightUnit` enum value.
    #[must_use]
    pub const fn as_remote(self) -> &'static str {
        match self {
            Self::Grams => "GRAMS",
            Self::Kilograms => "KILOGRAMS",
            Self::Ounces => "OUNCES",
            Self::Pounds => "POUNDS",
        }
    }

    /// Parses a GraphQL `WeightUnit` enum value.
    #[must_use]
    pub fn from_remote(value: &str) -> Option<Self> {
        match value {
            "GRAMS" => Some(Self::Grams),
            "KILOGRAMS" => Some(Self::Kilograms),
            "OUNCES" => Some(Self::Ounces),
            "POUNDS" => Some(Self::Pounds),
            _ => None,
        }
    }
}

/// Whether customers can buy a variant that is out of stock.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InventoryPolicy {
    /// Stop selling when out of stock.
    Deny,
    /// Keep selling when out of stock.
    Continue,
}

impl InventoryPolicy {
    /// Returns the GraphQL `ProductVariantInventoryPolicy` enum value.
    #[must_use]
    pub const fn as_remote(self) -> &'static str {
        match self {
            Self::Deny => "DENY",
            Self::Continue => "CONTINUE",
        }
    }

    /// Parses a GraphQL `ProductVariantInventoryPolicy` enum value.
    #[must_use]
    pub fn from_remote(value: &str) -> Option<Self> {
        match value {
            "DENY" => Some(Self::Deny),
            "CONTINUE" => Some(Self::Continue),
            _ => None,
        }
    }
}

/// A product option such as "Size" or "Color".
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProductOption {
    /// The unique identifier of the option.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// The option's name.
    #[serde(default)]
    pub name: String,

    /// 1-based position among the product's options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,

    /// The values variants may select for this option.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl ProductOption {
    /// Creates an option with a name and its values.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

/// A product image.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProductImage {
    /// The unique identifier of the image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// 1-based position among the product's images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,

    /// Alt text. Variants whose SKU equals the alt text are linked to this image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    /// Source URL of the image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

impl ProductImage {
    /// Creates an image from a source URL and alt text.
    #[must_use]
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            alt: Some(alt.into()),
            ..Default::default()
        }
    }

    /// Returns `true` when both describe the same image, by id or else by source.
    #[must_use]
    pub fn is_same_as(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => self.src.is_some() && self.src == other.src,
        }
    }
}

/// A product variant.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProductVariant {
    /// The unique identifier of the variant. Absent for new variants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// The product this variant belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,

    /// The variant's title (read-only, derived from option values).
    #[serde(skip_serializing)]
    pub title: Option<String>,

    /// Stock keeping unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// Price as a decimal string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    /// Original price, shown struck through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<String>,

    /// Value selected for the first option.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option1: Option<String>,

    /// Value selected for the second option.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option2: Option<String>,

    /// Value selected for the third option.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option3: Option<String>,

    /// Barcode, UPC or ISBN.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,

    /// Whether tax is charged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxable: Option<bool>,

    /// Weight in `weight_unit`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    /// Unit of `weight`. Required whenever `weight` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_unit: Option<WeightUnit>,

    /// Behavior when out of stock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_policy: Option<InventoryPolicy>,

    /// The inventory item tracking this variant's stock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_item_id: Option<u64>,

    /// Explicit image association.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<u64>,

    /// 1-based position among the product's variants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,

    /// When the variant was created.
    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the variant was last updated.
    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProductVariant {
    /// Returns the value selected for option `position` (1, 2 or 3).
    #[must_use]
    pub fn option_value(&self, position: usize) -> Option<&str> {
        match position {
            1 => self.option1.as_deref(),
            2 => self.option2.as_deref(),
            3 => self.option3.as_deref(),
            _ => None,
        }
    }

    /// Returns the selected option values with their 1-based positions.
    pub fn selected_options(&self) -> impl Iterator<Item = (usize, &str)> {
        (1..=3).filter_map(|position| self.option_value(position).map(|value| (position, value)))
    }

    /// Sets the value for option `position` (1, 2 or 3). Other positions are ignored.
    pub fn set_option_value(&mut self, position: usize, value: Option<String>) {
        match position {
            1 => self.option1 = value,
            2 => self.option2 = value,
            3 => self.option3 = value,
            _ => {}
        }
    }
}

/// A product with its options, images and variants.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Product {
    /// The unique identifier of the product. Required for updates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// The product's title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Description in HTML.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,

    /// The product's vendor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    /// The product type, used for filtering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,

    /// URL-friendly handle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    /// Comma-separated tags.
    ///
    /// The canonical form joins trimmed tags with `", "`; deserialized
    /// documents and products read back from the API are always in it.
    /// See [`Product::normalize_tags`].
    #[serde(
        default,
        deserialize_with = "deserialize_tags",
        skip_serializing_if = "Option::is_none"
    )]
    pub tags: Option<String>,

    /// The product's status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,

    /// Where the product is published (`web` or `global`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_scope: Option<String>,

    /// Theme template suffix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_suffix: Option<String>,

    /// Option definitions, in position order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ProductOption>,

    /// The primary image. Attached before `images`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ProductImage>,

    /// Additional images.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ProductImage>,

    /// Variants.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<ProductVariant>,

    /// When the product was created.
    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the product was last updated.
    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Joins tags in the canonical `", "` form, or `None` when there are none.
#[must_use]
pub fn canonical_tags(tags: &str) -> Option<String> {
    let tags: Vec<&str> = tags
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .collect();
    (!tags.is_empty()).then(|| tags.join(", "))
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags = Option::<String>::deserialize(deserializer)?;
    Ok(tags.as_deref().and_then(canonical_tags))
}

impl Product {
    /// Returns every image to attach, the primary image first.
    ///
    /// REST payloads repeat the primary image inside `images`; the copy is
    /// skipped.
    pub fn all_images(&self) -> impl Iterator<Item = &ProductImage> {
        let primary = self.image.as_ref();
        primary.into_iter().chain(
            self.images
                .iter()
                .filter(move |image| !primary.is_some_and(|p| p.is_same_as(image))),
        )
    }

    /// Rewrites `tags` into the canonical form.
    pub fn normalize_tags(&mut self) {
        self.tags = self.tags.as_deref().and_then(canonical_tags);
    }

    /// Returns the tags as a list, trimming whitespace around each one.
    #[must_use]
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}
