//! Product translation.
//!
//! The read shape ([`RemoteProduct`]) mirrors the fields selected by the
//! product queries, so `productCreate` payloads and `product(id:)` reads
//! decode into the same type.
//!
//! Fields with no GraphQL counterpart (`published_scope`,
//! `template_suffix`, image `position`) come back as `None` from
//! [`from_remote`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::gid::{GlobalId, ResourceKind};
use crate::model::{Product, ProductOption, ProductStatus};
use crate::translate::image::{self, RemoteMedia};
use crate::translate::variant::{self, RemoteVariant};
use crate::translate::{gid_string, put, rest_id, Connection, TranslateError};

/// Placeholder value given to every option at creation time.
///
/// Real values arrive with the variants.
pub const PLACEHOLDER_OPTION_VALUE: &str = "_";

/// A product as read from the GraphQL API.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteProduct {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description_html: Option<String>,
    pub vendor: Option<String>,
    pub product_type: Option<String>,
    pub handle: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub options: Vec<RemoteOption>,
    pub featured_media: Option<RemoteMedia>,
    #[serde(default)]
    pub media: Connection<RemoteMedia>,
    #[serde(default)]
    pub variants: Connection<RemoteVariant>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// An option definition as read from the GraphQL API.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteOption {
    pub id: Option<String>,
    pub name: String,
    pub position: Option<i64>,
    #[serde(default)]
    pub option_values: Vec<RemoteOptionValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RemoteOptionValue {
    pub name: String,
}

impl RemoteProduct {
    /// Returns the first variant's global id, if any.
    #[must_use]
    pub fn first_variant_id(&self) -> Option<&str> {
        self.variants
            .edges
            .first()
            .and_then(|edge| edge.node.id.as_deref())
    }
}

/// Converts a product into its GraphQL read shape.
///
/// # Errors
///
/// Returns [`TranslateError::MissingOptionDefinition`] when a variant
/// selects an option the product does not declare.
pub fn to_remote(product: &Product) -> Result<RemoteProduct, TranslateError> {
    let variants = product
        .variants
        .iter()
        .map(|v| variant::to_remote(v, &product.options))
        .collect::<Result<Connection<_>, _>>()?;

    let options = product
        .options
        .iter()
        .map(|option| RemoteOption {
            id: gid_string(ResourceKind::ProductOption, option.id),
            name: option.name.clone(),
            position: option.position,
            option_values: option
                .values
                .iter()
                .map(|name| RemoteOptionValue { name: name.clone() })
                .collect(),
        })
        .collect();

    Ok(RemoteProduct {
        id: gid_string(ResourceKind::Product, product.id),
        title: product.title.clone(),
        description_html: product.body_html.clone(),
        vendor: product.vendor.clone(),
        product_type: product.product_type.clone(),
        handle: product.handle.clone(),
        tags: product.tag_list(),
        status: product.status.map(|s| s.as_remote().to_string()),
        options,
        featured_media: product.image.as_ref().map(image::to_remote),
        media: product.all_images().map(image::to_remote).collect(),
        variants,
        created_at: product.created_at,
        updated_at: product.updated_at,
    })
}

/// Converts remote option definitions into product options.
///
/// # Errors
///
/// Returns [`TranslateError::Identifier`] if an option id is malformed.
pub fn options_from_remote(options: Vec<RemoteOption>) -> Result<Vec<ProductOption>, TranslateError> {
    options
        .into_iter()
        .map(|option| {
            Ok(ProductOption {
                id: rest_id(option.id.as_deref())?,
                name: option.name,
                position: option.position,
                values: option.option_values.into_iter().map(|v| v.name).collect(),
            })
        })
        .collect()
}

/// Flattens a remote product into a product.
///
/// Global ids become numeric ids, tags are joined with `", "`, and the
/// featured media becomes `image` while the remaining media become `images`.
/// Media that is not an image (videos, 3D models) is left out.
///
/// # Errors
///
/// Returns [`TranslateError::Identifier`] if an embedded id is malformed.
pub fn from_remote(remote: RemoteProduct) -> Result<Product, TranslateError> {
    let id = rest_id(remote.id.as_deref())?;
    let options = options_from_remote(remote.options)?;

    let mut featured_seen = false;
    let mut images = Vec::new();
    for media in remote.media.into_nodes() {
        if !media.is_image() {
            continue;
        }
        if !featured_seen && remote.featured_media.as_ref() == Some(&media) {
            featured_seen = true;
            continue;
        }
        images.push(image::from_remote(media)?);
    }

    let variants = remote
        .variants
        .into_nodes()
        .into_iter()
        .map(|node| variant::from_remote(node, &options, id))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Product {
        id,
        title: remote.title,
        body_html: remote.description_html,
        vendor: remote.vendor,
        product_type: remote.product_type,
        handle: remote.handle,
        tags: (!remote.tags.is_empty()).then(|| remote.tags.join(", ")),
        status: remote.status.as_deref().and_then(ProductStatus::from_remote),
        published_scope: None,
        template_suffix: None,
        options,
        image: remote
            .featured_media
            .filter(RemoteMedia::is_image)
            .map(image::from_remote)
            .transpose()?,
        images,
        variants,
        created_at: remote.created_at,
        updated_at: remote.updated_at,
    })
}

fn base_input(product: &Product) -> Map<String, Value> {
    let mut input = Map::new();
    put(&mut input, "title", product.title.as_deref());
    put(&mut input, "descriptionHtml", product.body_html.as_deref());
    put(&mut input, "vendor", product.vendor.as_deref());
    put(&mut input, "productType", product.product_type.as_deref());
    put(&mut input, "handle", product.handle.as_deref());
    put(&mut input, "tags", product.tags.as_ref().map(|_| product.tag_list()));
    put(&mut input, "status", product.status.map(ProductStatus::as_remote));
    input
}

/// Builds the `ProductCreateInput` for the base create call.
///
/// Each option is declared with a single placeholder value; `productOptions`
/// is omitted when the product has no options.
#[must_use]
pub fn create_input(product: &Product) -> Value {
    let mut input = base_input(product);

    if !product.options.is_empty() {
        let options: Vec<Value> = product
            .options
            .iter()
            .map(|option| {
                json!({
                    "name": option.name,
                    "values": [{ "name": PLACEHOLDER_OPTION_VALUE }],
                })
            })
            .collect();
        input.insert("productOptions".to_string(), Value::Array(options));
    }

    Value::Object(input)
}

/// Builds the `ProductUpdateInput` for an existing product.
#[must_use]
pub fn update_input(product: &Product, id: &GlobalId) -> Value {
    let mut input = base_input(product);
    input.insert("id".to_string(), Value::String(id.to_string()));
    Value::Object(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InventoryPolicy, ProductImage, ProductVariant, WeightUnit};

    fn sample_product() -> Product {
        Product {
            id: Some(632_910_392),
            title: Some("T-Shirt".to_string()),
            body_html: Some("<p>Soft</p>".to_string()),
            vendor: Some("Acme".to_string()),
            product_type: Some("Shirts".to_string()),
            handle: Some("t-shirt".to_string()),
            tags: Some("cotton, summer".to_string()),
            status: Some(ProductStatus::Draft),
            published_scope: Some("web".to_string()),
            template_suffix: Some("special".to_string()),
            options: vec![ProductOption {
                id: Some(11),
                name: "Size".to_string(),
                position: Some(1),
                values: vec!["S".to_string(), "M".to_string()],
            }],
            image: Some(ProductImage {
                id: Some(21),
                alt: Some("front".to_string()),
                src: Some("https://x/front.png".to_string()),
                position: None,
            }),
            images: vec![ProductImage {
                id: Some(22),
                alt: Some("TS-S".to_string()),
                src: Some("https://x/small.png".to_string()),
                position: None,
            }],
            variants: vec![ProductVariant {
                id: Some(31),
                product_id: Some(632_910_392),
                title: Some("S".to_string()),
                sku: Some("TS-S".to_string()),
                price: Some("19.99".to_string()),
                compare_at_price: Some("24.99".to_string()),
                option1: Some("S".to_string()),
                barcode: Some("1234".to_string()),
                taxable: Some(true),
                weight: Some(0.2),
                weight_unit: Some(WeightUnit::Kilograms),
                inventory_policy: Some(InventoryPolicy::Continue),
                inventory_item_id: Some(41),
                image_id: Some(22),
                position: Some(1),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_round_trip_restores_fields_with_remote_counterparts() {
        let product = sample_product();
        let restored = from_remote(to_remote(&product).unwrap()).unwrap();

        let expected = Product {
            published_scope: None,
            template_suffix: None,
            ..product
        };
        assert_eq!(restored, expected);
    }

    #[test]
    fn test_round_trip_restores_normalized_tags() {
        let mut product = Product {
            title: Some("Tee".to_string()),
            tags: Some("cotton,summer".to_string()),
            ..Default::default()
        };
        let restored = from_remote(to_remote(&product).unwrap()).unwrap();
        assert_eq!(restored.tags.as_deref(), Some("cotton, summer"));

        product.normalize_tags();
        assert_eq!(from_remote(to_remote(&product).unwrap()).unwrap(), product);
    }

    #[test]
    fn test_round_trip_does_not_duplicate_repeated_primary_image() {
        let mut product = sample_product();
        product.images.insert(0, product.image.clone().unwrap());

        let remote = to_remote(&product).unwrap();
        assert_eq!(remote.media.edges.len(), 2);

        let restored = from_remote(remote).unwrap();
        assert_eq!(restored.images, sample_product().images);
    }

    #[test]
    fn test_from_remote_skips_video_featured_media() {
        let remote: RemoteProduct = serde_json::from_value(json!({
            "id": "gid://shopify/Product/1",
            "featuredMedia": {"id": "gid://shopify/Video/9", "mediaContentType": "VIDEO"},
            "media": {"edges": [
                {"node": {"id": "gid://shopify/Video/9", "mediaContentType": "VIDEO"}},
                {"node": {"id": "gid://shopify/MediaImage/3", "alt": "side",
                          "mediaContentType": "IMAGE", "image": {"url": "https://x/side.png"}}}
            ]}
        }))
        .unwrap();

        let product = from_remote(remote).unwrap();
        assert!(product.image.is_none());
        assert_eq!(product.images.len(), 1);
        assert_eq!(product.images[0].id, Some(3));
    }

    #[test]
    fn test_round_trip_through_json() {
        let product = sample_product();
        let json = serde_json::to_value(to_remote(&product).unwrap()).unwrap();
        let remote: RemoteProduct = serde_json::from_value(json).unwrap();
        assert_eq!(from_remote(remote).unwrap().variants, product.variants);
    }

    #[test]
    fn test_to_remote_rewrites_ids_and_tags() {
        let remote = to_remote(&sample_product()).unwrap();
        assert_eq!(remote.id.as_deref(), Some("gid://shopify/Product/632910392"));
        assert_eq!(remote.tags, vec!["cotton", "summer"]);
        assert_eq!(remote.status.as_deref(), Some("DRAFT"));
        assert_eq!(remote.media.edges.len(), 2);
        assert_eq!(
            remote.first_variant_id(),
            Some("gid://shopify/ProductVariant/31")
        );
    }

    #[test]
    fn test_from_remote_flattens_read_payload() {
        let remote: RemoteProduct = serde_json::from_value(json!({
            "id": "gid://shopify/Product/1",
            "title": "Hat",
            "tags": ["wool", "winter"],
            "status": "ACTIVE",
            "options": [{"id": "gid://shopify/ProductOption/2", "name": "Title", "position": 1,
                         "optionValues": [{"name": "Default Title"}]}],
            "media": {"edges": [
                {"node": {"mediaContentType": "VIDEO"}},
                {"node": {"id": "gid://shopify/MediaImage/3", "alt": "hat",
                          "mediaContentType": "IMAGE", "image": {"url": "https://x/hat.png"}}}
            ]},
            "variants": {"edges": [{"node": {
                "id": "gid://shopify/ProductVariant/4",
                "selectedOptions": [{"name": "Title", "value": "Default Title"}]
            }}]}
        }))
        .unwrap();

        let product = from_remote(remote).unwrap();
        assert_eq!(product.id, Some(1));
        assert_eq!(product.tags.as_deref(), Some("wool, winter"));
        assert_eq!(product.status, Some(ProductStatus::Active));
        assert_eq!(product.options[0].id, Some(2));
        assert!(product.image.is_none());
        assert_eq!(product.images.len(), 1);
        assert_eq!(product.images[0].id, Some(3));
        assert_eq!(product.variants[0].id, Some(4));
        assert_eq!(product.variants[0].product_id, Some(1));
        assert_eq!(product.variants[0].option1.as_deref(), Some("Default Title"));
        assert!(product.template_suffix.is_none());
    }

    #[test]
    fn test_create_input_uses_placeholder_option_values() {
        let input = create_input(&sample_product());
        assert_eq!(input["title"], "T-Shirt");
        assert_eq!(input["descriptionHtml"], "<p>Soft</p>");
        assert_eq!(input["productType"], "Shirts");
        assert_eq!(input["tags"], json!(["cotton", "summer"]));
        assert_eq!(input["status"], "DRAFT");
        assert_eq!(
            input["productOptions"],
            json!([{"name": "Size", "values": [{"name": "_"}]}])
        );
        assert!(input.get("templateSuffix").is_none());
        assert!(input.get("id").is_none());
    }

    #[test]
    fn test_create_input_omits_empty_options() {
        let product = Product {
            title: Some("Test".to_string()),
            ..Default::default()
        };
        assert_eq!(create_input(&product), json!({"title": "Test"}));
    }

    #[test]
    fn test_update_input_carries_id_without_options() {
        let id = GlobalId::from_numeric(ResourceKind::Product, 632_910_392);
        let input = update_input(&sample_product(), &id);
        assert_eq!(input["id"], "gid://shopify/Product/632910392");
        assert!(input.get("productOptions").is_none());
    }
}
