//! Image translation and media bookkeeping.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::clients::graphql::UserError;
use crate::gid::{GlobalId, ResourceKind};
use crate::model::{ProductImage, ProductVariant};
use crate::translate::{gid_string, rest_id, TranslateError};

const IMAGE_CONTENT_TYPE: &str = "IMAGE";

/// A media node as read from a product's `media` connection.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteMedia {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<RemoteImageSource>,
}

/// The `image { url }` part of a media image.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RemoteImageSource {
    pub url: String,
}

impl RemoteMedia {
    /// Returns `true` for image media, or nodes that do not report a type.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.media_content_type
            .as_deref()
            .map_or(true, |kind| kind == IMAGE_CONTENT_TYPE)
    }
}

/// Converts an image into its media read shape.
#[must_use]
pub fn to_remote(image: &ProductImage) -> RemoteMedia {
    RemoteMedia {
        id: gid_string(ResourceKind::MediaImage, image.id),
        alt: image.alt.clone(),
        media_content_type: Some(IMAGE_CONTENT_TYPE.to_string()),
        image: image.src.clone().map(|url| RemoteImageSource { url }),
    }
}

/// Converts a media node back into an image.
///
/// # Errors
///
/// Returns [`TranslateError::Identifier`] if the media id is malformed.
pub fn from_remote(media: RemoteMedia) -> Result<ProductImage, TranslateError> {
    Ok(ProductImage {
        id: rest_id(media.id.as_deref())?,
        position: None,
        alt: media.alt,
        src: media.image.map(|image| image.url),
    })
}

/// Builds a `CreateMediaInput` for `productCreateMedia`.
///
/// # Errors
///
/// Returns [`TranslateError::MissingField`] when the image has no `src`.
pub fn media_input(image: &ProductImage) -> Result<Value, TranslateError> {
    let src = image
        .src
        .as_deref()
        .ok_or(TranslateError::MissingField { field: "src" })?;

    Ok(json!({
        "alt": image.alt.as_deref().unwrap_or_default(),
        "mediaContentType": IMAGE_CONTENT_TYPE,
        "originalSource": src,
    }))
}

/// Returns the index of the input a `mediaUserErrors` entry refers to.
///
/// Field paths look like `["media", "1", "originalSource"]`.
#[must_use]
pub fn media_error_index(error: &UserError) -> Option<usize> {
    let field = error.field.as_ref()?;
    match field.as_slice() {
        [root, index, ..] if root == "media" => index.parse().ok(),
        _ => None,
    }
}

/// Picks the media a variant should be linked to.
///
/// An explicit `image_id` wins. Otherwise the first uploaded image whose alt
/// text equals the variant's SKU is used. No match means no link.
pub fn resolve_media_id<'a, I>(variant: &ProductVariant, uploaded: I) -> Option<GlobalId>
where
    I: IntoIterator<Item = (Option<&'a str>, &'a GlobalId)>,
{
    if let Some(image_id) = variant.image_id {
        return Some(GlobalId::from_numeric(ResourceKind::MediaImage, image_id));
    }

    let sku = variant.sku.as_deref()?;
    uploaded
        .into_iter()
        .find(|(alt, _)| *alt == Some(sku))
        .map(|(_, id)| id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media_id(n: u64) -> GlobalId {
        GlobalId::from_numeric(ResourceKind::MediaImage, n)
    }

    #[test]
    fn test_media_input_shape() {
        let image = ProductImage::new("https://x/a.png", "SKU1");
        assert_eq!(
            media_input(&image).unwrap(),
            json!({
                "alt": "SKU1",
                "mediaContentType": "IMAGE",
                "originalSource": "https://x/a.png"
            })
        );
    }

    #[test]
    fn test_media_input_requires_src() {
        let image = ProductImage {
            alt: Some("no source".to_string()),
            ..Default::default()
        };
        assert_eq!(
            media_input(&image),
            Err(TranslateError::MissingField { field: "src" })
        );
    }

    #[test]
    fn test_resolve_media_id_matches_sku_against_alt() {
        let first = media_id(1);
        let second = media_id(2);
        let uploaded = [(Some("SKU0"), &first), (Some("SKU1"), &second)];

        let matching = ProductVariant {
            sku: Some("SKU1".to_string()),
            ..Default::default()
        };
        let unmatched = ProductVariant {
            sku: Some("SKU9".to_string()),
            ..Default::default()
        };

        assert_eq!(resolve_media_id(&matching, uploaded), Some(media_id(2)));
        assert_eq!(resolve_media_id(&unmatched, uploaded), None);
    }

    #[test]
    fn test_resolve_media_id_first_match_wins() {
        let first = media_id(1);
        let second = media_id(2);
        let variant = ProductVariant {
            sku: Some("DUP".to_string()),
            ..Default::default()
        };

        let resolved = resolve_media_id(&variant, [(Some("DUP"), &first), (Some("DUP"), &second)]);
        assert_eq!(resolved, Some(media_id(1)));
    }

    #[test]
    fn test_resolve_media_id_prefers_explicit_image() {
        let uploaded = media_id(1);
        let variant = ProductVariant {
            sku: Some("SKU1".to_string()),
            image_id: Some(77),
            ..Default::default()
        };
        assert_eq!(
            resolve_media_id(&variant, [(Some("SKU1"), &uploaded)]),
            Some(media_id(77))
        );
    }

    #[test]
    fn test_media_error_index() {
        let error = UserError {
            field: Some(vec!["media".into(), "1".into(), "originalSource".into()]),
            message: "Image URL is invalid".to_string(),
            code: None,
        };
        assert_eq!(media_error_index(&error), Some(1));

        let unscoped = UserError {
            field: None,
            message: "Product is locked".to_string(),
            code: None,
        };
        assert_eq!(media_error_index(&unscoped), None);
    }

    #[test]
    fn test_media_round_trip() {
        let image = ProductImage {
            id: Some(5),
            alt: Some("front".to_string()),
            src: Some("https://x/front.png".to_string()),
            position: None,
        };
        let remote = to_remote(&image);
        assert_eq!(remote.id.as_deref(), Some("gid://shopify/MediaImage/5"));
        assert!(remote.is_image());
        assert_eq!(from_remote(remote).unwrap(), image);
    }
}
