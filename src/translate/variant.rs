//! Variant translation and option binding.
//!
//! Variants select option values by position (`option1`..`option3`) while
//! the GraphQL API names the option each value belongs to. Binding resolves
//! position *n* to the product's *n*-th declared option.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::gid::{GlobalId, IdError, ResourceKind};
use crate::model::{InventoryPolicy, ProductOption, ProductVariant, WeightUnit};
use crate::translate::{gid_string, put, rest_id, Connection, TranslateError};

/// A selected `{name, value}` pair on a remote variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

/// A variant as read from the GraphQL API.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteVariant {
    pub id: Option<String>,
    pub title: Option<String>,
    pub sku: Option<String>,
    pub price: Option<String>,
    pub compare_at_price: Option<String>,
    pub barcode: Option<String>,
    pub taxable: Option<bool>,
    pub inventory_policy: Option<String>,
    pub position: Option<i64>,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
    pub inventory_item: Option<RemoteInventoryItem>,
    #[serde(default)]
    pub media: Connection<RemoteNodeRef>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// The inventory item behind a remote variant.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RemoteInventoryItem {
    pub id: Option<String>,
    pub measurement: Option<RemoteMeasurement>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RemoteMeasurement {
    pub weight: Option<RemoteWeight>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteWeight {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// A node that is only referenced by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteNodeRef {
    pub id: String,
}

/// Resolves a variant's selected option values to option names.
///
/// # Errors
///
/// Returns [`TranslateError::MissingOptionDefinition`] when the variant
/// selects a value at a position beyond the declared options.
pub fn bind_options(
    variant: &ProductVariant,
    options: &[ProductOption],
) -> Result<Vec<SelectedOption>, TranslateError> {
    variant
        .selected_options()
        .map(|(position, value)| {
            options
                .get(position - 1)
                .map(|option| SelectedOption {
                    name: option.name.clone(),
                    value: value.to_string(),
                })
                .ok_or_else(|| TranslateError::MissingOptionDefinition {
                    position,
                    declared: options.len(),
                    sku: variant.sku.clone(),
                })
        })
        .collect()
}

/// Converts a variant into its GraphQL read shape.
///
/// # Errors
///
/// Fails like [`bind_options`].
pub fn to_remote(
    variant: &ProductVariant,
    options: &[ProductOption],
) -> Result<RemoteVariant, TranslateError> {
    let weight = variant.weight.map(|value| RemoteWeight {
        value,
        unit: variant.weight_unit.map(|unit| unit.as_remote().to_string()),
    });
    let inventory_item_id = gid_string(ResourceKind::InventoryItem, variant.inventory_item_id);
    let inventory_item = (inventory_item_id.is_some() || weight.is_some()).then(|| {
        RemoteInventoryItem {
            id: inventory_item_id,
            measurement: weight.map(|weight| RemoteMeasurement {
                weight: Some(weight),
            }),
        }
    });

    Ok(RemoteVariant {
        id: gid_string(ResourceKind::ProductVariant, variant.id),
        title: variant.title.clone(),
        sku: variant.sku.clone(),
        price: variant.price.clone(),
        compare_at_price: variant.compare_at_price.clone(),
        barcode: variant.barcode.clone(),
        taxable: variant.taxable,
        inventory_policy: variant.inventory_policy.map(|p| p.as_remote().to_string()),
        position: variant.position,
        selected_options: bind_options(variant, options)?,
        inventory_item,
        media: gid_string(ResourceKind::MediaImage, variant.image_id)
            .map(|id| RemoteNodeRef { id })
            .into_iter()
            .collect(),
        created_at: variant.created_at,
        updated_at: variant.updated_at,
    })
}

/// Converts a remote variant back into a variant.
///
/// Selected options are placed at the position of the product option with
/// the same name, falling back to their order in the node.
///
/// # Errors
///
/// Returns [`TranslateError::Identifier`] if an embedded id is malformed.
pub fn from_remote(
    remote: RemoteVariant,
    options: &[ProductOption],
    product_id: Option<u64>,
) -> Result<ProductVariant, TranslateError> {
    let (inventory_item_id, weight) = match remote.inventory_item {
        Some(item) => (
            rest_id(item.id.as_deref())?,
            item.measurement.and_then(|m| m.weight),
        ),
        None => (None, None),
    };
    // Only image media can back `image_id`; videos and models are skipped.
    let image_id = remote
        .media
        .into_nodes()
        .into_iter()
        .find(|node| !matches!(GlobalId::parse(&node.id), Err(IdError::UnknownKind { .. })))
        .map(|node| rest_id(Some(&node.id)))
        .transpose()?
        .flatten();

    let mut variant = ProductVariant {
        id: rest_id(remote.id.as_deref())?,
        product_id,
        title: remote.title,
        sku: remote.sku,
        price: remote.price,
        compare_at_price: remote.compare_at_price,
        barcode: remote.barcode,
        taxable: remote.taxable,
        weight: weight.as_ref().map(|w| w.value),
        weight_unit: weight
            .as_ref()
            .and_then(|w| w.unit.as_deref())
            .and_then(WeightUnit::from_remote),
        inventory_policy: remote
            .inventory_policy
            .as_deref()
            .and_then(InventoryPolicy::from_remote),
        inventory_item_id,
        image_id,
        position: remote.position,
        created_at: remote.created_at,
        updated_at: remote.updated_at,
        ..Default::default()
    };

    for (index, selected) in remote.selected_options.into_iter().enumerate() {
        let position = options
            .iter()
            .position(|option| option.name == selected.name)
            .unwrap_or(index)
            + 1;
        variant.set_option_value(position, Some(selected.value));
    }

    Ok(variant)
}

/// Builds a `ProductVariantsBulkInput` entry.
///
/// Variants with an `id` produce update entries. `media_id` links the
/// variant to an attached image.
///
/// # Errors
///
/// Fails like [`bind_options`], and with [`TranslateError::MissingField`]
/// when a weight is given without its unit.
pub fn bulk_input(
    variant: &ProductVariant,
    options: &[ProductOption],
    media_id: Option<&GlobalId>,
) -> Result<Value, TranslateError> {
    let option_values = bind_options(variant, options)?;
    let mut input = Map::new();

    put(&mut input, "id", gid_string(ResourceKind::ProductVariant, variant.id));

    let mut inventory_item = Map::new();
    put(&mut inventory_item, "sku", variant.sku.as_deref());
    if let Some(value) = variant.weight {
        let unit = variant
            .weight_unit
            .ok_or(TranslateError::MissingField { field: "weight_unit" })?;
        inventory_item.insert(
            "measurement".to_string(),
            json!({ "weight": { "value": value, "unit": unit.as_remote() } }),
        );
    }
    if !inventory_item.is_empty() {
        input.insert("inventoryItem".to_string(), Value::Object(inventory_item));
    }

    put(&mut input, "price", variant.price.as_deref());
    put(&mut input, "compareAtPrice", variant.compare_at_price.as_deref());
    put(&mut input, "taxable", variant.taxable);
    put(&mut input, "barcode", variant.barcode.as_deref());
    put(
        &mut input,
        "inventoryPolicy",
        variant.inventory_policy.map(InventoryPolicy::as_remote),
    );

    if !option_values.is_empty() {
        let values: Vec<Value> = option_values
            .into_iter()
            .map(|selected| json!({ "name": selected.value, "optionName": selected.name }))
            .collect();
        input.insert("optionValues".to_string(), Value::Array(values));
    }

    put(&mut input, "mediaId", media_id.map(ToString::to_string));

    Ok(Value::Object(input))
}
