//! Metafield translation, including the order status-sync payload.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::gid::GlobalId;
use crate::model::{Metafield, MetafieldOwner};
use crate::translate::{rest_id, TranslateError};

/// Metafield type used for status-sync payloads.
pub const STATUS_SYNC_TYPE: &str = "json";

/// A metafield as returned by `metafieldsSet`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteMetafield {
    pub id: Option<String>,
    pub namespace: Option<String>,
    pub key: Option<String>,
    pub value: Option<String>,
    #[serde(rename = "type")]
    pub value_type: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Builds one `MetafieldsSetInput` entry.
///
/// # Errors
///
/// Returns [`TranslateError::MissingField`] when the owner or one of
/// `namespace`, `key`, `value` is absent.
pub fn set_input(metafield: &Metafield) -> Result<Value, TranslateError> {
    let owner = metafield
        .owner_resource
        .ok_or(TranslateError::MissingField { field: "owner_resource" })?;
    let owner_id = metafield
        .owner_id
        .ok_or(TranslateError::MissingField { field: "owner_id" })?;
    let namespace = metafield
        .namespace
        .as_deref()
        .ok_or(TranslateError::MissingField { field: "namespace" })?;
    let key = metafield
        .key
        .as_deref()
        .ok_or(TranslateError::MissingField { field: "key" })?;
    let value = metafield
        .value
        .as_deref()
        .ok_or(TranslateError::MissingField { field: "value" })?;

    let mut input = json!({
        "ownerId": GlobalId::from_numeric(owner.resource_kind(), owner_id).to_string(),
        "namespace": namespace,
        "key": key,
        "value": value,
    });
    if let Some(value_type) = metafield.value_type.as_deref() {
        input["type"] = json!(value_type);
    }
    Ok(input)
}

/// Converts a `metafieldsSet` result back into a metafield on `owner`.
///
/// # Errors
///
/// Returns [`TranslateError::Identifier`] if the metafield id is malformed.
pub fn from_remote(
    remote: RemoteMetafield,
    owner: Option<(MetafieldOwner, u64)>,
) -> Result<Metafield, TranslateError> {
    Ok(Metafield {
        id: rest_id(remote.id.as_deref())?,
        namespace: remote.namespace,
        key: remote.key,
        value: remote.value,
        value_type: remote.value_type,
        owner_id: owner.map(|(_, id)| id),
        owner_resource: owner.map(|(resource, _)| resource),
        created_at: remote.created_at,
        updated_at: remote.updated_at,
    })
}

/// Serializes a `{status, message, synced_at}` payload.
#[must_use]
pub fn status_payload(status: &str, message: &str, synced_at: DateTime<Utc>) -> String {
    json!({
        "status": status,
        "message": message,
        "synced_at": synced_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    })
    .to_string()
}

/// Builds the status-sync metafield written on an order.
#[must_use]
pub fn status_metafield(
    order_id: u64,
    namespace: &str,
    key: &str,
    status: &str,
    message: &str,
    synced_at: DateTime<Utc>,
) -> Metafield {
    Metafield::new(
        MetafieldOwner::Order,
        order_id,
        namespace,
        key,
        status_payload(status, message, synced_at),
    )
    .with_type(STATUS_SYNC_TYPE)
}
