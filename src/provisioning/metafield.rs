use serde_json::json;
use tracing::instrument;

use crate::model::Metafield;
use crate::provisioning::queries::METAFIELDS_SET;
use crate::provisioning::{decode, ensure_accepted, Provisioner, ProvisioningError};
use crate::translate::metafield::{self, RemoteMetafield};
use crate::validation::{ensure_valid, SchemaName};

impl Provisioner {
    /// Writes one metafield with `metafieldsSet`.
    ///
    /// # Errors
    ///
    /// - [`ProvisioningError::Validation`] if the metafield fails the
    ///   `set-metafield` schema
    /// - [`ProvisioningError::Remote`] if the API rejects it
    /// - [`ProvisioningError::Graphql`] for transport failures
    #[instrument(skip(self, metafield), fields(namespace = ?metafield.namespace, key = ?metafield.key))]
    pub async fn set_metafield(&self, metafield: &Metafield) -> Result<Metafield, ProvisioningError> {
        let document = serde_json::to_value(metafield)?;
        ensure_valid(SchemaName::SetMetafield, &document)?;

        let input = metafield::set_input(metafield)?;
        let mut payload = self
            .mutate(METAFIELDS_SET, json!({ "metafields": [input] }))
            .await?;
        ensure_accepted(METAFIELDS_SET, &payload, &["userErrors"])?;

        let written: Vec<RemoteMetafield> = decode(METAFIELDS_SET, &mut payload, "metafields")?;
        let remote = written
            .into_iter()
            .next()
            .ok_or(ProvisioningError::UnexpectedResponse {
                operation: METAFIELDS_SET.name,
                message: "no metafield returned".to_string(),
            })?;

        let owner = metafield.owner_resource.zip(metafield.owner_id);
        Ok(metafield::from_remote(remote, owner)?)
    }
}
