use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use crate::gid::{normalize, GlobalId, ResourceKind};
use crate::model::{ProductOption, ProductVariant};
use crate::provisioning::queries::{
    Operation, PRODUCT_OPTIONS, VARIANTS_BULK_CREATE, VARIANTS_BULK_UPDATE, VARIANT_CONTEXT,
};
use crate::provisioning::{
    decode, decode_node, ensure_accepted, Provisioner, ProvisioningError,
};
use crate::translate::image::resolve_media_id;
use crate::translate::product::{options_from_remote, RemoteOption};
use crate::translate::variant::{self, RemoteVariant};
use crate::translate::TranslateError;
use crate::validation::{ensure_valid, SchemaName};

#[derive(Debug, Deserialize)]
struct OptionsNode {
    #[serde(default)]
    options: Vec<RemoteOption>,
}

#[derive(Debug, Deserialize)]
struct VariantContext {
    product: Option<ProductContext>,
}

#[derive(Debug, Deserialize)]
struct ProductContext {
    id: String,
    #[serde(default)]
    options: Vec<RemoteOption>,
}

impl Provisioner {
    /// Adds one variant to an existing product.
    ///
    /// The product's option definitions are fetched to bind the variant's
    /// option values to option names.
    ///
    /// # Errors
    ///
    /// - [`ProvisioningError::Validation`] if the variant fails `create-variant`
    /// - [`ProvisioningError::MissingDependency`] if the product does not exist
    /// - [`ProvisioningError::Translate`] if the variant selects an undeclared option
    /// - [`ProvisioningError::Remote`] if the API rejects the variant
    #[instrument(skip(self, variant), fields(sku = ?variant.sku))]
    pub async fn create_variant(
        &self,
        product_id: &str,
        variant: &ProductVariant,
    ) -> Result<ProductVariant, ProvisioningError> {
        ensure_valid(SchemaName::CreateVariant, &serde_json::to_value(variant)?)?;
        let product_id = normalize(product_id, ResourceKind::Product)?;

        let options = self.product_options(&product_id).await?;
        let media_id = resolve_media_id(variant, std::iter::empty());
        let input = variant::bulk_input(variant, &options, media_id.as_ref())?;

        self.write_variant(VARIANTS_BULK_CREATE, &product_id, input, &options)
            .await
    }

    /// Updates one existing variant.
    ///
    /// Option definitions are only fetched when the variant carries option
    /// values or does not know its product.
    ///
    /// # Errors
    ///
    /// Fails like [`create_variant`](Self::create_variant), checked against
    /// `update-variant`.
    #[instrument(skip(self, variant), fields(variant_id = ?variant.id))]
    pub async fn update_variant(
        &self,
        variant: &ProductVariant,
    ) -> Result<ProductVariant, ProvisioningError> {
        ensure_valid(SchemaName::UpdateVariant, &serde_json::to_value(variant)?)?;
        let variant_id = variant
            .id
            .map(|id| GlobalId::from_numeric(ResourceKind::ProductVariant, id))
            .ok_or(TranslateError::MissingField { field: "id" })?;

        let needs_context =
            variant.product_id.is_none() || variant.selected_options().next().is_some();
        let (product_id, options) = match variant.product_id {
            Some(product_id) if !needs_context => (
                GlobalId::from_numeric(ResourceKind::Product, product_id),
                Vec::new(),
            ),
            _ => self.variant_context(&variant_id).await?,
        };

        let media_id = resolve_media_id(variant, std::iter::empty());
        let input = variant::bulk_input(variant, &options, media_id.as_ref())?;

        self.write_variant(VARIANTS_BULK_UPDATE, &product_id, input, &options)
            .await
    }

    /// Fetches a product's option definitions.
    pub(crate) async fn product_options(
        &self,
        product_id: &GlobalId,
    ) -> Result<Vec<ProductOption>, ProvisioningError> {
        let node = self
            .execute(PRODUCT_OPTIONS, json!({ "id": product_id.to_string() }))
            .await?;
        if node.is_null() {
            return Err(ProvisioningError::MissingDependency {
                dependency: "product",
                resource: product_id.to_string(),
            });
        }

        let node: OptionsNode = decode_node(PRODUCT_OPTIONS, node)?;
        debug!(product_id = %product_id, options = node.options.len(), "Fetched option definitions");
        Ok(options_from_remote(node.options)?)
    }

    async fn variant_context(
        &self,
        variant_id: &GlobalId,
    ) -> Result<(GlobalId, Vec<ProductOption>), ProvisioningError> {
        let node = self
            .execute(VARIANT_CONTEXT, json!({ "id": variant_id.to_string() }))
            .await?;
        let missing = || ProvisioningError::MissingDependency {
            dependency: "product",
            resource: variant_id.to_string(),
        };
        if node.is_null() {
            return Err(missing());
        }

        let context: VariantContext = decode_node(VARIANT_CONTEXT, node)?;
        let product = context.product.ok_or_else(missing)?;
        Ok((
            GlobalId::parse(&product.id)?,
            options_from_remote(product.options)?,
        ))
    }

    async fn write_variant(
        &self,
        operation: Operation,
        product_id: &GlobalId,
        input: serde_json::Value,
        options: &[ProductOption],
    ) -> Result<ProductVariant, ProvisioningError> {
        let mut payload = self
            .mutate(
                operation,
                json!({ "productId": product_id.to_string(), "variants": [input] }),
            )
            .await?;
        ensure_accepted(operation, &payload, &["userErrors"])?;

        let written: Option<Vec<RemoteVariant>> = decode(operation, &mut payload, "productVariants")?;
        let remote = written
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or(ProvisioningError::UnexpectedResponse {
                operation: operation.name,
                message: "no variant returned".to_string(),
            })?;

        Ok(variant::from_remote(remote, options, product_id.as_u64())?)
    }
}
