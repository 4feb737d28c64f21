//! The product create and update workflows.

use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::clients::graphql::format_user_errors;
use crate::gid::{normalize, GlobalId, ResourceKind};
use crate::model::{Product, ProductImage, ProductOption, ProductVariant};
use crate::provisioning::queries::{
    Operation, PRODUCT, PRODUCT_CREATE, PRODUCT_CREATE_MEDIA, PRODUCT_UPDATE,
    VARIANTS_BULK_CREATE, VARIANTS_BULK_DELETE, VARIANTS_BULK_UPDATE,
};
use crate::provisioning::{
    decode, decode_node, user_errors, ImageOutcome, Provisioner, ProvisioningError,
    ProvisioningResult, Step, StepOutcome, UpdateResult, VariantOutcome,
};
use crate::translate::image::{self, media_error_index, resolve_media_id, RemoteMedia};
use crate::translate::product::{self, RemoteProduct};
use crate::translate::variant::{self, RemoteVariant};
use crate::translate::TranslateError;
use crate::validation::{ensure_valid, SchemaName};

/// The outcome of one call made on behalf of a workflow step.
struct Batch<T> {
    outcome: StepOutcome,
    items: Vec<T>,
    payload: Option<Value>,
}

impl<T> Batch<T> {
    fn failed(message: impl ToString, items: Vec<T>) -> Self {
        Self {
            outcome: StepOutcome::Failed {
                message: message.to_string(),
            },
            items,
            payload: None,
        }
    }
}

impl Provisioner {
    /// Fetches a product with its options, media and variants.
    ///
    /// Returns `None` when the product does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningError::Identifier`] for an id without digits or
    /// [`ProvisioningError::Graphql`] for transport failures.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> Result<Option<Product>, ProvisioningError> {
        let id = normalize(id, ResourceKind::Product)?;
        let node = self.execute(PRODUCT, json!({ "id": id.to_string() })).await?;
        if node.is_null() {
            return Ok(None);
        }

        let remote: RemoteProduct = decode_node(PRODUCT, node)?;
        Ok(Some(product::from_remote(remote)?))
    }

    /// Creates a product with its options, images and variants.
    ///
    /// The steps run in [`Step::ALL`] order:
    ///
    /// 1. `productCreate` with the base attributes and one placeholder value
    ///    per option. The API adds a default variant when options are
    ///    declared; its id is captured.
    /// 2. `productCreateMedia` for the featured image followed by `images`.
    /// 3. `productVariantsBulkCreate` for every variant. A variant is linked
    ///    to its explicit `image_id`, or else to the first attached image
    ///    whose alt text equals its SKU.
    /// 4. `productVariantsBulkDelete` for the captured default variant.
    ///
    /// A rejected step 1 ends the workflow with the remaining steps skipped.
    /// Failures in steps 2 to 4 are recorded and the workflow carries on.
    ///
    /// # Errors
    ///
    /// - [`ProvisioningError::Validation`] if the product fails `create-product`
    /// - [`ProvisioningError::Translate`] if a variant selects an option the
    ///   product does not declare
    /// - [`ProvisioningError::Graphql`] if the step 1 call fails
    ///
    /// Nothing is sent in the first two cases.
    #[instrument(skip(self, product), fields(title = ?product.title))]
    pub async fn create_product(
        &self,
        product: &Product,
    ) -> Result<ProvisioningResult, ProvisioningError> {
        ensure_valid(SchemaName::CreateProduct, &serde_json::to_value(product)?)?;
        for variant in &product.variants {
            variant::bind_options(variant, &product.options)?;
        }

        let mut result = ProvisioningResult::default();

        let mut payload = self
            .mutate(PRODUCT_CREATE, json!({ "product": product::create_input(product) }))
            .await?;
        let errors = user_errors(&payload, &["userErrors"]);
        if !errors.is_empty() {
            warn!(errors = %format_user_errors(&errors), "Product create rejected");
            result.record(Step::CreateBase, StepOutcome::Rejected { errors });
            return Ok(result);
        }

        let created: Option<RemoteProduct> = decode(PRODUCT_CREATE, &mut payload, "product")?;
        let created = created.ok_or(ProvisioningError::UnexpectedResponse {
            operation: PRODUCT_CREATE.name,
            message: "no product returned".to_string(),
        })?;
        let product_id = created
            .id
            .as_deref()
            .map(GlobalId::parse)
            .transpose()?
            .ok_or(ProvisioningError::UnexpectedResponse {
                operation: PRODUCT_CREATE.name,
                message: "product has no id".to_string(),
            })?;

        // Without options no placeholder variant is created, so there is
        // nothing to clean up.
        let default_variant_id = if product.options.is_empty() {
            None
        } else {
            created.first_variant_id().map(GlobalId::parse).transpose()?
        };

        result.product_id = Some(product_id.clone());
        result.handle.clone_from(&created.handle);
        result.default_variant_id.clone_from(&default_variant_id);
        match product::from_remote(created) {
            Ok(remote) => result.product = Some(remote),
            Err(error) => warn!(%error, "Created product could not be read back"),
        }
        result.record(Step::CreateBase, StepOutcome::Completed);

        let images: Vec<&ProductImage> = product.all_images().collect();
        if !images.is_empty() {
            let batch = self.attach_media(&product_id, &images).await;
            result.record(Step::AttachMedia, batch.outcome);
            result.images = batch.items;
        }

        if !product.variants.is_empty() {
            let variants: Vec<&ProductVariant> = product.variants.iter().collect();
            let batch = self
                .write_variants(
                    VARIANTS_BULK_CREATE,
                    &product_id,
                    &variants,
                    &product.options,
                    &result.images,
                )
                .await;
            result.record(Step::CreateVariants, batch.outcome);
            result.variants = batch.items;
        }

        if let Some(default_variant_id) = &default_variant_id {
            let outcome = self
                .delete_variants(&product_id, std::slice::from_ref(default_variant_id))
                .await;
            result.record(Step::DeleteDefaultVariant, outcome);
        }

        for step in Step::ALL {
            let outcome = result.outcome(step);
            if outcome.is_error() {
                warn!(product_id = %product_id, %step, %outcome, "Provisioning step did not complete");
            }
        }
        info!(
            product_id = %product_id,
            images = result.images.iter().filter(|i| i.is_attached()).count(),
            variants = result.variants.iter().filter(|v| v.variant_id.is_some()).count(),
            "Product provisioned"
        );

        Ok(result)
    }

    /// Updates an existing product.
    ///
    /// The base attributes, the images and the variants are sent in three
    /// independent sections; one failing does not stop the others. Variants
    /// with an `id` are updated, the rest are created. When variants carry
    /// option values and the document lists no options, the product's
    /// option definitions are fetched.
    ///
    /// # Errors
    ///
    /// - [`ProvisioningError::Validation`] if the product fails `update-product`
    /// - [`ProvisioningError::Translate`] if the product has no `id`, or a
    ///   variant selects an undeclared option of the supplied options
    ///
    /// Failed sections are reported in the returned [`UpdateResult`].
    #[instrument(skip(self, product), fields(product_id = ?product.id))]
    pub async fn update_product(&self, product: &Product) -> Result<UpdateResult, ProvisioningError> {
        ensure_valid(SchemaName::UpdateProduct, &serde_json::to_value(product)?)?;
        let product_id = product
            .id
            .map(|id| GlobalId::from_numeric(ResourceKind::Product, id))
            .ok_or(TranslateError::MissingField { field: "id" })?;
        if !product.options.is_empty() {
            for variant in &product.variants {
                variant::bind_options(variant, &product.options)?;
            }
        }

        let mut result = UpdateResult::new(product_id.clone());

        let (outcome, payload) = match self
            .execute(
                PRODUCT_UPDATE,
                json!({ "product": product::update_input(product, &product_id) }),
            )
            .await
        {
            Ok(payload) if payload.is_null() => (
                StepOutcome::Failed {
                    message: "productUpdate payload is null".to_string(),
                },
                None,
            ),
            Ok(payload) => (
                StepOutcome::from_user_errors(user_errors(&payload, &["userErrors"])),
                Some(payload),
            ),
            Err(error) => (
                StepOutcome::Failed {
                    message: error.to_string(),
                },
                None,
            ),
        };
        result.base = outcome;
        store(&mut result, PRODUCT_UPDATE, payload);

        let images: Vec<&ProductImage> = product.all_images().collect();
        if !images.is_empty() {
            let batch = self.attach_media(&product_id, &images).await;
            result.media = batch.outcome;
            result.images = batch.items;
            store(&mut result, PRODUCT_CREATE_MEDIA, batch.payload);
        }

        if !product.variants.is_empty() {
            let options = if product.options.is_empty()
                && product
                    .variants
                    .iter()
                    .any(|v| v.selected_options().next().is_some())
            {
                self.product_options(&product_id).await
            } else {
                Ok(product.options.clone())
            };

            match options {
                Ok(options) => {
                    let (updates, creates): (Vec<&ProductVariant>, Vec<&ProductVariant>) =
                        product.variants.iter().partition(|v| v.id.is_some());

                    for (operation, variants) in
                        [(VARIANTS_BULK_UPDATE, updates), (VARIANTS_BULK_CREATE, creates)]
                    {
                        if variants.is_empty() {
                            continue;
                        }
                        let batch = self
                            .write_variants(operation, &product_id, &variants, &options, &result.images)
                            .await;
                        result.variants = std::mem::take(&mut result.variants).merge(batch.outcome);
                        result.variant_outcomes.extend(batch.items);
                        store(&mut result, operation, batch.payload);
                    }
                }
                Err(error) => {
                    result.variants = StepOutcome::Failed {
                        message: error.to_string(),
                    };
                }
            }
        }

        if !result.is_complete() {
            warn!(
                product_id = %product_id,
                base = %result.base,
                media = %result.media,
                variants = %result.variants,
                "Product update did not fully complete"
            );
        }

        Ok(result)
    }

    /// Attaches images as media, attributing user errors to their inputs.
    async fn attach_media(
        &self,
        product_id: &GlobalId,
        images: &[&ProductImage],
    ) -> Batch<ImageOutcome> {
        let mut outcomes: Vec<ImageOutcome> = images
            .iter()
            .map(|image| ImageOutcome {
                alt: image.alt.clone(),
                src: image.src.clone(),
                ..Default::default()
            })
            .collect();

        let inputs = match images
            .iter()
            .map(|image| image::media_input(image))
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(inputs) => inputs,
            Err(error) => return Batch::failed(error, outcomes),
        };

        let payload = match self
            .execute(
                PRODUCT_CREATE_MEDIA,
                json!({ "productId": product_id.to_string(), "media": inputs }),
            )
            .await
        {
            Ok(payload) if payload.is_null() => {
                return Batch::failed("productCreateMedia payload is null", outcomes)
            }
            Ok(payload) => payload,
            Err(error) => return Batch::failed(error, outcomes),
        };

        let errors = user_errors(&payload, &["mediaUserErrors"]);
        let media: Option<Vec<RemoteMedia>> =
            match decode(PRODUCT_CREATE_MEDIA, &mut payload.clone(), "media") {
                Ok(media) => media,
                Err(error) => return Batch::failed(error, outcomes),
            };

        // Returned media are in input order, without the rejected inputs.
        let mut returned = media.unwrap_or_default().into_iter();
        for (index, outcome) in outcomes.iter_mut().enumerate() {
            outcome.errors = errors
                .iter()
                .filter(|error| media_error_index(error) == Some(index))
                .cloned()
                .collect();
            if outcome.errors.is_empty() {
                outcome.media_id = returned
                    .next()
                    .and_then(|media| media.id)
                    .and_then(|id| GlobalId::parse(&id).ok());
            }
        }

        Batch {
            outcome: StepOutcome::from_user_errors(errors),
            items: outcomes,
            payload: Some(payload),
        }
    }

    /// Sends one variant bulk create or update call.
    async fn write_variants(
        &self,
        operation: Operation,
        product_id: &GlobalId,
        variants: &[&ProductVariant],
        options: &[ProductOption],
        images: &[ImageOutcome],
    ) -> Batch<VariantOutcome> {
        let uploaded: Vec<(Option<&str>, &GlobalId)> = images
            .iter()
            .filter_map(|image| image.media_id.as_ref().map(|id| (image.alt.as_deref(), id)))
            .collect();

        let mut outcomes: Vec<VariantOutcome> = variants
            .iter()
            .map(|variant| VariantOutcome {
                sku: variant.sku.clone(),
                variant_id: variant
                    .id
                    .map(|id| GlobalId::from_numeric(ResourceKind::ProductVariant, id)),
                media_id: resolve_media_id(variant, uploaded.iter().copied()),
            })
            .collect();

        let inputs = match variants
            .iter()
            .zip(&outcomes)
            .map(|(variant, outcome)| variant::bulk_input(variant, options, outcome.media_id.as_ref()))
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(inputs) => inputs,
            Err(error) => return Batch::failed(error, outcomes),
        };

        let payload = match self
            .execute(
                operation,
                json!({ "productId": product_id.to_string(), "variants": inputs }),
            )
            .await
        {
            Ok(payload) if payload.is_null() => {
                return Batch::failed(format!("{} payload is null", operation.name), outcomes)
            }
            Ok(payload) => payload,
            Err(error) => return Batch::failed(error, outcomes),
        };

        let errors = user_errors(&payload, &["userErrors"]);
        let written: Option<Vec<RemoteVariant>> =
            match decode(operation, &mut payload.clone(), "productVariants") {
                Ok(written) => written,
                Err(error) => return Batch::failed(error, outcomes),
            };
        let written = written.unwrap_or_default();

        let by_position = written.len() == outcomes.len();
        for (index, outcome) in outcomes.iter_mut().enumerate() {
            let remote = outcome
                .sku
                .as_deref()
                .and_then(|sku| written.iter().find(|w| w.sku.as_deref() == Some(sku)))
                .or_else(|| by_position.then(|| &written[index]));
            if let Some(id) = remote.and_then(|w| w.id.as_deref()) {
                outcome.variant_id = GlobalId::parse(id).ok();
            }
        }

        Batch {
            outcome: StepOutcome::from_user_errors(errors),
            items: outcomes,
            payload: Some(payload),
        }
    }

    /// Deletes variants from a product.
    async fn delete_variants(&self, product_id: &GlobalId, variant_ids: &[GlobalId]) -> StepOutcome {
        let ids: Vec<String> = variant_ids.iter().map(ToString::to_string).collect();
        match self
            .execute(
                VARIANTS_BULK_DELETE,
                json!({ "productId": product_id.to_string(), "variantsIds": ids }),
            )
            .await
        {
            Ok(payload) if payload.is_null() => StepOutcome::Failed {
                message: "productVariantsBulkDelete payload is null".to_string(),
            },
            Ok(payload) => StepOutcome::from_user_errors(user_errors(&payload, &["userErrors"])),
            Err(error) => StepOutcome::Failed {
                message: error.to_string(),
            },
        }
    }
}

fn store(result: &mut UpdateResult, operation: Operation, payload: Option<Value>) {
    if let Some(payload) = payload {
        result.responses.insert(operation.name.to_string(), payload);
    }
}
