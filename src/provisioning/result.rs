//! Aggregated outcomes of provisioning workflows.

use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::clients::graphql::{format_user_errors, UserError};
use crate::gid::GlobalId;
use crate::model::{Order, Product};

/// The steps of the product create workflow, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// `productCreate` with base attributes and option definitions.
    CreateBase,
    /// `productCreateMedia` for every image.
    AttachMedia,
    /// `productVariantsBulkCreate` for every variant.
    CreateVariants,
    /// `productVariantsBulkDelete` for the placeholder variant.
    DeleteDefaultVariant,
}

impl Step {
    /// Every step, in execution order.
    pub const ALL: [Self; 4] = [
        Self::CreateBase,
        Self::AttachMedia,
        Self::CreateVariants,
        Self::DeleteDefaultVariant,
    ];
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CreateBase => "create base",
            Self::AttachMedia => "attach media",
            Self::CreateVariants => "create variants",
            Self::DeleteDefaultVariant => "delete default variant",
        })
    }
}

/// What happened to one step or section.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StepOutcome {
    /// Nothing to do, or an earlier step made it impossible.
    #[default]
    Skipped,
    /// The call went through without user errors.
    Completed,
    /// The call went through but the API rejected some or all of it.
    Rejected {
        /// The user errors reported by the mutation.
        errors: Vec<UserError>,
    },
    /// The call itself failed.
    Failed {
        /// The transport or decoding failure.
        message: String,
    },
}

impl StepOutcome {
    /// Builds `Completed` or `Rejected` from a mutation's user errors.
    #[must_use]
    pub fn from_user_errors(errors: Vec<UserError>) -> Self {
        if errors.is_empty() {
            Self::Completed
        } else {
            Self::Rejected { errors }
        }
    }

    /// Returns `true` for `Completed`.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns `true` for `Skipped`.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    /// Returns `true` for `Rejected` or `Failed`.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Rejected { .. } | Self::Failed { .. })
    }

    /// Returns the user errors of a `Rejected` outcome.
    #[must_use]
    pub fn user_errors(&self) -> &[UserError] {
        match self {
            Self::Rejected { errors } => errors,
            _ => &[],
        }
    }

    /// Combines the outcomes of two calls made for the same section.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Skipped, outcome) | (outcome, Self::Skipped) => outcome,
            (Self::Failed { message: a }, Self::Failed { message: b }) => Self::Failed {
                message: format!("{a}; {b}"),
            },
            (failed @ Self::Failed { .. }, _) | (_, failed @ Self::Failed { .. }) => failed,
            (Self::Rejected { mut errors }, Self::Rejected { errors: more }) => {
                errors.extend(more);
                Self::Rejected { errors }
            }
            (rejected @ Self::Rejected { .. }, Self::Completed)
            | (Self::Completed, rejected @ Self::Rejected { .. }) => rejected,
            (Self::Completed, Self::Completed) => Self::Completed,
        }
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped => f.write_str("skipped"),
            Self::Completed => f.write_str("completed"),
            Self::Rejected { errors } => write!(f, "rejected: {}", format_user_errors(errors)),
            Self::Failed { message } => write!(f, "failed: {message}"),
        }
    }
}

/// The outcome of attaching one image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageOutcome {
    /// The image's alt text.
    pub alt: Option<String>,
    /// The image's source URL.
    pub src: Option<String>,
    /// The media created for it, when it was accepted.
    pub media_id: Option<GlobalId>,
    /// User errors attributed to this image.
    pub errors: Vec<UserError>,
}

impl ImageOutcome {
    /// Returns `true` when the image became media.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.media_id.is_some()
    }
}

/// The outcome of creating or updating one variant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VariantOutcome {
    /// The variant's SKU.
    pub sku: Option<String>,
    /// The variant's id, when the API returned it.
    pub variant_id: Option<GlobalId>,
    /// The media the variant was linked to.
    pub media_id: Option<GlobalId>,
}

/// The aggregate returned by the product create workflow.
///
/// Only a rejected first step stops the workflow early; every later step
/// records its outcome here and the workflow carries on.
#[derive(Debug, Clone, Default)]
pub struct ProvisioningResult {
    /// The created product's id.
    pub product_id: Option<GlobalId>,
    /// The created product's handle.
    pub handle: Option<String>,
    /// The product as returned by the create call.
    pub product: Option<Product>,
    /// The placeholder variant captured from the create call.
    pub default_variant_id: Option<GlobalId>,
    /// Per-image outcomes, in input order.
    pub images: Vec<ImageOutcome>,
    /// Per-variant outcomes, in input order.
    pub variants: Vec<VariantOutcome>,
    base: StepOutcome,
    media: StepOutcome,
    variant_batch: StepOutcome,
    cleanup: StepOutcome,
}

impl ProvisioningResult {
    /// Returns the outcome of one step.
    #[must_use]
    pub const fn outcome(&self, step: Step) -> &StepOutcome {
        match step {
            Step::CreateBase => &self.base,
            Step::AttachMedia => &self.media,
            Step::CreateVariants => &self.variant_batch,
            Step::DeleteDefaultVariant => &self.cleanup,
        }
    }

    pub(crate) fn record(&mut self, step: Step, outcome: StepOutcome) {
        match step {
            Step::CreateBase => self.base = outcome,
            Step::AttachMedia => self.media = outcome,
            Step::CreateVariants => self.variant_batch = outcome,
            Step::DeleteDefaultVariant => self.cleanup = outcome,
        }
    }

    /// Returns `true` when the product was created.
    #[must_use]
    pub const fn is_created(&self) -> bool {
        self.product_id.is_some()
    }

    /// Returns `true` when no step was rejected or failed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        Step::ALL.iter().all(|step| !self.outcome(*step).is_error())
    }

    /// Every user error reported across the workflow, in step order.
    pub fn user_errors(&self) -> impl Iterator<Item = &UserError> {
        Step::ALL
            .into_iter()
            .flat_map(move |step| self.outcome(step).user_errors())
    }
}

/// The aggregate returned by the product update workflow.
///
/// Each section is attempted regardless of how the others went.
#[derive(Debug, Clone)]
pub struct UpdateResult {
    /// The updated product's id.
    pub product_id: GlobalId,
    /// Outcome of `productUpdate`.
    pub base: StepOutcome,
    /// Outcome of `productCreateMedia`.
    pub media: StepOutcome,
    /// Combined outcome of the variant update and create batches.
    pub variants: StepOutcome,
    /// Per-image outcomes, in input order.
    pub images: Vec<ImageOutcome>,
    /// Per-variant outcomes, updates first, then creates.
    pub variant_outcomes: Vec<VariantOutcome>,
    /// Raw mutation payloads keyed by mutation name.
    pub responses: Map<String, Value>,
}

impl UpdateResult {
    pub(crate) fn new(product_id: GlobalId) -> Self {
        Self {
            product_id,
            base: StepOutcome::Skipped,
            media: StepOutcome::Skipped,
            variants: StepOutcome::Skipped,
            images: Vec::new(),
            variant_outcomes: Vec::new(),
            responses: Map::new(),
        }
    }

    /// Returns `true` when no section was rejected or failed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        !self.base.is_error() && !self.media.is_error() && !self.variants.is_error()
    }
}

/// The result of adding a note to an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteResult {
    /// The order after the update.
    pub order: Order,
    /// Whether the status-sync metafield was written.
    pub status_synced: bool,
}

/// The job started by an order cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct CancelJob {
    /// The job's global id.
    pub id: Option<String>,
    /// Whether the job had already finished.
    pub done: bool,
}

/// A fulfillment created for an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fulfillment {
    /// The fulfillment's global id.
    pub id: Option<String>,
    /// The fulfillment's status, e.g. `SUCCESS`.
    pub status: Option<String>,
    /// The fulfillment order that was fulfilled.
    pub fulfillment_order_id: GlobalId,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_error(message: &str) -> UserError {
        UserError {
            field: None,
            message: message.to_string(),
            code: None,
        }
    }

    #[test]
    fn test_merge_prefers_failures_then_rejections() {
        let failed = StepOutcome::Failed {
            message: "timeout".to_string(),
        };
        let rejected = StepOutcome::Rejected {
            errors: vec![user_error("SKU taken")],
        };

        assert_eq!(StepOutcome::Skipped.merge(StepOutcome::Completed), StepOutcome::Completed);
        assert_eq!(StepOutcome::Completed.merge(rejected.clone()), rejected);
        assert_eq!(rejected.clone().merge(failed.clone()), failed);
        assert_eq!(
            rejected.clone().merge(rejected),
            StepOutcome::Rejected {
                errors: vec![user_error("SKU taken"), user_error("SKU taken")]
            }
        );
    }

    #[test]
    fn test_result_collects_user_errors_in_step_order() {
        let mut result = ProvisioningResult::default();
        result.record(
            Step::DeleteDefaultVariant,
            StepOutcome::Rejected {
                errors: vec![user_error("cleanup")],
            },
        );
        result.record(
            Step::AttachMedia,
            StepOutcome::Rejected {
                errors: vec![user_error("media")],
            },
        );

        let messages: Vec<_> = result.user_errors().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["media", "cleanup"]);
        assert!(!result.is_complete());
        assert!(!result.is_created());
    }

    #[test]
    fn test_outcome_display() {
        let outcome = StepOutcome::Rejected {
            errors: vec![user_error("Title can't be blank")],
        };
        assert_eq!(outcome.to_string(), "rejected: Title can't be blank");
        assert_eq!(Step::DeleteDefaultVariant.to_string(), "delete default variant");
    }
}
