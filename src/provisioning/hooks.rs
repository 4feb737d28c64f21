//! Post-action hooks.
//!
//! Order mutations that change what a downstream system should know about an
//! order finish by writing a `{status, message, synced_at}` JSON document to
//! a metafield on the order. The write is best effort: a failure is logged
//! at `warn` and reported as `false`, never as an error.

use chrono::Utc;
use tracing::{debug, instrument, warn};

use crate::provisioning::Provisioner;
use crate::translate::metafield::status_metafield;

/// Where the order status-sync metafield lives.
///
/// # Example
///
/// ```rust
/// use shopify_admin::provisioning::StatusSync;
///
/// let sync = StatusSync::new("erp", "last_sync");
/// assert_eq!(sync.namespace(), "erp");
/// assert_eq!(StatusSync::default().key(), "status");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusSync {
    namespace: String,
    key: String,
}

impl StatusSync {
    /// Creates a status-sync location.
    #[must_use]
    pub fn new(namespace: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            key: key.into(),
        }
    }

    /// Returns the metafield namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the metafield key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Default for StatusSync {
    fn default() -> Self {
        Self::new("sync", "status")
    }
}

impl Provisioner {
    /// Writes the status-sync metafield on an order.
    ///
    /// Returns `true` when the write went through. Failures are logged and
    /// swallowed.
    #[instrument(skip(self, message))]
    pub async fn sync_order_status(&self, order_id: u64, status: &str, message: &str) -> bool {
        let metafield = status_metafield(
            order_id,
            self.status_sync.namespace(),
            self.status_sync.key(),
            status,
            message,
            Utc::now(),
        );

        match self.set_metafield(&metafield).await {
            Ok(_) => {
                debug!(order_id, status, "Order status synced");
                true
            }
            Err(error) => {
                warn!(order_id, status, error = %error, "Order status sync failed");
                false
            }
        }
    }
}
