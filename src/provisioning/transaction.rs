use tracing::instrument;

use crate::gid::ResourceKind;
use crate::model::Transaction;
use crate::provisioning::{rest_id_of, Provisioner, ProvisioningError};

impl Provisioner {
    /// Creates a transaction on an order over REST.
    ///
    /// `order_id` may be numeric or a global id.
    ///
    /// # Errors
    ///
    /// - [`ProvisioningError::Identifier`] if `order_id` has no digits
    /// - [`ProvisioningError::Resource`] for local validation, 404, 422 and
    ///   transport failures
    #[instrument(skip(self, transaction), fields(kind = ?transaction.kind))]
    pub async fn create_transaction(
        &self,
        order_id: &str,
        transaction: &Transaction,
    ) -> Result<Transaction, ProvisioningError> {
        let (_, order_id) = rest_id_of(order_id, ResourceKind::Order)?;
        let mut created = transaction.create_for_order(&self.rest, order_id).await?;
        created.order_id.get_or_insert(order_id);
        Ok(created)
    }

    /// Lists an order's transactions over REST.
    ///
    /// # Errors
    ///
    /// Fails like [`create_transaction`](Self::create_transaction).
    #[instrument(skip(self))]
    pub async fn list_transactions(
        &self,
        order_id: &str,
    ) -> Result<Vec<Transaction>, ProvisioningError> {
        let (_, order_id) = rest_id_of(order_id, ResourceKind::Order)?;
        let mut transactions = Transaction::all_for_order(&self.rest, order_id).await?;
        for transaction in &mut transactions {
            transaction.order_id.get_or_insert(order_id);
        }
        Ok(transactions)
    }
}
