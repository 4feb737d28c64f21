//! Order transactions, nested under `orders/{order_id}/transactions`.

use serde_json::json;
use tracing::debug;

use crate::clients::RestClient;
use crate::model::Transaction;
use crate::rest::resource::take_key;
use crate::rest::ResourceError;
use crate::validation::{ensure_valid, SchemaName};

const NAME: &str = "Transaction";

impl Transaction {
    /// Lists an order's transactions.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the order doesn't exist.
    pub async fn all_for_order(
        client: &RestClient,
        order_id: u64,
    ) -> Result<Vec<Self>, ResourceError> {
        let response = client
            .get(&format!("orders/{order_id}/transactions"), None)
            .await
            .map_err(|e| ResourceError::from_rest_error(e, "Order", Some(order_id)))?;

        take_key(response.body, "transactions")
    }

    /// Creates a transaction on an order.
    ///
    /// The transaction is checked against the `create-transaction` schema
    /// before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Invalid`] when local validation fails, or
    /// [`ResourceError::ValidationFailed`] when the API rejects it.
    pub async fn create_for_order(
        &self,
        client: &RestClient,
        order_id: u64,
    ) -> Result<Self, ResourceError> {
        let document = serde_json::to_value(self)?;
        ensure_valid(SchemaName::CreateTransaction, &document)?;

        debug!(order_id, kind = ?self.kind, "Creating transaction");
        let response = client
            .post(
                &format!("orders/{order_id}/transactions"),
                json!({ "transaction": document }),
                None,
            )
            .await
            .map_err(|e| ResourceError::from_rest_error(e, NAME, None))?;

        take_key(response.body, "transaction")
    }
}
