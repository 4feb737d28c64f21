use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::gid::{normalize, GlobalId, ResourceKind};
use crate::model::{CancelRequest, FulfillmentRequest, Order};
use crate::provisioning::queries::{
    Operation, FULFILLMENT_CREATE, FULFILLMENT_ORDERS, ORDER, ORDER_CANCEL, ORDER_CREATE,
    ORDER_UPDATE,
};
use crate::provisioning::{
    decode, decode_node, ensure_accepted, rest_id_of, CancelJob, Fulfillment, NoteResult,
    Provisioner, ProvisioningError,
};
use crate::translate::order::{self, RemoteOrder};
use crate::translate::{Connection, TranslateError};
use crate::validation::{ensure_valid, SchemaName};

/// Status written to the status-sync metafield after a note is added.
const NOTE_ADDED: &str = "note_added";

/// Fulfillment order statuses that can still be fulfilled.
const FULFILLABLE: &[&str] = &["OPEN", "IN_PROGRESS"];

#[derive(Debug, Deserialize)]
struct FulfillmentOrders {
    #[serde(rename = "fulfillmentOrders", default)]
    fulfillment_orders: Connection<FulfillmentOrderNode>,
}

#[derive(Debug, Deserialize)]
struct FulfillmentOrderNode {
    id: String,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RemoteFulfillment {
    id: Option<String>,
    status: Option<String>,
}

impl Provisioner {
    /// Fetches an order. Returns `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningError::Identifier`] for an id without digits or
    /// [`ProvisioningError::Graphql`] for transport failures.
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: &str) -> Result<Option<Order>, ProvisioningError> {
        let id = normalize(id, ResourceKind::Order)?;
        let node = self.execute(ORDER, json!({ "id": id.to_string() })).await?;
        if node.is_null() {
            return Ok(None);
        }

        let remote: RemoteOrder = decode_node(ORDER, node)?;
        Ok(Some(order::from_remote(remote)?))
    }

    /// Creates an order.
    ///
    /// # Errors
    ///
    /// - [`ProvisioningError::Validation`] if the order fails `create-order`
    /// - [`ProvisioningError::Remote`] if `orderCreate` reports user errors
    /// - [`ProvisioningError::Graphql`] for transport failures
    #[instrument(skip(self, order), fields(line_items = order.line_items.len()))]
    pub async fn create_order(&self, order: &Order) -> Result<Order, ProvisioningError> {
        ensure_valid(SchemaName::CreateOrder, &serde_json::to_value(order)?)?;

        let payload = self
            .mutate(ORDER_CREATE, json!({ "order": order::create_input(order) }))
            .await?;
        let created = Self::order_from_payload(ORDER_CREATE, payload)?;
        info!(order_id = ?created.id, name = ?created.name, "Order created");
        Ok(created)
    }

    /// Updates an order's email, note, tags and shipping address.
    ///
    /// # Errors
    ///
    /// Fails like [`create_order`](Self::create_order), checked against
    /// `update-order`.
    #[instrument(skip(self, order), fields(order_id = ?order.id))]
    pub async fn update_order(&self, order: &Order) -> Result<Order, ProvisioningError> {
        ensure_valid(SchemaName::UpdateOrder, &serde_json::to_value(order)?)?;
        let id = order
            .id
            .map(|id| GlobalId::from_numeric(ResourceKind::Order, id))
            .ok_or(TranslateError::MissingField { field: "id" })?;

        let payload = self
            .mutate(ORDER_UPDATE, json!({ "input": order::update_input(order, &id) }))
            .await?;
        Self::order_from_payload(ORDER_UPDATE, payload)
    }

    /// Replaces an order's note, then writes the status-sync metafield.
    ///
    /// `order_id` may be numeric or a global id. The status sync is best
    /// effort; its outcome is reported in [`NoteResult::status_synced`].
    ///
    /// # Errors
    ///
    /// - [`ProvisioningError::Validation`] if the note fails `add-order-note`
    /// - [`ProvisioningError::Remote`] if `orderUpdate` reports user errors
    /// - [`ProvisioningError::Graphql`] for transport failures
    #[instrument(skip(self, note))]
    pub async fn add_order_note(
        &self,
        order_id: &str,
        note: &str,
    ) -> Result<NoteResult, ProvisioningError> {
        ensure_valid(
            SchemaName::AddOrderNote,
            &json!({ "id": order_id, "note": note }),
        )?;
        let (id, numeric) = rest_id_of(order_id, ResourceKind::Order)?;

        let payload = self
            .mutate(ORDER_UPDATE, json!({ "input": order::note_input(&id, note) }))
            .await?;
        let order = Self::order_from_payload(ORDER_UPDATE, payload)?;

        let status_synced = self.sync_order_status(numeric, NOTE_ADDED, note).await;
        Ok(NoteResult {
            order,
            status_synced,
        })
    }

    /// Cancels an order.
    ///
    /// The reason is checked before anything is sent. Any user error raises.
    ///
    /// # Errors
    ///
    /// - [`ProvisioningError::Validation`] for an unknown reason or a blank id
    /// - [`ProvisioningError::Remote`] if `orderCancel` reports user errors
    /// - [`ProvisioningError::Graphql`] for transport failures
    #[instrument(skip(self, request), fields(order_id = %request.order_id, reason = %request.reason))]
    pub async fn cancel_order(&self, request: &CancelRequest) -> Result<CancelJob, ProvisioningError> {
        ensure_valid(SchemaName::CancelOrder, &serde_json::to_value(request)?)?;
        let id = normalize(&request.order_id, ResourceKind::Order)?;

        let mut payload = self
            .mutate(ORDER_CANCEL, order::cancel_variables(request, &id))
            .await?;
        ensure_accepted(
            ORDER_CANCEL,
            &payload,
            &["orderCancelUserErrors", "userErrors"],
        )?;

        let job: Option<CancelJob> = decode(ORDER_CANCEL, &mut payload, "job")?;
        info!(order_id = %id, "Order cancellation requested");
        Ok(job.unwrap_or_default())
    }

    /// Fulfills the first open fulfillment order of an order.
    ///
    /// # Errors
    ///
    /// - [`ProvisioningError::Validation`] if the request fails `fulfill-order`
    /// - [`ProvisioningError::MissingDependency`] if the order does not exist
    ///   or has no open fulfillment order
    /// - [`ProvisioningError::Remote`] if `fulfillmentCreate` reports user errors
    /// - [`ProvisioningError::Graphql`] for transport failures
    #[instrument(skip(self, request), fields(order_id = %request.order_id))]
    pub async fn fulfill_order(
        &self,
        request: &FulfillmentRequest,
    ) -> Result<Fulfillment, ProvisioningError> {
        ensure_valid(SchemaName::FulfillOrder, &serde_json::to_value(request)?)?;
        let id = normalize(&request.order_id, ResourceKind::Order)?;

        let fulfillment_order_id = self.open_fulfillment_order(&id).await?;

        let mut payload = self
            .mutate(
                FULFILLMENT_CREATE,
                json!({ "fulfillment": order::fulfillment_input(&fulfillment_order_id, request) }),
            )
            .await?;
        ensure_accepted(FULFILLMENT_CREATE, &payload, &["userErrors"])?;

        let created: Option<RemoteFulfillment> =
            decode(FULFILLMENT_CREATE, &mut payload, "fulfillment")?;
        let created = created.ok_or(ProvisioningError::UnexpectedResponse {
            operation: FULFILLMENT_CREATE.name,
            message: "no fulfillment returned".to_string(),
        })?;

        info!(order_id = %id, fulfillment_id = ?created.id, "Order fulfilled");
        Ok(Fulfillment {
            id: created.id,
            status: created.status,
            fulfillment_order_id,
        })
    }

    async fn open_fulfillment_order(&self, order_id: &GlobalId) -> Result<GlobalId, ProvisioningError> {
        let missing = |dependency| ProvisioningError::MissingDependency {
            dependency,
            resource: order_id.to_string(),
        };

        let node = self
            .execute(FULFILLMENT_ORDERS, json!({ "id": order_id.to_string() }))
            .await?;
        if node.is_null() {
            return Err(missing("order"));
        }

        let orders: FulfillmentOrders = decode_node(FULFILLMENT_ORDERS, node)?;
        let open = orders
            .fulfillment_orders
            .into_nodes()
            .into_iter()
            .find(|node| {
                node.status
                    .as_deref()
                    .is_some_and(|status| FULFILLABLE.contains(&status))
            })
            .ok_or_else(|| missing("open fulfillment order"))?;

        Ok(GlobalId::parse(&open.id)?)
    }

    fn order_from_payload(
        operation: Operation,
        mut payload: Value,
    ) -> Result<Order, ProvisioningError> {
        ensure_accepted(operation, &payload, &["userErrors"])?;
        let remote: Option<RemoteOrder> = decode(operation, &mut payload, "order")?;
        let remote = remote.ok_or(ProvisioningError::UnexpectedResponse {
            operation: operation.name,
            message: "no order returned".to_string(),
        })?;
        Ok(order::from_remote(remote)?)
    }
}
