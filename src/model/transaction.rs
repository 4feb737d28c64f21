//! Order transaction documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of a transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money reserved but not yet captured.
    Authorization,
    /// Transfer of previously authorized money.
    Capture,
    /// Authorization and capture in one step.
    Sale,
    /// Cancellation of a pending authorization or capture.
    Void,
    /// Money returned to the customer.
    Refund,
}

/// A transaction on an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    /// The unique identifier of the transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// The order the transaction belongs to.
    #[serde(skip_serializing)]
    pub order_id: Option<u64>,

    /// The kind of transaction.
    pub kind: TransactionKind,

    /// Amount as a decimal string. Captures default to the authorized amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,

    /// ISO 4217 currency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// The authorization this transaction settles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,

    /// Payment gateway name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,

    /// `pending`, `failure`, `success` or `error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Whether this is a test transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<bool>,

    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Creates a transaction of `kind` with no other fields set.
    #[must_use]
    pub const fn new(kind: TransactionKind) -> Self {
        Self {
            id: None,
            order_id: None,
            kind,
            amount: None,
            currency: None,
            parent_id: None,
            gateway: None,
            status: None,
            test: None,
            created_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transaction_deserializes_rest_payload() {
        let transaction: Transaction = serde_json::from_value(json!({
            "id": 389_404_469,
            "order_id": 450_789_469,
            "kind": "authorization",
            "amount": "598.94",
            "currency": "USD",
            "gateway": "bogus",
            "status": "success",
            "test": false,
            "created_at": "2024-01-02T09:28:43-05:00"
        }))
        .unwrap();

        assert_eq!(transaction.kind, TransactionKind::Authorization);
        assert_eq!(transaction.order_id, Some(450_789_469));
    }

    #[test]
    fn test_new_capture_serializes_minimal_body() {
        let mut capture = Transaction::new(TransactionKind::Capture);
        capture.parent_id = Some(389_404_469);
        assert_eq!(
            serde_json::to_value(&capture).unwrap(),
            json!({"kind": "capture", "parent_id": 389_404_469})
        );
    }
}
