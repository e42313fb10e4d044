//! Gateway Notifications

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};

/// Asynchronous status notification posted by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub order_id: String,
    pub status_code: String,
    pub gross_amount: String,
    pub signature_key: String,
    pub transaction_status: String,

    #[serde(default)]
    pub fraud_status: Option<String>,

    #[serde(default)]
    pub transaction_id: Option<String>,

    #[serde(default)]
    pub payment_type: Option<String>,
}

/// What handling a verified notification did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    Updated { order_id: String, status: String },
    UnknownOrder { order_id: String },
    Unrecognized { order_id: String },
}

impl NotificationOutcome {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Updated { status, .. } => match status.as_str() {
                "challenge" => {
                    "Notification received. Payment has been received but is challenged by fraud detection"
                }
                "success" => "Notification received. Payment has been received",
                "failure" => {
                    "Notification received. Transaction was discontinued, either expired or cancelled"
                }
                _ => "Notification received. Waiting for payment",
            },
            Self::UnknownOrder { .. } => "Notification received for an unknown order",
            Self::Unrecognized { .. } => "Notification received with an unrecognized status",
        }
    }
}

/// Hex SHA-512 of `order_id + status_code + gross_amount + server_key`.
#[must_use]
pub fn expected_signature(payload: &NotificationPayload, server_key: &str) -> String {
    let mut hasher = Sha512::new();

    hasher.update(payload.order_id.as_bytes());
    hasher.update(payload.status_code.as_bytes());
    hasher.update(payload.gross_amount.as_bytes());
    hasher.update(server_key.as_bytes());

    format!("{:x}", hasher.finalize())
}

#[must_use]
pub fn verify_signature(payload: &NotificationPayload, server_key: &str) -> bool {
    expected_signature(payload, server_key).as_bytes() == payload.signature_key.as_bytes()
}

/// Local status for a gateway status pair, `None` when the pair is not recognized.
#[must_use]
pub fn reconciled_status(transaction_status: &str, fraud_status: Option<&str>) -> Option<&'static str> {
    match (transaction_status, fraud_status) {
        ("capture" | "settlement", Some("challenge")) => Some("challenge"),
        ("capture" | "settlement", Some("accept")) | ("settlement", None) => Some("success"),
        ("cancel" | "deny" | "expire", _) => Some("failure"),
        ("pending", _) => Some("pending"),
        _ => None,
    }
}
