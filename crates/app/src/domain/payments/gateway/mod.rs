//! Payment Gateway

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::payments::request::ChargeRequest;

mod midtrans;

pub use midtrans::{MidtransConfig, MidtransGateway};

/// A successful gateway reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayResponse {
    pub status_code: String,

    #[serde(default)]
    pub status_message: Option<String>,

    #[serde(default)]
    pub transaction_id: Option<String>,

    pub order_id: String,

    #[serde(default)]
    pub gross_amount: Option<String>,

    #[serde(default)]
    pub payment_type: Option<String>,

    pub transaction_status: String,

    #[serde(default)]
    pub fraud_status: Option<String>,

    /// Deep links and QR codes returned for e-wallet payments.
    #[serde(default)]
    pub actions: Option<Value>,

    /// Code the customer presents at the store for cstore payments.
    #[serde(default)]
    pub payment_code: Option<String>,

    /// Gateway clock, `YYYY-MM-DD HH:MM:SS` in Asia/Jakarta.
    #[serde(default)]
    pub transaction_time: Option<String>,

    /// When an unpaid order expires, same format as `transaction_time`.
    #[serde(default)]
    pub expiry_time: Option<String>,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The gateway answered with an error status; carries its own code and message.
    #[error("gateway rejected request with status {status_code}: {message}")]
    Api { status_code: u16, message: String },

    #[error("gateway request timed out")]
    Timeout,

    #[error("gateway transport error")]
    Http(#[source] reqwest::Error),

    #[error("unexpected gateway response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(error)
        }
    }
}

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Request a new payment. Never retried.
    async fn charge(&self, request: &ChargeRequest) -> Result<GatewayResponse, GatewayError>;

    /// Current state of an order at the gateway.
    async fn status(&self, order_id: &str) -> Result<GatewayResponse, GatewayError>;

    /// Cancel a pending order.
    async fn cancel(&self, order_id: &str) -> Result<GatewayResponse, GatewayError>;
}
