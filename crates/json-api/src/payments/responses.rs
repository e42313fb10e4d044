//! Payment Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use virtuele_app::domain::payments::{ChargeOutcome, gateway::GatewayResponse};

use crate::{carts::responses::CartResponse, transactions::responses::TransactionResponse};

/// Gateway Status Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct GatewayStatusResponse {
    /// Gateway status code, as a string
    pub status_code: String,

    pub status_message: Option<String>,

    /// Gateway-side transaction id
    pub transaction_id: Option<String>,

    pub order_id: String,

    pub gross_amount: Option<String>,

    pub payment_type: Option<String>,

    /// Gateway transaction status, e.g. `pending` or `settlement`
    pub transaction_status: String,

    pub fraud_status: Option<String>,

    /// When the gateway created the order, `YYYY-MM-DD HH:MM:SS` gateway time
    pub transaction_time: Option<String>,

    /// When an unpaid order expires, same format as `transaction_time`
    pub expiry_time: Option<String>,

    /// Deep links and QR codes for e-wallet payments
    pub actions: Vec<GatewayAction>,

    /// Code presented at the store for convenience store payments
    pub payment_code: Option<String>,
}

/// Follow-up action offered by the gateway
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct GatewayAction {
    /// e.g. `generate-qr-code` or `deeplink-redirect`
    pub name: String,

    pub method: String,

    pub url: String,
}

impl From<GatewayResponse> for GatewayStatusResponse {
    fn from(response: GatewayResponse) -> Self {
        Self {
            status_code: response.status_code,
            status_message: response.status_message,
            transaction_id: response.transaction_id,
            order_id: response.order_id,
            gross_amount: response.gross_amount,
            payment_type: response.payment_type,
            transaction_status: response.transaction_status,
            fraud_status: response.fraud_status,
            transaction_time: response.transaction_time,
            expiry_time: response.expiry_time,
            actions: response
                .actions
                .and_then(|actions| serde_json::from_value(actions).ok())
                .unwrap_or_default(),
            payment_code: response.payment_code,
        }
    }
}

/// Charge Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ChargeResponse {
    /// The recorded transaction
    pub transaction: TransactionResponse,

    /// The frozen cart
    pub cart: CartResponse,

    /// What the gateway returned for the charge
    pub gateway: GatewayStatusResponse,
}

impl From<ChargeOutcome> for ChargeResponse {
    fn from(outcome: ChargeOutcome) -> Self {
        Self {
            transaction: outcome.transaction.into(),
            cart: outcome.cart.into(),
            gateway: outcome.gateway.into(),
        }
    }
}

/// Notification Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NotificationResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::test_helpers::make_gateway_response;

    use super::*;

    #[test]
    fn status_response_carries_gateway_timing_and_actions() {
        let mut gateway = make_gateway_response("GOPAY-1-2-20240102abcdef12-1000", "pending");
        gateway.actions = Some(json!([
            {"name": "generate-qr-code", "method": "GET", "url": "https://example.com/qr"},
            {"name": "deeplink-redirect", "method": "GET", "url": "gojek://gopay/pay"}
        ]));

        let response = GatewayStatusResponse::from(gateway);

        assert_eq!(response.transaction_time.as_deref(), Some("2024-01-02 10:00:00"));
        assert_eq!(response.expiry_time.as_deref(), Some("2024-01-02 10:15:00"));
        assert_eq!(response.actions.len(), 2);
        assert_eq!(response.actions[1].name, "deeplink-redirect");
    }

    #[test]
    fn malformed_actions_are_dropped() {
        let mut gateway = make_gateway_response("GOPAY-1-2-20240102abcdef12-1000", "pending");
        gateway.actions = Some(json!({"unexpected": true}));

        let response = GatewayStatusResponse::from(gateway);

        assert!(response.actions.is_empty());
    }
}
