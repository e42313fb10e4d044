//! Midtrans Core API client.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;
use zeroize::Zeroizing;

use super::{GatewayError, GatewayResponse, PaymentGateway};
use crate::domain::payments::request::ChargeRequest;

const SANDBOX_BASE_URL: &str = "https://api.sandbox.midtrans.com";
const PRODUCTION_BASE_URL: &str = "https://api.midtrans.com";

/// Configuration for connecting to Midtrans.
#[derive(Clone)]
pub struct MidtransConfig {
    /// Merchant server key, also used to verify notification signatures.
    pub server_key: Zeroizing<String>,

    /// Use the production environment instead of the sandbox.
    pub production: bool,

    /// Sent as `X-Override-Notification` on charges when set.
    pub notification_url: Option<String>,

    /// Upper bound for every gateway request.
    pub timeout: Duration,
}

impl MidtransConfig {
    #[must_use]
    pub fn base_url(&self) -> &'static str {
        if self.production {
            PRODUCTION_BASE_URL
        } else {
            SANDBOX_BASE_URL
        }
    }
}

impl fmt::Debug for MidtransConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MidtransConfig")
            .field("server_key", &"**redacted**")
            .field("production", &self.production)
            .field("notification_url", &self.notification_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// HTTP client for the Midtrans Core API.
#[derive(Debug, Clone)]
pub struct MidtransGateway {
    config: MidtransConfig,
    base_url: String,
    http: Client,
}

impl MidtransGateway {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: MidtransConfig) -> Result<Self, GatewayError> {
        let base_url = config.base_url().to_string();

        Self::with_base_url(config, base_url)
    }

    /// Create a client against a non-default API host.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn with_base_url(config: MidtransConfig, base_url: String) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(GatewayError::Http)?;

        Ok(Self {
            config,
            base_url,
            http,
        })
    }

    fn authorization(&self) -> String {
        let credentials = Zeroizing::new(format!("{}:", self.config.server_key.as_str()));

        format!("Basic {}", BASE64.encode(credentials.as_bytes()))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Authorization", self.authorization())
            .header("Accept", "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> Result<GatewayResponse, GatewayError> {
        let response = self.authorized(request).send().await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        interpret_response(status, &body)
    }
}

#[async_trait]
impl PaymentGateway for MidtransGateway {
    #[tracing::instrument(
        name = "midtrans.charge",
        skip(self, request),
        fields(
            order_id = %request.transaction_details.order_id,
            payment_type = %request.payment_type
        ),
        err
    )]
    async fn charge(&self, request: &ChargeRequest) -> Result<GatewayResponse, GatewayError> {
        let mut builder = self
            .http
            .post(format!("{}/v2/charge", self.base_url))
            .json(request);

        if let Some(url) = &self.config.notification_url {
            builder = builder.header("X-Override-Notification", url);
        }

        let response = self.send(builder).await?;

        debug!(
            transaction_status = %response.transaction_status,
            "gateway accepted charge"
        );

        Ok(response)
    }

    #[tracing::instrument(name = "midtrans.status", skip(self), err)]
    async fn status(&self, order_id: &str) -> Result<GatewayResponse, GatewayError> {
        let url = format!("{}/v2/{order_id}/status", self.base_url);

        self.send(self.http.get(url)).await
    }

    #[tracing::instrument(name = "midtrans.cancel", skip(self), err)]
    async fn cancel(&self, order_id: &str) -> Result<GatewayResponse, GatewayError> {
        let url = format!("{}/v2/{order_id}/cancel", self.base_url);

        self.send(self.http.post(url)).await
    }
}

/// Body code of a status reply for an expired order. It carries the order's
/// state like any other reply.
const EXPIRED_STATUS_CODE: u16 = 407;

fn is_rejection(status_code: u16) -> bool {
    status_code >= 400 && status_code != EXPIRED_STATUS_CODE
}

/// Classify a gateway reply.
///
/// The body's `status_code` wins over the HTTP status, which the gateway
/// often leaves at 200 for rejected requests.
fn interpret_response(http_status: u16, body: &str) -> Result<GatewayResponse, GatewayError> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        if http_status >= 400 {
            return Err(GatewayError::Api {
                status_code: http_status,
                message: body.to_string(),
            });
        }

        return Err(GatewayError::InvalidResponse(format!(
            "non-json body with status {http_status}"
        )));
    };

    let status_code = value
        .get("status_code")
        .and_then(Value::as_str)
        .and_then(|code| code.parse::<u16>().ok())
        .unwrap_or(http_status);

    if is_rejection(status_code) || is_rejection(http_status) {
        let message = value
            .get("status_message")
            .and_then(Value::as_str)
            .map_or_else(|| body.to_string(), str::to_string);

        return Err(GatewayError::Api {
            status_code: if is_rejection(status_code) {
                status_code
            } else {
                http_status
            },
            message,
        });
    }

    serde_json::from_value(value)
        .map_err(|error| GatewayError::InvalidResponse(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MidtransConfig {
        MidtransConfig {
            server_key: Zeroizing::new("SB-Mid-server-secret".to_string()),
            production: false,
            notification_url: None,
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn successful_charge_body_is_parsed() {
        let body = r#"{
            "status_code": "201",
            "status_message": "GoPay transaction is created",
            "transaction_id": "231c79c5-e39e-4993-86da-cadcaee56c1d",
            "order_id": "GOPAY-1-2-20240102abcdef12-1000",
            "gross_amount": "1000.00",
            "payment_type": "gopay",
            "transaction_status": "pending",
            "fraud_status": "accept",
            "transaction_time": "2024-01-02 10:00:00",
            "expiry_time": "2024-01-02 10:15:00",
            "actions": [{"name": "generate-qr-code", "method": "GET", "url": "https://example.com/qr"}]
        }"#;

        let response = interpret_response(200, body).expect("parsed response");

        assert_eq!(response.status_code, "201");
        assert_eq!(response.order_id, "GOPAY-1-2-20240102abcdef12-1000");
        assert_eq!(response.transaction_status, "pending");
        assert_eq!(response.fraud_status.as_deref(), Some("accept"));
        assert!(response.actions.is_some());
        assert_eq!(response.gross_amount.as_deref(), Some("1000.00"));
        assert_eq!(response.expiry_time.as_deref(), Some("2024-01-02 10:15:00"));
    }

    #[test]
    fn expired_order_status_is_a_reply() {
        let body = r#"{
            "status_code": "407",
            "status_message": "Success, transaction is expired",
            "transaction_id": "231c79c5-e39e-4993-86da-cadcaee56c1d",
            "order_id": "GOPAY-1-2-20240102abcdef12-1000",
            "gross_amount": "1000.00",
            "payment_type": "gopay",
            "transaction_time": "2024-01-02 10:00:00",
            "expiry_time": "2024-01-02 10:15:00",
            "transaction_status": "expire"
        }"#;

        let response = interpret_response(200, body).expect("expired reply");

        assert_eq!(response.status_code, "407");
        assert_eq!(response.transaction_status, "expire");

        let missing = r#"{"status_code": "404", "status_message": "Transaction doesn't exist."}"#;
        let result = interpret_response(404, missing);

        assert!(
            matches!(&result, Err(GatewayError::Api { status_code: 404, .. })),
            "expected Api 404, got {result:?}"
        );
    }

    #[test]
    fn body_status_code_overrides_http_success() {
        let body = r#"{"status_code": "406", "status_message": "Duplicate order ID"}"#;

        let result = interpret_response(200, body);

        assert!(
            matches!(
                &result,
                Err(GatewayError::Api { status_code: 406, message }) if message == "Duplicate order ID"
            ),
            "expected Api 406, got {result:?}"
        );
    }

    #[test]
    fn http_error_without_json_is_api_error() {
        let result = interpret_response(503, "Service Unavailable");

        assert!(
            matches!(&result, Err(GatewayError::Api { status_code: 503, .. })),
            "expected Api 503, got {result:?}"
        );
    }

    #[test]
    fn success_without_required_fields_is_invalid() {
        let result = interpret_response(200, r#"{"status_code": "200"}"#);

        assert!(
            matches!(result, Err(GatewayError::InvalidResponse(_))),
            "expected InvalidResponse, got {result:?}"
        );

        let result = interpret_response(200, "<html></html>");

        assert!(matches!(result, Err(GatewayError::InvalidResponse(_))));
    }

    #[test]
    fn base_url_follows_environment() {
        let mut config = config();

        assert_eq!(config.base_url(), SANDBOX_BASE_URL);

        config.production = true;

        assert_eq!(config.base_url(), PRODUCTION_BASE_URL);
    }

    #[test]
    fn authorization_is_basic_server_key_with_empty_password() -> Result<(), GatewayError> {
        let gateway = MidtransGateway::new(config())?;

        assert_eq!(
            gateway.authorization(),
            format!("Basic {}", BASE64.encode("SB-Mid-server-secret:"))
        );

        Ok(())
    }

    #[test]
    fn debug_output_redacts_server_key() {
        let rendered = format!("{:?}", config());

        assert!(!rendered.contains("SB-Mid-server-secret"));
        assert!(rendered.contains("**redacted**"));
    }
}
