//! Gateway call metering.

use std::{sync::Arc, time::Instant};

use async_trait::async_trait;
use tracing::warn;

use virtuele_app::domain::payments::{
    gateway::{GatewayError, GatewayResponse, PaymentGateway},
    request::ChargeRequest,
};

use crate::observability::{observe_gateway_call, slow_gateway_call_threshold_ms};

/// Counts and times every call made through the wrapped gateway.
pub(crate) struct MeteredGateway {
    inner: Arc<dyn PaymentGateway>,
}

impl std::fmt::Debug for MeteredGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeteredGateway").finish_non_exhaustive()
    }
}

impl MeteredGateway {
    pub(crate) fn new(inner: Arc<dyn PaymentGateway>) -> Self {
        Self { inner }
    }
}

fn outcome(result: &Result<GatewayResponse, GatewayError>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(GatewayError::Api { .. }) => "rejected",
        Err(GatewayError::Timeout) => "timeout",
        Err(GatewayError::Http(_)) => "transport_error",
        Err(GatewayError::InvalidResponse(_)) => "invalid_response",
    }
}

fn metered(
    operation: &str,
    started: Instant,
    result: Result<GatewayResponse, GatewayError>,
) -> Result<GatewayResponse, GatewayError> {
    let elapsed = started.elapsed();
    let outcome = outcome(&result);

    observe_gateway_call(operation, outcome, elapsed.as_secs_f64());

    let duration_ms = elapsed.as_millis();
    let threshold_ms = u128::from(slow_gateway_call_threshold_ms());

    if duration_ms > threshold_ms {
        warn!(operation, outcome, duration_ms, threshold_ms, "slow payment gateway call");
    }

    result
}

#[async_trait]
impl PaymentGateway for MeteredGateway {
    async fn charge(&self, request: &ChargeRequest) -> Result<GatewayResponse, GatewayError> {
        let started = Instant::now();

        metered("charge", started, self.inner.charge(request).await)
    }

    async fn status(&self, order_id: &str) -> Result<GatewayResponse, GatewayError> {
        let started = Instant::now();

        metered("status", started, self.inner.status(order_id).await)
    }

    async fn cancel(&self, order_id: &str) -> Result<GatewayResponse, GatewayError> {
        let started = Instant::now();

        metered("cancel", started, self.inner.cancel(order_id).await)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use virtuele_app::domain::payments::gateway::MockPaymentGateway;

    use crate::test_helpers::make_gateway_response;

    use super::*;

    #[tokio::test]
    async fn calls_are_forwarded_unchanged() -> TestResult {
        let mut inner = MockPaymentGateway::new();

        inner
            .expect_status()
            .once()
            .withf(|order_id: &str| order_id == "GOPAY-1")
            .return_once(|_| Ok(make_gateway_response("GOPAY-1", "settlement")));

        inner
            .expect_cancel()
            .once()
            .return_once(|_| Err(GatewayError::Timeout));

        let gateway = MeteredGateway::new(Arc::new(inner));

        assert_eq!(gateway.status("GOPAY-1").await?.transaction_status, "settlement");
        assert!(matches!(
            gateway.cancel("GOPAY-1").await,
            Err(GatewayError::Timeout)
        ));

        Ok(())
    }

    #[test]
    fn outcomes_follow_error_kind() {
        assert_eq!(outcome(&Err(GatewayError::Timeout)), "timeout");
        assert_eq!(
            outcome(&Err(GatewayError::Api {
                status_code: 406,
                message: "Duplicate order ID".to_string()
            })),
            "rejected"
        );
        assert_eq!(
            outcome(&Ok(make_gateway_response("CSTORE-1", "pending"))),
            "success"
        );
    }
}
