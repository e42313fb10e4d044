//! Payment Notification Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};
use serde::Deserialize;

use virtuele_app::domain::payments::{
    PaymentsServiceError,
    notification::{NotificationOutcome, NotificationPayload},
};

use crate::{
    extensions::*,
    observability::observe_notification,
    payments::{errors::into_status_error, responses::NotificationResponse},
    state::State,
};

/// Payment Notification Request
///
/// Only read from the gateway; fields the gateway adds beyond these are ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct NotificationRequest {
    pub order_id: String,
    pub status_code: String,
    pub gross_amount: String,

    /// Hex SHA-512 of order id, status code, gross amount and server key
    pub signature_key: String,

    pub transaction_status: String,

    #[serde(default)]
    pub fraud_status: Option<String>,

    #[serde(default)]
    pub transaction_id: Option<String>,

    #[serde(default)]
    pub payment_type: Option<String>,
}

impl From<NotificationRequest> for NotificationPayload {
    fn from(request: NotificationRequest) -> Self {
        NotificationPayload {
            order_id: request.order_id,
            status_code: request.status_code,
            gross_amount: request.gross_amount,
            signature_key: request.signature_key,
            transaction_status: request.transaction_status,
            fraud_status: request.fraud_status,
            transaction_id: request.transaction_id,
            payment_type: request.payment_type,
        }
    }
}

fn outcome_label(outcome: &Result<NotificationOutcome, PaymentsServiceError>) -> &'static str {
    match outcome {
        Ok(NotificationOutcome::Updated { .. }) => "updated",
        Ok(NotificationOutcome::UnknownOrder { .. }) => "unknown_order",
        Ok(NotificationOutcome::Unrecognized { .. }) => "unrecognized",
        Err(PaymentsServiceError::InvalidSignature) => "invalid_signature",
        Err(_) => "error",
    }
}

/// Payment Notification Handler
///
/// Receives asynchronous status updates from the payment gateway. Unsigned
/// or mis-signed notifications are rejected.
#[endpoint(
    tags("payments"),
    summary = "Payment Gateway Notification",
    responses(
        (status_code = StatusCode::OK, description = "Notification handled", body = NotificationResponse),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid signature or payload"),
    ),
)]
#[tracing::instrument(name = "payments.notification", skip(json, depot), fields(order_id = tracing::field::Empty), err)]
pub(crate) async fn handler(
    json: JsonBody<NotificationRequest>,
    depot: &mut Depot,
) -> Result<Json<NotificationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let payload = NotificationPayload::from(json.into_inner());

    tracing::Span::current().record("order_id", payload.order_id.as_str());

    let outcome = state.app.payments.handle_notification(payload).await;

    observe_notification(outcome_label(&outcome));

    let outcome = outcome.map_err(into_status_error)?;

    Ok(Json(NotificationResponse {
        message: outcome.message().to_string(),
    }))
}
