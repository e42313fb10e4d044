//! Charge Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::PathParam, prelude::*};

use virtuele_app::domain::payments::PaymentMethod;

use crate::{
    extensions::*,
    payments::{errors::into_status_error, responses::ChargeResponse},
    state::State,
};

/// Charge Handler
///
/// Charges the caller's active cart through the payment gateway. The cart is
/// frozen only when the gateway accepts the charge.
#[endpoint(
    tags("payments"),
    summary = "Charge Active Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Charge created", body = ChargeResponse),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown payment method or empty cart"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::CONFLICT, description = "Cart changed during the charge"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Payment gateway unavailable"),
        (status_code = StatusCode::GATEWAY_TIMEOUT, description = "Payment gateway timed out"),
    ),
)]
#[tracing::instrument(
    name = "payments.charge",
    skip(method, depot, res),
    fields(user_id = tracing::field::Empty, method = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    method: PathParam<String>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ChargeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;

    let method = method
        .into_inner()
        .parse::<PaymentMethod>()
        .map_err(|error| StatusError::bad_request().brief(error.to_string()))?;

    let span = tracing::Span::current();

    span.record("user_id", tracing::field::display(user.id));
    span.record("method", tracing::field::display(method));

    let outcome = state
        .app
        .payments
        .charge(user, method)
        .await
        .map_err(into_status_error)?;

    tracing::info!(
        order_id = %outcome.transaction.order_id,
        status = %outcome.transaction.status,
        "charged cart"
    );

    res.add_header(
        LOCATION,
        format!("/payments/{}/status", outcome.transaction.order_id),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(outcome.into()))
}
