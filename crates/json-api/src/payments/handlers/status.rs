//! Payment Status Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    payments::{errors::into_status_error, responses::GatewayStatusResponse},
    state::State,
};

/// Payment Status Handler
///
/// Fetches the order's status from the gateway and records it locally.
#[endpoint(
    tags("payments"),
    summary = "Get Payment Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Gateway status", body = GatewayStatusResponse),
        (status_code = StatusCode::FORBIDDEN, description = "Transaction belongs to another user"),
        (status_code = StatusCode::NOT_FOUND, description = "Transaction not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
#[tracing::instrument(name = "payments.status", skip(order_id, depot), fields(order_id = tracing::field::Empty), err)]
pub(crate) async fn handler(
    order_id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<GatewayStatusResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let order_id = order_id.into_inner();

    tracing::Span::current().record("order_id", order_id.as_str());

    let response = state
        .app
        .payments
        .query_status(&order_id, user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(response.into()))
}
