//! Toggle Cart Line Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    carts::{errors::into_status_error, responses::CartResponse},
    extensions::*,
    state::State,
};

/// Toggle Cart Line Handler
///
/// Flips whether the matching line is selected for checkout.
#[endpoint(
    tags("carts"),
    summary = "Toggle Cart Item Selection",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart", body = CartResponse),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid size"),
        (status_code = StatusCode::NOT_FOUND, description = "Product or line not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(
    slug: PathParam<String>,
    size: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;

    let cart = state
        .app
        .carts
        .toggle_line(user.id, &slug.into_inner(), &size.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
