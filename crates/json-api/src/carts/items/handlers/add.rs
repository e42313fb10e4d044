//! Add Cart Line Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    carts::{errors::into_status_error, responses::CartResponse},
    extensions::*,
    state::State,
};

/// Add Cart Line Handler
///
/// Adds one unit of the product in the given size to the caller's active
/// cart, creating the cart if needed.
#[endpoint(
    tags("carts"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart", body = CartResponse),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid size"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.items.add",
    skip(slug, size, depot),
    fields(
        user_id = tracing::field::Empty,
        product_slug = tracing::field::Empty,
        size = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    slug: PathParam<String>,
    size: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let slug = slug.into_inner();
    let size = size.into_inner();

    let span = tracing::Span::current();

    span.record("user_id", tracing::field::display(user.id));
    span.record("product_slug", slug.as_str());
    span.record("size", size.as_str());

    let cart = state
        .app
        .carts
        .add_line(user.id, &slug, &size)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
