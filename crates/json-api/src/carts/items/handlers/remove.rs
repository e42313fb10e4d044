//! Remove Cart Line Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    carts::{errors::into_status_error, responses::CartResponse},
    extensions::*,
    state::State,
};

/// Remove Cart Line Handler
///
/// Removes one unit from the matching line of the caller's active cart.
#[endpoint(
    tags("carts"),
    summary = "Remove Item from Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart", body = CartResponse),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid size"),
        (status_code = StatusCode::NOT_FOUND, description = "Product or line not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.items.remove",
    skip(slug, size, depot),
    fields(user_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    slug: PathParam<String>,
    size: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;

    tracing::Span::current().record("user_id", tracing::field::display(user.id));

    let cart = state
        .app
        .carts
        .remove_line(user.id, &slug.into_inner(), &size.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use virtuele_app::domain::carts::{CartsServiceError, MockCartsService};

    use crate::test_helpers::{TestMocks, authed_service, make_cart};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        authed_service(
            TestMocks {
                carts,
                ..TestMocks::default()
            },
            Router::with_path("carts/items/{slug}/{size}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_remove_last_unit_returns_empty_cart() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_line()
            .once()
            .withf(|_, slug, size| slug == "p1" && size == "L")
            .return_once(|_, _, _| Ok(make_cart(1, vec![])));

        let cart: CartResponse = TestClient::delete("http://example.com/carts/items/p1/L")
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        assert!(cart.lines.is_empty());
        assert_eq!(cart.total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_missing_line_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_line()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::LineNotFound));

        let res = TestClient::delete("http://example.com/carts/items/p1/M")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
