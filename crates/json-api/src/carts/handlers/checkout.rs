//! Checkout Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_status_error, responses::CartResponse},
    extensions::*,
    state::State,
};

/// Checkout Handler
///
/// Freezes the selected lines of the caller's active cart. Unselected lines
/// move to a new active cart.
#[endpoint(
    tags("carts"),
    summary = "Checkout Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Frozen cart", body = CartResponse),
        (status_code = StatusCode::BAD_REQUEST, description = "Cart is empty"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "carts.checkout", skip(depot), fields(user_id = tracing::field::Empty), err)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;

    tracing::Span::current().record("user_id", tracing::field::display(user.id));

    let cart = state
        .app
        .carts
        .checkout(user.id)
        .await
        .map_err(into_status_error)?;

    tracing::info!(cart_id = %cart.id, total = cart.total, "checked out cart");

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use virtuele_app::domain::carts::{CartsServiceError, MockCartsService, Size};

    use crate::test_helpers::{TestMocks, authed_service, make_cart, make_line};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        authed_service(
            TestMocks {
                carts,
                ..TestMocks::default()
            },
            Router::with_path("carts/checkout").post(handler),
        )
    }

    #[tokio::test]
    async fn test_checkout_returns_frozen_cart() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_checkout().once().return_once(|_| {
            let mut cart = make_cart(3, vec![make_line(3, "p1", Size::S, 1, 1000)]);
            cart.checked_out = true;

            Ok(cart)
        });

        let cart: CartResponse = TestClient::post("http://example.com/carts/checkout")
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        assert!(cart.checked_out);
        assert_eq!(cart.total, 1000);

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_returns_400() -> TestResult {
        for error in [CartsServiceError::NoActiveCart, CartsServiceError::EmptyCart] {
            let mut carts = MockCartsService::new();

            carts.expect_checkout().once().return_once(move |_| Err(error));

            let res = TestClient::post("http://example.com/carts/checkout")
                .send(&make_service(carts))
                .await;

            assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        }

        Ok(())
    }
}
