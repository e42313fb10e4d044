//! Cart Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use virtuele_app::domain::carts::data::CartFilter;

use crate::{
    carts::{
        errors::into_status_error,
        responses::{CartResponse, CartsResponse},
    },
    extensions::*,
    state::State,
};

/// Cart Index Handler
///
/// Lists the caller's carts, newest first. `checked` narrows the list to
/// checked out (`true`) or active (`false`) carts.
#[endpoint(
    tags("carts"),
    summary = "List Carts",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Carts found", body = CartsResponse),
        (status_code = StatusCode::NO_CONTENT, description = "No carts found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.index",
    skip(checked, depot, res),
    fields(user_id = tracing::field::Empty, checked = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    checked: QueryParam<bool, false>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let checked = checked.into_inner();

    let span = tracing::Span::current();

    span.record("user_id", tracing::field::display(user.id));
    span.record("checked", tracing::field::debug(checked));

    let carts = state
        .app
        .carts
        .list_carts(user.id, CartFilter::from(checked))
        .await
        .map_err(into_status_error)?;

    if carts.is_empty() {
        return Ok(StatusCode::NO_CONTENT);
    }

    res.render(Json(CartsResponse {
        carts: carts.into_iter().map(CartResponse::from).collect(),
    }));

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use virtuele_app::domain::{
        carts::{CartsServiceError, MockCartsService, Size},
        users::records::UserId,
    };

    use crate::test_helpers::{
        TEST_USER_ID, TestMocks, authed_service, make_cart, make_line, sqlx_error,
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        authed_service(
            TestMocks {
                carts,
                ..TestMocks::default()
            },
            Router::with_path("carts").get(handler),
        )
    }

    #[tokio::test]
    async fn test_index_returns_carts() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_list_carts()
            .once()
            .withf(|user, filter| *user == UserId::from_i64(TEST_USER_ID) && *filter == CartFilter::All)
            .return_once(|_, _| {
                Ok(vec![
                    make_cart(2, vec![make_line(2, "p1", Size::S, 1, 1000)]),
                    make_cart(1, vec![]),
                ])
            });

        let mut res = TestClient::get("http://example.com/carts")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartsResponse = res.take_json().await?;

        assert_eq!(body.carts.len(), 2, "expected both carts");
        assert_eq!(body.carts[0].id, 2);
        assert_eq!(body.carts[0].total, 1000);
        assert_eq!(body.carts[0].lines[0].size, "S");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_checked_filter() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_list_carts()
            .once()
            .withf(|_, filter| *filter == CartFilter::CheckedOut)
            .return_once(|_, _| Ok(vec![make_cart(1, vec![])]));

        let res = TestClient::get("http://example.com/carts?checked=true")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_without_carts_returns_204() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_list_carts()
            .once()
            .withf(|_, filter| *filter == CartFilter::Active)
            .return_once(|_, _| Ok(vec![]));

        let res = TestClient::get("http://example.com/carts?checked=false")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_invalid_checked_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_list_carts().never();

        let res = TestClient::get("http://example.com/carts?checked=maybe")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_list_carts()
            .once()
            .return_once(|_, _| Err(CartsServiceError::Sql(sqlx_error())));

        let res = TestClient::get("http://example.com/carts")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
