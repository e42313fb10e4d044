//! App Router

use salvo::Router;

use crate::{auth, carts, healthcheck, observability, payments, transactions};

pub fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(Router::with_path("payments/notifications").post(payments::notification::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("carts")
                        .get(carts::index::handler)
                        .push(Router::with_path("active").get(carts::active::handler))
                        .push(Router::with_path("checkout").post(carts::checkout::handler))
                        .push(
                            Router::with_path("items/{slug}/{size}")
                                .post(carts::items::add::handler)
                                .delete(carts::items::remove::handler),
                        )
                        .push(
                            Router::with_path("toggle/items/{slug}/{size}")
                                .post(carts::items::toggle::handler),
                        ),
                )
                .push(
                    Router::with_path("payments")
                        .push(Router::with_path("{method}/charge").post(payments::charge::handler))
                        .push(Router::with_path("{order_id}/status").get(payments::status::handler))
                        .push(Router::with_path("{order_id}/cancel").post(payments::cancel::handler)),
                )
                .push(Router::with_path("transactions").get(transactions::index::handler)),
        )
}
