//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use virtuele_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::{
            MockCartsService, Size,
            records::{CartId, CartLineId, CartLineRecord, CartRecord},
        },
        payments::{MockPaymentsService, gateway::GatewayResponse},
        products::{MockProductsService, records::ProductId},
        transactions::{
            MockTransactionsService,
            records::{TransactionId, TransactionRecord},
        },
        users::records::{UserId, UserRecord},
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_ID: i64 = 7;

/// Service mocks backing a test `State`. Unset mocks reject every call.
#[derive(Default)]
pub(crate) struct TestMocks {
    pub(crate) auth: MockAuthService,
    pub(crate) products: MockProductsService,
    pub(crate) carts: MockCartsService,
    pub(crate) payments: MockPaymentsService,
    pub(crate) transactions: MockTransactionsService,
}

pub(crate) fn make_user(id: i64, is_admin: bool) -> UserRecord {
    UserRecord {
        id: UserId::from_i64(id),
        email: format!("user{id}@example.com"),
        username: format!("user{id}"),
        first_name: "Test".to_string(),
        last_name: None,
        is_active: true,
        is_admin,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_line(cart: i64, slug: &str, size: Size, quantity: u32, price: u64) -> CartLineRecord {
    CartLineRecord {
        id: CartLineId::from_i64(1),
        cart_id: CartId::from_i64(cart),
        user_id: UserId::from_i64(TEST_USER_ID),
        product_id: ProductId::from_i64(1),
        product_slug: slug.to_string(),
        product_name: format!("Product {slug}"),
        size,
        quantity,
        unit_price: price,
        subtotal: price * u64::from(quantity),
        selected: true,
        checked_out: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart(id: i64, lines: Vec<CartLineRecord>) -> CartRecord {
    CartRecord {
        id: CartId::from_i64(id),
        user_id: UserId::from_i64(TEST_USER_ID),
        checked_out: false,
        total: lines
            .iter()
            .filter(|line| line.selected)
            .map(|line| line.subtotal)
            .sum(),
        lines,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_transaction(order_id: &str, status: &str) -> TransactionRecord {
    TransactionRecord {
        id: TransactionId::from_i64(1),
        user_id: UserId::from_i64(TEST_USER_ID),
        cart_id: CartId::from_i64(3),
        order_id: order_id.to_string(),
        status: status.to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_gateway_response(order_id: &str, transaction_status: &str) -> GatewayResponse {
    GatewayResponse {
        status_code: "201".to_string(),
        status_message: Some("Success, transaction is created".to_string()),
        transaction_id: Some("0d5ed5a5-4ac3-4f40-8b7b-2a1c1b0c4f11".to_string()),
        order_id: order_id.to_string(),
        gross_amount: Some("1000.00".to_string()),
        payment_type: Some("gopay".to_string()),
        transaction_status: transaction_status.to_string(),
        fraud_status: Some("accept".to_string()),
        actions: None,
        payment_code: None,
        transaction_time: Some("2024-01-02 10:00:00".to_string()),
        expiry_time: Some("2024-01-02 10:15:00".to_string()),
    }
}

/// Stand-in for a storage failure.
pub(crate) fn sqlx_error() -> sqlx::Error {
    sqlx::Error::PoolTimedOut
}

pub(crate) fn state(mocks: TestMocks) -> Arc<State> {
    Arc::new(State::new(AppContext {
        auth: Arc::new(mocks.auth),
        products: Arc::new(mocks.products),
        carts: Arc::new(mocks.carts),
        payments: Arc::new(mocks.payments),
        transactions: Arc::new(mocks.transactions),
    }))
}

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user(make_user(TEST_USER_ID, false));
    ctrl.call_next(req, depot, res).await;
}

/// A service with `route` behind a fake authenticated user.
pub(crate) fn authed_service(mocks: TestMocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(mocks)))
            .hoop(inject_user)
            .push(route),
    )
}
