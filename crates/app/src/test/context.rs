//! Test context for service-level integration tests.

use std::sync::Arc;

use zeroize::Zeroizing;

use crate::{
    auth::PgAuthService,
    database::Db,
    domain::{
        carts::PgCartsService,
        payments::{PgPaymentsService, gateway::MockPaymentGateway},
        products::PgProductsService,
        transactions::PgTransactionsService,
        users::PgUsersService,
    },
};

use super::db::TestDb;

/// Server key used to sign notifications in tests.
pub(crate) const TEST_SERVER_KEY: &str = "SB-Mid-server-test-key";

pub struct TestContext {
    pub db: TestDb,
    pub users: PgUsersService,
    pub auth: PgAuthService,
    pub products: PgProductsService,
    pub carts: PgCartsService,
    pub transactions: PgTransactionsService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let pool = test_db.pool().clone();
        let db = Db::new(pool.clone());

        Self {
            users: PgUsersService::new(pool.clone()),
            auth: PgAuthService::new(pool),
            products: PgProductsService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            transactions: PgTransactionsService::new(db),
            db: test_db,
        }
    }

    /// Payments service talking to the given mock gateway.
    pub fn payments(&self, gateway: MockPaymentGateway) -> PgPaymentsService {
        PgPaymentsService::new(
            Db::new(self.db.pool().clone()),
            Arc::new(gateway),
            Zeroizing::new(TEST_SERVER_KEY.to_string()),
        )
    }
}
