//! App Context

use std::sync::Arc;

use sqlx::migrate::MigrateError;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        payments::{PaymentsService, PgPaymentsService, gateway::PaymentGateway},
        products::{PgProductsService, ProductsService},
        transactions::{PgTransactionsService, TransactionsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrate(#[source] MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub payments: Arc<dyn PaymentsService>,
    pub transactions: Arc<dyn TransactionsService>,
}

impl AppContext {
    /// Build application context from a database URL and a payment gateway.
    ///
    /// `server_key` verifies gateway notification signatures. Pending
    /// migrations are applied when `migrate` is set.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting to the database or migrating it fails.
    pub async fn from_database_url(
        url: &str,
        migrate: bool,
        gateway: Arc<dyn PaymentGateway>,
        server_key: Zeroizing<String>,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if migrate {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;
        }

        let db = Db::new(pool.clone());

        Ok(Self {
            auth: Arc::new(PgAuthService::new(pool)),
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            payments: Arc::new(PgPaymentsService::new(db.clone(), gateway, server_key)),
            transactions: Arc::new(PgTransactionsService::new(db)),
        })
    }
}
