//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        carts::{
            checkout::{freeze_active_cart, load_cart_lines, load_lines, lock_checkout_cart},
            data::CartFilter,
            errors::CartsServiceError,
            records::CartRecord,
            repositories::{PgCartLinesRepository, PgCartsRepository},
            size::Size,
        },
        products::repository::PgProductsRepository,
        users::records::UserId,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    lines_repository: PgCartLinesRepository,
    products_repository: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            lines_repository: PgCartLinesRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    #[tracing::instrument(
        name = "carts.service.add_line",
        skip(self),
        fields(user_id = %user),
        err
    )]
    async fn add_line(
        &self,
        user: UserId,
        product_slug: &str,
        size: &str,
    ) -> Result<CartRecord, CartsServiceError> {
        let size = size.parse::<Size>()?;

        let mut tx = self.db.begin().await?;

        let product = self
            .products_repository
            .get_product_by_slug(&mut tx, product_slug)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => CartsServiceError::ProductNotFound,
                other => other.into(),
            })?;

        let cart = self
            .carts_repository
            .upsert_active_cart(&mut tx, user)
            .await?;

        self.lines_repository
            .upsert_cart_line(&mut tx, cart.id, user, &product, size)
            .await?;

        let cart = self
            .carts_repository
            .recompute_cart_total(&mut tx, cart.id)
            .await?;

        let cart = load_cart_lines(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.remove_line",
        skip(self),
        fields(user_id = %user),
        err
    )]
    async fn remove_line(
        &self,
        user: UserId,
        product_slug: &str,
        size: &str,
    ) -> Result<CartRecord, CartsServiceError> {
        let size = size.parse::<Size>()?;

        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .lock_active_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::LineNotFound)?;

        let line = self
            .lines_repository
            .find_cart_line(&mut tx, cart.id, product_slug, size)
            .await?
            .ok_or(CartsServiceError::LineNotFound)?;

        if line.quantity > 1 {
            self.lines_repository
                .decrement_cart_line(&mut tx, line.id)
                .await?;
        } else {
            self.lines_repository
                .delete_cart_line(&mut tx, line.id)
                .await?;
        }

        let cart = self
            .carts_repository
            .recompute_cart_total(&mut tx, cart.id)
            .await?;

        let cart = load_cart_lines(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.toggle_line",
        skip(self),
        fields(user_id = %user),
        err
    )]
    async fn toggle_line(
        &self,
        user: UserId,
        product_slug: &str,
        size: &str,
    ) -> Result<CartRecord, CartsServiceError> {
        let size = size.parse::<Size>()?;

        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .lock_active_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::LineNotFound)?;

        let line = self
            .lines_repository
            .find_cart_line(&mut tx, cart.id, product_slug, size)
            .await?
            .ok_or(CartsServiceError::LineNotFound)?;

        self.lines_repository
            .toggle_cart_line(&mut tx, line.id)
            .await?;

        let cart = self
            .carts_repository
            .recompute_cart_total(&mut tx, cart.id)
            .await?;

        let cart = load_cart_lines(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn list_carts(
        &self,
        user: UserId,
        filter: CartFilter,
    ) -> Result<Vec<CartRecord>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let carts = self
            .carts_repository
            .list_carts(&mut tx, user, filter)
            .await?;

        let carts = load_lines(&mut tx, carts).await?;

        tx.commit().await?;

        Ok(carts)
    }

    async fn get_active_cart(&self, user: UserId) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .get_active_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let cart = load_cart_lines(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.checkout",
        skip(self),
        fields(user_id = %user),
        err
    )]
    async fn checkout(&self, user: UserId) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = lock_checkout_cart(&mut tx, user).await?;
        let frozen = freeze_active_cart(&mut tx, &cart).await?;

        tx.commit().await?;

        info!(cart_id = %frozen.id, total = frozen.total, "checked out cart");

        Ok(frozen)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Add one unit of a product in the given size to the user's active cart,
    /// creating the cart when the user has none.
    async fn add_line(
        &self,
        user: UserId,
        product_slug: &str,
        size: &str,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Remove one unit of a line from the user's active cart. The line is
    /// deleted when its last unit is removed.
    async fn remove_line(
        &self,
        user: UserId,
        product_slug: &str,
        size: &str,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Flip whether a line is selected for checkout.
    async fn toggle_line(
        &self,
        user: UserId,
        product_slug: &str,
        size: &str,
    ) -> Result<CartRecord, CartsServiceError>;

    /// The user's carts matching the filter, newest first.
    async fn list_carts(
        &self,
        user: UserId,
        filter: CartFilter,
    ) -> Result<Vec<CartRecord>, CartsServiceError>;

    /// The user's active cart.
    async fn get_active_cart(&self, user: UserId) -> Result<CartRecord, CartsServiceError>;

    /// Freeze the user's active cart without charging it.
    async fn checkout(&self, user: UserId) -> Result<CartRecord, CartsServiceError>;
}
