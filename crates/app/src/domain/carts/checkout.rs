//! Checkout
//!
//! Cart state transitions shared by the carts service and the payments
//! service. Every function runs inside the caller's open transaction.

use sqlx::{Postgres, Transaction};
use tracing::debug;

use crate::domain::{
    carts::{
        errors::CartsServiceError,
        records::CartRecord,
        repositories::{PgCartLinesRepository, PgCartsRepository},
    },
    users::records::UserId,
};

/// Attach each cart's lines.
pub(crate) async fn load_lines(
    tx: &mut Transaction<'_, Postgres>,
    mut carts: Vec<CartRecord>,
) -> Result<Vec<CartRecord>, sqlx::Error> {
    if carts.is_empty() {
        return Ok(carts);
    }

    let ids: Vec<_> = carts.iter().map(|cart| cart.id).collect();

    let lines = PgCartLinesRepository::new()
        .get_cart_lines(tx, &ids)
        .await?;

    for line in lines {
        if let Some(cart) = carts.iter_mut().find(|cart| cart.id == line.cart_id) {
            cart.lines.push(line);
        }
    }

    Ok(carts)
}

/// Attach the lines of a single cart.
pub(crate) async fn load_cart_lines(
    tx: &mut Transaction<'_, Postgres>,
    cart: CartRecord,
) -> Result<CartRecord, sqlx::Error> {
    let mut carts = load_lines(tx, vec![cart]).await?;

    carts.pop().ok_or(sqlx::Error::RowNotFound)
}

/// Lock the user's active cart for the rest of the transaction.
///
/// Fails with [`CartsServiceError::NoActiveCart`] when the user has no active
/// cart and [`CartsServiceError::EmptyCart`] when none of its lines are
/// selected.
pub(crate) async fn lock_checkout_cart(
    tx: &mut Transaction<'_, Postgres>,
    user: UserId,
) -> Result<CartRecord, CartsServiceError> {
    let cart = PgCartsRepository::new()
        .lock_active_cart(tx, user)
        .await?
        .ok_or(CartsServiceError::NoActiveCart)?;

    let cart = load_cart_lines(tx, cart).await?;

    if cart.selected_lines().next().is_none() {
        return Err(CartsServiceError::EmptyCart);
    }

    Ok(cart)
}

/// Freeze a locked active cart.
///
/// Selected lines are checked out with the cart. Unselected lines move onto a
/// new active cart for the same user. Returns the frozen cart with its lines.
pub(crate) async fn freeze_active_cart(
    tx: &mut Transaction<'_, Postgres>,
    cart: &CartRecord,
) -> Result<CartRecord, CartsServiceError> {
    let carts = PgCartsRepository::new();
    let lines = PgCartLinesRepository::new();

    let counts = lines.count_cart_lines(tx, cart.id).await?;

    if counts.selected == 0 {
        return Err(CartsServiceError::EmptyCart);
    }

    lines.check_out_selected_lines(tx, cart.id).await?;

    // The active-cart index only admits the leftover cart once this one is frozen.
    carts.freeze_cart(tx, cart.id).await?;

    if counts.unselected > 0 {
        let leftover = carts.create_cart(tx, cart.user_id).await?;

        let moved = lines.move_unselected_lines(tx, cart.id, leftover.id).await?;

        carts.recompute_cart_total(tx, leftover.id).await?;

        debug!(
            cart_id = %cart.id,
            leftover_cart_id = %leftover.id,
            moved,
            "moved unselected lines to new active cart"
        );
    }

    let frozen = carts.recompute_cart_total(tx, cart.id).await?;

    Ok(load_cart_lines(tx, frozen).await?)
}
