//! Cart Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use virtuele_app::domain::carts::records::{CartLineRecord, CartRecord};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The cart identifier
    pub id: i64,

    /// Whether the cart has been checked out
    pub checked_out: bool,

    /// Sum of the selected lines' subtotals
    pub total: u64,

    /// The lines in the cart
    pub lines: Vec<CartLineResponse>,

    /// The date and time the cart was created
    pub created_at: String,

    /// The date and time the cart was last updated
    pub updated_at: String,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        Self {
            id: cart.id.into_i64(),
            checked_out: cart.checked_out,
            total: cart.total,
            lines: cart.lines.into_iter().map(CartLineResponse::from).collect(),
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    /// The line identifier
    pub id: i64,

    /// Slug of the product on the line
    pub product_slug: String,

    /// Name of the product on the line
    pub product_name: String,

    /// One of S, M or L
    pub size: String,

    pub quantity: u32,

    /// Unit price at the time of the last change
    pub unit_price: u64,

    pub subtotal: u64,

    /// Whether the line is included in the next checkout
    pub selected: bool,
}

impl From<CartLineRecord> for CartLineResponse {
    fn from(line: CartLineRecord) -> Self {
        Self {
            id: line.id.into_i64(),
            product_slug: line.product_slug,
            product_name: line.product_name,
            size: line.size.to_string(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            subtotal: line.subtotal,
            selected: line.selected,
        }
    }
}

/// Carts Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartsResponse {
    /// The list of carts, newest first
    pub carts: Vec<CartResponse>,
}
