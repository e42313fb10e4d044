//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::{
        carts::size::Size,
        products::records::ProductId,
        users::records::UserId,
    },
    ids::TypedId,
};

/// Cart ID
pub type CartId = TypedId<CartRecord>;

/// Cart Record
#[derive(Debug, Clone, PartialEq)]
pub struct CartRecord {
    pub id: CartId,
    pub user_id: UserId,
    pub checked_out: bool,
    pub total: u64,
    pub lines: Vec<CartLineRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartRecord {
    /// Lines that count towards the total.
    pub fn selected_lines(&self) -> impl Iterator<Item = &CartLineRecord> {
        self.lines.iter().filter(|line| line.selected)
    }
}

/// Cart Line ID
pub type CartLineId = TypedId<CartLineRecord>;

/// Cart Line Record
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineRecord {
    pub id: CartLineId,
    pub cart_id: CartId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub product_slug: String,
    pub product_name: String,
    pub size: Size,
    pub quantity: u32,
    pub unit_price: u64,
    pub subtotal: u64,
    pub selected: bool,
    pub checked_out: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
