//! Transactions Data

use crate::domain::{carts::records::CartId, users::records::UserId};

/// New Transaction Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub user_id: UserId,
    pub cart_id: CartId,
    pub order_id: String,
    pub status: String,
}
