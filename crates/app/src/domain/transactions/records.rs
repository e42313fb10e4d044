//! Transaction Records

use jiff::Timestamp;

use crate::{
    domain::{carts::records::CartId, users::records::UserId},
    ids::TypedId,
};

/// Transaction ID
pub type TransactionId = TypedId<TransactionRecord>;

/// Transaction Record
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub user_id: UserId,
    pub cart_id: CartId,
    pub order_id: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
