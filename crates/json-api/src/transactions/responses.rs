//! Transaction Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use virtuele_app::domain::transactions::records::TransactionRecord;

/// Transaction Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TransactionResponse {
    /// Gateway order id
    pub order_id: String,

    /// The cart the transaction pays for
    pub cart_id: i64,

    /// Last known payment status
    pub status: String,

    /// The date and time the transaction was recorded
    pub created_at: String,

    /// The date and time the status last changed
    pub updated_at: String,
}

impl From<TransactionRecord> for TransactionResponse {
    fn from(transaction: TransactionRecord) -> Self {
        Self {
            order_id: transaction.order_id,
            cart_id: transaction.cart_id.into_i64(),
            status: transaction.status,
            created_at: transaction.created_at.to_string(),
            updated_at: transaction.updated_at.to_string(),
        }
    }
}

/// Transactions Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TransactionsResponse {
    /// The caller's transactions, newest first
    pub transactions: Vec<TransactionResponse>,
}
