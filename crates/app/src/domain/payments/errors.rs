//! Payments service errors.

use thiserror::Error;

use crate::domain::{
    carts::CartsServiceError, payments::gateway::GatewayError,
    transactions::TransactionsServiceError,
};

#[derive(Debug, Error)]
pub enum PaymentsServiceError {
    #[error("no active cart")]
    NoActiveCart,

    #[error("cart is empty")]
    EmptyCart,

    #[error("cart changed while the charge was in flight")]
    CartChanged,

    #[error("transaction not found")]
    NotFound,

    #[error("not permitted to access this transaction")]
    PermissionDenied,

    #[error("notification signature is invalid")]
    InvalidSignature,

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("cart error")]
    Cart(#[source] CartsServiceError),

    #[error("ledger error")]
    Ledger(#[source] TransactionsServiceError),

    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}

impl From<sqlx::Error> for PaymentsServiceError {
    fn from(error: sqlx::Error) -> Self {
        Self::Sql(error)
    }
}

impl From<CartsServiceError> for PaymentsServiceError {
    fn from(error: CartsServiceError) -> Self {
        match error {
            CartsServiceError::NoActiveCart => Self::NoActiveCart,
            CartsServiceError::EmptyCart => Self::EmptyCart,
            CartsServiceError::Sql(error) => Self::Sql(error),
            other => Self::Cart(other),
        }
    }
}

impl From<TransactionsServiceError> for PaymentsServiceError {
    fn from(error: TransactionsServiceError) -> Self {
        match error {
            TransactionsServiceError::NotFound => Self::NotFound,
            TransactionsServiceError::Sql(error) => Self::Sql(error),
            other => Self::Ledger(other),
        }
    }
}
