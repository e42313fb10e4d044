//! Products service errors.

use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product not found")]
    NotFound,

    #[error("a product with this slug already exists")]
    AlreadyExists,

    /// Slugs appear in cart URLs, so only `[a-z0-9-]` is accepted.
    #[error("invalid product slug {0:?}")]
    InvalidSlug(String),

    #[error("product name cannot be empty")]
    MissingName,

    #[error("price {0} does not fit in storage")]
    PriceOutOfRange(u64),

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}

impl From<sqlx::Error> for ProductsServiceError {
    fn from(error: sqlx::Error) -> Self {
        let kind = error.as_database_error().map(|db| db.kind());

        match (error, kind) {
            (sqlx::Error::RowNotFound, _) => Self::NotFound,
            (_, Some(ErrorKind::UniqueViolation)) => Self::AlreadyExists,
            (_, Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation)) => {
                Self::InvalidData
            }
            (error, _) => Self::Sql(error),
        }
    }
}
