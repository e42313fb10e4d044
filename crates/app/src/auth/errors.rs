//! Auth service errors.

use thiserror::Error;

use crate::auth::ApiTokenError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// No active token matches the presented bearer token.
    #[error("api token not found or revoked")]
    NotFound,

    /// Tokens can only be issued to existing users.
    #[error("user does not exist")]
    UnknownUser,

    #[error("malformed api token")]
    Token(#[from] ApiTokenError),

    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}

impl From<sqlx::Error> for AuthServiceError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => Self::UnknownUser,
            other => Self::Sql(other),
        }
    }
}
