//! Transactions Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    transactions::{
        data::NewTransaction,
        records::{TransactionId, TransactionRecord},
    },
    users::records::UserId,
};

const INSERT_TRANSACTION_SQL: &str = include_str!("sql/insert_transaction.sql");
const GET_TRANSACTION_SQL: &str = include_str!("sql/get_transaction.sql");
const UPDATE_TRANSACTION_STATUS_SQL: &str = include_str!("sql/update_transaction_status.sql");
const LIST_TRANSACTIONS_SQL: &str = include_str!("sql/list_transactions.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTransactionsRepository;

impl PgTransactionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert unless the order id is already recorded, then return the stored row.
    pub(crate) async fn get_or_create(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        transaction: &NewTransaction,
    ) -> Result<TransactionRecord, sqlx::Error> {
        query(INSERT_TRANSACTION_SQL)
            .bind(transaction.user_id.into_i64())
            .bind(transaction.cart_id.into_i64())
            .bind(&transaction.order_id)
            .bind(&transaction.status)
            .execute(&mut **tx)
            .await?;

        query_as::<Postgres, TransactionRecord>(GET_TRANSACTION_SQL)
            .bind(&transaction.order_id)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_transaction(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: &str,
    ) -> Result<Option<TransactionRecord>, sqlx::Error> {
        query_as::<Postgres, TransactionRecord>(GET_TRANSACTION_SQL)
            .bind(order_id)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: &str,
        status: &str,
    ) -> Result<Option<TransactionRecord>, sqlx::Error> {
        query_as::<Postgres, TransactionRecord>(UPDATE_TRANSACTION_STATUS_SQL)
            .bind(order_id)
            .bind(status)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_transactions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<Vec<TransactionRecord>, sqlx::Error> {
        query_as::<Postgres, TransactionRecord>(LIST_TRANSACTIONS_SQL)
            .bind(user.into_i64())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for TransactionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: TransactionId::from_i64(row.try_get("id")?),
            user_id: UserId::from_i64(row.try_get("user_id")?),
            cart_id: row.try_get::<i64, _>("cart_id")?.into(),
            order_id: row.try_get("order_id")?,
            status: row.try_get("status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
