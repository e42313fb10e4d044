//! Transactions service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        transactions::{
            data::NewTransaction, errors::TransactionsServiceError, records::TransactionRecord,
            repository::PgTransactionsRepository,
        },
        users::records::UserId,
    },
};

#[derive(Debug, Clone)]
pub struct PgTransactionsService {
    db: Db,
    repository: PgTransactionsRepository,
}

impl PgTransactionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgTransactionsRepository::new(),
        }
    }
}

#[async_trait]
impl TransactionsService for PgTransactionsService {
    async fn get_or_create(
        &self,
        transaction: NewTransaction,
    ) -> Result<TransactionRecord, TransactionsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_or_create(&mut tx, &transaction).await?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(name = "transactions.service.update_status", skip(self), err)]
    async fn update_status(
        &self,
        order_id: &str,
        status: &str,
    ) -> Result<TransactionRecord, TransactionsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .update_status(&mut tx, order_id, status)
            .await?
            .ok_or(TransactionsServiceError::NotFound)?;

        tx.commit().await?;

        info!(order_id, status, "updated transaction status");

        Ok(record)
    }

    async fn get_transaction(
        &self,
        order_id: &str,
    ) -> Result<TransactionRecord, TransactionsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .get_transaction(&mut tx, order_id)
            .await?
            .ok_or(TransactionsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(record)
    }

    async fn list_transactions(
        &self,
        user: UserId,
    ) -> Result<Vec<TransactionRecord>, TransactionsServiceError> {
        let mut tx = self.db.begin().await?;

        let records = self.repository.list_transactions(&mut tx, user).await?;

        tx.commit().await?;

        Ok(records)
    }
}

#[automock]
#[async_trait]
pub trait TransactionsService: Send + Sync {
    /// Record a transaction, or return the existing one with the same order id
    /// unchanged.
    async fn get_or_create(
        &self,
        transaction: NewTransaction,
    ) -> Result<TransactionRecord, TransactionsServiceError>;

    /// Overwrite the status of an existing transaction.
    async fn update_status(
        &self,
        order_id: &str,
        status: &str,
    ) -> Result<TransactionRecord, TransactionsServiceError>;

    /// Retrieve a transaction by order id.
    async fn get_transaction(
        &self,
        order_id: &str,
    ) -> Result<TransactionRecord, TransactionsServiceError>;

    /// The user's transactions, newest first.
    async fn list_transactions(
        &self,
        user: UserId,
    ) -> Result<Vec<TransactionRecord>, TransactionsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::carts::CartsService,
        test::{
            TestContext,
            helpers::{create_product, create_user},
        },
    };

    use super::*;

    async fn new_transaction(ctx: &TestContext, email: &str, order_id: &str) -> NewTransaction {
        let user = create_user(ctx, email, false)
            .await
            .expect("create user");

        create_product(ctx, &format!("tee-{order_id}"), 1000)
            .await
            .expect("create product");

        ctx.carts
            .add_line(user.id, &format!("tee-{order_id}"), "S")
            .await
            .expect("add line");

        let cart = ctx.carts.checkout(user.id).await.expect("checkout");

        NewTransaction {
            user_id: user.id,
            cart_id: cart.id,
            order_id: order_id.to_string(),
            status: "pending".to_string(),
        }
    }

    #[tokio::test]
    async fn get_or_create_is_idempotent_on_order_id() -> TestResult {
        let ctx = TestContext::new().await;
        let transaction = new_transaction(&ctx, "ledger@example.com", "GOPAY-1").await;

        let created = ctx.transactions.get_or_create(transaction.clone()).await?;

        let again = ctx
            .transactions
            .get_or_create(NewTransaction {
                status: "settlement".to_string(),
                ..transaction
            })
            .await?;

        assert_eq!(created, again, "existing transaction must be returned unchanged");
        assert_eq!(again.status, "pending");

        Ok(())
    }

    #[tokio::test]
    async fn update_status_overwrites_status() -> TestResult {
        let ctx = TestContext::new().await;
        let transaction = new_transaction(&ctx, "update@example.com", "GOPAY-2").await;

        ctx.transactions.get_or_create(transaction).await?;

        let updated = ctx.transactions.update_status("GOPAY-2", "success").await?;
        let replayed = ctx.transactions.update_status("GOPAY-2", "success").await?;

        assert_eq!(updated.status, "success");
        assert_eq!(replayed.status, "success");
        assert_eq!(ctx.transactions.get_transaction("GOPAY-2").await?.status, "success");

        Ok(())
    }

    #[tokio::test]
    async fn update_status_unknown_order_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.transactions.update_status("missing", "success").await;

        assert!(
            matches!(result, Err(TransactionsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_transactions_only_returns_owners_transactions() -> TestResult {
        let ctx = TestContext::new().await;
        let mine = new_transaction(&ctx, "mine@example.com", "GOPAY-3").await;
        let theirs = new_transaction(&ctx, "theirs@example.com", "GOPAY-4").await;
        let owner = mine.user_id;

        ctx.transactions.get_or_create(mine).await?;
        ctx.transactions.get_or_create(theirs).await?;

        let listed = ctx.transactions.list_transactions(owner).await?;

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].order_id, "GOPAY-3");

        Ok(())
    }
}
