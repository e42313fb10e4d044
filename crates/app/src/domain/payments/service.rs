//! Payments service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::Zoned;
use mockall::automock;
use tracing::{error, info, warn};
use zeroize::Zeroizing;

use crate::{
    database::Db,
    domain::{
        carts::{
            CartsServiceError,
            checkout::{freeze_active_cart, lock_checkout_cart},
            records::CartRecord,
        },
        payments::{
            errors::PaymentsServiceError,
            gateway::{GatewayResponse, PaymentGateway},
            method::PaymentMethod,
            notification::{
                NotificationOutcome, NotificationPayload, reconciled_status, verify_signature,
            },
            request::build_charge_request,
        },
        transactions::{
            data::NewTransaction, records::TransactionRecord, repository::PgTransactionsRepository,
        },
        users::records::UserRecord,
    },
};

/// Result of a successful charge.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeOutcome {
    pub transaction: TransactionRecord,
    pub cart: CartRecord,
    pub gateway: GatewayResponse,
}

#[derive(Clone)]
pub struct PgPaymentsService {
    db: Db,
    gateway: Arc<dyn PaymentGateway>,
    server_key: Zeroizing<String>,
    transactions: PgTransactionsRepository,
}

impl PgPaymentsService {
    #[must_use]
    pub fn new(db: Db, gateway: Arc<dyn PaymentGateway>, server_key: Zeroizing<String>) -> Self {
        Self {
            db,
            gateway,
            server_key,
            transactions: PgTransactionsRepository::new(),
        }
    }

    /// Load a transaction the requester is allowed to see.
    async fn authorized_transaction(
        &self,
        order_id: &str,
        requester: &UserRecord,
    ) -> Result<TransactionRecord, PaymentsServiceError> {
        let mut tx = self.db.begin().await?;

        let transaction = self
            .transactions
            .get_transaction(&mut tx, order_id)
            .await?
            .ok_or(PaymentsServiceError::NotFound)?;

        tx.commit().await?;

        if !requester.can_access(transaction.user_id) {
            return Err(PaymentsServiceError::PermissionDenied);
        }

        Ok(transaction)
    }

    /// Validate and read the user's checkout cart in a short transaction.
    async fn checkout_snapshot(
        &self,
        user: &UserRecord,
    ) -> Result<CartRecord, PaymentsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = lock_checkout_cart(&mut tx, user.id).await?;

        tx.commit().await?;

        Ok(cart)
    }

    /// Cancel a gateway order that will not be recorded locally.
    async fn void_charge(&self, order_id: &str) {
        warn!(order_id, "cart changed during charge, cancelling gateway order");

        if let Err(cancel_error) = self.gateway.cancel(order_id).await {
            error!(
                order_id,
                error = %cancel_error,
                "failed to cancel gateway order for changed cart"
            );
        }
    }

    async fn reconcile(&self, order_id: &str, status: &str) -> Result<(), PaymentsServiceError> {
        let mut tx = self.db.begin().await?;

        self.transactions
            .update_status(&mut tx, order_id, status)
            .await?
            .ok_or(PaymentsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(())
    }
}

impl fmt::Debug for PgPaymentsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgPaymentsService")
            .field("db", &self.db)
            .field("server_key", &"**redacted**")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PaymentsService for PgPaymentsService {
    #[tracing::instrument(
        name = "payments.service.charge",
        skip(self, user),
        fields(user_id = %user.id, method = %method),
        err
    )]
    async fn charge(
        &self,
        user: &UserRecord,
        method: PaymentMethod,
    ) -> Result<ChargeOutcome, PaymentsServiceError> {
        let cart = self.checkout_snapshot(user).await?;
        let request = build_charge_request(user, &cart, method, Zoned::now().date());

        // No transaction is open here; the cart may change during the call.
        let response = self.gateway.charge(&request).await?;

        let mut tx = self.db.begin().await?;

        let current = match lock_checkout_cart(&mut tx, user.id).await {
            Ok(current) => Some(current),
            Err(CartsServiceError::NoActiveCart | CartsServiceError::EmptyCart) => None,
            Err(other) => {
                error!(
                    order_id = %response.order_id,
                    error = %other,
                    "charge accepted by gateway but cart could not be reloaded"
                );

                return Err(other.into());
            }
        };

        if current.as_ref() != Some(&cart) {
            drop(tx);

            self.void_charge(&response.order_id).await;

            return Err(PaymentsServiceError::CartChanged);
        }

        let frozen = freeze_active_cart(&mut tx, &cart).await?;

        let transaction = self
            .transactions
            .get_or_create(
                &mut tx,
                &NewTransaction {
                    user_id: user.id,
                    cart_id: frozen.id,
                    order_id: response.order_id.clone(),
                    status: response.transaction_status.clone(),
                },
            )
            .await?;

        if let Err(commit_error) = tx.commit().await {
            error!(
                order_id = %response.order_id,
                error = %commit_error,
                "charge accepted by gateway but not recorded locally"
            );

            return Err(commit_error.into());
        }

        info!(
            order_id = %transaction.order_id,
            cart_id = %frozen.id,
            status = %transaction.status,
            "recorded charge"
        );

        Ok(ChargeOutcome {
            transaction,
            cart: frozen,
            gateway: response,
        })
    }

    #[tracing::instrument(
        name = "payments.service.query_status",
        skip(self, requester),
        fields(requester_id = %requester.id),
        err
    )]
    async fn query_status(
        &self,
        order_id: &str,
        requester: &UserRecord,
    ) -> Result<GatewayResponse, PaymentsServiceError> {
        self.authorized_transaction(order_id, requester).await?;

        let response = self.gateway.status(order_id).await?;

        self.reconcile(order_id, &response.transaction_status).await?;

        Ok(response)
    }

    #[tracing::instrument(
        name = "payments.service.cancel",
        skip(self, requester),
        fields(requester_id = %requester.id),
        err
    )]
    async fn cancel(
        &self,
        order_id: &str,
        requester: &UserRecord,
    ) -> Result<GatewayResponse, PaymentsServiceError> {
        self.authorized_transaction(order_id, requester).await?;

        let response = self.gateway.cancel(order_id).await?;

        self.reconcile(order_id, &response.transaction_status).await?;

        Ok(response)
    }

    #[tracing::instrument(
        name = "payments.service.handle_notification",
        skip(self, payload),
        fields(
            order_id = %payload.order_id,
            transaction_status = %payload.transaction_status
        ),
        err
    )]
    async fn handle_notification(
        &self,
        payload: NotificationPayload,
    ) -> Result<NotificationOutcome, PaymentsServiceError> {
        if !verify_signature(&payload, &self.server_key) {
            return Err(PaymentsServiceError::InvalidSignature);
        }

        let Some(status) =
            reconciled_status(&payload.transaction_status, payload.fraud_status.as_deref())
        else {
            warn!(
                fraud_status = ?payload.fraud_status,
                "unrecognized notification status"
            );

            return Ok(NotificationOutcome::Unrecognized {
                order_id: payload.order_id,
            });
        };

        let mut tx = self.db.begin().await?;

        let updated = self
            .transactions
            .update_status(&mut tx, &payload.order_id, status)
            .await?;

        tx.commit().await?;

        if updated.is_none() {
            warn!("notification for unknown order");

            return Ok(NotificationOutcome::UnknownOrder {
                order_id: payload.order_id,
            });
        }

        info!(status, "reconciled transaction from notification");

        Ok(NotificationOutcome::Updated {
            order_id: payload.order_id,
            status: status.to_string(),
        })
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Charge the user's active cart. The cart is frozen and the transaction
    /// recorded only when the gateway accepts the charge and the cart did not
    /// change while the gateway was deciding.
    async fn charge(
        &self,
        user: &UserRecord,
        method: PaymentMethod,
    ) -> Result<ChargeOutcome, PaymentsServiceError>;

    /// Gateway status of an order, reconciled into the ledger.
    async fn query_status(
        &self,
        order_id: &str,
        requester: &UserRecord,
    ) -> Result<GatewayResponse, PaymentsServiceError>;

    /// Cancel an order at the gateway, reconciled into the ledger.
    async fn cancel(
        &self,
        order_id: &str,
        requester: &UserRecord,
    ) -> Result<GatewayResponse, PaymentsServiceError>;

    /// Apply a signed gateway notification.
    async fn handle_notification(
        &self,
        payload: NotificationPayload,
    ) -> Result<NotificationOutcome, PaymentsServiceError>;
}
