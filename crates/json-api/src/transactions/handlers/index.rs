//! Transaction Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    transactions::{
        errors::into_status_error,
        responses::{TransactionResponse, TransactionsResponse},
    },
};

/// Transaction Index Handler
///
/// Returns the caller's transactions.
#[endpoint(
    tags("transactions"),
    summary = "List Transactions",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Transactions", body = TransactionsResponse),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<TransactionsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;

    let transactions = state
        .app
        .transactions
        .list_transactions(user.id)
        .await
        .map_err(into_status_error)?;

    Ok(Json(TransactionsResponse {
        transactions: transactions
            .into_iter()
            .map(TransactionResponse::from)
            .collect(),
    }))
}
