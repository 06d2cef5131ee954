//! Defines the endpoint for deleting a transaction.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

use crate::{
    Error,
    store::run_blocking,
    transaction::{HistoryResponse, StoreState, TransactionId},
};

/// A route handler for deleting a transaction, responds with the updated history.
///
/// Deleting an ID that does not exist succeeds and returns the unchanged history.
pub async fn delete_transaction_endpoint(
    State(state): State<StoreState>,
    transaction_id: Result<Path<TransactionId>, PathRejection>,
) -> Result<Json<HistoryResponse>, Error> {
    let Path(transaction_id) = transaction_id
        .map_err(|rejection| Error::Validation(format!("invalid transaction ID: {rejection}")))?;

    tracing::debug!("Deleting transaction {transaction_id}");
    let history = run_blocking(state.store, move |store| store.remove(transaction_id)).await?;

    Ok(Json(HistoryResponse::new(history)))
}
