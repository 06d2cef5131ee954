//! Defines the endpoint for listing transactions and the response shared by
//! endpoints that change them.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, State},
};
use serde::Serialize;

use crate::{
    AppState, Error,
    store::{SpendingStore, run_blocking},
    transaction::Transaction,
};

/// The state needed by endpoints that only touch the store.
#[derive(Clone)]
pub struct StoreState {
    /// Where transactions are kept.
    pub store: Arc<dyn SpendingStore>,
}

impl FromRef<AppState> for StoreState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// The body sent after a transaction was created or deleted.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// Always `true`, failures are sent as an error body instead.
    pub success: bool,
    /// The full history after the change, sorted by date.
    pub history: Vec<Transaction>,
}

impl HistoryResponse {
    pub(crate) fn new(history: Vec<Transaction>) -> Self {
        Self {
            success: true,
            history,
        }
    }
}

/// A route handler that returns every transaction sorted by date.
pub async fn list_transactions_endpoint(
    State(state): State<StoreState>,
) -> Result<Json<Vec<Transaction>>, Error> {
    run_blocking(state.store, |store| store.list())
        .await
        .map(Json)
}
