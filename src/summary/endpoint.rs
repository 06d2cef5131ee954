use axum::{Json, extract::State};

use crate::{
    Error,
    store::run_blocking,
    summary::{SpendingSummary, summarize},
    transaction::StoreState,
};

/// A route handler that returns statistics over the stored history.
pub async fn get_summary_endpoint(
    State(state): State<StoreState>,
) -> Result<Json<SpendingSummary>, Error> {
    let history = run_blocking(state.store, |store| store.list()).await?;

    Ok(Json(summarize(&history)))
}
