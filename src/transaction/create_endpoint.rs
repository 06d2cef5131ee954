//! Defines the endpoint for creating a new transaction.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    store::{SpendingStore, run_blocking},
    timezone::local_today,
    transaction::{
        AmountInput, Category, HistoryResponse, IdGenerator, Transaction, parse_date,
    },
};

/// The state needed to create a transaction.
#[derive(Clone)]
pub struct CreateTransactionState {
    /// Where transactions are kept.
    pub store: Arc<dyn SpendingStore>,
    /// Hands out IDs for new transactions.
    pub id_generator: Arc<IdGenerator>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            id_generator: state.id_generator.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The request body for creating a transaction.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTransactionBody {
    amount: Option<AmountInput>,
    date: Option<String>,
    category: Option<String>,
}

/// A route handler for creating a new transaction, responds with the updated history.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    body: Result<Json<CreateTransactionBody>, JsonRejection>,
) -> Result<Json<HistoryResponse>, Error> {
    let Json(body) = body?;

    let amount = body
        .amount
        .ok_or_else(|| Error::Validation("amount is required".to_owned()))?
        .to_f64()?;

    if amount < 0.0 {
        return Err(Error::Validation(format!(
            "amount {amount} is negative, spending amounts must be zero or more"
        )));
    }

    let date = match body.date.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => parse_date(text)?,
        _ => local_today(&state.local_timezone),
    };

    let transaction = Transaction::build(amount, date)
        .category(Category::from_input(body.category.as_deref()))
        .finalize(state.id_generator.next_id()?);

    tracing::debug!("Creating transaction {transaction:?}");

    let history = run_blocking(state.store, move |store| store.append(transaction)).await?;

    Ok(Json(HistoryResponse::new(history)))
}
