//! Defines the endpoint that forwards spending history for a forecast.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::Value;

use crate::{Error, forecast::ForecastClient, transaction::AmountInput};

/// The request body for a forecast.
#[derive(Debug, Deserialize)]
pub struct ForecastBody {
    /// Spending amounts, oldest first.
    history: Option<Vec<HistoryEntry>>,
}

/// One point of history: either a bare amount or a transaction record.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HistoryEntry {
    Amount(AmountInput),
    Record { amount: Option<AmountInput> },
}

impl HistoryEntry {
    fn to_f64(&self, index: usize) -> Result<f64, Error> {
        match self {
            HistoryEntry::Amount(amount) | HistoryEntry::Record { amount: Some(amount) } => {
                amount.to_f64()
            }
            HistoryEntry::Record { amount: None } => Err(Error::Validation(format!(
                "history entry {index} has no amount"
            ))),
        }
    }
}

/// Reduce the history to the bare amounts the forecasting service expects.
fn normalize_history(entries: &[HistoryEntry]) -> Result<Vec<f64>, Error> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| entry.to_f64(index))
        .collect()
}

/// A route handler that forwards history to the forecasting service and
/// relays its answer unchanged.
pub async fn forecast_endpoint(
    State(client): State<ForecastClient>,
    body: Result<Json<ForecastBody>, JsonRejection>,
) -> Result<Json<Value>, Error> {
    let Json(body) = body?;
    let entries = body
        .history
        .ok_or_else(|| Error::Validation("history is required".to_owned()))?;
    let history = normalize_history(&entries)?;

    let forecast = client.forecast(&history).await?;

    Ok(Json(forecast))
}
