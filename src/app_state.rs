//! Implements a struct that holds the state of the REST server.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    GatewayConfig,
    forecast::ForecastClient,
    store::{JsonFileStore, SpendingStore},
    transaction::IdGenerator,
};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// Where transactions are kept.
    pub store: Arc<dyn SpendingStore>,

    /// Hands out IDs for new transactions.
    pub id_generator: Arc<IdGenerator>,

    /// The client for the external forecasting service.
    pub forecast_client: ForecastClient,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] that keeps transactions in the JSON file named by `config`.
    pub fn new(config: &GatewayConfig) -> Self {
        Self::with_store(config, Arc::new(JsonFileStore::new(&config.store_path)))
    }

    /// Create a new [AppState] around an existing `store`.
    ///
    /// New IDs start after the largest ID already in `store`. If the store
    /// cannot be read yet, IDs start from the current time.
    pub fn with_store(config: &GatewayConfig, store: Arc<dyn SpendingStore>) -> Self {
        let largest_id = match store.list() {
            Ok(history) => history.iter().map(|transaction| transaction.id).max(),
            Err(error) => {
                tracing::warn!("Could not read spending store at startup: {error}");
                None
            }
        };

        Self {
            store,
            id_generator: Arc::new(IdGenerator::starting_after(largest_id.unwrap_or_default())),
            forecast_client: ForecastClient::new(config.forecast_url.clone()),
            local_timezone: config.local_timezone.clone(),
        }
    }
}

impl FromRef<AppState> for ForecastClient {
    fn from_ref(state: &AppState) -> Self {
        state.forecast_client.clone()
    }
}
