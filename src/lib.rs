//! SmartSpend is a personal-finance dashboard backend.
//!
//! This library provides a JSON API gateway that records spending
//! transactions in a flat JSON file and forwards spending history to an
//! external forecasting service for a next-month prediction.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::Serialize;
use tokio::signal;

mod app_state;
mod config;
pub mod endpoints;
mod forecast;
mod logging;
mod not_found;
mod routing;
mod store;
mod summary;
mod timezone;
mod transaction;

pub use app_state::AppState;
pub use config::GatewayConfig;
pub use forecast::ForecastClient;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use store::{JsonFileStore, MemoryStore, SpendingStore, init_store_file};
pub use summary::{CategoryTotal, MonthTotal, SpendingSummary, summarize};
pub use timezone::get_local_offset;
pub use transaction::{Category, IdGenerator, Transaction, TransactionBuilder, TransactionId};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
///
/// Every variant is converted into a JSON body of the form
/// `{"error": "...", "kind": "..."}` at the route boundary.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The client sent a request with missing or malformed input.
    ///
    /// The message is shown to the client as-is, so it should say which
    /// field was wrong.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The spending store could not be read, parsed or written.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("storage error: {0}")]
    Storage(String),

    /// The forecasting service was unreachable or answered with an error.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("forecasting service error: {0}")]
    Upstream(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl Error {
    /// The short, machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Validation(_) => "validation",
            Error::Storage(_) => "storage",
            Error::Upstream(_) => "upstream",
            Error::NotFound => "not_found",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::Storage(_) | Error::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> String {
        match self {
            Error::Validation(message) => message.clone(),
            Error::Storage(_) => "Failed to read or write spending data".to_owned(),
            Error::Upstream(_) => "Failed to connect to AI Service".to_owned(),
            Error::NotFound => "Not found".to_owned(),
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

/// The JSON body sent to clients when a request fails.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    kind: &'static str,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::Validation(message) => tracing::warn!("Rejected request: {message}"),
            Error::NotFound => tracing::debug!("{self}"),
            error => tracing::error!("An unexpected error occurred: {error}"),
        }

        let body = ErrorBody {
            error: self.client_message(),
            kind: self.kind(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}
