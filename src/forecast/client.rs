//! HTTP client for the external forecasting service.

use serde::Serialize;
use serde_json::Value;

use crate::Error;

/// Sends spending history to the forecasting service.
///
/// The service is expected to answer `POST <url>` with
/// `{"predicted_next_month": number, "status": string, "trend": string}`, but
/// the response is passed on without being interpreted.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: reqwest::Client,
    url: String,
}

#[derive(Debug, Serialize)]
struct ForecastRequest<'a> {
    history: &'a [f64],
}

impl ForecastClient {
    /// Create a client that posts to `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// The URL of the forecasting service.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request a forecast for `history` and return the service's JSON response.
    ///
    /// # Errors
    /// Returns [Error::Upstream] if the service cannot be reached, answers
    /// with a non-success status, or does not answer with JSON.
    pub async fn forecast(&self, history: &[f64]) -> Result<Value, Error> {
        tracing::info!(
            "Forwarding {} data points to forecasting service at {}",
            history.len(),
            self.url
        );

        let response = self
            .client
            .post(&self.url)
            .json(&ForecastRequest { history })
            .send()
            .await
            .map_err(|error| Error::Upstream(format!("could not reach {}: {error}", self.url)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_owned());
            return Err(Error::Upstream(format!(
                "forecasting service answered with status {status}: {body}"
            )));
        }

        let forecast: Value = response.json().await.map_err(|error| {
            Error::Upstream(format!("could not parse forecasting service response: {error}"))
        })?;

        tracing::info!("Received forecast from forecasting service");

        Ok(forecast)
    }
}
