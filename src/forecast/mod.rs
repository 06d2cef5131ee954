//! Forwarding of spending history to the external forecasting service.

mod client;
mod endpoint;

pub use client::ForecastClient;
pub use endpoint::forecast_endpoint;
