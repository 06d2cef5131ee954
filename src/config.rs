//! Runtime configuration for the gateway.

use std::path::PathBuf;

use crate::{Error, timezone::get_local_offset};

/// The address of the forecasting service used when none is configured.
pub const DEFAULT_FORECAST_URL: &str = "http://127.0.0.1:5001/predict";

/// The settings needed to build an [crate::AppState].
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    /// Path of the JSON file holding the spending history.
    pub store_path: PathBuf,
    /// The URL transaction history is posted to for a forecast.
    pub forecast_url: String,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl GatewayConfig {
    /// Create a config and check that its values are usable.
    ///
    /// # Errors
    /// Returns [Error::Validation] if `local_timezone` is not a canonical
    /// timezone name or `forecast_url` is not an http(s) URL.
    pub fn new(
        store_path: impl Into<PathBuf>,
        forecast_url: &str,
        local_timezone: &str,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::Validation(format!(
                "invalid timezone \"{local_timezone}\", expected a canonical name such as \"Pacific/Auckland\""
            )));
        }

        let scheme_ok = forecast_url.starts_with("http://") || forecast_url.starts_with("https://");
        if !scheme_ok {
            return Err(Error::Validation(format!(
                "invalid forecast URL \"{forecast_url}\", expected an http:// or https:// URL"
            )));
        }

        Ok(Self {
            store_path: store_path.into(),
            forecast_url: forecast_url.to_owned(),
            local_timezone: local_timezone.to_owned(),
        })
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("spending.json"),
            forecast_url: DEFAULT_FORECAST_URL.to_owned(),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, GatewayConfig};

    #[test]
    fn accepts_valid_values() {
        let config =
            GatewayConfig::new("data.json", "http://localhost:5001/predict", "Pacific/Auckland")
                .unwrap();

        assert_eq!(config.store_path.to_str(), Some("data.json"));
        assert_eq!(config.local_timezone, "Pacific/Auckland");
    }

    #[test]
    fn rejects_unknown_timezone() {
        let result = GatewayConfig::new("data.json", "http://localhost:5001/predict", "Nowhere");

        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn rejects_non_http_url() {
        let result = GatewayConfig::new("data.json", "localhost:5001", "Etc/UTC");

        assert!(matches!(result, Err(Error::Validation(_))));
    }
}
