//! Parsing of monetary amounts sent by clients.

use serde::Deserialize;

use crate::Error;

/// An amount as sent by a client, either a JSON number or a numeric string
/// such as `"12.50"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    /// Convert to a finite number.
    ///
    /// # Errors
    /// Returns [Error::Validation] if the input is not a finite number.
    pub(crate) fn to_f64(&self) -> Result<f64, Error> {
        let amount = match self {
            AmountInput::Number(number) => *number,
            AmountInput::Text(text) => text.trim().parse::<f64>().map_err(|_| {
                Error::Validation(format!("amount \"{text}\" is not a number"))
            })?,
        };

        if amount.is_finite() {
            Ok(amount)
        } else {
            Err(Error::Validation(format!("amount {amount} is not a finite number")))
        }
    }
}
