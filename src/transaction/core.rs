//! Defines the core data model for transactions.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// The integer type used for transaction IDs.
///
/// IDs are derived from the creation time in milliseconds, see
/// [crate::IdGenerator].
pub type TransactionId = i64;

/// The format used for transaction dates on the wire and on disk, e.g. `2024-01-31`.
const DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month repr:numerical padding:zero]-[day padding:zero]");

time::serde::format_description!(
    iso_date,
    Date,
    "[year]-[month repr:numerical padding:zero]-[day padding:zero]"
);

/// A single spending event.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent.
    ///
    /// Records written by older versions of the gateway may hold `null` here,
    /// which is read as NaN and written back as `null`.
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    /// When the transaction happened.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// The spending category, e.g. "Rent".
    pub category: Category,
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(amount: f64, date: Date) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            date,
            category: Category::default(),
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The category defaults to [Category::DEFAULT]. Call [TransactionBuilder::finalize]
/// with an ID to get the actual [Transaction].
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The amount of money spent, never negative.
    pub amount: f64,
    /// The date when the money was spent.
    pub date: Date,
    /// The category of the transaction.
    pub category: Category,
}

impl TransactionBuilder {
    /// Set the category for the transaction.
    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Attach `id` and produce the transaction.
    pub fn finalize(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            date: self.date,
            category: self.category,
        }
    }
}

/// The label of a spending category.
///
/// Any non-empty label is accepted. The labels in [Category::KNOWN] are the
/// ones the dashboard has a dedicated style for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// The category given to transactions created without one.
    pub const DEFAULT: &str = "Other";

    /// The labels the dashboard knows about.
    pub const KNOWN: [&str; 8] = [
        "Food",
        "Rent",
        "Transport",
        "Utilities",
        "Entertainment",
        "Shopping",
        "Health",
        Self::DEFAULT,
    ];

    /// Create a category from user input.
    ///
    /// Missing or blank input yields [Category::DEFAULT], anything else is
    /// kept with surrounding whitespace removed.
    pub fn from_input(input: Option<&str>) -> Self {
        match input.map(str::trim) {
            Some(label) if !label.is_empty() => Self(label.to_owned()),
            _ => Self::default(),
        }
    }

    /// Whether the label is one of [Category::KNOWN].
    pub fn is_known(&self) -> bool {
        Self::KNOWN.contains(&self.0.as_str())
    }
}

impl Default for Category {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a `YYYY-MM-DD` date from user input.
///
/// # Errors
/// Returns [Error::Validation] if `text` is not a valid calendar date.
pub(crate) fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text.trim(), DATE_FORMAT)
        .map_err(|error| Error::Validation(format!("invalid date \"{text}\": {error}")))
}

/// Sort `transactions` by date, oldest first.
///
/// The sort is stable, so transactions on the same day keep their order.
pub(crate) fn sort_by_date(transactions: &mut [Transaction]) {
    transactions.sort_by_key(|transaction| transaction.date);
}

// ============================================================================
// TESTS
// ============================================================================
