//! Transactions and the endpoints for managing them.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - ID generation and amount parsing for new transactions
//! - Route handlers for listing, creating and deleting transactions

mod amount;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod id;
mod list_endpoint;

pub(crate) use amount::AmountInput;
pub use self::core::{Category, Transaction, TransactionBuilder, TransactionId};
pub(crate) use self::core::{parse_date, sort_by_date};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use id::IdGenerator;
pub use list_endpoint::{HistoryResponse, StoreState, list_transactions_endpoint};
