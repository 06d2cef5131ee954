//! Persistence for the spending history.
//!
//! The history is always handled as a whole: every operation returns the full,
//! date-sorted list of transactions after it has been applied.

mod json_file;
mod memory;

pub use json_file::{JsonFileStore, init_store_file};
pub use memory::MemoryStore;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    transaction::{Transaction, TransactionId},
};

/// Handles storing and retrieving transactions.
///
/// Implementations must keep the history sorted by date, oldest first, after
/// every write.
pub trait SpendingStore: Send + Sync {
    /// Get every transaction sorted by date.
    ///
    /// # Errors
    /// Returns [Error::Storage] if the history cannot be read.
    fn list(&self) -> Result<Vec<Transaction>, Error>;

    /// Add `transaction` to the history and return the updated history.
    ///
    /// # Errors
    /// Returns [Error::Storage] if the history cannot be read or written.
    fn append(&self, transaction: Transaction) -> Result<Vec<Transaction>, Error>;

    /// Remove the transaction with `id` and return the updated history.
    ///
    /// Removing an ID that does not exist is not an error, the history is
    /// returned unchanged.
    ///
    /// # Errors
    /// Returns [Error::Storage] if the history cannot be read or written.
    fn remove(&self, id: TransactionId) -> Result<Vec<Transaction>, Error>;
}

/// Run `operation` against `store` on tokio's blocking thread pool.
///
/// Store calls do file I/O and wait on a lock, so route handlers go through
/// this instead of calling the store on a runtime worker thread.
///
/// # Errors
/// Returns the error from `operation`, or [Error::Storage] if the blocking
/// task panicked or was cancelled.
pub(crate) async fn run_blocking<T, F>(
    store: Arc<dyn SpendingStore>,
    operation: F,
) -> Result<T, Error>
where
    T: Send + 'static,
    F: FnOnce(&dyn SpendingStore) -> Result<T, Error> + Send + 'static,
{
    tokio::task::spawn_blocking(move || operation(store.as_ref()))
        .await
        .map_err(|error| Error::Storage(format!("store task failed: {error}")))?
}

/// The document stored on disk.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SpendingDocument {
    history: Vec<Transaction>,
}
