//! An in-memory [SpendingStore], used in tests in place of the JSON file.

use std::sync::Mutex;

use crate::{
    Error,
    store::SpendingStore,
    transaction::{Transaction, TransactionId, sort_by_date},
};

/// Keeps the spending history in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    history: Mutex<Vec<Transaction>>,
}

impl MemoryStore {
    /// Create a store that starts with `history`.
    pub fn with_history(mut history: Vec<Transaction>) -> Self {
        sort_by_date(&mut history);

        Self {
            history: Mutex::new(history),
        }
    }

    fn modify(
        &self,
        change: impl FnOnce(&mut Vec<Transaction>),
    ) -> Result<Vec<Transaction>, Error> {
        let mut history = self
            .history
            .lock()
            .map_err(|error| Error::Storage(format!("could not acquire store lock: {error}")))?;

        change(&mut history);
        sort_by_date(&mut history);

        Ok(history.clone())
    }
}

impl SpendingStore for MemoryStore {
    fn list(&self) -> Result<Vec<Transaction>, Error> {
        self.modify(|_| {})
    }

    fn append(&self, transaction: Transaction) -> Result<Vec<Transaction>, Error> {
        self.modify(|history| history.push(transaction))
    }

    fn remove(&self, id: TransactionId) -> Result<Vec<Transaction>, Error> {
        self.modify(|history| {
            if let Some(index) = history.iter().position(|transaction| transaction.id == id) {
                history.remove(index);
            }
        })
    }
}
