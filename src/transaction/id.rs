//! Generates unique transaction IDs.

use std::sync::atomic::{AtomicI64, Ordering};

use time::OffsetDateTime;

use crate::{Error, transaction::TransactionId};

/// Hands out transaction IDs based on the current time in milliseconds.
///
/// Two calls within the same millisecond, or a clock that moves backwards,
/// would produce colliding timestamps, so each ID is at least one greater
/// than the previous one.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    /// Create a generator whose IDs are all greater than `floor`.
    ///
    /// Pass the largest ID already in the store so that new IDs never clash
    /// with existing ones.
    pub fn starting_after(floor: TransactionId) -> Self {
        Self {
            last: AtomicI64::new(floor),
        }
    }

    /// Get the next ID.
    ///
    /// # Errors
    /// Returns [Error::Storage] once the previous ID is [TransactionId::MAX],
    /// e.g. when the store holds a record with that ID.
    pub fn next_id(&self) -> Result<TransactionId, Error> {
        let now = unix_millis();

        self.last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                last.checked_add(1).map(|next| now.max(next))
            })
            .map(|previous| now.max(previous + 1))
            .map_err(|last| Error::Storage(format!("no transaction IDs left after {last}")))
    }
}

fn unix_millis() -> TransactionId {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as TransactionId
}
