//! A [SpendingStore] backed by a single JSON file.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::{
    Error,
    store::{SpendingDocument, SpendingStore},
    transaction::{Transaction, TransactionId, sort_by_date},
};

/// Stores the spending history as `{"history": [...]}` in a JSON file.
///
/// Each write loads the whole file, changes it and saves it again. The
/// load-modify-save cycle holds a lock, so requests served by the same
/// process cannot overwrite each other's changes. Other processes editing the
/// file at the same time are not guarded against.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store for the file at `path`.
    ///
    /// The file is not touched until the first operation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// The path of the JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn modify(
        &self,
        change: impl FnOnce(&mut Vec<Transaction>),
    ) -> Result<Vec<Transaction>, Error> {
        let _guard = self
            .lock
            .lock()
            .map_err(|error| Error::Storage(format!("could not acquire store lock: {error}")))?;

        let mut history = load(&self.path)?;
        change(&mut history);
        sort_by_date(&mut history);
        save(&self.path, &history)?;

        Ok(history)
    }
}

impl SpendingStore for JsonFileStore {
    fn list(&self) -> Result<Vec<Transaction>, Error> {
        let _guard = self
            .lock
            .lock()
            .map_err(|error| Error::Storage(format!("could not acquire store lock: {error}")))?;

        // Re-sort in case the file was edited by hand.
        let mut history = load(&self.path)?;
        sort_by_date(&mut history);

        Ok(history)
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

/// Create an empty store at `path` unless a file already exists there.
///
/// Returns `true` if a new file was created.
///
/// # Errors
/// Returns [Error::Storage] if the file or its parent directories cannot be created.
pub fn init_store_file(path: &Path) -> Result<bool, Error> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|error| {
            Error::Storage(format!("could not create {}: {error}", parent.display()))
        })?;
    }

    save(path, &[])?;
    tracing::info!("Created empty spending store at {}", path.display());

    Ok(true)
}

fn load(path: &Path) -> Result<Vec<Transaction>, Error> {
    let text = fs::read_to_string(path).map_err(|error| match error.kind() {
        ErrorKind::NotFound => Error::Storage(format!("{} does not exist", path.display())),
        _ => Error::Storage(format!("could not read {}: {error}", path.display())),
    })?;

    let document: SpendingDocument = serde_json::from_str(&text)
        .map_err(|error| Error::Storage(format!("could not parse {}: {error}", path.display())))?;

    let missing_amounts = document
        .history
        .iter()
        .filter(|transaction| !transaction.amount.is_finite())
        .count();
    if missing_amounts > 0 {
        tracing::warn!(
            "{} has {missing_amounts} transaction(s) without a numeric amount",
            path.display()
        );
    }

    Ok(document.history)
}

/// Write the history to a sibling temp file, then rename it over `path`.
///
/// A failed write leaves the previous version of the file in place.
fn save(path: &Path, history: &[Transaction]) -> Result<(), Error> {
    let document = SpendingDocumentRef { history };
    let text = serde_json::to_string_pretty(&document)
        .map_err(|error| Error::Storage(format!("could not serialize history: {error}")))?;

    let temp_path = temp_path_for(path);
    fs::write(&temp_path, text).map_err(|error| {
        Error::Storage(format!("could not write {}: {error}", temp_path.display()))
    })?;

    fs::rename(&temp_path, path).map_err(|error| {
        let _ = fs::remove_file(&temp_path);
        Error::Storage(format!("could not replace {}: {error}", path.display()))
    })
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "spending.json".into());
    file_name.push(".tmp");

    path.with_file_name(file_name)
}

/// Borrowed form of [SpendingDocument] so saving does not clone the history.
#[derive(serde::Serialize)]
struct SpendingDocumentRef<'a> {
    history: &'a [Transaction],
}
