use thiserror::Error;

/// Failure to commit a drag onto the full collection
#[derive(Debug, Error)]
pub enum ReorderError {
    #[error("Index {index} is out of range for {len} rendered items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Item {0} is not part of the collection")]
    UnknownItem(String),

    #[error("Failed to persist order: {0}")]
    Store(#[from] StoreError),
}

/// Failure of the persistence collaborator
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed entries file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Entry {0} does not exist in the store")]
    UnknownEntry(String),

    #[error("Background task failed: {0}")]
    Task(String),
}
