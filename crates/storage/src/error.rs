/// All errors that can be returned by a storage backend or export.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem-level failure (read, write, create).
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored or exported data could not be serialized.
    #[error("could not serialize stored data: {0}")]
    Serialize(#[from] serde_json::Error),

    /// CSV export failure.
    #[error("could not build csv export: {0}")]
    Csv(#[from] csv::Error),

    /// A backend-specific error (simulated failures, poisoned locks).
    #[error("storage backend error: {0}")]
    Backend(String),
}
