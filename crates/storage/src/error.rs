use thiserror::Error;

/// Errors that can occur when reading or writing persisted snapshots.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The key cannot be used as a storage location.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// A filesystem error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The snapshot was written with a schema this build does not read.
    #[error("Unsupported snapshot schema: expected {expected}, found {found}")]
    UnsupportedSchema { expected: u32, found: u32 },

    /// The background writer task has stopped accepting writes.
    #[error("Background writer is closed")]
    WriterClosed,

    /// A background writer was requested outside of a tokio runtime.
    #[error("No tokio runtime available for the background writer")]
    NoRuntime,
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
