use thiserror::Error;

/// Failures of a [`KeyValueStore`](super::KeyValueStore) backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored value could not be encoded: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Storage lock poisoned")]
    Poisoned,
}
