//! Storage error types.

use thiserror::Error;

/// Errors that can occur while reading or writing a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        /// The key being accessed.
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A collection could not be serialized.
    #[error("serialization error for key {key}: {source}")]
    Serialize {
        /// The key being written.
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The key contains characters the backend cannot store.
    #[error("invalid storage key: {0:?} (allowed: letters, digits, '_' and '-')")]
    InvalidKey(String),

    /// A previous holder of the backend lock panicked.
    #[error("storage lock poisoned")]
    Poisoned,
}
