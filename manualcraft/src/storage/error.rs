//! Error types for the persistence layer

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing persisted collections
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing a backing file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A collection could not be encoded as JSON
    #[error("failed to serialize '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The store refuses writes
    #[error("store is read-only, cannot write '{key}'")]
    ReadOnly { key: String },
}
