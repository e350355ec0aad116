//! This module contains the error types for the persistence layer.

use std::path::PathBuf;

use thiserror::Error;

use super::traits::StateKey;

/// Errors that can occur in the persistence layer.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The backing file could not be read, written, renamed or removed.
    #[error("I/O failure on {key} ({path}): {source}")]
    Io {
        /// The state key being accessed.
        key: StateKey,
        /// The file backing the key.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An error occurred during serialization or deserialization.
    #[error("Failed to serialize or deserialize {key}: {source}")]
    Serialization {
        /// The state key being accessed.
        key: StateKey,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}
