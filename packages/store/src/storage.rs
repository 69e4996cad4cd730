//! Durable key-value storage behind a [`crate::SessionStore`].
//!
//! Browser local storage is synchronous, so the trait is too. Every session
//! read and write goes through these three calls.

use thiserror::Error;

/// Failure of the underlying persistence layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage is disabled or cannot be reached (private mode, no `window`, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// A write was refused for lack of space.
    #[error("storage quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String-keyed, string-valued persistent store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
