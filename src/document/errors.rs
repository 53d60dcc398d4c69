//! Document store errors

use thiserror::Error;

use crate::identifier::ObjectId;

/// Result type for document store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures inside the document store.
///
/// A missing document is not an error at this layer; lookups return
/// `Option` and writes report an [`UpdateOutcome`](super::UpdateOutcome).
#[derive(Debug, Error)]
pub enum StoreError {
    /// A writer panicked while holding the collection lock
    #[error("collection lock poisoned")]
    LockPoisoned,

    /// Document is not an object or lacks a valid `_id`
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// A document with the same `_id` already exists
    #[error("duplicate key: {0}")]
    DuplicateKey(ObjectId),

    /// Conversion between typed records and JSON documents failed
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::LockPoisoned => "PROFRATE_STORE_LOCK_POISONED",
            StoreError::MalformedDocument(_) => "PROFRATE_STORE_MALFORMED_DOCUMENT",
            StoreError::DuplicateKey(_) => "PROFRATE_STORE_DUPLICATE_KEY",
            StoreError::Serialization(_) => "PROFRATE_STORE_SERIALIZATION",
        }
    }
}
