//! Error types for the object store access layer

use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors reported by the declarative object store
///
/// `AlreadyExists` and `Conflict` are concurrency signals, not faults: a
/// concurrent writer won the race, and the caller resolves them by
/// re-reading current state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Create collided with an existing record of the same name
    #[error("Record already exists: {0}")]
    AlreadyExists(String),

    /// No record with the given name
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Conditional patch lost a compare-and-set race
    #[error("Conflicting update: {0}")]
    Conflict(String),

    /// The watch subscription ended and must be re-issued
    #[error("Watch subscription closed")]
    WatchClosed,
}

impl StoreError {
    /// Check if this error is an "already exists" collision
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists(_))
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this error is a compare-and-set conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}
