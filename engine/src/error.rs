//! Error types for the memquery engine.

use crate::CollectionName;
use thiserror::Error;

/// All possible errors from the memquery engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Registry errors
    #[error("collection already exists: {0}")]
    DuplicateCollection(CollectionName),

    #[error("collection not found: {0}")]
    CollectionNotFound(CollectionName),

    // Document errors
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    // Query errors
    #[error("malformed query: {0}")]
    MalformedQuery(String),

    #[error("unsupported operator: {0}")]
    UnsupportedOperator(String),

    // Update errors
    #[error("malformed update: {0}")]
    MalformedUpdate(String),
}

impl Error {
    /// Whether the error was caused by the shape of a query or update
    /// rather than by the state of the store.
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            Error::MalformedQuery(_) | Error::UnsupportedOperator(_) | Error::MalformedUpdate(_)
        )
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
