//! Error types for document-model operations.

use thiserror::Error;

/// Result type for document-model operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while building or mutating a document.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An element with the same identifier already exists in the document.
    #[error("Duplicate element id: {0}")]
    DuplicateElement(String),

    /// The requested element does not exist anywhere in the document.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// The requested page index does not exist.
    #[error("Page not found: {0}")]
    PageNotFound(usize),

    /// Document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
