//! Export error types.
//!
//! Three families, with different propagation rules: input errors (bad
//! format tag, missing page) reject the request up front; resource errors
//! (unreachable or undecodable image) are absorbed per element where the
//! exporter has skip semantics, fatal otherwise; serialization errors
//! (font loading, final encoding, archive assembly) always abort the
//! export. An aborted export never returns partial bytes.

use thiserror::Error;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that can occur during an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The requested format tag is not one of the supported formats.
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    /// A requested page does not exist in the document.
    #[error("Page not found: {0}")]
    MissingPage(usize),

    /// The exporter had no content to render (content-driven exporters
    /// given a document with neither content metadata nor text).
    #[error("No usable content for export: {0}")]
    NoContent(String),

    /// An external resource could not be fetched or decoded.
    #[error("Failed to load resource: {0}")]
    Resource(String),

    /// A required font could not be loaded.
    #[error("Font loading failed: {0}")]
    Font(String),

    /// The underlying format library failed to produce final bytes.
    #[error("{format} encoding failed: {message}")]
    Encode {
        /// The format that failed to serialize.
        format: &'static str,
        /// The underlying failure.
        message: String,
    },

    /// Archive assembly failed.
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// An I/O error occurred while assembling output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Shorthand for an [`ExportError::Encode`] value.
    #[must_use]
    pub fn encode(format: &'static str, message: impl std::fmt::Display) -> Self {
        Self::Encode {
            format,
            message: message.to_string(),
        }
    }
}
