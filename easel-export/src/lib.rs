//! # Easel Export
//!
//! Multi-format export engine for Easel documents. One in-memory
//! [`Document`] projects into four structurally incompatible targets:
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                Export Dispatcher                │
//! ├───────────┬───────────┬───────────┬─────────────┤
//! │ pdf       │ raster    │ slides    │ flow        │
//! │ (vector   │ (PNG /    │ (OOXML    │ (styled     │
//! │  document)│  ZIP)     │  deck)    │  markup)    │
//! └───────────┴───────────┴───────────┴─────────────┘
//! ```
//!
//! Every exporter takes `&Document` and returns bytes; none of them
//! mutates the model. Callers exporting a live, continuously edited
//! document pass a cloned snapshot. Image fetching is the only operation
//! that suspends; all geometry, wrapping, and coordinate math is
//! synchronous CPU work. An export either returns complete bytes or an
//! error - never a truncated buffer.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod flow;
pub mod markup;
pub mod order;
pub mod pdf;
pub mod raster;
pub mod resource;
pub mod slides;
pub mod surface;

pub use error::{ExportError, ExportResult};
pub use raster::{RasterOutput, DEFAULT_PIXEL_DENSITY};

use easel_core::{Document, DocumentContent, PageSize};
use serde::{Deserialize, Serialize};

/// The export formats the dispatcher routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Paginated vector document (PDF).
    Pdf,
    /// Raster snapshot: PNG for one page, ZIP of PNGs for several.
    Raster,
    /// Slide deck (OOXML presentation).
    Slides,
    /// Flow-text document (styled markup under a word-processor type).
    FlowText,
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    /// Parse the format tags the editing surface sends.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.to_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "png" | "raster" => Ok(Self::Raster),
            "pptx" | "slides" => Ok(Self::Slides),
            "docx" | "doc" | "flow" => Ok(Self::FlowText),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Self::Pdf => "pdf",
            Self::Raster => "png",
            Self::Slides => "pptx",
            Self::FlowText => "docx",
        };
        write!(f, "{tag}")
    }
}

/// Options for one export call.
///
/// This is the options record the editing surface sends alongside an
/// export request; missing fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Output filename stem (extension appended per format).
    pub filename: String,
    /// Page-size override; `None` uses the document's own.
    pub page_size: Option<PageSize>,
    /// Pixel-density multiplier for raster snapshots.
    pub pixel_density: f32,
    /// Pages to export, in the requested order; `None` exports all pages.
    pub pages: Option<Vec<usize>>,
    /// Content-metadata override for the content-driven exporters;
    /// `None` uses the document's own.
    pub content: Option<DocumentContent>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            filename: "document".to_string(),
            page_size: None,
            pixel_density: DEFAULT_PIXEL_DENSITY,
            pages: None,
            content: None,
        }
    }
}

/// The bytes of one finished export, with the metadata a caller needs to
/// save or download them.
#[derive(Debug, Clone)]
pub struct ExportedFile {
    /// The complete output bytes.
    pub bytes: Vec<u8>,
    /// MIME type of the bytes.
    pub mime: &'static str,
    /// Suggested filename including extension.
    pub filename: String,
}

/// Route an export request to the exporter for `format`.
///
/// # Errors
///
/// Propagates the selected exporter's errors; see [`ExportError`] for the
/// taxonomy. No partial output is ever returned.
pub async fn export(
    document: &Document,
    format: ExportFormat,
    options: &ExportOptions,
) -> ExportResult<ExportedFile> {
    // Honor a page-size override without touching the caller's document.
    let resized;
    let document = match options.page_size {
        Some(size) if size != document.page_size => {
            let mut copy = document.clone();
            copy.page_size = size;
            resized = copy;
            &resized
        }
        _ => document,
    };

    let pages = options
        .pages
        .clone()
        .unwrap_or_else(|| (0..document.page_count()).collect());
    let content = options.content.as_ref().or(document.content.as_ref());

    tracing::debug!(%format, pages = pages.len(), "Dispatching export");

    match format {
        ExportFormat::Pdf => {
            let bytes = pdf::export_pdf(document, &pages).await?;
            Ok(file(bytes, "application/pdf", &options.filename, "pdf"))
        }
        ExportFormat::Raster => {
            let output = raster::export_raster(document, &pages, options.pixel_density).await?;
            Ok(match output {
                RasterOutput::Png(bytes) => file(bytes, "image/png", &options.filename, "png"),
                RasterOutput::Archive(bytes) => {
                    file(bytes, "application/zip", &options.filename, "zip")
                }
            })
        }
        ExportFormat::Slides => {
            let bytes = slides::export_slides(document, content)?;
            Ok(file(
                bytes,
                "application/vnd.openxmlformats-officedocument.presentationml.presentation",
                &options.filename,
                "pptx",
            ))
        }
        ExportFormat::FlowText => {
            let bytes = flow::export_flow_text(document, content)?;
            Ok(file(
                bytes,
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                &options.filename,
                "doc",
            ))
        }
    }
}

fn file(bytes: Vec<u8>, mime: &'static str, stem: &str, extension: &str) -> ExportedFile {
    ExportedFile {
        bytes,
        mime,
        filename: format!("{stem}.{extension}"),
    }
}

/// Easel export version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
