//! # Easel Core
//!
//! The document model shared by the editing surface and every exporter:
//! page-indexed drawable elements, the structured content object supplied
//! by the generation collaborator, and the pure geometry/text utilities
//! the export engine is built on.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 easel-core                  │
//! ├──────────────────┬──────────────────────────┤
//! │  Document Model  │  Geometry & Text         │
//! │  - Elements      │  - Hex color parsing     │
//! │  - Pages         │  - Unit conversion       │
//! │  - Content/seed  │  - Font metrics + wrap   │
//! └──────────────────┴──────────────────────────┘
//! ```
//!
//! Mutation goes through the document operations only (append element,
//! remove by id, patch by id, append/pop page); exporters consume the
//! model immutably.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod content;
pub mod document;
pub mod element;
pub mod error;
pub mod metrics;
pub mod seed;
pub mod units;
pub mod wrap;

pub use color::Color;
pub use content::{ContactDetails, Cover, DocumentContent, Section};
pub use document::{Document, Page};
pub use element::{
    Bitmap, Element, ElementId, ElementKind, ElementPatch, TextAlign, TextDecoration,
};
pub use error::{CoreError, CoreResult};
pub use metrics::{FontMetrics, FontVariant, LINE_SPACING};
pub use units::{px_to_inches, PageSize};
pub use wrap::wrap_text;

/// Easel core version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
