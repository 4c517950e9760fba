//! Unit conversions and page-size presets.
//!
//! Canvas coordinates are pixels with the origin at the top-left and y
//! increasing downward. At the A4 preset one canvas pixel equals one PDF
//! point, so the vector exporter converts positions 1:1; the slide-deck
//! exporter instead uses the fixed `px / 100` embedding convention.

use serde::{Deserialize, Serialize};

/// Divisor of the slide-embedding convention: canvas pixels are projected
/// into a slide's inch-based layout as `px / 100`. This is a layout
/// convention shared with the editing surface, not a DPI conversion.
pub const PX_PER_SLIDE_INCH: f32 = 100.0;

/// Project a pixel coordinate into slide inches.
#[must_use]
pub fn px_to_inches(px: f32) -> f32 {
    px / PX_PER_SLIDE_INCH
}

/// Canvas page dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    /// Page width in pixels.
    pub width: f32,
    /// Page height in pixels.
    pub height: f32,
}

impl PageSize {
    /// ISO A4 at the canvas pixel density (one pixel per PDF point).
    pub const A4: Self = Self {
        width: 595.0,
        height: 842.0,
    };

    /// US Letter at the canvas pixel density.
    pub const LETTER: Self = Self {
        width: 612.0,
        height: 792.0,
    };

    /// A custom page size in pixels.
    #[must_use]
    pub const fn custom(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}
