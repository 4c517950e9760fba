//! Canvas elements - the drawable building blocks of document pages.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an element.
///
/// Ids are strings of the form `<role>-<uuid>`, where the role prefix names
/// what the element was created as (`text`, `title`, `logo`, ...). The UUID
/// component keeps ids unique even when many elements are created in the
/// same instant; uniqueness never depends on a clock.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Create a new unique id with the given role prefix.
    #[must_use]
    pub fn new(role: &str) -> Self {
        Self(format!("{role}-{}", Uuid::new_v4()))
    }

    /// Wrap an existing identifier string.
    #[must_use]
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id carries the given role prefix.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.0
            .strip_prefix(role)
            .is_some_and(|rest| rest.starts_with('-'))
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Horizontal alignment of a text element within its wrap width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Align to the left edge (default).
    #[default]
    Left,
    /// Center within the wrap width.
    Center,
    /// Align to the right edge of the wrap width.
    Right,
}

/// Text decoration flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDecoration {
    /// No decoration (default).
    #[default]
    None,
    /// Underlined text.
    Underline,
    /// Struck-through text.
    Strike,
}

/// A decoded bitmap cached by the editing surface.
///
/// Exporters never rely on this cache; they always decode from the
/// element's `src` so an export is reproducible from serialized state.
/// The cache is therefore skipped during serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA pixel data (4 bytes per pixel).
    pub rgba: Vec<u8>,
}

/// The drawable content of an element.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    /// A run of text.
    Text {
        /// Text content.
        content: String,
        /// Font family name (loosely matched to a Base-14 face at export).
        font_family: String,
        /// Font size in pixels.
        font_size: f32,
        /// Fill color as a `#rrggbb` string.
        fill: String,
        /// Bold style flag.
        #[serde(default)]
        bold: bool,
        /// Italic style flag.
        #[serde(default)]
        italic: bool,
        /// Horizontal alignment.
        #[serde(default)]
        align: TextAlign,
        /// Underline/strike decoration.
        #[serde(default)]
        decoration: TextDecoration,
        /// Explicit wrap width in pixels; when absent, exporters derive
        /// one from the element position and the page width.
        #[serde(default)]
        wrap_width: Option<f32>,
    },

    /// A filled, stroked rectangle.
    Rect {
        /// Fill color as a `#rrggbb` string.
        fill: String,
        /// Stroke color as a `#rrggbb` string.
        stroke: String,
        /// Stroke width in pixels.
        stroke_width: f32,
    },

    /// A filled, stroked circle. The radius is `width / 2`.
    Circle {
        /// Fill color as a `#rrggbb` string.
        fill: String,
        /// Stroke color as a `#rrggbb` string.
        stroke: String,
        /// Stroke width in pixels.
        stroke_width: f32,
    },

    /// A stroked polyline through at least two points.
    Line {
        /// Flat coordinate list `[x1, y1, x2, y2, ...]`.
        points: Vec<f32>,
        /// Stroke color as a `#rrggbb` string.
        stroke: String,
        /// Stroke width in pixels.
        stroke_width: f32,
    },

    /// A raster image.
    Image {
        /// Source reference: a `data:` URI or an external URL.
        src: String,
        /// Decoded-bitmap cache, populated by the editing surface only.
        #[serde(skip)]
        bitmap: Option<Bitmap>,
    },

    /// An embedded vector-graphics payload produced by the chart
    /// collaborator, treated as an opaque sub-document.
    Chart {
        /// Complete SVG markup.
        svg: String,
    },
}

impl ElementKind {
    /// The role prefix used when generating ids for this kind.
    #[must_use]
    pub fn role(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Rect { .. } => "rect",
            Self::Circle { .. } => "circle",
            Self::Line { .. } => "line",
            Self::Image { .. } => "image",
            Self::Chart { .. } => "chart",
        }
    }
}

/// A drawable element positioned on a page.
///
/// Coordinates are pixels from the page's top-left corner, y increasing
/// downward. `width`/`height` are optional; exporters substitute
/// kind-appropriate defaults where a size is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier (unique across the whole document).
    pub id: ElementId,
    /// Drawable content.
    #[serde(flatten)]
    pub kind: ElementKind,
    /// X position in pixels from the left edge.
    pub x: f32,
    /// Y position in pixels from the top edge.
    pub y: f32,
    /// Width in pixels, if sized.
    #[serde(default)]
    pub width: Option<f32>,
    /// Height in pixels, if sized.
    #[serde(default)]
    pub height: Option<f32>,
    /// Whether the editing surface lets the user move this element.
    /// Irrelevant to export.
    #[serde(default = "default_movable")]
    pub movable: bool,
}

fn default_movable() -> bool {
    true
}

impl Element {
    /// Create a new element of the given kind at the origin, with a fresh
    /// id derived from the kind's role prefix.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(kind.role()),
            kind,
            x: 0.0,
            y: 0.0,
            width: None,
            height: None,
            movable: true,
        }
    }

    /// Create a new element with an explicit id role prefix.
    #[must_use]
    pub fn with_role(role: &str, kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(role),
            ..Self::new(kind)
        }
    }

    /// Set the position.
    #[must_use]
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the size.
    #[must_use]
    pub fn sized(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set only the width.
    #[must_use]
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the user-movable flag.
    #[must_use]
    pub fn with_movable(mut self, movable: bool) -> Self {
        self.movable = movable;
        self
    }

    /// Whether this is a text element (text paints above non-text).
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self.kind, ElementKind::Text { .. })
    }
}

/// A shallow attribute patch applied by `update_element`.
///
/// Every field is optional; `None` leaves the attribute untouched. Fields
/// that do not apply to the target element's kind are ignored, mirroring
/// the shallow-merge semantics of the editing surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementPatch {
    /// New x position.
    #[serde(default)]
    pub x: Option<f32>,
    /// New y position.
    #[serde(default)]
    pub y: Option<f32>,
    /// New width.
    #[serde(default)]
    pub width: Option<f32>,
    /// New height.
    #[serde(default)]
    pub height: Option<f32>,
    /// New user-movable flag.
    #[serde(default)]
    pub movable: Option<bool>,
    /// New text content.
    #[serde(default)]
    pub content: Option<String>,
    /// New font family.
    #[serde(default)]
    pub font_family: Option<String>,
    /// New font size.
    #[serde(default)]
    pub font_size: Option<f32>,
    /// New fill color.
    #[serde(default)]
    pub fill: Option<String>,
    /// New stroke color.
    #[serde(default)]
    pub stroke: Option<String>,
    /// New stroke width.
    #[serde(default)]
    pub stroke_width: Option<f32>,
    /// New bold flag.
    #[serde(default)]
    pub bold: Option<bool>,
    /// New italic flag.
    #[serde(default)]
    pub italic: Option<bool>,
    /// New alignment.
    #[serde(default)]
    pub align: Option<TextAlign>,
    /// New decoration.
    #[serde(default)]
    pub decoration: Option<TextDecoration>,
    /// New wrap width.
    #[serde(default)]
    pub wrap_width: Option<f32>,
    /// New polyline points.
    #[serde(default)]
    pub points: Option<Vec<f32>>,
    /// New image source.
    #[serde(default)]
    pub src: Option<String>,
}

impl ElementPatch {
    /// A patch that only moves an element.
    #[must_use]
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Apply this patch to an element, shallow-merging common and
    /// kind-specific attributes.
    pub fn apply(&self, element: &mut Element) {
        if let Some(x) = self.x {
            element.x = x;
        }
        if let Some(y) = self.y {
            element.y = y;
        }
        if let Some(width) = self.width {
            element.width = Some(width);
        }
        if let Some(height) = self.height {
            element.height = Some(height);
        }
        if let Some(movable) = self.movable {
            element.movable = movable;
        }

        match &mut element.kind {
            ElementKind::Text {
                content,
                font_family,
                font_size,
                fill,
                bold,
                italic,
                align,
                decoration,
                wrap_width,
            } => {
                if let Some(v) = &self.content {
                    content.clone_from(v);
                }
                if let Some(v) = &self.font_family {
                    font_family.clone_from(v);
                }
                if let Some(v) = self.font_size {
                    *font_size = v;
                }
                if let Some(v) = &self.fill {
                    fill.clone_from(v);
                }
                if let Some(v) = self.bold {
                    *bold = v;
                }
                if let Some(v) = self.italic {
                    *italic = v;
                }
                if let Some(v) = self.align {
                    *align = v;
                }
                if let Some(v) = self.decoration {
                    *decoration = v;
                }
                if let Some(v) = self.wrap_width {
                    *wrap_width = Some(v);
                }
            }
            ElementKind::Rect {
                fill,
                stroke,
                stroke_width,
            }
            | ElementKind::Circle {
                fill,
                stroke,
                stroke_width,
            } => {
                if let Some(v) = &self.fill {
                    fill.clone_from(v);
                }
                if let Some(v) = &self.stroke {
                    stroke.clone_from(v);
                }
                if let Some(v) = self.stroke_width {
                    *stroke_width = v;
                }
            }
            ElementKind::Line {
                points,
                stroke,
                stroke_width,
            } => {
                if let Some(v) = &self.points {
                    points.clone_from(v);
                }
                if let Some(v) = &self.stroke {
                    stroke.clone_from(v);
                }
                if let Some(v) = self.stroke_width {
                    *stroke_width = v;
                }
            }
            ElementKind::Image { src, bitmap } => {
                if let Some(v) = &self.src {
                    src.clone_from(v);
                    // The cached decode no longer matches the source.
                    *bitmap = None;
                }
            }
            ElementKind::Chart { .. } => {}
        }
    }
}
