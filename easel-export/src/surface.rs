//! The per-page renderable surface.
//!
//! Rasterization needs actual pixel compositing, so the raster exporter
//! does not walk the abstract model directly: it renders each page onto
//! this SVG surface and rasterizes the result. The surface is a pure
//! function of one page's element list - every snapshot re-renders from
//! the requested page's own elements, so a multi-page export can never
//! duplicate the previously displayed page.

use std::fmt::Write;

use easel_core::{
    wrap_text, Color, Document, Element, ElementKind, FontMetrics, TextAlign, TextDecoration,
    LINE_SPACING,
};

use crate::error::{ExportError, ExportResult};
use crate::markup::escape_xml;
use crate::order::paint_order;
use crate::resource::{encode_data_uri, resolve_image_source, ImageEncoding};

/// Default rectangle size when an element carries none, in pixels.
const DEFAULT_RECT: (f32, f32) = (100.0, 60.0);

/// Default circle diameter when an element carries no width, in pixels.
const DEFAULT_CIRCLE_DIAMETER: f32 = 60.0;

/// Default image edge length when an element carries no size, in pixels.
const DEFAULT_IMAGE_EDGE: f32 = 200.0;

/// Render one page of a document to an SVG string.
///
/// `scale` multiplies the output pixel dimensions (the viewBox stays in
/// page coordinates), matching the surface's pixel-density multiplier.
///
/// # Errors
///
/// Returns [`ExportError::MissingPage`] if the page does not exist and
/// [`ExportError::Resource`] if a remote image cannot be inlined - the
/// surface has no per-element skip semantics.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub async fn render_page_svg(
    document: &Document,
    page_index: usize,
    scale: f32,
) -> ExportResult<String> {
    if page_index >= document.page_count() {
        return Err(ExportError::MissingPage(page_index));
    }

    let page = document.page(page_index);
    let size = document.page_size;
    let out_w = (size.width * scale).max(1.0) as u32;
    let out_h = (size.height * scale).max(1.0) as u32;

    let mut svg = String::with_capacity(4096);
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{out_w}\" height=\"{out_h}\" viewBox=\"0 0 {} {}\">",
        size.width, size.height,
    );

    // Opaque white page background.
    svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>");

    for element in paint_order(page) {
        render_element_svg(&mut svg, element).await?;
    }

    svg.push_str("</svg>");
    Ok(svg)
}

/// Render a single element onto the surface.
async fn render_element_svg(svg: &mut String, element: &Element) -> ExportResult<()> {
    match &element.kind {
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
            let metrics = FontMetrics::for_family(font_family, *bold, *italic);
            let box_width = (*wrap_width).or(element.width);
            let lines = wrap_text(
                content,
                &metrics,
                *font_size,
                box_width.unwrap_or(f32::INFINITY),
            );
            let fill = Color::from_hex(fill).to_hex();
            let family = escape_xml(font_family);

            // Alignment needs a box to align within; unsized text anchors
            // at its position like left-aligned text.
            let (anchor, anchor_x) = match (align, box_width) {
                (TextAlign::Center, Some(width)) => ("middle", element.x + width / 2.0),
                (TextAlign::Right, Some(width)) => ("end", element.x + width),
                _ => ("start", element.x),
            };
            let decoration_attr = match decoration {
                TextDecoration::None => "",
                TextDecoration::Underline => " text-decoration=\"underline\"",
                TextDecoration::Strike => " text-decoration=\"line-through\"",
            };
            let weight = if *bold { " font-weight=\"bold\"" } else { "" };
            let style = if *italic { " font-style=\"italic\"" } else { "" };

            for (index, line) in lines.iter().enumerate() {
                #[allow(clippy::cast_precision_loss)]
                let baseline = element.y + font_size + (index as f32) * font_size * LINE_SPACING;
                let escaped = escape_xml(line);
                let _ = write!(
                    svg,
                    "<text x=\"{anchor_x}\" y=\"{baseline}\" font-size=\"{font_size}\" \
                     fill=\"{fill}\" font-family=\"{family}, sans-serif\" \
                     text-anchor=\"{anchor}\"{weight}{style}{decoration_attr}>{escaped}</text>",
                );
            }
        }

        ElementKind::Rect {
            fill,
            stroke,
            stroke_width,
        } => {
            let width = element.width.unwrap_or(DEFAULT_RECT.0);
            let height = element.height.unwrap_or(DEFAULT_RECT.1);
            let _ = write!(
                svg,
                "<rect x=\"{}\" y=\"{}\" width=\"{width}\" height=\"{height}\" \
                 fill=\"{}\" stroke=\"{}\" stroke-width=\"{stroke_width}\"/>",
                element.x,
                element.y,
                Color::from_hex(fill).to_hex(),
                Color::from_hex(stroke).to_hex(),
            );
        }

        ElementKind::Circle {
            fill,
            stroke,
            stroke_width,
        } => {
            let radius = element.width.unwrap_or(DEFAULT_CIRCLE_DIAMETER) / 2.0;
            let _ = write!(
                svg,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{radius}\" fill=\"{}\" \
                 stroke=\"{}\" stroke-width=\"{stroke_width}\"/>",
                element.x + radius,
                element.y + radius,
                Color::from_hex(fill).to_hex(),
                Color::from_hex(stroke).to_hex(),
            );
        }

        ElementKind::Line {
            points,
            stroke,
            stroke_width,
        } => {
            if points.len() < 4 {
                // Fewer than two points: nothing to stroke.
                return Ok(());
            }
            let mut path = String::new();
            for pair in points.chunks_exact(2) {
                if !path.is_empty() {
                    path.push(' ');
                }
                let _ = write!(path, "{},{}", pair[0], pair[1]);
            }
            let _ = write!(
                svg,
                "<polyline points=\"{path}\" fill=\"none\" stroke=\"{}\" \
                 stroke-width=\"{stroke_width}\"/>",
                Color::from_hex(stroke).to_hex(),
            );
        }

        ElementKind::Image { src, .. } => {
            let width = element.width.unwrap_or(DEFAULT_IMAGE_EDGE);
            let height = element.height.unwrap_or(DEFAULT_IMAGE_EDGE);
            let href = inline_image_href(src).await?;
            let _ = write!(
                svg,
                "<image x=\"{}\" y=\"{}\" width=\"{width}\" height=\"{height}\" \
                 href=\"{}\" preserveAspectRatio=\"none\"/>",
                element.x,
                element.y,
                escape_xml(&href),
            );
        }

        ElementKind::Chart { svg: payload } => {
            // The chart payload is an opaque sub-document; nest it at the
            // element position and let the rasterizer lay it out.
            let _ = write!(
                svg,
                "<g transform=\"translate({},{})\">{payload}</g>",
                element.x, element.y,
            );
        }
    }

    Ok(())
}

/// Produce an `href` the rasterizer can resolve offline: data URIs pass
/// through, remote URLs are fetched and inlined.
async fn inline_image_href(src: &str) -> ExportResult<String> {
    if src.starts_with("data:") {
        return Ok(src.to_string());
    }

    let bytes = resolve_image_source(src).await?;
    let mime = ImageEncoding::from_magic_bytes(&bytes)
        .mime()
        .ok_or_else(|| {
            ExportError::Resource(format!("Unrecognized image encoding from {src}"))
        })?;
    Ok(encode_data_uri(&bytes, mime))
}
