//! Vector-document exporter.
//!
//! Walks the requested pages and draws each element natively into a
//! multi-page PDF. Canvas pixels map 1:1 to PDF points; the canvas y axis
//! points down while PDF's points up, so every element is transformed
//! with `pdf_y = page_height - y - height` before drawing.
//!
//! Failure semantics: a malformed or unreachable image is logged and
//! skipped (the rest of the page still renders); font loading and final
//! serialization failures abort the whole export.

use std::collections::HashMap;

use easel_core::{
    wrap_text, Color, Document, Element, ElementKind, FontMetrics, FontVariant, TextAlign,
    TextDecoration, LINE_SPACING,
};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point, Polygon, Pt,
};

use crate::error::{ExportError, ExportResult};
use crate::order::paint_order;
use crate::resource::{resolve_image_source, ImageEncoding};

/// Margin subtracted from the page edge when a text element has no
/// explicit wrap width, in px.
const FIXED_MARGIN: f32 = 50.0;

/// Default rectangle size when an element carries none, in px.
const DEFAULT_RECT: (f32, f32) = (100.0, 60.0);

/// Default circle diameter when an element carries no width, in px.
const DEFAULT_CIRCLE_DIAMETER: f32 = 60.0;

/// Default image edge length when an element carries no size, in px.
const DEFAULT_IMAGE_EDGE: f32 = 200.0;

/// DPI assigned to embedded raster images before rescaling.
const IMAGE_DPI: f32 = 300.0;

/// Convert canvas px (= PDF points) to the millimeters printpdf expects.
fn mm(pt: f32) -> Mm {
    Mm::from(Pt(pt))
}

fn pdf_color(color: Color) -> printpdf::Color {
    let [r, g, b] = color.as_unit();
    printpdf::Color::Rgb(printpdf::Rgb::new(r, g, b, None))
}

/// Lazily loaded builtin fonts with their metrics.
struct FontSet {
    loaded: HashMap<FontVariant, (IndirectFontRef, FontMetrics)>,
}

impl FontSet {
    fn new() -> Self {
        Self {
            loaded: HashMap::new(),
        }
    }

    fn get(
        &mut self,
        doc: &PdfDocumentReference,
        variant: FontVariant,
    ) -> ExportResult<&(IndirectFontRef, FontMetrics)> {
        if !self.loaded.contains_key(&variant) {
            let font = doc
                .add_builtin_font(builtin(variant))
                .map_err(|e| ExportError::Font(format!("{}: {e}", variant.postscript_name())))?;
            self.loaded
                .insert(variant, (font, FontMetrics::new(variant)));
        }
        Ok(&self.loaded[&variant])
    }
}

fn builtin(variant: FontVariant) -> BuiltinFont {
    match variant {
        FontVariant::Helvetica => BuiltinFont::Helvetica,
        FontVariant::HelveticaBold => BuiltinFont::HelveticaBold,
        FontVariant::HelveticaOblique => BuiltinFont::HelveticaOblique,
        FontVariant::HelveticaBoldOblique => BuiltinFont::HelveticaBoldOblique,
        FontVariant::TimesRoman => BuiltinFont::TimesRoman,
        FontVariant::TimesBold => BuiltinFont::TimesBold,
        FontVariant::TimesItalic => BuiltinFont::TimesItalic,
        FontVariant::TimesBoldItalic => BuiltinFont::TimesBoldItalic,
        FontVariant::Courier => BuiltinFont::Courier,
        FontVariant::CourierBold => BuiltinFont::CourierBold,
        FontVariant::CourierOblique => BuiltinFont::CourierOblique,
        FontVariant::CourierBoldOblique => BuiltinFont::CourierBoldOblique,
    }
}

/// Export the requested pages as one flattened multi-page PDF.
///
/// Pages are emitted in the order requested; each page's elements are
/// drawn with all text after all non-text.
///
/// # Errors
///
/// Returns an input error for out-of-range pages, a font error if a
/// builtin font cannot be loaded, and an encode error if the document
/// cannot be serialized.
pub async fn export_pdf(document: &Document, pages: &[usize]) -> ExportResult<Vec<u8>> {
    if pages.is_empty() {
        return Err(ExportError::NoContent("no pages requested".to_string()));
    }
    if let Some(&missing) = pages.iter().find(|&&idx| idx >= document.page_count()) {
        return Err(ExportError::MissingPage(missing));
    }

    let size = document.page_size;
    let (doc, first_page, first_layer) = PdfDocument::new(
        document.title.clone(),
        mm(size.width),
        mm(size.height),
        "Layer 1",
    );
    let mut fonts = FontSet::new();

    for (position, &page_index) in pages.iter().enumerate() {
        let layer = if position == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(mm(size.width), mm(size.height), "Layer 1");
            doc.get_page(page).get_layer(layer)
        };

        for element in paint_order(document.page(page_index)) {
            draw_element(&doc, &layer, &mut fonts, element, size.width, size.height).await?;
        }
    }

    doc.save_to_bytes()
        .map_err(|e| ExportError::encode("pdf", e))
}

/// Draw one element onto a page layer.
async fn draw_element(
    doc: &PdfDocumentReference,
    layer: &PdfLayerReference,
    fonts: &mut FontSet,
    element: &Element,
    page_width: f32,
    page_height: f32,
) -> ExportResult<()> {
    // Canvas origin is top-left with y down; PDF origin is bottom-left
    // with y up.
    let pdf_y = page_height - element.y - element.height.unwrap_or(0.0);

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
            let variant = FontVariant::resolve(font_family, *bold, *italic);
            let (font, metrics) = fonts.get(doc, variant)?;
            let font = font.clone();
            let metrics = metrics.clone();

            let max_width = (*wrap_width)
                .or(element.width)
                .unwrap_or(page_width - element.x - FIXED_MARGIN);
            let lines = wrap_text(content, &metrics, *font_size, max_width);

            layer.set_fill_color(pdf_color(Color::from_hex(fill)));
            for (index, line) in lines.iter().enumerate() {
                #[allow(clippy::cast_precision_loss)]
                let line_y = pdf_y - (index as f32) * font_size * LINE_SPACING;
                let line_width = metrics.text_width(line, *font_size);
                let line_x = match align {
                    TextAlign::Left => element.x,
                    TextAlign::Center => element.x + (max_width - line_width) / 2.0,
                    TextAlign::Right => element.x + max_width - line_width,
                };

                layer.use_text(line.clone(), *font_size, mm(line_x), mm(line_y), &font);

                if let Some(offset) = decoration_offset(*decoration, *font_size) {
                    stroke_segment(
                        layer,
                        line_x,
                        line_y + offset,
                        line_x + line_width,
                        line_y + offset,
                        Color::from_hex(fill),
                        (font_size / 15.0).max(0.5),
                    );
                }
            }
        }

        ElementKind::Rect {
            fill,
            stroke,
            stroke_width,
        } => {
            let width = element.width.unwrap_or(DEFAULT_RECT.0);
            let height = element.height.unwrap_or(DEFAULT_RECT.1);
            // pdf_y used element.height when present; keep the rect's own
            // default height consistent with what gets drawn.
            let pdf_y = page_height - element.y - height;

            layer.set_fill_color(pdf_color(Color::from_hex(fill)));
            layer.set_outline_color(pdf_color(Color::from_hex(stroke)));
            layer.set_outline_thickness(*stroke_width);

            let corners = [
                (element.x, pdf_y),
                (element.x + width, pdf_y),
                (element.x + width, pdf_y + height),
                (element.x, pdf_y + height),
            ];
            layer.add_polygon(Polygon {
                rings: vec![corners
                    .iter()
                    .map(|&(x, y)| (Point::new(mm(x), mm(y)), false))
                    .collect()],
                mode: PaintMode::FillStroke,
                winding_order: WindingOrder::NonZero,
            });
        }

        ElementKind::Circle {
            fill,
            stroke,
            stroke_width,
        } => {
            let radius = element.width.unwrap_or(DEFAULT_CIRCLE_DIAMETER) / 2.0;
            let pdf_y = page_height - element.y - element.height.unwrap_or(radius * 2.0);

            layer.set_fill_color(pdf_color(Color::from_hex(fill)));
            layer.set_outline_color(pdf_color(Color::from_hex(stroke)));
            layer.set_outline_thickness(*stroke_width);

            let points = printpdf::utils::calculate_points_for_circle(
                Pt(radius),
                Pt(element.x + radius),
                Pt(pdf_y + radius),
            );
            layer.add_polygon(Polygon {
                rings: vec![points],
                mode: PaintMode::FillStroke,
                winding_order: WindingOrder::NonZero,
            });
        }

        ElementKind::Line {
            points,
            stroke,
            stroke_width,
        } => {
            if points.len() < 4 {
                return Ok(());
            }
            layer.set_outline_color(pdf_color(Color::from_hex(stroke)));
            layer.set_outline_thickness(*stroke_width);
            layer.add_line(Line {
                points: points
                    .chunks_exact(2)
                    .map(|pair| (Point::new(mm(pair[0]), mm(page_height - pair[1])), false))
                    .collect(),
                is_closed: false,
            });
        }

        ElementKind::Image { src, .. } => {
            // Per-element recoverable: a bad image skips, the page goes on.
            if let Err(e) = embed_image(layer, element, src, page_height).await {
                tracing::warn!(element = %element.id, "Skipping image: {e}");
            }
        }

        ElementKind::Chart { .. } => {
            // Charts are not mapped into the vector document; the raster
            // surface composites them instead.
            tracing::debug!(element = %element.id, "Chart element not mapped to PDF");
        }
    }

    Ok(())
}

/// Decode and place a raster image, embedding PNG/JPEG only.
async fn embed_image(
    layer: &PdfLayerReference,
    element: &Element,
    src: &str,
    page_height: f32,
) -> ExportResult<()> {
    let bytes = resolve_image_source(src).await?;

    match ImageEncoding::from_magic_bytes(&bytes) {
        ImageEncoding::Png | ImageEncoding::Jpeg => {}
        other => {
            return Err(ExportError::Resource(format!(
                "Unsupported image encoding {other:?} (only PNG/JPEG embed)"
            )));
        }
    }

    // Decode through printpdf's bundled image crate for compatibility.
    let dynamic_image = printpdf::image_crate::load_from_memory(&bytes)
        .map_err(|e| ExportError::Resource(format!("Failed to decode image: {e}")))?;
    let pdf_image = printpdf::Image::from_dynamic_image(&dynamic_image);

    let target_w = element.width.unwrap_or(DEFAULT_IMAGE_EDGE);
    let target_h = element.height.unwrap_or(DEFAULT_IMAGE_EDGE);
    let pdf_y = page_height - element.y - target_h;

    // printpdf sizes images from their pixel dimensions at `dpi`; scale
    // from that natural size to the element's target size.
    #[allow(clippy::cast_precision_loss)]
    let natural_w_mm = dynamic_image.width() as f32 * 25.4 / IMAGE_DPI;
    #[allow(clippy::cast_precision_loss)]
    let natural_h_mm = dynamic_image.height() as f32 * 25.4 / IMAGE_DPI;

    let transform = printpdf::ImageTransform {
        translate_x: Some(mm(element.x)),
        translate_y: Some(mm(pdf_y)),
        scale_x: Some(mm(target_w).0 / natural_w_mm),
        scale_y: Some(mm(target_h).0 / natural_h_mm),
        dpi: Some(IMAGE_DPI),
        ..Default::default()
    };

    pdf_image.add_to_layer(layer.clone(), transform);
    Ok(())
}

/// Vertical offset from the text baseline for a decoration stroke, in pt.
fn decoration_offset(decoration: TextDecoration, font_size: f32) -> Option<f32> {
    match decoration {
        TextDecoration::None => None,
        TextDecoration::Underline => Some(-0.12 * font_size),
        TextDecoration::Strike => Some(0.28 * font_size),
    }
}

fn stroke_segment(
    layer: &PdfLayerReference,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    color: Color,
    thickness: f32,
) {
    layer.set_outline_color(pdf_color(color));
    layer.set_outline_thickness(thickness);
    layer.add_line(Line {
        points: vec![
            (Point::new(mm(x1), mm(y1)), false),
            (Point::new(mm(x2), mm(y2)), false),
        ],
        is_closed: false,
    });
}
