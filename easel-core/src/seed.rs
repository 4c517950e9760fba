//! Deterministic initial layout from a structured content object.
//!
//! Seeding walks the content object top to bottom with a local vertical
//! cursor: fixed left margin, cursor starting at the top margin, and
//! font-size-dependent advances per block. The cursor lives on the stack
//! of each call, so concurrent seedings cannot interleave their layouts.

use crate::content::DocumentContent;
use crate::element::{Element, ElementKind, TextAlign, TextDecoration};
use crate::metrics::{FontMetrics, FontVariant};
use crate::units::PageSize;
use crate::wrap::wrap_text;

/// Fixed left margin of the seeded layout, in pixels.
pub const LEFT_MARGIN: f32 = 50.0;

/// Vertical cursor start, in pixels.
pub const TOP_MARGIN: f32 = 50.0;

/// Line height used when estimating a body block's vertical extent.
const BODY_LINE_HEIGHT: f32 = 16.0;

/// Body text is truncated harder once the cursor passes this depth.
const CROWDED_CURSOR: f32 = 600.0;

fn text(role: &str, content: &str, font_size: f32, fill: &str, bold: bool) -> Element {
    Element::with_role(
        role,
        ElementKind::Text {
            content: content.to_string(),
            font_family: "Arial".to_string(),
            font_size,
            fill: fill.to_string(),
            bold,
            italic: false,
            align: TextAlign::Left,
            decoration: TextDecoration::None,
            wrap_width: None,
        },
    )
}

/// Seed the page-0 element list for a content object.
///
/// An empty content object yields a single placeholder text element so the
/// editing surface always has something to select.
#[must_use]
pub fn seed_elements(content: &DocumentContent, page_size: PageSize) -> Vec<Element> {
    if content.is_empty() {
        return placeholder_elements();
    }

    let mut elements = Vec::new();
    let mut cursor = TOP_MARGIN;
    let body_width = page_size.width - 2.0 * LEFT_MARGIN;
    let body_metrics = FontMetrics::new(FontVariant::Helvetica);

    // Logo sits in the top-right corner, outside the cursor flow.
    if let Some(logo) = content.cover.as_ref().and_then(|cover| cover.logo.as_ref()) {
        elements.push(
            Element::with_role(
                "logo",
                ElementKind::Image {
                    src: logo.clone(),
                    bitmap: None,
                },
            )
            .at(page_size.width - 150.0, 20.0)
            .sized(100.0, 60.0),
        );
    }

    let title = content
        .cover
        .as_ref()
        .and_then(|cover| cover.company_name.clone().or_else(|| cover.report_title.clone()))
        .or_else(|| content.title.clone())
        .unwrap_or_else(|| "Document Title".to_string());
    elements.push(text("title", &title, 28.0, "#000000", true).at(LEFT_MARGIN, cursor));
    cursor += 60.0;

    if let Some(subtitle) = content.subtitle() {
        elements.push(text("subtitle", &subtitle, 18.0, "#666666", false).at(LEFT_MARGIN, cursor));
        cursor += 40.0;
    }

    if let Some(contact) = content
        .cover
        .as_ref()
        .and_then(|cover| cover.contact_details.as_ref())
    {
        let line: Vec<&str> = [&contact.email, &contact.phone, &contact.address]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .collect();
        if !line.is_empty() {
            let line = line.join(" | ");
            elements.push(text("contact", &line, 12.0, "#666666", false).at(LEFT_MARGIN, cursor));
            cursor += 30.0;
        }
    }

    for (index, section) in content.sections.iter().enumerate() {
        let heading = section.display_title(index);
        elements
            .push(text("section-title", &heading, 20.0, "#333333", true).at(LEFT_MARGIN, cursor));
        cursor += 40.0;

        let body = truncate(&section.content_text(), cursor);
        if body.is_empty() {
            continue;
        }

        #[allow(clippy::cast_precision_loss)]
        let line_count = wrap_text(&body, &body_metrics, 12.0, body_width).len() as f32;
        elements.push(
            text("section-content", &body, 12.0, "#666666", false)
                .at(LEFT_MARGIN, cursor)
                .with_width(body_width),
        );
        cursor += (line_count * BODY_LINE_HEIGHT + 20.0).max(40.0);
    }

    tracing::debug!(elements = elements.len(), "Seeded initial layout");
    elements
}

/// The single placeholder element seeded for empty content.
#[must_use]
pub fn placeholder_elements() -> Vec<Element> {
    vec![text(
        "placeholder",
        "Click to edit this document",
        16.0,
        "#666666",
        false,
    )
    .at(LEFT_MARGIN, TOP_MARGIN)]
}

/// Cap body text so a seeded page stays readable; blocks low on the page
/// get a tighter cap.
fn truncate(body: &str, cursor: f32) -> String {
    let max_chars = if cursor > CROWDED_CURSOR { 150 } else { 300 };
    if body.chars().count() <= max_chars {
        return body.trim().to_string();
    }
    let cut: String = body.chars().take(max_chars).collect();
    format!("{}...", cut.trim())
}
