//! Flow-text exporter.
//!
//! Serializes the structured content object - title, subtitle, sections,
//! contact block - into a single flowing styled-markup document, then
//! appends every canvas text element in page order as an extra paragraph.
//! Page boundaries and coordinates are never consulted: this exporter is
//! a content-to-markup serializer, not a layout engine.
//!
//! The payload is HTML served under a word-processor MIME type and file
//! extension. That is a structural surrogate, not a native word-processor
//! binary; swapping in a real document serializer behind the same
//! signature would not touch the model or the dispatcher.

use std::fmt::Write;

use easel_core::{Document, DocumentContent, ElementKind};

use crate::error::{ExportError, ExportResult};
use crate::markup::escape_xml;

/// Export the document as a flowing styled-markup file.
///
/// `content` is the structured content to serialize; pass the document's
/// own metadata or an override.
///
/// # Errors
///
/// Returns [`ExportError::NoContent`] when there is neither content
/// metadata nor any canvas text to serialize.
pub fn export_flow_text(
    document: &Document,
    content: Option<&DocumentContent>,
) -> ExportResult<Vec<u8>> {
    let canvas_paragraphs = collect_text_paragraphs(document);
    let has_content = content.is_some_and(|c| !c.is_empty());
    if !has_content && canvas_paragraphs.is_empty() {
        return Err(ExportError::NoContent(
            "document has no content metadata and no text elements".to_string(),
        ));
    }

    let mut html = String::with_capacity(2048);
    let title = escape_xml(&document.title);
    let _ = write!(
        html,
        "<!DOCTYPE html>\
         <html><head><meta charset=\"UTF-8\"><title>{title}</title><style>\
         body {{ font-family: Arial, sans-serif; line-height: 1.6; margin: 40px; }}\
         h1 {{ color: #2F4F4F; font-size: 24px; margin-bottom: 20px; }}\
         h2 {{ color: #2F4F4F; font-size: 20px; margin-top: 30px; margin-bottom: 15px; }}\
         p {{ margin-bottom: 15px; }}\
         .contact {{ margin-top: 40px; padding: 20px; background: #f9f9f9; }}\
         </style></head><body>",
    );

    if let Some(content) = content {
        write_content(&mut html, content);
    }

    for (font_size, text) in &canvas_paragraphs {
        let _ = write!(
            html,
            "<p style=\"font-size: {font_size}px;\">{}</p>",
            escape_xml(text),
        );
    }

    if let Some(contact) = content
        .and_then(|c| c.cover.as_ref())
        .and_then(|cover| cover.contact_details.as_ref())
    {
        html.push_str("<div class=\"contact\"><h2>Contact Information</h2>");
        if let Some(email) = &contact.email {
            let _ = write!(html, "<p>Email: {}</p>", escape_xml(email));
        }
        if let Some(phone) = &contact.phone {
            let _ = write!(html, "<p>Phone: {}</p>", escape_xml(phone));
        }
        if let Some(address) = &contact.address {
            let _ = write!(html, "<p>Address: {}</p>", escape_xml(address));
        }
        html.push_str("</div>");
    }

    html.push_str("</body></html>");
    Ok(html.into_bytes())
}

/// Serialize the cover and sections.
fn write_content(html: &mut String, content: &DocumentContent) {
    let has_cover_name = content.cover.as_ref().is_some_and(|cover| {
        cover.company_name.is_some() || cover.report_title.is_some()
    });
    if has_cover_name || content.title.is_some() {
        let _ = write!(html, "<h1>{}</h1>", escape_xml(&content.display_title()));
    }

    if let Some(cover) = &content.cover {
        let subtitle: Vec<&str> = [&cover.division, &cover.year]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .collect();
        if !subtitle.is_empty() {
            let _ = write!(
                html,
                "<p><strong>{}</strong></p>",
                escape_xml(&subtitle.join(" ")),
            );
        }
    }

    for (index, section) in content.sections.iter().enumerate() {
        let _ = write!(html, "<h2>{}</h2>", escape_xml(&section.display_title(index)));
        let body = section.content_text();
        if body.is_empty() {
            continue;
        }
        // Flattened array items arrive separated by blank lines; keep each
        // as its own paragraph.
        for paragraph in body.split("\n\n") {
            let _ = write!(html, "<p>{}</p>", escape_xml(paragraph));
        }
    }
}

/// Collect (font size, content) for every text element, in page order.
fn collect_text_paragraphs(document: &Document) -> Vec<(f32, String)> {
    document
        .pages()
        .flat_map(|page| page.elements().iter())
        .filter_map(|element| match &element.kind {
            ElementKind::Text {
                content, font_size, ..
            } if !content.is_empty() => Some((*font_size, content.clone())),
            _ => None,
        })
        .collect()
}
