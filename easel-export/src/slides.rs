//! Slide-deck exporter.
//!
//! Produces a minimal but well-formed OOXML presentation package: one
//! 16:9 slide per document page. Text elements project to text boxes and
//! rectangles to shape primitives via the fixed px/100-inch embedding
//! convention; document content metadata contributes a title block on the
//! first slide and per-section text boxes on the matching slides.
//! Circles, lines, images, and charts have no first-class slide mapping
//! and are omitted.

use std::fmt::Write as _;
use std::io::{Cursor, Write};

use easel_core::{px_to_inches, Color, Document, DocumentContent, ElementKind};
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::error::{ExportError, ExportResult};
use crate::markup::escape_xml;

/// EMU per inch, the OOXML drawing unit.
const EMU_PER_INCH: f32 = 914_400.0;

/// EMU per point, used for line widths.
const EMU_PER_PT: f32 = 12_700.0;

/// 16:9 slide size in EMU (13.333 x 7.5 inches).
const SLIDE_CX: u64 = 12_192_000;
const SLIDE_CY: u64 = 6_858_000;

/// Default projected size of an unsized text element, in px.
const DEFAULT_TEXT_BOX: (f32, f32) = (200.0, 50.0);

/// Default projected size of an unsized rectangle, in px.
const DEFAULT_RECT: (f32, f32) = (100.0, 100.0);

const XMLNS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const XMLNS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const XMLNS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

/// Convert a pixel coordinate to EMU via the slide-inch convention.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn px_to_emu(px: f32) -> u64 {
    (px_to_inches(px) * EMU_PER_INCH).max(0.0) as u64
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn inches_to_emu(inches: f32) -> u64 {
    (inches * EMU_PER_INCH).max(0.0) as u64
}

fn ooxml_color(hex: &str) -> String {
    let color = Color::from_hex(hex);
    format!("{:02X}{:02X}{:02X}", color.r, color.g, color.b)
}

/// Assembles the parts of an OOXML package into a ZIP container.
struct PackageWriter {
    zip: ZipWriter<Cursor<Vec<u8>>>,
}

impl PackageWriter {
    fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    fn add_part(&mut self, path: &str, content: &str) -> ExportResult<()> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        self.zip.start_file(path, options)?;
        self.zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn finish(self) -> ExportResult<Vec<u8>> {
        let cursor = self.zip.finish()?;
        Ok(cursor.into_inner())
    }
}

/// Export the document as a slide deck, one slide per page.
///
/// `content` is the structured content consulted for the title block and
/// the page-to-section correspondence; pass the document's own metadata
/// or an override.
///
/// # Errors
///
/// Returns an archive error if package assembly fails.
pub fn export_slides(
    document: &Document,
    content: Option<&DocumentContent>,
) -> ExportResult<Vec<u8>> {
    let slide_count = document.page_count();
    let mut package = PackageWriter::new();

    package.add_part("[Content_Types].xml", &content_types_xml(slide_count))?;
    package.add_part("_rels/.rels", ROOT_RELS)?;
    package.add_part("ppt/presentation.xml", &presentation_xml(slide_count))?;
    package.add_part(
        "ppt/_rels/presentation.xml.rels",
        &presentation_rels_xml(slide_count),
    )?;
    package.add_part("ppt/slideMasters/slideMaster1.xml", SLIDE_MASTER)?;
    package.add_part("ppt/slideMasters/_rels/slideMaster1.xml.rels", MASTER_RELS)?;
    package.add_part("ppt/slideLayouts/slideLayout1.xml", SLIDE_LAYOUT)?;
    package.add_part("ppt/slideLayouts/_rels/slideLayout1.xml.rels", LAYOUT_RELS)?;
    package.add_part("ppt/theme/theme1.xml", THEME)?;

    for page_index in 0..slide_count {
        let slide = slide_xml(document, content, page_index);
        package.add_part(&format!("ppt/slides/slide{}.xml", page_index + 1), &slide)?;
        package.add_part(
            &format!("ppt/slides/_rels/slide{}.xml.rels", page_index + 1),
            SLIDE_RELS,
        )?;
    }

    package.finish().map_err(|e| match e {
        err @ ExportError::Archive(_) => err,
        other => ExportError::encode("slides", other),
    })
}

/// Build the shape tree for one slide.
fn slide_xml(document: &Document, content: Option<&DocumentContent>, page_index: usize) -> String {
    let mut shapes = String::new();
    // Shape id 1 is the group; content shapes start at 2.
    let mut shape_id = 2u32;

    // Title block from cover metadata, first slide only.
    if page_index == 0 {
        if let Some(title) = cover_title(content) {
            push_text_box(
                &mut shapes,
                &mut shape_id,
                &title,
                inches_to_emu(0.5),
                inches_to_emu(0.5),
                inches_to_emu(8.5),
                inches_to_emu(1.0),
                28.0,
                true,
                "363636",
                "Arial",
            );
        }
    }

    for element in document.page(page_index) {
        match &element.kind {
            ElementKind::Text {
                content,
                font_family,
                font_size,
                fill,
                bold,
                ..
            } => {
                let (dw, dh) = DEFAULT_TEXT_BOX;
                push_text_box(
                    &mut shapes,
                    &mut shape_id,
                    content,
                    px_to_emu(element.x),
                    px_to_emu(element.y),
                    px_to_emu(element.width.unwrap_or(dw)),
                    px_to_emu(element.height.unwrap_or(dh)),
                    *font_size,
                    *bold,
                    &ooxml_color(fill),
                    font_family,
                );
            }
            ElementKind::Rect {
                fill,
                stroke,
                stroke_width,
            } => {
                let (dw, dh) = DEFAULT_RECT;
                push_rect_shape(
                    &mut shapes,
                    &mut shape_id,
                    px_to_emu(element.x),
                    px_to_emu(element.y),
                    px_to_emu(element.width.unwrap_or(dw)),
                    px_to_emu(element.height.unwrap_or(dh)),
                    &ooxml_color(fill),
                    &ooxml_color(stroke),
                    *stroke_width,
                );
            }
            // No first-class slide mapping for these kinds.
            ElementKind::Circle { .. }
            | ElementKind::Line { .. }
            | ElementKind::Image { .. }
            | ElementKind::Chart { .. } => {}
        }
    }

    // Slide N+1 carries section N where that correspondence exists.
    if page_index > 0 {
        if let Some(section) = content.and_then(|c| c.sections.get(page_index - 1)) {
            push_text_box(
                &mut shapes,
                &mut shape_id,
                &section.display_title(page_index - 1),
                inches_to_emu(0.5),
                inches_to_emu(2.0),
                inches_to_emu(8.5),
                inches_to_emu(0.8),
                20.0,
                true,
                "2F4F4F",
                "Arial",
            );
            let body = section.content_text();
            if !body.is_empty() {
                push_text_box(
                    &mut shapes,
                    &mut shape_id,
                    &body,
                    inches_to_emu(0.5),
                    inches_to_emu(3.0),
                    inches_to_emu(8.5),
                    inches_to_emu(4.0),
                    14.0,
                    false,
                    "363636",
                    "Arial",
                );
            }
        }
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:sld xmlns:a=\"{XMLNS_A}\" xmlns:r=\"{XMLNS_R}\" xmlns:p=\"{XMLNS_P}\">\
         <p:cSld><p:spTree>\
         <p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
         <p:grpSpPr/>\
         {shapes}\
         </p:spTree></p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"
    )
}

/// The cover-derived deck title, when the metadata carries one.
fn cover_title(content: Option<&DocumentContent>) -> Option<String> {
    let cover = content?.cover.as_ref()?;
    if cover.company_name.is_none() && cover.report_title.is_none() {
        return None;
    }
    Some(
        cover
            .report_title
            .clone()
            .or_else(|| cover.company_name.clone())
            .unwrap_or_else(|| "Document Title".to_string()),
    )
}

#[allow(clippy::too_many_arguments)]
fn push_text_box(
    shapes: &mut String,
    shape_id: &mut u32,
    text: &str,
    x: u64,
    y: u64,
    cx: u64,
    cy: u64,
    font_size: f32,
    bold: bool,
    color: &str,
    font_family: &str,
) {
    let id = *shape_id;
    *shape_id += 1;

    // Font size in hundredths of a point.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let sz = (font_size * 100.0).max(100.0) as u32;
    let bold_attr = if bold { " b=\"1\"" } else { "" };

    // One paragraph per input line keeps flattened section bodies legible.
    let mut paragraphs = String::new();
    for line in text.lines() {
        let _ = write!(
            paragraphs,
            "<a:p><a:r><a:rPr lang=\"en-US\" sz=\"{sz}\"{bold_attr}>\
             <a:solidFill><a:srgbClr val=\"{color}\"/></a:solidFill>\
             <a:latin typeface=\"{}\"/></a:rPr>\
             <a:t>{}</a:t></a:r></a:p>",
            escape_xml(font_family),
            escape_xml(line),
        );
    }
    if paragraphs.is_empty() {
        paragraphs.push_str("<a:p/>");
    }

    let _ = write!(
        shapes,
        "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"TextBox {id}\"/>\
         <p:cNvSpPr txBox=\"1\"/><p:nvPr/></p:nvSpPr>\
         <p:spPr><a:xfrm><a:off x=\"{x}\" y=\"{y}\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>\
         <a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></p:spPr>\
         <p:txBody><a:bodyPr wrap=\"square\" anchor=\"t\"/><a:lstStyle/>{paragraphs}</p:txBody>\
         </p:sp>",
    );
}

#[allow(clippy::too_many_arguments)]
fn push_rect_shape(
    shapes: &mut String,
    shape_id: &mut u32,
    x: u64,
    y: u64,
    cx: u64,
    cy: u64,
    fill: &str,
    stroke: &str,
    stroke_width: f32,
) {
    let id = *shape_id;
    *shape_id += 1;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let line_emu = (stroke_width * EMU_PER_PT).max(0.0) as u64;

    let _ = write!(
        shapes,
        "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"Shape {id}\"/>\
         <p:cNvSpPr/><p:nvPr/></p:nvSpPr>\
         <p:spPr><a:xfrm><a:off x=\"{x}\" y=\"{y}\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>\
         <a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom>\
         <a:solidFill><a:srgbClr val=\"{fill}\"/></a:solidFill>\
         <a:ln w=\"{line_emu}\"><a:solidFill><a:srgbClr val=\"{stroke}\"/></a:solidFill></a:ln>\
         </p:spPr>\
         <p:txBody><a:bodyPr/><a:lstStyle/><a:p/></p:txBody></p:sp>",
    );
}

fn content_types_xml(slide_count: usize) -> String {
    let mut overrides = String::new();
    for index in 1..=slide_count {
        let _ = write!(
            overrides,
            "<Override PartName=\"/ppt/slides/slide{index}.xml\" \
             ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slide+xml\"/>",
        );
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
         <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
         <Override PartName=\"/ppt/presentation.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml\"/>\
         <Override PartName=\"/ppt/slideMasters/slideMaster1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml\"/>\
         <Override PartName=\"/ppt/slideLayouts/slideLayout1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml\"/>\
         <Override PartName=\"/ppt/theme/theme1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.theme+xml\"/>\
         {overrides}</Types>"
    )
}

fn presentation_xml(slide_count: usize) -> String {
    let mut slide_ids = String::new();
    for index in 0..slide_count {
        let _ = write!(
            slide_ids,
            "<p:sldId id=\"{}\" r:id=\"rId{}\"/>",
            256 + index,
            index + 2,
        );
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:presentation xmlns:a=\"{XMLNS_A}\" xmlns:r=\"{XMLNS_R}\" xmlns:p=\"{XMLNS_P}\">\
         <p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst>\
         <p:sldIdLst>{slide_ids}</p:sldIdLst>\
         <p:sldSz cx=\"{SLIDE_CX}\" cy=\"{SLIDE_CY}\"/>\
         <p:notesSz cx=\"6858000\" cy=\"9144000\"/></p:presentation>"
    )
}

fn presentation_rels_xml(slide_count: usize) -> String {
    let mut rels = String::from(
        "<Relationship Id=\"rId1\" \
         Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster\" \
         Target=\"slideMasters/slideMaster1.xml\"/>",
    );
    for index in 0..slide_count {
        let _ = write!(
            rels,
            "<Relationship Id=\"rId{}\" \
             Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide\" \
             Target=\"slides/slide{}.xml\"/>",
            index + 2,
            index + 1,
        );
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         {rels}</Relationships>"
    )
}

const ROOT_RELS: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" \
Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" \
Target=\"ppt/presentation.xml\"/></Relationships>";

const SLIDE_MASTER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<p:sldMaster xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\" \
xmlns:p=\"http://schemas.openxmlformats.org/presentationml/2006/main\">\
<p:cSld><p:spTree>\
<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
<p:grpSpPr/></p:spTree></p:cSld>\
<p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" accent1=\"accent1\" \
accent2=\"accent2\" accent3=\"accent3\" accent4=\"accent4\" accent5=\"accent5\" \
accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>\
<p:sldLayoutIdLst><p:sldLayoutId id=\"2147483649\" r:id=\"rId1\"/></p:sldLayoutIdLst>\
</p:sldMaster>";

const MASTER_RELS: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" \
Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout\" \
Target=\"../slideLayouts/slideLayout1.xml\"/>\
<Relationship Id=\"rId2\" \
Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme\" \
Target=\"../theme/theme1.xml\"/></Relationships>";

const SLIDE_LAYOUT: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<p:sldLayout xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\" \
xmlns:p=\"http://schemas.openxmlformats.org/presentationml/2006/main\">\
<p:cSld><p:spTree>\
<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
<p:grpSpPr/></p:spTree></p:cSld>\
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>";

const LAYOUT_RELS: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" \
Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster\" \
Target=\"../slideMasters/slideMaster1.xml\"/></Relationships>";

const SLIDE_RELS: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" \
Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout\" \
Target=\"../slideLayouts/slideLayout1.xml\"/></Relationships>";

/// Minimal theme: one color scheme, one font scheme, the mandatory format
/// scheme stubs.
const THEME: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<a:theme xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" name=\"Easel\">\
<a:themeElements>\
<a:clrScheme name=\"Easel\">\
<a:dk1><a:srgbClr val=\"000000\"/></a:dk1><a:lt1><a:srgbClr val=\"FFFFFF\"/></a:lt1>\
<a:dk2><a:srgbClr val=\"44546A\"/></a:dk2><a:lt2><a:srgbClr val=\"E7E6E6\"/></a:lt2>\
<a:accent1><a:srgbClr val=\"4472C4\"/></a:accent1><a:accent2><a:srgbClr val=\"ED7D31\"/></a:accent2>\
<a:accent3><a:srgbClr val=\"A5A5A5\"/></a:accent3><a:accent4><a:srgbClr val=\"FFC000\"/></a:accent4>\
<a:accent5><a:srgbClr val=\"5B9BD5\"/></a:accent5><a:accent6><a:srgbClr val=\"70AD47\"/></a:accent6>\
<a:hlink><a:srgbClr val=\"0563C1\"/></a:hlink><a:folHlink><a:srgbClr val=\"954F72\"/></a:folHlink>\
</a:clrScheme>\
<a:fontScheme name=\"Easel\">\
<a:majorFont><a:latin typeface=\"Arial\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:majorFont>\
<a:minorFont><a:latin typeface=\"Arial\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:minorFont>\
</a:fontScheme>\
<a:fmtScheme name=\"Easel\">\
<a:fillStyleLst>\
<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
</a:fillStyleLst>\
<a:lnStyleLst>\
<a:ln w=\"6350\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
<a:ln w=\"12700\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
<a:ln w=\"19050\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
</a:lnStyleLst>\
<a:effectStyleLst>\
<a:effectStyle><a:effectLst/></a:effectStyle>\
<a:effectStyle><a:effectLst/></a:effectStyle>\
<a:effectStyle><a:effectLst/></a:effectStyle>\
</a:effectStyleLst>\
<a:bgFillStyleLst>\
<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
</a:bgFillStyleLst>\
</a:fmtScheme>\
</a:themeElements></a:theme>";

#[cfg(test)]
mod tests {
    use super::*;
    use easel_core::{
        ContactDetails, Cover, Element, ElementKind, PageSize, Section, TextAlign, TextDecoration,
    };
    use serde_json::json;
    use std::io::Read;

    fn text_element(content: &str, x: f32, y: f32) -> Element {
        Element::new(ElementKind::Text {
            content: content.to_string(),
            font_family: "Arial".to_string(),
            font_size: 12.0,
            fill: "#336699".to_string(),
            bold: false,
            italic: false,
            align: TextAlign::Left,
            decoration: TextDecoration::None,
            wrap_width: None,
        })
        .at(x, y)
    }

    fn read_part(package: &[u8], name: &str) -> String {
        let mut archive =
            zip::ZipArchive::new(Cursor::new(package.to_vec())).expect("open package");
        let mut part = String::new();
        archive
            .by_name(name)
            .unwrap_or_else(|_| panic!("part {name} missing"))
            .read_to_string(&mut part)
            .expect("read part");
        part
    }

    fn content_with_sections() -> DocumentContent {
        DocumentContent {
            title: None,
            cover: Some(Cover {
                company_name: Some("Acme Corp".to_string()),
                report_title: Some("Annual Report".to_string()),
                division: None,
                year: None,
                logo: None,
                contact_details: Some(ContactDetails::default()),
            }),
            sections: vec![
                Section {
                    title: Some("Revenue".to_string()),
                    content: json!("Revenue grew 12%."),
                },
                Section {
                    title: Some("Outlook".to_string()),
                    content: json!("Stable."),
                },
                Section {
                    title: None,
                    content: json!("Closing notes."),
                },
            ],
        }
    }

    #[test]
    fn test_package_has_required_parts() {
        let doc = Document::new("Deck", PageSize::A4);
        let package = export_slides(&doc, None).expect("slides");

        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide1.xml",
        ] {
            read_part(&package, part);
        }
    }

    #[test]
    fn test_one_slide_per_page() {
        let mut doc = Document::new("Deck", PageSize::A4);
        doc.add_page();
        doc.add_page();

        let package = export_slides(&doc, None).expect("slides");
        let presentation = read_part(&package, "ppt/presentation.xml");
        assert_eq!(presentation.matches("<p:sldId ").count(), 3);
        read_part(&package, "ppt/slides/slide3.xml");
    }

    #[test]
    fn test_text_projected_with_px_inch_convention() {
        let mut doc = Document::new("Deck", PageSize::A4);
        doc.add_element(0, text_element("Projected", 100.0, 50.0).sized(200.0, 50.0))
            .expect("insert");

        let package = export_slides(&doc, None).expect("slides");
        let slide = read_part(&package, "ppt/slides/slide1.xml");
        // 100 px -> 1.0 in -> 914400 EMU; 50 px -> 457200 EMU.
        assert!(slide.contains("<a:off x=\"914400\" y=\"457200\"/>"));
        assert!(slide.contains("<a:ext cx=\"1828800\" cy=\"457200\"/>"));
        assert!(slide.contains("<a:t>Projected</a:t>"));
        assert!(slide.contains("<a:srgbClr val=\"336699\"/>"));
        // 12 pt -> sz 1200.
        assert!(slide.contains("sz=\"1200\""));
    }

    #[test]
    fn test_rect_projected_as_shape() {
        let mut doc = Document::new("Deck", PageSize::A4);
        doc.add_element(
            0,
            Element::new(ElementKind::Rect {
                fill: "#ff0000".to_string(),
                stroke: "#00ff00".to_string(),
                stroke_width: 1.0,
            })
            .at(0.0, 0.0)
            .sized(100.0, 100.0),
        )
        .expect("insert");

        let package = export_slides(&doc, None).expect("slides");
        let slide = read_part(&package, "ppt/slides/slide1.xml");
        assert!(slide.contains("<a:solidFill><a:srgbClr val=\"FF0000\"/></a:solidFill>"));
        assert!(slide.contains("<a:ln w=\"12700\">"));
    }

    #[test]
    fn test_unmapped_kinds_are_omitted() {
        let mut doc = Document::new("Deck", PageSize::A4);
        doc.add_element(
            0,
            Element::new(ElementKind::Circle {
                fill: "#ef4444".to_string(),
                stroke: "#dc2626".to_string(),
                stroke_width: 2.0,
            })
            .sized(60.0, 60.0),
        )
        .expect("insert");

        let package = export_slides(&doc, None).expect("slides");
        let slide = read_part(&package, "ppt/slides/slide1.xml");
        // Only the group header, no content shapes.
        assert!(!slide.contains("<p:sp>"));
    }

    #[test]
    fn test_cover_title_on_first_slide_only() {
        let mut doc = Document::new("Deck", PageSize::A4);
        doc.add_page();
        let content = content_with_sections();

        let package = export_slides(&doc, Some(&content)).expect("slides");
        let first = read_part(&package, "ppt/slides/slide1.xml");
        let second = read_part(&package, "ppt/slides/slide2.xml");
        assert!(first.contains("<a:t>Annual Report</a:t>"));
        assert!(!second.contains("<a:t>Annual Report</a:t>"));
    }

    #[test]
    fn test_sections_map_to_following_slides() {
        // Slide N+1 displays section N: with 4 pages, sections 1-3 land on
        // slides 2-4.
        let mut doc = Document::new("Deck", PageSize::A4);
        doc.add_page();
        doc.add_page();
        doc.add_page();
        let content = content_with_sections();

        let package = export_slides(&doc, Some(&content)).expect("slides");
        let slide2 = read_part(&package, "ppt/slides/slide2.xml");
        assert!(slide2.contains("<a:t>Revenue</a:t>"));
        assert!(slide2.contains("<a:t>Revenue grew 12%.</a:t>"));

        let slide4 = read_part(&package, "ppt/slides/slide4.xml");
        assert!(slide4.contains("<a:t>Section 3</a:t>"));
        assert!(slide4.contains("<a:t>Closing notes.</a:t>"));
    }
}
