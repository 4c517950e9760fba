//! Integration tests for document export (easel-export).
//!
//! Exercises the dispatcher end to end across all four formats, the
//! text-on-top paint order, coordinate transforms, multi-page archives,
//! and the content-to-slide correspondence.

use std::io::{Cursor, Read};

use easel_core::{
    Cover, Document, DocumentContent, Element, ElementKind, PageSize, Section, TextAlign,
    TextDecoration,
};
use easel_export::{export, ExportFormat, ExportOptions};
use serde_json::json;

/// Create a text element at a given position.
fn text_element(content: &str, x: f32, y: f32) -> Element {
    Element::new(ElementKind::Text {
        content: content.to_string(),
        font_family: "Arial".to_string(),
        font_size: 16.0,
        fill: "#000000".to_string(),
        bold: false,
        italic: false,
        align: TextAlign::Left,
        decoration: TextDecoration::None,
        wrap_width: None,
    })
    .at(x, y)
}

/// Create a filled rectangle.
fn rect_element(x: f32, y: f32, width: f32, height: f32) -> Element {
    Element::new(ElementKind::Rect {
        fill: "#3b82f6".to_string(),
        stroke: "#1e40af".to_string(),
        stroke_width: 2.0,
    })
    .at(x, y)
    .sized(width, height)
}

fn options(filename: &str) -> ExportOptions {
    ExportOptions {
        filename: filename.to_string(),
        pixel_density: 1.0,
        ..ExportOptions::default()
    }
}

// ==========================================================================
// Vector-document scenarios: paint order and page counts
// ==========================================================================

#[tokio::test]
async fn test_pdf_rectangle_painted_before_text() {
    let mut doc = Document::new("Sales", PageSize::A4);
    // Text inserted first; the exporter must still paint it last.
    doc.add_element(0, text_element("Q1 Sales, 25000", 100.0, 180.0))
        .expect("insert");
    doc.add_element(0, rect_element(100.0, 200.0, 100.0, 60.0))
        .expect("insert");

    let result = export(&doc, ExportFormat::Pdf, &options("sales"))
        .await
        .expect("pdf export");

    assert_eq!(&result.bytes[0..5], b"%PDF-");
    assert_eq!(result.mime, "application/pdf");
    assert_eq!(result.filename, "sales.pdf");

    // The content stream is uncompressed by default: the rectangle's fill
    // color must be set before the text-showing operator appears.
    let body = String::from_utf8_lossy(&result.bytes);
    let fill_pos = body.find("0.23").expect("rect fill color in stream");
    let text_pos = body.find("Tj").expect("text operator in stream");
    assert!(fill_pos < text_pos, "rectangle must be drawn before text");
}

#[tokio::test]
async fn test_pdf_page_count_matches_request() {
    let mut doc = Document::new("Pages", PageSize::A4);
    doc.add_page();
    doc.add_page();
    doc.add_element(1, text_element("middle", 50.0, 50.0))
        .expect("insert");

    let result = export(&doc, ExportFormat::Pdf, &options("pages"))
        .await
        .expect("pdf export");
    let body = String::from_utf8_lossy(&result.bytes);
    assert!(body.contains("/Count 3"));
}

#[tokio::test]
async fn test_pdf_subset_of_pages() {
    let mut doc = Document::new("Subset", PageSize::A4);
    doc.add_page();
    doc.add_page();

    let mut opts = options("subset");
    opts.pages = Some(vec![0, 2]);
    let result = export(&doc, ExportFormat::Pdf, &opts)
        .await
        .expect("pdf export");
    let body = String::from_utf8_lossy(&result.bytes);
    assert!(body.contains("/Count 2"));
}

// ==========================================================================
// Raster snapshots and the multi-page archive regression
// ==========================================================================

#[tokio::test]
async fn test_single_page_raster_is_png() {
    let mut doc = Document::new("Snapshot", PageSize::custom(200.0, 150.0));
    doc.add_element(0, text_element("One page", 10.0, 20.0))
        .expect("insert");

    let result = export(&doc, ExportFormat::Raster, &options("snap"))
        .await
        .expect("raster export");
    assert_eq!(&result.bytes[0..4], &[137, 80, 78, 71]);
    assert_eq!(result.mime, "image/png");
    assert_eq!(result.filename, "snap.png");
}

#[tokio::test]
async fn test_two_page_archive_has_distinct_entries() {
    // Regression for the duplicate-snapshot defect: a two-page document
    // must yield two entries with different pixels.
    let mut doc = Document::new("Two pages", PageSize::custom(200.0, 120.0));
    doc.add_element(0, text_element("First page heading", 10.0, 20.0))
        .expect("insert");
    doc.add_page();
    doc.add_element(1, rect_element(20.0, 20.0, 150.0, 70.0))
        .expect("insert");

    let result = export(&doc, ExportFormat::Raster, &options("book"))
        .await
        .expect("raster export");
    assert_eq!(result.mime, "application/zip");
    assert_eq!(result.filename, "book.zip");

    let mut archive = zip::ZipArchive::new(Cursor::new(result.bytes)).expect("open archive");
    assert_eq!(archive.len(), 2);

    let mut first = Vec::new();
    archive
        .by_name("page-1.png")
        .expect("page-1 entry")
        .read_to_end(&mut first)
        .expect("read");
    let mut second = Vec::new();
    archive
        .by_name("page-2.png")
        .expect("page-2 entry")
        .read_to_end(&mut second)
        .expect("read");

    assert_eq!(&first[0..4], &[137, 80, 78, 71]);
    assert_eq!(&second[0..4], &[137, 80, 78, 71]);
    assert_ne!(first, second, "each entry must render its own page");
}

#[tokio::test]
async fn test_raster_density_multiplier() {
    let doc = Document::new("Density", PageSize::custom(100.0, 80.0));
    let mut opts = options("density");
    opts.pixel_density = 2.0;

    let result = export(&doc, ExportFormat::Raster, &opts)
        .await
        .expect("raster export");
    let decoded = image::load_from_memory(&result.bytes).expect("decode png");
    assert_eq!(decoded.width(), 200);
    assert_eq!(decoded.height(), 160);
}

// ==========================================================================
// Slide decks and the content-to-section correspondence
// ==========================================================================

#[tokio::test]
async fn test_slides_one_per_section() {
    // Three sections on pages 1..3: each following slide carries its
    // section's body text.
    let mut doc = Document::new("Deck", PageSize::A4);
    doc.add_page();
    doc.add_page();
    doc.add_page();
    doc.content = Some(DocumentContent {
        title: None,
        cover: Some(Cover {
            company_name: Some("Acme Corp".to_string()),
            report_title: None,
            division: None,
            year: None,
            logo: None,
            contact_details: None,
        }),
        sections: vec![
            Section {
                title: Some("Alpha".to_string()),
                content: json!("Alpha body"),
            },
            Section {
                title: Some("Beta".to_string()),
                content: json!("Beta body"),
            },
            Section {
                title: Some("Gamma".to_string()),
                content: json!("Gamma body"),
            },
        ],
    });

    let result = export(&doc, ExportFormat::Slides, &options("deck"))
        .await
        .expect("slides export");
    assert_eq!(
        result.mime,
        "application/vnd.openxmlformats-officedocument.presentationml.presentation"
    );
    assert_eq!(result.filename, "deck.pptx");

    let mut archive = zip::ZipArchive::new(Cursor::new(result.bytes)).expect("open package");
    for (slide, body) in [(2, "Alpha body"), (3, "Beta body"), (4, "Gamma body")] {
        let mut xml = String::new();
        archive
            .by_name(&format!("ppt/slides/slide{slide}.xml"))
            .expect("slide part")
            .read_to_string(&mut xml)
            .expect("read slide");
        assert!(xml.contains(&format!("<a:t>{body}</a:t>")), "slide {slide}");
    }
}

#[tokio::test]
async fn test_slides_project_canvas_elements() {
    let mut doc = Document::new("Deck", PageSize::A4);
    doc.add_element(0, text_element("On canvas", 100.0, 100.0))
        .expect("insert");
    doc.add_element(0, rect_element(200.0, 200.0, 100.0, 100.0))
        .expect("insert");

    let result = export(&doc, ExportFormat::Slides, &options("deck"))
        .await
        .expect("slides export");
    let mut archive = zip::ZipArchive::new(Cursor::new(result.bytes)).expect("open package");
    let mut xml = String::new();
    archive
        .by_name("ppt/slides/slide1.xml")
        .expect("slide part")
        .read_to_string(&mut xml)
        .expect("read slide");
    assert!(xml.contains("<a:t>On canvas</a:t>"));
    // 100 px -> 914400 EMU via the px/100 convention.
    assert!(xml.contains("x=\"914400\""));
    assert!(xml.contains("prst=\"rect\""));
}

// ==========================================================================
// Flow text
// ==========================================================================

#[tokio::test]
async fn test_flow_text_serializes_content_and_canvas_text() {
    let mut doc = Document::new("Flow", PageSize::A4);
    doc.add_element(0, text_element("Canvas paragraph", 50.0, 400.0))
        .expect("insert");
    doc.content = Some(DocumentContent {
        title: Some("Quarterly Notes".to_string()),
        cover: None,
        sections: vec![Section {
            title: Some("Intro".to_string()),
            content: json!("Welcome."),
        }],
    });

    let result = export(&doc, ExportFormat::FlowText, &options("notes"))
        .await
        .expect("flow export");
    assert_eq!(
        result.mime,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    assert_eq!(result.filename, "notes.doc");

    let html = String::from_utf8(result.bytes).expect("utf8");
    assert!(html.contains("<h1>Quarterly Notes</h1>"));
    assert!(html.contains("<h2>Intro</h2>"));
    assert!(html.contains("Canvas paragraph"));
}

// ==========================================================================
// Dispatcher behavior
// ==========================================================================

#[tokio::test]
async fn test_all_formats_for_same_document() {
    let mut doc = Document::new("Everything", PageSize::custom(200.0, 150.0));
    doc.add_element(0, text_element("Export test", 10.0, 20.0))
        .expect("insert");
    doc.add_element(0, rect_element(10.0, 50.0, 80.0, 40.0))
        .expect("insert");

    let pdf = export(&doc, ExportFormat::Pdf, &options("all"))
        .await
        .expect("pdf");
    assert_eq!(&pdf.bytes[0..5], b"%PDF-");

    let png = export(&doc, ExportFormat::Raster, &options("all"))
        .await
        .expect("png");
    assert_eq!(&png.bytes[0..4], &[137, 80, 78, 71]);

    let deck = export(&doc, ExportFormat::Slides, &options("all"))
        .await
        .expect("pptx");
    // ZIP local-file-header magic.
    assert_eq!(&deck.bytes[0..2], b"PK");

    let flow = export(&doc, ExportFormat::FlowText, &options("all"))
        .await
        .expect("doc");
    assert!(String::from_utf8(flow.bytes).expect("utf8").starts_with("<!DOCTYPE html>"));
}

#[tokio::test]
async fn test_unknown_format_tag_rejected_without_output() {
    let tag = "quark".parse::<easel_export::ExportFormat>();
    assert!(tag.is_err());
}

#[tokio::test]
async fn test_export_does_not_mutate_document() {
    let mut doc = Document::new("Immutable", PageSize::A4);
    doc.add_element(0, text_element("untouched", 10.0, 10.0))
        .expect("insert");
    let before = doc.to_json().expect("serialize");

    export(&doc, ExportFormat::Pdf, &options("a")).await.expect("pdf");
    export(&doc, ExportFormat::Raster, &options("b")).await.expect("png");
    export(&doc, ExportFormat::Slides, &options("c")).await.expect("pptx");
    export(&doc, ExportFormat::FlowText, &options("d")).await.expect("doc");

    assert_eq!(doc.to_json().expect("serialize"), before);
}

#[tokio::test]
async fn test_page_size_override_changes_output_only() {
    let doc = Document::new("Sized", PageSize::A4);
    let mut opts = options("letter");
    opts.page_size = Some(PageSize::LETTER);

    let result = export(&doc, ExportFormat::Raster, &opts)
        .await
        .expect("raster export");
    let decoded = image::load_from_memory(&result.bytes).expect("decode png");
    // Letter at the default canvas density, 1x multiplier.
    assert_eq!(decoded.width(), 612);
    assert_eq!(decoded.height(), 792);
    // The caller's document still carries its own page size.
    assert!((doc.page_size.width - 595.0).abs() < f32::EPSILON);
}

// ==========================================================================
// Seeded documents end to end
// ==========================================================================

#[tokio::test]
async fn test_seeded_document_exports_everywhere() {
    let content: DocumentContent = serde_json::from_value(json!({
        "cover": {
            "companyName": "Acme Corp",
            "reportTitle": "Annual Report",
            "division": "Research",
            "contactDetails": { "email": "info@acme.test" }
        },
        "sections": [
            { "title": "Overview", "content": "A fine year." },
            { "title": "Numbers", "content": ["Revenue up", "Costs down"] }
        ]
    }))
    .expect("content");

    let doc = Document::from_content("Annual Report", content, PageSize::A4);
    assert!(doc.page(0).len() >= 5);

    let pdf = export(&doc, ExportFormat::Pdf, &options("seeded"))
        .await
        .expect("pdf");
    assert_eq!(&pdf.bytes[0..5], b"%PDF-");

    let flow = export(&doc, ExportFormat::FlowText, &options("seeded"))
        .await
        .expect("doc");
    let html = String::from_utf8(flow.bytes).expect("utf8");
    assert!(html.contains("Annual Report"));
    assert!(html.contains("Overview"));
}
