//! Raster-snapshot exporter.
//!
//! Snapshots pages off the renderable surface at a pixel-density
//! multiplier and encodes PNG. A single requested page yields one image;
//! multiple pages yield a ZIP archive with one entry per page, named by
//! 1-based page number. Each page's snapshot comes from a fresh surface
//! render of that page's own elements.

use std::io::{Cursor, Write};

use easel_core::Document;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::error::{ExportError, ExportResult};
use crate::surface::render_page_svg;

/// Default pixel-density multiplier for snapshots.
pub const DEFAULT_PIXEL_DENSITY: f32 = 2.0;

/// The outcome of a raster export.
#[derive(Debug, Clone)]
pub enum RasterOutput {
    /// A single PNG image.
    Png(Vec<u8>),
    /// A ZIP archive of per-page PNG images.
    Archive(Vec<u8>),
}

impl RasterOutput {
    /// The encoded bytes, whichever shape they took.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Png(bytes) | Self::Archive(bytes) => bytes,
        }
    }

    /// Whether this output is an archive of pages.
    #[must_use]
    pub fn is_archive(&self) -> bool {
        matches!(self, Self::Archive(_))
    }
}

/// Export the requested pages as PNG snapshot(s).
///
/// # Errors
///
/// Returns an input error for out-of-range pages, a resource error if an
/// image source cannot be inlined, and an encode/archive error if PNG or
/// ZIP serialization fails.
pub async fn export_raster(
    document: &Document,
    pages: &[usize],
    pixel_density: f32,
) -> ExportResult<RasterOutput> {
    match pages {
        [] => Err(ExportError::NoContent("no pages requested".to_string())),
        [single] => Ok(RasterOutput::Png(
            snapshot_page(document, *single, pixel_density).await?,
        )),
        many => {
            let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
            let entry_options = SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Deflated);

            for &index in many {
                // Re-render the surface for this page before snapshotting;
                // reusing the previously rendered surface would duplicate
                // one page across every archive entry.
                let png = snapshot_page(document, index, pixel_density).await?;
                zip.start_file(format!("page-{}.png", index + 1), entry_options)?;
                zip.write_all(&png)?;
            }

            let cursor = zip.finish()?;
            Ok(RasterOutput::Archive(cursor.into_inner()))
        }
    }
}

/// Snapshot one page: render the surface, rasterize, encode PNG.
async fn snapshot_page(
    document: &Document,
    page_index: usize,
    pixel_density: f32,
) -> ExportResult<Vec<u8>> {
    let svg = render_page_svg(document, page_index, pixel_density).await?;
    let pixmap = rasterize_svg(&svg)?;
    pixmap
        .encode_png()
        .map_err(|e| ExportError::encode("raster", format!("PNG encoding failed: {e}")))
}

/// Rasterize an SVG string to a tiny-skia pixmap.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rasterize_svg(svg: &str) -> ExportResult<tiny_skia::Pixmap> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|e| ExportError::encode("raster", format!("SVG parsing failed: {e}")))?;

    let width = tree.size().width() as u32;
    let height = tree.size().height() as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width.max(1), height.max(1))
        .ok_or_else(|| ExportError::encode("raster", "Failed to create pixmap"))?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    Ok(pixmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_core::{Element, ElementKind, PageSize, TextAlign, TextDecoration};

    fn text_element(content: &str) -> Element {
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
        .at(10.0, 20.0)
    }

    #[tokio::test]
    async fn test_single_page_is_png() {
        let mut doc = Document::new("Snapshot", PageSize::custom(100.0, 100.0));
        doc.add_element(0, text_element("Test")).expect("insert");

        let output = export_raster(&doc, &[0], 1.0).await.expect("raster");
        assert!(!output.is_archive());
        let bytes = output.into_bytes();
        // PNG magic bytes.
        assert_eq!(&bytes[0..4], &[137, 80, 78, 71]);
    }

    #[tokio::test]
    async fn test_density_scales_pixel_dimensions() {
        let doc = Document::new("Density", PageSize::custom(100.0, 50.0));

        let output = export_raster(&doc, &[0], 2.0).await.expect("raster");
        let decoded =
            image::load_from_memory(&output.into_bytes()).expect("decode snapshot");
        assert_eq!(decoded.width(), 200);
        assert_eq!(decoded.height(), 100);
    }

    #[tokio::test]
    async fn test_multi_page_archive_entries() {
        let mut doc = Document::new("Pages", PageSize::custom(100.0, 100.0));
        doc.add_element(0, text_element("First page")).expect("insert");
        doc.add_page();
        doc.add_element(1, text_element("Second page")).expect("insert");

        let output = export_raster(&doc, &[0, 1], 1.0).await.expect("raster");
        assert!(output.is_archive());

        let mut archive =
            zip::ZipArchive::new(Cursor::new(output.into_bytes())).expect("open archive");
        assert_eq!(archive.len(), 2);
        assert!(archive.by_name("page-1.png").is_ok());
        assert!(archive.by_name("page-2.png").is_ok());
    }

    #[tokio::test]
    async fn test_pages_render_their_own_elements() {
        use std::io::Read;

        // Regression: snapshotting N pages must not produce N copies of
        // the displayed page.
        let mut doc = Document::new("Distinct", PageSize::custom(120.0, 60.0));
        doc.add_element(0, text_element("alpha")).expect("insert");
        doc.add_page();
        doc.add_element(
            1,
            Element::new(ElementKind::Rect {
                fill: "#3b82f6".to_string(),
                stroke: "#1e40af".to_string(),
                stroke_width: 2.0,
            })
            .at(5.0, 5.0)
            .sized(100.0, 40.0),
        )
        .expect("insert");

        let output = export_raster(&doc, &[0, 1], 1.0).await.expect("raster");
        let mut archive =
            zip::ZipArchive::new(Cursor::new(output.into_bytes())).expect("open archive");

        let mut first = Vec::new();
        archive
            .by_name("page-1.png")
            .expect("entry")
            .read_to_end(&mut first)
            .expect("read");
        let mut second = Vec::new();
        archive
            .by_name("page-2.png")
            .expect("entry")
            .read_to_end(&mut second)
            .expect("read");

        assert_ne!(first, second, "each page must be its own render");
    }

    #[tokio::test]
    async fn test_out_of_range_page_rejected() {
        let doc = Document::new("One", PageSize::custom(50.0, 50.0));
        let err = export_raster(&doc, &[2], 1.0).await.expect_err("missing");
        assert!(matches!(err, ExportError::MissingPage(2)));
    }

    #[tokio::test]
    async fn test_no_pages_rejected() {
        let doc = Document::new("None", PageSize::custom(50.0, 50.0));
        let err = export_raster(&doc, &[], 1.0).await.expect_err("empty");
        assert!(matches!(err, ExportError::NoContent(_)));
    }
}
