//! # Easel CLI
//!
//! The server-side save path: reads a serialized document, runs the
//! export dispatcher, and writes the resulting file to disk.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use easel_core::{Document, DocumentContent};
use easel_export::{export, ExportFormat, ExportOptions};

/// Export an Easel document to one of the supported formats.
#[derive(Debug, Parser)]
#[command(name = "easel", version, about)]
struct Cli {
    /// Path to the document JSON.
    input: PathBuf,

    /// Target format: pdf, png, pptx, or docx.
    #[arg(short, long)]
    format: String,

    /// Output path. Defaults to the input stem plus the format's
    /// extension, in the current directory.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Comma-separated 0-based page indices to export (default: all).
    #[arg(long)]
    pages: Option<String>,

    /// Pixel-density multiplier for raster snapshots.
    #[arg(long, default_value_t = easel_export::DEFAULT_PIXEL_DENSITY)]
    density: f32,

    /// Path to a content-metadata JSON overriding the document's own.
    #[arg(long)]
    content: Option<PathBuf>,
}

/// Initialize structured tracing.
///
/// Set `RUST_LOG` to control log levels (default: info). Set
/// `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn parse_pages(raw: &str) -> anyhow::Result<Vec<usize>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>()
                .with_context(|| format!("Invalid page index: {part}"))
        })
        .collect()
}

/// Derive the output filename stem from the chosen output path or the
/// input filename.
fn filename_stem(cli: &Cli) -> String {
    let source: &Path = cli.output.as_deref().unwrap_or(cli.input.as_path());
    source
        .file_stem()
        .map_or_else(|| "document".to_string(), |stem| stem.to_string_lossy().into_owned())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let json = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let document = Document::from_json(&json).context("Failed to parse document JSON")?;

    let format: ExportFormat = cli
        .format
        .parse()
        .with_context(|| format!("Unsupported format tag: {}", cli.format))?;

    let content = match &cli.content {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Some(DocumentContent::from_json(&json).context("Failed to parse content JSON")?)
        }
        None => None,
    };

    let options = ExportOptions {
        filename: filename_stem(&cli),
        page_size: None,
        pixel_density: cli.density,
        pages: cli.pages.as_deref().map(parse_pages).transpose()?,
        content,
    };

    tracing::info!(
        input = %cli.input.display(),
        %format,
        pages = document.page_count(),
        "Exporting document"
    );

    let result = export(&document, format, &options).await?;

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&result.filename));
    std::fs::write(&output_path, &result.bytes)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    tracing::info!(
        output = %output_path.display(),
        mime = result.mime,
        bytes = result.bytes.len(),
        "Export complete"
    );

    Ok(())
}
