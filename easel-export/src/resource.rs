//! Image source resolution.
//!
//! Elements reference images as `data:` URIs or external URLs; exporters
//! resolve either to raw bytes here. Fetching is the only suspending step
//! in the whole engine. Encoding detection goes by magic bytes, never by
//! the source string, so a remote PNG behind an unhelpful URL still
//! embeds correctly.

use base64::Engine;

use crate::error::{ExportError, ExportResult};

/// Image encodings the engine can recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEncoding {
    /// PNG with alpha support.
    Png,
    /// JPEG (no alpha).
    Jpeg,
    /// WebP (recognized, but not embeddable in the vector document).
    WebP,
    /// Unknown/other encoding.
    Unknown,
}

impl ImageEncoding {
    /// Detect encoding from magic bytes.
    #[must_use]
    pub fn from_magic_bytes(data: &[u8]) -> Self {
        if data.len() < 4 {
            return Self::Unknown;
        }

        // PNG: 89 50 4E 47
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Self::Png;
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Self::Jpeg;
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Self::WebP;
        }

        Self::Unknown
    }

    /// The MIME type for this encoding, if it has one.
    #[must_use]
    pub fn mime(&self) -> Option<&'static str> {
        match self {
            Self::Png => Some("image/png"),
            Self::Jpeg => Some("image/jpeg"),
            Self::WebP => Some("image/webp"),
            Self::Unknown => None,
        }
    }
}

/// Resolve an image source reference to raw bytes.
///
/// Supports `data:` URIs and `http(s)` URLs.
///
/// # Errors
///
/// Returns [`ExportError::Resource`] for malformed data URIs, unsupported
/// schemes, or failed fetches.
pub async fn resolve_image_source(src: &str) -> ExportResult<Vec<u8>> {
    if src.starts_with("data:") {
        return decode_data_uri(src);
    }

    if src.starts_with("http://") || src.starts_with("https://") {
        let response = reqwest::get(src)
            .await
            .map_err(|e| ExportError::Resource(format!("Failed to fetch {src}: {e}")))?
            .error_for_status()
            .map_err(|e| ExportError::Resource(format!("Failed to fetch {src}: {e}")))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ExportError::Resource(format!("Failed to read {src}: {e}")))?;
        return Ok(bytes.to_vec());
    }

    Err(ExportError::Resource(format!(
        "Unsupported image source scheme: {src}"
    )))
}

/// Decode a `data:` URI payload.
///
/// Supports forms like `data:image/png;base64,iVBORw0KGgo...` and
/// percent-encoded payloads without the `;base64` marker.
///
/// # Errors
///
/// Returns [`ExportError::Resource`] if the URI is malformed.
pub fn decode_data_uri(uri: &str) -> ExportResult<Vec<u8>> {
    let uri_data = uri
        .strip_prefix("data:")
        .ok_or_else(|| ExportError::Resource("Not a data URI".to_string()))?;

    let comma_pos = uri_data
        .find(',')
        .ok_or_else(|| ExportError::Resource("Invalid data URI: missing comma".to_string()))?;

    let metadata = &uri_data[..comma_pos];
    let encoded = &uri_data[comma_pos + 1..];

    if metadata.contains(";base64") {
        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| ExportError::Resource(format!("Failed to decode base64: {e}")))
    } else {
        percent_decode(encoded)
    }
}

/// Encode bytes as a base64 `data:` URI with the given MIME type.
#[must_use]
pub fn encode_data_uri(bytes: &[u8], mime: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{encoded}")
}

/// Simple percent-encoding decode.
fn percent_decode(input: &str) -> ExportResult<Vec<u8>> {
    let mut result = Vec::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '%' {
            let hex: String = chars.by_ref().take(2).collect();
            if hex.len() == 2 {
                if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                    result.push(byte);
                    continue;
                }
            }
            return Err(ExportError::Resource("Invalid URL encoding".to_string()));
        }
        result.push(c as u8);
    }

    Ok(result)
}
