//! Image ingestion
//!
//! Uploaded images are embedded directly in the document as base64 data
//! URIs, so a saved project never refers to files outside the store.

use crate::document_model::Size;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Image formats accepted for upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
    Svg,
}

impl ImageFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Webp => "image/webp",
            ImageFormat::Svg => "image/svg+xml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::Webp),
            "svg" => Some(ImageFormat::Svg),
            _ => None,
        }
    }

    /// Determine format from the leading bytes
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        match imagesize::image_type(bytes) {
            Ok(imagesize::ImageType::Png) => Some(ImageFormat::Png),
            Ok(imagesize::ImageType::Jpeg) => Some(ImageFormat::Jpeg),
            Ok(imagesize::ImageType::Gif) => Some(ImageFormat::Gif),
            Ok(imagesize::ImageType::Webp) => Some(ImageFormat::Webp),
            _ if looks_like_svg(bytes) => Some(ImageFormat::Svg),
            _ => None,
        }
    }
}

/// Errors that can occur while ingesting an image
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("failed to read image {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported image format")]
    UnsupportedFormat,
}

/// An image ready to be placed into a document
#[derive(Debug, Clone, PartialEq)]
pub struct IngestedImage {
    pub format: ImageFormat,
    /// `data:<mime>;base64,...`
    pub data_uri: String,
    /// Pixel dimensions, when the format header carries them
    pub natural_size: Option<Size>,
}

/// Encode bytes as a data URI of the given format
pub fn data_uri(bytes: &[u8], format: ImageFormat) -> String {
    format!("data:{};base64,{}", format.mime_type(), STANDARD.encode(bytes))
}

/// Ingest image bytes
///
/// # Parameters
/// * `bytes` - Raw file content
/// * `hint` - File name used when the content itself is not recognised
///
/// # Returns
/// * `Ok(IngestedImage)` - The encoded image
/// * `Err(IngestError)` - The content is not a supported image
pub fn ingest_bytes(bytes: &[u8], hint: Option<&Path>) -> Result<IngestedImage, IngestError> {
    let format = ImageFormat::sniff(bytes)
        .or_else(|| hint.and_then(ImageFormat::from_path))
        .ok_or(IngestError::UnsupportedFormat)?;

    let natural_size = match imagesize::blob_size(bytes) {
        Ok(size) if size.width > 0 && size.height > 0 => {
            Some(Size::new(size.width as f64, size.height as f64))
        }
        _ => None,
    };

    Ok(IngestedImage {
        format,
        data_uri: data_uri(bytes, format),
        natural_size,
    })
}

/// Read and ingest an image file
pub fn ingest_file(path: &Path) -> Result<IngestedImage, IngestError> {
    let bytes = fs::read(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let image = ingest_bytes(&bytes, Some(path))?;
    log::info!(
        "Ingested {} ({}, {} bytes)",
        path.display(),
        image.format.mime_type(),
        bytes.len()
    );
    Ok(image)
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let text = String::from_utf8_lossy(head);
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 1x1 transparent PNG
    const PIXEL_PNG: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    #[test]
    fn test_png_is_detected_and_sized() {
        let image = ingest_bytes(PIXEL_PNG, None).unwrap();
        assert_eq!(image.format, ImageFormat::Png);
        assert!(image.data_uri.starts_with("data:image/png;base64,iVBORw0KGgo"));
        assert_eq!(image.natural_size, Some(Size::new(1.0, 1.0)));
    }

    #[test]
    fn test_svg_is_detected_by_content() {
        let svg = br#"<?xml version="1.0"?><svg xmlns="http://www.w3.org/2000/svg"/>"#;
        let image = ingest_bytes(svg, None).unwrap();
        assert_eq!(image.format, ImageFormat::Svg);
        assert!(image.data_uri.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn test_unknown_content_is_rejected() {
        assert!(matches!(
            ingest_bytes(b"plain text", None),
            Err(IngestError::UnsupportedFormat)
        ));
    }

    #[test]
    fn test_extension_hint_is_a_fallback() {
        let image = ingest_bytes(b"<!-- icon -->", Some(Path::new("logo.SVG"))).unwrap();
        assert_eq!(image.format, ImageFormat::Svg);
    }

    #[test]
    fn test_ingest_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.png");
        fs::write(&path, PIXEL_PNG).unwrap();
        assert_eq!(ingest_file(&path).unwrap().format, ImageFormat::Png);
        assert!(matches!(
            ingest_file(&dir.path().join("missing.png")),
            Err(IngestError::Io { .. })
        ));
    }
}
