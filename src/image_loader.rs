//! Image decoding into RGBA8 buffers for palette extraction
//!
//! ## Supported Formats
//!
//! Via the `image` crate: PNG and JPEG.
//!
//! All images are converted to 8-bit RGBA so the extractor sees one pixel
//! layout regardless of the source format. JPEG input comes out fully
//! opaque.

use std::io::Cursor;
use std::path::Path;

use image::{ImageReader, RgbaImage};

use crate::error::{ColorError, Result};

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG image
    Jpeg,
    /// PNG image
    Png,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            _ => None,
        }
    }
}

/// Load an image from disk as RGBA8
///
/// # Errors
///
/// Returns `ColorError::ImageLoadError` if the extension is unknown, the
/// file cannot be opened or decoding fails.
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    if ImageFormat::from_extension(path).is_none() {
        return Err(ColorError::ImageLoadError {
            message: format!("Unknown image format for file: {}", path.display()),
            source: None,
        });
    }

    let reader = ImageReader::open(path).map_err(|e| {
        ColorError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;

    let img = reader.decode().map_err(|e| {
        ColorError::image_load(format!("Failed to decode image: {}", path.display()), e)
    })?;

    log::debug!("Loaded {} ({}x{})", path.display(), img.width(), img.height());
    Ok(img.to_rgba8())
}

/// Decode an in-memory image (e.g. an upload) as RGBA8
pub fn load_image_from_memory(bytes: &[u8]) -> Result<RgbaImage> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ColorError::image_load("Failed to read image data", e))?;

    let img = reader
        .decode()
        .map_err(|e| ColorError::image_load("Failed to decode image data", e))?;

    Ok(img.to_rgba8())
}

/// Get list of all supported file extensions
pub fn supported_extensions() -> &'static [&'static str] {
    &["jpg", "jpeg", "png"]
}

/// Check if a file extension is supported
pub fn is_supported_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    supported_extensions().contains(&ext_lower.as_str())
}
