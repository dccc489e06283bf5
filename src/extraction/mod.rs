//! Palette extraction from raster pixel data
//!
//! This module finds the dominant colors of an image and can run that work
//! on a background thread where only the most recent request is kept.

pub mod extractor;
pub mod worker;

pub use extractor::{
    extract_palette, extract_palette_from_image, ExtractedPalette, ExtractionOptions,
    PaletteExtractor,
};
pub use worker::ExtractionWorker;
