//! # Chroma Kit
//!
//! A Rust crate for color science: converting, comparing, extracting and
//! generating colors.
//!
//! This library provides:
//! - Conversions between RGB, HSL, HSV, CMYK and CIE Lab (D65)
//! - Parsing of hex, `rgb()`/`rgba()` and `hsl()`/`hsla()` notation
//! - Perceptual distance (CIEDE2000) and named-color similarity
//! - Dominant-color extraction from RGBA pixel buffers
//! - Tone/family classification and derived brand, UI and creative palettes
//! - Tiled pattern rendering and WCAG contrast checks
//!
//! ## Example
//!
//! ```rust,no_run
//! use chroma_kit::{extract_palette, generate_palettes, image_loader, ExtractionOptions};
//! use std::path::Path;
//!
//! let image = image_loader::load_image(Path::new("photo.jpg"))?;
//! let palette = extract_palette(image.as_raw(), &ExtractionOptions::default())?;
//! let derived = generate_palettes(&palette.dominant)?;
//! println!("Primary: {}, accent: {}", derived.ui.primary, derived.ui.accent);
//! # Ok::<(), chroma_kit::ColorError>(())
//! ```

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod extraction;
pub mod image_loader;
pub mod palettes;
pub mod pattern;

pub use color::{
    closest_name, contrast_ratio, convert, delta_e_lab, distance, named_colors, parse_color,
    rank_similar, similar_named_colors, to_hex, wcag_rating, Channels, Color, ColorSpace,
    ColorWithMeta, NamedColor, SimilarColor, WcagRating,
};
pub use config::ToolkitConfig;
pub use error::{ColorError, ParseError, Result};
pub use extraction::{
    extract_palette, extract_palette_from_image, ExtractedPalette, ExtractionOptions,
    ExtractionWorker, PaletteExtractor,
};
pub use palettes::{
    classify, generate_palettes, generate_palettes_with_extended, group_colors, ColorGroups,
    ColorTags, GeneratedPalettes, UiPalette,
};
pub use pattern::{render_pattern, PatternHistory, PatternKind, PatternSettings, RasterTarget};
