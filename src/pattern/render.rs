//! Tiled pattern rendering into a caller-provided raster

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::constants::pattern::MAX_TILE_SIZE;
use crate::{ColorError, Result};

/// Something pixels can be written into
pub trait RasterTarget {
    /// Width and height in pixels
    fn dimensions(&self) -> (u32, u32);

    /// Write one RGBA8 pixel; `x < width` and `y < height`
    fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]);
}

impl RasterTarget for image::RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        image::RgbaImage::dimensions(self)
    }

    fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        image::RgbaImage::put_pixel(self, x, y, image::Rgba(rgba));
    }
}

/// Pattern shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    /// Diagonal stripes, one per tile
    Stripes,
    /// Alternating tiles
    Checkerboard,
    /// One centered dot per tile
    Dots,
    /// Lines along the top and left edge of every tile
    Grid,
}

/// Validated, immutable pattern parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPatternSettings")]
pub struct PatternSettings {
    kind: PatternKind,
    tile_size: u32,
    background_color: Color,
    element_color: Color,
    element_ratio: f64,
}

/// Unvalidated form used for deserialization
#[derive(Deserialize)]
struct RawPatternSettings {
    kind: PatternKind,
    tile_size: u32,
    background_color: Color,
    element_color: Color,
    element_ratio: f64,
}

impl TryFrom<RawPatternSettings> for PatternSettings {
    type Error = ColorError;

    fn try_from(raw: RawPatternSettings) -> Result<Self> {
        PatternSettings::new(
            raw.kind,
            raw.tile_size,
            raw.background_color,
            raw.element_color,
            raw.element_ratio,
        )
    }
}

impl PatternSettings {
    /// Create pattern settings
    ///
    /// `element_ratio` is the element's share of the tile: stripe width,
    /// dot diameter or grid line thickness.
    ///
    /// # Errors
    ///
    /// Returns `ColorError::RangeError` if `tile_size` is outside
    /// `1..=1024` or `element_ratio` outside `(0, 1]`.
    pub fn new(
        kind: PatternKind,
        tile_size: u32,
        background_color: Color,
        element_color: Color,
        element_ratio: f64,
    ) -> Result<Self> {
        if !(1..=MAX_TILE_SIZE).contains(&tile_size) {
            return Err(ColorError::range("tile_size", tile_size, "1..=1024"));
        }
        if !(element_ratio > 0.0 && element_ratio <= 1.0) {
            return Err(ColorError::range("element_ratio", element_ratio, "(0, 1]"));
        }
        Ok(Self {
            kind,
            tile_size,
            background_color,
            element_color,
            element_ratio,
        })
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    pub fn element_color(&self) -> Color {
        self.element_color
    }

    pub fn element_ratio(&self) -> f64 {
        self.element_ratio
    }

    /// Whether pixel `(x, y)` belongs to the pattern element
    fn is_element(&self, x: u32, y: u32) -> bool {
        let tile = self.tile_size;
        let tile_f = tile as f64;
        let (lx, ly) = (x % tile, y % tile);

        match self.kind {
            PatternKind::Stripes => (((x + y) % tile) as f64) < tile_f * self.element_ratio,
            PatternKind::Checkerboard => ((x / tile) + (y / tile)) % 2 == 0,
            PatternKind::Dots => {
                let radius = tile_f * self.element_ratio / 2.0;
                let dx = lx as f64 + 0.5 - tile_f / 2.0;
                let dy = ly as f64 + 0.5 - tile_f / 2.0;
                dx * dx + dy * dy <= radius * radius
            }
            PatternKind::Grid => {
                let thickness = (tile_f * self.element_ratio).ceil() as u32;
                lx < thickness || ly < thickness
            }
        }
    }
}

fn rgba_of(color: &Color) -> [u8; 4] {
    let [r, g, b] = color.to_rgb8();
    let a = (color.alpha.unwrap_or(1.0) * 255.0).round() as u8;
    [r, g, b, a]
}

/// Fill `target` with the pattern described by `settings`
///
/// Every pixel is overwritten, so the output depends only on the target's
/// size and the settings.
///
/// # Arguments
///
/// * `target` - Raster to draw into; its full extent is covered
/// * `settings` - Validated pattern parameters
pub fn render_pattern<T: RasterTarget + ?Sized>(target: &mut T, settings: &PatternSettings) {
    let background = rgba_of(&settings.background_color);
    let element = rgba_of(&settings.element_color);
    let (width, height) = target.dimensions();

    for y in 0..height {
        for x in 0..width {
            let rgba = if settings.is_element(x, y) {
                element
            } else {
                background
            };
            target.put_pixel(x, y, rgba);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    fn settings(kind: PatternKind, tile: u32, ratio: f64) -> PatternSettings {
        PatternSettings::new(kind, tile, Color::rgb8(255, 255, 255), Color::rgb8(0, 0, 0), ratio)
            .unwrap()
    }

    #[test]
    fn test_invalid_settings() {
        let bg = Color::rgb8(0, 0, 0);
        assert!(matches!(
            PatternSettings::new(PatternKind::Dots, 0, bg, bg, 0.5),
            Err(ColorError::RangeError { parameter: "tile_size", .. })
        ));
        assert!(PatternSettings::new(PatternKind::Dots, 2000, bg, bg, 0.5).is_err());
        assert!(PatternSettings::new(PatternKind::Dots, 8, bg, bg, 0.0).is_err());
        assert!(PatternSettings::new(PatternKind::Dots, 8, bg, bg, f64::NAN).is_err());
        assert!(PatternSettings::new(PatternKind::Dots, 8, bg, bg, 1.0).is_ok());
    }

    #[test]
    fn test_checkerboard() {
        let mut img = RgbaImage::new(8, 8);
        render_pattern(&mut img, &settings(PatternKind::Checkerboard, 4, 1.0));
        assert_eq!(img.get_pixel(0, 0).0, BLACK);
        assert_eq!(img.get_pixel(4, 0).0, WHITE);
        assert_eq!(img.get_pixel(4, 4).0, BLACK);
        assert_eq!(img.get_pixel(7, 3).0, WHITE);
    }

    #[test]
    fn test_dots_centered() {
        let mut img = RgbaImage::new(10, 10);
        render_pattern(&mut img, &settings(PatternKind::Dots, 10, 0.5));
        assert_eq!(img.get_pixel(5, 5).0, BLACK);
        assert_eq!(img.get_pixel(0, 0).0, WHITE);
        assert_eq!(img.get_pixel(9, 9).0, WHITE);
    }

    #[test]
    fn test_grid_lines() {
        let mut img = RgbaImage::new(8, 8);
        render_pattern(&mut img, &settings(PatternKind::Grid, 4, 0.25));
        assert_eq!(img.get_pixel(0, 2).0, BLACK);
        assert_eq!(img.get_pixel(2, 4).0, BLACK);
        assert_eq!(img.get_pixel(2, 2).0, WHITE);
    }

    #[test]
    fn test_stripes_repeat_diagonally() {
        let mut img = RgbaImage::new(8, 8);
        render_pattern(&mut img, &settings(PatternKind::Stripes, 4, 0.5));
        for y in 0..7 {
            for x in 0..7 {
                assert_eq!(img.get_pixel(x + 1, y).0, img.get_pixel(x, y + 1).0);
            }
        }
        assert_eq!(img.get_pixel(0, 0).0, BLACK);
        assert_eq!(img.get_pixel(2, 0).0, WHITE);
    }

    #[test]
    fn test_render_is_pure() {
        let s = settings(PatternKind::Dots, 6, 0.8);
        let mut first = RgbaImage::new(12, 12);
        let mut second = RgbaImage::from_pixel(12, 12, image::Rgba([9, 9, 9, 9]));
        render_pattern(&mut first, &s);
        render_pattern(&mut second, &s);
        assert_eq!(first, second);
    }

    #[test]
    fn test_alpha_is_written() {
        let s = PatternSettings::new(
            PatternKind::Checkerboard,
            2,
            Color::rgb8(0, 0, 0).with_alpha(0.0),
            Color::rgb8(255, 0, 0),
            1.0,
        )
        .unwrap();
        let mut img = RgbaImage::new(4, 4);
        render_pattern(&mut img, &s);
        assert_eq!(img.get_pixel(2, 0).0, [0, 0, 0, 0]);
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r##"{
            "kind": "dots",
            "tile_size": 0,
            "background_color": {"channels": {"space": "rgb8", "r": 0, "g": 0, "b": 0}},
            "element_color": {"channels": {"space": "rgb8", "r": 255, "g": 255, "b": 255}},
            "element_ratio": 0.5
        }"##;
        assert!(serde_json::from_str::<PatternSettings>(json).is_err());

        let ok = json.replace("\"tile_size\": 0", "\"tile_size\": 16");
        let parsed: PatternSettings = serde_json::from_str(&ok).unwrap();
        assert_eq!(parsed.tile_size(), 16);
        assert_eq!(parsed.kind(), PatternKind::Dots);
    }
}
