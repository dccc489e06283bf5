//! Derived palettes built from a set of dominant colors
//!
//! - Brand: tints and shades of each dominant color, interpolated in Lab
//! - UI: primary, surface, accent and three neutrals
//! - Creative: complementary and triadic rotations, de-duplicated

use std::collections::HashSet;

use palette::{white_point::D65, Lab, Mix};
use serde::{Deserialize, Serialize};

use super::classify::tone_of;
use super::ColorTags;
use crate::color::conversion::{hsl_of, lab_of, lab_to_rgbf, rgbf_to_color};
use crate::color::{Color, ColorWithMeta};
use crate::constants::generation::*;
use crate::{ColorError, Result};

/// Interface colors derived from the dominant palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiPalette {
    pub primary: String,
    pub surface: String,
    pub accent: String,
    /// Dark, medium and light neutral
    pub neutral: [String; 3],
}

/// All derived palettes, as canonical hex strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPalettes {
    pub brand: Vec<String>,
    pub ui: UiPalette,
    pub creative: Vec<String>,
}

/// Generate brand, UI and creative palettes from dominant colors
///
/// # Arguments
///
/// * `dominant` - Extracted dominant colors, most frequent first
///
/// # Returns
///
/// Ten brand shades per dominant color, a UI palette and the de-duplicated
/// creative rotations
///
/// # Errors
///
/// Returns `ColorError::EmptyInput` if `dominant` is empty.
pub fn generate_palettes(dominant: &[ColorWithMeta]) -> Result<GeneratedPalettes> {
    generate_palettes_with_extended(dominant, &[])
}

/// Like [`generate_palettes`], also searching `extended` for a surface color
pub fn generate_palettes_with_extended(
    dominant: &[ColorWithMeta],
    extended: &[ColorWithMeta],
) -> Result<GeneratedPalettes> {
    let primary = pick_primary(dominant)
        .ok_or_else(|| ColorError::empty_input("no dominant colors to derive palettes from"))?;
    let (h, s, l) = hsl_of(&primary.color);

    let [dark, medium, light] = NEUTRAL_LIGHTNESS_LEVELS;
    let neutral_saturation = s * NEUTRAL_SATURATION_FACTOR;
    let ui = UiPalette {
        primary: primary.hex.clone(),
        surface: pick_surface(dominant, extended),
        accent: Color::hsl(h + 180.0, s, l).to_hex(),
        neutral: [
            Color::hsl(h, neutral_saturation, dark).to_hex(),
            Color::hsl(h, neutral_saturation, medium).to_hex(),
            Color::hsl(h, neutral_saturation, light).to_hex(),
        ],
    };

    Ok(GeneratedPalettes {
        brand: dominant.iter().flat_map(|c| brand_shades(&c.color)).collect(),
        ui,
        creative: creative_palette(dominant),
    })
}

/// Five tints then five shades of `color`, lightest first
///
/// Step `i` moves `i / 6` of the way toward white or black in Lab. Unless
/// `color` is itself pure white or black, every channel is then kept within
/// `1..=254` so no shade collapses onto `#FFFFFF` or `#000000`.
///
/// # Arguments
///
/// * `color` - Source color, in any space
///
/// # Returns
///
/// Ten uppercase `#RRGGBB` strings: tints from lightest, then shades to darkest
pub fn brand_shades(color: &Color) -> Vec<String> {
    let lab = lab_of(color);
    let white: Lab<D65, f64> = Lab::new(100.0, 0.0, 0.0);
    let black: Lab<D65, f64> = Lab::new(0.0, 0.0, 0.0);
    let factor = |i: usize| i as f64 / BRAND_SHADE_DIVISOR;
    let extreme = matches!(color.to_rgb8(), [0, 0, 0] | [255, 255, 255]);

    let tints = (1..=BRAND_SHADE_STEPS).rev().map(|i| lab.mix(white, factor(i)));
    let shades = (1..=BRAND_SHADE_STEPS).map(|i| lab.mix(black, factor(i)));

    tints
        .chain(shades)
        .map(|shade| {
            let [r, g, b] = rgbf_to_color(lab_to_rgbf(shade)).to_rgb8();
            if extreme {
                Color::rgb8(r, g, b).to_hex()
            } else {
                let inner = |c: u8| c.clamp(BRAND_CHANNEL_MIN, BRAND_CHANNEL_MAX);
                Color::rgb8(inner(r), inner(g), inner(b)).to_hex()
            }
        })
        .collect()
}

/// Complement and triadic rotations of every color, first occurrence kept
pub fn creative_palette(colors: &[ColorWithMeta]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut creative = Vec::new();

    for color in colors {
        let (h, s, l) = hsl_of(&color.color);
        for rotation in CREATIVE_ROTATIONS {
            let hex = Color::hsl(h + rotation, s, l).to_hex();
            if seen.insert(hex.clone()) {
                creative.push(hex);
            }
        }
    }

    creative
}

/// Most saturated mid-tone color, or the most saturated overall
fn pick_primary(dominant: &[ColorWithMeta]) -> Option<&ColorWithMeta> {
    let saturation = |c: &ColorWithMeta| hsl_of(&c.color).1;
    // strict comparison keeps the earliest color on ties
    let most_saturated = |best: &ColorWithMeta, c: &ColorWithMeta| saturation(c) > saturation(best);

    dominant
        .iter()
        .filter(|c| tone_of(hsl_of(&c.color).2) == ColorTags::MID)
        .reduce(|best, c| if most_saturated(best, c) { c } else { best })
        .or_else(|| {
            dominant
                .iter()
                .reduce(|best, c| if most_saturated(best, c) { c } else { best })
        })
}

/// Lightest near-neutral light color among dominant then extended
fn pick_surface(dominant: &[ColorWithMeta], extended: &[ColorWithMeta]) -> String {
    dominant
        .iter()
        .chain(extended)
        .map(|c| (c, hsl_of(&c.color)))
        .filter(|(_, (_, s, l))| *s < SURFACE_MAX_SATURATION && *l > SURFACE_MIN_LIGHTNESS)
        .reduce(|best, candidate| if candidate.1 .2 > best.1 .2 { candidate } else { best })
        .map(|(c, _)| c.hex.clone())
        .unwrap_or_else(|| FALLBACK_SURFACE_HEX.to_string())
}
