//! WCAG 2.x contrast ratio between a foreground and background color

use palette::color_difference::Wcag21RelativeContrast;
use palette::Srgb;
use serde::{Deserialize, Serialize};

use super::conversion::srgb_of;
use super::Color;
use crate::constants::contrast::{AAA_LARGE, AAA_NORMAL, AA_LARGE, AA_NORMAL};

/// Which WCAG success criteria a contrast ratio satisfies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WcagRating {
    pub aa_normal: bool,
    pub aa_large: bool,
    pub aaa_normal: bool,
    pub aaa_large: bool,
}

fn srgb(color: &Color) -> Srgb<f64> {
    let rgb = srgb_of(color);
    Srgb::new(rgb.r, rgb.g, rgb.b)
}

/// Relative luminance as defined by WCAG 2.1
pub fn relative_luminance(color: &Color) -> f64 {
    srgb(color).relative_luminance().luma
}

/// Contrast ratio between two colors
///
/// # Arguments
///
/// * `a` - Foreground or background color
/// * `b` - The other color; argument order does not matter
///
/// # Returns
///
/// `(lighter + 0.05) / (darker + 0.05)`, in `[1, 21]`
pub fn contrast_ratio(a: &Color, b: &Color) -> f64 {
    srgb(a).relative_contrast(srgb(b))
}

/// Grade a contrast ratio; thresholds are inclusive
pub fn wcag_rating(ratio: f64) -> WcagRating {
    WcagRating {
        aa_normal: ratio >= AA_NORMAL,
        aa_large: ratio >= AA_LARGE,
        aaa_normal: ratio >= AAA_NORMAL,
        aaa_large: ratio >= AAA_LARGE,
    }
}
