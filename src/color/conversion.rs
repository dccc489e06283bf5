//! Color space conversion utilities
//!
//! Provides conversions between the supported color spaces:
//! - RGB8 to/from HSL, HSV and CMYK (algebraic formulas)
//! - sRGB to/from CIE Lab under D65 (via linear RGB and XYZ)
//! - Hex color representation
//!
//! Every conversion goes through an unrounded floating-point sRGB
//! intermediate. Results are rounded only when handed back to the caller,
//! so chained conversions do not accumulate rounding error.

use palette::{white_point::D65, FromColor, Lab, Srgb};

use super::{wrap_hue, Channels, Color, ColorSpace};
use crate::constants::precision::{FRACTION_SCALE, HUE_SCALE, LAB_SCALE};

/// Unrounded sRGB in `[0, 1]` per channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Rgbf {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Convert a color into `target`
///
/// Converting into the color's own space returns it unchanged. Alpha is
/// carried over. Achromatic colors get hue 0.
///
/// # Arguments
///
/// * `color` - Source color in any space
/// * `target` - Space to express it in
///
/// # Returns
///
/// The converted color, with hue rounded to 0.01°, fractions to 1e-4 and
/// Lab components to 0.01
pub fn convert(color: &Color, target: ColorSpace) -> Color {
    if color.space() == target {
        return *color;
    }

    Color {
        channels: from_rgbf(srgb_of(color), target),
        alpha: color.alpha,
    }
}

/// Canonical uppercase `#RRGGBB` form of any color
pub fn to_hex(color: &Color) -> String {
    let [r, g, b] = rgb8_channels(color);
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

pub(crate) fn rgb8_channels(color: &Color) -> [u8; 3] {
    match color.channels {
        Channels::Rgb8 { r, g, b } => [r, g, b],
        _ => {
            let rgb = srgb_of(color);
            [to_u8(rgb.r), to_u8(rgb.g), to_u8(rgb.b)]
        }
    }
}

/// Unrounded sRGB of any color
pub(crate) fn srgb_of(color: &Color) -> Rgbf {
    match color.channels {
        Channels::Rgb8 { r, g, b } => Rgbf {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        },
        Channels::Hsl { h, s, l } => hsl_to_rgb(h, s, l),
        Channels::Hsv { h, s, v } => hsv_to_rgb(h, s, v),
        Channels::Cmyk { c, m, y, k } => Rgbf {
            r: (1.0 - c) * (1.0 - k),
            g: (1.0 - m) * (1.0 - k),
            b: (1.0 - y) * (1.0 - k),
        },
        Channels::Lab { l, a, b } => lab_to_rgbf(Lab::new(l, a, b)),
    }
}

/// Unrounded Lab (D65) of any color
pub(crate) fn lab_of(color: &Color) -> Lab<D65, f64> {
    match color.channels {
        Channels::Lab { l, a, b } => Lab::new(l, a, b),
        _ => rgbf_to_lab(srgb_of(color)),
    }
}

/// Unrounded HSL of any color as `(hue, saturation, lightness)`
pub(crate) fn hsl_of(color: &Color) -> (f64, f64, f64) {
    match color.channels {
        Channels::Hsl { h, s, l } => (h, s, l),
        _ => rgb_to_hsl(srgb_of(color)),
    }
}

pub(crate) fn rgbf_to_lab(rgb: Rgbf) -> Lab<D65, f64> {
    Lab::from_color(Srgb::new(rgb.r, rgb.g, rgb.b))
}

/// Lab to sRGB, clamped to the sRGB gamut
pub(crate) fn lab_to_rgbf(lab: Lab<D65, f64>) -> Rgbf {
    let srgb: Srgb<f64> = Srgb::from_color(lab);
    Rgbf {
        r: srgb.red.clamp(0.0, 1.0),
        g: srgb.green.clamp(0.0, 1.0),
        b: srgb.blue.clamp(0.0, 1.0),
    }
}

pub(crate) fn rgbf_to_color(rgb: Rgbf) -> Color {
    Color::rgb8(to_u8(rgb.r), to_u8(rgb.g), to_u8(rgb.b))
}

fn from_rgbf(rgb: Rgbf, target: ColorSpace) -> Channels {
    match target {
        ColorSpace::Rgb8 => Channels::Rgb8 {
            r: to_u8(rgb.r),
            g: to_u8(rgb.g),
            b: to_u8(rgb.b),
        },
        ColorSpace::Hsl => {
            let (h, s, l) = rgb_to_hsl(rgb);
            Channels::Hsl {
                h: round_hue(h),
                s: round_scaled(s, FRACTION_SCALE),
                l: round_scaled(l, FRACTION_SCALE),
            }
        }
        ColorSpace::Hsv => {
            let (h, s, v) = rgb_to_hsv(rgb);
            Channels::Hsv {
                h: round_hue(h),
                s: round_scaled(s, FRACTION_SCALE),
                v: round_scaled(v, FRACTION_SCALE),
            }
        }
        ColorSpace::Cmyk => {
            let [c, m, y, k] = rgb_to_cmyk(rgb);
            Channels::Cmyk {
                c: round_scaled(c, FRACTION_SCALE),
                m: round_scaled(m, FRACTION_SCALE),
                y: round_scaled(y, FRACTION_SCALE),
                k: round_scaled(k, FRACTION_SCALE),
            }
        }
        ColorSpace::Lab => {
            let lab = rgbf_to_lab(rgb);
            Channels::Lab {
                l: round_scaled(lab.l, LAB_SCALE),
                a: round_scaled(lab.a, LAB_SCALE),
                b: round_scaled(lab.b, LAB_SCALE),
            }
        }
    }
}

/// Hue in degrees shared by HSL and HSV; 0 when `max == min`
fn hue_of(rgb: Rgbf, max: f64, delta: f64) -> f64 {
    if delta == 0.0 {
        return 0.0;
    }
    let h = if max == rgb.r {
        ((rgb.g - rgb.b) / delta).rem_euclid(6.0)
    } else if max == rgb.g {
        (rgb.b - rgb.r) / delta + 2.0
    } else {
        (rgb.r - rgb.g) / delta + 4.0
    };
    wrap_hue(h * 60.0)
}

pub(crate) fn rgb_to_hsl(rgb: Rgbf) -> (f64, f64, f64) {
    let max = rgb.r.max(rgb.g).max(rgb.b);
    let min = rgb.r.min(rgb.g).min(rgb.b);
    let delta = max - min;
    let l = (max + min) / 2.0;

    if delta == 0.0 {
        return (0.0, 0.0, l);
    }

    let s = (delta / (1.0 - (2.0 * l - 1.0).abs())).min(1.0);
    (hue_of(rgb, max, delta), s, l)
}

pub(crate) fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgbf {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let m = l - c / 2.0;
    chroma_to_rgb(h, c, m)
}

fn rgb_to_hsv(rgb: Rgbf) -> (f64, f64, f64) {
    let max = rgb.r.max(rgb.g).max(rgb.b);
    let min = rgb.r.min(rgb.g).min(rgb.b);
    let delta = max - min;
    let s = if max == 0.0 { 0.0 } else { delta / max };
    (hue_of(rgb, max, delta), s, max)
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgbf {
    let c = v * s;
    chroma_to_rgb(h, c, v - c)
}

/// Rebuild RGB from hue, chroma and the lightness offset `m`
fn chroma_to_rgb(h: f64, c: f64, m: f64) -> Rgbf {
    let hp = wrap_hue(h) / 60.0;
    let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    Rgbf {
        r: (r + m).clamp(0.0, 1.0),
        g: (g + m).clamp(0.0, 1.0),
        b: (b + m).clamp(0.0, 1.0),
    }
}

fn rgb_to_cmyk(rgb: Rgbf) -> [f64; 4] {
    let k = 1.0 - rgb.r.max(rgb.g).max(rgb.b);
    if k >= 1.0 {
        return [0.0, 0.0, 0.0, 1.0];
    }
    [
        (1.0 - rgb.r - k) / (1.0 - k),
        (1.0 - rgb.g - k) / (1.0 - k),
        (1.0 - rgb.b - k) / (1.0 - k),
        k,
    ]
}

fn to_u8(x: f64) -> u8 {
    (x * 255.0).round().clamp(0.0, 255.0) as u8
}

fn round_scaled(x: f64, scale: f64) -> f64 {
    (x * scale).round() / scale
}

fn round_hue(h: f64) -> f64 {
    wrap_hue(round_scaled(h, HUE_SCALE))
}
