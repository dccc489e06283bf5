//! Color representation, conversion and comparison
//!
//! This module defines the tagged [`Color`] value every other component
//! consumes, along with conversions between color spaces, textual parsing,
//! the CIEDE2000 distance, WCAG contrast and named-color lookup.

pub mod contrast;
pub mod conversion;
pub mod distance;
pub mod named;
pub mod parse;

pub use contrast::{contrast_ratio, wcag_rating, WcagRating};
pub use conversion::{convert, to_hex};
pub use distance::{delta_e_lab, distance};
pub use named::{
    closest_name, named_colors, rank_similar, similar_named_colors, NamedColor, SimilarColor,
};
pub use parse::{parse_color, ParsedColor};

use serde::{Deserialize, Serialize};

/// Color spaces a [`Color`] can be expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    /// 8-bit sRGB
    Rgb8,
    /// Hue, saturation, lightness
    Hsl,
    /// Hue, saturation, value
    Hsv,
    /// Cyan, magenta, yellow, key
    Cmyk,
    /// CIE L*a*b* under D65
    Lab,
}

/// Channel values of a color, tagged with their space
///
/// Hue is in degrees `[0, 360)`; saturation, lightness, value and CMYK
/// channels are fractions in `[0, 1]`; Lab lightness is in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "space", rename_all = "lowercase")]
pub enum Channels {
    Rgb8 { r: u8, g: u8, b: u8 },
    Hsl { h: f64, s: f64, l: f64 },
    Hsv { h: f64, s: f64, v: f64 },
    Cmyk { c: f64, m: f64, y: f64, k: f64 },
    Lab { l: f64, a: f64, b: f64 },
}

/// A color value with optional alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub channels: Channels,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
}

impl Color {
    /// 8-bit sRGB color
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::opaque(Channels::Rgb8 { r, g, b })
    }

    /// HSL color; hue wraps into `[0, 360)`, fractions are clamped
    pub fn hsl(h: f64, s: f64, l: f64) -> Self {
        Self::opaque(Channels::Hsl {
            h: wrap_hue(h),
            s: s.clamp(0.0, 1.0),
            l: l.clamp(0.0, 1.0),
        })
    }

    /// HSV color; hue wraps into `[0, 360)`, fractions are clamped
    pub fn hsv(h: f64, s: f64, v: f64) -> Self {
        Self::opaque(Channels::Hsv {
            h: wrap_hue(h),
            s: s.clamp(0.0, 1.0),
            v: v.clamp(0.0, 1.0),
        })
    }

    /// CMYK color with channels clamped to `[0, 1]`
    pub fn cmyk(c: f64, m: f64, y: f64, k: f64) -> Self {
        Self::opaque(Channels::Cmyk {
            c: c.clamp(0.0, 1.0),
            m: m.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
            k: k.clamp(0.0, 1.0),
        })
    }

    /// CIE Lab color (D65)
    pub fn lab(l: f64, a: f64, b: f64) -> Self {
        Self::opaque(Channels::Lab {
            l: l.clamp(0.0, 100.0),
            a,
            b,
        })
    }

    fn opaque(channels: Channels) -> Self {
        Self {
            channels,
            alpha: None,
        }
    }

    /// Same color with the given alpha, clamped to `[0, 1]`
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: Some(alpha.clamp(0.0, 1.0)),
            ..self
        }
    }

    /// Space the channels are expressed in
    pub fn space(&self) -> ColorSpace {
        match self.channels {
            Channels::Rgb8 { .. } => ColorSpace::Rgb8,
            Channels::Hsl { .. } => ColorSpace::Hsl,
            Channels::Hsv { .. } => ColorSpace::Hsv,
            Channels::Cmyk { .. } => ColorSpace::Cmyk,
            Channels::Lab { .. } => ColorSpace::Lab,
        }
    }

    /// Convert to another space; see [`conversion::convert`]
    pub fn to_space(&self, target: ColorSpace) -> Color {
        convert(self, target)
    }

    /// 8-bit sRGB channels
    pub fn to_rgb8(&self) -> [u8; 3] {
        conversion::rgb8_channels(self)
    }

    /// Canonical `#RRGGBB` form
    pub fn to_hex(&self) -> String {
        to_hex(self)
    }

    /// CSS functional notation, `hsl(...)` for HSL colors and `rgb(...)` otherwise
    pub fn to_css_string(&self) -> String {
        match (self.channels, self.alpha) {
            (Channels::Hsl { h, s, l }, None) => {
                format!("hsl({}, {}%, {}%)", round2(h), round2(s * 100.0), round2(l * 100.0))
            }
            (Channels::Hsl { h, s, l }, Some(a)) => format!(
                "hsla({}, {}%, {}%, {})",
                round2(h),
                round2(s * 100.0),
                round2(l * 100.0),
                round2(a)
            ),
            (_, alpha) => {
                let [r, g, b] = self.to_rgb8();
                match alpha {
                    None => format!("rgb({}, {}, {})", r, g, b),
                    Some(a) => format!("rgba({}, {}, {}, {})", r, g, b, round2(a)),
                }
            }
        }
    }
}

/// A color with its canonical hex form and share of the source pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorWithMeta {
    pub color: Color,
    /// Canonical `#RRGGBB`, uppercase
    pub hex: String,
    /// Share of the sampled pixels, 0-100
    pub percentage: f64,
}

impl ColorWithMeta {
    pub fn new(color: Color, percentage: f64) -> Self {
        Self {
            hex: to_hex(&color),
            color,
            percentage,
        }
    }
}

/// Map any hue angle into `[0, 360)`
pub(crate) fn wrap_hue(h: f64) -> f64 {
    let wrapped = h.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
