//! Tone and family classification of colors
//!
//! Every color receives exactly one tone tag and one or more family tags.
//! Thresholds come from [`crate::constants::classification`] and are
//! evaluated on unrounded HSL:
//!
//! | tag | rule |
//! |---|---|
//! | dark | L < 0.35 |
//! | mid | 0.35 ≤ L ≤ 0.70 |
//! | light | L > 0.70 |
//! | neutral | S < 0.10 |
//! | warm | not neutral, H ≥ 330 or H < 150 |
//! | cold | not neutral, 150 ≤ H < 330 |
//! | vibrant | S ≥ 0.60 and 0.30 ≤ L ≤ 0.70 |
//! | muted | S < 0.35 |
//! | pastel | 0.20 ≤ S ≤ 0.60 and L > 0.75 |
//! | earth | 15 ≤ H ≤ 50, 0.10 ≤ S < 0.50, L < 0.60 |

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::color::conversion::hsl_of;
use crate::color::{Color, ColorWithMeta};
use crate::constants::classification::*;

bitflags! {
    /// Set of bucket tags a color belongs to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ColorTags: u16 {
        const LIGHT = 1 << 0;
        const MID = 1 << 1;
        const DARK = 1 << 2;
        const WARM = 1 << 3;
        const COLD = 1 << 4;
        const NEUTRAL = 1 << 5;
        const VIBRANT = 1 << 6;
        const MUTED = 1 << 7;
        const PASTEL = 1 << 8;
        const EARTH = 1 << 9;

        const TONES = Self::LIGHT.bits() | Self::MID.bits() | Self::DARK.bits();
        const FAMILIES = Self::WARM.bits()
            | Self::COLD.bits()
            | Self::NEUTRAL.bits()
            | Self::VIBRANT.bits()
            | Self::MUTED.bits()
            | Self::PASTEL.bits()
            | Self::EARTH.bits();
    }
}

/// Colors grouped by bucket; a color appears in every bucket it is tagged with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorGroups {
    pub light: Vec<ColorWithMeta>,
    pub mid: Vec<ColorWithMeta>,
    pub dark: Vec<ColorWithMeta>,
    pub warm: Vec<ColorWithMeta>,
    pub cold: Vec<ColorWithMeta>,
    pub neutral: Vec<ColorWithMeta>,
    pub vibrant: Vec<ColorWithMeta>,
    pub muted: Vec<ColorWithMeta>,
    pub pastel: Vec<ColorWithMeta>,
    pub earth: Vec<ColorWithMeta>,
}

impl ColorGroups {
    fn push(&mut self, tags: ColorTags, color: &ColorWithMeta) {
        let buckets = [
            (ColorTags::LIGHT, &mut self.light),
            (ColorTags::MID, &mut self.mid),
            (ColorTags::DARK, &mut self.dark),
            (ColorTags::WARM, &mut self.warm),
            (ColorTags::COLD, &mut self.cold),
            (ColorTags::NEUTRAL, &mut self.neutral),
            (ColorTags::VIBRANT, &mut self.vibrant),
            (ColorTags::MUTED, &mut self.muted),
            (ColorTags::PASTEL, &mut self.pastel),
            (ColorTags::EARTH, &mut self.earth),
        ];
        for (tag, bucket) in buckets {
            if tags.contains(tag) {
                bucket.push(color.clone());
            }
        }
    }
}

/// Tone tag for an HSL lightness
pub fn tone_of(l: f64) -> ColorTags {
    if l < DARK_MAX_LIGHTNESS {
        ColorTags::DARK
    } else if l > LIGHT_MIN_LIGHTNESS {
        ColorTags::LIGHT
    } else {
        ColorTags::MID
    }
}

/// Classify a color into its tone and family buckets
pub fn classify(color: &Color) -> ColorTags {
    let (h, s, l) = hsl_of(color);
    classify_hsl(h, s, l)
}

/// Classify raw HSL values (hue in degrees, fractions in `[0, 1]`)
pub fn classify_hsl(h: f64, s: f64, l: f64) -> ColorTags {
    let mut tags = tone_of(l);

    if s < NEUTRAL_MAX_SATURATION {
        tags |= ColorTags::NEUTRAL;
    } else if h >= WARM_HUE_START || h < WARM_HUE_END {
        tags |= ColorTags::WARM;
    } else {
        tags |= ColorTags::COLD;
    }

    if s >= VIBRANT_MIN_SATURATION && (VIBRANT_MIN_LIGHTNESS..=VIBRANT_MAX_LIGHTNESS).contains(&l) {
        tags |= ColorTags::VIBRANT;
    }
    if s < MUTED_MAX_SATURATION {
        tags |= ColorTags::MUTED;
    }
    if (PASTEL_MIN_SATURATION..=PASTEL_MAX_SATURATION).contains(&s) && l > PASTEL_MIN_LIGHTNESS {
        tags |= ColorTags::PASTEL;
    }
    if (EARTH_HUE_MIN..=EARTH_HUE_MAX).contains(&h)
        && (NEUTRAL_MAX_SATURATION..EARTH_MAX_SATURATION).contains(&s)
        && l < EARTH_MAX_LIGHTNESS
    {
        tags |= ColorTags::EARTH;
    }

    tags
}

/// Distribute colors into buckets, preserving input order within each
pub fn group_colors(colors: &[ColorWithMeta]) -> ColorGroups {
    let mut groups = ColorGroups::default();
    for color in colors {
        groups.push(classify(&color.color), color);
    }
    groups
}
