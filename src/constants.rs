//! Reference values and tuning constants for color computations
//!
//! Thresholds used by classification and palette generation are fixed here
//! so that boundary behavior is pinned down in one place and covered by
//! tests.

/// Output precision applied when a conversion result leaves the crate
pub mod precision {
    /// Hue is rounded to hundredths of a degree
    pub const HUE_SCALE: f64 = 100.0;

    /// Saturation, lightness, value and CMYK channels keep four decimals
    pub const FRACTION_SCALE: f64 = 10_000.0;

    /// Lab coordinates keep two decimals
    pub const LAB_SCALE: f64 = 100.0;
}

/// Tone and family classification thresholds (HSL, fractions in [0,1])
///
/// Strict comparisons are written `<`/`>`; inclusive ones `≥`/`≤` in the
/// docs of [`crate::palettes::classify`].
pub mod classification {
    /// Lightness strictly below this is `dark`
    pub const DARK_MAX_LIGHTNESS: f64 = 0.35;

    /// Lightness strictly above this is `light`
    pub const LIGHT_MIN_LIGHTNESS: f64 = 0.70;

    /// Saturation strictly below this is `neutral`
    pub const NEUTRAL_MAX_SATURATION: f64 = 0.10;

    /// Warm hues: `h >= WARM_HUE_START || h < WARM_HUE_END` (wraps through 0°)
    pub const WARM_HUE_START: f64 = 330.0;
    pub const WARM_HUE_END: f64 = 150.0;

    /// Vibrant: saturation at least this, lightness in the closed band below
    pub const VIBRANT_MIN_SATURATION: f64 = 0.60;
    pub const VIBRANT_MIN_LIGHTNESS: f64 = 0.30;
    pub const VIBRANT_MAX_LIGHTNESS: f64 = 0.70;

    /// Saturation strictly below this is `muted`
    pub const MUTED_MAX_SATURATION: f64 = 0.35;

    /// Pastel: saturation in the closed band, lightness strictly above
    pub const PASTEL_MIN_SATURATION: f64 = 0.20;
    pub const PASTEL_MAX_SATURATION: f64 = 0.60;
    pub const PASTEL_MIN_LIGHTNESS: f64 = 0.75;

    /// Earth: hue in the closed brown band, saturation and lightness strictly below
    pub const EARTH_HUE_MIN: f64 = 15.0;
    pub const EARTH_HUE_MAX: f64 = 50.0;
    pub const EARTH_MAX_SATURATION: f64 = 0.50;
    pub const EARTH_MAX_LIGHTNESS: f64 = 0.60;
}

/// Palette extraction defaults
pub mod extraction {
    /// Sample every pixel unless told otherwise
    pub const DEFAULT_SAMPLE_STRIDE: usize = 1;

    /// Number of dominant colors returned
    pub const DEFAULT_MAX_CLUSTERS: usize = 5;

    /// Number of extended colors returned after the dominant ones
    pub const DEFAULT_EXTENDED_COUNT: usize = 10;

    /// Bits kept per channel when bucketing colors
    pub const DEFAULT_QUANTIZE_BITS: u8 = 4;

    /// Neighbouring buckets whose centers are closer than this ΔE00 are
    /// merged; 5 joins shading variations while keeping noticeably
    /// different colors apart
    pub const DEFAULT_MERGE_THRESHOLD: f64 = 5.0;
}

/// Derived palette parameters
pub mod generation {
    /// Shades produced on each side (lighter, darker) of a brand color
    pub const BRAND_SHADE_STEPS: usize = 5;

    /// Interpolation denominator; step `i` moves `i / BRAND_SHADE_DIVISOR`
    /// toward white or black
    pub const BRAND_SHADE_DIVISOR: f64 = 6.0;

    /// Channel bounds for brand shades of colors that are not pure white
    /// or black
    pub const BRAND_CHANNEL_MIN: u8 = 1;
    pub const BRAND_CHANNEL_MAX: u8 = 254;

    /// Surface candidates must be nearly grey and light
    pub const SURFACE_MAX_SATURATION: f64 = 0.15;
    pub const SURFACE_MIN_LIGHTNESS: f64 = 0.70;

    /// Used when no extracted color qualifies as a surface
    pub const FALLBACK_SURFACE_HEX: &str = "#F8F9FA";

    /// Lightness levels of the three UI neutrals
    pub const NEUTRAL_LIGHTNESS_LEVELS: [f64; 3] = [0.20, 0.50, 0.85];

    /// Neutrals keep this fraction of the primary's saturation
    pub const NEUTRAL_SATURATION_FACTOR: f64 = 0.1;

    /// Hue rotations for creative palettes, in output order
    pub const CREATIVE_ROTATIONS: [f64; 3] = [180.0, 120.0, -120.0];
}

/// Named color lookup
pub mod naming {
    /// Default number of similar colors returned
    pub const DEFAULT_SIMILAR_LIMIT: usize = 8;
}

/// Pattern rendering limits
pub mod pattern {
    /// Largest accepted tile edge in pixels
    pub const MAX_TILE_SIZE: u32 = 1024;

    /// Recent-history capacity
    pub const DEFAULT_HISTORY_CAPACITY: usize = 12;
}

/// WCAG 2.x contrast thresholds
pub mod contrast {
    pub const AA_NORMAL: f64 = 4.5;
    pub const AA_LARGE: f64 = 3.0;
    pub const AAA_NORMAL: f64 = 7.0;
    pub const AAA_LARGE: f64 = 4.5;
}
