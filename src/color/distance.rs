//! CIEDE2000 color difference
//!
//! Implements the CIE Technical Report 142-2001 formula (ΔE00) with
//! parametric factors kL = kC = kH = 1.
//!
//! Rough reading of the result:
//! - ΔE00 < 1.0: imperceptible
//! - ΔE00 1.0-2.0: barely perceptible
//! - ΔE00 2.0-10.0: noticeable
//! - ΔE00 > 10.0: clearly different colors

#![allow(clippy::many_single_char_names)]

use palette::{white_point::D65, Lab};

use super::conversion::lab_of;
use super::Color;

/// 25^7
const POW25_7: f64 = 6_103_515_625.0;

/// Perceptual distance between two colors
///
/// Both colors are converted to unrounded Lab (D65) first. The result is
/// non-negative, symmetric and zero for identical inputs.
///
/// # Returns
///
/// ΔE00; about 100 between black and white
pub fn distance(a: &Color, b: &Color) -> f64 {
    ciede2000(lab_of(a), lab_of(b))
}

/// CIEDE2000 between raw Lab coordinates `(L, a, b)`
pub fn delta_e_lab(lab1: [f64; 3], lab2: [f64; 3]) -> f64 {
    ciede2000(
        Lab::new(lab1[0], lab1[1], lab1[2]),
        Lab::new(lab2[0], lab2[1], lab2[2]),
    )
}

pub(crate) fn ciede2000(lab1: Lab<D65, f64>, lab2: Lab<D65, f64>) -> f64 {
    let (l1, a1, b1) = (lab1.l, lab1.a, lab1.b);
    let (l2, a2, b2) = (lab2.l, lab2.a, lab2.b);

    // Chroma compensation factor G
    let c_mean = (a1.hypot(b1) + a2.hypot(b2)) / 2.0;
    let c_mean7 = c_mean.powi(7);
    let g = 0.5 * (1.0 - (c_mean7 / (c_mean7 + POW25_7)).sqrt());

    let a1p = a1 * (1.0 + g);
    let a2p = a2 * (1.0 + g);
    let c1p = a1p.hypot(b1);
    let c2p = a2p.hypot(b2);
    let h1p = hue_angle(a1p, b1);
    let h2p = hue_angle(a2p, b2);

    let delta_lp = l2 - l1;
    let delta_cp = c2p - c1p;

    let chroma_product = c1p * c2p;
    let delta_hp = if chroma_product == 0.0 {
        0.0
    } else {
        let diff = h2p - h1p;
        if diff > 180.0 {
            diff - 360.0
        } else if diff < -180.0 {
            diff + 360.0
        } else {
            diff
        }
    };
    let delta_big_hp = 2.0 * chroma_product.sqrt() * (delta_hp.to_radians() / 2.0).sin();

    let l_mean = (l1 + l2) / 2.0;
    let cp_mean = (c1p + c2p) / 2.0;
    let hp_mean = mean_hue(h1p, h2p, chroma_product);

    let t = 1.0 - 0.17 * (hp_mean - 30.0).to_radians().cos()
        + 0.24 * (2.0 * hp_mean).to_radians().cos()
        + 0.32 * (3.0 * hp_mean + 6.0).to_radians().cos()
        - 0.20 * (4.0 * hp_mean - 63.0).to_radians().cos();

    let l_offset = (l_mean - 50.0).powi(2);
    let sl = 1.0 + 0.015 * l_offset / (20.0 + l_offset).sqrt();
    let sc = 1.0 + 0.045 * cp_mean;
    let sh = 1.0 + 0.015 * cp_mean * t;

    let delta_theta = 30.0 * (-((hp_mean - 275.0) / 25.0).powi(2)).exp();
    let cp_mean7 = cp_mean.powi(7);
    let rc = 2.0 * (cp_mean7 / (cp_mean7 + POW25_7)).sqrt();
    let rt = -(2.0 * delta_theta).to_radians().sin() * rc;

    let lt = delta_lp / sl;
    let ct = delta_cp / sc;
    let ht = delta_big_hp / sh;

    // Clamp: rounding in the RT cross term can dip a hair below zero
    (lt * lt + ct * ct + ht * ht + rt * ct * ht).max(0.0).sqrt()
}

/// Hue angle in degrees, `[0, 360)`; 0 for the achromatic axis
fn hue_angle(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        return 0.0;
    }
    let h = b.atan2(a).to_degrees();
    if h < 0.0 {
        h + 360.0
    } else {
        h
    }
}

fn mean_hue(h1: f64, h2: f64, chroma_product: f64) -> f64 {
    if chroma_product == 0.0 {
        return h1 + h2;
    }
    let sum = h1 + h2;
    if (h1 - h2).abs() <= 180.0 {
        sum / 2.0
    } else if sum < 360.0 {
        (sum + 360.0) / 2.0
    } else {
        (sum - 360.0) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {:.4}, got {:.4}",
            expected,
            actual
        );
    }

    // Reference pairs from Sharma, Wu & Dalal (2005)
    #[test]
    fn test_reference_pairs() {
        close(delta_e_lab([50.0, 2.6772, -79.7751], [50.0, 0.0, -82.7485]), 2.0425);
        close(delta_e_lab([50.0, 0.0, 0.0], [50.0, -1.0, 2.0]), 2.3669);
        close(delta_e_lab([50.0, 2.49, -0.001], [50.0, -2.49, 0.0009]), 7.1792);
        close(delta_e_lab([50.0, 2.5, 0.0], [73.0, 25.0, -18.0]), 27.1492);
        close(delta_e_lab([50.0, 2.5, 0.0], [61.0, -5.0, 29.0]), 22.8977);
        close(
            delta_e_lab([60.2574, -34.0099, 36.2677], [60.4626, -34.1751, 39.4387]),
            1.2644,
        );
    }

    #[test]
    fn test_identity_is_zero() {
        for c in [
            Color::rgb8(0, 0, 0),
            Color::rgb8(255, 255, 255),
            Color::rgb8(12, 200, 99),
            Color::hsl(359.99, 1.0, 0.5),
        ] {
            assert_eq!(distance(&c, &c), 0.0);
        }
    }

    #[test]
    fn test_symmetry_across_hue_wrap() {
        let samples = [
            Color::hsl(359.0, 0.8, 0.5),
            Color::hsl(1.0, 0.8, 0.5),
            Color::hsl(180.0, 0.8, 0.5),
            Color::rgb8(128, 128, 128),
            Color::rgb8(0, 0, 255),
            Color::lab(40.0, 0.0, 0.0),
        ];
        for a in &samples {
            for b in &samples {
                let ab = distance(a, b);
                let ba = distance(b, a);
                assert!(ab.is_finite());
                assert!(ab >= 0.0);
                assert_eq!(ab, ba);
            }
        }
    }

    #[test]
    fn test_achromatic_pair_is_lightness_only() {
        let d = delta_e_lab([30.0, 0.0, 0.0], [60.0, 0.0, 0.0]);
        assert!(d.is_finite());
        assert!(d > 20.0 && d < 30.0);
    }

    #[test]
    fn test_black_white_extremes() {
        let black = Color::rgb8(0, 0, 0);
        let white = Color::rgb8(255, 255, 255);
        let dark_gray = Color::rgb8(40, 40, 40);
        let bw = distance(&black, &white);
        assert!(bw > 99.0 && bw <= 101.0);
        assert!(bw > distance(&black, &dark_gray));
    }
}
