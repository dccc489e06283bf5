//! Dominant color extraction from RGBA8 pixel data
//!
//! Extracts the most frequent colors of an image with:
//! - Stride sampling to bound cost on large images
//! - Transparency handling (fully transparent samples are dropped)
//! - Fixed-resolution quantization into a bucket grid
//! - Greedy merging of neighbouring buckets that are perceptually the same
//!   color, which keeps the merge linear in the number of buckets
//!
//! Identical input and options always produce identical output. Ties in
//! frequency are broken by the order in which buckets were first seen.

use std::collections::HashMap;

use palette::{white_point::D65, Lab};
use serde::{Deserialize, Serialize};

use crate::color::conversion::{rgbf_to_lab, Rgbf};
use crate::color::distance::ciede2000;
use crate::color::{Color, ColorWithMeta};
use crate::constants::extraction::{
    DEFAULT_EXTENDED_COUNT, DEFAULT_MAX_CLUSTERS, DEFAULT_MERGE_THRESHOLD, DEFAULT_QUANTIZE_BITS,
    DEFAULT_SAMPLE_STRIDE,
};
use crate::{ColorError, Result};

/// Tunable parameters of a palette extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionOptions {
    /// Sample every n-th pixel (1 = every pixel)
    pub sample_stride: usize,
    /// Number of dominant colors
    pub max_clusters: usize,
    /// Number of extended colors following the dominant ones
    pub extended_count: usize,
    /// Bits per channel kept when bucketing (1-8)
    pub quantize_bits: u8,
    /// Buckets closer than this ΔE00 to an existing cluster join it
    pub merge_threshold: f64,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            sample_stride: DEFAULT_SAMPLE_STRIDE,
            max_clusters: DEFAULT_MAX_CLUSTERS,
            extended_count: DEFAULT_EXTENDED_COUNT,
            quantize_bits: DEFAULT_QUANTIZE_BITS,
            merge_threshold: DEFAULT_MERGE_THRESHOLD,
        }
    }
}

impl ExtractionOptions {
    /// Check every field against its documented domain
    pub fn validate(&self) -> Result<()> {
        if self.sample_stride == 0 {
            return Err(ColorError::range("sample_stride", self.sample_stride, ">= 1"));
        }
        if self.max_clusters == 0 {
            return Err(ColorError::range("max_clusters", self.max_clusters, ">= 1"));
        }
        if !(1..=8).contains(&self.quantize_bits) {
            return Err(ColorError::range("quantize_bits", self.quantize_bits, "1..=8"));
        }
        if !self.merge_threshold.is_finite() || self.merge_threshold < 0.0 {
            return Err(ColorError::range(
                "merge_threshold",
                self.merge_threshold,
                "a finite value >= 0",
            ));
        }
        Ok(())
    }
}

/// Result of an extraction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedPalette {
    /// Most frequent clusters, most frequent first
    pub dominant: Vec<ColorWithMeta>,
    /// The clusters ranked right after `dominant`
    pub extended: Vec<ColorWithMeta>,
    /// Number of non-transparent samples considered
    pub total_samples: usize,
}

impl ExtractedPalette {
    /// True when the source had no usable samples
    pub fn is_empty(&self) -> bool {
        self.dominant.is_empty()
    }
}

/// Accumulated samples of one quantization cell
#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    /// Grid coordinates of the quantization cell
    cell: [u8; 3],
    count: usize,
    sum: [u64; 3],
}

impl Bucket {
    fn add(&mut self, px: &[u8]) {
        self.count += 1;
        for (acc, &channel) in self.sum.iter_mut().zip(px) {
            *acc += channel as u64;
        }
    }

    fn mean(&self) -> Rgbf {
        let n = self.count as f64 * 255.0;
        Rgbf {
            r: self.sum[0] as f64 / n,
            g: self.sum[1] as f64 / n,
            b: self.sum[2] as f64 / n,
        }
    }
}

/// A group of merged buckets, compared through the Lab of its first bucket
struct Cluster {
    seed: Lab<D65, f64>,
    bucket: Bucket,
}

impl Cluster {
    fn absorb(&mut self, other: &Bucket) {
        self.bucket.count += other.count;
        for (acc, add) in self.bucket.sum.iter_mut().zip(other.sum) {
            *acc += add;
        }
    }

    fn color(&self) -> Color {
        let mean = |sum: u64| (sum as f64 / self.bucket.count as f64).round() as u8;
        Color::rgb8(
            mean(self.bucket.sum[0]),
            mean(self.bucket.sum[1]),
            mean(self.bucket.sum[2]),
        )
    }
}

/// Palette extractor implementing bucket quantization with greedy merging
#[derive(Debug, Clone, Default)]
pub struct PaletteExtractor {
    options: ExtractionOptions,
}

impl PaletteExtractor {
    /// Create an extractor with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom options
    pub fn with_options(options: ExtractionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExtractionOptions {
        &self.options
    }

    /// Extract dominant and extended colors from RGBA8 pixels
    ///
    /// # Errors
    ///
    /// Returns `ColorError::RangeError` if the options are invalid or the
    /// buffer length is not a multiple of 4. A buffer with no usable
    /// samples is not an error; it yields an empty palette.
    pub fn extract(&self, pixels: &[u8]) -> Result<ExtractedPalette> {
        self.options.validate()?;
        if pixels.len() % 4 != 0 {
            return Err(ColorError::range(
                "pixels.len()",
                pixels.len(),
                "a multiple of 4 (RGBA8)",
            ));
        }

        // Step 1: Sample and quantize
        let mut buckets = self.collect_buckets(pixels);
        let total_samples: usize = buckets.iter().map(|b| b.count).sum();
        if total_samples == 0 {
            log::debug!("No opaque samples in {} pixels", pixels.len() / 4);
            return Ok(ExtractedPalette::default());
        }

        // Step 2: Most frequent first; stable sort keeps first-seen order on ties
        buckets.sort_by(|a, b| b.count.cmp(&a.count));
        let bucket_count = buckets.len();

        // Step 3: Merge perceptually identical buckets
        let mut clusters = self.merge_buckets(buckets);
        clusters.sort_by(|a, b| b.bucket.count.cmp(&a.bucket.count));

        log::debug!(
            "Extracted {} clusters from {} buckets ({} samples)",
            clusters.len(),
            bucket_count,
            total_samples
        );

        // Step 4: Split into dominant and extended
        let to_meta = |cluster: &Cluster| {
            let percentage = cluster.bucket.count as f64 / total_samples as f64 * 100.0;
            ColorWithMeta::new(cluster.color(), percentage)
        };
        let mut ranked = clusters.iter().map(to_meta);
        let dominant = ranked.by_ref().take(self.options.max_clusters).collect();
        let extended = ranked.take(self.options.extended_count).collect();

        Ok(ExtractedPalette {
            dominant,
            extended,
            total_samples,
        })
    }

    /// Bucket sampled, non-transparent pixels in first-seen order
    fn collect_buckets(&self, pixels: &[u8]) -> Vec<Bucket> {
        let shift = 8 - self.options.quantize_bits;
        let mut index: HashMap<[u8; 3], usize> = HashMap::new();
        let mut buckets: Vec<Bucket> = Vec::new();

        for px in pixels.chunks_exact(4).step_by(self.options.sample_stride) {
            if px[3] == 0 {
                continue;
            }
            let cell = [px[0] >> shift, px[1] >> shift, px[2] >> shift];
            let slot = *index.entry(cell).or_insert_with(|| {
                buckets.push(Bucket {
                    cell,
                    ..Bucket::default()
                });
                buckets.len() - 1
            });
            buckets[slot].add(&px[..3]);
        }

        buckets
    }

    /// Greedy merge: each bucket joins the earliest cluster owning a
    /// neighbouring cell whose seed is within threshold
    fn merge_buckets(&self, buckets: Vec<Bucket>) -> Vec<Cluster> {
        let levels = 1u16 << self.options.quantize_bits;
        let mut owner: HashMap<[u8; 3], usize> = HashMap::with_capacity(buckets.len());
        let mut clusters: Vec<Cluster> = Vec::new();

        for bucket in buckets {
            let lab = rgbf_to_lab(bucket.mean());
            let target = neighbour_cells(bucket.cell, levels)
                .filter_map(|cell| owner.get(&cell).copied())
                .filter(|&i| ciede2000(clusters[i].seed, lab) < self.options.merge_threshold)
                .min();

            let slot = match target {
                Some(i) => {
                    clusters[i].absorb(&bucket);
                    i
                }
                None => {
                    clusters.push(Cluster { seed: lab, bucket });
                    clusters.len() - 1
                }
            };
            owner.insert(bucket.cell, slot);
        }

        clusters
    }
}

/// Cells within one step of `cell` on every channel, `cell` included
fn neighbour_cells(cell: [u8; 3], levels: u16) -> impl Iterator<Item = [u8; 3]> {
    let last = levels as i32 - 1;
    let span = move |c: u8| (c as i32 - 1).max(0)..=(c as i32 + 1).min(last);

    span(cell[0]).flat_map(move |r| {
        span(cell[1]).flat_map(move |g| span(cell[2]).map(move |b| [r as u8, g as u8, b as u8]))
    })
}

/// Extract a palette with the given options
///
/// # Arguments
///
/// * `pixels` - Tightly packed RGBA8 samples
/// * `options` - Sampling, quantization and merge parameters
///
/// # Returns
///
/// Dominant and extended colors, most frequent first; empty when no
/// sample is opaque
///
/// # Errors
///
/// Returns `ColorError::RangeError` for invalid options or a buffer whose
/// length is not a multiple of 4.
pub fn extract_palette(pixels: &[u8], options: &ExtractionOptions) -> Result<ExtractedPalette> {
    PaletteExtractor::with_options(options.clone()).extract(pixels)
}

/// Extract a palette from a decoded image
pub fn extract_palette_from_image(
    image: &image::RgbaImage,
    options: &ExtractionOptions,
) -> Result<ExtractedPalette> {
    extract_palette(image.as_raw(), options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(rgba: [u8; 4], count: usize) -> Vec<u8> {
        rgba.iter().copied().cycle().take(count * 4).collect()
    }

    #[test]
    fn test_default_options() {
        let extractor = PaletteExtractor::new();
        assert_eq!(extractor.options().max_clusters, DEFAULT_MAX_CLUSTERS);
        assert_eq!(extractor.options().extended_count, DEFAULT_EXTENDED_COUNT);
        assert!(extractor.options().validate().is_ok());
    }

    #[test]
    fn test_invalid_options() {
        let stride = ExtractionOptions {
            sample_stride: 0,
            ..Default::default()
        };
        assert!(matches!(stride.validate(), Err(ColorError::RangeError { .. })));

        let bits = ExtractionOptions {
            quantize_bits: 9,
            ..Default::default()
        };
        assert!(bits.validate().is_err());

        let threshold = ExtractionOptions {
            merge_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(threshold.validate().is_err());
    }

    #[test]
    fn test_truncated_buffer_rejected() {
        let result = extract_palette(&[0, 0, 0], &ExtractionOptions::default());
        assert!(matches!(result, Err(ColorError::RangeError { .. })));
    }

    #[test]
    fn test_empty_and_transparent_buffers() {
        let empty = extract_palette(&[], &ExtractionOptions::default()).unwrap();
        assert!(empty.is_empty());
        assert!(empty.extended.is_empty());

        let transparent = extract_palette(&solid([255, 0, 0, 0], 100), &ExtractionOptions::default()).unwrap();
        assert!(transparent.is_empty());
        assert_eq!(transparent.total_samples, 0);
    }

    #[test]
    fn test_single_color() {
        let palette = extract_palette(&solid([0x33, 0x66, 0x99, 255], 50), &ExtractionOptions::default()).unwrap();
        assert_eq!(palette.dominant.len(), 1);
        assert_eq!(palette.dominant[0].hex, "#336699");
        assert_eq!(palette.dominant[0].percentage, 100.0);
        assert!(palette.extended.is_empty());
    }

    #[test]
    fn test_frequency_order_and_percentages() {
        let mut pixels = solid([255, 0, 0, 255], 60);
        pixels.extend(solid([0, 0, 255, 255], 30));
        pixels.extend(solid([0, 255, 0, 255], 10));
        pixels.extend(solid([0, 0, 0, 0], 50));

        let palette = extract_palette(&pixels, &ExtractionOptions::default()).unwrap();
        let hexes: Vec<&str> = palette.dominant.iter().map(|c| c.hex.as_str()).collect();
        assert_eq!(hexes, ["#FF0000", "#0000FF", "#00FF00"]);
        assert_eq!(palette.total_samples, 100);
        assert!((palette.dominant[0].percentage - 60.0).abs() < 1e-9);
        let sum: f64 = palette.dominant.iter().map(|c| c.percentage).sum();
        assert!(sum <= 100.0 + 1e-9);
    }

    #[test]
    fn test_ties_broken_by_first_seen() {
        let mut pixels = solid([0, 0, 255, 255], 10);
        pixels.extend(solid([255, 0, 0, 255], 10));
        let palette = extract_palette(&pixels, &ExtractionOptions::default()).unwrap();
        assert_eq!(palette.dominant[0].hex, "#0000FF");
        assert_eq!(palette.dominant[1].hex, "#FF0000");
    }

    #[test]
    fn test_near_duplicates_merge() {
        // Two shades in different buckets but visually the same color
        let mut pixels = solid([200, 40, 40, 255], 30);
        pixels.extend(solid([208, 40, 40, 255], 20));
        let palette = extract_palette(&pixels, &ExtractionOptions::default()).unwrap();
        assert_eq!(palette.dominant.len(), 1);
        assert_eq!(palette.dominant[0].percentage, 100.0);
        // weighted mean of the members
        assert_eq!(palette.dominant[0].color.to_rgb8(), [203, 40, 40]);
    }

    #[test]
    fn test_noticeably_different_neighbours_stay_apart() {
        let (a, b) = (Color::rgb8(128, 128, 128), Color::rgb8(145, 145, 145));
        let gap = crate::color::distance(&a, &b);
        assert!(gap > DEFAULT_MERGE_THRESHOLD && gap < 10.0, "gap {}", gap);

        let mut pixels = solid([128, 128, 128, 255], 30);
        pixels.extend(solid([145, 145, 145, 255], 20));
        let palette = extract_palette(&pixels, &ExtractionOptions::default()).unwrap();
        assert_eq!(palette.dominant.len(), 2);
    }

    #[test]
    fn test_zero_threshold_keeps_buckets_apart() {
        let mut pixels = solid([200, 40, 40, 255], 30);
        pixels.extend(solid([208, 40, 40, 255], 20));
        let options = ExtractionOptions {
            merge_threshold: 0.0,
            ..Default::default()
        };
        let palette = extract_palette(&pixels, &options).unwrap();
        assert_eq!(palette.dominant.len(), 2);
    }

    #[test]
    fn test_only_neighbouring_buckets_merge() {
        let mut pixels = solid([0, 0, 0, 255], 10);
        pixels.extend(solid([255, 255, 255, 255], 10));
        let options = ExtractionOptions {
            merge_threshold: 150.0,
            ..Default::default()
        };
        let palette = extract_palette(&pixels, &options).unwrap();
        assert_eq!(palette.dominant.len(), 2);
    }

    #[test]
    fn test_fine_grid_with_many_buckets() {
        let pixels: Vec<u8> = (0..65_536u32)
            .flat_map(|i| [(i % 256) as u8, (i / 256) as u8, (i.wrapping_mul(7) % 256) as u8, 255])
            .collect();
        let options = ExtractionOptions {
            quantize_bits: 6,
            merge_threshold: 1.0,
            ..Default::default()
        };
        let palette = extract_palette(&pixels, &options).unwrap();
        assert_eq!(palette.total_samples, 65_536);
        assert_eq!(palette.dominant.len(), 5);
        assert_eq!(palette.extended.len(), 10);
        let sum: f64 = palette
            .dominant
            .iter()
            .chain(&palette.extended)
            .map(|c| c.percentage)
            .sum();
        assert!(sum <= 100.0 + 1e-9);
        assert!(palette.dominant.windows(2).all(|w| w[0].percentage >= w[1].percentage));
    }

    #[test]
    fn test_neighbour_cells_stay_on_grid() {
        assert_eq!(neighbour_cells([0, 0, 0], 16).count(), 8);
        assert_eq!(neighbour_cells([5, 5, 5], 16).count(), 27);
        assert!(neighbour_cells([255, 255, 255], 256).all(|c| c.iter().all(|&v| v >= 254)));
    }

    #[test]
    fn test_dominant_and_extended_split() {
        let mut pixels = Vec::new();
        // 8 clearly distinct colors with decreasing frequency
        let colors = [
            [0, 0, 0],
            [255, 255, 255],
            [255, 0, 0],
            [0, 255, 0],
            [0, 0, 255],
            [255, 255, 0],
            [0, 255, 255],
            [255, 0, 255],
        ];
        for (i, c) in colors.iter().enumerate() {
            pixels.extend(solid([c[0], c[1], c[2], 255], 80 - i * 5));
        }
        let options = ExtractionOptions {
            max_clusters: 3,
            extended_count: 2,
            ..Default::default()
        };
        let palette = extract_palette(&pixels, &options).unwrap();
        assert_eq!(palette.dominant.len(), 3);
        assert_eq!(palette.extended.len(), 2);
        assert_eq!(palette.dominant[0].hex, "#000000");
        assert_eq!(palette.extended[0].hex, "#00FF00");
    }

    #[test]
    fn test_stride_sampling() {
        // Alternating red/blue: stride 2 only ever sees red
        let mut pixels = Vec::new();
        for _ in 0..20 {
            pixels.extend([255, 0, 0, 255, 0, 0, 255, 255]);
        }
        let options = ExtractionOptions {
            sample_stride: 2,
            ..Default::default()
        };
        let palette = extract_palette(&pixels, &options).unwrap();
        assert_eq!(palette.total_samples, 20);
        assert_eq!(palette.dominant.len(), 1);
        assert_eq!(palette.dominant[0].hex, "#FF0000");
    }

    #[test]
    fn test_from_image() {
        let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([10, 200, 30, 255]));
        let palette = extract_palette_from_image(&img, &ExtractionOptions::default()).unwrap();
        assert_eq!(palette.total_samples, 16);
        assert_eq!(palette.dominant[0].hex, "#0AC81E");
    }
}
