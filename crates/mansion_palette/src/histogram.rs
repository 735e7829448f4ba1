//! Quantized color frequency table

use image::imageops::{self, FilterType};
use image::RgbaImage;
use rustc_hash::FxHashMap;

use crate::color::Rgb;
use crate::extractor::ExtractorConfig;

/// Distinct quantized colors ranked by how often they were sampled
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Histogram {
    /// Sorted by count descending, then color ascending
    buckets: Vec<(Rgb, u32)>,
    samples: u32,
}

impl Histogram {
    /// Downsample `image` and count the quantized colors of every
    /// `pixel_stride`-th opaque pixel
    pub fn build(image: &RgbaImage, config: &ExtractorConfig) -> Self {
        let size = config.sample_size.max(1);
        let thumb = imageops::resize(image, size, size, FilterType::Triangle);

        let stride = (config.pixel_stride as usize).max(1);
        let step = config.quantize_step.max(1);

        let mut counts: FxHashMap<Rgb, u32> = FxHashMap::default();
        let mut samples = 0;
        for pixel in thumb.pixels().step_by(stride) {
            let [r, g, b, a] = pixel.0;
            if a < config.alpha_threshold {
                continue;
            }
            let color = Rgb::new(quantize(r, step), quantize(g, step), quantize(b, step));
            *counts.entry(color).or_insert(0) += 1;
            samples += 1;
        }

        Self::from_counts(counts, samples)
    }

    fn from_counts(counts: FxHashMap<Rgb, u32>, samples: u32) -> Self {
        let mut buckets: Vec<(Rgb, u32)> = counts.into_iter().collect();
        // Hash map iteration order is unstable; the secondary key keeps the
        // ranking reproducible.
        buckets.sort_unstable_by(|(ca, na), (cb, nb)| nb.cmp(na).then(ca.cmp(cb)));
        Self { buckets, samples }
    }

    /// Most frequent color, if any pixel survived filtering
    pub fn dominant(&self) -> Option<Rgb> {
        self.buckets.first().map(|(color, _)| *color)
    }

    pub fn buckets(&self) -> &[(Rgb, u32)] {
        &self.buckets
    }

    /// Highest bucket count
    pub fn max_count(&self) -> u32 {
        self.buckets.first().map_or(0, |(_, n)| *n)
    }

    /// Number of pixels that were counted
    pub fn samples(&self) -> u32 {
        self.samples
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Round to the nearest multiple of `step`, saturating at 255
fn quantize(channel: u8, step: u8) -> u8 {
    let step = step as u32;
    let rounded = (channel as u32 + step / 2) / step * step;
    rounded.min(255) as u8
}
