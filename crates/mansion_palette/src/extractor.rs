//! Image → palette pipeline

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::Result;
use crate::histogram::Histogram;
use crate::palette::ColorPalette;
use crate::source::ImageSource;
use crate::swatch::Swatches;

/// Analysis parameters (`[analysis]` in `mansion.toml`)
///
/// Changing any of these invalidates a previously generated color table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Edge of the square thumbnail analyzed instead of the full image
    #[serde(default = "default_sample_size")]
    pub sample_size: u32,

    /// Only every n-th thumbnail pixel is counted
    #[serde(default = "default_pixel_stride")]
    pub pixel_stride: u32,

    /// Pixels with a lower alpha are background
    #[serde(default = "default_alpha_threshold")]
    pub alpha_threshold: u8,

    /// Channel values are rounded to multiples of this
    #[serde(default = "default_quantize_step")]
    pub quantize_step: u8,
}

fn default_sample_size() -> u32 {
    100
}

fn default_pixel_stride() -> u32 {
    4
}

fn default_alpha_threshold() -> u8 {
    128
}

fn default_quantize_step() -> u8 {
    32
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            sample_size: default_sample_size(),
            pixel_stride: default_pixel_stride(),
            alpha_threshold: default_alpha_threshold(),
            quantize_step: default_quantize_step(),
        }
    }
}

/// Everything derived from one image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub dominant: Option<Rgb>,
    pub swatches: Swatches,
    pub palette: ColorPalette,
}

/// Derives background palettes from images.
///
/// Pure with respect to its input: the same pixels and configuration always
/// produce the same palette, which is what lets a precomputed table stand
/// in for live extraction.
#[derive(Debug, Clone, Default)]
pub struct PaletteExtractor {
    config: ExtractorConfig,
}

impl PaletteExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Decode and analyze an image
    pub fn analyze(&self, source: &ImageSource) -> Result<Analysis> {
        let image = source.decode()?;
        Ok(self.analyze_image(&image))
    }

    /// Analyze already decoded pixels
    pub fn analyze_image(&self, image: &image::RgbaImage) -> Analysis {
        let histogram = Histogram::build(image, &self.config);
        let swatches = Swatches::from_histogram(&histogram);
        let palette = ColorPalette::from_swatches(swatches);
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            buckets = histogram.len(),
            primary = %palette.primary,
            "analyzed image"
        );
        Analysis {
            dominant: histogram.dominant(),
            swatches,
            palette,
        }
    }

    /// Palette for `source`, or the decode error
    pub fn try_extract(&self, source: &ImageSource) -> Result<ColorPalette> {
        self.analyze(source).map(|analysis| analysis.palette)
    }

    /// Palette for `source`; failures are logged and yield the fallback
    pub fn extract(&self, source: &ImageSource) -> ColorPalette {
        match self.try_extract(source) {
            Ok(palette) => palette,
            Err(err) => {
                tracing::warn!("color extraction failed, using default palette: {}", err);
                ColorPalette::fallback()
            }
        }
    }
}
