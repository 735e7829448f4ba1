//! Named swatches derived from a color histogram
//!
//! Each swatch kind targets a saturation/lightness band. Buckets inside the
//! band are scored by closeness to the band's target saturation and
//! lightness, and by population relative to the most common bucket. A
//! bucket is claimed by at most one swatch; kinds are filled in the order
//! of [`SwatchKind::ALL`]. A kind with no bucket in its band stays empty.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::histogram::Histogram;

const TARGET_DARK_LUMA: f32 = 0.26;
const MAX_DARK_LUMA: f32 = 0.45;
const MIN_LIGHT_LUMA: f32 = 0.55;
const TARGET_LIGHT_LUMA: f32 = 0.74;
const MIN_NORMAL_LUMA: f32 = 0.3;
const TARGET_NORMAL_LUMA: f32 = 0.5;
const MAX_NORMAL_LUMA: f32 = 0.7;
const TARGET_MUTED_SAT: f32 = 0.3;
const MAX_MUTED_SAT: f32 = 0.4;
const TARGET_VIBRANT_SAT: f32 = 1.0;
const MIN_VIBRANT_SAT: f32 = 0.35;

const WEIGHT_SATURATION: f32 = 3.0;
const WEIGHT_LUMA: f32 = 6.5;
const WEIGHT_POPULATION: f32 = 0.5;

/// Lightness at or below which a bucket is treated as black
const BLACK_MAX_LIGHTNESS: f32 = 0.05;
/// Lightness at or above which a bucket is treated as white
const WHITE_MIN_LIGHTNESS: f32 = 0.95;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwatchKind {
    Vibrant,
    LightVibrant,
    DarkVibrant,
    Muted,
    LightMuted,
    DarkMuted,
}

struct Band {
    min_luma: f32,
    target_luma: f32,
    max_luma: f32,
    min_sat: f32,
    target_sat: f32,
    max_sat: f32,
}

impl SwatchKind {
    /// Generation order
    pub const ALL: [SwatchKind; 6] = [
        SwatchKind::Vibrant,
        SwatchKind::LightVibrant,
        SwatchKind::DarkVibrant,
        SwatchKind::Muted,
        SwatchKind::LightMuted,
        SwatchKind::DarkMuted,
    ];

    /// camelCase name used in the color table
    pub fn name(&self) -> &'static str {
        match self {
            SwatchKind::Vibrant => "vibrant",
            SwatchKind::LightVibrant => "lightVibrant",
            SwatchKind::DarkVibrant => "darkVibrant",
            SwatchKind::Muted => "muted",
            SwatchKind::LightMuted => "lightMuted",
            SwatchKind::DarkMuted => "darkMuted",
        }
    }

    fn band(&self) -> Band {
        let (min_luma, target_luma, max_luma) = match self {
            SwatchKind::Vibrant | SwatchKind::Muted => {
                (MIN_NORMAL_LUMA, TARGET_NORMAL_LUMA, MAX_NORMAL_LUMA)
            }
            SwatchKind::LightVibrant | SwatchKind::LightMuted => {
                (MIN_LIGHT_LUMA, TARGET_LIGHT_LUMA, 1.0)
            }
            SwatchKind::DarkVibrant | SwatchKind::DarkMuted => (0.0, TARGET_DARK_LUMA, MAX_DARK_LUMA),
        };
        let (min_sat, target_sat, max_sat) = match self {
            SwatchKind::Vibrant | SwatchKind::LightVibrant | SwatchKind::DarkVibrant => {
                (MIN_VIBRANT_SAT, TARGET_VIBRANT_SAT, 1.0)
            }
            SwatchKind::Muted | SwatchKind::LightMuted | SwatchKind::DarkMuted => {
                (0.0, TARGET_MUTED_SAT, MAX_MUTED_SAT)
            }
        };
        Band {
            min_luma,
            target_luma,
            max_luma,
            min_sat,
            target_sat,
            max_sat,
        }
    }
}

/// The six optional named swatches of an image
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Swatches {
    pub vibrant: Option<Rgb>,
    pub dark_vibrant: Option<Rgb>,
    pub light_vibrant: Option<Rgb>,
    pub muted: Option<Rgb>,
    pub dark_muted: Option<Rgb>,
    pub light_muted: Option<Rgb>,
}

impl Swatches {
    /// Pick swatches from a histogram
    pub fn from_histogram(histogram: &Histogram) -> Self {
        let max_count = histogram.max_count().max(1) as f32;
        let candidates: Vec<(Rgb, f32, f32, f32)> = histogram
            .buckets()
            .iter()
            .filter_map(|&(color, count)| {
                let hsl = color.to_hsl();
                if hsl.l <= BLACK_MAX_LIGHTNESS || hsl.l >= WHITE_MIN_LIGHTNESS {
                    return None;
                }
                Some((color, hsl.s, hsl.l, count as f32 / max_count))
            })
            .collect();

        let mut taken = vec![false; candidates.len()];
        let mut swatches = Swatches::default();

        for kind in SwatchKind::ALL {
            let band = kind.band();
            let mut best: Option<(usize, f32)> = None;
            for (i, &(_, sat, luma, population)) in candidates.iter().enumerate() {
                if taken[i]
                    || sat < band.min_sat
                    || sat > band.max_sat
                    || luma < band.min_luma
                    || luma > band.max_luma
                {
                    continue;
                }
                let score = score(&band, sat, luma, population);
                if best.map_or(true, |(_, s)| score > s) {
                    best = Some((i, score));
                }
            }
            if let Some((i, _)) = best {
                taken[i] = true;
                swatches.set(kind, Some(candidates[i].0));
            }
        }

        tracing::trace!(?swatches, buckets = histogram.len(), "generated swatches");
        swatches
    }

    pub fn get(&self, kind: SwatchKind) -> Option<Rgb> {
        match kind {
            SwatchKind::Vibrant => self.vibrant,
            SwatchKind::LightVibrant => self.light_vibrant,
            SwatchKind::DarkVibrant => self.dark_vibrant,
            SwatchKind::Muted => self.muted,
            SwatchKind::LightMuted => self.light_muted,
            SwatchKind::DarkMuted => self.dark_muted,
        }
    }

    pub fn set(&mut self, kind: SwatchKind, color: Option<Rgb>) {
        let slot = match kind {
            SwatchKind::Vibrant => &mut self.vibrant,
            SwatchKind::LightVibrant => &mut self.light_vibrant,
            SwatchKind::DarkVibrant => &mut self.dark_vibrant,
            SwatchKind::Muted => &mut self.muted,
            SwatchKind::LightMuted => &mut self.light_muted,
            SwatchKind::DarkMuted => &mut self.dark_muted,
        };
        *slot = color;
    }

    /// Colors for `kinds`, in that order
    pub fn pick(&self, kinds: &[SwatchKind]) -> Vec<Option<Rgb>> {
        kinds.iter().map(|&kind| self.get(kind)).collect()
    }

    /// True when no swatch was found
    pub fn is_empty(&self) -> bool {
        SwatchKind::ALL.iter().all(|&kind| self.get(kind).is_none())
    }
}

fn score(band: &Band, sat: f32, luma: f32, population: f32) -> f32 {
    let weighted = WEIGHT_SATURATION * (1.0 - (sat - band.target_sat).abs())
        + WEIGHT_LUMA * (1.0 - (luma - band.target_luma).abs())
        + WEIGHT_POPULATION * population;
    weighted / (WEIGHT_SATURATION + WEIGHT_LUMA + WEIGHT_POPULATION)
}
