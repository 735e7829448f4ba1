//! Background palette built from an image's swatches

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::swatch::{SwatchKind, Swatches};

/// Fallback primary (dark chocolate)
pub const DEFAULT_PRIMARY: Rgb = Rgb::from_hex(0x3d2314);
/// Fallback secondary
pub const DEFAULT_SECONDARY: Rgb = Rgb::from_hex(0x5d3a1a);
/// Fallback accent (saddle brown)
pub const DEFAULT_ACCENT: Rgb = Rgb::from_hex(0x8b4513);
/// Gradient shown when nothing could be derived from a photo
pub const DEFAULT_GRADIENT: &str =
    "linear-gradient(135deg, #2d1810 0%, #3d2314 35%, #5d3a1a 100%)";

/// Candidates for the primary slot, darkest qualifying wins
const PRIMARY_CANDIDATES: [SwatchKind; 4] = [
    SwatchKind::DarkVibrant,
    SwatchKind::DarkMuted,
    SwatchKind::Vibrant,
    SwatchKind::Muted,
];

/// Candidates for the secondary slot, darkest qualifying wins
const SECONDARY_CANDIDATES: [SwatchKind; 4] = [
    SwatchKind::DarkMuted,
    SwatchKind::Muted,
    SwatchKind::DarkVibrant,
    SwatchKind::Vibrant,
];

/// Candidates for the accent slot, first qualifying wins
const ACCENT_CANDIDATES: [SwatchKind; 3] =
    [SwatchKind::Vibrant, SwatchKind::DarkVibrant, SwatchKind::Muted];

/// Text on a primary darker than this (in brightness units) is white
const LIGHT_TEXT_BELOW: u32 = 128_000;

/// Colors used to theme the background behind a dish
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPalette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
    pub background_gradient: String,
    pub text_color: Rgb,
    pub all_colors: Swatches,
}

impl ColorPalette {
    /// The brown palette used whenever extraction is impossible
    pub fn fallback() -> Self {
        Self {
            primary: DEFAULT_PRIMARY,
            secondary: DEFAULT_SECONDARY,
            accent: DEFAULT_ACCENT,
            background_gradient: DEFAULT_GRADIENT.to_string(),
            text_color: Rgb::WHITE,
            all_colors: Swatches::default(),
        }
    }

    /// Choose primary, secondary and accent among the appetizing swatches.
    ///
    /// A slot without a qualifying candidate takes its fallback color. When
    /// no swatch exists at all the whole fallback palette is returned.
    pub fn from_swatches(swatches: Swatches) -> Self {
        if swatches.is_empty() {
            return Self::fallback();
        }

        let primary =
            darkest_appetizing(&swatches.pick(&PRIMARY_CANDIDATES)).unwrap_or(DEFAULT_PRIMARY);
        let secondary = darkest_appetizing(&swatches.pick(&SECONDARY_CANDIDATES))
            .unwrap_or(DEFAULT_SECONDARY);
        let accent =
            first_appetizing(&swatches.pick(&ACCENT_CANDIDATES)).unwrap_or(DEFAULT_ACCENT);

        Self {
            primary,
            secondary,
            accent,
            background_gradient: gradient(primary, accent, secondary),
            text_color: text_color_for(primary),
            all_colors: swatches,
        }
    }

    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::fallback()
    }
}

/// Lowest-brightness appetizing color; the earliest candidate wins ties
pub fn darkest_appetizing(candidates: &[Option<Rgb>]) -> Option<Rgb> {
    candidates
        .iter()
        .flatten()
        .filter(|c| c.is_appetizing())
        .fold(None, |best: Option<Rgb>, &c| match best {
            Some(b) if b.brightness_milli() <= c.brightness_milli() => Some(b),
            _ => Some(c),
        })
}

/// First appetizing color in preference order
pub fn first_appetizing(candidates: &[Option<Rgb>]) -> Option<Rgb> {
    candidates.iter().flatten().copied().find(Rgb::is_appetizing)
}

/// 135° diagonal from primary through accent to secondary
pub fn gradient(primary: Rgb, accent: Rgb, secondary: Rgb) -> String {
    format!("linear-gradient(135deg, {primary}F5 0%, {accent} 45%, {secondary}F5 100%)")
}

/// White on dark primaries, black on light ones
pub fn text_color_for(primary: Rgb) -> Rgb {
    if primary.brightness_milli() < LIGHT_TEXT_BELOW {
        Rgb::WHITE
    } else {
        Rgb::BLACK
    }
}
