//! Background theming
//!
//! The background blends from the palette of the item at `floor(offset)` to
//! the item at `ceil(offset)`. Items with a photo take their palette from the
//! [`PaletteResolver`]; items without one use a fixed per-category palette.

use mansion_core::{Category, Dish};
use mansion_palette::{ColorPalette, PaletteResolver, Rgb, Swatches};
use serde::Serialize;

/// Progress at or below this is reported as no transition
const PROGRESS_DEADBAND: f32 = 0.1;

/// Two-stop palette for items without a photo
pub fn category_palette(category: Category) -> ColorPalette {
    let (dominant, accent) = match category {
        Category::SoupBase => (0xFF8C42, 0xFF6B1A),
        Category::LandFresh => (0x8B4513, 0x654321),
        Category::Seafood => (0x4ECDC4, 0x1A8A87),
        Category::Vegetables => (0x95E77E, 0x52B448),
        Category::HotDishes => (0xFF6B6B, 0xC92A2A),
        Category::Snacks => (0xFFB6D9, 0xFF69B4),
        Category::Beverages => (0x9B59B6, 0x6C3483),
    };
    let dominant = Rgb::from_hex(dominant);
    let accent = Rgb::from_hex(accent);
    ColorPalette {
        primary: dominant,
        secondary: accent,
        accent,
        background_gradient: format!("linear-gradient(135deg, {dominant}dd 0%, {accent}dd 100%)"),
        text_color: Rgb::WHITE,
        all_colors: Swatches::default(),
    }
}

/// Palettes on either side of the offset
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundTheme {
    pub current: ColorPalette,
    pub next: ColorPalette,
    /// How far the blend has moved toward `next`, in `[0, 1)`
    pub progress: f32,
}

/// Looks up item palettes for the background
#[derive(Debug)]
pub struct ThemeResolver {
    palettes: PaletteResolver,
}

impl ThemeResolver {
    pub fn new(palettes: PaletteResolver) -> Self {
        Self { palettes }
    }

    pub fn palettes(&self) -> &PaletteResolver {
        &self.palettes
    }

    pub fn palette_for(&mut self, dish: &Dish) -> ColorPalette {
        match dish.photo() {
            Some(photo) => self.palettes.resolve(Some(photo)),
            None => category_palette(dish.category),
        }
    }

    /// Theme for `offset` over `dishes`; None for an empty list
    pub fn background(&mut self, dishes: &[&Dish], offset: f32) -> Option<BackgroundTheme> {
        let last = dishes.len().checked_sub(1)?;
        let offset = if offset.is_finite() {
            offset.clamp(0.0, last as f32)
        } else {
            0.0
        };

        let floor = offset.floor();
        let current = floor as usize;
        let next = (offset.ceil() as usize).min(last);
        let progress = offset - floor;

        Some(BackgroundTheme {
            current: self.palette_for(dishes[current]),
            next: self.palette_for(dishes[next]),
            progress: if progress <= PROGRESS_DEADBAND {
                0.0
            } else {
                progress
            },
        })
    }
}
