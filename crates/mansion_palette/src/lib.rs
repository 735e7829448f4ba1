//! Mansion Palette
//!
//! Derives appetizing background themes from dish photography.
//!
//! # Pipeline
//!
//! 1. Decode ([`ImageSource`]) and downsample to a small square thumbnail
//! 2. Count quantized colors of opaque pixels ([`Histogram`])
//! 3. Pick six named swatches by saturation and lightness ([`Swatches`])
//! 4. Keep warm, non-blue swatches and choose primary, secondary and accent
//!    ([`ColorPalette`])
//!
//! Extraction is deterministic, so a build step can run it once per image
//! ([`run_batch`]) and persist the results ([`PrecomputedTable`]). At runtime
//! [`PaletteResolver`] consults that table before extracting anything.
//!
//! # Example
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use mansion_palette::{PaletteExtractor, Rgb};
//!
//! let photo = RgbaImage::from_pixel(32, 32, Rgba([224, 64, 0, 255]));
//! let palette = PaletteExtractor::default().analyze_image(&photo).palette;
//! assert_eq!(palette.primary, Rgb::new(224, 64, 0));
//! assert_eq!(palette.text_color, Rgb::WHITE);
//! ```

pub mod batch;
pub mod cache;
pub mod color;
pub mod error;
pub mod extractor;
pub mod histogram;
pub mod palette;
pub mod resolver;
pub mod source;
pub mod swatch;
pub mod table;

pub use batch::{collect_images, run_batch, BatchOptions, BatchReport};
pub use cache::PaletteCache;
pub use color::{Hsl, Rgb};
pub use error::{PaletteError, Result};
pub use extractor::{Analysis, ExtractorConfig, PaletteExtractor};
pub use histogram::Histogram;
pub use palette::ColorPalette;
pub use resolver::{PaletteResolver, PLACEHOLDER_MARKER};
pub use source::{ImageFormat, ImageSource};
pub use swatch::{SwatchKind, Swatches};
pub use table::PrecomputedTable;
