//! Runtime palette lookup
//!
//! Resolution order for an image reference:
//!
//! 1. the precomputed table
//! 2. the in-memory cache of earlier on-demand extractions
//! 3. on-demand extraction from the image root, if one is configured
//! 4. the fallback palette
//!
//! Outcomes of steps 3 and 4 are cached, so a broken or unknown image is
//! reported once rather than on every frame.

use std::path::{Path, PathBuf};

use crate::cache::PaletteCache;
use crate::extractor::PaletteExtractor;
use crate::palette::ColorPalette;
use crate::source::ImageSource;
use crate::table::PrecomputedTable;

/// Marker in image references that denote "no real photo"
pub const PLACEHOLDER_MARKER: &str = "placeholder";

#[derive(Debug)]
pub struct PaletteResolver {
    table: PrecomputedTable,
    cache: PaletteCache,
    extractor: PaletteExtractor,
    image_root: Option<PathBuf>,
}

impl PaletteResolver {
    /// A resolver that only consults `table`
    pub fn new(table: PrecomputedTable) -> Self {
        Self {
            table,
            cache: PaletteCache::default(),
            extractor: PaletteExtractor::default(),
            image_root: None,
        }
    }

    /// Enable on-demand extraction; references resolve relative to `root`
    pub fn with_image_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.image_root = Some(root.into());
        self
    }

    pub fn with_extractor(mut self, extractor: PaletteExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn table(&self) -> &PrecomputedTable {
        &self.table
    }

    pub fn cache(&self) -> &PaletteCache {
        &self.cache
    }

    /// Drop on-demand results, e.g. after images were replaced on disk
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Palette for an image reference. Never fails.
    pub fn resolve(&mut self, reference: Option<&str>) -> ColorPalette {
        let Some(reference) = reference.filter(|r| !r.is_empty() && !r.contains(PLACEHOLDER_MARKER))
        else {
            return ColorPalette::fallback();
        };

        if let Some(palette) = self.table.get(reference) {
            return palette.clone();
        }
        if let Some(palette) = self.cache.get(reference) {
            return palette.clone();
        }

        let palette = match &self.image_root {
            Some(root) => {
                let path = resolve_path(root, reference);
                match self.extractor.try_extract(&ImageSource::file(&path)) {
                    Ok(palette) => {
                        tracing::debug!("extracted palette for {} on demand", reference);
                        palette
                    }
                    Err(err) => {
                        tracing::warn!(
                            "color extraction failed for {}, using default palette: {}",
                            reference,
                            err
                        );
                        ColorPalette::fallback()
                    }
                }
            }
            None => {
                tracing::warn!("no precomputed palette for {}, using default", reference);
                ColorPalette::fallback()
            }
        };

        self.cache.put(reference, palette.clone());
        palette
    }
}

/// Web-style absolute references (`/dishes/x.jpg`) are relative to the root
fn resolve_path(root: &Path, reference: &str) -> PathBuf {
    root.join(reference.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use image::{Rgba, RgbaImage};

    fn themed() -> ColorPalette {
        ColorPalette {
            primary: Rgb::new(0x80, 0x20, 0x10),
            ..ColorPalette::fallback()
        }
    }

    #[test]
    fn test_table_hit() {
        let mut table = PrecomputedTable::new();
        table.insert("/dishes/beef.jpg", themed());
        let mut resolver = PaletteResolver::new(table);
        assert_eq!(resolver.resolve(Some("/dishes/beef.jpg")), themed());
        assert!(resolver.cache().is_empty());
    }

    #[test]
    fn test_placeholder_and_absent_use_fallback() {
        let mut table = PrecomputedTable::new();
        table.insert("/dishes/placeholder.jpg", themed());
        let mut resolver = PaletteResolver::new(table);
        assert!(resolver.resolve(None).is_fallback());
        assert!(resolver.resolve(Some("")).is_fallback());
        assert!(resolver.resolve(Some("/dishes/placeholder.jpg")).is_fallback());
    }

    #[test]
    fn test_missing_entry_is_cached_as_fallback() {
        let mut resolver = PaletteResolver::new(PrecomputedTable::new());
        assert!(resolver.resolve(Some("/dishes/new.jpg")).is_fallback());
        assert!(resolver.cache().contains("/dishes/new.jpg"));
    }

    #[test]
    fn test_on_demand_extraction_from_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("dishes")).unwrap();
        RgbaImage::from_pixel(16, 16, Rgba([224, 64, 0, 255]))
            .save(dir.path().join("dishes/chili.png"))
            .unwrap();

        let mut resolver = PaletteResolver::new(PrecomputedTable::new()).with_image_root(dir.path());
        let palette = resolver.resolve(Some("/dishes/chili.png"));
        assert_eq!(palette.primary, Rgb::new(224, 64, 0));
        assert!(resolver.cache().contains("/dishes/chili.png"));

        // Cached result survives the file going away
        std::fs::remove_file(dir.path().join("dishes/chili.png")).unwrap();
        assert_eq!(resolver.resolve(Some("/dishes/chili.png")), palette);

        resolver.clear_cache();
        assert!(resolver.resolve(Some("/dishes/chili.png")).is_fallback());
    }

    #[test]
    fn test_resolve_path() {
        assert_eq!(
            resolve_path(Path::new("public"), "/dishes/a.jpg"),
            PathBuf::from("public/dishes/a.jpg")
        );
        assert_eq!(
            resolve_path(Path::new("public"), "dishes/a.jpg"),
            PathBuf::from("public/dishes/a.jpg")
        );
    }
}
