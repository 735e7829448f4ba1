//! Bounded cache of extracted palettes

use std::num::NonZeroUsize;

use lru::LruCache;

use crate::palette::ColorPalette;

/// Default number of cached palettes
pub const DEFAULT_CAPACITY: usize = 128;

/// Palettes keyed by image reference, least recently used evicted first
#[derive(Debug)]
pub struct PaletteCache {
    entries: LruCache<String, ColorPalette>,
}

impl PaletteCache {
    /// A cache holding at most `capacity` palettes (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    pub fn get(&mut self, key: &str) -> Option<&ColorPalette> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains(key)
    }

    /// Insert, returning the palette previously stored under `key`
    pub fn put(&mut self, key: impl Into<String>, palette: ColorPalette) -> Option<ColorPalette> {
        self.entries.put(key.into(), palette)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }
}

impl Default for PaletteCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
