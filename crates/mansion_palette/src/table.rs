//! Precomputed color table
//!
//! A flat JSON object mapping image references (e.g. `/dishes/beef.jpg`) to
//! palette records. Keys are kept sorted so regenerating the table from the
//! same images produces byte-identical output.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{PaletteError, Result};
use crate::palette::ColorPalette;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrecomputedTable {
    entries: IndexMap<String, ColorPalette>,
}

impl PrecomputedTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a table from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let mut entries: IndexMap<String, ColorPalette> = serde_json::from_str(json)?;
        entries.sort_keys();
        Ok(Self { entries })
    }

    /// Read a table file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| PaletteError::io(path, e))?;
        let table = Self::from_json(&json)?;
        tracing::debug!("loaded {} palettes from {}", table.len(), path.display());
        Ok(table)
    }

    /// Read a table file, treating a missing or unreadable file as empty
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(table) => table,
            Err(err) => {
                tracing::warn!("no usable color table at {}: {}", path.display(), err);
                Self::new()
            }
        }
    }

    /// Pretty-printed JSON with a trailing newline
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(&self.entries)?;
        json.push('\n');
        Ok(json)
    }

    /// Write the table, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PaletteError::io(parent, e))?;
        }
        fs::write(path, self.to_json()?).map_err(|e| PaletteError::io(path, e))?;
        tracing::info!("wrote {} palettes to {}", self.len(), path.display());
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&ColorPalette> {
        self.entries.get(key)
    }

    /// Insert keeping keys sorted; returns the replaced palette
    pub fn insert(&mut self, key: impl Into<String>, palette: ColorPalette) -> Option<ColorPalette> {
        let key = key.into();
        match self.entries.binary_search_keys(&key) {
            Ok(index) => Some(std::mem::replace(&mut self.entries[index], palette)),
            Err(index) => {
                self.entries.shift_insert(index, key, palette);
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColorPalette)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
