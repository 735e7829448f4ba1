//! Build-time extraction over a directory of dish photos

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PaletteError, Result};
use crate::extractor::PaletteExtractor;
use crate::palette::ColorPalette;
use crate::resolver::PLACEHOLDER_MARKER;
use crate::source::ImageSource;
use crate::table::PrecomputedTable;

/// Which files a batch run picks up and how they are keyed
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub images_dir: PathBuf,
    /// Prepended to the file name to form the table key
    pub key_prefix: String,
    /// Accepted extensions, compared case-insensitively
    pub extensions: Vec<String>,
    /// Files whose name contains this are skipped
    pub skip_pattern: String,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from("public/dishes"),
            key_prefix: "/dishes/".to_string(),
            extensions: ["jpg", "jpeg", "png", "webp"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            skip_pattern: PLACEHOLDER_MARKER.to_string(),
        }
    }
}

impl BatchOptions {
    fn accepts(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        if !self.skip_pattern.is_empty() && name.contains(&self.skip_pattern) {
            return false;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|a| a.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub table: PrecomputedTable,
    /// Images that produced a palette
    pub processed: usize,
    /// Images that could not be read or decoded (stored with the fallback)
    pub failed: Vec<String>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.processed + self.failed.len()
    }
}

/// Image files in `options.images_dir` that a batch run would process,
/// sorted by file name
pub fn collect_images(options: &BatchOptions) -> Result<Vec<PathBuf>> {
    let dir = &options.images_dir;
    let entries = fs::read_dir(dir).map_err(|e| PaletteError::io(dir, e))?;

    let mut images = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| PaletteError::io(dir, e))?.path();
        if path.is_file() && options.accepts(&path) {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

/// Extract a palette for every accepted image, one at a time.
///
/// Only an unreadable directory is an error. A failing image is logged,
/// recorded with the fallback palette and does not stop the run.
pub fn run_batch(extractor: &PaletteExtractor, options: &BatchOptions) -> Result<BatchReport> {
    let images = collect_images(options)?;
    tracing::info!(
        "extracting colors from {} images in {}",
        images.len(),
        options.images_dir.display()
    );

    let mut report = BatchReport::default();
    for path in images {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let key = format!("{}{}", options.key_prefix, name);

        let palette = match extractor.try_extract(&ImageSource::file(&path)) {
            Ok(palette) => {
                tracing::info!("{}: primary {} accent {}", name, palette.primary, palette.accent);
                report.processed += 1;
                palette
            }
            Err(err) => {
                tracing::warn!("{}: extraction failed, storing default palette: {}", name, err);
                report.failed.push(key.clone());
                ColorPalette::fallback()
            }
        };
        report.table.insert(key, palette);
    }

    Ok(report)
}
