//! Palette extraction error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while extracting or persisting palettes
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("image has no pixels")]
    EmptyImage,

    #[error("RGBA buffer of {len} bytes does not match {width}x{height}")]
    InvalidRgba { len: usize, width: u32, height: u32 },

    #[error("invalid color `{0}`")]
    InvalidColor(String),

    #[error("invalid color table: {0}")]
    Table(#[from] serde_json::Error),
}

impl PaletteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for palette operations
pub type Result<T> = std::result::Result<T, PaletteError>;
