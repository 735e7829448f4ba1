//! Image source types

use std::fs;
use std::path::PathBuf;

use image::RgbaImage;

use crate::error::{PaletteError, Result};

/// Source of an image to analyze
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Load from a file path
    File(PathBuf),

    /// Encoded image bytes; the format is sniffed from the content
    Bytes(Vec<u8>),

    /// Pre-decoded RGBA image data (already in memory)
    Rgba {
        /// RGBA pixel data (4 bytes per pixel)
        data: Vec<u8>,
        width: u32,
        height: u32,
    },
}

impl ImageSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn bytes(data: Vec<u8>) -> Self {
        Self::Bytes(data)
    }

    pub fn rgba(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self::Rgba {
            data,
            width,
            height,
        }
    }

    /// Decode into an RGBA8 buffer
    pub fn decode(&self) -> Result<RgbaImage> {
        let image = match self {
            ImageSource::File(path) => {
                let data = fs::read(path).map_err(|e| PaletteError::io(path, e))?;
                let format = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .and_then(ImageFormat::from_extension);
                decode_bytes(&data, format)?
            }
            ImageSource::Bytes(data) => decode_bytes(data, None)?,
            ImageSource::Rgba {
                data,
                width,
                height,
            } => RgbaImage::from_raw(*width, *height, data.clone()).ok_or(
                PaletteError::InvalidRgba {
                    len: data.len(),
                    width: *width,
                    height: *height,
                },
            )?,
        };

        if image.width() == 0 || image.height() == 0 {
            return Err(PaletteError::EmptyImage);
        }
        Ok(image)
    }
}

fn decode_bytes(data: &[u8], format: Option<ImageFormat>) -> Result<RgbaImage> {
    // Content sniffing wins over the hint; file extensions lie (a .jpg that
    // is really a PNG is common in exported asset folders).
    let decoded = match image::guess_format(data) {
        Ok(guessed) => image::load_from_memory_with_format(data, guessed)?,
        Err(_) => match format {
            Some(hint) => image::load_from_memory_with_format(data, hint.into())?,
            None => image::load_from_memory(data)?,
        },
    };
    Ok(decoded.to_rgba8())
}

impl From<RgbaImage> for ImageSource {
    fn from(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self::Rgba {
            data: image.into_raw(),
            width,
            height,
        }
    }
}

/// Image format hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
    Bmp,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::WebP),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::WebP => image::ImageFormat::WebP,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
        }
    }
}
