// SPDX-License-Identifier: MPL-2.0
//! Image file loading and saving.
//!
//! Images are decoded into [`DynamicImage`] and normalized to 8-bit RGB on
//! load, so every downstream operation sees one color mode. Saving honors
//! per-format options (JPEG quality, an optimize flag mapped to the best
//! available compression for formats that support it).

use crate::error::{Error, Result};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::{DynamicImage, ImageFormat};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Extensions accepted by the editor and the batch processor.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "bmp", "gif", "tif", "tiff", "webp",
];

/// JPEG quality bounds (1 to 100, default 95).
pub mod quality_bounds {
    /// Minimum JPEG quality.
    pub const MIN: u8 = 1;
    /// Maximum JPEG quality.
    pub const MAX: u8 = 100;
    /// Default JPEG quality.
    pub const DEFAULT: u8 = 95;
}

/// JPEG quality setting, guaranteed to be within the valid range (1–100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegQuality(u8);

impl JpegQuality {
    /// Creates a new quality value, clamping to the valid range.
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self(value.clamp(quality_bounds::MIN, quality_bounds::MAX))
    }

    /// Returns the raw quality value.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for JpegQuality {
    fn default() -> Self {
        Self(quality_bounds::DEFAULT)
    }
}

/// Output format for [`save_image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFormat {
    Jpeg,
    Png,
    Bmp,
    Gif,
    Tiff,
    WebP,
}

impl SaveFormat {
    /// Derives the format from a path's extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "bmp" => Some(Self::Bmp),
            "gif" => Some(Self::Gif),
            "tif" | "tiff" => Some(Self::Tiff),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
            Self::Bmp => ImageFormat::Bmp,
            Self::Gif => ImageFormat::Gif,
            Self::Tiff => ImageFormat::Tiff,
            Self::WebP => ImageFormat::WebP,
        }
    }
}

/// Options applied when writing an image to disk.
///
/// `format: None` derives the format from the output path's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    pub format: Option<SaveFormat>,
    pub jpeg_quality: JpegQuality,
    pub optimize: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            format: None,
            jpeg_quality: JpegQuality::default(),
            optimize: true,
        }
    }
}

/// Checks whether a path carries a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let lower = ext.to_lowercase();
            SUPPORTED_EXTENSIONS.contains(&lower.as_str())
        })
        .unwrap_or(false)
}

/// Loads an image from disk and normalizes its color mode to 8-bit RGB.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let image = image::open(path)?;
    Ok(normalize_color_mode(image))
}

/// Converts any decoded color mode (RGBA, grayscale, paletted) to 8-bit RGB.
///
/// Already-RGB images are passed through without a copy.
#[must_use]
pub fn normalize_color_mode(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageRgb8(_) => image,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

/// Saves an image to the given path with the requested options.
pub fn save_image(image: &DynamicImage, path: &Path, options: &SaveOptions) -> Result<()> {
    let format = options
        .format
        .or_else(|| SaveFormat::from_path(path))
        .ok_or_else(|| {
            Error::UserInput(format!("unrecognized output format for {}", path.display()))
        })?;

    match format {
        SaveFormat::Jpeg => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            let encoder = JpegEncoder::new_with_quality(&mut writer, options.jpeg_quality.value());
            image.write_with_encoder(encoder)?;
        }
        SaveFormat::Png => {
            let file = File::create(path)?;
            let writer = BufWriter::new(file);
            let compression = if options.optimize {
                CompressionType::Best
            } else {
                CompressionType::Default
            };
            let encoder = PngEncoder::new_with_quality(writer, compression, PngFilterType::Adaptive);
            image.write_with_encoder(encoder)?;
        }
        other => {
            image.save_with_format(path, other.image_format())?;
        }
    }
    Ok(())
}

/// Builds the output path for a derived file: `prefix` + the input's file
/// name, placed in `output_dir`.
#[must_use]
pub fn derived_output_path(input: &Path, output_dir: &Path, prefix: &str) -> PathBuf {
    let file_name = input
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("image");
    output_dir.join(format!("{prefix}{file_name}"))
}
