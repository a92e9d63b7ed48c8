//! Image file I/O for the canvas through the `image` crate.

use std::io;
use std::path::Path;

use image::{ImageFormat, RgbaImage};
use thiserror::Error;

use crate::surface::{Surface, SurfaceError};

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),
    #[error("unsupported image extension: {extension}")]
    UnsupportedExtension { extension: String },
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

pub type CodecResult<T> = std::result::Result<T, CodecError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormatKind {
    Png,
    Jpeg,
    Tiff,
    Gif,
    Bmp,
}

const EXTENSION_TABLE: &[(&str, ImageFormatKind)] = &[
    ("png", ImageFormatKind::Png),
    ("jpeg", ImageFormatKind::Jpeg),
    ("jpg", ImageFormatKind::Jpeg),
    ("jpe", ImageFormatKind::Jpeg),
    ("tiff", ImageFormatKind::Tiff),
    ("tif", ImageFormatKind::Tiff),
    ("gif", ImageFormatKind::Gif),
    ("bmp", ImageFormatKind::Bmp),
];

impl ImageFormatKind {
    /// Picks the format from the file extension; no extension means PNG.
    pub fn from_path(path: &Path) -> CodecResult<Self> {
        let Some(extension) = path.extension() else {
            return Ok(Self::Png);
        };
        let extension = extension.to_string_lossy().to_ascii_lowercase();
        EXTENSION_TABLE
            .iter()
            .find(|(candidate, _)| *candidate == extension)
            .map(|(_, kind)| *kind)
            .ok_or(CodecError::UnsupportedExtension { extension })
    }

    pub const fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Tiff => ImageFormat::Tiff,
            Self::Gif => ImageFormat::Gif,
            Self::Bmp => ImageFormat::Bmp,
        }
    }

    /// JPEG has no alpha channel.
    pub const fn supports_alpha(self) -> bool {
        !matches!(self, Self::Jpeg)
    }
}

pub fn load_image(path: &Path) -> CodecResult<Surface> {
    let image = image::open(path)?.to_rgba8();
    let (width, height) = image.dimensions();
    let surface = Surface::from_rgba8(width, height, image.as_raw())?;
    tracing::info!(path = %path.display(), width, height, "image loaded");
    Ok(surface)
}

pub fn save_image(path: &Path, surface: &Surface) -> CodecResult<()> {
    let kind = ImageFormatKind::from_path(path)?;
    let (width, height) = (surface.width(), surface.height());
    let bytes = surface.to_rgba8();
    let actual = bytes.len();
    let rgba =
        RgbaImage::from_raw(width, height, bytes).ok_or(SurfaceError::BufferSizeMismatch {
            width,
            height,
            expected: width as usize * height as usize * 4,
            actual,
        })?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    if kind.supports_alpha() {
        rgba.save_with_format(path, kind.image_format())?;
    } else {
        image::DynamicImage::ImageRgba8(rgba)
            .to_rgb8()
            .save_with_format(path, kind.image_format())?;
    }
    tracing::info!(
        path = %path.display(),
        format = ?kind,
        width,
        height,
        "image saved"
    );
    Ok(())
}
