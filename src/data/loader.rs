//! Loader for the raster images being annotated.
//!
//! Any format the `image` crate can decode is accepted (PNG, JPEG, BMP, TIFF,
//! WebP, GIF, ...). Only the path and pixel dimensions are kept: the editor
//! needs nothing else, and the renderer reads pixels on its own.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::Point;

/// Reference to the image currently being annotated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    /// Path the image was loaded from.
    pub path: PathBuf,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageInfo {
    pub fn new(path: PathBuf, width: u32, height: u32) -> Self {
        Self {
            path,
            width,
            height,
        }
    }

    /// File stem used to derive default export names, `"image"` if absent.
    pub fn stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("image")
    }

    /// Nearest pixel inside the image.
    pub fn clamp(&self, p: Point) -> Point {
        let max_x = i32::try_from(self.width.saturating_sub(1)).unwrap_or(i32::MAX);
        let max_y = i32::try_from(self.height.saturating_sub(1)).unwrap_or(i32::MAX);
        Point::new(p.x.clamp(0, max_x), p.y.clamp(0, max_y))
    }
}

/// Errors that can occur while loading an image.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// The file could not be read
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a decodable image
    #[error("Failed to decode image {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The image decoded to zero pixels
    #[error("Image {path:?} has no pixels ({width}x{height})")]
    Empty {
        path: PathBuf,
        width: u32,
        height: u32,
    },
}

/// Decodes image files with the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageLoader;

impl ImageLoader {
    /// Identifier used in log output.
    pub fn id(&self) -> &'static str {
        "image"
    }

    /// Read and decode the file at `path`.
    pub fn load(&self, path: &Path) -> Result<ImageInfo, LoaderError> {
        let bytes = std::fs::read(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_from_memory(path, &bytes)
    }

    /// Decode already-read bytes; `path` is recorded as the image origin.
    pub fn load_from_memory(&self, path: &Path, data: &[u8]) -> Result<ImageInfo, LoaderError> {
        let img = image::load_from_memory(data).map_err(|source| LoaderError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let (width, height) = (img.width(), img.height());
        if width == 0 || height == 0 {
            return Err(LoaderError::Empty {
                path: path.to_path_buf(),
                width,
                height,
            });
        }

        log::trace!(
            "{}: decoded {:?} as {}x{} ({:?})",
            self.id(),
            path,
            width,
            height,
            img.color()
        );
        Ok(ImageInfo::new(path.to_path_buf(), width, height))
    }
}
