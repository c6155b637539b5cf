//! Error types for export operations.

use thiserror::Error;

/// Errors that can occur while writing export artifacts.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding error while writing a mask
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    /// Image dimensions are zero, so coordinates cannot be normalized
    #[error("Image dimensions {width}x{height} are not usable for format '{format}'")]
    InvalidDimensions {
        /// The format requiring dimensions
        format: String,
        /// Width that was supplied
        width: u32,
        /// Height that was supplied
        height: u32,
    },
}

impl FormatError {
    /// Create an invalid dimensions error.
    pub fn invalid_dimensions(format: impl Into<String>, width: u32, height: u32) -> Self {
        Self::InvalidDimensions {
            format: format.into(),
            width,
            height,
        }
    }
}
