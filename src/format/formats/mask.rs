//! Binary segmentation mask format.
//!
//! Writes all committed polygons as one 8-bit grayscale image: 255 inside any
//! polygon, 0 elsewhere. The encoder follows the file extension when it is one
//! of the lossless [`MaskFormat`] extensions; anything else (including lossy
//! JPEG) is written as PNG so values stay exactly 0 or 255.

use std::path::Path;

use image::ImageFormat;

use crate::format::error::FormatError;
use crate::format::traits::{ExportFormat, ExportRequest, ExportResult};
use crate::raster;

/// Grayscale mask image format.
pub struct MaskFormat;

impl MaskFormat {
    /// Lossless encoder for `path`, PNG unless the extension names another.
    fn encoder_for(&self, path: &Path) -> ImageFormat {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext {
            Some(ext) if self.extensions().contains(&ext.as_str()) => {
                ImageFormat::from_extension(&ext).unwrap_or(ImageFormat::Png)
            }
            other => {
                log::debug!("Mask extension {:?} is not lossless, writing PNG", other);
                ImageFormat::Png
            }
        }
    }
}

impl ExportFormat for MaskFormat {
    fn id(&self) -> &'static str {
        "mask"
    }

    fn display_name(&self) -> &'static str {
        "Segmentation mask (PNG)"
    }

    fn extensions(&self) -> &[&'static str] {
        &["png", "bmp", "tif", "tiff"]
    }

    fn default_file_name(&self, image_stem: &str) -> String {
        format!("{}_mask.png", image_stem)
    }

    fn export(
        &self,
        request: &ExportRequest<'_>,
        path: &Path,
    ) -> Result<ExportResult, FormatError> {
        if request.width == 0 || request.height == 0 {
            return Err(FormatError::invalid_dimensions(
                self.id(),
                request.width,
                request.height,
            ));
        }
        log::info!("Exporting mask to {:?}", path);

        let mask = raster::rasterize(request.annotations, request.width, request.height);
        let format = self.encoder_for(path);
        mask.to_gray_image().save_with_format(path, format)?;

        Ok(ExportResult {
            annotations_exported: request.annotations.len(),
            files_created: vec![path.to_path_buf()],
        })
    }
}
