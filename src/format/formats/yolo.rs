//! YOLO TXT label format.
//!
//! One line per annotation, `class cx cy w h`, with the box center and size
//! normalized to the image dimensions. Polygons are reduced to the
//! axis-aligned bounds of their vertices.

use std::path::Path;

use crate::format::error::FormatError;
use crate::format::traits::{ExportFormat, ExportRequest, ExportResult};
use crate::model::{Annotation, ClassId, Polygon};

/// A bounding box as fractions of the image size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedBox {
    /// Center x / image width
    pub cx: f64,
    /// Center y / image height
    pub cy: f64,
    /// Box width / image width
    pub bw: f64,
    /// Box height / image height
    pub bh: f64,
}

impl From<NormalizedBox> for (f64, f64, f64, f64) {
    fn from(b: NormalizedBox) -> Self {
        (b.cx, b.cy, b.bw, b.bh)
    }
}

/// Normalized bounding box of a polygon's vertices.
///
/// Collinear or single-pixel polygons give a zero width and/or height.
/// The caller guarantees non-zero image dimensions.
pub fn poly_to_bbox_norm(polygon: &Polygon, img_w: u32, img_h: u32) -> NormalizedBox {
    let b = polygon.bounds();
    let (w, h) = (f64::from(img_w), f64::from(img_h));
    let (x_min, x_max) = (f64::from(b.x_min), f64::from(b.x_max));
    let (y_min, y_max) = (f64::from(b.y_min), f64::from(b.y_max));

    NormalizedBox {
        cx: (x_min + x_max) / 2.0 / w,
        cy: (y_min + y_max) / 2.0 / h,
        bw: (x_max - x_min) / w,
        bh: (y_max - y_min) / h,
    }
}

/// Format one label line with six decimals per coordinate.
pub fn format_line(class_id: ClassId, bbox: NormalizedBox) -> String {
    format!(
        "{} {:.6} {:.6} {:.6} {:.6}",
        class_id, bbox.cx, bbox.cy, bbox.bw, bbox.bh
    )
}

/// Label lines for all annotations, in creation order.
pub fn export_lines<'a>(
    annotations: impl IntoIterator<Item = &'a Annotation>,
    img_w: u32,
    img_h: u32,
) -> Vec<String> {
    annotations
        .into_iter()
        .map(|ann| format_line(ann.class_id(), poly_to_bbox_norm(ann.polygon(), img_w, img_h)))
        .collect()
}

/// YOLO TXT format.
///
/// Supports:
/// - Polygons, exported as their bounding boxes
/// - One label file per image
///
/// Does not write classes.txt; class ids are the raw numbers chosen while
/// annotating.
pub struct YoloFormat;

impl ExportFormat for YoloFormat {
    fn id(&self) -> &'static str {
        "yolo"
    }

    fn display_name(&self) -> &'static str {
        "YOLO (TXT)"
    }

    fn extensions(&self) -> &[&'static str] {
        &["txt"]
    }

    fn default_file_name(&self, image_stem: &str) -> String {
        format!("{}.txt", image_stem)
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
        log::info!("Exporting YOLO labels to {:?}", path);

        let lines = export_lines(request.annotations, request.width, request.height);
        std::fs::write(path, lines.join("\n"))?;

        log::info!("Exported {} annotations", lines.len());
        Ok(ExportResult {
            annotations_exported: lines.len(),
            files_created: vec![path.to_path_buf()],
        })
    }
}
