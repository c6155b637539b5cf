//! Export format implementations.

mod mask;
mod yolo;

#[cfg(test)]
mod tests;

pub use mask::MaskFormat;
pub use yolo::{NormalizedBox, YoloFormat, export_lines, format_line, poly_to_bbox_norm};
