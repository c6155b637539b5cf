//! Trait definitions for export format implementations.

use std::path::{Path, PathBuf};

use crate::format::error::FormatError;
use crate::state::AnnotationStore;

/// Trait for annotation export formats.
///
/// Each format turns the committed annotations of one image into a single
/// output file.
pub trait ExportFormat: Send + Sync {
    /// Unique identifier for this format (e.g., "yolo", "mask").
    fn id(&self) -> &'static str;

    /// Human-readable name for UI display.
    fn display_name(&self) -> &'static str;

    /// File extensions this format writes (first one is the default).
    fn extensions(&self) -> &[&'static str];

    /// Default output file name for an image with the given file stem.
    fn default_file_name(&self, image_stem: &str) -> String;

    /// Write the export for `request` to the file at `path`.
    fn export(&self, request: &ExportRequest<'_>, path: &Path)
    -> Result<ExportResult, FormatError>;
}

/// Everything a format needs to export one image's annotations.
#[derive(Debug, Clone, Copy)]
pub struct ExportRequest<'a> {
    /// Committed annotations in creation order.
    pub annotations: &'a AnnotationStore,
    /// Source image width in pixels.
    pub width: u32,
    /// Source image height in pixels.
    pub height: u32,
}

impl<'a> ExportRequest<'a> {
    pub fn new(annotations: &'a AnnotationStore, width: u32, height: u32) -> Self {
        Self {
            annotations,
            width,
            height,
        }
    }
}

/// Result of an export operation.
#[derive(Debug, Default)]
pub struct ExportResult {
    /// Number of annotations written.
    pub annotations_exported: usize,

    /// Files created during export.
    pub files_created: Vec<PathBuf>,
}
