//! Annotation export system.
//!
//! Each output artifact is produced by a type implementing [`ExportFormat`]:
//!
//! - **YOLO TXT**: normalized bounding boxes, one line per polygon
//! - **Mask**: single-channel image with every polygon filled
//!
//! ## Usage
//!
//! ```rust,ignore
//! use polyseg::format::{ExportRequest, FormatRegistry};
//!
//! let registry = FormatRegistry::new();
//! let request = ExportRequest::new(editor.annotations(), 640, 480);
//! registry.get("yolo").unwrap().export(&request, Path::new("frame.txt"))?;
//! ```

mod error;
pub mod formats;
mod registry;
mod traits;

pub use error::FormatError;
pub use registry::FormatRegistry;
pub use traits::{ExportFormat, ExportRequest, ExportResult};
