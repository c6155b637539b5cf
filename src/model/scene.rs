//! Scene updates handed to the rendering collaborator.
//!
//! The editor never draws anything itself. Each operation returns the list of
//! changes the renderer has to apply to stay in sync with the editor state.

use crate::model::{AnnotationId, ClassId, Point, Polygon};

/// A single change to the rendered scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneChange {
    /// Replace the dashed preview with an open path through these points.
    PreviewUpdated { points: Vec<Point> },
    /// Remove the preview path.
    PreviewCleared,
    /// Draw a committed polygon, tagged with its annotation id.
    ShapeAdded {
        id: AnnotationId,
        polygon: Polygon,
        class_id: ClassId,
    },
    /// Remove the shape tagged with this annotation id.
    ShapeRemoved { id: AnnotationId },
    /// Drop everything, including the background image.
    SceneCleared,
    /// Show a freshly loaded image with the given size.
    ImageShown { width: u32, height: u32 },
}
