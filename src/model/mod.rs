//! Data models for polygon annotation.

mod annotation;
mod scene;

pub use annotation::{
    Annotation, AnnotationId, ClassId, InvalidClassId, MAX_CLASS_ID, MIN_POLYGON_VERTICES,
    PixelBounds, Point, Polygon, TooFewVertices,
};
pub use scene::SceneChange;
