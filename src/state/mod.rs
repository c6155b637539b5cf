//! Annotation session state.

mod editor;
mod store;

pub use editor::PolygonEditor;
pub use store::AnnotationStore;
