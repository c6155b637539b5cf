//! Global constants for the annotation session.

/// Folder the file dialogs start in when no config overrides it.
pub const DEFAULT_DATASET_DIR: &str = "../datasets";

/// View zoom settings.
pub mod zoom {
    /// Zoom factor per wheel notch
    pub const STEP: f32 = 1.25;
    /// Lower zoom limit
    pub const MIN: f32 = 0.05;
    /// Upper zoom limit
    pub const MAX: f32 = 64.0;
}
