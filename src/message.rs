//! Messages delivered to the annotation session.
//!
//! All user input is represented as messages in the Elm architecture style;
//! the front end translates clicks, wheel events, and buttons into these.

use std::path::PathBuf;

use crate::model::Point;
use crate::zoom_math::ScreenPos;

/// Messages that can be sent to update session state.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Image
    /// Load an image; `None` asks the file prompt
    OpenImage(Option<PathBuf>),
    /// Discard image and annotations
    Reset,

    // Drawing
    /// Pointer pressed at a display position
    PointerPressed(ScreenPos),
    /// Add a vertex already in image coordinates
    AddPoint(Point),
    /// Commit the open chain
    ClosePolygon,
    /// Undo the last polygon, or the open chain
    Undo,
    /// Select the class for new polygons
    SelectClass(u32),

    // Export
    /// Save the filled mask; `None` asks the file prompt
    SaveMask(Option<PathBuf>),
    /// Save YOLO labels; `None` asks the file prompt
    SaveLabels(Option<PathBuf>),

    // View
    /// Zoom by wheel notches around the cursor (positive zooms in)
    Zoom { steps: i32, cursor: ScreenPos },
    /// Pan the view by a display-space delta
    Pan { dx: f32, dy: f32 },
    /// Back to zoom 1, no pan
    ResetView,
}
