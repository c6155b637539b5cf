//! Pan/zoom view transform and screen-to-image mapping.
//!
//! The editor only ever sees image-space pixels. Whatever sits between the
//! pointer and the editor implements [`CoordinateMapper`]; [`Transform`] is
//! the pan/zoom implementation used by the session.

use crate::model::Point;

/// A pointer position in display (widget) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPos {
    pub x: f32,
    pub y: f32,
}

impl ScreenPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Maps display positions back to image pixels.
///
/// Must be the exact inverse of the transform currently used for drawing, so
/// a click lands on the pixel shown under the cursor at any zoom level.
pub trait CoordinateMapper {
    /// Image pixel under the given display position.
    fn screen_to_image(&self, pos: ScreenPos) -> Point;
}

/// Represents pan/zoom transform state.
///
/// Image point `p` is drawn at `p * zoom + pan` in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub zoom: f32,
    pub pan_x: f32,
    pub pan_y: f32,
}

impl Transform {
    /// Create a new transform with the given zoom and pan.
    pub fn new(zoom: f32, pan_x: f32, pan_y: f32) -> Self {
        Self { zoom, pan_x, pan_y }
    }

    /// Create an identity transform (zoom=1, no pan).
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Display position of the top-left corner of image pixel `p`.
    pub fn image_to_screen(&self, p: Point) -> ScreenPos {
        ScreenPos::new(
            p.x as f32 * self.zoom + self.pan_x,
            p.y as f32 * self.zoom + self.pan_y,
        )
    }

    /// Continuous image-space coordinates under a display position.
    pub fn screen_to_image_f(&self, pos: ScreenPos) -> (f32, f32) {
        (
            (pos.x - self.pan_x) / self.zoom,
            (pos.y - self.pan_y) / self.zoom,
        )
    }

    /// Zoom to `new_zoom`, keeping the image point under the cursor fixed.
    pub fn zoom_to_cursor(&self, new_zoom: f32, cursor: ScreenPos) -> Transform {
        let (img_x, img_y) = self.screen_to_image_f(cursor);
        Transform {
            zoom: new_zoom,
            pan_x: cursor.x - img_x * new_zoom,
            pan_y: cursor.y - img_y * new_zoom,
        }
    }

    /// Apply a pan delta to the transform.
    pub fn pan_by(&self, dx: f32, dy: f32) -> Transform {
        Transform {
            zoom: self.zoom,
            pan_x: self.pan_x + dx,
            pan_y: self.pan_y + dy,
        }
    }

    /// Zoom in by a factor (e.g., 1.25 per wheel notch), capped at `max_zoom`.
    pub fn zoom_in(&self, factor: f32, max_zoom: f32) -> Transform {
        Transform {
            zoom: (self.zoom * factor).min(max_zoom),
            ..*self
        }
    }

    /// Zoom out by a factor, floored at `min_zoom`.
    pub fn zoom_out(&self, factor: f32, min_zoom: f32) -> Transform {
        Transform {
            zoom: (self.zoom / factor).max(min_zoom),
            ..*self
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl CoordinateMapper for Transform {
    fn screen_to_image(&self, pos: ScreenPos) -> Point {
        let (x, y) = self.screen_to_image_f(pos);
        Point::new(x.floor() as i32, y.floor() as i32)
    }
}
