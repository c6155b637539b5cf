//! Polygon mask rasterization.
//!
//! Fills committed polygons into a single-channel mask. Pixel centers sit on
//! integer coordinates, so a vertex at `(x, y)` names the pixel `(x, y)`.
//! Interiors are filled row by row under the nonzero winding rule, then every
//! edge is traced so boundary pixels are always part of the region.

use image::{GrayImage, Luma};

use crate::model::{Annotation, Point, Polygon};

/// Value written for pixels inside any polygon.
pub const MASK_FOREGROUND: u8 = 1;

/// Value a foreground pixel takes in the persisted 8-bit image.
pub const MASK_SAVED_FOREGROUND: u8 = 255;

/// Row-major single-channel mask with values 0 (background) or 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Mask {
    /// All-background mask of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw row-major values.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Value at `(x, y)`, or None outside the mask.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.data[self.index(x, y)])
        } else {
            None
        }
    }

    /// Number of foreground pixels.
    pub fn filled_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Scale {0,1} to {0,255} for saving as an 8-bit grayscale image.
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            let v = self.data[self.index(x, y)];
            Luma([if v != 0 { MASK_SAVED_FOREGROUND } else { 0 }])
        })
    }

    /// Fill one polygon into the mask. Degenerate polygons leave it untouched.
    pub fn fill_polygon(&mut self, polygon: &Polygon) {
        if self.width == 0 || self.height == 0 || polygon.is_degenerate() {
            return;
        }
        self.fill_interior(polygon);
        for (a, b) in polygon.edges() {
            self.draw_line(a, b);
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Set a pixel given signed coordinates, ignoring anything outside.
    fn set(&mut self, x: i64, y: i64) {
        if x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height) {
            let idx = self.index(x as u32, y as u32);
            self.data[idx] = MASK_FOREGROUND;
        }
    }

    /// Fill `[x_start, x_end]` on row `y`, clipped to the mask.
    fn fill_span(&mut self, y: i64, x_start: i64, x_end: i64) {
        let x_start = x_start.max(0);
        let x_end = x_end.min(i64::from(self.width) - 1);
        if x_start > x_end {
            return;
        }
        let row = self.index(0, y as u32);
        self.data[row + x_start as usize..=row + x_end as usize].fill(MASK_FOREGROUND);
    }

    /// Scanline fill with nonzero winding.
    ///
    /// Edges count on the half-open row range `[y_top, y_bottom)` so shared
    /// vertices are not crossed twice; the bottom rows come from edge tracing.
    fn fill_interior(&mut self, polygon: &Polygon) {
        let bounds = polygon.bounds();
        let y_first = i64::from(bounds.y_min).max(0);
        let y_last = i64::from(bounds.y_max).min(i64::from(self.height) - 1);

        let mut crossings: Vec<(f64, i32)> = Vec::with_capacity(polygon.vertex_count());
        for y in y_first..=y_last {
            crossings.clear();
            for (a, b) in polygon.edges() {
                if a.y == b.y {
                    continue;
                }
                let (top, bottom, winding) = if a.y < b.y { (a, b, 1) } else { (b, a, -1) };
                let (y_top, y_bottom) = (i64::from(top.y), i64::from(bottom.y));
                if y < y_top || y >= y_bottom {
                    continue;
                }
                let t = (y - y_top) as f64 / (y_bottom - y_top) as f64;
                let x = f64::from(top.x) + t * f64::from(bottom.x - top.x);
                crossings.push((x, winding));
            }
            crossings.sort_by(|l, r| l.0.total_cmp(&r.0));

            let mut winding = 0;
            for pair in crossings.windows(2) {
                winding += pair[0].1;
                if winding != 0 {
                    self.fill_span(y, pair[0].0.ceil() as i64, pair[1].0.floor() as i64);
                }
            }
        }
    }

    /// Bresenham line including both endpoints.
    fn draw_line(&mut self, from: Point, to: Point) {
        let (mut x, mut y) = (i64::from(from.x), i64::from(from.y));
        let (x1, y1) = (i64::from(to.x), i64::from(to.y));
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set(x, y);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

/// Fill every annotation's polygon into a `width`×`height` mask.
///
/// Classes are ignored: overlapping polygons merge into one region of value 1.
pub fn rasterize<'a>(
    annotations: impl IntoIterator<Item = &'a Annotation>,
    width: u32,
    height: u32,
) -> Mask {
    let mut mask = Mask::new(width, height);
    let mut count = 0usize;
    for annotation in annotations {
        mask.fill_polygon(annotation.polygon());
        count += 1;
    }
    log::debug!(
        "Rasterized {} polygons into {}x{} mask ({} pixels set)",
        count,
        width,
        height,
        mask.filled_count()
    );
    mask
}
