//! Annotation geometry and record types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a committed annotation.
///
/// Used as the tag the renderer attaches to the shape it draws, so undo can
/// remove exactly that shape.
pub type AnnotationId = u64;

/// Minimum number of vertices required for a valid polygon.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Largest class identifier a label may carry.
pub const MAX_CLASS_ID: u32 = 9999;

/// An integer pixel coordinate in image space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Inclusive pixel bounds of a vertex set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

/// A committable polygon: an ordered vertex list with at least
/// [`MIN_POLYGON_VERTICES`] points.
///
/// The closing edge from the last vertex back to the first is implicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Build a polygon from a vertex chain.
    /// Returns None if the chain is too short to enclose an area.
    pub fn new(vertices: Vec<Point>) -> Option<Self> {
        if vertices.len() >= MIN_POLYGON_VERTICES {
            Some(Self { vertices })
        } else {
            None
        }
    }

    /// The vertices in traversal order.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Iterate over edges `(from, to)`, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Whether all vertices lie on one line (or coincide).
    ///
    /// A self-crossing polygon whose lobes cancel in the shoelace sum is not
    /// degenerate: it still encloses pixels.
    pub fn is_degenerate(&self) -> bool {
        let origin = self.vertices[0];
        let Some(dir) = self.vertices.iter().find(|&&p| p != origin) else {
            return true;
        };
        let (dx, dy) = (
            i64::from(dir.x) - i64::from(origin.x),
            i64::from(dir.y) - i64::from(origin.y),
        );
        self.vertices.iter().all(|p| {
            let (px, py) = (
                i64::from(p.x) - i64::from(origin.x),
                i64::from(p.y) - i64::from(origin.y),
            );
            dx * py - dy * px == 0
        })
    }

    /// Axis-aligned bounds over all vertices.
    pub fn bounds(&self) -> PixelBounds {
        let first = self.vertices[0];
        self.vertices.iter().skip(1).fold(
            PixelBounds {
                x_min: first.x,
                y_min: first.y,
                x_max: first.x,
                y_max: first.y,
            },
            |b, p| PixelBounds {
                x_min: b.x_min.min(p.x),
                y_min: b.y_min.min(p.y),
                x_max: b.x_max.max(p.x),
                y_max: b.y_max.max(p.y),
            },
        )
    }
}

impl TryFrom<Vec<Point>> for Polygon {
    type Error = TooFewVertices;

    fn try_from(vertices: Vec<Point>) -> Result<Self, Self::Error> {
        let count = vertices.len();
        Self::new(vertices).ok_or(TooFewVertices(count))
    }
}

impl From<Polygon> for Vec<Point> {
    fn from(polygon: Polygon) -> Self {
        polygon.vertices
    }
}

/// A vertex chain was too short to form a polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("polygon needs at least {MIN_POLYGON_VERTICES} vertices, got {0}")]
pub struct TooFewVertices(pub usize);

/// Class label attached to an annotation, in `0..=MAX_CLASS_ID`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ClassId(u32);

impl ClassId {
    pub fn new(id: u32) -> Result<Self, InvalidClassId> {
        if id <= MAX_CLASS_ID {
            Ok(Self(id))
        } else {
            Err(InvalidClassId(id))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for ClassId {
    type Error = InvalidClassId;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<ClassId> for u32 {
    fn from(id: ClassId) -> Self {
        id.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A class id outside `0..=MAX_CLASS_ID` was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("class id {0} is out of range (0..={MAX_CLASS_ID})")]
pub struct InvalidClassId(pub u32);

/// A committed polygon with its class. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    id: AnnotationId,
    polygon: Polygon,
    class_id: ClassId,
}

impl Annotation {
    pub(crate) fn new(id: AnnotationId, polygon: Polygon, class_id: ClassId) -> Self {
        Self {
            id,
            polygon,
            class_id,
        }
    }

    pub fn id(&self) -> AnnotationId {
        self.id
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn class_id(&self) -> ClassId {
        self.class_id
    }
}
