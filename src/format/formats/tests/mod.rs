//! Unit tests for export format implementations.


use crate::model::{ClassId, Point, Polygon};
use crate::state::AnnotationStore;

/// Build a polygon from `(x, y)` pairs.
fn polygon(points: &[(i32, i32)]) -> Polygon {
    Polygon::new(points.iter().copied().map(Point::from).collect()).unwrap()
}

/// Store with the given `(class, polygon)` pairs committed in order.
fn store_with(entries: &[(u32, &[(i32, i32)])]) -> AnnotationStore {
    let mut store = AnnotationStore::new();
    for (class, points) in entries {
        store.push(polygon(points), ClassId::new(*class).unwrap());
    }
    store
}
