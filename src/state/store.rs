//! Ordered storage for committed annotations.

use crate::model::{Annotation, AnnotationId, ClassId, Polygon};

/// Committed annotations for the loaded image, in commit order.
///
/// Every annotation gets a fresh id from a monotonically increasing counter.
/// Ids are never reused within a store, so a renderer can use them as shape
/// tags even across undo.
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
    next_id: AnnotationId,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self {
            annotations: Vec::new(),
            next_id: 1,
        }
    }

    /// Append an annotation and return its id.
    pub fn push(&mut self, polygon: Polygon, class_id: ClassId) -> AnnotationId {
        let id = self.next_id;
        self.next_id += 1;
        self.annotations.push(Annotation::new(id, polygon, class_id));
        id
    }

    /// Remove and return the most recently committed annotation.
    pub fn pop(&mut self) -> Option<Annotation> {
        self.annotations.pop()
    }

    /// The most recently committed annotation.
    pub fn last(&self) -> Option<&Annotation> {
        self.annotations.last()
    }

    /// Get an annotation by ID.
    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id() == id)
    }

    /// Iterate in commit order.
    pub fn iter(&self) -> std::slice::Iter<'_, Annotation> {
        self.annotations.iter()
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Remove all annotations and return how many were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.annotations.len();
        self.annotations.clear();
        count
    }
}

impl Default for AnnotationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a AnnotationStore {
    type Item = &'a Annotation;
    type IntoIter = std::slice::Iter<'a, Annotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
