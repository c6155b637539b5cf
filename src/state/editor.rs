//! Polygon drawing state machine.
//!
//! `PolygonEditor` is the one explicit state object of an annotation session:
//! the loaded image reference, the open vertex chain, the active class, and
//! the committed annotations. Every operation returns the [`SceneChange`]s a
//! renderer needs to mirror the new state.

use crate::data::ImageInfo;
use crate::model::{ClassId, Point, Polygon, SceneChange};
use crate::state::AnnotationStore;

/// Editor state for one image.
#[derive(Debug, Clone, Default)]
pub struct PolygonEditor {
    image: Option<ImageInfo>,
    chain: Option<Vec<Point>>,
    annotations: AnnotationStore,
    active_class: ClassId,
}

impl PolygonEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard everything and install a freshly loaded image.
    pub fn load_image(&mut self, image: ImageInfo) -> Vec<SceneChange> {
        let mut changes = self.reset();
        log::debug!(
            "Editor: image {:?} ({}x{}) loaded",
            image.path,
            image.width,
            image.height
        );
        changes.push(SceneChange::ImageShown {
            width: image.width,
            height: image.height,
        });
        self.image = Some(image);
        changes
    }

    /// The loaded image, if any.
    pub fn image(&self) -> Option<&ImageInfo> {
        self.image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Committed annotations in commit order.
    pub fn annotations(&self) -> &AnnotationStore {
        &self.annotations
    }

    /// Vertices of the open chain, if one exists.
    pub fn open_chain(&self) -> Option<&[Point]> {
        self.chain.as_deref()
    }

    pub fn active_class(&self) -> ClassId {
        self.active_class
    }

    /// Select the class assigned to subsequent commits.
    pub fn set_active_class(&mut self, class_id: ClassId) {
        self.active_class = class_id;
    }

    /// Append a vertex to the open chain, starting one if needed.
    ///
    /// Ignored while no image is loaded.
    pub fn add_point(&mut self, point: Point) -> Vec<SceneChange> {
        if self.image.is_none() {
            log::debug!("Editor: ignoring point {:?}, no image loaded", point);
            return Vec::new();
        }

        let chain = self.chain.get_or_insert_with(Vec::new);
        chain.push(point);
        log::trace!("Editor: chain has {} points", chain.len());

        vec![SceneChange::PreviewUpdated {
            points: chain.clone(),
        }]
    }

    /// Commit the open chain as an annotation with the active class.
    ///
    /// Chains shorter than [`crate::model::MIN_POLYGON_VERTICES`] are left
    /// open and nothing is reported.
    pub fn close_polygon(&mut self) -> Vec<SceneChange> {
        let Some(polygon) = self.chain.clone().and_then(Polygon::new) else {
            log::debug!(
                "Editor: close ignored, chain has {} points",
                self.chain.as_ref().map_or(0, Vec::len)
            );
            return Vec::new();
        };
        self.chain = None;

        let class_id = self.active_class;
        let id = self.annotations.push(polygon.clone(), class_id);
        log::debug!(
            "Editor: committed annotation {} ({} vertices, class {})",
            id,
            polygon.vertex_count(),
            class_id
        );

        vec![
            SceneChange::ShapeAdded {
                id,
                polygon,
                class_id,
            },
            SceneChange::PreviewCleared,
        ]
    }

    /// Undo: drop the last committed annotation, or else the open chain.
    pub fn clear_polygon(&mut self) -> Vec<SceneChange> {
        if let Some(removed) = self.annotations.pop() {
            log::debug!("Editor: undid annotation {}", removed.id());
            return vec![SceneChange::ShapeRemoved { id: removed.id() }];
        }

        if let Some(chain) = self.chain.take() {
            log::debug!("Editor: discarded open chain of {} points", chain.len());
            return vec![SceneChange::PreviewCleared];
        }

        Vec::new()
    }

    /// Full teardown: chain, annotations, and image reference.
    pub fn reset(&mut self) -> Vec<SceneChange> {
        let dropped = self.annotations.clear();
        self.chain = None;
        if self.image.take().is_some() || dropped > 0 {
            log::debug!("Editor: reset, {} annotations dropped", dropped);
        }
        vec![SceneChange::SceneCleared]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn editor_with_image() -> PolygonEditor {
        let mut editor = PolygonEditor::new();
        editor.load_image(ImageInfo::new(PathBuf::from("scene.png"), 640, 480));
        editor
    }

    fn add_square(editor: &mut PolygonEditor, offset: i32) {
        for (x, y) in [(0, 0), (10, 0), (10, 10), (0, 10)] {
            editor.add_point(Point::new(x + offset, y));
        }
    }

    #[test]
    fn test_add_point_requires_image() {
        let mut editor = PolygonEditor::new();
        assert!(editor.add_point(Point::new(1, 1)).is_empty());
        assert!(editor.open_chain().is_none());
    }

    #[test]
    fn test_add_point_updates_preview() {
        let mut editor = editor_with_image();
        editor.add_point(Point::new(1, 2));
        let changes = editor.add_point(Point::new(3, 4));

        assert_eq!(
            changes,
            vec![SceneChange::PreviewUpdated {
                points: vec![Point::new(1, 2), Point::new(3, 4)]
            }]
        );
        assert!(editor.annotations().is_empty());
    }

    #[test]
    fn test_close_short_chain_is_noop() {
        let mut editor = editor_with_image();
        editor.add_point(Point::new(0, 0));
        editor.add_point(Point::new(5, 5));

        assert!(editor.close_polygon().is_empty());
        assert!(editor.annotations().is_empty());
        assert_eq!(editor.open_chain().map(<[Point]>::len), Some(2));
    }

    #[test]
    fn test_short_chain_can_be_extended_and_closed() {
        let mut editor = editor_with_image();
        editor.add_point(Point::new(0, 0));
        editor.add_point(Point::new(8, 0));
        assert!(editor.close_polygon().is_empty());

        editor.add_point(Point::new(4, 6));
        assert_eq!(editor.close_polygon().len(), 2);
        assert_eq!(editor.annotations().len(), 1);
        assert_eq!(
            editor.annotations().last().unwrap().polygon().vertices(),
            &[Point::new(0, 0), Point::new(8, 0), Point::new(4, 6)]
        );
        assert!(editor.open_chain().is_none());
    }

    #[test]
    fn test_close_without_chain_is_noop() {
        let mut editor = editor_with_image();
        assert!(editor.close_polygon().is_empty());
    }

    #[test]
    fn test_close_commits_with_active_class() {
        let mut editor = editor_with_image();
        editor.set_active_class(ClassId::new(3).unwrap());
        add_square(&mut editor, 0);

        let changes = editor.close_polygon();
        assert_eq!(changes.len(), 2);
        assert!(matches!(changes[0], SceneChange::ShapeAdded { .. }));
        assert_eq!(changes[1], SceneChange::PreviewCleared);

        let ann = editor.annotations().last().unwrap();
        assert_eq!(ann.class_id().get(), 3);
        assert_eq!(ann.polygon().vertex_count(), 4);
        assert!(editor.open_chain().is_none());
    }

    #[test]
    fn test_undo_is_lifo() {
        let mut editor = editor_with_image();
        let mut ids = Vec::new();
        for i in 0..3 {
            add_square(&mut editor, i * 20);
            editor.close_polygon();
            ids.push(editor.annotations().last().unwrap().id());
        }

        assert_eq!(
            editor.clear_polygon(),
            vec![SceneChange::ShapeRemoved { id: ids[2] }]
        );
        assert_eq!(
            editor.clear_polygon(),
            vec![SceneChange::ShapeRemoved { id: ids[1] }]
        );
        assert_eq!(editor.annotations().len(), 1);
        assert_eq!(editor.annotations().last().unwrap().id(), ids[0]);
    }

    #[test]
    fn test_undo_past_empty_is_noop() {
        let mut editor = editor_with_image();
        for i in 0..2 {
            add_square(&mut editor, i * 20);
            editor.close_polygon();
        }

        editor.clear_polygon();
        editor.clear_polygon();
        assert!(editor.annotations().is_empty());
        assert!(editor.clear_polygon().is_empty());
    }

    #[test]
    fn test_undo_prefers_committed_over_open_chain() {
        let mut editor = editor_with_image();
        add_square(&mut editor, 0);
        editor.close_polygon();
        editor.add_point(Point::new(50, 50));

        let changes = editor.clear_polygon();
        assert!(matches!(changes[0], SceneChange::ShapeRemoved { .. }));
        assert_eq!(editor.open_chain().map(<[Point]>::len), Some(1));

        assert_eq!(editor.clear_polygon(), vec![SceneChange::PreviewCleared]);
        assert!(editor.open_chain().is_none());
    }

    #[test]
    fn test_reset_discards_everything() {
        let mut editor = editor_with_image();
        add_square(&mut editor, 0);
        editor.close_polygon();
        editor.add_point(Point::new(1, 1));

        assert_eq!(editor.reset(), vec![SceneChange::SceneCleared]);
        assert!(editor.annotations().is_empty());
        assert!(editor.open_chain().is_none());
        assert!(!editor.has_image());
    }

    #[test]
    fn test_load_image_discards_previous_annotations() {
        let mut editor = editor_with_image();
        add_square(&mut editor, 0);
        editor.close_polygon();

        let changes = editor.load_image(ImageInfo::new(PathBuf::from("next.png"), 32, 16));
        assert_eq!(
            changes,
            vec![
                SceneChange::SceneCleared,
                SceneChange::ImageShown {
                    width: 32,
                    height: 16
                }
            ]
        );
        assert!(editor.annotations().is_empty());
        assert_eq!(editor.image().unwrap().width, 32);
    }

    #[test]
    fn test_active_class_survives_commit() {
        let mut editor = editor_with_image();
        editor.set_active_class(ClassId::new(7).unwrap());
        add_square(&mut editor, 0);
        editor.close_polygon();
        add_square(&mut editor, 20);
        editor.close_polygon();

        assert!(editor.annotations().iter().all(|a| a.class_id().get() == 7));
    }
}
