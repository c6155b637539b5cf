//! Annotation session controller.
//!
//! [`Session`] wires user [`Message`]s to the editor, the view transform, the
//! image loader, and the export formats. It never draws anything: every
//! update returns the [`SceneChange`]s for the renderer plus an optional
//! [`Notice`] for the user.

use std::path::{Path, PathBuf};

use crate::config::{AppConfig, UserPreferences};
use crate::data::ImageLoader;
use crate::format::{ExportRequest, FormatRegistry};
use crate::message::Message;
use crate::model::{ClassId, Point, SceneChange};
use crate::state::PolygonEditor;
use crate::zoom_math::{CoordinateMapper, ScreenPos, Transform};

/// Format ids used by the save messages.
const MASK_FORMAT: &str = "mask";
const LABELS_FORMAT: &str = "yolo";

// ============================================================================
// File prompts
// ============================================================================

/// Asks the user for file paths. Returning `None` means the user cancelled.
pub trait FilePrompt {
    /// Pick an image to open, starting in `start_dir`.
    fn pick_image(&mut self, start_dir: &Path) -> Option<PathBuf>;

    /// Pick a destination for an export, pre-filled with `suggested`.
    fn pick_save_path(&mut self, title: &str, suggested: &Path) -> Option<PathBuf>;
}

/// Prompt that always cancels, for scripted sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrompt;

impl FilePrompt for NoPrompt {
    fn pick_image(&mut self, _start_dir: &Path) -> Option<PathBuf> {
        None
    }

    fn pick_save_path(&mut self, _title: &str, _suggested: &Path) -> Option<PathBuf> {
        None
    }
}

// ============================================================================
// Update results
// ============================================================================

/// A short message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
}

/// Outcome of one [`Session::update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    /// Changes the renderer must apply, in order.
    pub scene: Vec<SceneChange>,
    pub notice: Option<Notice>,
}

impl Response {
    fn scene(scene: Vec<SceneChange>) -> Self {
        Self {
            scene,
            notice: None,
        }
    }

    fn info(text: impl Into<String>) -> Self {
        Self {
            scene: Vec::new(),
            notice: Some(Notice::Info(text.into())),
        }
    }

    fn warning(text: impl Into<String>) -> Self {
        Self {
            scene: Vec::new(),
            notice: Some(Notice::Warning(text.into())),
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// One interactive annotation session.
pub struct Session {
    prefs: UserPreferences,
    editor: PolygonEditor,
    transform: Transform,
    loader: ImageLoader,
    formats: FormatRegistry,
}

impl Session {
    pub fn new(config: &AppConfig) -> Self {
        let prefs = config.preferences.clone();
        let mut editor = PolygonEditor::new();
        editor.set_active_class(prefs.default_class);

        Self {
            prefs,
            editor,
            transform: Transform::identity(),
            loader: ImageLoader,
            formats: FormatRegistry::new(),
        }
    }

    pub fn editor(&self) -> &PolygonEditor {
        &self.editor
    }

    /// Current view transform; draw with it so clicks map back exactly.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Apply one message.
    pub fn update(&mut self, message: Message, prompt: &mut dyn FilePrompt) -> Response {
        match message {
            Message::OpenImage(path) => self.open_image(path, prompt),
            Message::Reset => {
                self.transform = Transform::identity();
                log::info!("🔄 Session reset");
                Response::scene(self.editor.reset())
            }

            Message::PointerPressed(pos) => {
                let point = self.transform.screen_to_image(pos);
                log::trace!("Pointer ({:.1}, {:.1}) -> pixel {:?}", pos.x, pos.y, point);
                self.add_point(point)
            }
            Message::AddPoint(point) => self.add_point(point),
            Message::ClosePolygon => Response::scene(self.editor.close_polygon()),
            Message::Undo => Response::scene(self.editor.clear_polygon()),
            Message::SelectClass(id) => match ClassId::new(id) {
                Ok(class_id) => {
                    self.editor.set_active_class(class_id);
                    log::debug!("🏷️  Active class: {}", class_id);
                    Response::default()
                }
                Err(e) => Response::warning(e.to_string()),
            },

            Message::SaveMask(path) => self.export(MASK_FORMAT, path, prompt),
            Message::SaveLabels(path) => self.export(LABELS_FORMAT, path, prompt),

            Message::Zoom { steps, cursor } => {
                self.zoom(steps, cursor);
                Response::default()
            }
            Message::Pan { dx, dy } => {
                self.transform = self.transform.pan_by(dx, dy);
                log::debug!(
                    "Pan: ({:.0}, {:.0})",
                    self.transform.pan_x,
                    self.transform.pan_y
                );
                Response::default()
            }
            Message::ResetView => {
                self.transform = Transform::identity();
                log::debug!("🔄 View reset");
                Response::default()
            }
        }
    }

    fn open_image(&mut self, path: Option<PathBuf>, prompt: &mut dyn FilePrompt) -> Response {
        let path = match path {
            Some(path) => path,
            None => match prompt.pick_image(&self.prefs.dataset_dir) {
                Some(path) => path,
                None => {
                    log::debug!("📂 Open cancelled");
                    return Response::default();
                }
            },
        };

        // Decode before touching state so a bad file leaves the session as it was.
        match self.loader.load(&path) {
            Ok(info) => {
                log::info!("📂 Loaded {:?} ({}x{})", info.path, info.width, info.height);
                let text = format!("Opened {} ({}x{})", path.display(), info.width, info.height);
                self.transform = Transform::identity();
                Response {
                    scene: self.editor.load_image(info),
                    notice: Some(Notice::Info(text)),
                }
            }
            Err(e) => {
                log::warn!("📂 {}", e);
                Response::warning(format!("Could not open image: {e}"))
            }
        }
    }

    fn add_point(&mut self, point: Point) -> Response {
        let Some(image) = self.editor.image() else {
            log::debug!("Point {:?} ignored, no image loaded", point);
            return Response::default();
        };
        let point = image.clamp(point);
        Response::scene(self.editor.add_point(point))
    }

    fn zoom(&mut self, steps: i32, cursor: ScreenPos) {
        let prefs = &self.prefs;
        // Overflows to infinity for huge step counts, which the limits absorb.
        let factor = prefs.zoom_step.powi(steps.saturating_abs());
        let target = if steps > 0 {
            self.transform.zoom_in(factor, prefs.max_zoom)
        } else {
            self.transform.zoom_out(factor, prefs.min_zoom)
        };
        self.transform = self.transform.zoom_to_cursor(target.zoom, cursor);
        log::debug!("🔍 Zoom: {:.2}x", self.transform.zoom);
    }

    fn export(
        &self,
        format_id: &str,
        path: Option<PathBuf>,
        prompt: &mut dyn FilePrompt,
    ) -> Response {
        let Some(image) = self.editor.image() else {
            log::debug!("💾 Nothing to save, no image loaded");
            return Response::default();
        };
        let annotations = self.editor.annotations();
        if annotations.is_empty() {
            log::debug!("💾 Nothing to save, no annotations");
            return Response::default();
        }
        let Some(format) = self.formats.get(format_id) else {
            log::error!(
                "💾 Export format '{}' is not registered (have {:?})",
                format_id,
                self.formats.ids()
            );
            return Response::warning(format!("Unknown export format '{format_id}'"));
        };

        let path = match path {
            Some(path) => path,
            None => {
                let suggested = self
                    .prefs
                    .dataset_dir
                    .join(format.default_file_name(image.stem()));
                match prompt.pick_save_path(format.display_name(), &suggested) {
                    Some(path) => path,
                    None => {
                        log::debug!("💾 Save cancelled");
                        return Response::default();
                    }
                }
            }
        };

        let request = ExportRequest::new(annotations, image.width, image.height);
        match format.export(&request, &path) {
            Ok(result) => Response::info(format!(
                "Saved {} annotations as {} to {}",
                result.annotations_exported,
                format.display_name(),
                path.display()
            )),
            Err(e) => {
                log::warn!("💾 {} export to {:?} failed: {}", format.id(), path, e);
                Response::warning(format!("Could not save {}: {e}", path.display()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::zoom;
    use image::{GrayImage, ImageFormat};

    /// Prompt answering with fixed paths and recording what it was asked.
    #[derive(Default)]
    struct StubPrompt {
        image: Option<PathBuf>,
        save: Option<PathBuf>,
        suggested: Vec<PathBuf>,
        calls: usize,
    }

    impl FilePrompt for StubPrompt {
        fn pick_image(&mut self, _start_dir: &Path) -> Option<PathBuf> {
            self.calls += 1;
            self.image.clone()
        }

        fn pick_save_path(&mut self, _title: &str, suggested: &Path) -> Option<PathBuf> {
            self.calls += 1;
            self.suggested.push(suggested.to_path_buf());
            self.save.clone()
        }
    }

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        GrayImage::new(width, height)
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();
        path
    }

    fn session_with_image(dir: &Path) -> Session {
        let mut config = AppConfig::new();
        config.preferences.dataset_dir = dir.to_path_buf();
        let mut session = Session::new(&config);
        let path = write_png(dir, "cells.png", 640, 480);
        session.update(Message::OpenImage(Some(path)), &mut NoPrompt);
        session
    }

    fn draw_triangle(session: &mut Session) {
        for (x, y) in [(100, 100), (200, 100), (150, 200)] {
            session.update(Message::AddPoint(Point::new(x, y)), &mut NoPrompt);
        }
        session.update(Message::ClosePolygon, &mut NoPrompt);
    }

    #[test]
    fn test_open_image_reports_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(&AppConfig::new());
        let path = write_png(dir.path(), "a.png", 32, 16);

        let response = session.update(Message::OpenImage(Some(path)), &mut NoPrompt);
        assert_eq!(
            response.scene,
            vec![
                SceneChange::SceneCleared,
                SceneChange::ImageShown {
                    width: 32,
                    height: 16
                }
            ]
        );
        assert!(matches!(response.notice, Some(Notice::Info(_))));
    }

    #[test]
    fn test_failed_open_keeps_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_image(dir.path());
        draw_triangle(&mut session);

        let bad = dir.path().join("broken.png");
        std::fs::write(&bad, b"not an image").unwrap();
        let response = session.update(Message::OpenImage(Some(bad)), &mut NoPrompt);

        assert!(response.scene.is_empty());
        assert!(matches!(response.notice, Some(Notice::Warning(_))));
        assert_eq!(session.editor().annotations().len(), 1);
        assert_eq!(session.editor().image().unwrap().width, 640);
    }

    #[test]
    fn test_cancelled_open_is_noop() {
        let mut session = Session::new(&AppConfig::new());
        let mut prompt = StubPrompt::default();

        let response = session.update(Message::OpenImage(None), &mut prompt);
        assert_eq!(response, Response::default());
        assert_eq!(prompt.calls, 1);
    }

    #[test]
    fn test_pointer_maps_through_transform() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_image(dir.path());
        session.update(
            Message::Zoom {
                steps: 1,
                cursor: ScreenPos::new(0.0, 0.0),
            },
            &mut NoPrompt,
        );
        session.update(Message::Pan { dx: 10.0, dy: 0.0 }, &mut NoPrompt);

        // zoom 1.25, pan (10, 0): screen (135, 50) -> image (100, 40)
        let response = session.update(
            Message::PointerPressed(ScreenPos::new(135.0, 50.0)),
            &mut NoPrompt,
        );
        assert_eq!(
            response.scene,
            vec![SceneChange::PreviewUpdated {
                points: vec![Point::new(100, 40)]
            }]
        );
    }

    #[test]
    fn test_points_outside_image_are_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_image(dir.path());

        session.update(
            Message::PointerPressed(ScreenPos::new(-20.0, 900.0)),
            &mut NoPrompt,
        );
        assert_eq!(
            session.editor().open_chain(),
            Some(&[Point::new(0, 479)][..])
        );
    }

    #[test]
    fn test_zoom_respects_limits() {
        let mut config = AppConfig::new();
        config.preferences.max_zoom = 2.0;
        let mut session = Session::new(&config);

        session.update(
            Message::Zoom {
                steps: 10,
                cursor: ScreenPos::new(5.0, 5.0),
            },
            &mut NoPrompt,
        );
        assert_eq!(session.transform().zoom, 2.0);

        session.update(Message::ResetView, &mut NoPrompt);
        assert_eq!(session.transform(), Transform::identity());
    }

    #[test]
    fn test_zoom_steps_compound() {
        let mut session = Session::new(&AppConfig::new());
        let cursor = ScreenPos::new(0.0, 0.0);

        session.update(Message::Zoom { steps: 2, cursor }, &mut NoPrompt);
        assert!((session.transform().zoom - 1.5625).abs() < 1e-6);

        session.update(Message::Zoom { steps: -2, cursor }, &mut NoPrompt);
        assert!((session.transform().zoom - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_extreme_zoom_steps_hit_limits() {
        let mut session = Session::new(&AppConfig::new());
        let cursor = ScreenPos::new(40.0, 30.0);

        session.update(
            Message::Zoom {
                steps: i32::MAX,
                cursor,
            },
            &mut NoPrompt,
        );
        assert_eq!(session.transform().zoom, zoom::MAX);
        assert!(session.transform().pan_x.is_finite());

        session.update(
            Message::Zoom {
                steps: i32::MIN,
                cursor,
            },
            &mut NoPrompt,
        );
        assert_eq!(session.transform().zoom, zoom::MIN);
        assert!(session.transform().pan_y.is_finite());
    }

    #[test]
    fn test_select_class_validates_range() {
        let mut session = Session::new(&AppConfig::new());

        let ok = session.update(Message::SelectClass(9999), &mut NoPrompt);
        assert_eq!(ok.notice, None);
        assert_eq!(session.editor().active_class().get(), 9999);

        let bad = session.update(Message::SelectClass(10_000), &mut NoPrompt);
        assert!(matches!(bad.notice, Some(Notice::Warning(_))));
        assert_eq!(session.editor().active_class().get(), 9999);
    }

    #[test]
    fn test_default_class_from_config() {
        let mut config = AppConfig::new();
        config.preferences.default_class = ClassId::new(4).unwrap();
        let session = Session::new(&config);
        assert_eq!(session.editor().active_class().get(), 4);
    }

    #[test]
    fn test_save_without_annotations_skips_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let mut prompt = StubPrompt::default();

        let mut empty = Session::new(&AppConfig::new());
        assert_eq!(
            empty.update(Message::SaveMask(None), &mut prompt),
            Response::default()
        );

        let mut session = session_with_image(dir.path());
        assert_eq!(
            session.update(Message::SaveLabels(None), &mut prompt),
            Response::default()
        );
        assert_eq!(prompt.calls, 0);
    }

    #[test]
    fn test_save_labels_via_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_image(dir.path());
        session.update(Message::SelectClass(2), &mut NoPrompt);
        draw_triangle(&mut session);

        let out = dir.path().join("labels.txt");
        let mut prompt = StubPrompt {
            save: Some(out.clone()),
            ..Default::default()
        };
        let response = session.update(Message::SaveLabels(None), &mut prompt);

        assert!(matches!(response.notice, Some(Notice::Info(_))));
        assert_eq!(prompt.suggested, vec![dir.path().join("cells.txt")]);
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "2 0.234375 0.312500 0.156250 0.208333"
        );
    }

    #[test]
    fn test_save_mask_to_given_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_image(dir.path());
        draw_triangle(&mut session);

        let out = dir.path().join("cells_mask.png");
        let mut prompt = StubPrompt::default();
        session.update(Message::SaveMask(Some(out.clone())), &mut prompt);

        assert_eq!(prompt.calls, 0);
        let mask = image::open(&out).unwrap().to_luma8();
        assert_eq!(mask.dimensions(), (640, 480));
        assert_eq!(mask.get_pixel(150, 120).0, [255]);
        assert_eq!(mask.get_pixel(10, 10).0, [0]);
    }

    #[test]
    fn test_cancelled_save_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_image(dir.path());
        draw_triangle(&mut session);

        let mut prompt = StubPrompt::default();
        let response = session.update(Message::SaveMask(None), &mut prompt);
        assert_eq!(response, Response::default());
        assert_eq!(prompt.suggested, vec![dir.path().join("cells_mask.png")]);
        assert!(!dir.path().join("cells_mask.png").exists());
    }

    #[test]
    fn test_save_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_image(dir.path());
        draw_triangle(&mut session);

        let out = dir.path().join("missing").join("labels.txt");
        let response = session.update(Message::SaveLabels(Some(out)), &mut NoPrompt);
        assert!(matches!(response.notice, Some(Notice::Warning(_))));
    }

    #[test]
    fn test_reset_clears_view_and_annotations() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_image(dir.path());
        draw_triangle(&mut session);
        session.update(Message::Pan { dx: 3.0, dy: 4.0 }, &mut NoPrompt);

        let response = session.update(Message::Reset, &mut NoPrompt);
        assert_eq!(response.scene, vec![SceneChange::SceneCleared]);
        assert!(session.editor().annotations().is_empty());
        assert!(!session.editor().has_image());
        assert_eq!(session.transform(), Transform::identity());
    }
}
