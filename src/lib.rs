//! Polyseg - polygon segmentation annotator
//!
//! Draw polygons over an image, tag each with a class id, and export them as a
//! binary segmentation mask or as YOLO bounding-box labels.
//!
//! The core is rendering-free: [`state::PolygonEditor`] owns the drawing state
//! and reports [`model::SceneChange`]s, [`raster`] fills polygons into a
//! [`raster::Mask`], and [`format`] writes the export files. [`app::Session`]
//! ties these to user [`message::Message`]s.

pub mod app;
pub mod command;
pub mod config;
pub mod constants;
pub mod data;
pub mod format;
pub mod message;
pub mod model;
pub mod raster;
pub mod state;
pub mod zoom_math;

pub use app::{FilePrompt, Notice, Response, Session};
