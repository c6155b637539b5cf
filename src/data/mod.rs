//! Loading of the images being annotated.
//!
//! ```rust,ignore
//! use polyseg::data::ImageLoader;
//!
//! let info = ImageLoader.load(Path::new("datasets/frame_001.png"))?;
//! println!("{}x{}", info.width, info.height);
//! ```

mod loader;

pub use loader::{ImageInfo, ImageLoader, LoaderError};
