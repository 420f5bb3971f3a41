//! Font loading and CPU text rasterization.
//!
//! Text is rasterized into a plain RGBA8 bitmap each time it is requested;
//! turning that into a GPU texture is the sprite renderer's job.

mod font_system;
mod raster;

pub use font_system::{FontId, FontLoadError, FontSystem};
pub use raster::{TextBitmap, TextError};
