//! Geometry shared by renderers and applications.
//!
//! Logical pixels, origin top-left, +Y down. Texture-space rects use the same
//! type but are measured in texels.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
