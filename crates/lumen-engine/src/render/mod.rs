//! GPU rendering.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down)
//! - the vertex shader converts to NDC using a viewport uniform
//! - each renderer owns its pipelines and buffers and builds them lazily

mod common;
mod ctx;
pub mod sprite;

pub use ctx::{RenderCtx, RenderTarget};
pub use sprite::{SpriteBatch, SpriteQuad, SpriteRenderer, Texture};
