//! Lumen engine crate.
//!
//! A small single-window runtime: `winit` for the platform loop, `wgpu` for
//! drawing, `fontdue` for text. Frames are paced to the display's refresh
//! rate by sleeping out each frame's unused budget.

pub mod core;
pub mod device;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod text;
pub mod texture;
pub mod tiles;
