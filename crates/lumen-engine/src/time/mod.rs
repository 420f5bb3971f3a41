//! Time subsystem.
//!
//! Frame timing utilities, kept free of the runtime so they can be tested:
//! - `FrameClock` produces per-frame delta time
//! - `RefreshRate` snaps a display rate onto a canonical one
//! - `FramePacer` sleeps out the unused part of a frame budget
//! - `FpsCounter` tracks the rendered frame rate

mod fps;
mod frame_clock;
mod pacer;
mod refresh;

pub use fps::{fps_from, fps_label, FpsCounter};
pub use frame_clock::{FrameClock, FrameTime};
pub use pacer::FramePacer;
pub use refresh::{normalize_hz, RefreshRate, DEFAULT_REFRESH_HZ};
