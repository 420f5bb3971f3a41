//! Contract between the runtime loop and applications.
//!
//! Applications implement [`App`]; the runtime owns the window, GPU context
//! and frame pacing and calls back into the app once per frame.

mod app;
mod ctx;

pub use app::{control_for_event, App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
