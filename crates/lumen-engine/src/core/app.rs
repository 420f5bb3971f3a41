use anyhow::Result;
use winit::event::WindowEvent;

use crate::render::RenderCtx;

use super::ctx::FrameCtx;

/// Whether the loop keeps running after a callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Default event policy: quit-type events end the loop, nothing else does.
pub fn control_for_event(event: &WindowEvent) -> AppControl {
    match event {
        WindowEvent::CloseRequested | WindowEvent::Destroyed => AppControl::Exit,
        _ => AppControl::Continue,
    }
}

/// Application driven by [`Runtime`](crate::window::Runtime).
///
/// Errors returned from callbacks stop the loop and are returned from
/// `Runtime::run`.
pub trait App {
    /// Called once the window and GPU context exist, before the window is shown.
    fn on_start(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        control_for_event(event)
    }

    /// Called once per frame. The runtime paces frames after this returns.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl>;
}
