use anyhow::{bail, Result};
use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};
use crate::time::{FrameTime, RefreshRate};

use super::app::AppControl;

/// The window being drawn.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Drawable area in logical pixels.
    pub fn viewport(&self) -> Viewport {
        Viewport::from_physical(self.window.inner_size(), self.window.scale_factor())
    }
}

/// Per-frame context passed to [`App::on_frame`](super::App::on_frame).
///
/// `'a` is the callback, `'w` the window borrow carried by `Gpu<'w>`.
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub time: FrameTime,
    /// Rate measured up to the previous frame.
    pub fps: f32,
    /// Rate the runtime paces frames at.
    pub refresh: RefreshRate,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Clears the surface to `clear`, lets `draw` record into it, then presents.
    ///
    /// Transient surface errors skip the frame. An out-of-memory surface is
    /// an error.
    pub fn render<F>(&mut self, clear: Color, draw: F) -> Result<AppControl>
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>) -> Result<()>,
    {
        let viewport = self.window.viewport();
        if !viewport.is_valid() {
            return Ok(AppControl::Continue);
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => match self.gpu.handle_surface_error(err) {
                SurfaceErrorAction::Fatal => bail!("surface lost: out of memory"),
                _ => return Ok(AppControl::Continue),
            },
        };

        // Clear pass; dropped before the encoder is lent to `draw`.
        {
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("lumen clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        {
            let rctx = RenderCtx::for_gpu(self.gpu, viewport);
            let mut target = RenderTarget::for_frame(&mut frame);
            draw(&rctx, &mut target)?;
        }

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);

        Ok(AppControl::Continue)
    }
}
