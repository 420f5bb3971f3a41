use crate::coords::Viewport;
use crate::device::{Gpu, GpuFrame};

/// What a renderer needs to create resources and size its output.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    /// Pipelines and optimized textures are built for this format.
    pub surface_format: wgpu::TextureFormat,
    /// Logical pixels.
    pub viewport: Viewport,
}

impl<'a> RenderCtx<'a> {
    pub fn for_gpu(gpu: &'a Gpu<'_>, viewport: Viewport) -> Self {
        Self {
            device: gpu.device(),
            queue: gpu.queue(),
            surface_format: gpu.surface_format(),
            viewport,
        }
    }
}

/// The frame being recorded into.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    pub fn for_frame(frame: &'a mut GpuFrame) -> Self {
        Self { encoder: &mut frame.encoder, view: &frame.view }
    }
}
