use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::surface::{self, SurfaceErrorAction};
use super::GpuInit;

/// An acquired surface texture with an encoder recording into it.
///
/// Hand it back to [`Gpu::submit`] to present.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// Device, queue and the configured surface of one window.
///
/// Borrows the window for `'w`; dropping it releases the surface before the
/// window goes away.
pub struct Gpu<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    /// Drawable size in physical pixels. May be 0x0 while minimized.
    size: PhysicalSize<u32>,
}

impl<'w> Gpu<'w> {
    /// Creates a GPU context bound to `window`.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let info = adapter.get_info();
        log::info!("using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("lumen-engine device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults().using_resolution(adapter.limits()),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps.formats, init.prefer_srgb)
            .context("surface reports no supported formats")?;
        let alpha_mode = surface::choose_alpha_mode(&caps.alpha_modes, init.alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: init.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };
        surface.configure(&device, &config);
        log::debug!("surface configured: {format:?} {}x{}", size.width, size.height);

        Ok(Self { surface, device, queue, config, size })
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Reconfigures the surface after a resize.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        surface::apply_resize(&self.surface, &self.device, &mut self.config, &mut self.size, new_size);
    }

    /// Acquires the next surface texture and creates an encoder for it.
    pub fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("lumen frame encoder"),
            });

        Ok(GpuFrame { surface_texture, view, encoder })
    }

    /// Submits the recorded commands and presents the frame.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame { surface_texture, view, encoder } = frame;
        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }

    /// Maps a surface error to an action, reconfiguring when that helps.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        let action = surface::surface_error_action(&err);
        log::warn!("surface error: {err}");
        if action == SurfaceErrorAction::Reconfigured && self.size.width > 0 && self.size.height > 0 {
            self.surface.configure(&self.device, &self.config);
        }
        action
    }
}
