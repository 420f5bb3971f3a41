/// GPU layer settings.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when the surface offers one.
    pub prefer_srgb: bool,

    /// Swap behavior. `Fifo` is vsync and is supported everywhere.
    pub present_mode: wgpu::PresentMode,

    /// Requested alpha mode; an unsupported request falls back to the first
    /// mode the surface reports.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub power_preference: wgpu::PowerPreference,

    /// Hint only; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            power_preference: wgpu::PowerPreference::HighPerformance,
            desired_maximum_frame_latency: 2,
        }
    }
}
