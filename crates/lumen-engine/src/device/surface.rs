use winit::dpi::PhysicalSize;

/// How the frame loop reacts to a failed surface acquire.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Lost or outdated; reconfigured, try again next frame.
    Reconfigured,
    /// Timed out; this frame is dropped.
    SkipFrame,
    /// Out of memory. The runtime gives up.
    Fatal,
}

pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let first = formats.first().copied()?;
    if prefer_srgb {
        if let Some(f) = formats.iter().copied().find(|f| f.is_srgb()) {
            return Some(f);
        }
    }
    Some(first)
}

pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Records `new_size` and reconfigures the surface unless it is zero-sized.
///
/// wgpu rejects 0x0 surfaces (minimized windows); configuration is deferred
/// until a real size arrives.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) {
    *size = new_size;
    if new_size.width == 0 || new_size.height == 0 {
        return;
    }
    config.width = new_size.width;
    config.height = new_size.height;
    surface.configure(device, config);
}

pub(crate) fn surface_error_action(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use wgpu::{CompositeAlphaMode as A, TextureFormat as F};

    use super::*;

    #[test]
    fn srgb_is_preferred_when_offered() {
        let formats = [F::Bgra8Unorm, F::Bgra8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, true), Some(F::Bgra8UnormSrgb));
        assert_eq!(choose_surface_format(&formats, false), Some(F::Bgra8Unorm));
    }

    #[test]
    fn first_format_when_no_srgb() {
        assert_eq!(choose_surface_format(&[F::Rgb10a2Unorm], true), Some(F::Rgb10a2Unorm));
        assert_eq!(choose_surface_format(&[], true), None);
    }

    #[test]
    fn unsupported_alpha_mode_falls_back() {
        assert_eq!(choose_alpha_mode(&[A::Opaque], Some(A::PreMultiplied)), A::Opaque);
        assert_eq!(choose_alpha_mode(&[A::Opaque, A::PreMultiplied], Some(A::PreMultiplied)), A::PreMultiplied);
        assert_eq!(choose_alpha_mode(&[], None), A::Auto);
    }

    #[test]
    fn surface_errors_map_to_actions() {
        assert_eq!(surface_error_action(&wgpu::SurfaceError::Lost), SurfaceErrorAction::Reconfigured);
        assert_eq!(surface_error_action(&wgpu::SurfaceError::Outdated), SurfaceErrorAction::Reconfigured);
        assert_eq!(surface_error_action(&wgpu::SurfaceError::Timeout), SurfaceErrorAction::SkipFrame);
        assert_eq!(surface_error_action(&wgpu::SurfaceError::OutOfMemory), SurfaceErrorAction::Fatal);
    }
}
