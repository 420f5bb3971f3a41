use winit::dpi::{LogicalSize, PhysicalSize};

/// Window area drawn into, in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Converts a window's physical inner size at `scale_factor`.
    pub fn from_physical(size: PhysicalSize<u32>, scale_factor: f64) -> Self {
        let logical: LogicalSize<f64> = size.to_logical(scale_factor);
        Self::new(logical.width as f32, logical.height as f32)
    }

    /// Nothing can be drawn into a minimized (zero-sized) window.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_size_is_divided_by_scale() {
        let vp = Viewport::from_physical(PhysicalSize::new(1600, 1200), 2.0);
        assert_eq!(vp, Viewport::new(800.0, 600.0));
    }

    #[test]
    fn minimized_window_is_invalid() {
        assert!(!Viewport::from_physical(PhysicalSize::new(0, 0), 1.0).is_valid());
        assert!(!Viewport::new(f32::INFINITY, 10.0).is_valid());
        assert!(Viewport::new(800.0, 600.0).is_valid());
    }
}
