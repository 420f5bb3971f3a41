/// Linear premultiplied RGBA color.
///
/// Invariant: `r`, `g`, `b` are already multiplied by `a`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::from_premul(1.0, 1.0, 1.0, 1.0);

    /// Creates a premultiplied color from components that already are.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight-alpha components in `[0, 1]`.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    /// Creates a color from straight sRGB bytes, e.g. `(125, 125, 255, 255)`.
    ///
    /// The sRGB transfer curve is removed so the value can be written to an
    /// sRGB surface unchanged.
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(
            srgb_to_linear(r),
            srgb_to_linear(g),
            srgb_to_linear(b),
            a as f32 / 255.0,
        )
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

fn srgb_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_alpha_is_premultiplied() {
        let c = Color::from_straight(1.0, 0.5, 0.0, 0.5);
        assert_eq!(c, Color::from_premul(0.5, 0.25, 0.0, 0.5));
    }

    #[test]
    fn srgb_extremes_map_to_linear_extremes() {
        let white = Color::from_srgb_u8(255, 255, 255, 255);
        assert!((white.r - 1.0).abs() < 1e-6);
        let black = Color::from_srgb_u8(0, 0, 0, 255);
        assert_eq!(black.to_array(), [0.0, 0.0, 0.0, 1.0]);
    }
}
