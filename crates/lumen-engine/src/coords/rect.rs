use super::Vec2;

/// Axis-aligned rectangle (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rect at the origin with the given pixel size.
    #[inline]
    pub fn from_size(w: u32, h: u32) -> Self {
        Self { origin: Vec2::ZERO, size: Vec2::from_pixels(w, h) }
    }

    /// Same size, moved to `(x, y)`.
    #[inline]
    pub fn at(self, x: f32, y: f32) -> Self {
        Self { origin: Vec2::new(x, y), size: self.size }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }
}
