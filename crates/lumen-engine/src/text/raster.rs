use std::fmt;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use image::RgbaImage;

use super::FontId;

/// Rasterized text as a straight-alpha RGBA8 image.
#[derive(Debug, Clone)]
pub struct TextBitmap {
    pub image: RgbaImage,
}

impl TextBitmap {
    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Why a string could not be rasterized.
#[derive(Debug, Clone)]
pub enum TextError {
    UnknownFont(FontId),
    /// The laid-out text has no horizontal extent.
    ZeroWidth,
}

impl fmt::Display for TextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextError::UnknownFont(id) => write!(f, "unknown font {id:?}"),
            TextError::ZeroWidth => f.write_str("text has zero width"),
        }
    }
}

impl std::error::Error for TextError {}

pub(super) fn layout(font: &fontdue::Font, text: &str, px: f32) -> Layout<()> {
    let mut layout = Layout::new(CoordinateSystem::PositiveYDown);
    layout.reset(&LayoutSettings::default());
    layout.append(&[font], &TextStyle::new(text, px, 0));
    layout
}

/// Pixel extent of a laid-out line: pen advance by line height.
pub(super) fn extent(layout: &Layout<()>, font: &fontdue::Font, px: f32) -> (u32, u32) {
    let width = layout
        .glyphs()
        .iter()
        .map(|g| {
            let m = font.metrics_indexed(g.key.glyph_index, px);
            (g.x - m.xmin as f32 + m.advance_width).max(g.x + g.width as f32)
        })
        .fold(0.0f32, f32::max);
    (width.ceil() as u32, layout.height().ceil() as u32)
}

pub(super) fn rasterize(
    font: &fontdue::Font,
    text: &str,
    px: f32,
    color: [u8; 4],
) -> Result<TextBitmap, TextError> {
    let layout = layout(font, text, px);
    let (width, height) = extent(&layout, font, px);
    if width == 0 || height == 0 {
        return Err(TextError::ZeroWidth);
    }

    let mut image = RgbaImage::new(width, height);
    for g in layout.glyphs() {
        if !g.char_data.rasterize() || g.width == 0 || g.height == 0 {
            continue;
        }
        let (metrics, coverage) = font.rasterize_config(g.key);
        blit_coverage(
            &mut image,
            width,
            height,
            &coverage,
            metrics.width as u32,
            metrics.height as u32,
            g.x.round() as i32,
            g.y.round() as i32,
            color,
        );
    }

    Ok(TextBitmap { image })
}

/// Stamps an 8-bit coverage mask into an RGBA8 buffer at `(x, y)`.
///
/// Overlapping glyphs keep the larger alpha. Parts outside the buffer are
/// clipped.
#[allow(clippy::too_many_arguments)]
pub(super) fn blit_coverage(
    dst: &mut [u8],
    dst_w: u32,
    dst_h: u32,
    coverage: &[u8],
    cov_w: u32,
    cov_h: u32,
    x: i32,
    y: i32,
    color: [u8; 4],
) {
    let [r, g, b, a] = color;
    for row in 0..cov_h as i32 {
        let dy = y + row;
        if dy < 0 || dy >= dst_h as i32 {
            continue;
        }
        for col in 0..cov_w as i32 {
            let dx = x + col;
            if dx < 0 || dx >= dst_w as i32 {
                continue;
            }
            let cov = coverage[(row as u32 * cov_w + col as u32) as usize];
            if cov == 0 {
                continue;
            }
            let alpha = ((cov as u16 * a as u16 + 127) / 255) as u8;
            let i = ((dy as u32 * dst_w + dx as u32) * 4) as usize;
            dst[i] = r;
            dst[i + 1] = g;
            dst[i + 2] = b;
            dst[i + 3] = dst[i + 3].max(alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha_at(buf: &[u8], w: u32, x: u32, y: u32) -> u8 {
        buf[((y * w + x) * 4 + 3) as usize]
    }

    #[test]
    fn coverage_is_tinted_and_placed() {
        let mut buf = vec![0u8; 4 * 4 * 4];
        blit_coverage(&mut buf, 4, 4, &[255, 128, 0, 64], 2, 2, 1, 1, [10, 20, 30, 255]);

        assert_eq!(&buf[(5 * 4) as usize..(5 * 4 + 4) as usize], &[10, 20, 30, 255]);
        assert_eq!(alpha_at(&buf, 4, 2, 1), 128);
        assert_eq!(alpha_at(&buf, 4, 1, 2), 0);
        assert_eq!(alpha_at(&buf, 4, 2, 2), 64);
        assert_eq!(alpha_at(&buf, 4, 0, 0), 0);
    }

    #[test]
    fn color_alpha_scales_coverage() {
        let mut buf = vec![0u8; 4];
        blit_coverage(&mut buf, 1, 1, &[255], 1, 1, 0, 0, [255, 255, 255, 128]);
        assert_eq!(buf[3], 128);
    }

    #[test]
    fn out_of_bounds_parts_are_clipped() {
        let mut buf = vec![0u8; 2 * 2 * 4];
        blit_coverage(&mut buf, 2, 2, &[255; 9], 3, 3, -1, -1, [255; 4]);
        assert_eq!(alpha_at(&buf, 2, 0, 0), 255);
        assert_eq!(alpha_at(&buf, 2, 1, 1), 255);

        let mut buf = vec![0u8; 2 * 2 * 4];
        blit_coverage(&mut buf, 2, 2, &[255; 4], 2, 2, 5, 5, [255; 4]);
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn overlapping_glyphs_keep_the_stronger_alpha() {
        let mut buf = vec![0u8; 4];
        blit_coverage(&mut buf, 1, 1, &[200], 1, 1, 0, 0, [255; 4]);
        blit_coverage(&mut buf, 1, 1, &[50], 1, 1, 0, 0, [255; 4]);
        assert_eq!(buf[3], 200);
    }
}
