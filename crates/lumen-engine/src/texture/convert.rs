use std::fmt;

use image::RgbaImage;

/// Pixels ready to be written into a new texture.
#[derive(Debug, Clone)]
pub struct TextureUpload {
    pub width: u32,
    pub height: u32,
    pub format: wgpu::TextureFormat,
    /// Straight-alpha texels in `format` channel order.
    pub pixels: Vec<u8>,
    /// `false` when this is the unconverted fallback.
    pub optimized: bool,
}

impl TextureUpload {
    /// The image as-is, RGBA8 sRGB.
    pub fn unoptimized(image: RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            pixels: image.into_raw(),
            optimized: false,
        }
    }

    #[inline]
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }
}

/// Why an image could not be converted to a surface's native layout.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// The surface format is not an 8-bit RGBA/BGRA format.
    UnsupportedTarget(wgpu::TextureFormat),
    Empty,
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::UnsupportedTarget(format) => {
                write!(f, "cannot convert to surface format {format:?}")
            }
            ConvertError::Empty => f.write_str("image has no pixels"),
        }
    }
}

impl std::error::Error for ConvertError {}

/// Converts `image` to the channel order of `target`.
///
/// The texture is always sRGB-encoded since image data is, regardless of
/// whether the surface itself is.
pub fn optimize_for(image: &RgbaImage, target: wgpu::TextureFormat) -> Result<TextureUpload, ConvertError> {
    use wgpu::TextureFormat as F;

    if image.width() == 0 || image.height() == 0 {
        return Err(ConvertError::Empty);
    }

    let (format, swap_rb) = match target {
        F::Rgba8Unorm | F::Rgba8UnormSrgb => (F::Rgba8UnormSrgb, false),
        F::Bgra8Unorm | F::Bgra8UnormSrgb => (F::Bgra8UnormSrgb, true),
        other => return Err(ConvertError::UnsupportedTarget(other)),
    };

    let mut pixels = image.as_raw().clone();
    if swap_rb {
        for px in pixels.chunks_exact_mut(4) {
            px.swap(0, 2);
        }
    }

    Ok(TextureUpload {
        width: image.width(),
        height: image.height(),
        format,
        pixels,
        optimized: true,
    })
}

/// Converts `image` for `target`, falling back to the raw image on failure.
pub fn prepare_upload(image: RgbaImage, target: wgpu::TextureFormat) -> TextureUpload {
    match optimize_for(&image, target) {
        Ok(upload) => upload,
        Err(err) => {
            log::warn!("{err}; uploading unoptimized texture");
            TextureUpload::unoptimized(image)
        }
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    fn sample() -> RgbaImage {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([10, 20, 30, 40]));
        img.put_pixel(1, 0, Rgba([50, 60, 70, 80]));
        img
    }

    #[test]
    fn rgba_target_keeps_channel_order() {
        let up = optimize_for(&sample(), wgpu::TextureFormat::Rgba8Unorm).unwrap();
        assert!(up.optimized);
        assert_eq!(up.format, wgpu::TextureFormat::Rgba8UnormSrgb);
        assert_eq!(up.pixels, vec![10, 20, 30, 40, 50, 60, 70, 80]);
    }

    #[test]
    fn bgra_target_swaps_red_and_blue() {
        let up = optimize_for(&sample(), wgpu::TextureFormat::Bgra8UnormSrgb).unwrap();
        assert_eq!(up.format, wgpu::TextureFormat::Bgra8UnormSrgb);
        assert_eq!(up.pixels, vec![30, 20, 10, 40, 70, 60, 50, 80]);
        assert_eq!(up.bytes_per_row(), 8);
    }

    #[test]
    fn wide_gamut_target_is_unsupported() {
        let err = optimize_for(&sample(), wgpu::TextureFormat::Rgba16Float).unwrap_err();
        assert_eq!(err, ConvertError::UnsupportedTarget(wgpu::TextureFormat::Rgba16Float));
    }

    #[test]
    fn empty_image_cannot_be_optimized() {
        let err = optimize_for(&RgbaImage::new(0, 0), wgpu::TextureFormat::Rgba8Unorm).unwrap_err();
        assert_eq!(err, ConvertError::Empty);
    }

    #[test]
    fn failed_conversion_falls_back_to_raw_pixels() {
        let up = prepare_upload(sample(), wgpu::TextureFormat::Rgb10a2Unorm);
        assert!(!up.optimized);
        assert_eq!(up.format, wgpu::TextureFormat::Rgba8UnormSrgb);
        assert_eq!((up.width, up.height), (2, 1));
        assert!(!up.pixels.is_empty());
        assert_eq!(up.pixels, sample().into_raw());
    }

    #[test]
    fn successful_conversion_is_used() {
        let up = prepare_upload(sample(), wgpu::TextureFormat::Bgra8Unorm);
        assert!(up.optimized);
    }
}
