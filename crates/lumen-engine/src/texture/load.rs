use std::path::Path;

use anyhow::{Context, Result};
use image::RgbaImage;

/// Decodes an image file into straight-alpha RGBA8.
///
/// Zero-sized images are rejected since no texture can be made from them.
pub fn load_image(path: impl AsRef<Path>) -> Result<RgbaImage> {
    let path = path.as_ref();
    let image = image::open(path)
        .with_context(|| format!("failed to load image {}", path.display()))?
        .into_rgba8();

    anyhow::ensure!(
        image.width() > 0 && image.height() > 0,
        "image {} is empty",
        path.display()
    );

    log::debug!("loaded {} ({}x{})", path.display(), image.width(), image.height());
    Ok(image)
}
