use anyhow::{Context, Result};
use image::RgbaImage;

use lumen_engine::core::{App, AppControl, FrameCtx};
use lumen_engine::render::{RenderCtx, SpriteBatch, SpriteRenderer};
use lumen_engine::text::{FontId, FontSystem};
use lumen_engine::texture::{load_image, prepare_upload};
use lumen_engine::tiles::{tile_src, TileSheet};
use lumen_engine::time::fps_label;

use crate::config::{BasicConfig, TileSheetConfig};

/// Clears the window, tiles the background and draws the FPS label.
pub struct BasicApp {
    config: BasicConfig,
    fonts: FontSystem,
    font: FontId,
    /// Decoded before the window exists, uploaded in `on_start`.
    pending_sheet: Option<RgbaImage>,
    tiles: Option<TileSheet>,
    sprites: SpriteRenderer,
}

impl BasicApp {
    /// Loads the font and the tilesheet image. Either failing is fatal.
    pub fn new(config: BasicConfig) -> Result<Self> {
        let mut fonts = FontSystem::new();
        let font = fonts.load_font_file(&config.font_path)?;

        let pending_sheet = match &config.tilesheet {
            Some(sheet) => Some(load_tilesheet(sheet)?),
            None => None,
        };

        Ok(Self {
            config,
            fonts,
            font,
            pending_sheet,
            tiles: None,
            sprites: SpriteRenderer::new(),
        })
    }

    fn tile_index(&self) -> u32 {
        self.config.tilesheet.as_ref().map_or(0, |t| t.tile_index)
    }
}

fn load_tilesheet(sheet: &TileSheetConfig) -> Result<RgbaImage> {
    let image = load_image(&sheet.path)?;
    tile_src(image.width(), image.height(), sheet.tile_size, sheet.tile_index).with_context(|| {
        format!(
            "tile {} does not exist in {} ({}x{}, {}px tiles)",
            sheet.tile_index,
            sheet.path.display(),
            image.width(),
            image.height(),
            sheet.tile_size,
        )
    })?;
    Ok(image)
}

impl App for BasicApp {
    fn on_start(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        if let (Some(image), Some(sheet)) = (self.pending_sheet.take(), self.config.tilesheet.as_ref()) {
            let upload = prepare_upload(image, ctx.surface_format);
            let texture = self.sprites.create_texture(ctx, &upload);
            if !texture.is_optimized() {
                log::info!("tilesheet uploaded without surface conversion");
            }
            self.tiles = Some(TileSheet::new(texture, sheet.tile_size));
        }
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl> {
        // Re-rasterized every frame; the label changes too often to cache.
        let label = fps_label(ctx.fps);
        let bitmap = self
            .fonts
            .rasterize(&label, self.font, self.config.font_px, self.config.text_color)
            .with_context(|| format!("failed to render {label:?}"))?;
        let upload = prepare_upload(bitmap.image, ctx.gpu.surface_format());

        let (x, y) = self.config.label_origin;
        let tile_index = self.tile_index();
        let sprites = &mut self.sprites;
        let tiles = self.tiles.as_ref();

        ctx.render(self.config.clear_color, |rctx, target| {
            let label_texture = sprites.create_texture(rctx, &upload);

            let mut batches: Vec<SpriteBatch<'_>> = Vec::with_capacity(2);
            if let Some(background) = tiles.and_then(|t| t.background(tile_index, rctx.viewport)) {
                batches.push(background);
            }

            batches.push(SpriteBatch::single(&label_texture, x, y));

            sprites.render(rctx, target, &batches);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn temp_png(name: &str, w: u32, h: u32) -> PathBuf {
        let path = std::env::temp_dir().join(format!("lumen-basic-{}-{name}.png", std::process::id()));
        RgbaImage::new(w, h).save(&path).unwrap();
        path
    }

    #[test]
    fn missing_font_is_fatal() {
        let config = BasicConfig {
            font_path: PathBuf::from("assets/fonts/Missing.ttf"),
            tilesheet: None,
            ..BasicConfig::default()
        };
        let err = BasicApp::new(config).err().unwrap();
        assert!(format!("{err:#}").contains("Missing.ttf"));
    }

    #[test]
    fn tilesheet_with_requested_tile_loads() {
        let path = temp_png("ok", 64, 32);
        let sheet = TileSheetConfig { path: path.clone(), tile_size: 32, tile_index: 1 };
        let image = load_tilesheet(&sheet);
        std::fs::remove_file(&path).ok();
        assert_eq!(image.unwrap().dimensions(), (64, 32));
    }

    #[test]
    fn tile_index_past_the_sheet_is_fatal() {
        let path = temp_png("small", 32, 32);
        let sheet = TileSheetConfig { path: path.clone(), tile_size: 32, tile_index: 1 };
        let err = load_tilesheet(&sheet).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(err.to_string().contains("tile 1 does not exist"));
    }

    #[test]
    fn missing_tilesheet_is_fatal() {
        let sheet = TileSheetConfig {
            path: PathBuf::from("assets/images/nope.png"),
            ..TileSheetConfig::default()
        };
        assert!(load_tilesheet(&sheet).is_err());
    }
}
