use std::path::PathBuf;

use lumen_engine::paint::Color;
use lumen_engine::window::RuntimeConfig;
use winit::dpi::LogicalSize;

/// Which tile of which sheet fills the background.
#[derive(Debug, Clone)]
pub struct TileSheetConfig {
    pub path: PathBuf,
    pub tile_size: u32,
    pub tile_index: u32,
}

impl Default for TileSheetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("assets/images/tilesheet.png"),
            tile_size: 32,
            tile_index: 0,
        }
    }
}

/// Demo settings. Asset paths are relative to the working directory.
#[derive(Debug, Clone)]
pub struct BasicConfig {
    pub title: String,
    pub size: LogicalSize<f64>,
    pub fullscreen: bool,

    pub font_path: PathBuf,
    pub font_px: f32,
    /// Straight sRGB.
    pub text_color: [u8; 4],
    /// Top-left corner of the FPS label.
    pub label_origin: (f32, f32),

    pub clear_color: Color,
    /// `None` draws the clear color only.
    pub tilesheet: Option<TileSheetConfig>,
}

impl BasicConfig {
    pub fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: self.size,
            fullscreen: self.fullscreen,
        }
    }
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            title: "lumen-basic".to_string(),
            size: LogicalSize::new(800.0, 600.0),
            fullscreen: false,
            font_path: PathBuf::from("assets/fonts/Hack-Regular.ttf"),
            font_px: 16.0,
            text_color: [255, 255, 255, 255],
            label_origin: (10.0, 10.0),
            clear_color: Color::from_srgb_u8(125, 125, 255, 255),
            tilesheet: Some(TileSheetConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_demo_window() {
        let cfg = BasicConfig::default();
        assert_eq!(cfg.size, LogicalSize::new(800.0, 600.0));
        assert_eq!(cfg.font_path, PathBuf::from("assets/fonts/Hack-Regular.ttf"));
        assert_eq!(cfg.font_px, 16.0);
        assert!(!cfg.fullscreen);
    }

    #[test]
    fn runtime_config_carries_the_fullscreen_flag() {
        let cfg = BasicConfig { fullscreen: true, ..BasicConfig::default() };
        let rt = cfg.runtime();
        assert!(rt.fullscreen);
        assert_eq!(rt.title, "lumen-basic");
    }
}
