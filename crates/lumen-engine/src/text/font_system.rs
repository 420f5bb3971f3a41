use std::fmt;
use std::path::Path;

use super::raster::{self, TextBitmap, TextError};

/// Error returned when a font cannot be read or parsed.
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load font: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Owns the loaded fonts. Fonts are immutable once loaded.
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Parses a TrueType or OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    /// Reads and parses a font file.
    pub fn load_font_file(&mut self, path: impl AsRef<Path>) -> Result<FontId, FontLoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| FontLoadError(format!("{}: {e}", path.display())))?;
        self.load_font(&bytes)
            .map_err(|e| FontLoadError(format!("{}: {}", path.display(), e.0)))
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Renders `text` at `px` pixels into a straight-alpha RGBA8 bitmap.
    ///
    /// Glyph coverage is blended (anti-aliased) and tinted with `color`, given
    /// as straight sRGB bytes. Nothing is cached.
    pub fn rasterize(
        &self,
        text: &str,
        id: FontId,
        px: f32,
        color: [u8; 4],
    ) -> Result<TextBitmap, TextError> {
        if text.is_empty() {
            return Err(TextError::ZeroWidth);
        }
        let font = self.get(id).ok_or(TextError::UnknownFont(id))?;
        raster::rasterize(font, text, px, color)
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}
