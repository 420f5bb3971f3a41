//! Tilesheet lookup and background tiling.

use crate::coords::{Rect, Viewport};
use crate::render::{SpriteBatch, Texture};

/// A texture split into a grid of square tiles, indexed row-major.
pub struct TileSheet {
    texture: Texture,
    tile_size: u32,
}

impl TileSheet {
    pub fn new(texture: Texture, tile_size: u32) -> Self {
        Self { texture, tile_size }
    }

    /// Texel rect of tile `index`, or `None` past the last tile.
    pub fn tile_src(&self, index: u32) -> Option<Rect> {
        let (w, h) = self.texture.size();
        tile_src(w, h, self.tile_size, index)
    }

    /// A batch repeating tile `index` over the whole viewport.
    pub fn background(&self, index: u32, viewport: Viewport) -> Option<SpriteBatch<'_>> {
        let src = self.tile_src(index)?;
        let mut batch = SpriteBatch::new(&self.texture);
        for dst in tile_cover(viewport, self.tile_size as f32) {
            batch.push(src, dst);
        }
        Some(batch)
    }
}

/// Whole tiles that fit in a `width × height` sheet.
pub fn tile_grid(width: u32, height: u32, tile_size: u32) -> (u32, u32) {
    if tile_size == 0 {
        return (0, 0);
    }
    (width / tile_size, height / tile_size)
}

/// Texel rect of tile `index` in a `width × height` sheet.
pub fn tile_src(width: u32, height: u32, tile_size: u32, index: u32) -> Option<Rect> {
    let (cols, rows) = tile_grid(width, height, tile_size);
    if cols == 0 || index >= cols.saturating_mul(rows) {
        return None;
    }
    let (col, row) = (index % cols, index / cols);
    let size = tile_size as f32;
    Some(Rect::new(col as f32 * size, row as f32 * size, size, size))
}

/// Destination rects tiling `viewport` from the top-left corner.
///
/// Tiles along the right and bottom edges may hang over; the surface clips
/// them. Empty for an invalid viewport or a non-positive tile size.
pub fn tile_cover(viewport: Viewport, tile_size: f32) -> Vec<Rect> {
    if !viewport.is_valid() || tile_size.is_nan() || tile_size <= 0.0 {
        return Vec::new();
    }
    let cols = (viewport.width / tile_size).ceil() as u32;
    let rows = (viewport.height / tile_size).ceil() as u32;

    let mut out = Vec::with_capacity((cols * rows) as usize);
    for row in 0..rows {
        for col in 0..cols {
            out.push(Rect::new(col as f32 * tile_size, row as f32 * tile_size, tile_size, tile_size));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_fit_needs_no_overhang() {
        let tiles = tile_cover(Viewport::new(800.0, 600.0), 40.0);
        assert_eq!(tiles.len(), 20 * 15);
        assert_eq!(tiles[0], Rect::new(0.0, 0.0, 40.0, 40.0));
        assert_eq!(tiles.last().copied(), Some(Rect::new(760.0, 560.0, 40.0, 40.0)));
    }

    #[test]
    fn partial_edges_are_covered() {
        // 800x600 with 32px tiles: 25 columns, 18.75 rows -> 19.
        let tiles = tile_cover(Viewport::new(800.0, 600.0), 32.0);
        assert_eq!(tiles.len(), 25 * 19);
        let bottom = tiles.iter().map(|r| r.max().y).fold(0.0f32, f32::max);
        assert!(bottom >= 600.0);
    }

    #[test]
    fn degenerate_inputs_produce_nothing() {
        assert!(tile_cover(Viewport::new(0.0, 600.0), 32.0).is_empty());
        assert!(tile_cover(Viewport::new(800.0, 600.0), 0.0).is_empty());
        assert!(tile_cover(Viewport::new(800.0, 600.0), f32::NAN).is_empty());
    }

    #[test]
    fn tiles_are_indexed_row_major() {
        // 96x64 sheet of 32px tiles: 3 columns, 2 rows.
        assert_eq!(tile_grid(96, 64, 32), (3, 2));
        assert_eq!(tile_src(96, 64, 32, 0), Some(Rect::new(0.0, 0.0, 32.0, 32.0)));
        assert_eq!(tile_src(96, 64, 32, 2), Some(Rect::new(64.0, 0.0, 32.0, 32.0)));
        assert_eq!(tile_src(96, 64, 32, 4), Some(Rect::new(32.0, 32.0, 32.0, 32.0)));
    }

    #[test]
    fn out_of_range_tiles_are_none() {
        assert_eq!(tile_src(96, 64, 32, 6), None);
        assert_eq!(tile_src(16, 16, 32, 0), None);
        assert_eq!(tile_src(96, 64, 0, 0), None);
    }

    #[test]
    fn ragged_sheet_ignores_partial_tiles() {
        assert_eq!(tile_grid(100, 70, 32), (3, 2));
    }
}
