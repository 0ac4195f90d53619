//! Glyph rasterizer
//!
//! Paints one 8x16 cell block into a row-major pixel surface. Every pixel of
//! the block is written: set bits take the pen's foreground, clear bits its
//! background, so a repaint fully replaces whatever the cell showed before.

use crate::font::{GlyphSource, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::framebuffer::Geometry;
use crate::pen::Pen;

/// Rasterize `ch` into the cell at (`col`, `row`)
///
/// Returns `false`, leaving the surface untouched, if the block would fall
/// outside the geometry or outside `surface`.
pub fn draw_glyph<G: GlyphSource + ?Sized>(
    surface: &mut [u32],
    geometry: &Geometry,
    font: &G,
    ch: u8,
    col: usize,
    row: usize,
    pen: &Pen,
) -> bool {
    let x0 = col * GLYPH_WIDTH;
    let y0 = row * GLYPH_HEIGHT;
    if x0 + GLYPH_WIDTH > geometry.width
        || y0 + GLYPH_HEIGHT > geometry.height
        || surface.len() < geometry.pixel_count()
    {
        return false;
    }

    let glyph = font.glyph_rows(ch);
    let fg = pen.effective_fg().to_u32();
    let bg = pen.bg.to_u32();

    for (dy, &bits) in glyph.iter().enumerate() {
        let bits = if dy == GLYPH_HEIGHT - 1 && pen.is_underlined() {
            0xFF
        } else {
            bits
        };
        let start = (y0 + dy) * geometry.width + x0;
        let scanline = &mut surface[start..start + GLYPH_WIDTH];
        for (dx, pixel) in scanline.iter_mut().enumerate() {
            *pixel = if bits & (0x80 >> dx) != 0 { fg } else { bg };
        }
    }
    true
}
