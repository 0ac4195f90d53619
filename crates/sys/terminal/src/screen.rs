//! Screen buffer manager
//!
//! Owns the two surfaces the console draws through:
//! - back: working pixels, cell codes and per-cell pens, all core-owned
//! - front: the caller's framebuffer plus a core-owned cell mirror
//!
//! Every pixel and cell write goes through here. Writes land in the back
//! surface and widen the dirty range; `flush` copies only the dirty cell rows
//! (16 scanlines each) to the front.

use uterm_mem::{ConsoleAlloc, RawBuffer};

use crate::color::Color;
use crate::error::{ConsoleError, ConsoleResult};
use crate::font::GlyphSource;
use crate::framebuffer::{Framebuffer, Geometry, CELL_HEIGHT};
use crate::glyph::draw_glyph;
use crate::pen::Pen;

/// Inclusive range of cell rows touched since the last flush
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirtyRange {
    rows: Option<(usize, usize)>,
}

impl DirtyRange {
    /// Nothing dirty
    pub const EMPTY: Self = Self { rows: None };

    /// Widen the range to cover `row`
    pub fn include(&mut self, row: usize) {
        self.rows = Some(match self.rows {
            Some((start, end)) => (start.min(row), end.max(row)),
            None => (row, row),
        });
    }

    /// Check if no row is dirty
    pub fn is_empty(&self) -> bool {
        self.rows.is_none()
    }

    /// Check if `row` is inside the range
    pub fn contains(&self, row: usize) -> bool {
        matches!(self.rows, Some((start, end)) if start <= row && row <= end)
    }

    /// First dirty row
    pub fn start(&self) -> Option<usize> {
        self.rows.map(|(start, _)| start)
    }

    /// Last dirty row
    pub fn end(&self) -> Option<usize> {
        self.rows.map(|(_, end)| end)
    }

    /// Dirty rows as a half-open range (empty when clean)
    pub fn rows(&self) -> core::ops::Range<usize> {
        match self.rows {
            Some((start, end)) => start..end + 1,
            None => 0..0,
        }
    }
}

/// Double-buffered pixel and cell surfaces
pub struct Screen<F: Framebuffer, A: ConsoleAlloc + Clone, G: GlyphSource> {
    geometry: Geometry,
    font: G,
    front: F,
    front_cells: RawBuffer<u8, A>,
    back_pixels: RawBuffer<u32, A>,
    back_cells: RawBuffer<u8, A>,
    back_pens: RawBuffer<Pen, A>,
    dirty: DirtyRange,
}

impl<F: Framebuffer, A: ConsoleAlloc + Clone, G: GlyphSource> Screen<F, A, G> {
    /// Allocate the core-owned buffers for `front`
    ///
    /// The back surface starts filled with `pen.bg` and the whole screen is
    /// marked dirty so the first flush paints every row.
    pub fn new(front: F, alloc: A, font: G, pen: Pen) -> ConsoleResult<Self> {
        let geometry = front.geometry();
        if geometry.cols == 0 || geometry.rows == 0 {
            return Err(ConsoleError::EmptyGeometry {
                width: geometry.width,
                height: geometry.height,
            });
        }
        let actual = front.pixels().len();
        if actual < geometry.pixel_count() {
            return Err(ConsoleError::FramebufferTooSmall {
                expected: geometry.pixel_count(),
                actual,
            });
        }

        let cells = geometry.cell_count();
        let mut screen = Self {
            geometry,
            font,
            front,
            front_cells: RawBuffer::filled(alloc.clone(), cells, 0)?,
            back_pixels: RawBuffer::filled(alloc.clone(), geometry.pixel_count(), pen.bg.to_u32())?,
            back_cells: RawBuffer::filled(alloc.clone(), cells, 0)?,
            back_pens: RawBuffer::filled(alloc, cells, pen)?,
            dirty: DirtyRange::EMPTY,
        };
        screen.mark_all_dirty();
        Ok(screen)
    }

    /// Console geometry
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Write a character cell into the back surface
    ///
    /// Records `ch` and `pen` for the cell, rasterizes it and marks its row
    /// dirty. Off-screen coordinates are ignored.
    pub fn write_cell(&mut self, ch: u8, col: usize, row: usize, pen: Pen) {
        if !self.geometry.contains(col, row) {
            return;
        }
        if !draw_glyph(&mut self.back_pixels, &self.geometry, &self.font, ch, col, row, &pen) {
            return;
        }
        let index = self.geometry.cell_index(col, row);
        self.back_cells[index] = ch;
        self.back_pens[index] = pen;
        self.dirty.include(row);
    }

    /// Repaint a cell's recorded character with another pen
    ///
    /// Used for overlays: the cell and pen records are left as they are.
    pub fn repaint(&mut self, col: usize, row: usize, pen: Pen) {
        if !self.geometry.contains(col, row) {
            return;
        }
        let ch = self.back_cells[self.geometry.cell_index(col, row)];
        if draw_glyph(&mut self.back_pixels, &self.geometry, &self.font, ch, col, row, &pen) {
            self.dirty.include(row);
        }
    }

    /// Repaint a cell exactly as it was last written
    pub fn restore(&mut self, col: usize, row: usize) {
        if let Some(pen) = self.pen_at(col, row) {
            self.repaint(col, row, pen);
        }
    }

    /// Repaint a cell with its recorded colors exchanged
    pub fn invert(&mut self, col: usize, row: usize) {
        if let Some(pen) = self.pen_at(col, row) {
            self.repaint(col, row, pen.inverse());
        }
    }

    /// Poke one pixel of the back surface; off-surface coordinates are ignored
    pub fn draw_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x >= self.geometry.width || y >= self.geometry.height {
            return;
        }
        self.back_pixels[y * self.geometry.width + x] = color.to_u32();
        let row = y / CELL_HEIGHT;
        if row < self.geometry.rows {
            self.dirty.include(row);
        }
    }

    /// Scroll the back surface up by one cell row
    ///
    /// The bottom row is cleared to NUL cells drawn in `pen.bg`.
    pub fn scroll(&mut self, pen: Pen) {
        let geometry = self.geometry;
        let last = geometry.rows - 1;

        self.back_cells.copy_within(geometry.cols.., 0);
        self.back_cells[geometry.row_cells(last)].fill(0);
        self.back_pens.copy_within(geometry.cols.., 0);
        self.back_pens[geometry.row_cells(last)].fill(pen);

        let text_end = geometry.row_pixels(last).end;
        let row_span = geometry.row_pixels(0).len();
        self.back_pixels.copy_within(row_span..text_end, 0);
        self.back_pixels[geometry.row_pixels(last)].fill(pen.bg.to_u32());

        log::debug!("scrolled {} rows", geometry.rows);
        self.mark_all_dirty();
    }

    /// Clear every cell to NUL and every pixel to `pen.bg`
    pub fn clear(&mut self, pen: Pen) {
        self.back_cells.fill(0);
        self.back_pens.fill(pen);
        self.back_pixels.fill(pen.bg.to_u32());
        log::debug!("cleared screen to {:#010x}", pen.bg.to_u32());
        self.mark_all_dirty();
    }

    /// Mark every cell row dirty
    pub fn mark_all_dirty(&mut self) {
        self.dirty.include(0);
        self.dirty.include(self.geometry.rows - 1);
    }

    /// Current dirty range
    pub fn dirty(&self) -> DirtyRange {
        self.dirty
    }

    /// Copy dirty rows from the back surface to the front
    ///
    /// `cursor` is the saved cursor cell; its front cell slot is always
    /// re-synchronized, dirty or not.
    pub fn flush(&mut self, cursor: Option<(usize, usize)>) {
        let geometry = self.geometry;
        let front = self.front.pixels_mut();
        for row in self.dirty.rows() {
            let pixels = geometry.row_pixels(row);
            front[pixels.clone()].copy_from_slice(&self.back_pixels[pixels]);
            let cells = geometry.row_cells(row);
            self.front_cells[cells.clone()].copy_from_slice(&self.back_cells[cells]);
        }

        if let Some((col, row)) = cursor {
            if geometry.contains(col, row) {
                let index = geometry.cell_index(col, row);
                self.front_cells[index] = self.back_cells[index];
            }
        }
        self.dirty = DirtyRange::EMPTY;
    }

    /// Back surface character at a cell
    pub fn cell(&self, col: usize, row: usize) -> Option<u8> {
        self.geometry
            .contains(col, row)
            .then(|| self.back_cells[self.geometry.cell_index(col, row)])
    }

    /// Front surface character at a cell (as of the last flush)
    pub fn front_cell(&self, col: usize, row: usize) -> Option<u8> {
        self.geometry
            .contains(col, row)
            .then(|| self.front_cells[self.geometry.cell_index(col, row)])
    }

    /// Pen a cell was last written with
    pub fn pen_at(&self, col: usize, row: usize) -> Option<Pen> {
        self.geometry
            .contains(col, row)
            .then(|| self.back_pens[self.geometry.cell_index(col, row)])
    }

    /// Back surface cell codes, row-major
    pub fn cells(&self) -> &[u8] {
        &self.back_cells
    }

    /// Back surface pixels, row-major
    pub fn back_pixels(&self) -> &[u32] {
        &self.back_pixels
    }

    /// Front surface pixels, row-major
    pub fn front_pixels(&self) -> &[u32] {
        &self.front.pixels()[..self.geometry.pixel_count()]
    }

    /// Give the caller's framebuffer back, releasing the core-owned buffers
    pub fn into_framebuffer(self) -> F {
        self.front
    }
}
