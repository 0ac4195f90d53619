//! Cursor state and overlay
//!
//! Position is kept inside the cell grid at all times. The overlay is the
//! cell under the cursor repainted with its colors exchanged; `hide` puts
//! back exactly what was recorded for that cell.

use uterm_mem::ConsoleAlloc;

use crate::font::GlyphSource;
use crate::framebuffer::{Framebuffer, Geometry};
use crate::screen::Screen;

/// Cursor position, visibility and overlay bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    col: usize,
    row: usize,
    cols: usize,
    rows: usize,
    visible: bool,
    /// Cell the overlay was last drawn at
    saved: (usize, usize),
    /// Whether the overlay is currently painted
    drawn: bool,
}

impl Cursor {
    /// Cursor at (0, 0) of a grid with the given geometry
    pub fn new(geometry: &Geometry, visible: bool) -> Self {
        Self {
            col: 0,
            row: 0,
            cols: geometry.cols.max(1),
            rows: geometry.rows.max(1),
            visible,
            saved: (0, 0),
            drawn: false,
        }
    }

    /// Current (column, row)
    pub fn position(&self) -> (usize, usize) {
        (self.col, self.row)
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Cell the overlay was last saved at
    pub fn saved(&self) -> (usize, usize) {
        self.saved
    }

    // === Movement ===

    pub fn up(&mut self, n: usize) {
        self.row = self.row.saturating_sub(n);
    }

    pub fn down(&mut self, n: usize) {
        self.row = self.row.saturating_add(n).min(self.rows - 1);
    }

    pub fn left(&mut self, n: usize) {
        self.col = self.col.saturating_sub(n);
    }

    pub fn right(&mut self, n: usize) {
        self.col = self.col.saturating_add(n).min(self.cols - 1);
    }

    /// Move to (`col`, `row`), clamped to the grid
    pub fn goto(&mut self, col: usize, row: usize) {
        self.col = col.min(self.cols - 1);
        self.row = row.min(self.rows - 1);
    }

    /// Move to `col` on the current row, clamped
    pub fn goto_col(&mut self, col: usize) {
        self.col = col.min(self.cols - 1);
    }

    pub fn carriage_return(&mut self) {
        self.col = 0;
    }

    /// Column 0 of the next row
    ///
    /// Returns true if the cursor was on the last row and the screen has to
    /// scroll; the cursor then stays on the last row.
    pub fn newline(&mut self) -> bool {
        self.col = 0;
        if self.row + 1 >= self.rows {
            self.row = self.rows - 1;
            return true;
        }
        self.row += 1;
        false
    }

    /// Step past a printed cell, wrapping at the last column
    ///
    /// Returns true if the wrap ran off the last row.
    pub fn advance(&mut self) -> bool {
        self.col += 1;
        if self.col >= self.cols {
            return self.newline();
        }
        false
    }

    /// Step one cell back, wrapping to the end of the previous row
    pub fn retreat(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.cols - 1;
        }
    }

    // === Overlay ===

    /// Paint the overlay at the current position, if visible
    pub fn show<F, A, G>(&mut self, screen: &mut Screen<F, A, G>)
    where
        F: Framebuffer,
        A: ConsoleAlloc + Clone,
        G: GlyphSource,
    {
        if !self.visible || self.drawn {
            return;
        }
        self.saved = (self.col, self.row);
        screen.invert(self.col, self.row);
        self.drawn = true;
    }

    /// Restore the cell under the overlay
    pub fn hide<F, A, G>(&mut self, screen: &mut Screen<F, A, G>)
    where
        F: Framebuffer,
        A: ConsoleAlloc + Clone,
        G: GlyphSource,
    {
        if !self.drawn {
            return;
        }
        let (col, row) = self.saved;
        screen.restore(col, row);
        self.drawn = false;
    }

    /// Change visibility, hiding or showing the overlay immediately
    pub fn set_visible<F, A, G>(&mut self, visible: bool, screen: &mut Screen<F, A, G>)
    where
        F: Framebuffer,
        A: ConsoleAlloc + Clone,
        G: GlyphSource,
    {
        if visible {
            self.visible = true;
            self.show(screen);
        } else {
            self.hide(screen);
            self.visible = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::font::BuiltinFont;
    use crate::framebuffer::SliceFramebuffer;
    use crate::pen::Pen;
    use uterm_mem::SystemAlloc;

    fn cursor(cols: usize, rows: usize) -> Cursor {
        Cursor::new(&Geometry::new(cols * 8, rows * 16), true)
    }

    #[test]
    fn test_clamped_movement() {
        let mut c = cursor(10, 5);
        c.up(3);
        c.left(1);
        assert_eq!(c.position(), (0, 0));
        c.down(100);
        c.right(100);
        assert_eq!(c.position(), (9, 4));
        c.goto(42, 2);
        assert_eq!(c.position(), (9, 2));
        c.goto_col(3);
        assert_eq!(c.position(), (3, 2));
    }

    #[test]
    fn test_advance_wraps_and_requests_scroll() {
        let mut c = cursor(2, 2);
        assert!(!c.advance());
        assert!(!c.advance());
        assert_eq!(c.position(), (0, 1));
        c.goto(1, 1);
        assert!(c.advance());
        assert_eq!(c.position(), (0, 1));
    }

    #[test]
    fn test_newline() {
        let mut c = cursor(4, 2);
        c.goto(3, 0);
        assert!(!c.newline());
        assert_eq!(c.position(), (0, 1));
        assert!(c.newline());
        assert_eq!(c.position(), (0, 1));
    }

    #[test]
    fn test_retreat() {
        let mut c = cursor(4, 2);
        c.goto(0, 1);
        c.retreat();
        assert_eq!(c.position(), (3, 0));
        c.goto(0, 0);
        c.retreat();
        assert_eq!(c.position(), (0, 0));
    }

    #[test]
    fn test_overlay_restores_exact_colors() {
        let mut pixels = vec![0u32; 16 * 16];
        let fb = SliceFramebuffer::new(&mut pixels, 16, 16);
        let mut screen = Screen::new(fb, SystemAlloc, BuiltinFont, Pen::default()).unwrap();
        screen.write_cell(b' ', 1, 0, Pen::new(Color::RED, Color::CYAN));
        let before = screen.back_pixels().to_vec();

        let mut c = Cursor::new(&screen.geometry(), true);
        c.goto(1, 0);
        c.show(&mut screen);
        assert_eq!(c.saved(), (1, 0));
        assert_eq!(screen.back_pixels()[8], Color::RED.to_u32());

        c.hide(&mut screen);
        assert_eq!(screen.back_pixels(), &before[..]);
    }

    #[test]
    fn test_invisible_cursor_draws_nothing() {
        let mut pixels = vec![0u32; 8 * 16];
        let fb = SliceFramebuffer::new(&mut pixels, 8, 16);
        let mut screen = Screen::new(fb, SystemAlloc, BuiltinFont, Pen::default()).unwrap();
        let before = screen.back_pixels().to_vec();

        let mut c = Cursor::new(&screen.geometry(), false);
        c.show(&mut screen);
        assert_eq!(screen.back_pixels(), &before[..]);

        c.set_visible(true, &mut screen);
        assert_eq!(screen.back_pixels()[0], Color::WHITE.to_u32());
        c.set_visible(false, &mut screen);
        assert_eq!(screen.back_pixels(), &before[..]);
    }
}
