//! Console facade
//!
//! Ties the parser, cursor, pen and screen together. Bytes go in through
//! `put_char`; pixels come out on `flush`.

use core::fmt;

use uterm_mem::ConsoleAlloc;

use crate::color::Color;
use crate::config::ConsoleConfig;
use crate::cursor::Cursor;
use crate::error::ConsoleResult;
use crate::font::{BuiltinFont, GlyphSource};
use crate::framebuffer::{Framebuffer, Geometry};
use crate::parser::{Event, Parser};
use crate::pen::Pen;
use crate::screen::Screen;

/// Framebuffer text console
pub struct Console<F: Framebuffer, A: ConsoleAlloc + Clone, G: GlyphSource = BuiltinFont> {
    pub(crate) screen: Screen<F, A, G>,
    pub(crate) cursor: Cursor,
    pub(crate) pen: Pen,
    pub(crate) config: ConsoleConfig,
    parser: Parser,
}

impl<F: Framebuffer, A: ConsoleAlloc + Clone> Console<F, A, BuiltinFont> {
    /// Create a console with the built-in font and default settings
    pub fn new(front: F, alloc: A) -> ConsoleResult<Self> {
        Self::with_config(front, alloc, BuiltinFont, ConsoleConfig::default())
    }
}

impl<F: Framebuffer, A: ConsoleAlloc + Clone, G: GlyphSource> Console<F, A, G> {
    /// Create a console over `front`
    ///
    /// All core-owned buffers are acquired from `alloc` here; nothing is
    /// allocated afterwards.
    pub fn with_config(front: F, alloc: A, font: G, config: ConsoleConfig) -> ConsoleResult<Self> {
        let pen = config.default_pen();
        let mut screen = Screen::new(front, alloc, font, pen)?;
        let geometry = screen.geometry();
        let mut cursor = Cursor::new(&geometry, config.cursor_visible);
        cursor.show(&mut screen);

        log::info!(
            "console {}x{} px, {}x{} cells",
            geometry.width,
            geometry.height,
            geometry.cols,
            geometry.rows
        );

        Ok(Self {
            screen,
            cursor,
            pen,
            config,
            parser: Parser::new(),
        })
    }

    /// Feed one byte
    pub fn put_char(&mut self, byte: u8) {
        self.cursor.hide(&mut self.screen);
        match self.parser.advance(byte) {
            Some(Event::Print(ch)) => self.print(ch),
            Some(Event::Execute(ch)) => self.execute(ch),
            Some(Event::Csi(csi)) => self.execute_csi(&csi),
            None => {}
        }
        self.cursor.show(&mut self.screen);
    }

    /// Feed a byte string
    pub fn put_string(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.put_char(byte);
        }
    }

    pub fn put_str(&mut self, s: &str) {
        self.put_string(s.as_bytes());
    }

    /// Draw `ch` at a cell with explicit colors; the cursor does not move
    pub fn draw_cell_raw(&mut self, ch: u8, col: usize, row: usize, fg: Color, bg: Color) {
        self.draw_with(ch, col, row, Pen::new(fg, bg));
    }

    /// Draw `ch` at a cell with the current pen; the cursor does not move
    pub fn draw_cell(&mut self, ch: u8, col: usize, row: usize) {
        self.draw_with(ch, col, row, self.pen);
    }

    /// Set one pixel of the back surface
    pub fn draw_pixel(&mut self, x: usize, y: usize, color: Color) {
        self.screen.draw_pixel(x, y, color);
    }

    /// Present dirty rows to the front surface
    ///
    /// An unfinished escape sequence is abandoned; bytes fed afterwards
    /// start from ground state.
    pub fn flush(&mut self) {
        self.parser.reset();
        self.screen.flush(Some(self.cursor.saved()));
    }

    /// Scroll the screen up one row; the cursor stays put
    pub fn scroll(&mut self) {
        self.cursor.hide(&mut self.screen);
        self.screen.scroll(self.pen);
        self.cursor.show(&mut self.screen);
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor.set_visible(visible, &mut self.screen);
    }

    /// Cursor (column, row)
    pub fn cursor(&self) -> (usize, usize) {
        self.cursor.position()
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor.is_visible()
    }

    /// Current pen
    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn geometry(&self) -> Geometry {
        self.screen.geometry()
    }

    /// Read access to both surfaces
    pub fn screen(&self) -> &Screen<F, A, G> {
        &self.screen
    }

    /// Tear the console down, releasing its buffers and returning the front
    /// surface to the caller
    pub fn destroy(self) -> F {
        let geometry = self.screen.geometry();
        log::info!("console {}x{} destroyed", geometry.width, geometry.height);
        self.screen.into_framebuffer()
    }

    fn draw_with(&mut self, ch: u8, col: usize, row: usize, pen: Pen) {
        self.cursor.hide(&mut self.screen);
        self.screen.write_cell(ch, col, row, pen);
        self.cursor.show(&mut self.screen);
    }

    /// Write a printable cell at the cursor and step past it
    fn print(&mut self, ch: u8) {
        let (col, row) = self.cursor.position();
        self.screen.write_cell(ch, col, row, self.pen);
        if self.cursor.advance() {
            self.screen.scroll(self.pen);
        }
    }

    /// Execute a control character
    fn execute(&mut self, byte: u8) {
        match byte {
            b'\r' => self.cursor.carriage_return(),
            b'\n' => {
                if self.cursor.newline() {
                    self.screen.scroll(self.pen);
                }
            }
            // BS - blank the cell, then step back
            0x08 => {
                let (col, row) = self.cursor.position();
                self.screen.write_cell(b' ', col, row, self.pen);
                self.cursor.retreat();
            }
            b'\t' => {
                for _ in 0..self.config.tab_width {
                    self.print(b' ');
                }
            }
            _ => self.print(byte),
        }
    }
}

impl<F: Framebuffer, A: ConsoleAlloc + Clone, G: GlyphSource> fmt::Write for Console<F, A, G> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.put_str(s);
        Ok(())
    }
}
