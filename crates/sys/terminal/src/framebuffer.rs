//! Framebuffer abstraction
//!
//! The presented (front) pixel surface belongs to the caller: usually video
//! memory handed over by the bootloader, sometimes a window's pixel buffer.
//! The console only ever writes inside `[0, width * height)` of it and never
//! frees it.

use crate::font::{GLYPH_HEIGHT, GLYPH_WIDTH};

/// Cell width in pixels
pub const CELL_WIDTH: usize = GLYPH_WIDTH;

/// Cell height in pixels
pub const CELL_HEIGHT: usize = GLYPH_HEIGHT;

/// Pixel and cell dimensions of a console, fixed for its lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
    /// Number of character columns
    pub cols: usize,
    /// Number of character rows
    pub rows: usize,
}

impl Geometry {
    /// Derive the cell grid for a pixel surface
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cols: width / CELL_WIDTH,
            rows: height / CELL_HEIGHT,
        }
    }

    /// Total number of cells
    #[inline]
    pub const fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Total number of pixels
    #[inline]
    pub const fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Check if a cell coordinate is on screen
    #[inline]
    pub const fn contains(&self, col: usize, row: usize) -> bool {
        col < self.cols && row < self.rows
    }

    /// Row-major index of a cell
    #[inline]
    pub const fn cell_index(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    /// Pixel range covering the 16 scanlines of a cell row
    #[inline]
    pub const fn row_pixels(&self, row: usize) -> core::ops::Range<usize> {
        let start = row * CELL_HEIGHT * self.width;
        start..start + CELL_HEIGHT * self.width
    }

    /// Cell range covering one cell row
    #[inline]
    pub const fn row_cells(&self, row: usize) -> core::ops::Range<usize> {
        let start = row * self.cols;
        start..start + self.cols
    }
}

/// Caller-owned pixel surface the console presents into
pub trait Framebuffer {
    /// Width in pixels
    fn width(&self) -> usize;

    /// Height in pixels
    fn height(&self) -> usize;

    /// Pixels, row-major, at least `width * height` long
    fn pixels(&self) -> &[u32];

    /// Mutable pixels, row-major
    fn pixels_mut(&mut self) -> &mut [u32];

    /// Geometry derived from the pixel dimensions
    fn geometry(&self) -> Geometry {
        Geometry::new(self.width(), self.height())
    }
}

/// Framebuffer over raw video memory
pub struct SimpleFramebuffer {
    buffer: *mut u32,
    width: usize,
    height: usize,
}

impl SimpleFramebuffer {
    /// Create a framebuffer from a raw pointer and its pixel dimensions
    ///
    /// # Safety
    /// The buffer pointer must be non-null, aligned, valid for reads and
    /// writes of `width * height` pixels for the lifetime of this struct,
    /// and not accessed through other paths while the console is writing.
    pub unsafe fn new(buffer: *mut u32, width: usize, height: usize) -> Self {
        Self {
            buffer,
            width,
            height,
        }
    }
}

impl Framebuffer for SimpleFramebuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn pixels(&self) -> &[u32] {
        // SAFETY: guaranteed by the contract of `new`
        unsafe { core::slice::from_raw_parts(self.buffer, self.width * self.height) }
    }

    fn pixels_mut(&mut self) -> &mut [u32] {
        // SAFETY: guaranteed by the contract of `new`
        unsafe { core::slice::from_raw_parts_mut(self.buffer, self.width * self.height) }
    }
}

// Safety: SimpleFramebuffer is Send if its contents are accessed properly
unsafe impl Send for SimpleFramebuffer {}

/// Framebuffer over a borrowed pixel slice
pub struct SliceFramebuffer<'a> {
    pixels: &'a mut [u32],
    width: usize,
    height: usize,
}

impl<'a> SliceFramebuffer<'a> {
    /// Wrap a pixel slice; the console rejects it at construction if it
    /// holds fewer than `width * height` pixels
    pub fn new(pixels: &'a mut [u32], width: usize, height: usize) -> Self {
        Self {
            pixels,
            width,
            height,
        }
    }
}

impl Framebuffer for SliceFramebuffer<'_> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn pixels(&self) -> &[u32] {
        &*self.pixels
    }

    fn pixels_mut(&mut self) -> &mut [u32] {
        &mut *self.pixels
    }
}
