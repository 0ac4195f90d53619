//! uterm terminal core
//!
//! A no_std text console that interprets a small VT100 subset and rasterizes
//! an 8x16 cell grid into a caller-supplied 32-bit framebuffer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Console                                                     │
//! │  - put_char / draw_cell / flush, pen, cursor overlay        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Parser + command interpreter                                │
//! │  - ESC [ params letter, SGR                                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Screen                                                      │
//! │  - back pixels/cells/pens, dirty rows, scroll               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Framebuffer (trait) + glyph rasterizer                      │
//! │  - caller-owned front pixels, 8x16 font                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Buffers come from a [`uterm_mem::ConsoleAlloc`] once, at construction.

#![cfg_attr(not(test), no_std)]

pub mod color;
pub mod command;
pub mod config;
pub mod console;
pub mod cursor;
pub mod error;
pub mod font;
pub mod framebuffer;
pub mod glyph;
pub mod parser;
pub mod pen;
pub mod screen;

pub use color::{color_for, Color, ANSI_COLORS};
pub use config::ConsoleConfig;
pub use console::Console;
pub use cursor::Cursor;
pub use error::{ConsoleError, ConsoleResult};
pub use font::{BuiltinFont, GlyphRows, GlyphSource, GLYPH_HEIGHT, GLYPH_WIDTH};
pub use framebuffer::{Framebuffer, Geometry, SimpleFramebuffer, SliceFramebuffer, CELL_HEIGHT, CELL_WIDTH};
pub use parser::{Csi, CsiCommand, Event, Params, Parser};
pub use pen::{Attrs, Pen};
pub use screen::{DirtyRange, Screen};

pub use uterm_mem::{ConsoleAlloc, FnAlloc};
#[cfg(feature = "alloc")]
pub use uterm_mem::SystemAlloc;
