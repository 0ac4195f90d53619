//! Console configuration

use crate::color::Color;
use crate::pen::Pen;

/// Compile-time defaults
pub mod defaults {
    use crate::color::Color;

    /// Foreground after init and for `ESC[39m`
    pub const FOREGROUND: Color = Color::WHITE;
    /// Background after init and for `ESC[49m`
    pub const BACKGROUND: Color = Color::BLACK;
    /// Spaces written for a horizontal tab
    pub const TAB_WIDTH: usize = 4;
}

/// Console settings chosen at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Initial foreground, restored by SGR 39
    pub default_fg: Color,
    /// Initial background, restored by SGR 49
    pub default_bg: Color,
    /// Number of spaces `\t` expands to
    pub tab_width: usize,
    /// Whether the cursor overlay starts visible
    pub cursor_visible: bool,
}

impl ConsoleConfig {
    pub const fn new() -> Self {
        Self {
            default_fg: defaults::FOREGROUND,
            default_bg: defaults::BACKGROUND,
            tab_width: defaults::TAB_WIDTH,
            cursor_visible: true,
        }
    }

    pub const fn with_default_fg(mut self, color: Color) -> Self {
        self.default_fg = color;
        self
    }

    pub const fn with_default_bg(mut self, color: Color) -> Self {
        self.default_bg = color;
        self
    }

    pub const fn with_tab_width(mut self, width: usize) -> Self {
        self.tab_width = width;
        self
    }

    pub const fn with_cursor_visible(mut self, visible: bool) -> Self {
        self.cursor_visible = visible;
        self
    }

    /// Pen a fresh console draws with
    pub const fn default_pen(&self) -> Pen {
        Pen::new(self.default_fg, self.default_bg)
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::new()
    }
}
