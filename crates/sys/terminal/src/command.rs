//! CSI command interpreter
//!
//! `p1`/`p2` are the first two parameters; 0 means "not given". Movement
//! counts treat 0 as 1, positions are 1-indexed on the wire.

use uterm_mem::ConsoleAlloc;

use crate::console::Console;
use crate::font::GlyphSource;
use crate::framebuffer::Framebuffer;
use crate::parser::{Csi, CsiCommand};

impl<F: Framebuffer, A: ConsoleAlloc + Clone, G: GlyphSource> Console<F, A, G> {
    /// Apply a completed CSI sequence
    ///
    /// The caller keeps the cursor overlay hidden around this.
    pub(crate) fn execute_csi(&mut self, csi: &Csi) {
        let p1 = csi.params.get(0) as usize;
        let p2 = csi.params.get(1) as usize;
        let count = p1.max(1);

        match csi.command {
            CsiCommand::CursorUp => self.cursor.up(count),
            CsiCommand::CursorDown => self.cursor.down(count),
            CsiCommand::CursorForward => self.cursor.right(count),
            CsiCommand::CursorBack => self.cursor.left(count),
            CsiCommand::CursorColumn => self.cursor.goto_col(p1.saturating_sub(1)),
            CsiCommand::CursorPosition => {
                self.cursor.goto(p2.saturating_sub(1), p1.saturating_sub(1))
            }
            CsiCommand::EraseDisplay => self.erase_in_display(p1),
            CsiCommand::EraseLine => self.erase_in_line(p1),
            CsiCommand::Sgr => {
                let defaults = self.config.default_pen();
                self.pen.apply_sgr(&csi.params, &defaults);
            }
        }
    }

    fn erase_in_display(&mut self, mode: usize) {
        // Only the whole-screen form is supported
        if mode == 2 {
            self.screen.clear(self.pen);
            self.cursor.goto(0, 0);
        }
    }

    fn erase_in_line(&mut self, mode: usize) {
        let (col, row) = self.cursor.position();
        let cols = self.screen.geometry().cols;
        let span = match mode {
            0 => col..cols,
            1 => 0..col + 1,
            2 => 0..cols,
            _ => return,
        };
        for c in span {
            self.screen.write_cell(b' ', c, row, self.pen);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::color::Color;
    use crate::console::Console;
    use crate::framebuffer::SliceFramebuffer;
    use crate::pen::Pen;
    use uterm_mem::SystemAlloc;

    fn with_console(cols: usize, rows: usize, f: impl FnOnce(&mut Console<SliceFramebuffer<'_>, SystemAlloc>)) {
        let (width, height) = (cols * 8, rows * 16);
        let mut pixels = vec![0u32; width * height];
        let fb = SliceFramebuffer::new(&mut pixels, width, height);
        let mut console = Console::new(fb, SystemAlloc).unwrap();
        f(&mut console);
    }

    #[test]
    fn test_relative_movement() {
        with_console(10, 5, |c| {
            c.put_str("\x1b[3B\x1b[4C");
            assert_eq!(c.cursor(), (4, 3));
            c.put_str("\x1b[A\x1b[D");
            assert_eq!(c.cursor(), (3, 2));
            c.put_str("\x1b[99A\x1b[99D");
            assert_eq!(c.cursor(), (0, 0));
            c.put_str("\x1b[99B\x1b[99C");
            assert_eq!(c.cursor(), (9, 4));
        });
    }

    #[test]
    fn test_absolute_positioning() {
        with_console(10, 5, |c| {
            c.put_str("\x1b[2;3H");
            assert_eq!(c.cursor(), (2, 1));
            c.put_str("\x1b[H");
            assert_eq!(c.cursor(), (0, 0));
            c.put_str("\x1b[7G");
            assert_eq!(c.cursor(), (6, 0));
            c.put_str("\x1b[40;40H");
            assert_eq!(c.cursor(), (9, 4));
        });
    }

    #[test]
    fn test_erase_display_only_mode_two() {
        with_console(4, 2, |c| {
            c.put_str("abcd\x1b[J\x1b[1J");
            assert_eq!(c.screen().cell(0, 0), Some(b'a'));

            c.put_str("\x1b[44m\x1b[2J");
            assert!(c.screen().cells().iter().all(|&ch| ch == 0));
            assert_eq!(c.cursor(), (0, 0));
            assert_eq!(c.screen().pen_at(3, 1).map(|p| p.bg), Some(Color::BLUE));
        });
    }

    #[test]
    fn test_erase_line_modes() {
        with_console(4, 2, |c| {
            c.put_str("abcd\x1b[1;3H\x1b[K");
            assert_eq!(&c.screen().cells()[..4], b"ab  ");

            c.put_str("\x1b[Habcd\x1b[1;2H\x1b[1K");
            assert_eq!(&c.screen().cells()[..4], b"  cd");

            c.put_str("\x1b[2K");
            assert_eq!(&c.screen().cells()[..4], b"    ");
        });
    }

    #[test]
    fn test_sgr_defaults_follow_config() {
        with_console(4, 1, |c| {
            c.put_str("\x1b[31;42m");
            assert_eq!(*c.pen(), Pen::new(Color::RED, Color::GREEN));
            c.put_str("\x1b[39;49m");
            assert_eq!(*c.pen(), Pen::default());
        });
    }
}
