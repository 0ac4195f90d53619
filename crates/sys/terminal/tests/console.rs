//! End-to-end console behavior over Vec-backed framebuffers

use uterm_mem::ArenaAlloc;
use uterm_terminal::{
    color_for, Color, Console, ConsoleAlloc, ConsoleConfig, ConsoleError, Framebuffer, Pen,
    SliceFramebuffer, SystemAlloc,
};

struct Surface {
    pixels: Vec<u32>,
    width: usize,
    height: usize,
}

impl Surface {
    fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height],
            width,
            height,
        }
    }

    fn console(&mut self) -> Console<SliceFramebuffer<'_>, SystemAlloc> {
        let fb = SliceFramebuffer::new(&mut self.pixels, self.width, self.height);
        Console::new(fb, SystemAlloc).expect("console")
    }
}

fn row_text<F: Framebuffer, A: ConsoleAlloc + Clone>(console: &Console<F, A>, row: usize) -> Vec<u8> {
    let cols = console.geometry().cols;
    console.screen().cells()[row * cols..(row + 1) * cols].to_vec()
}

#[test]
fn text_and_crlf_on_80x25() {
    let mut surface = Surface::new(640, 400);
    let mut console = surface.console();
    console.put_string(b"AB\r\nC");

    assert_eq!(&row_text(&console, 0)[..3], b"AB\0");
    assert_eq!(&row_text(&console, 1)[..2], b"C\0");
    assert_eq!(console.cursor(), (1, 1));
}

#[test]
fn last_column_wraps() {
    let mut surface = Surface::new(640, 400);
    let mut console = surface.console();
    console.put_str("\x1b[3;80H");
    assert_eq!(console.cursor(), (79, 2));

    console.put_char(b'X');
    assert_eq!(console.screen().cell(79, 2), Some(b'X'));
    assert_eq!(console.cursor(), (0, 3));
}

#[test]
fn last_cell_scrolls() {
    let mut surface = Surface::new(640, 400);
    let mut console = surface.console();
    console.put_str("top\x1b[25;80H");
    console.put_char(b'X');

    assert_eq!(console.cursor(), (0, 24));
    assert_eq!(console.screen().cell(79, 23), Some(b'X'));
    assert!(row_text(&console, 24).iter().all(|&c| c == 0));
    // Row 0 was pushed off the top
    assert_eq!(console.screen().cell(0, 0), Some(0));
}

#[test]
fn newline_on_last_row_scrolls() {
    let mut surface = Surface::new(64, 32);
    let mut console = surface.console();
    console.put_str("one\ntwo\nsix");
    assert_eq!(&row_text(&console, 0)[..3], b"two");
    assert_eq!(&row_text(&console, 1)[..3], b"six");
    assert_eq!(console.cursor(), (3, 1));
}

#[test]
fn erase_display_clears_to_background() {
    let mut surface = Surface::new(640, 400);
    let mut console = surface.console();
    console.put_str("hello\x1b[5;5H\x1b[42m\x1b[2J");

    assert!(console.screen().cells().iter().all(|&c| c == 0));
    assert_eq!(console.cursor(), (0, 0));
    // Everything but the cursor cell shows the new background
    let pixels = console.screen().back_pixels();
    assert!(pixels[8..640].iter().all(|&p| p == Color::GREEN.to_u32()));
    assert!(pixels[640 * 16..].iter().all(|&p| p == Color::GREEN.to_u32()));
}

#[test]
fn sgr_round_trip() {
    let mut surface = Surface::new(64, 16);
    let mut console = surface.console();
    console.put_str("\x1b[31m");
    assert_eq!(console.pen().fg, Color::RED);
    console.put_str("\x1b[0m");
    assert_eq!(*console.pen(), Pen::new(Color::WHITE, Color::BLACK));

    console.put_str("\x1b[93;104m");
    assert_eq!(console.pen().fg, color_for(3, true));
    assert_eq!(console.pen().bg, color_for(4, true));
}

#[test]
fn scrolling_every_row_blanks_screen() {
    let mut surface = Surface::new(80, 48);
    let mut console = surface.console();
    let geometry = console.geometry();
    for row in 0..geometry.rows {
        for col in 0..geometry.cols {
            console.draw_cell(b'#', col, row);
        }
    }
    for _ in 0..geometry.rows {
        console.scroll();
    }
    assert!(console.screen().cells().iter().all(|&c| c == 0));
}

#[test]
fn draw_cell_then_read_back() {
    let mut surface = Surface::new(640, 400);
    let mut console = surface.console();
    for (i, ch) in (b'!'..=b'~').enumerate() {
        let (col, row) = (i % 80, i / 80 + 3);
        console.draw_cell(ch, col, row);
        assert_eq!(console.screen().cell(col, row), Some(ch));
    }
}

#[test]
fn dirty_range_tracks_writes_and_flush() {
    let mut surface = Surface::new(640, 400);
    let mut console = surface.console();
    console.flush();
    assert!(console.screen().dirty().is_empty());

    console.draw_cell(b'a', 10, 7);
    console.draw_cell(b'b', 10, 12);
    let dirty = console.screen().dirty();
    assert!(dirty.contains(7) && dirty.contains(12));
    assert!(dirty.start() <= Some(7) && dirty.end() >= Some(12));

    console.flush();
    assert!(console.screen().dirty().is_empty());
    assert_eq!(console.screen().front_cell(10, 12), Some(b'b'));
}

#[test]
fn flush_presents_back_surface() {
    let mut surface = Surface::new(64, 32);
    {
        let mut console = surface.console();
        console.set_cursor_visible(false);
        console.put_str("\x1b[44mhi");
        console.draw_pixel(63, 31, Color::RED);
        console.flush();
        assert_eq!(console.screen().front_pixels(), console.screen().back_pixels());
        console.destroy();
    }
    assert_eq!(surface.pixels[64 * 32 - 1], Color::RED.to_u32());
    assert_eq!(surface.pixels[0], Color::BLUE.to_u32());
}

#[test]
fn hidden_cursor_restores_cell_colors() {
    let mut surface = Surface::new(64, 16);
    let mut console = surface.console();
    console.put_str("\x1b[33;45mW\x1b[D");
    let inverted = console.screen().back_pixels().to_vec();

    console.set_cursor_visible(false);
    let restored = console.screen().back_pixels().to_vec();
    assert_ne!(inverted, restored);

    let mut expected = Surface::new(64, 16);
    let mut reference = expected.console();
    reference.set_cursor_visible(false);
    reference.put_str("\x1b[33;45mW");
    assert_eq!(reference.screen().back_pixels(), &restored[..]);

    console.set_cursor_visible(true);
    assert_eq!(console.screen().back_pixels(), &inverted[..]);
}

#[test]
fn unsupported_sequences_are_abandoned() {
    let mut surface = Surface::new(64, 16);
    let mut console = surface.console();
    // '?' ends the CSI, so "25l" is ordinary text; "ESC ]" drops the ']'
    console.put_str("\x1b[?25l\x1b]x\x1b[5S");
    assert_eq!(console.cursor(), (4, 0));
    assert_eq!(&row_text(&console, 0)[..4], b"25lx");
}

#[test]
fn custom_defaults() {
    let mut pixels = vec![0u32; 64 * 16];
    let fb = SliceFramebuffer::new(&mut pixels, 64, 16);
    let config = ConsoleConfig::new()
        .with_default_fg(Color::GREEN)
        .with_default_bg(Color::BLUE)
        .with_cursor_visible(false);
    let mut console =
        Console::with_config(fb, SystemAlloc, uterm_terminal::BuiltinFont, config).unwrap();
    assert!(console.screen().back_pixels().iter().all(|&p| p == Color::BLUE.to_u32()));

    console.put_str("\x1b[31;47m\x1b[39;49m");
    assert_eq!(*console.pen(), Pen::new(Color::GREEN, Color::BLUE));
    console.put_str("\x1b[0m");
    assert_eq!(*console.pen(), Pen::default());
}

#[test]
fn rejects_degenerate_surfaces() {
    let mut pixels = vec![0u32; 7 * 100];
    let fb = SliceFramebuffer::new(&mut pixels, 7, 100);
    let err = Console::new(fb, SystemAlloc).err();
    assert_eq!(err, Some(ConsoleError::EmptyGeometry { width: 7, height: 100 }));
}

#[test]
fn arena_backed_console_releases_everything() {
    let mut backing = vec![0u64; 64 * 1024 / 8];
    let arena = unsafe { ArenaAlloc::new(backing.as_mut_ptr().cast(), 64 * 1024) };
    let mut surface = Surface::new(64, 32);

    let fb = SliceFramebuffer::new(&mut surface.pixels, 64, 32);
    let mut console = Console::new(fb, &arena).unwrap();
    console.put_str("arena");
    assert!(arena.stats().used > 0);
    console.destroy();

    assert_eq!(arena.stats().used, 0);
}

#[test]
fn exhausted_arena_fails_cleanly() {
    let mut backing = vec![0u64; 1024 / 8];
    let arena = unsafe { ArenaAlloc::new(backing.as_mut_ptr().cast(), 1024) };
    let mut surface = Surface::new(64, 32);

    let fb = SliceFramebuffer::new(&mut surface.pixels, 64, 32);
    let err = Console::new(fb, &arena).err();
    assert_eq!(err, Some(ConsoleError::OutOfMemory { bytes: 64 * 32 * 4 }));
    assert_eq!(arena.stats().used, 0);
}
