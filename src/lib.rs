//! uterm - process-wide framebuffer console
//!
//! One console per process, created by [`init`] over caller-owned video
//! memory and torn down by [`destroy`]. Every other call is a no-op until
//! `init` succeeds.
//!
//! ```ignore
//! unsafe { uterm::init(fb_ptr, 640, 400, my_alloc, my_free)? };
//! uterm::put_string(b"\x1b[32mready\x1b[0m\n");
//! uterm::flush();
//! ```

#![cfg_attr(not(test), no_std)]

use core::fmt;

use spin::Mutex;

pub use uterm_mem::{AllocateFn, ReleaseFn};
pub use uterm_terminal::{Color, Console, ConsoleError, FnAlloc, SimpleFramebuffer};

/// The console type behind the global
pub type GlobalConsole = Console<SimpleFramebuffer, FnAlloc>;

/// Global console instance
static CONSOLE: Mutex<Option<GlobalConsole>> = Mutex::new(None);

/// Reasons `init` can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalError {
    /// `init` was called twice without `destroy`
    AlreadyInitialized,
    /// The framebuffer pointer was null
    NullFramebuffer,
    /// Console construction failed
    Console(ConsoleError),
}

impl From<ConsoleError> for GlobalError {
    fn from(err: ConsoleError) -> Self {
        GlobalError::Console(err)
    }
}

impl fmt::Display for GlobalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlobalError::AlreadyInitialized => write!(f, "Console already initialized"),
            GlobalError::NullFramebuffer => write!(f, "Null framebuffer pointer"),
            GlobalError::Console(e) => write!(f, "{}", e),
        }
    }
}

/// Initialize the global console
///
/// # Safety
///
/// `framebuffer` must be valid for reads and writes of `width * height`
/// pixels until `destroy`. `allocate`/`release` must behave like a matching
/// allocator pair.
pub unsafe fn init(
    framebuffer: *mut u32,
    width: usize,
    height: usize,
    allocate: AllocateFn,
    release: ReleaseFn,
) -> Result<(), GlobalError> {
    let mut console = CONSOLE.lock();
    if console.is_some() {
        log::warn!("console already initialized");
        return Err(GlobalError::AlreadyInitialized);
    }
    if framebuffer.is_null() {
        return Err(GlobalError::NullFramebuffer);
    }

    let fb = SimpleFramebuffer::new(framebuffer, width, height);
    let alloc = FnAlloc::new(allocate, release);
    *console = Some(Console::new(fb, alloc)?);
    Ok(())
}

/// Lock the global console
pub fn console() -> spin::MutexGuard<'static, Option<GlobalConsole>> {
    CONSOLE.lock()
}

fn with_console(f: impl FnOnce(&mut GlobalConsole)) {
    if let Some(console) = CONSOLE.lock().as_mut() {
        f(console);
    }
}

/// Feed one byte to the console
pub fn put_char(byte: u8) {
    with_console(|c| c.put_char(byte));
}

/// Feed a byte string to the console
pub fn put_string(bytes: &[u8]) {
    with_console(|c| c.put_string(bytes));
}

pub fn put_str(s: &str) {
    put_string(s.as_bytes());
}

/// Draw a cell with explicit 0xRRGGBBAA colors
pub fn draw_cell_raw(ch: u8, col: usize, row: usize, fg: u32, bg: u32) {
    with_console(|c| c.draw_cell_raw(ch, col, row, Color(fg), Color(bg)));
}

/// Draw a cell with the current pen
pub fn draw_cell(ch: u8, col: usize, row: usize) {
    with_console(|c| c.draw_cell(ch, col, row));
}

pub fn draw_pixel(x: usize, y: usize, rgba: u32) {
    with_console(|c| c.draw_pixel(x, y, Color(rgba)));
}

/// Present dirty rows to the framebuffer
pub fn flush() {
    with_console(|c| c.flush());
}

pub fn scroll() {
    with_console(|c| c.scroll());
}

pub fn set_cursor_visible(visible: bool) {
    with_console(|c| c.set_cursor_visible(visible));
}

/// Tear down the global console; a later `init` starts fresh
pub fn destroy() {
    if let Some(console) = CONSOLE.lock().take() {
        console.destroy();
    }
}

/// `print!`-style formatting into the global console
pub fn write_fmt(args: fmt::Arguments<'_>) {
    with_console(|c| {
        let _ = fmt::Write::write_fmt(c, args);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::alloc::Layout;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static LIVE: AtomicUsize = AtomicUsize::new(0);

    unsafe fn test_alloc(layout: Layout) -> *mut u8 {
        LIVE.fetch_add(1, Ordering::SeqCst);
        std::alloc::alloc(layout)
    }

    unsafe fn test_free(ptr: *mut u8, layout: Layout) {
        LIVE.fetch_sub(1, Ordering::SeqCst);
        std::alloc::dealloc(ptr, layout)
    }

    // Single test: the global is shared by every test in this binary
    #[test]
    fn test_global_lifecycle() {
        let mut pixels = vec![0u32; 640 * 400];

        // No console yet: calls are ignored
        put_str("ignored");
        flush();
        assert!(console().is_none());

        let err = unsafe { init(core::ptr::null_mut(), 640, 400, test_alloc, test_free) };
        assert_eq!(err, Err(GlobalError::NullFramebuffer));

        let err = unsafe { init(pixels.as_mut_ptr(), 4, 4, test_alloc, test_free) };
        assert_eq!(
            err,
            Err(GlobalError::Console(ConsoleError::EmptyGeometry { width: 4, height: 4 }))
        );
        assert_eq!(LIVE.load(Ordering::SeqCst), 0);

        unsafe { init(pixels.as_mut_ptr(), 640, 400, test_alloc, test_free) }.unwrap();
        let again = unsafe { init(pixels.as_mut_ptr(), 640, 400, test_alloc, test_free) };
        assert_eq!(again, Err(GlobalError::AlreadyInitialized));
        assert_eq!(LIVE.load(Ordering::SeqCst), 4);

        put_string(b"AB\r\nC");
        write_fmt(format_args!("{}", 7));
        draw_cell_raw(b'Z', 79, 24, Color::RED.0, Color::BLUE.0);
        draw_pixel(0, 399, Color::GREEN.0);
        set_cursor_visible(false);
        flush();
        {
            let guard = console();
            let c = guard.as_ref().unwrap();
            assert_eq!(c.cursor(), (2, 1));
            assert_eq!(c.screen().front_cell(1, 1), Some(b'7'));
            assert_eq!(c.screen().front_cell(79, 24), Some(b'Z'));
        }

        scroll();
        destroy();
        assert!(console().is_none());
        assert_eq!(LIVE.load(Ordering::SeqCst), 0);
        assert_eq!(pixels[399 * 640], Color::GREEN.0);

        // A fresh init after destroy works
        unsafe { init(pixels.as_mut_ptr(), 640, 400, test_alloc, test_free) }.unwrap();
        destroy();
        assert_eq!(LIVE.load(Ordering::SeqCst), 0);
    }
}
