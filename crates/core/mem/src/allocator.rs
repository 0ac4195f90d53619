//! Allocator capability
//!
//! The console is handed an allocator instead of assuming a hosted heap.
//! Any type implementing `ConsoleAlloc` can back its buffers: the global
//! heap, a fixed arena, or a pair of function pointers handed over by the
//! embedding kernel.

use core::alloc::Layout;
use core::ptr::NonNull;

/// Allocate/release capability used for every core-owned buffer
///
/// # Safety
///
/// Implementors must return blocks that are valid for reads and writes of
/// `layout.size()` bytes and aligned to `layout.align()`, and must accept
/// every such block back in `release` with the same layout. `allocate` is
/// never called with a zero-sized layout.
pub unsafe trait ConsoleAlloc {
    /// Allocate a block for `layout`, or `None` when exhausted
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Release a block previously returned by `allocate`
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate` on this allocator with the same
    /// `layout`, and must not be used afterwards.
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout);
}

unsafe impl<A: ConsoleAlloc + ?Sized> ConsoleAlloc for &A {
    #[inline]
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        (**self).allocate(layout)
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        (**self).release(ptr, layout)
    }
}

/// Allocator backed by the `alloc` crate's global heap
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAlloc;

#[cfg(feature = "alloc")]
unsafe impl ConsoleAlloc for SystemAlloc {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        NonNull::new(unsafe { alloc::alloc::alloc(layout) })
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        alloc::alloc::dealloc(ptr.as_ptr(), layout)
    }
}

/// Allocation hook: returns null on failure
pub type AllocateFn = unsafe fn(Layout) -> *mut u8;

/// Release hook: receives the pointer and the layout it was allocated with
pub type ReleaseFn = unsafe fn(*mut u8, Layout);

/// Allocator built from a caller-supplied allocate/release pair
///
/// This is how a kernel without a Rust global allocator lends its own
/// `malloc`/`free` to the console.
#[derive(Clone, Copy)]
pub struct FnAlloc {
    allocate: AllocateFn,
    release: ReleaseFn,
}

impl FnAlloc {
    /// Wrap an allocate/release pair
    ///
    /// # Safety
    ///
    /// `allocate` must honour the size and alignment of the layout it is
    /// given (or return null), and `release` must accept every non-null
    /// pointer `allocate` hands out.
    pub const unsafe fn new(allocate: AllocateFn, release: ReleaseFn) -> Self {
        Self { allocate, release }
    }
}

unsafe impl ConsoleAlloc for FnAlloc {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        NonNull::new(unsafe { (self.allocate)(layout) })
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        (self.release)(ptr.as_ptr(), layout)
    }
}

impl core::fmt::Debug for FnAlloc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FnAlloc").finish_non_exhaustive()
    }
}
