//! Arena Allocator
//!
//! Fixed-region allocator for freestanding targets, using
//! linked_list_allocator. The region must be handed over before the console
//! is constructed; the arena never grows.

use core::alloc::Layout;
use core::ptr::NonNull;

use linked_list_allocator::LockedHeap;

use crate::allocator::ConsoleAlloc;

/// Default arena configuration
pub mod config {
    /// Default arena size (4 MiB), enough for a 1920x1080 back buffer
    pub const DEFAULT_ARENA_SIZE: usize = 4 * 1024 * 1024;
}

/// Console allocator over a fixed memory region
///
/// Usable from a `static` since the underlying heap is spin-locked:
///
/// ```rust,ignore
/// static ARENA: ArenaAlloc = ArenaAlloc::empty();
/// static mut REGION: [u8; config::DEFAULT_ARENA_SIZE] = [0; config::DEFAULT_ARENA_SIZE];
/// unsafe { ARENA.init(REGION.as_mut_ptr(), REGION.len()) };
/// let console = Console::new(fb, &ARENA)?;
/// ```
pub struct ArenaAlloc {
    heap: LockedHeap,
}

impl ArenaAlloc {
    /// Create an arena with no backing memory; every allocation fails until `init`
    pub const fn empty() -> Self {
        Self {
            heap: LockedHeap::empty(),
        }
    }

    /// Create an arena over `[start, start + size)`
    ///
    /// # Safety
    ///
    /// The region must be valid, writable, unused by anything else and must
    /// outlive the arena.
    pub unsafe fn new(start: *mut u8, size: usize) -> Self {
        let arena = Self::empty();
        arena.init(start, size);
        arena
    }

    /// Hand a memory region to an empty arena
    ///
    /// # Safety
    ///
    /// Same requirements as `new()`. Must be called at most once.
    pub unsafe fn init(&self, start: *mut u8, size: usize) {
        self.heap.lock().init(start, size);
        log::debug!("[arena] initialised {} bytes at {:p}", size, start);
    }

    /// Get current arena usage statistics
    pub fn stats(&self) -> HeapStats {
        let heap = self.heap.lock();
        HeapStats {
            used: heap.used(),
            free: heap.free(),
            total: heap.size(),
        }
    }
}

unsafe impl ConsoleAlloc for ArenaAlloc {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        self.heap.lock().allocate_first_fit(layout).ok()
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        self.heap.lock().deallocate(ptr, layout)
    }
}

/// Arena usage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapStats {
    /// Bytes currently allocated
    pub used: usize,
    /// Bytes available for allocation
    pub free: usize,
    /// Total arena size
    pub total: usize,
}

impl HeapStats {
    /// Get usage percentage (0-100)
    pub fn usage_percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.used * 100) / self.total) as u8
    }
}
