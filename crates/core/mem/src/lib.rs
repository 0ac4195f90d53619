//! uterm Memory Plumbing
//!
//! The console never reaches for a global heap on its own. Everything it
//! owns is acquired through an injected allocator capability:
//! - `allocator` - The `ConsoleAlloc` capability plus stock implementations
//! - `heap` - Fixed-region arena for freestanding targets
//! - `buffer` - `RawBuffer`, an owned array released through its allocator
//! - `error` - Allocation failures
//!
//! # Architecture
//!
//! ```text
//! allocator.rs ─── ConsoleAlloc (allocate / release)
//!    │
//!    ├── SystemAlloc ─── `alloc` crate global heap (feature = "alloc")
//!    ├── FnAlloc ─────── caller-supplied function pointer pair
//!    └── heap.rs ─────── ArenaAlloc (linked_list_allocator over a fixed region)
//!
//! buffer.rs ─── RawBuffer<T, A>: allocated once, released exactly once on drop
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use uterm_mem::{ArenaAlloc, RawBuffer};
//!
//! static ARENA: ArenaAlloc = ArenaAlloc::empty();
//!
//! unsafe { ARENA.init(region.as_mut_ptr(), region.len()) };
//! let cells = RawBuffer::filled(&ARENA, 80 * 25, 0u8)?;
//! ```

#![cfg_attr(not(test), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod allocator;
pub mod buffer;
pub mod error;
pub mod heap;

pub use allocator::{AllocateFn, ConsoleAlloc, FnAlloc, ReleaseFn};
#[cfg(feature = "alloc")]
pub use allocator::SystemAlloc;
pub use buffer::RawBuffer;
pub use error::AllocError;
pub use heap::{ArenaAlloc, HeapStats};
