//! Allocator-backed buffers
//!
//! `RawBuffer` is a fixed-length array of `Copy` elements whose storage
//! comes from a `ConsoleAlloc`. It is allocated once, never resized, and
//! handed back to the same allocator exactly once when dropped.

use core::alloc::Layout;
use core::fmt;
use core::ops::{Deref, DerefMut};
use core::ptr::NonNull;

use crate::allocator::ConsoleAlloc;
use crate::error::{AllocError, AllocResult};

/// Fixed-length array owned through an allocator capability
pub struct RawBuffer<T: Copy, A: ConsoleAlloc> {
    ptr: NonNull<T>,
    len: usize,
    layout: Layout,
    alloc: A,
}

impl<T: Copy, A: ConsoleAlloc> RawBuffer<T, A> {
    /// Allocate `len` elements, each initialised to `value`
    pub fn filled(alloc: A, len: usize, value: T) -> AllocResult<Self> {
        let layout = Layout::array::<T>(len).map_err(|_| AllocError::CapacityOverflow)?;

        let ptr = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            let raw = alloc.allocate(layout).ok_or(AllocError::OutOfMemory {
                bytes: layout.size(),
            })?;
            let ptr = raw.cast::<T>();
            for i in 0..len {
                // SAFETY: the block holds `len` properly aligned elements
                unsafe { ptr.as_ptr().add(i).write(value) };
            }
            ptr
        };

        Ok(Self {
            ptr,
            len,
            layout,
            alloc,
        })
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the buffer holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the elements as a slice
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: ptr is valid for len initialised elements (or dangling with len 0)
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Get the elements as a mutable slice
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, and &mut self guarantees exclusivity
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// The allocator this buffer returns its storage to
    pub fn allocator(&self) -> &A {
        &self.alloc
    }
}

impl<T: Copy, A: ConsoleAlloc> Deref for RawBuffer<T, A> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Copy, A: ConsoleAlloc> DerefMut for RawBuffer<T, A> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Copy, A: ConsoleAlloc> Drop for RawBuffer<T, A> {
    fn drop(&mut self) {
        if self.layout.size() != 0 {
            // SAFETY: allocated in `filled` with this exact layout, released once
            unsafe { self.alloc.release(self.ptr.cast(), self.layout) };
        }
    }
}

impl<T: Copy + fmt::Debug, A: ConsoleAlloc> fmt::Debug for RawBuffer<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawBuffer")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

// Safety: RawBuffer uniquely owns its elements, like a Box<[T]>
unsafe impl<T: Copy + Send, A: ConsoleAlloc + Send> Send for RawBuffer<T, A> {}
unsafe impl<T: Copy + Sync, A: ConsoleAlloc + Sync> Sync for RawBuffer<T, A> {}
