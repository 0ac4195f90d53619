//! Allocation error types

use core::fmt;

/// Allocation result type
pub type AllocResult<T> = Result<T, AllocError>;

/// Reasons a buffer could not be acquired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    /// The allocator had no block of the requested size
    OutOfMemory {
        /// Size of the failed request in bytes
        bytes: usize,
    },
    /// Element count times element size does not fit a `Layout`
    CapacityOverflow,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocError::OutOfMemory { bytes } => {
                write!(f, "Out of memory: allocation of {} bytes failed", bytes)
            }
            AllocError::CapacityOverflow => write!(f, "Capacity overflow"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AllocError::OutOfMemory { bytes: 4096 };
        assert_eq!(err.to_string(), "Out of memory: allocation of 4096 bytes failed");
        assert_eq!(AllocError::CapacityOverflow.to_string(), "Capacity overflow");
    }
}
