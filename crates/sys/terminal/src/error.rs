//! Console error types

use core::fmt;

use uterm_mem::AllocError;

/// Console result type
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Reasons a console could not be created
///
/// Only construction fails; once a console exists, out-of-range coordinates
/// and malformed escape sequences are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// A buffer allocation returned nothing
    OutOfMemory {
        /// Size of the failed request in bytes
        bytes: usize,
    },
    /// A buffer size does not fit a `Layout`
    CapacityOverflow,
    /// The surface is smaller than one full cell
    EmptyGeometry { width: usize, height: usize },
    /// The front surface holds fewer than `width * height` pixels
    FramebufferTooSmall { expected: usize, actual: usize },
}

impl From<AllocError> for ConsoleError {
    fn from(err: AllocError) -> Self {
        match err {
            AllocError::OutOfMemory { bytes } => ConsoleError::OutOfMemory { bytes },
            AllocError::CapacityOverflow => ConsoleError::CapacityOverflow,
        }
    }
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::OutOfMemory { bytes } => {
                write!(f, "Out of memory: console buffer of {} bytes", bytes)
            }
            ConsoleError::CapacityOverflow => write!(f, "Console buffer size overflow"),
            ConsoleError::EmptyGeometry { width, height } => {
                write!(f, "Surface {}x{} holds no complete 8x16 cell", width, height)
            }
            ConsoleError::FramebufferTooSmall { expected, actual } => {
                write!(f, "Framebuffer too small: need {} pixels, got {}", expected, actual)
            }
        }
    }
}
