//! Error types for the Polaris engine
//!
//! One error enum is shared by the contract crate and the backend crates.
//! Device failures (allocation rejected, no compatible memory type) have no
//! safe continuation and callers are expected to treat them as fatal;
//! unsupported configurations and unimplemented contract members are typed
//! so callers can reject them at startup instead of aborting mid-frame.

use std::fmt;

use crate::renderer::Backend;

/// Result type for Polaris engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Polaris engine errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Backend-specific error (Vulkan, OpenGL, ...)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// No device memory type satisfies the requested filter and properties
    NoSuitableMemoryType,

    /// The configured backend cannot service the request
    UnsupportedBackend(Backend),

    /// Contract member not implemented by the active backend
    Unsupported(String),

    /// A write was larger than the buffer it targets
    SizeExceeded {
        /// Bytes the caller tried to write
        requested: u64,
        /// Bytes the buffer was created with
        capacity: u64,
    },

    /// Invalid resource (buffer, vertex array, ...)
    InvalidResource(String),

    /// Initialization failed (device, backend, subsystems)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::NoSuitableMemoryType => {
                write!(f, "No suitable GPU memory type for the requested properties")
            }
            Error::UnsupportedBackend(backend) => {
                write!(f, "Unsupported backend: {}", backend)
            }
            Error::Unsupported(what) => write!(f, "Not supported: {}", what),
            Error::SizeExceeded { requested, capacity } => {
                write!(f, "Write of {} bytes exceeds buffer capacity of {} bytes", requested, capacity)
            }
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an ERROR with file:line details and produce an [`Error::BackendError`]
/// carrying the same message
///
/// # Example
///
/// ```no_run
/// # use polaris_engine::{engine_err, polaris::Result};
/// # fn create(raw: std::result::Result<u32, i32>) -> Result<u32> {
/// let buffer = raw
///     .map_err(|e| engine_err!("polaris::vulkan", "Failed to create buffer: {:?}", e))?;
/// # Ok(buffer)
/// # }
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::polaris::Engine::log_detailed(
            $crate::polaris::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!(),
        );
        $crate::polaris::Error::BackendError(message)
    }};
}

/// Log an ERROR and return early with the resulting error
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
