//! Error types for the simple graphics engine
//!
//! Only failures that must stop the caller are errors: initialization
//! failures and invalid resource descriptions. Lookup misses and incomplete
//! framebuffers are reported through the logger and execution continues.

use std::fmt;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (driver, shader compiler, windowing)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (mesh data, node key, shader source, etc.)
    InvalidResource(String),

    /// Initialization failed (window, context, device plugin)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR and build the matching `Error` value
///
/// The first form produces `Error::BackendError`, the second one lets the
/// caller pick the variant.
///
/// # Example
///
/// ```no_run
/// # use simple_graphics_engine::engine_err;
/// let err = engine_err!("sge::Mesh", "buffer upload failed: {}", 42);
/// let err = engine_err!(InvalidResource, "sge::Mesh", "index {} out of range", 7);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($variant:ident, $source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::sge::Error::$variant(message)
    }};
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::sge::Error::BackendError(message)
    }};
}

/// Log an ERROR and return early with the matching `Error`
///
/// Same forms as [`engine_err!`].
#[macro_export]
macro_rules! engine_bail {
    ($($arg:tt)*) => {
        return Err($crate::engine_err!($($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
