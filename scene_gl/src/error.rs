//! Error types for SceneGL
//!
//! Only two kinds of error ever reach a caller of the high-level API:
//! malformed input and failed resource creation. Release failures are
//! reported by the device layer and swallowed (with a warning) by every
//! owning object, so that teardown is never blocked.

use std::fmt;

/// Result type for SceneGL operations
pub type Result<T> = std::result::Result<T, Error>;

/// SceneGL errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed input (array shapes, light counts, pixel layouts, ...)
    InvalidArgument(String),

    /// A native resource could not be created (incomplete frame buffer,
    /// missing backend entry points)
    ResourceCreationFailure(String),

    /// A native resource could not be released
    ///
    /// Returned by `GlDevice::delete_*` only. Owning objects log it and
    /// carry on.
    ReleaseFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::ResourceCreationFailure(msg) => write!(f, "Resource creation failed: {}", msg),
            Error::ReleaseFailed(msg) => write!(f, "Release failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an error with file:line details and return it from the current function
///
/// # Example
///
/// ```no_run
/// # use scene_gl::scenegl::{Error, Result};
/// # use scene_gl::scenegl_bail;
/// fn check(count: usize) -> Result<()> {
///     if count > 8 {
///         scenegl_bail!("scenegl::MeshRenderer", InvalidArgument,
///             "At most 8 light directions can be specified (got {})", count);
///     }
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! scenegl_bail {
    ($source:expr, $kind:ident, $($arg:tt)*) => {
        return Err($crate::scenegl_err!($source, $kind, $($arg)*))
    };
}

/// Log an error with file:line details and evaluate to it
#[macro_export]
macro_rules! scenegl_err {
    ($source:expr, $kind:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::log::log_detailed(
            $crate::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!(),
        );
        $crate::scenegl::Error::$kind(message)
    }};
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
