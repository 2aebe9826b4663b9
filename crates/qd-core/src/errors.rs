//! Error types for quantdesk.
//!
//! A single `thiserror`-derived enum covers every failure the valuation and
//! calibration layers can report.  The `ensure!`, `ensure_post!`, and `fail!`
//! macros are the shorthand used across the workspace for precondition,
//! postcondition, and unconditional failures.

use thiserror::Error;

/// The top-level error type used throughout quantdesk.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error.
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Postcondition violated.
    #[error("postcondition not satisfied: {0}")]
    Postcondition(String),

    /// An operation was requested on a null / unset value.
    #[error("null value")]
    NullValue,

    /// Date-related error.
    #[error("date error: {0}")]
    Date(String),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A calibration did not produce a usable parameter.
    #[error("calibration error: {0}")]
    Calibration(String),
}

/// Shorthand `Result` type used throughout quantdesk.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Require a condition to hold, otherwise return early.
///
/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use qd_core::{ensure, errors::Error};
/// fn positive(x: f64) -> qd_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Require a postcondition to hold, otherwise return early.
///
/// Returns `Err(Error::Postcondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use qd_core::{ensure_post, errors::Error};
/// fn compute(x: f64) -> qd_core::errors::Result<f64> {
///     let result = x * 2.0;
///     ensure_post!(result > 0.0, "result must be positive, got {result}");
///     Ok(result)
/// }
/// assert!(compute(1.0).is_ok());
/// assert!(compute(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure_post {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Postcondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Fail unconditionally with a runtime error.
///
/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use qd_core::{fail, errors::Error};
/// fn always_err() -> qd_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
