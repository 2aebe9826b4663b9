//! # qd-math
//!
//! Numerical building blocks for quantdesk: 1-D root finding, the
//! market-price calibrator, normal distribution functions (via statrs),
//! and interpolation.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ──────────────────────────────────────────────────────────────

/// Calibration of a scalar parameter to a target price.
pub mod calibration;

/// Probability distributions.
pub mod distributions;

/// 1D interpolation schemes.
pub mod interpolations;

/// 1D root-finding solvers.
pub mod solvers1d;

// ── Convenience re-exports ───────────────────────────────────────────────

pub use calibration::{CalibrationError, CalibrationResult, Calibrator};
pub use distributions::{normal_cdf, normal_pdf};
pub use interpolations::{Interpolation1D, LinearInterpolation};
