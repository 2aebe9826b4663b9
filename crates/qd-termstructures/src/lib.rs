//! # qd-termstructures
//!
//! Yield curves and Black volatility structures: flat curves, interpolated
//! zero curves, deposit-based bootstrapping, spreaded curves, and constant
//! Black volatility.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `TermStructure` — base trait for all term structures.
pub mod term_structure;

/// `YieldTermStructure` — yield / interest-rate term structures.
pub mod yield_term_structure;

/// `FlatForward` — constant-rate yield curve.
pub mod flat_forward;

/// `InterpolatedZeroCurve` — zero-rate interpolated yield curve.
pub mod interpolated_zero_curve;

/// Rate helpers — market instruments that constrain a bootstrapped curve.
pub mod rate_helpers;

/// `PiecewiseYieldCurve` — iterative bootstrap over rate helpers.
pub mod piecewise_yield_curve;

/// `ZeroSpreadedTermStructure` — parallel zero-rate shift over a base curve.
pub mod zero_spreaded_term_structure;

/// `BlackVolTermStructure` — Black-volatility structures and `BlackConstantVol`.
pub mod black_vol_term_structure;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use black_vol_term_structure::{BlackConstantVol, BlackVolTermStructure};
pub use flat_forward::FlatForward;
pub use interpolated_zero_curve::{InterpolatedZeroCurve, InterpolationBuilder, Linear};
pub use piecewise_yield_curve::PiecewiseYieldCurve;
pub use rate_helpers::{BootstrapCurve, DepositRateHelper, RateHelper};
pub use term_structure::{TermStructure, TermStructureData};
pub use yield_term_structure::YieldTermStructure;
pub use zero_spreaded_term_structure::ZeroSpreadedTermStructure;
