//! # qd-methods
//!
//! Numerical methods behind the quantdesk pricing engines.
//!
//! The crate carries the finite-difference machinery used by the
//! American-exercise engine: a tridiagonal operator with a
//! Thomas-algorithm solve and a 1-D log-spot Black-Scholes PDE solver
//! that supports an early-exercise obstacle and reads value, delta,
//! and gamma off the spatial grid.
//!
//! # Modules
//!
//! * [`finite_differences`] — tridiagonal operator, θ-scheme stepping,
//!   1-D Black-Scholes solver

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Finite difference methods: tridiagonal solver, 1-D PDE solver.
pub mod finite_differences;

pub use finite_differences::{
    FdmBlackScholesSolver, FdmScheme, FdmSolution, TridiagonalOperator,
};
