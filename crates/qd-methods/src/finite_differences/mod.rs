//! Finite difference methods for PDE-based option pricing.
//!
//! The 1-D Black-Scholes PDE is discretised on a uniform log-spot grid
//! and rolled back from the terminal payoff with a θ-weighted time
//! step, so the explicit, implicit, and Crank-Nicolson schemes share
//! one stepping path. An early-exercise obstacle turns the rollback
//! into an American-exercise solve.
//!
//! # Overview
//!
//! * [`TridiagonalOperator`] — tridiagonal matrix with a
//!   Thomas-algorithm solve
//! * [`FdmScheme`] — explicit, implicit, or Crank-Nicolson
//! * [`FdmBlackScholesSolver`] — log-spot rollback reporting value,
//!   delta, and gamma at the spot

pub mod black_scholes_solver;
pub mod tridiagonal_operator;

pub use black_scholes_solver::{FdmBlackScholesSolver, FdmSolution};
pub use tridiagonal_operator::TridiagonalOperator;

use qd_core::Real;

// ─── FDM scheme selection ─────────────────────────────────────────────────────

/// Finite difference time-stepping scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FdmScheme {
    /// Explicit: first-order in time, stable only for small time steps.
    Explicit,
    /// Fully implicit: first-order in time, unconditionally stable.
    Implicit,
    /// Crank-Nicolson: θ-average of explicit and implicit, second-order
    /// in time.
    CrankNicolson,
}

impl FdmScheme {
    /// Weight θ of the implicit side of the time step: 0 explicit,
    /// 1 implicit, ½ Crank-Nicolson.
    pub fn implicit_weight(self) -> Real {
        match self {
            FdmScheme::Explicit => 0.0,
            FdmScheme::Implicit => 1.0,
            FdmScheme::CrankNicolson => 0.5,
        }
    }
}

impl Default for FdmScheme {
    fn default() -> Self {
        FdmScheme::CrankNicolson
    }
}
