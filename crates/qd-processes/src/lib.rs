//! # qd-processes
//!
//! The Black-Scholes market process: one bundle tying the spot quote to the
//! risk-free curve, the dividend curve, and the Black volatility structure
//! that the pricing engines consume.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// `GeneralizedBlackScholesProcess` and its convenience constructors.
pub mod black_scholes_process;

pub use black_scholes_process::{
    black_scholes_merton_process, black_scholes_process, GeneralizedBlackScholesProcess,
};
