//! # qd-pricingengines
//!
//! Pricing engines: analytic and finite-difference implementations for
//! options, discounted cash flow pricing for bonds, and implied
//! volatility calibration.
//!
//! ## Engines
//!
//! - [`AnalyticEuropeanEngine`] — Black-Scholes-Merton closed-form for European options
//! - [`FdAmericanEngine`] — Crank-Nicolson finite difference engine for American options
//! - [`DiscountingBondEngine`] — Discounted cash flow engine for bonds
//! - [`implied_volatility`] — Backs a volatility out of a quoted option price

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_european_engine;
pub mod discounting_bond_engine;
pub mod fd_american_engine;
pub mod implied_volatility;

pub use analytic_european_engine::{black_scholes_merton, AnalyticEuropeanEngine, BlackScholesGreeks};
pub use discounting_bond_engine::DiscountingBondEngine;
pub use fd_american_engine::FdAmericanEngine;
pub use implied_volatility::implied_volatility;
