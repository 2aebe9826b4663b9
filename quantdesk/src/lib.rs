//! # quantdesk
//!
//! Option and bond valuation reports over a compact quantitative
//! finance core: closed-form and finite difference option pricing,
//! curve bootstrapping, cash-flow analytics, and the calibration
//! machinery that backs implied volatilities and z-spreads out of
//! market quotes.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `qd-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! quantdesk = "0.1"
//! ```
//!
//! ```rust
//! use quantdesk::reports::{european_option_report, EuropeanOptionConfig};
//!
//! let config = EuropeanOptionConfig::standard().unwrap();
//! let report = european_option_report(&config).unwrap();
//! println!("{}", report);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use qd_core as core;

/// Date, calendar, day counter, and schedule types.
pub use qd_time as time;

/// Mathematical utilities: calibration, distributions, interpolation.
pub use qd_math as math;

/// Market quotes.
pub use qd_quotes as quotes;

/// Term structure implementations.
pub use qd_termstructures as termstructures;

/// Stochastic process definitions.
pub use qd_processes as processes;

/// Numerical methods (finite differences).
pub use qd_methods as methods;

/// Cash flows and coupons.
pub use qd_cashflows as cashflows;

/// Financial instruments.
pub use qd_instruments as instruments;

/// Pricing engines.
pub use qd_pricingengines as pricingengines;

/// Standard valuation reports.
pub use qd_reports as reports;
