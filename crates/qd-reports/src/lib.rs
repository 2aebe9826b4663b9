//! # qd-reports
//!
//! Standard valuation reports: immutable config structs in, printable
//! report structs out. Each entry function builds its own market
//! objects from the config, runs the pricing or calibration it
//! describes, and returns a report whose `Display` prints the fixed
//! `label: value` lines.
//!
//! ## Reports
//!
//! - [`european_option_report`] — Black-Scholes-Merton value and Greeks
//! - [`american_option_report`] — implied-volatility calibration and finite difference valuation
//! - [`comparison_report`] — both exercise styles calibrated to one quote
//! - [`fixed_rate_bond_report`] — bootstrapped curve, z-spread, and flat-yield risk numbers

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod american;
pub mod bond;
pub mod comparison;
pub mod european;
mod market;

pub use american::{american_option_report, AmericanOptionConfig, AmericanOptionReport};
pub use bond::{fixed_rate_bond_report, FixedRateBondConfig, FixedRateBondReport};
pub use comparison::{comparison_report, ComparisonConfig, ComparisonReport};
pub use european::{european_option_report, EuropeanOptionConfig, EuropeanOptionReport};
