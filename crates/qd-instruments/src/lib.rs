//! # qd-instruments
//!
//! Financial instruments: vanilla options and fixed-rate bonds, plus the
//! pricing-engine trait they are priced through.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod bond;
pub mod exercise;
pub mod instrument;
pub mod option;
pub mod payoff;

pub use bond::{fixed_rate_bond, Bond};
pub use exercise::{Exercise, ExerciseType};
pub use instrument::{Instrument, PricingEngine, PricingResults};
pub use option::{VanillaOption, VanillaOptionArguments};
pub use payoff::{OptionType, Payoff, PlainVanillaPayoff, StrikedPayoff};
