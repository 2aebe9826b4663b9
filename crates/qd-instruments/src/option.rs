//! Vanilla option instrument.

use crate::exercise::Exercise;
use crate::instrument::{Instrument, PricingEngine, PricingResults};
use crate::payoff::{OptionType, PlainVanillaPayoff, StrikedPayoff};
use qd_core::{Real, Result};
use qd_time::Date;
use std::sync::Arc;

/// Arguments needed for pricing a one-asset option.
#[derive(Debug, Clone)]
pub struct VanillaOptionArguments {
    /// The payoff.
    pub payoff: Arc<dyn StrikedPayoff>,
    /// The exercise specification.
    pub exercise: Exercise,
}

/// A plain vanilla option on a single underlying asset.
#[derive(Debug)]
pub struct VanillaOption {
    /// The payoff function.
    payoff: Arc<dyn StrikedPayoff>,
    /// The exercise specification.
    exercise: Exercise,
}

impl VanillaOption {
    /// Create a new vanilla option.
    pub fn new(payoff: Arc<dyn StrikedPayoff>, exercise: Exercise) -> Self {
        Self { payoff, exercise }
    }

    /// Convenience: create a European call/put.
    pub fn european(option_type: OptionType, strike: Real, expiry: Date) -> Self {
        Self {
            payoff: Arc::new(PlainVanillaPayoff::new(option_type, strike)),
            exercise: Exercise::european(expiry),
        }
    }

    /// Convenience: create an American call/put exercisable from
    /// `earliest` through `expiry`.
    pub fn american(option_type: OptionType, strike: Real, earliest: Date, expiry: Date) -> Self {
        Self {
            payoff: Arc::new(PlainVanillaPayoff::new(option_type, strike)),
            exercise: Exercise::american(earliest, expiry),
        }
    }

    /// The strike price.
    pub fn strike(&self) -> Real {
        self.payoff.strike()
    }

    /// The option type (call/put).
    pub fn option_type(&self) -> OptionType {
        self.payoff.option_type()
    }

    /// The payoff.
    pub fn payoff(&self) -> &dyn StrikedPayoff {
        &*self.payoff
    }

    /// The exercise.
    pub fn exercise(&self) -> &Exercise {
        &self.exercise
    }

    /// Get the arguments for a pricing engine.
    pub fn arguments(&self) -> VanillaOptionArguments {
        VanillaOptionArguments {
            payoff: Arc::clone(&self.payoff),
            exercise: self.exercise.clone(),
        }
    }

    /// Price this option using the given engine.
    pub fn price(
        &self,
        engine: &dyn PricingEngine<VanillaOptionArguments>,
    ) -> Result<PricingResults> {
        engine.calculate(&self.arguments())
    }
}

impl Instrument for VanillaOption {
    fn is_expired(&self, reference_date: Date) -> bool {
        self.exercise.last_date() < reference_date
    }

    fn maturity_date(&self) -> Option<Date> {
        Some(self.exercise.last_date())
    }
}
