//! Interest rates quoted against a day count and compounding convention.

use std::fmt;
use std::sync::Arc;

use qd_core::{Compounding, Error, Rate, Real, Result, Time};

use crate::date::Date;
use crate::day_counter::DayCounter;
use crate::frequency::Frequency;

/// An interest rate together with the conventions needed to turn it
/// into compound and discount factors.
#[derive(Debug, Clone)]
pub struct InterestRate {
    rate: Rate,
    day_counter: Arc<dyn DayCounter>,
    compounding: Compounding,
    frequency: Frequency,
}

impl InterestRate {
    /// Creates a rate with the given conventions.
    pub fn new(
        rate: Rate,
        day_counter: Arc<dyn DayCounter>,
        compounding: Compounding,
        frequency: Frequency,
    ) -> InterestRate {
        InterestRate {
            rate,
            day_counter,
            compounding,
            frequency,
        }
    }

    /// The quoted rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Day-count convention the rate is quoted against.
    pub fn day_counter(&self) -> &Arc<dyn DayCounter> {
        &self.day_counter
    }

    /// Compounding convention.
    pub fn compounding(&self) -> Compounding {
        self.compounding
    }

    /// Compounding frequency.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Compound factor implied by the rate over `t` years.
    ///
    /// # Panics
    ///
    /// Panics if `t` is negative.
    pub fn compound_factor_time(&self, t: Time) -> Real {
        assert!(t >= 0.0, "negative time {} not allowed", t);
        let r = self.rate;
        let f = frequency_value(self.frequency);
        match self.compounding {
            Compounding::Simple => 1.0 + r * t,
            Compounding::Compounded => (1.0 + r / f).powf(f * t),
            Compounding::Continuous => (r * t).exp(),
            Compounding::SimpleThenCompounded => {
                if t <= 1.0 / f {
                    1.0 + r * t
                } else {
                    (1.0 + r / f).powf(f * t)
                }
            }
        }
    }

    /// Discount factor implied by the rate over `t` years.
    pub fn discount_factor_time(&self, t: Time) -> Real {
        1.0 / self.compound_factor_time(t)
    }

    /// Compound factor between two dates, accruing against an optional
    /// reference period.
    pub fn compound_factor(
        &self,
        d1: Date,
        d2: Date,
        ref_start: Option<Date>,
        ref_end: Option<Date>,
    ) -> Real {
        let t = self.day_counter.year_fraction_with_ref(d1, d2, ref_start, ref_end);
        self.compound_factor_time(t)
    }

    /// Discount factor between two dates.
    pub fn discount_factor(
        &self,
        d1: Date,
        d2: Date,
        ref_start: Option<Date>,
        ref_end: Option<Date>,
    ) -> Real {
        1.0 / self.compound_factor(d1, d2, ref_start, ref_end)
    }

    /// Rate implied by a compound factor over `t` years.
    pub fn implied_rate_time(
        compound: Real,
        day_counter: Arc<dyn DayCounter>,
        compounding: Compounding,
        frequency: Frequency,
        t: Time,
    ) -> Result<InterestRate> {
        if compound <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "positive compound factor required, got {}",
                compound
            )));
        }
        if t <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "positive time required, got {}",
                t
            )));
        }
        let f = frequency_value(frequency);
        let rate = match compounding {
            Compounding::Simple => (compound - 1.0) / t,
            Compounding::Compounded => (compound.powf(1.0 / (f * t)) - 1.0) * f,
            Compounding::Continuous => compound.ln() / t,
            Compounding::SimpleThenCompounded => {
                if t <= 1.0 / f {
                    (compound - 1.0) / t
                } else {
                    (compound.powf(1.0 / (f * t)) - 1.0) * f
                }
            }
        };
        Ok(InterestRate::new(rate, day_counter, compounding, frequency))
    }
}

fn frequency_value(frequency: Frequency) -> Real {
    match frequency.periods_per_year() {
        Some(n) => n as Real,
        None => 1.0,
    }
}

impl fmt::Display for InterestRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.4} % {} {:?} compounding",
            self.rate * 100.0,
            self.day_counter.name(),
            self.compounding
        )
    }
}
