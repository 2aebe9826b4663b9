//! Iterative bootstrap of a zero curve from market instruments.
//!
//! Each [`RateHelper`] pins the curve at its pillar date. Pillars are solved
//! in maturity order: Brent's method adjusts the pillar's zero rate until the
//! helper's implied quote matches its market quote, probing discount factors
//! through a [`BootstrapCurve`] view over the rates solved so far.
//!
//! # Example
//!
//! ```
//! use qd_termstructures::{DepositRateHelper, PiecewiseYieldCurve, RateHelper};
//! use qd_termstructures::yield_term_structure::YieldTermStructure;
//! use qd_time::{Actual360, Date};
//!
//! let reference = Date::from_ymd(2014, 4, 14).unwrap();
//! let helpers: Vec<Box<dyn RateHelper>> = vec![
//!     Box::new(DepositRateHelper::new(
//!         0.0010,
//!         reference,
//!         Date::from_ymd(2015, 4, 14).unwrap(),
//!         Actual360,
//!     )),
//! ];
//! let curve = PiecewiseYieldCurve::new(reference, &helpers, Actual360).unwrap();
//! assert!(curve.discount(1.0) < 1.0);
//! ```

use std::sync::Arc;

use crate::interpolated_zero_curve::{InterpolationBuilder, Linear};
use crate::rate_helpers::{BootstrapCurve, RateHelper};
use crate::term_structure::{TermStructure, TermStructureData};
use crate::yield_term_structure::YieldTermStructure;
use qd_core::{ensure, DiscountFactor, Error, Rate, Real, Result, Time};
use qd_math::Interpolation1D;
use qd_time::{Calendar, Date, DayCounter, NullCalendar};

/// Accuracy of the per-pillar quote match.
const BOOTSTRAP_ACCURACY: Real = 1.0e-12;

/// Lower bound of the zero-rate search.
const MIN_RATE: Rate = -0.10;

/// Upper bound of the zero-rate search.
const MAX_RATE: Rate = 0.30;

/// A yield curve bootstrapped from rate helpers.
///
/// Zero rates are continuously compounded, linearly interpolated between
/// pillars, and flat beyond the last pillar. The rate at the reference node
/// is a copy of the first pillar's rate.
#[derive(Debug)]
pub struct PiecewiseYieldCurve {
    data: TermStructureData,
    dates: Vec<Date>,
    times: Vec<Time>,
    rates: Vec<Rate>,
    interp: Box<dyn Interpolation1D>,
    max_date: Date,
}

impl PiecewiseYieldCurve {
    /// Bootstraps a curve with the default rate bounds and accuracy.
    ///
    /// # Errors
    /// Fails if no helpers are given, a pillar is duplicated or not after the
    /// reference date, or a pillar's quote cannot be matched inside the
    /// search bounds.
    pub fn new(
        reference_date: Date,
        helpers: &[Box<dyn RateHelper>],
        day_counter: impl DayCounter + 'static,
    ) -> Result<Self> {
        Self::with_bounds(
            reference_date,
            helpers,
            day_counter,
            MIN_RATE,
            MAX_RATE,
            BOOTSTRAP_ACCURACY,
        )
    }

    /// Bootstraps with explicit zero-rate bounds and solver accuracy.
    pub fn with_bounds(
        reference_date: Date,
        helpers: &[Box<dyn RateHelper>],
        day_counter: impl DayCounter + 'static,
        min_rate: Rate,
        max_rate: Rate,
        accuracy: Real,
    ) -> Result<Self> {
        ensure!(!helpers.is_empty(), "at least one rate helper is required");

        let dc: Arc<dyn DayCounter> = Arc::new(day_counter);

        let mut order: Vec<usize> = (0..helpers.len()).collect();
        order.sort_by_key(|&i| helpers[i].pillar_date());

        let mut dates = Vec::with_capacity(helpers.len() + 1);
        let mut times = Vec::with_capacity(helpers.len() + 1);
        let mut sorted: Vec<&dyn RateHelper> = Vec::with_capacity(helpers.len());

        dates.push(reference_date);
        times.push(0.0);

        for &i in &order {
            let pillar = helpers[i].pillar_date();
            ensure!(
                pillar > reference_date,
                "pillar {} is not after the reference date {}",
                pillar,
                reference_date
            );
            ensure!(
                pillar != dates[dates.len() - 1],
                "duplicate pillar date {}",
                pillar
            );
            dates.push(pillar);
            times.push(dc.year_fraction(reference_date, pillar));
            sorted.push(&*helpers[i]);
        }

        let mut rates = vec![0.0_f64; dates.len()];

        for (i, helper) in sorted.iter().enumerate() {
            let k = i + 1;
            let market = helper.quote();
            let solved = qd_math::solvers1d::brent(
                |r| {
                    rates[k] = r;
                    if k == 1 {
                        rates[0] = r;
                    }
                    let view = BootstrapCurve {
                        reference_date,
                        day_counter: &*dc,
                        times: &times[..=k],
                        rates: &rates[..=k],
                    };
                    helper.implied_quote(&view) - market
                },
                min_rate,
                max_rate,
                accuracy,
            )
            .map_err(|e| {
                Error::Runtime(format!(
                    "bootstrap failed at pillar {} ({}): {e}",
                    k, dates[k]
                ))
            })?;
            rates[k] = solved;
            if k == 1 {
                rates[0] = solved;
            }
        }

        let interp = Linear.build(&times, &rates)?;
        let max_date = dates[dates.len() - 1];

        Ok(Self {
            data: TermStructureData {
                reference_date,
                calendar: Box::new(NullCalendar),
                day_counter: dc,
            },
            dates,
            times,
            rates,
            interp,
            max_date,
        })
    }

    /// Replaces the default `NullCalendar`.
    pub fn with_calendar(mut self, calendar: impl Calendar + 'static) -> Self {
        self.data.calendar = Box::new(calendar);
        self
    }

    /// The pillar dates, reference date first.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// The pillar times.
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// The bootstrapped zero rates.
    pub fn rates(&self) -> &[Rate] {
        &self.rates
    }
}

impl TermStructure for PiecewiseYieldCurve {
    fn reference_date(&self) -> Date {
        self.data.reference_date
    }

    fn day_counter(&self) -> Arc<dyn DayCounter> {
        self.data.day_counter.clone()
    }

    fn calendar(&self) -> &dyn Calendar {
        &*self.data.calendar
    }

    fn max_date(&self) -> Date {
        self.max_date
    }
}

impl YieldTermStructure for PiecewiseYieldCurve {
    fn zero_rate_impl(&self, t: Time) -> Rate {
        let t = t.clamp(self.interp.x_min(), self.interp.x_max());
        self.interp.value(t)
    }

    fn discount_impl(&self, t: Time) -> DiscountFactor {
        if t <= 0.0 {
            return 1.0;
        }
        (-self.zero_rate_impl(t) * t).exp()
    }
}
