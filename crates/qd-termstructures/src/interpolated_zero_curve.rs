//! Yield curve interpolating continuously-compounded zero rates.
//!
//! The curve stores (date, zero rate) pillars and interpolates the zero rate
//! as a function of time; discount factors follow as `P(t) = exp(-z(t) t)`.
//! Queries beyond the last pillar extrapolate flat.

use std::sync::Arc;

use crate::term_structure::{TermStructure, TermStructureData};
use crate::yield_term_structure::YieldTermStructure;
use qd_core::{ensure, DiscountFactor, Rate, Real, Result, Time};
use qd_math::Interpolation1D;
use qd_time::{Calendar, Date, DayCounter, NullCalendar};

/// Builds an interpolation from `(xs, ys)` slices.
///
/// Lets curve constructors take the interpolation scheme as a value instead
/// of a type parameter.
pub trait InterpolationBuilder: std::fmt::Debug {
    /// Builds an interpolation over the given abscissas and ordinates.
    fn build(&self, xs: &[Real], ys: &[Real]) -> Result<Box<dyn Interpolation1D>>;
}

/// Linear interpolation scheme.
#[derive(Debug, Clone, Copy)]
pub struct Linear;

impl InterpolationBuilder for Linear {
    fn build(&self, xs: &[Real], ys: &[Real]) -> Result<Box<dyn Interpolation1D>> {
        Ok(Box::new(qd_math::LinearInterpolation::new(xs, ys)?))
    }
}

/// A yield curve defined by zero rates at known dates.
#[derive(Debug)]
pub struct InterpolatedZeroCurve {
    data: TermStructureData,
    dates: Vec<Date>,
    times: Vec<Time>,
    rates: Vec<Rate>,
    interp: Box<dyn Interpolation1D>,
    max_date: Date,
}

impl InterpolatedZeroCurve {
    /// Builds a zero curve from pillar dates and matching zero rates.
    ///
    /// The first date is taken as the reference date; dates must be strictly
    /// increasing and rates continuously compounded.
    pub fn new(
        dates: &[Date],
        rates: &[Rate],
        day_counter: impl DayCounter + 'static,
        builder: &dyn InterpolationBuilder,
    ) -> Result<Self> {
        ensure!(
            dates.len() >= 2,
            "a zero curve needs at least two dates, got {}",
            dates.len()
        );
        ensure!(
            dates.len() == rates.len(),
            "{} dates vs {} rates",
            dates.len(),
            rates.len()
        );

        let reference_date = dates[0];
        let dc: Arc<dyn DayCounter> = Arc::new(day_counter);

        let times: Vec<Time> = dates
            .iter()
            .map(|&d| dc.year_fraction(reference_date, d))
            .collect();

        let interp = builder.build(&times, rates)?;
        let max_date = dates[dates.len() - 1];

        Ok(Self {
            data: TermStructureData {
                reference_date,
                calendar: Box::new(NullCalendar),
                day_counter: dc,
            },
            dates: dates.to_vec(),
            times,
            rates: rates.to_vec(),
            interp,
            max_date,
        })
    }

    /// Replaces the default `NullCalendar`.
    pub fn with_calendar(mut self, calendar: impl Calendar + 'static) -> Self {
        self.data.calendar = Box::new(calendar);
        self
    }

    /// The pillar dates.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// The pillar times.
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// The pillar zero rates.
    pub fn rates(&self) -> &[Rate] {
        &self.rates
    }
}

impl TermStructure for InterpolatedZeroCurve {
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

impl YieldTermStructure for InterpolatedZeroCurve {
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use qd_time::Actual365Fixed;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn sample_curve() -> InterpolatedZeroCurve {
        let dates = vec![
            date(2014, 4, 14),
            date(2014, 10, 14),
            date(2015, 4, 14),
            date(2016, 4, 14),
            date(2019, 4, 15),
        ];
        let rates = vec![0.004, 0.006, 0.010, 0.016, 0.022];
        InterpolatedZeroCurve::new(&dates, &rates, Actual365Fixed, &Linear).unwrap()
    }

    #[test]
    fn recovers_pillar_rates() {
        let curve = sample_curve();
        let expected = [0.004, 0.006, 0.010, 0.016, 0.022];
        let pillars: Vec<Date> = curve.dates().to_vec();
        for (i, &d) in pillars.iter().enumerate() {
            let t = curve.time_from_reference(d);
            assert_abs_diff_eq!(curve.zero_rate_impl(t), expected[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn interpolates_between_pillars() {
        let curve = sample_curve();
        let t_mid = 0.5 * (curve.times()[1] + curve.times()[2]);
        let z = curve.zero_rate_impl(t_mid);
        assert!(z > 0.006 && z < 0.010, "z = {z}");
    }

    #[test]
    fn extrapolates_flat_past_the_last_pillar() {
        let curve = sample_curve();
        assert_abs_diff_eq!(curve.zero_rate_impl(30.0), 0.022, epsilon = 1e-12);
    }

    #[test]
    fn discount_consistent_with_zero_rates() {
        let curve = sample_curve();
        assert_abs_diff_eq!(curve.discount(0.0), 1.0, epsilon = 1e-15);
        for t in [0.25, 1.0, 2.5, 4.0] {
            let z = curve.zero_rate_impl(t);
            assert_abs_diff_eq!(curve.discount(t), (-z * t).exp(), epsilon = 1e-13);
        }
    }

    #[test]
    fn rejects_mismatched_inputs() {
        let dates = vec![date(2014, 4, 14), date(2015, 4, 14)];
        let rates = vec![0.01];
        assert!(InterpolatedZeroCurve::new(&dates, &rates, Actual365Fixed, &Linear).is_err());
    }
}
