//! Flat yield curve at a constant rate.

use std::sync::Arc;

use crate::term_structure::{TermStructure, TermStructureData};
use crate::yield_term_structure::YieldTermStructure;
use qd_core::{Compounding, DiscountFactor, Rate, Time};
use qd_time::{Calendar, Date, DayCounter, Frequency, InterestRate, NullCalendar};

/// A flat (constant-rate) yield term structure.
///
/// The quoted rate keeps its own compounding convention; discounting uses
/// that convention directly, so a simple 5% curve discounts as
/// `1 / (1 + 0.05 t)` while a continuous 5% curve discounts as
/// `exp(-0.05 t)`. Zero rates read back from the curve are always the
/// continuously-compounded equivalent.
#[derive(Debug)]
pub struct FlatForward {
    data: TermStructureData,
    rate: InterestRate,
}

impl FlatForward {
    /// Creates a flat curve from a rate and its compounding convention.
    pub fn new(
        reference_date: Date,
        rate: Rate,
        day_counter: impl DayCounter + 'static,
        compounding: Compounding,
        frequency: Frequency,
    ) -> Self {
        let dc: Arc<dyn DayCounter> = Arc::new(day_counter);
        Self {
            data: TermStructureData {
                reference_date,
                calendar: Box::new(NullCalendar),
                day_counter: dc.clone(),
            },
            rate: InterestRate::new(rate, dc, compounding, frequency),
        }
    }

    /// Creates a flat curve assuming continuous compounding.
    pub fn continuous(
        reference_date: Date,
        rate: Rate,
        day_counter: impl DayCounter + 'static,
    ) -> Self {
        Self::new(
            reference_date,
            rate,
            day_counter,
            Compounding::Continuous,
            Frequency::NoFrequency,
        )
    }

    /// Replaces the default `NullCalendar`.
    pub fn with_calendar(mut self, calendar: impl Calendar + 'static) -> Self {
        self.data.calendar = Box::new(calendar);
        self
    }

    /// The underlying flat rate.
    pub fn rate(&self) -> &InterestRate {
        &self.rate
    }
}

impl TermStructure for FlatForward {
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
        Date::MAX
    }
}

impl YieldTermStructure for FlatForward {
    fn discount_impl(&self, t: Time) -> DiscountFactor {
        if t <= 0.0 {
            return 1.0;
        }
        self.rate.discount_factor_time(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use qd_time::{Actual365Fixed, WeekendsOnly};

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn continuous_flat_discounts() {
        let curve = FlatForward::continuous(date(2014, 1, 13), 0.05, Actual365Fixed);

        assert_abs_diff_eq!(curve.discount(0.0), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(curve.discount(1.0), (-0.05_f64).exp(), epsilon = 1e-12);
        assert_abs_diff_eq!(curve.discount(10.0), (-0.5_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn compounded_flat_discounts_with_its_own_convention() {
        let curve = FlatForward::new(
            date(2014, 1, 13),
            0.05,
            Actual365Fixed,
            Compounding::Compounded,
            Frequency::Annual,
        );

        assert_abs_diff_eq!(curve.discount(2.0), 1.05_f64.powi(-2), epsilon = 1e-12);
        assert_abs_diff_eq!(
            curve.zero_rate_impl(2.0),
            1.05_f64.ln(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn simple_flat_discounts_hyperbolically() {
        let curve = FlatForward::new(
            date(2014, 1, 13),
            0.04,
            Actual365Fixed,
            Compounding::Simple,
            Frequency::Annual,
        );

        assert_abs_diff_eq!(curve.discount(0.5), 1.0 / 1.02, epsilon = 1e-12);
    }

    #[test]
    fn discount_by_date() {
        let curve = FlatForward::continuous(date(2014, 1, 13), 0.05, Actual365Fixed);
        let d = date(2015, 1, 13);
        let t = curve.time_from_reference(d);
        assert_abs_diff_eq!(curve.discount_date(d), (-0.05 * t).exp(), epsilon = 1e-12);
    }

    #[test]
    fn with_calendar_replaces_the_default() {
        let curve =
            FlatForward::continuous(date(2014, 1, 13), 0.05, Actual365Fixed).with_calendar(WeekendsOnly);
        assert_eq!(curve.calendar().name(), "Weekends only");
    }
}
