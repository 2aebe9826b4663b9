//! Parallel zero-rate shift over a base curve.

use std::sync::Arc;

use crate::term_structure::TermStructure;
use crate::yield_term_structure::YieldTermStructure;
use qd_core::{DiscountFactor, Rate, Result, Spread, Time};
use qd_quotes::Quote;
use qd_time::{Calendar, Date, DayCounter};

/// A yield curve shifted by a constant zero spread.
///
/// Zero rates are the base curve's rates plus the spread; with the spread
/// compounded continuously, discount factors factor as
/// `df(t) = base_df(t) * exp(-s t)`. This is the curve a z-spread quote
/// defines over a bootstrapped benchmark.
#[derive(Debug)]
pub struct ZeroSpreadedTermStructure {
    base: Arc<dyn YieldTermStructure>,
    spread: Arc<dyn Quote>,
}

impl ZeroSpreadedTermStructure {
    /// Wraps `base` with the given spread quote.
    ///
    /// # Errors
    /// Fails with [`qd_core::Error::NullValue`] if the quote is empty.
    pub fn new(base: Arc<dyn YieldTermStructure>, spread: Arc<dyn Quote>) -> Result<Self> {
        spread.valid_value()?;
        Ok(Self { base, spread })
    }

    /// The current spread; an emptied quote contributes no spread.
    pub fn spread(&self) -> Spread {
        self.spread.value().unwrap_or(0.0)
    }
}

impl TermStructure for ZeroSpreadedTermStructure {
    fn reference_date(&self) -> Date {
        self.base.reference_date()
    }

    fn day_counter(&self) -> Arc<dyn DayCounter> {
        self.base.day_counter()
    }

    fn calendar(&self) -> &dyn Calendar {
        self.base.calendar()
    }

    fn max_date(&self) -> Date {
        self.base.max_date()
    }
}

impl YieldTermStructure for ZeroSpreadedTermStructure {
    fn zero_rate_impl(&self, t: Time) -> Rate {
        self.base.zero_rate_impl(t) + self.spread()
    }

    fn discount_impl(&self, t: Time) -> DiscountFactor {
        if t <= 0.0 {
            return 1.0;
        }
        self.base.discount_impl(t) * (-self.spread() * t).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flat_forward::FlatForward;
    use approx::assert_abs_diff_eq;
    use qd_quotes::SimpleQuote;
    use qd_time::Actual365Fixed;

    fn base_curve() -> Arc<dyn YieldTermStructure> {
        let reference = Date::from_ymd(2014, 4, 14).unwrap();
        Arc::new(FlatForward::continuous(reference, 0.02, Actual365Fixed))
    }

    #[test]
    fn shifts_zero_rates_by_the_spread() {
        let spreaded =
            ZeroSpreadedTermStructure::new(base_curve(), Arc::new(SimpleQuote::new(0.005)))
                .unwrap();
        assert_abs_diff_eq!(spreaded.zero_rate_impl(2.0), 0.025, epsilon = 1e-15);
    }

    #[test]
    fn discount_factors_compose_multiplicatively() {
        let base = base_curve();
        let spreaded =
            ZeroSpreadedTermStructure::new(base.clone(), Arc::new(SimpleQuote::new(0.005)))
                .unwrap();

        for t in [0.5, 1.0, 5.0, 20.0] {
            let expected = base.discount(t) * (-0.005 * t).exp();
            assert_abs_diff_eq!(spreaded.discount(t), expected, epsilon = 1e-14);
        }
    }

    #[test]
    fn zero_spread_leaves_the_curve_unchanged() {
        let base = base_curve();
        let spreaded =
            ZeroSpreadedTermStructure::new(base.clone(), Arc::new(SimpleQuote::new(0.0))).unwrap();
        assert_abs_diff_eq!(spreaded.discount(3.0), base.discount(3.0), epsilon = 1e-15);
    }

    #[test]
    fn rejects_an_empty_spread_quote() {
        let result = ZeroSpreadedTermStructure::new(base_curve(), Arc::new(SimpleQuote::empty()));
        assert!(result.is_err());
    }

    #[test]
    fn delegates_dates_to_the_base_curve() {
        let base = base_curve();
        let spreaded =
            ZeroSpreadedTermStructure::new(base.clone(), Arc::new(SimpleQuote::new(0.01))).unwrap();
        assert_eq!(spreaded.reference_date(), base.reference_date());
        assert_eq!(spreaded.max_date(), base.max_date());
        assert_eq!(spreaded.calendar().name(), base.calendar().name());
    }
}
