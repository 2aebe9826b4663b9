//! Black-volatility term structures.

use std::sync::Arc;

use crate::term_structure::{TermStructure, TermStructureData};
use qd_core::{Real, Time, Volatility};
use qd_time::{Calendar, Date, DayCounter, NullCalendar};

/// A Black-volatility term structure.
///
/// Implementors override **exactly one** of
/// [`black_vol_impl`](BlackVolTermStructure::black_vol_impl) and
/// [`black_variance_impl`](BlackVolTermStructure::black_variance_impl);
/// the other is derived.
pub trait BlackVolTermStructure: TermStructure {
    /// Black volatility for time `t` and strike `strike`.
    fn black_vol_impl(&self, t: Time, strike: Real) -> Volatility {
        if t <= 0.0 {
            return 0.0;
        }
        (self.black_variance_impl(t, strike) / t).sqrt()
    }

    /// Black variance `sigma^2 t` for time `t` and strike `strike`.
    fn black_variance_impl(&self, t: Time, strike: Real) -> Real {
        let vol = self.black_vol_impl(t, strike);
        vol * vol * t
    }

    /// Black volatility for a date and strike.
    fn black_vol(&self, date: Date, strike: Real) -> Volatility {
        self.black_vol_impl(self.time_from_reference(date), strike)
    }

    /// Black variance for a date and strike.
    fn black_variance(&self, date: Date, strike: Real) -> Real {
        self.black_variance_impl(self.time_from_reference(date), strike)
    }

    /// The lowest strike for which the structure is defined.
    fn min_strike(&self) -> Real;

    /// The highest strike for which the structure is defined.
    fn max_strike(&self) -> Real;
}

// ── BlackConstantVol ──────────────────────────────────────────────────────────

/// A flat Black volatility: `sigma(t, K)` is the same for all maturities
/// and strikes.
#[derive(Debug)]
pub struct BlackConstantVol {
    data: TermStructureData,
    volatility: Volatility,
}

impl BlackConstantVol {
    /// Creates a constant Black vol structure.
    pub fn new(
        reference_date: Date,
        volatility: Volatility,
        day_counter: impl DayCounter + 'static,
    ) -> Self {
        Self {
            data: TermStructureData {
                reference_date,
                calendar: Box::new(NullCalendar),
                day_counter: Arc::new(day_counter),
            },
            volatility,
        }
    }

    /// Replaces the default `NullCalendar`.
    pub fn with_calendar(mut self, calendar: impl Calendar + 'static) -> Self {
        self.data.calendar = Box::new(calendar);
        self
    }

    /// The constant volatility.
    pub fn volatility(&self) -> Volatility {
        self.volatility
    }
}

impl TermStructure for BlackConstantVol {
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

impl BlackVolTermStructure for BlackConstantVol {
    fn black_vol_impl(&self, _t: Time, _strike: Real) -> Volatility {
        self.volatility
    }

    fn black_variance_impl(&self, t: Time, _strike: Real) -> Real {
        self.volatility * self.volatility * t
    }

    fn min_strike(&self) -> Real {
        f64::NEG_INFINITY
    }

    fn max_strike(&self) -> Real {
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use qd_time::ActualActualIsda;

    #[test]
    fn vol_is_flat_in_time_and_strike() {
        let reference = Date::from_ymd(2014, 1, 13).unwrap();
        let vol = BlackConstantVol::new(reference, 0.03, ActualActualIsda);

        assert_abs_diff_eq!(vol.black_vol_impl(1.0, 123.0), 0.03, epsilon = 1e-15);
        assert_abs_diff_eq!(vol.black_vol_impl(5.0, 50.0), 0.03, epsilon = 1e-15);
    }

    #[test]
    fn variance_grows_linearly_with_time() {
        let reference = Date::from_ymd(2014, 1, 13).unwrap();
        let vol = BlackConstantVol::new(reference, 0.20, ActualActualIsda);

        assert_abs_diff_eq!(vol.black_variance_impl(2.0, 100.0), 0.08, epsilon = 1e-15);
    }

    #[test]
    fn date_lookup_uses_the_day_counter() {
        let reference = Date::from_ymd(2014, 1, 13).unwrap();
        let expiry = Date::from_ymd(2015, 1, 13).unwrap();
        let vol = BlackConstantVol::new(reference, 0.25, ActualActualIsda);

        let t = vol.time_from_reference(expiry);
        assert_abs_diff_eq!(vol.black_variance(expiry, 123.0), 0.0625 * t, epsilon = 1e-14);
        assert_abs_diff_eq!(vol.black_vol(expiry, 123.0), 0.25, epsilon = 1e-15);
    }

    #[test]
    fn accepts_any_strike() {
        let reference = Date::from_ymd(2014, 1, 13).unwrap();
        let vol = BlackConstantVol::new(reference, 0.20, ActualActualIsda);
        assert!(vol.min_strike().is_infinite() && vol.min_strike() < 0.0);
        assert!(vol.max_strike().is_infinite() && vol.max_strike() > 0.0);
    }
}
