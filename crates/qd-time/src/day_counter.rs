//! Day-count conventions.

use std::fmt::Debug;

use qd_core::Time;

use crate::date::{is_leap_year, Date};
use crate::time_unit::TimeUnit;

/// A day-count convention.
///
/// Converts a pair of dates into a count of interest-bearing days and a
/// fraction of a year. Conventions that depend on the coupon period
/// override [`year_fraction_with_ref`](DayCounter::year_fraction_with_ref).
pub trait DayCounter: Debug + Send + Sync {
    /// Name of the convention.
    fn name(&self) -> String;

    /// Number of days between two dates under this convention.
    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        (d2 - d1) as i64
    }

    /// Fraction of a year between two dates.
    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.year_fraction_with_ref(d1, d2, None, None)
    }

    /// Fraction of a year between two dates, given the reference period
    /// the dates accrue against.
    ///
    /// Most conventions ignore the reference period.
    fn year_fraction_with_ref(
        &self,
        d1: Date,
        d2: Date,
        ref_start: Option<Date>,
        ref_end: Option<Date>,
    ) -> Time;
}

// ── Actual/360 ───────────────────────────────────────────────────────────

/// Actual/360 convention, used for money-market instruments.
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual360;

impl DayCounter for Actual360 {
    fn name(&self) -> String {
        "Actual/360".into()
    }

    fn year_fraction_with_ref(
        &self,
        d1: Date,
        d2: Date,
        _ref_start: Option<Date>,
        _ref_end: Option<Date>,
    ) -> Time {
        self.day_count(d1, d2) as Time / 360.0
    }
}

// ── Actual/365 (Fixed) ───────────────────────────────────────────────────

/// Actual/365 (Fixed) convention.
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual365Fixed;

impl DayCounter for Actual365Fixed {
    fn name(&self) -> String {
        "Actual/365 (Fixed)".into()
    }

    fn year_fraction_with_ref(
        &self,
        d1: Date,
        d2: Date,
        _ref_start: Option<Date>,
        _ref_end: Option<Date>,
    ) -> Time {
        self.day_count(d1, d2) as Time / 365.0
    }
}

// ── Actual/Actual (ISDA) ─────────────────────────────────────────────────

/// Actual/Actual (ISDA) convention.
///
/// Splits the interval at calendar year boundaries and divides the days
/// in each year by that year's actual length.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActualActualIsda;

impl DayCounter for ActualActualIsda {
    fn name(&self) -> String {
        "Actual/Actual (ISDA)".into()
    }

    fn year_fraction_with_ref(
        &self,
        d1: Date,
        d2: Date,
        _ref_start: Option<Date>,
        _ref_end: Option<Date>,
    ) -> Time {
        if d1 == d2 {
            return 0.0;
        }
        if d1 > d2 {
            return -self.year_fraction(d2, d1);
        }
        let (y1, y2) = (d1.year(), d2.year());
        let basis = |y: i32| if is_leap_year(y) { 366.0 } else { 365.0 };
        if y1 == y2 {
            return (d2 - d1) as Time / basis(y1);
        }
        let mut sum = (y2 - y1 - 1) as Time;
        sum += (Date::from_ymd_unchecked(y1 + 1, 1, 1) - d1) as Time / basis(y1);
        sum += (d2 - Date::from_ymd_unchecked(y2, 1, 1)) as Time / basis(y2);
        sum
    }
}

// ── Actual/Actual (ISMA) ─────────────────────────────────────────────────

/// Actual/Actual (ISMA) convention, also known as the bond basis.
///
/// Measures time as whole coupon periods plus fractions of the actual
/// reference period. When no reference period is supplied, one is
/// estimated from the dates themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActualActualIsma;

impl DayCounter for ActualActualIsma {
    fn name(&self) -> String {
        "Actual/Actual (ISMA)".into()
    }

    fn year_fraction_with_ref(
        &self,
        d1: Date,
        d2: Date,
        ref_start: Option<Date>,
        ref_end: Option<Date>,
    ) -> Time {
        if d1 == d2 {
            return 0.0;
        }
        if d1 > d2 {
            return -self.year_fraction_with_ref(d2, d1, ref_start, ref_end);
        }

        let mut ref_start = ref_start.unwrap_or(d1);
        let mut ref_end = ref_end.unwrap_or(d2);
        debug_assert!(ref_end > ref_start);

        // Estimated length of the reference period in whole months; a
        // period shorter than half a month gets a notional one-year one.
        let mut months = (12.0 * (ref_end - ref_start) as f64 / 365.0).round() as i32;
        if months == 0 {
            ref_start = d1;
            ref_end = d1.advance(1, TimeUnit::Years);
            months = 12;
        }
        let period = months as Time / 12.0;

        if d2 <= ref_end {
            if d1 >= ref_start {
                // Both dates inside the reference period.
                period * (d2 - d1) as Time / (ref_end - ref_start) as Time
            } else {
                // Accrual starts inside the notional period preceding
                // the reference period.
                let previous_ref = ref_start.advance(-months, TimeUnit::Months);
                if d2 > ref_start {
                    self.year_fraction_with_ref(d1, ref_start, Some(previous_ref), Some(ref_start))
                        + self.year_fraction_with_ref(ref_start, d2, Some(ref_start), Some(ref_end))
                } else {
                    self.year_fraction_with_ref(d1, d2, Some(previous_ref), Some(ref_start))
                }
            }
        } else {
            // Accrual extends past the reference period; count whole
            // notional periods until the one containing the end date.
            let mut sum =
                self.year_fraction_with_ref(d1, ref_end, Some(ref_start), Some(ref_end));
            let mut i = 0;
            loop {
                let new_start = ref_end.advance(months * i, TimeUnit::Months);
                let new_end = ref_end.advance(months * (i + 1), TimeUnit::Months);
                if d2 < new_end {
                    sum += self.year_fraction_with_ref(
                        new_start,
                        d2,
                        Some(new_start),
                        Some(new_end),
                    );
                    break;
                }
                sum += period;
                i += 1;
            }
            sum
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn simple_fractions() {
        let d1 = date(2014, 4, 14);
        let d2 = date(2014, 10, 14);
        assert_relative_eq!(Actual360.year_fraction(d1, d2), 183.0 / 360.0);
        assert_relative_eq!(Actual365Fixed.year_fraction(d1, d2), 183.0 / 365.0);
    }

    #[test]
    fn reversed_dates_negate() {
        let d1 = date(2014, 1, 13);
        let d2 = date(2015, 1, 13);
        for dc in [&ActualActualIsda as &dyn DayCounter, &ActualActualIsma] {
            assert_relative_eq!(
                dc.year_fraction(d2, d1),
                -dc.year_fraction(d1, d2),
                epsilon = 1e-15
            );
            assert_eq!(dc.year_fraction(d1, d1), 0.0);
        }
    }

    #[test]
    fn isda_splits_at_year_boundaries() {
        // 61 days in 2003 and 121 days in leap 2004.
        let t = ActualActualIsda.year_fraction(date(2003, 11, 1), date(2004, 5, 1));
        assert_relative_eq!(t, 61.0 / 365.0 + 121.0 / 366.0, epsilon = 1e-12);
    }

    #[test]
    fn isma_uses_reference_period() {
        // Semiannual coupon accruing from 1 February to 1 July 1999
        // against the 1 January - 1 July period.
        let t = ActualActualIsma.year_fraction_with_ref(
            date(1999, 2, 1),
            date(1999, 7, 1),
            Some(date(1999, 1, 1)),
            Some(date(1999, 7, 1)),
        );
        assert_relative_eq!(t, 0.5 * 150.0 / 181.0, epsilon = 1e-12);
    }

    #[test]
    fn isma_rolls_past_the_reference_period() {
        // 1 July 1999 to 1 July 2000 against the second half of 1999.
        let t = ActualActualIsma.year_fraction_with_ref(
            date(1999, 7, 1),
            date(2000, 7, 1),
            Some(date(1999, 7, 1)),
            Some(date(2000, 1, 1)),
        );
        assert_relative_eq!(t, 1.0, epsilon = 1e-12);
    }
}
