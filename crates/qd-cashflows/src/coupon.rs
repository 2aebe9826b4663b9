//! The [`Coupon`] trait for interest-bearing cash flows.

use qd_core::{Real, Time};
use qd_time::{Date, DayCounter};

use crate::cashflow::CashFlow;

/// A cash flow that accrues interest on a notional over a period.
///
/// The accrual period runs from
/// [`accrual_start_date`](Coupon::accrual_start_date) to
/// [`accrual_end_date`](Coupon::accrual_end_date); the payment date of
/// the underlying [`CashFlow`] may fall later when a business-day
/// convention pushes it past the period end. Irregular coupons carry a
/// reference period so that period-relative day counts (Actual/Actual
/// ISMA in particular) accrue against the notional regular period
/// rather than the stub.
pub trait Coupon: CashFlow {
    /// The notional (face) amount.
    fn nominal(&self) -> Real;

    /// Start of the accrual period.
    fn accrual_start_date(&self) -> Date;

    /// End of the accrual period.
    fn accrual_end_date(&self) -> Date;

    /// Start of the reference period the coupon accrues against.
    fn reference_period_start(&self) -> Date {
        self.accrual_start_date()
    }

    /// End of the reference period the coupon accrues against.
    fn reference_period_end(&self) -> Date {
        self.accrual_end_date()
    }

    /// The accrual period as a year fraction.
    fn accrual_period(&self) -> Time;

    /// The day counter used for accrual.
    fn day_counter(&self) -> &dyn DayCounter;

    /// The annualized coupon rate.
    fn rate(&self) -> Real;

    /// Amount accrued from the period start up to `date`.
    ///
    /// Zero outside the window from the accrual start (exclusive) to
    /// the payment date (inclusive); the full amount once the accrual
    /// period has completed but the coupon is still unpaid.
    fn accrued_amount(&self, date: Date) -> Real;

    /// Year fraction accrued from the period start up to `date`.
    fn accrued_period(&self, date: Date) -> Time {
        if date <= self.accrual_start_date() || date > self.date() {
            return 0.0;
        }
        self.day_counter().year_fraction_with_ref(
            self.accrual_start_date(),
            date.min(self.accrual_end_date()),
            Some(self.reference_period_start()),
            Some(self.reference_period_end()),
        )
    }

    /// Number of accrued days from the period start up to `date`.
    fn accrued_days(&self, date: Date) -> i64 {
        if date <= self.accrual_start_date() || date > self.date() {
            return 0;
        }
        self.day_counter()
            .day_count(self.accrual_start_date(), date.min(self.accrual_end_date()))
    }
}
