//! Bond instrument and the fixed-rate bond constructor.

use crate::instrument::Instrument;
use qd_cashflows::{CashFlow, FixedRateLegBuilder, Leg};
use qd_core::{Compounding, Rate, Real, Result};
use qd_time::{
    BusinessDayConvention, Calendar, Date, DayCounter, Frequency, InterestRate, Schedule,
};
use std::sync::Arc;

/// A generic bond instrument.
///
/// Holds a leg of cash flows (coupons plus redemption) and provides
/// settlement, accrued interest, clean/dirty conversion, and yield
/// queries. Prices and accrued interest are quoted per 100 of face.
#[derive(Debug)]
pub struct Bond {
    /// Settlement days.
    pub settlement_days: u32,
    /// Calendar for settlement.
    pub calendar: Box<dyn Calendar>,
    /// Issue date.
    pub issue_date: Option<Date>,
    /// Maturity date.
    pub maturity_date: Date,
    /// The cashflow leg.
    pub cashflows: Leg,
    /// Face (notional) amount.
    pub face_amount: Real,
}

impl Bond {
    /// Settlement date given a reference (evaluation) date.
    pub fn settlement_date(&self, eval_date: Date) -> Date {
        self.calendar
            .advance_business_days(eval_date, self.settlement_days as i32)
    }

    /// Accrued interest at the given settlement date, per 100 of face.
    pub fn accrued_amount(&self, settlement: Date) -> Real {
        qd_cashflows::accrued_amount(&self.cashflows, settlement) * 100.0 / self.face_amount
    }

    /// Days of accrual consumed at the given settlement date.
    pub fn accrued_days(&self, settlement: Date) -> i64 {
        qd_cashflows::accrued_days(&self.cashflows, settlement)
    }

    /// Notional (face) amount.
    pub fn notional(&self) -> Real {
        self.face_amount
    }

    /// Clean price from a dirty price.
    pub fn clean_price_from_dirty(&self, dirty_price: Real, settlement: Date) -> Real {
        dirty_price - self.accrued_amount(settlement)
    }

    /// Dirty price from a clean price.
    pub fn dirty_price_from_clean(&self, clean_price: Real, settlement: Date) -> Real {
        clean_price + self.accrued_amount(settlement)
    }

    /// Clean price at a flat yield, per 100 of face.
    pub fn clean_price_yield(&self, yield_rate: &InterestRate, settlement: Date) -> Real {
        let dirty = self.dirty_price_yield(yield_rate, settlement);
        self.clean_price_from_dirty(dirty, settlement)
    }

    /// Dirty price at a flat yield, per 100 of face.
    pub fn dirty_price_yield(&self, yield_rate: &InterestRate, settlement: Date) -> Real {
        let npv = qd_cashflows::npv_yield(&self.cashflows, yield_rate, settlement);
        npv / self.face_amount * 100.0
    }

    /// Yield to maturity for a clean price, solved by Brent's method.
    pub fn yield_to_maturity(
        &self,
        clean_price: Real,
        day_counter: Arc<dyn DayCounter>,
        compounding: Compounding,
        frequency: Frequency,
        settlement: Date,
        accuracy: Real,
    ) -> Result<Rate> {
        let dirty_price = self.dirty_price_from_clean(clean_price, settlement);
        let target_npv = dirty_price / 100.0 * self.face_amount;
        qd_cashflows::yield_rate(
            &self.cashflows,
            target_npv,
            day_counter,
            compounding,
            frequency,
            settlement,
            accuracy,
        )
    }
}

impl Instrument for Bond {
    fn is_expired(&self, reference_date: Date) -> bool {
        self.cashflows
            .iter()
            .all(|cf| cf.has_occurred(reference_date))
    }

    fn maturity_date(&self) -> Option<Date> {
        Some(self.maturity_date)
    }
}

/// Build a fixed-rate bond over a coupon schedule.
///
/// Coupons accrue with `day_counter`; payments roll off non-business
/// days of `calendar` under `payment_convention`. The redemption pays
/// the face amount alongside the final coupon.
#[allow(clippy::too_many_arguments)]
pub fn fixed_rate_bond(
    settlement_days: u32,
    face_amount: Real,
    schedule: &Schedule,
    coupon_rates: Vec<Rate>,
    day_counter: impl DayCounter + 'static,
    compounding: Compounding,
    frequency: Frequency,
    payment_convention: BusinessDayConvention,
    calendar: impl Calendar + Clone + 'static,
) -> Bond {
    let dates = schedule.dates();
    let maturity = *dates.last().expect("schedule must have dates");

    let cashflows = FixedRateLegBuilder::new(schedule)
        .with_notionals(vec![face_amount])
        .with_coupon_rates(coupon_rates)
        .with_day_counter(day_counter)
        .with_compounding(compounding)
        .with_frequency(frequency)
        .with_payment_calendar(calendar.clone())
        .with_payment_convention(payment_convention)
        .with_redemption(face_amount)
        .build();

    Bond {
        settlement_days,
        calendar: Box::new(calendar),
        issue_date: Some(dates[0]),
        maturity_date: maturity,
        cashflows,
        face_amount,
    }
}
