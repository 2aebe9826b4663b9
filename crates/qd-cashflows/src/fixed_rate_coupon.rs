//! Fixed-rate coupons and the fixed-rate leg builder.

use std::sync::Arc;

use qd_core::{Compounding, Rate, Real, Time};
use qd_time::{
    Actual365Fixed, BusinessDayConvention, Calendar, Date, DayCounter, Frequency, InterestRate,
    NullCalendar, Schedule,
};

use crate::cashflow::{CashFlow, Leg, Redemption};
use crate::coupon::Coupon;

/// A coupon accruing a fixed interest rate over its period.
#[derive(Debug)]
pub struct FixedRateCoupon {
    nominal: Real,
    payment_date: Date,
    rate: InterestRate,
    accrual_start: Date,
    accrual_end: Date,
    ref_start: Date,
    ref_end: Date,
    accrual_period: Time,
}

impl FixedRateCoupon {
    /// Creates a coupon paying `rate` on `nominal` over the accrual
    /// period. The reference period defaults to the accrual period.
    pub fn new(
        payment_date: Date,
        nominal: Real,
        rate: InterestRate,
        accrual_start: Date,
        accrual_end: Date,
    ) -> Self {
        let accrual_period = rate.day_counter().year_fraction_with_ref(
            accrual_start,
            accrual_end,
            Some(accrual_start),
            Some(accrual_end),
        );
        Self {
            nominal,
            payment_date,
            rate,
            accrual_start,
            accrual_end,
            ref_start: accrual_start,
            ref_end: accrual_end,
            accrual_period,
        }
    }

    /// Sets the reference period an irregular coupon accrues against.
    pub fn with_reference_period(mut self, ref_start: Date, ref_end: Date) -> Self {
        self.ref_start = ref_start;
        self.ref_end = ref_end;
        self.accrual_period = self.rate.day_counter().year_fraction_with_ref(
            self.accrual_start,
            self.accrual_end,
            Some(ref_start),
            Some(ref_end),
        );
        self
    }

    /// The coupon rate with its quoting conventions.
    pub fn interest_rate(&self) -> &InterestRate {
        &self.rate
    }
}

impl CashFlow for FixedRateCoupon {
    fn date(&self) -> Date {
        self.payment_date
    }

    fn amount(&self) -> Real {
        self.nominal
            * (self.rate.compound_factor(
                self.accrual_start,
                self.accrual_end,
                Some(self.ref_start),
                Some(self.ref_end),
            ) - 1.0)
    }

    fn as_coupon(&self) -> Option<&dyn Coupon> {
        Some(self)
    }
}

impl Coupon for FixedRateCoupon {
    fn nominal(&self) -> Real {
        self.nominal
    }

    fn accrual_start_date(&self) -> Date {
        self.accrual_start
    }

    fn accrual_end_date(&self) -> Date {
        self.accrual_end
    }

    fn reference_period_start(&self) -> Date {
        self.ref_start
    }

    fn reference_period_end(&self) -> Date {
        self.ref_end
    }

    fn accrual_period(&self) -> Time {
        self.accrual_period
    }

    fn day_counter(&self) -> &dyn DayCounter {
        self.rate.day_counter().as_ref()
    }

    fn rate(&self) -> Rate {
        self.rate.rate()
    }

    fn accrued_amount(&self, date: Date) -> Real {
        if date <= self.accrual_start || date > self.payment_date {
            return 0.0;
        }
        self.nominal
            * (self.rate.compound_factor(
                self.accrual_start,
                date.min(self.accrual_end),
                Some(self.ref_start),
                Some(self.ref_end),
            ) - 1.0)
    }
}

/// Builds a leg of [`FixedRateCoupon`]s from a schedule.
///
/// Coupons accrue over unadjusted schedule periods and pay on the
/// period end adjusted by the payment calendar and convention.
/// Irregular periods get a reference period derived from the schedule
/// tenor, so period-relative day counters treat stubs correctly.
pub struct FixedRateLegBuilder<'a> {
    schedule: &'a Schedule,
    notionals: Vec<Real>,
    coupon_rates: Vec<Rate>,
    compounding: Compounding,
    frequency: Frequency,
    day_counter: Arc<dyn DayCounter>,
    payment_calendar: Box<dyn Calendar>,
    payment_convention: BusinessDayConvention,
    redemption: Option<Real>,
}

impl<'a> FixedRateLegBuilder<'a> {
    /// Starts a builder over `schedule` with Actual/365 (Fixed)
    /// accrual, simple annual compounding, and unadjusted payments.
    pub fn new(schedule: &'a Schedule) -> Self {
        Self {
            schedule,
            notionals: vec![1.0],
            coupon_rates: vec![0.0],
            compounding: Compounding::Simple,
            frequency: Frequency::Annual,
            day_counter: Arc::new(Actual365Fixed),
            payment_calendar: Box::new(NullCalendar),
            payment_convention: BusinessDayConvention::Following,
            redemption: None,
        }
    }

    /// Sets the notionals; the last one is reused for any remaining
    /// periods.
    pub fn with_notionals(mut self, notionals: Vec<Real>) -> Self {
        self.notionals = notionals;
        self
    }

    /// Sets a single coupon rate for all periods.
    pub fn with_coupon_rate(mut self, rate: Rate) -> Self {
        self.coupon_rates = vec![rate];
        self
    }

    /// Sets per-period coupon rates; the last one is reused for any
    /// remaining periods.
    pub fn with_coupon_rates(mut self, rates: Vec<Rate>) -> Self {
        self.coupon_rates = rates;
        self
    }

    /// Sets the compounding convention of the coupon rates.
    pub fn with_compounding(mut self, compounding: Compounding) -> Self {
        self.compounding = compounding;
        self
    }

    /// Sets the compounding frequency of the coupon rates.
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the accrual day counter.
    pub fn with_day_counter(mut self, day_counter: impl DayCounter + 'static) -> Self {
        self.day_counter = Arc::new(day_counter);
        self
    }

    /// Sets the calendar payment dates are adjusted against.
    pub fn with_payment_calendar(mut self, calendar: impl Calendar + 'static) -> Self {
        self.payment_calendar = Box::new(calendar);
        self
    }

    /// Sets the payment business-day convention.
    pub fn with_payment_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.payment_convention = convention;
        self
    }

    /// Appends a redemption of `amount` on the final payment date.
    pub fn with_redemption(mut self, amount: Real) -> Self {
        self.redemption = Some(amount);
        self
    }

    /// Builds the leg.
    pub fn build(self) -> Leg {
        let dates = self.schedule.dates();
        let periods = dates.len().saturating_sub(1);
        let mut leg: Leg = Vec::with_capacity(periods + usize::from(self.redemption.is_some()));

        for i in 0..periods {
            let start = dates[i];
            let end = dates[i + 1];
            let payment = self.payment_calendar.adjust(end, self.payment_convention);
            let nominal = self.notionals[i.min(self.notionals.len() - 1)];
            let rate = InterestRate::new(
                self.coupon_rates[i.min(self.coupon_rates.len() - 1)],
                self.day_counter.clone(),
                self.compounding,
                self.frequency,
            );

            let mut coupon = FixedRateCoupon::new(payment, nominal, rate, start, end);
            if !self.schedule.is_regular(i) {
                if let Some(tenor) = self.schedule.tenor() {
                    // a stub accrues against the regular period it sits in
                    let (ref_start, ref_end) = if i == 0 {
                        (end.advance(-tenor.length(), tenor.units()), end)
                    } else {
                        (start, start.advance(tenor.length(), tenor.units()))
                    };
                    coupon = coupon.with_reference_period(ref_start, ref_end);
                }
            }
            leg.push(Box::new(coupon));
        }

        if let Some(amount) = self.redemption {
            if periods > 0 {
                let maturity = self
                    .payment_calendar
                    .adjust(dates[periods], self.payment_convention);
                leg.push(Box::new(Redemption::new(amount, maturity)));
            }
        }

        leg
    }
}
