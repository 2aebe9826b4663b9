//! Rate helpers for yield-curve bootstrapping.
//!
//! A rate helper couples one market quote with the conventions needed to
//! reprice it off a trial curve. The bootstrapper adjusts the zero rate at
//! the helper's pillar date until [`RateHelper::implied_quote`] matches the
//! market quote.

use qd_core::{DiscountFactor, Rate, Time};
use qd_time::{BusinessDayConvention, Calendar, Date, DayCounter, Period};

// ── BootstrapCurve ────────────────────────────────────────────────────────────

/// Read-only view of a partially bootstrapped curve.
///
/// Borrows the pillar times and the zero rates solved so far (plus the trial
/// rate at the current pillar) and interpolates linearly between them, so the
/// solver can probe discount factors without rebuilding an interpolation
/// object on every trial.
#[derive(Debug)]
pub struct BootstrapCurve<'a> {
    /// Reference date of the curve under construction.
    pub reference_date: Date,
    /// Day counter for date to time conversion.
    pub day_counter: &'a dyn DayCounter,
    /// Pillar times, starting at zero.
    pub times: &'a [Time],
    /// Continuously-compounded zero rates at each pillar.
    pub rates: &'a [Rate],
}

impl BootstrapCurve<'_> {
    /// Time from the reference date to `date`.
    pub fn time_from_reference(&self, date: Date) -> Time {
        self.day_counter.year_fraction(self.reference_date, date)
    }

    /// Continuously-compounded zero rate at `t`, linear between pillars
    /// and flat outside them.
    pub fn zero_rate(&self, t: Time) -> Rate {
        let n = self.times.len();
        if n == 0 {
            return 0.0;
        }
        if t <= self.times[0] {
            return self.rates[0];
        }
        if t >= self.times[n - 1] {
            return self.rates[n - 1];
        }
        let hi = self.times.partition_point(|&x| x <= t);
        let lo = hi - 1;
        let w = (t - self.times[lo]) / (self.times[hi] - self.times[lo]);
        self.rates[lo] + w * (self.rates[hi] - self.rates[lo])
    }

    /// Discount factor at `t`.
    pub fn discount(&self, t: Time) -> DiscountFactor {
        if t <= 0.0 {
            return 1.0;
        }
        (-self.zero_rate(t) * t).exp()
    }

    /// Discount factor at `date`.
    pub fn discount_date(&self, date: Date) -> DiscountFactor {
        self.discount(self.time_from_reference(date))
    }
}

// ── RateHelper ────────────────────────────────────────────────────────────────

/// A market quote constraining the curve at one pillar date.
pub trait RateHelper: std::fmt::Debug + Send + Sync {
    /// The date up to which this helper constrains the curve.
    fn pillar_date(&self) -> Date;

    /// The market quote.
    fn quote(&self) -> Rate;

    /// The quote implied by the trial curve.
    fn implied_quote(&self, curve: &BootstrapCurve<'_>) -> Rate;
}

// ── DepositRateHelper ─────────────────────────────────────────────────────────

/// A deposit (money-market) rate helper.
///
/// The implied quote is the simple forward rate over
/// `[settlement, maturity]` under the deposit's own day counter.
#[derive(Debug)]
pub struct DepositRateHelper {
    rate: Rate,
    settlement_date: Date,
    maturity_date: Date,
    day_counter: Box<dyn DayCounter>,
}

impl DepositRateHelper {
    /// Creates a helper from explicit settlement and maturity dates.
    pub fn new(
        rate: Rate,
        settlement_date: Date,
        maturity_date: Date,
        day_counter: impl DayCounter + 'static,
    ) -> Self {
        Self {
            rate,
            settlement_date,
            maturity_date,
            day_counter: Box::new(day_counter),
        }
    }

    /// Creates a helper from a tenor and market conventions.
    ///
    /// Settlement is `fixing_days` business days after `reference_date`;
    /// maturity is the tenor-advanced settlement, either adjusted by
    /// `convention` or rolled to month end when `end_of_month` applies.
    #[allow(clippy::too_many_arguments)]
    pub fn from_tenor(
        rate: Rate,
        tenor: Period,
        fixing_days: u32,
        calendar: &dyn Calendar,
        convention: BusinessDayConvention,
        end_of_month: bool,
        day_counter: impl DayCounter + 'static,
        reference_date: Date,
    ) -> Self {
        let settlement = calendar.advance_business_days(reference_date, fixing_days as i32);
        let raw = settlement.advance(tenor.length(), tenor.units());
        let maturity = if end_of_month && calendar.is_end_of_month(settlement) {
            calendar.end_of_month(raw)
        } else {
            calendar.adjust(raw, convention)
        };
        Self {
            rate,
            settlement_date: settlement,
            maturity_date: maturity,
            day_counter: Box::new(day_counter),
        }
    }

    /// The deposit's settlement date.
    pub fn settlement_date(&self) -> Date {
        self.settlement_date
    }

    /// The deposit's maturity date.
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }
}

impl RateHelper for DepositRateHelper {
    fn pillar_date(&self) -> Date {
        self.maturity_date
    }

    fn quote(&self) -> Rate {
        self.rate
    }

    fn implied_quote(&self, curve: &BootstrapCurve<'_>) -> Rate {
        let tau = self
            .day_counter
            .year_fraction(self.settlement_date, self.maturity_date);
        if tau <= 0.0 {
            return 0.0;
        }
        let df_settle = curve.discount_date(self.settlement_date);
        let df_maturity = curve.discount_date(self.maturity_date);
        if df_maturity <= 0.0 {
            return 0.0;
        }
        (df_settle / df_maturity - 1.0) / tau
    }
}
