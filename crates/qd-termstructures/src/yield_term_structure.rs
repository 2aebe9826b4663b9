//! Yield (interest-rate) term structures.
//!
//! The two fundamental quantities a yield curve provides:
//!
//! * **discount factor** — `P(0, t)`
//! * **zero rate** — the rate for maturity `t` under a chosen compounding
//!   convention

use std::sync::Arc;

use crate::term_structure::TermStructure;
use qd_core::{Compounding, DiscountFactor, Rate, Result, Time};
use qd_time::{Date, DayCounter, Frequency, InterestRate};

/// Small time step used to take the zero-maturity limit.
const DT: Time = 1.0e-4;

/// A yield (interest-rate) term structure.
///
/// Implementors must override **exactly one** of the two low-level hooks,
/// [`discount_impl`](YieldTermStructure::discount_impl) or
/// [`zero_rate_impl`](YieldTermStructure::zero_rate_impl); the default
/// implementations derive each from the other.
pub trait YieldTermStructure: TermStructure {
    // ── Low-level hooks (override exactly one) ───────────────────────────

    /// Discount factor for time `t`.
    ///
    /// Default: `exp(-z(t) * t)` from [`zero_rate_impl`](Self::zero_rate_impl).
    fn discount_impl(&self, t: Time) -> DiscountFactor {
        if t <= 0.0 {
            return 1.0;
        }
        (-self.zero_rate_impl(t) * t).exp()
    }

    /// Continuously-compounded zero rate for time `t`.
    ///
    /// Default: `-ln P(t) / t` from [`discount_impl`](Self::discount_impl);
    /// the `t = 0` limit is taken over a short step.
    fn zero_rate_impl(&self, t: Time) -> Rate {
        if t <= 0.0 {
            return -self.discount_impl(DT).ln() / DT;
        }
        -self.discount_impl(t).ln() / t
    }

    // ── Public interface ─────────────────────────────────────────────────

    /// Discount factor for a time.
    fn discount(&self, t: Time) -> DiscountFactor {
        self.discount_impl(t)
    }

    /// Discount factor for a date.
    fn discount_date(&self, date: Date) -> DiscountFactor {
        self.discount_impl(self.time_from_reference(date))
    }

    /// Zero rate between the reference date and `date`, expressed with the
    /// given day counter, compounding, and frequency.
    fn zero_rate(
        &self,
        date: Date,
        day_counter: Arc<dyn DayCounter>,
        comp: Compounding,
        freq: Frequency,
    ) -> Result<InterestRate> {
        if date == self.reference_date() {
            let compound = 1.0 / self.discount_impl(DT);
            return InterestRate::implied_rate_time(compound, day_counter, comp, freq, DT);
        }
        let compound = 1.0 / self.discount_date(date);
        let t = day_counter.year_fraction(self.reference_date(), date);
        InterestRate::implied_rate_time(compound, day_counter, comp, freq, t)
    }

    /// Zero rate for time `t`, expressed with the curve's own day counter.
    fn zero_rate_time(&self, t: Time, comp: Compounding, freq: Frequency) -> Result<InterestRate> {
        let t = if t == 0.0 { DT } else { t };
        let compound = 1.0 / self.discount_impl(t);
        InterestRate::implied_rate_time(compound, self.day_counter(), comp, freq, t)
    }
}
