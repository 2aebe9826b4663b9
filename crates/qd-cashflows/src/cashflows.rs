//! Analysis functions over a [`Leg`].
//!
//! Present values come in three flavours:
//! - [`npv_curve`] — discounting each flow on a yield curve
//! - [`npv_yield`] — discounting at a flat [`InterestRate`], accruing
//!   period by period so that a semiannually quoted yield reproduces
//!   the street convention on a semiannual bond
//! - [`npv_z_spread`] — curve discounting with a continuously
//!   compounded parallel spread on top
//!
//! On top of those sit the rate solvers ([`yield_rate`], [`z_spread`])
//! and the risk numbers: [`duration`], [`convexity`], [`bps_yield`],
//! [`basis_point_value`], and [`yield_value_basis_point`].

use std::sync::Arc;

use qd_core::{ensure, Compounding, Rate, Real, Result, Spread, Time};
use qd_math::solvers1d::brent;
use qd_math::{CalibrationError, CalibrationResult, Calibrator};
use qd_termstructures::YieldTermStructure;
use qd_time::{Date, DayCounter, Frequency, InterestRate, TimeUnit};

use crate::cashflow::{CashFlow, Leg};

const BASIS_POINT: Real = 1.0e-4;

/// Duration flavour computed by [`duration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Duration {
    /// Discounted-time average of the cash flows.
    Simple,
    /// Modified duration scaled back by one compounding period.
    Macaulay,
    /// Relative price sensitivity `-dP/dy / P`.
    Modified,
}

// ── Leg queries ──────────────────────────────────────────────────────────

/// The last payment date of a leg.
pub fn maturity_date(leg: &Leg) -> Option<Date> {
    leg.iter().map(|cf| cf.date()).max()
}

/// The date of the last cash flow on or before `settlement_date`.
pub fn previous_cashflow_date(leg: &Leg, settlement_date: Date) -> Option<Date> {
    leg.iter()
        .filter(|cf| cf.date() <= settlement_date)
        .map(|cf| cf.date())
        .max()
}

/// The date of the next cash flow strictly after `settlement_date`.
pub fn next_cashflow_date(leg: &Leg, settlement_date: Date) -> Option<Date> {
    leg.iter()
        .filter(|cf| cf.date() > settlement_date)
        .map(|cf| cf.date())
        .min()
}

/// Interest accrued by the coupons paying on the next payment date.
pub fn accrued_amount(leg: &Leg, settlement_date: Date) -> Real {
    let Some(next) = next_cashflow_date(leg, settlement_date) else {
        return 0.0;
    };
    leg.iter()
        .filter(|cf| cf.date() == next)
        .filter_map(|cf| cf.as_coupon())
        .map(|coupon| coupon.accrued_amount(settlement_date))
        .sum()
}

/// Days accrued by the coupons paying on the next payment date.
pub fn accrued_days(leg: &Leg, settlement_date: Date) -> i64 {
    let Some(next) = next_cashflow_date(leg, settlement_date) else {
        return 0;
    };
    leg.iter()
        .filter(|cf| cf.date() == next)
        .filter_map(|cf| cf.as_coupon())
        .map(|coupon| coupon.accrued_days(settlement_date))
        .sum()
}

// ── NPV against a curve ──────────────────────────────────────────────────

/// Present value of the flows after `settlement_date`, discounted on
/// `yield_curve` and expressed in settlement-date money.
pub fn npv_curve(leg: &Leg, yield_curve: &dyn YieldTermStructure, settlement_date: Date) -> Real {
    let mut npv = 0.0;
    for cf in leg {
        if cf.date() <= settlement_date {
            continue;
        }
        npv += cf.amount() * yield_curve.discount_date(cf.date());
    }
    npv / yield_curve.discount_date(settlement_date)
}

/// Change of the curve-discounted value for a one-basis-point rise of
/// every coupon rate: the discounted sum of `nominal * accrual_period`
/// over the unpaid coupons, times one basis point.
pub fn bps_curve(leg: &Leg, yield_curve: &dyn YieldTermStructure, settlement_date: Date) -> Real {
    let mut bps = 0.0;
    for cf in leg {
        if cf.date() <= settlement_date {
            continue;
        }
        if let Some(coupon) = cf.as_coupon() {
            bps += coupon.nominal()
                * coupon.accrual_period()
                * yield_curve.discount_date(coupon.date());
        }
    }
    bps * BASIS_POINT / yield_curve.discount_date(settlement_date)
}

// ── NPV against a flat yield ─────────────────────────────────────────────

/// Discounting time from `last_date` to the next flow.
///
/// Coupons contribute the unaccrued remainder of their period, measured
/// against their reference period so that irregular coupons discount
/// like the regular ones around them. Flows without accrual information
/// fall back to the plain year fraction, with a one-year reference
/// faked for the first step.
fn stepwise_discount_time(
    cf: &dyn CashFlow,
    day_counter: &dyn DayCounter,
    npv_date: Date,
    last_date: Date,
) -> Time {
    let payment = cf.date();
    if let Some(coupon) = cf.as_coupon() {
        let ref_start = coupon.reference_period_start();
        let ref_end = coupon.reference_period_end();
        if last_date != coupon.accrual_start_date() {
            let full = day_counter.year_fraction_with_ref(
                coupon.accrual_start_date(),
                payment,
                Some(ref_start),
                Some(ref_end),
            );
            let accrued = day_counter.year_fraction_with_ref(
                coupon.accrual_start_date(),
                last_date,
                Some(ref_start),
                Some(ref_end),
            );
            full - accrued
        } else {
            day_counter.year_fraction_with_ref(last_date, payment, Some(ref_start), Some(ref_end))
        }
    } else {
        let ref_start = if last_date == npv_date {
            payment.advance(-1, TimeUnit::Years)
        } else {
            last_date
        };
        day_counter.year_fraction_with_ref(last_date, payment, Some(ref_start), Some(payment))
    }
}

/// Present value of the flows after `settlement_date` at a flat yield.
///
/// The discount factor is accumulated flow by flow, so each coupon
/// period compounds on its own: with a semiannually quoted yield on a
/// semiannual bond this reproduces the conventional
/// `(1 + y/2)` discounting per period.
pub fn npv_yield(leg: &Leg, yield_rate: &InterestRate, settlement_date: Date) -> Real {
    let day_counter = yield_rate.day_counter().as_ref();
    let mut npv = 0.0;
    let mut discount = 1.0;
    let mut last_date = settlement_date;
    for cf in leg {
        if cf.date() <= settlement_date {
            continue;
        }
        let step = stepwise_discount_time(cf.as_ref(), day_counter, settlement_date, last_date);
        discount *= yield_rate.discount_factor_time(step);
        last_date = cf.date();
        npv += cf.amount() * discount;
    }
    npv
}

/// Change of the flat-yield value for a one-basis-point rise of every
/// coupon rate.
pub fn bps_yield(leg: &Leg, yield_rate: &InterestRate, settlement_date: Date) -> Real {
    let day_counter = yield_rate.day_counter().as_ref();
    let mut bps = 0.0;
    for cf in leg {
        if cf.date() <= settlement_date {
            continue;
        }
        if let Some(coupon) = cf.as_coupon() {
            let t = day_counter.year_fraction(settlement_date, coupon.date());
            bps += coupon.nominal()
                * coupon.accrual_period()
                * yield_rate.discount_factor_time(t);
        }
    }
    bps * BASIS_POINT
}

// ── Duration and convexity ───────────────────────────────────────────────

fn periods_per_year(frequency: Frequency) -> Real {
    match frequency.periods_per_year() {
        Some(n) => n as Real,
        None => 1.0,
    }
}

fn simple_duration(leg: &Leg, yield_rate: &InterestRate, settlement_date: Date) -> Real {
    let day_counter = yield_rate.day_counter().as_ref();
    let mut p = 0.0;
    let mut t_p = 0.0;
    let mut t = 0.0;
    let mut last_date = settlement_date;
    for cf in leg {
        if cf.date() <= settlement_date {
            continue;
        }
        t += stepwise_discount_time(cf.as_ref(), day_counter, settlement_date, last_date);
        let b = yield_rate.discount_factor_time(t);
        p += cf.amount() * b;
        t_p += t * cf.amount() * b;
        last_date = cf.date();
    }
    if p == 0.0 {
        return 0.0;
    }
    t_p / p
}

fn modified_duration(leg: &Leg, yield_rate: &InterestRate, settlement_date: Date) -> Real {
    let day_counter = yield_rate.day_counter().as_ref();
    let r = yield_rate.rate();
    let n = periods_per_year(yield_rate.frequency());
    let mut p = 0.0;
    let mut dp_dy = 0.0;
    let mut t = 0.0;
    let mut last_date = settlement_date;
    for cf in leg {
        if cf.date() <= settlement_date {
            continue;
        }
        let c = cf.amount();
        t += stepwise_discount_time(cf.as_ref(), day_counter, settlement_date, last_date);
        let b = yield_rate.discount_factor_time(t);
        p += c * b;
        match yield_rate.compounding() {
            Compounding::Simple => dp_dy -= c * b * b * t,
            Compounding::Compounded => dp_dy -= c * t * b / (1.0 + r / n),
            Compounding::Continuous => dp_dy -= c * b * t,
            Compounding::SimpleThenCompounded => {
                if t <= 1.0 / n {
                    dp_dy -= c * b * b * t;
                } else {
                    dp_dy -= c * t * b / (1.0 + r / n);
                }
            }
        }
        last_date = cf.date();
    }
    if p == 0.0 {
        return 0.0;
    }
    -dp_dy / p
}

/// Duration of a leg at a flat yield.
///
/// # Errors
///
/// Macaulay duration is only defined against a periodically compounded
/// yield; asking for it with any other compounding fails.
pub fn duration(
    leg: &Leg,
    yield_rate: &InterestRate,
    duration_type: Duration,
    settlement_date: Date,
) -> Result<Real> {
    match duration_type {
        Duration::Simple => Ok(simple_duration(leg, yield_rate, settlement_date)),
        Duration::Modified => Ok(modified_duration(leg, yield_rate, settlement_date)),
        Duration::Macaulay => {
            ensure!(
                yield_rate.compounding() == Compounding::Compounded,
                "Macaulay duration needs a periodically compounded yield, got {:?}",
                yield_rate.compounding()
            );
            let n = periods_per_year(yield_rate.frequency());
            Ok((1.0 + yield_rate.rate() / n)
                * modified_duration(leg, yield_rate, settlement_date))
        }
    }
}

/// Convexity of a leg at a flat yield, `d2P/dy2 / P`.
pub fn convexity(leg: &Leg, yield_rate: &InterestRate, settlement_date: Date) -> Real {
    let day_counter = yield_rate.day_counter().as_ref();
    let r = yield_rate.rate();
    let n = periods_per_year(yield_rate.frequency());
    let mut p = 0.0;
    let mut d2p_dy2 = 0.0;
    let mut t = 0.0;
    let mut last_date = settlement_date;
    for cf in leg {
        if cf.date() <= settlement_date {
            continue;
        }
        let c = cf.amount();
        t += stepwise_discount_time(cf.as_ref(), day_counter, settlement_date, last_date);
        let b = yield_rate.discount_factor_time(t);
        p += c * b;
        match yield_rate.compounding() {
            Compounding::Simple => d2p_dy2 += c * 2.0 * b * b * b * t * t,
            Compounding::Compounded => {
                d2p_dy2 += c * b * t * (n * t + 1.0) / (n * (1.0 + r / n) * (1.0 + r / n));
            }
            Compounding::Continuous => d2p_dy2 += c * b * t * t,
            Compounding::SimpleThenCompounded => {
                if t <= 1.0 / n {
                    d2p_dy2 += c * 2.0 * b * b * b * t * t;
                } else {
                    d2p_dy2 += c * b * t * (n * t + 1.0) / (n * (1.0 + r / n) * (1.0 + r / n));
                }
            }
        }
        last_date = cf.date();
    }
    if p == 0.0 {
        return 0.0;
    }
    d2p_dy2 / p
}

/// Price change for a one-basis-point drop of the yield, taking the
/// duration and convexity terms together.
pub fn basis_point_value(leg: &Leg, yield_rate: &InterestRate, settlement_date: Date) -> Real {
    let npv = npv_yield(leg, yield_rate, settlement_date);
    let delta = -modified_duration(leg, yield_rate, settlement_date) * npv;
    let gamma = (convexity(leg, yield_rate, settlement_date) / 100.0) * npv;
    delta * BASIS_POINT + 0.5 * gamma * BASIS_POINT * BASIS_POINT
}

/// Yield change implied by a one-basis-point price move; negative for
/// a long position.
pub fn yield_value_basis_point(
    leg: &Leg,
    yield_rate: &InterestRate,
    settlement_date: Date,
) -> Real {
    let npv = npv_yield(leg, yield_rate, settlement_date);
    let modified = modified_duration(leg, yield_rate, settlement_date);
    BASIS_POINT / (-npv * modified)
}

// ── Yield solving ────────────────────────────────────────────────────────

/// The flat yield at which the leg's [`npv_yield`] equals `target_npv`.
///
/// Brent search over rates from -10% to 200%.
pub fn yield_rate(
    leg: &Leg,
    target_npv: Real,
    day_counter: Arc<dyn DayCounter>,
    compounding: Compounding,
    frequency: Frequency,
    settlement_date: Date,
    accuracy: Real,
) -> Result<Rate> {
    let f = |r: Real| {
        let trial = InterestRate::new(r, day_counter.clone(), compounding, frequency);
        npv_yield(leg, &trial, settlement_date) - target_npv
    };
    brent(f, -0.10, 2.0, accuracy)
}

// ── Z-spread ─────────────────────────────────────────────────────────────

/// Present value with a continuously compounded spread `z_spread` laid
/// on top of the curve's zero rates.
///
/// Equivalent to discounting on a
/// [`ZeroSpreadedTermStructure`](qd_termstructures::ZeroSpreadedTermStructure)
/// built over the same curve and spread.
pub fn npv_z_spread(
    leg: &Leg,
    yield_curve: &dyn YieldTermStructure,
    z_spread: Spread,
    settlement_date: Date,
) -> Real {
    let day_counter = yield_curve.day_counter();
    let reference = yield_curve.reference_date();
    let mut npv = 0.0;
    for cf in leg {
        if cf.date() <= settlement_date {
            continue;
        }
        let t = day_counter.year_fraction(reference, cf.date());
        npv += cf.amount() * yield_curve.discount(t) * (-z_spread * t).exp();
    }
    let t_settle = day_counter.year_fraction(reference, settlement_date);
    npv / (yield_curve.discount(t_settle) * (-z_spread * t_settle).exp())
}

/// The spread over `yield_curve` at which the leg's [`npv_z_spread`]
/// equals `target_npv`.
pub fn z_spread(
    leg: &Leg,
    target_npv: Real,
    yield_curve: &dyn YieldTermStructure,
    settlement_date: Date,
    calibrator: &Calibrator,
) -> Result<CalibrationResult, CalibrationError> {
    calibrator.solve(
        |z| npv_z_spread(leg, yield_curve, z, settlement_date),
        target_npv,
    )
}
