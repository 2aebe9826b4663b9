//! The [`CashFlow`] trait and the simple cash-flow types.

use std::fmt;

use qd_core::Real;
use qd_time::Date;

use crate::coupon::Coupon;

/// An amount of money paid on a known date.
///
/// For simple flows the amount is a stored value; coupons derive it
/// from a rate accruing over a period. Analysis code that needs the
/// accrual details of a flow goes through
/// [`as_coupon`](CashFlow::as_coupon).
pub trait CashFlow: fmt::Debug + Send + Sync {
    /// The date on which this cash flow is paid.
    fn date(&self) -> Date;

    /// The amount paid on the payment date.
    fn amount(&self) -> Real;

    /// Whether this cash flow has already occurred relative to
    /// `ref_date`. A flow paying exactly on `ref_date` has not occurred
    /// yet.
    fn has_occurred(&self, ref_date: Date) -> bool {
        self.date() < ref_date
    }

    /// The coupon view of this cash flow, if it is one.
    fn as_coupon(&self) -> Option<&dyn Coupon> {
        None
    }
}

/// A sequence of cash flows, ordered by payment date.
pub type Leg = Vec<Box<dyn CashFlow>>;

/// A fixed amount at a fixed date.
#[derive(Debug, Clone)]
pub struct SimpleCashFlow {
    /// The payment amount.
    pub amount: Real,
    /// The payment date.
    pub date: Date,
}

impl SimpleCashFlow {
    /// Creates a simple cash flow.
    pub fn new(amount: Real, date: Date) -> Self {
        Self { amount, date }
    }
}

impl CashFlow for SimpleCashFlow {
    fn date(&self) -> Date {
        self.date
    }

    fn amount(&self) -> Real {
        self.amount
    }
}

/// A notional repayment at a specific date.
#[derive(Debug, Clone)]
pub struct Redemption {
    /// The redemption amount.
    pub amount: Real,
    /// The redemption date.
    pub date: Date,
}

impl Redemption {
    /// Creates a redemption cash flow.
    pub fn new(amount: Real, date: Date) -> Self {
        Self { amount, date }
    }
}

impl CashFlow for Redemption {
    fn date(&self) -> Date {
        self.date
    }

    fn amount(&self) -> Real {
        self.amount
    }
}
