//! Cash flows, coupons, and leg analysis for the quantdesk pricing library.
//!
//! A [`Leg`] is a sequence of dated cash flows; a bond is a leg of
//! [`FixedRateCoupon`]s followed by a [`Redemption`]. The [`cashflows`]
//! module holds the analysis functions that operate on whole legs:
//! present value against a curve or a flat yield, yield solving,
//! duration, convexity, basis-point sensitivities, accrued interest,
//! and z-spread calibration.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cashflow;
pub mod cashflows;
pub mod coupon;
pub mod fixed_rate_coupon;

pub use cashflow::{CashFlow, Leg, Redemption, SimpleCashFlow};
pub use cashflows::{
    accrued_amount, accrued_days, basis_point_value, bps_curve, bps_yield, convexity, duration,
    maturity_date, next_cashflow_date, npv_curve, npv_yield, npv_z_spread, previous_cashflow_date,
    yield_rate, yield_value_basis_point, z_spread, Duration,
};
pub use coupon::Coupon;
pub use fixed_rate_coupon::{FixedRateCoupon, FixedRateLegBuilder};
