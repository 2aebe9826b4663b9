//! Discounting bond pricing engine.
//!
//! Prices a bond by discounting its future cash flows on a yield curve.
//! The NPV is quoted at the curve's reference date; the settlement value
//! (the amount exchanged at settlement) and the dirty/clean prices per
//! 100 of face come along as named results.

use std::sync::Arc;

use qd_cashflows::Leg;
use qd_core::Result;
use qd_instruments::{Bond, PricingResults};
use qd_termstructures::YieldTermStructure;
use qd_time::Date;

/// Discounting bond pricing engine.
///
/// `settlement value = Σ c_i · d(t_i) / d(t_settle)` over the flows past
/// the settlement date; the NPV scales that back to the reference date.
#[derive(Debug)]
pub struct DiscountingBondEngine {
    discount_curve: Arc<dyn YieldTermStructure>,
}

impl DiscountingBondEngine {
    /// Create a new engine with the given discount curve.
    pub fn new(discount_curve: Arc<dyn YieldTermStructure>) -> Self {
        Self { discount_curve }
    }

    /// Present value of a leg's flows strictly after `settlement`.
    pub fn price(&self, cashflows: &Leg, settlement: Date) -> Result<PricingResults> {
        let settlement_df = self.discount_curve.discount_date(settlement);
        let settlement_value =
            qd_cashflows::npv_curve(cashflows, &*self.discount_curve, settlement);

        Ok(PricingResults::from_npv(settlement_value * settlement_df)
            .with_result("settlement_value", settlement_value)
            .with_result("settlement_df", settlement_df))
    }

    /// Price a [`Bond`], adding its dirty and clean prices per 100 of face.
    pub fn price_bond(&self, bond: &Bond, settlement: Date) -> Result<PricingResults> {
        let settlement_df = self.discount_curve.discount_date(settlement);
        let settlement_value =
            qd_cashflows::npv_curve(&bond.cashflows, &*self.discount_curve, settlement);
        let dirty_price = settlement_value * 100.0 / bond.face_amount;
        let clean_price = bond.clean_price_from_dirty(dirty_price, settlement);

        Ok(PricingResults::from_npv(settlement_value * settlement_df)
            .with_result("settlement_value", settlement_value)
            .with_result("settlement_df", settlement_df)
            .with_result("dirty_price", dirty_price)
            .with_result("clean_price", clean_price))
    }
}
