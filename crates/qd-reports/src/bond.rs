//! Fixed-rate bond report with z-spread calibration.
//!
//! Bootstraps a deposit curve, solves the constant spread over it that
//! reprices the bond's market quote, values the bond on the spreaded
//! curve, and rounds out the usual flat-yield risk numbers.

use std::fmt;
use std::sync::Arc;

use qd_cashflows::Duration;
use qd_core::{Compounding, Rate, Real, Result};
use qd_instruments::{fixed_rate_bond, Bond};
use qd_math::Calibrator;
use qd_pricingengines::DiscountingBondEngine;
use qd_quotes::{Quote, SimpleQuote};
use qd_termstructures::{
    DepositRateHelper, PiecewiseYieldCurve, RateHelper, YieldTermStructure,
    ZeroSpreadedTermStructure,
};
use qd_time::{
    Actual360, ActualActualIsda, ActualActualIsma, BusinessDayConvention, Calendar, Date,
    DayCounter, Frequency, InterestRate, Period, ScheduleBuilder, TimeUnit, UnitedStates,
};

/// Inputs for the fixed-rate bond run.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedRateBondConfig {
    /// Valuation date; rolled to a business day before use.
    pub valuation_date: Date,
    /// Maturity of the bond.
    pub maturity_date: Date,
    /// Annual coupon rate, paid semiannually.
    pub coupon_rate: Rate,
    /// Face amount.
    pub face_amount: Real,
    /// Quoted clean market price per 100 of face.
    pub clean_market_price: Real,
    /// Business days between valuation and settlement.
    pub settlement_days: u32,
    /// Deposit quotes the discount curve is bootstrapped from,
    /// as (simple Act/360 rate, tenor) pairs.
    pub deposit_quotes: Vec<(Rate, Period)>,
}

impl FixedRateBondConfig {
    /// The standard run: a seasoned 6.875% bond quoted at 101.50 over
    /// the 2014 US deposit curve.
    pub fn standard() -> Result<Self> {
        Ok(Self {
            valuation_date: Date::from_ymd(2014, 4, 14)?,
            maturity_date: Date::from_ymd(2041, 9, 1)?,
            coupon_rate: 0.06875,
            face_amount: 100.0,
            clean_market_price: 101.50,
            settlement_days: 0,
            deposit_quotes: vec![
                (0.0003, Period::new(1, TimeUnit::Months)),
                (0.0004, Period::new(3, TimeUnit::Months)),
                (0.0006, Period::new(6, TimeUnit::Months)),
                (0.0010, Period::new(1, TimeUnit::Years)),
                (0.0037, Period::new(2, TimeUnit::Years)),
                (0.0082, Period::new(3, TimeUnit::Years)),
                (0.0161, Period::new(5, TimeUnit::Years)),
                (0.0218, Period::new(7, TimeUnit::Years)),
                (0.0265, Period::new(10, TimeUnit::Years)),
                (0.0323, Period::new(20, TimeUnit::Years)),
                (0.0333, Period::new(25, TimeUnit::Years)),
                (0.0348, Period::new(30, TimeUnit::Years)),
            ],
        })
    }
}

/// Spread, yield, and risk numbers for the configured bond.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRateBondReport {
    /// Constant spread over the deposit curve that reprices the market
    /// quote, in basis points.
    pub z_spread_bp: Real,
    /// Modified duration at the yield to maturity.
    pub duration: Real,
    /// Convexity at the yield to maturity.
    pub convexity: Real,
    /// Price sensitivity to one basis point of coupon.
    pub bps: Real,
    /// Price change for one basis point of yield.
    pub basis_point_value: Real,
    /// Present value of the bond on the z-spreaded curve.
    pub npv: Real,
    /// Yield change implied by a one basis point price move.
    pub yield_value_basis_point: Real,
    /// Flat yield that reprices the market quote.
    pub yield_to_maturity: Rate,
    /// Accrued interest at settlement, per 100 of face.
    pub accrued_interest: Real,
}

impl fmt::Display for FixedRateBondReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Z-Spread (bp): {:.6}", self.z_spread_bp)?;
        writeln!(f, "Duration: {:.6}", self.duration)?;
        writeln!(f, "Convexity: {:.6}", self.convexity)?;
        writeln!(f, "BPS: {:.6}", self.bps)?;
        writeln!(f, "Basis Point Value: {:.6}", self.basis_point_value)?;
        writeln!(f, "Bond NPV: {:.6}", self.npv)?;
        writeln!(
            f,
            "Yield Value of a Basis Point: {:.6}",
            self.yield_value_basis_point
        )?;
        writeln!(f, "Yield to Maturity: {:.6}", self.yield_to_maturity)?;
        write!(f, "Accrued Interest: {:.6}", self.accrued_interest)
    }
}

/// Accuracy of the yield and z-spread solves, on price.
const SOLVE_ACCURACY: Real = 1e-8;

/// Spread search window, -1000bp to +10000bp.
const SPREAD_DOMAIN: (Real, Real) = (-0.10, 1.0);

/// Bootstraps the curve, calibrates the z-spread, and collates the
/// report numbers.
pub fn fixed_rate_bond_report(config: &FixedRateBondConfig) -> Result<FixedRateBondReport> {
    let calendar = UnitedStates;
    let valuation = calendar.advance_business_days(config.valuation_date, 0);

    let helpers: Vec<Box<dyn RateHelper>> = config
        .deposit_quotes
        .iter()
        .map(|&(rate, tenor)| {
            Box::new(DepositRateHelper::from_tenor(
                rate,
                tenor,
                0,
                &calendar,
                BusinessDayConvention::ModifiedFollowing,
                true,
                Actual360,
                valuation,
            )) as Box<dyn RateHelper>
        })
        .collect();
    let deposit_curve: Arc<dyn YieldTermStructure> =
        Arc::new(PiecewiseYieldCurve::new(valuation, &helpers, ActualActualIsda)?);

    let bond = build_bond(config, valuation, calendar)?;
    let settlement = bond.settlement_date(valuation);
    let accrued = bond.accrued_amount(settlement);

    // market dirty price, in leg units
    let market_dirty = config.clean_market_price + accrued;
    let target_value = market_dirty * bond.face_amount / 100.0;
    let spread_calibrator = Calibrator::new(SPREAD_DOMAIN, SOLVE_ACCURACY, 100);
    let calibration = qd_cashflows::z_spread(
        &bond.cashflows,
        target_value,
        &*deposit_curve,
        settlement,
        &spread_calibrator,
    )?;
    let z_spread = calibration.parameter;

    let spread_quote: Arc<dyn Quote> = Arc::new(SimpleQuote::new(z_spread));
    let spreaded: Arc<dyn YieldTermStructure> = Arc::new(ZeroSpreadedTermStructure::new(
        Arc::clone(&deposit_curve),
        spread_quote,
    )?);
    let engine = DiscountingBondEngine::new(spreaded);
    let priced = engine.price_bond(&bond, settlement)?;

    let day_counter: Arc<dyn DayCounter> = Arc::new(ActualActualIsma);
    let yield_to_maturity = bond.yield_to_maturity(
        config.clean_market_price,
        Arc::clone(&day_counter),
        Compounding::SimpleThenCompounded,
        Frequency::Semiannual,
        settlement,
        SOLVE_ACCURACY,
    )?;
    let flat_yield = InterestRate::new(
        yield_to_maturity,
        day_counter,
        Compounding::SimpleThenCompounded,
        Frequency::Semiannual,
    );

    Ok(FixedRateBondReport {
        z_spread_bp: z_spread * 1e4,
        duration: qd_cashflows::duration(
            &bond.cashflows,
            &flat_yield,
            Duration::Modified,
            settlement,
        )?,
        convexity: qd_cashflows::convexity(&bond.cashflows, &flat_yield, settlement),
        bps: qd_cashflows::bps_yield(&bond.cashflows, &flat_yield, settlement),
        basis_point_value: qd_cashflows::basis_point_value(&bond.cashflows, &flat_yield, settlement),
        npv: priced.npv,
        yield_value_basis_point: qd_cashflows::yield_value_basis_point(
            &bond.cashflows,
            &flat_yield,
            settlement,
        ),
        yield_to_maturity,
        accrued_interest: accrued,
    })
}

/// The bond itself: semiannual coupons over an unadjusted backward
/// schedule, payments rolled ModifiedFollowing, issued one year before
/// valuation so a seasoned accrual period exists.
fn build_bond(
    config: &FixedRateBondConfig,
    valuation: Date,
    calendar: UnitedStates,
) -> Result<Bond> {
    let issue = calendar.adjust(
        valuation.advance(-1, TimeUnit::Years),
        BusinessDayConvention::Following,
    );
    let schedule = ScheduleBuilder::new(
        issue,
        config.maturity_date,
        Period::new(6, TimeUnit::Months),
        &calendar,
    )
    .with_convention(BusinessDayConvention::Unadjusted)
    .with_termination_convention(BusinessDayConvention::Unadjusted)
    .build()?;

    Ok(fixed_rate_bond(
        config.settlement_days,
        config.face_amount,
        &schedule,
        vec![config.coupon_rate],
        ActualActualIsma,
        Compounding::SimpleThenCompounded,
        Frequency::Semiannual,
        BusinessDayConvention::ModifiedFollowing,
        calendar,
    ))
}
