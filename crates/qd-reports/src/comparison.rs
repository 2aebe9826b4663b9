//! American/European comparison report.
//!
//! Calibrates each exercise style to the same market quote with its own
//! engine, then reports the two valuations side by side.

use std::fmt;

use qd_core::{Rate, Real, Result, Size, Volatility};
use qd_instruments::{OptionType, VanillaOption};
use qd_pricingengines::{implied_volatility, AnalyticEuropeanEngine, FdAmericanEngine};
use qd_time::Date;

use crate::european::EuropeanOptionReport;
use crate::market::{implied_vol_calibrator, market_process};

/// Inputs for the side-by-side run.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonConfig {
    /// Valuation date.
    pub valuation_date: Date,
    /// Expiry date for both styles.
    pub expiry_date: Date,
    /// Call or put.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: Real,
    /// Spot price of the underlying.
    pub spot: Real,
    /// Flat risk-free rate, continuously compounded.
    pub risk_free_rate: Rate,
    /// Flat dividend yield, continuously compounded.
    pub dividend_yield: Rate,
    /// Volatility the process starts from before calibration.
    pub starting_volatility: Volatility,
    /// Observed market price both calibrations target.
    pub market_price: Real,
    /// Finite difference time steps for the American leg.
    pub time_steps: Size,
    /// Finite difference grid points for the American leg.
    pub grid_points: Size,
}

impl ComparisonConfig {
    /// The standard run: the 7.50 call with no dividends.
    pub fn standard() -> Result<Self> {
        Ok(Self {
            valuation_date: Date::from_ymd(2014, 4, 17)?,
            expiry_date: Date::from_ymd(2016, 1, 15)?,
            option_type: OptionType::Call,
            strike: 35.0,
            spot: 36.35,
            risk_free_rate: 0.01,
            dividend_yield: 0.0,
            starting_volatility: 0.50,
            market_price: 7.50,
            time_steps: 100,
            grid_points: 100,
        })
    }
}

/// Both exercise styles calibrated to the same quote.
///
/// The finite difference rollback yields value, delta, and gamma only,
/// so the American section stops there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonReport {
    /// Volatility at which the analytic engine reprices the quote.
    pub european_implied_volatility: Volatility,
    /// Volatility at which the finite difference engine reprices it.
    pub american_implied_volatility: Volatility,
    /// European valuation at its implied volatility.
    pub european: EuropeanOptionReport,
    /// American present value at its implied volatility.
    pub american_npv: Real,
    /// American sensitivity to the spot.
    pub american_delta: Real,
    /// American second-order sensitivity to the spot.
    pub american_gamma: Real,
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "European Results")?;
        writeln!(f, "{}", self.european)?;
        writeln!(f)?;
        writeln!(f, "American Results")?;
        writeln!(f, "Option NPV: {:.6}", self.american_npv)?;
        writeln!(f, "Delta: {:.6}", self.american_delta)?;
        write!(f, "Gamma: {:.6}", self.american_gamma)
    }
}

/// Calibrates each style to the market quote and prices both at their
/// own implied volatilities.
pub fn comparison_report(config: &ComparisonConfig) -> Result<ComparisonReport> {
    let process = market_process(
        config.valuation_date,
        config.spot,
        config.risk_free_rate,
        config.dividend_yield,
        config.starting_volatility,
    );
    let calibrator = implied_vol_calibrator();

    let european = VanillaOption::european(config.option_type, config.strike, config.expiry_date);
    let european_calibration = implied_volatility(
        &european,
        &process,
        config.market_price,
        config.time_steps,
        config.grid_points,
        &calibrator,
    )?;
    let european_process = market_process(
        config.valuation_date,
        config.spot,
        config.risk_free_rate,
        config.dividend_yield,
        european_calibration.parameter,
    );
    let european_results = european.price(&AnalyticEuropeanEngine::new(european_process))?;

    let american = VanillaOption::american(
        config.option_type,
        config.strike,
        config.valuation_date,
        config.expiry_date,
    );
    let american_calibration = implied_volatility(
        &american,
        &process,
        config.market_price,
        config.time_steps,
        config.grid_points,
        &calibrator,
    )?;
    let american_process = market_process(
        config.valuation_date,
        config.spot,
        config.risk_free_rate,
        config.dividend_yield,
        american_calibration.parameter,
    );
    let american_results = american.price(&FdAmericanEngine::new(
        american_process,
        config.time_steps,
        config.grid_points,
    ))?;

    Ok(ComparisonReport {
        european_implied_volatility: european_calibration.parameter,
        american_implied_volatility: american_calibration.parameter,
        european: EuropeanOptionReport::from_results(&european_results)?,
        american_npv: american_results.npv,
        american_delta: american_results.result("delta")?,
        american_gamma: american_results.result("gamma")?,
    })
}
