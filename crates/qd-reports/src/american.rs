//! American option report with implied-volatility calibration.

use std::fmt;

use qd_core::{Rate, Real, Result, Size, Volatility};
use qd_instruments::{OptionType, VanillaOption};
use qd_pricingengines::{implied_volatility, FdAmericanEngine};
use qd_time::Date;

use crate::market::{implied_vol_calibrator, market_process};

/// Inputs for the American option run.
#[derive(Debug, Clone, PartialEq)]
pub struct AmericanOptionConfig {
    /// Valuation date.
    pub valuation_date: Date,
    /// Expiry date; exercise is allowed from valuation to expiry.
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
    /// Observed market price the calibration targets.
    pub market_price: Real,
    /// Finite difference time steps.
    pub time_steps: Size,
    /// Finite difference grid points.
    pub grid_points: Size,
}

impl AmericanOptionConfig {
    /// The standard run: a listed call quoted at 7.50.
    pub fn standard() -> Result<Self> {
        Ok(Self {
            valuation_date: Date::from_ymd(2014, 4, 17)?,
            expiry_date: Date::from_ymd(2016, 1, 15)?,
            option_type: OptionType::Call,
            strike: 35.0,
            spot: 36.35,
            risk_free_rate: 0.01,
            dividend_yield: 0.02,
            starting_volatility: 0.50,
            market_price: 7.50,
            time_steps: 100,
            grid_points: 100,
        })
    }
}

/// Calibrated volatility and the finite difference valuation at it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmericanOptionReport {
    /// Volatility that reprices the market quote.
    pub implied_volatility: Volatility,
    /// Present value at the implied volatility.
    pub npv: Real,
    /// Sensitivity to the spot.
    pub delta: Real,
    /// Second-order sensitivity to the spot.
    pub gamma: Real,
}

impl fmt::Display for AmericanOptionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Implied Volatility: {:.6}", self.implied_volatility)?;
        writeln!(f, "Option NPV: {:.6}", self.npv)?;
        writeln!(f, "Delta: {:.6}", self.delta)?;
        write!(f, "Gamma: {:.6}", self.gamma)
    }
}

/// Calibrates the volatility to the market quote, rebuilds the process
/// at it, and prices once more on the finite difference engine.
pub fn american_option_report(config: &AmericanOptionConfig) -> Result<AmericanOptionReport> {
    let option = VanillaOption::american(
        config.option_type,
        config.strike,
        config.valuation_date,
        config.expiry_date,
    );
    let process = market_process(
        config.valuation_date,
        config.spot,
        config.risk_free_rate,
        config.dividend_yield,
        config.starting_volatility,
    );
    let calibration = implied_volatility(
        &option,
        &process,
        config.market_price,
        config.time_steps,
        config.grid_points,
        &implied_vol_calibrator(),
    )?;

    let calibrated = market_process(
        config.valuation_date,
        config.spot,
        config.risk_free_rate,
        config.dividend_yield,
        calibration.parameter,
    );
    let engine = FdAmericanEngine::new(calibrated, config.time_steps, config.grid_points);
    let results = option.price(&engine)?;
    Ok(AmericanOptionReport {
        implied_volatility: calibration.parameter,
        npv: results.npv,
        delta: results.result("delta")?,
        gamma: results.result("gamma")?,
    })
}
