//! European option valuation report.

use std::fmt;

use qd_core::{Rate, Real, Result, Volatility};
use qd_instruments::{OptionType, PricingResults, VanillaOption};
use qd_pricingengines::AnalyticEuropeanEngine;
use qd_time::Date;

use crate::market::market_process;

/// Inputs for the European option run.
#[derive(Debug, Clone, PartialEq)]
pub struct EuropeanOptionConfig {
    /// Valuation date.
    pub valuation_date: Date,
    /// Expiry date.
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
    /// Constant Black volatility.
    pub volatility: Volatility,
}

impl EuropeanOptionConfig {
    /// The standard run: a one-year at-the-money call on a low-vol
    /// dividend payer.
    pub fn standard() -> Result<Self> {
        Ok(Self {
            valuation_date: Date::from_ymd(2014, 1, 13)?,
            expiry_date: Date::from_ymd(2015, 1, 13)?,
            option_type: OptionType::Call,
            strike: 123.0,
            spot: 123.0,
            risk_free_rate: 0.01,
            dividend_yield: 0.02,
            volatility: 0.03,
        })
    }
}

/// Value and sensitivities from the analytic engine, in report order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EuropeanOptionReport {
    /// Present value.
    pub npv: Real,
    /// Sensitivity to the spot.
    pub delta: Real,
    /// Second-order sensitivity to the spot.
    pub gamma: Real,
    /// Sensitivity to the volatility.
    pub vega: Real,
    /// Time decay per year.
    pub theta: Real,
    /// Sensitivity to the risk-free rate.
    pub rho: Real,
    /// Sensitivity to the dividend yield.
    pub dividend_rho: Real,
    /// Time decay per calendar day.
    pub theta_per_day: Real,
    /// Sensitivity to the strike.
    pub strike_sensitivity: Real,
}

impl EuropeanOptionReport {
    pub(crate) fn from_results(results: &PricingResults) -> Result<Self> {
        Ok(Self {
            npv: results.npv,
            delta: results.result("delta")?,
            gamma: results.result("gamma")?,
            vega: results.result("vega")?,
            theta: results.result("theta")?,
            rho: results.result("rho")?,
            dividend_rho: results.result("dividend_rho")?,
            theta_per_day: results.result("theta_per_day")?,
            strike_sensitivity: results.result("strike_sensitivity")?,
        })
    }
}

impl fmt::Display for EuropeanOptionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Option NPV: {:.6}", self.npv)?;
        writeln!(f, "Delta: {:.6}", self.delta)?;
        writeln!(f, "Gamma: {:.6}", self.gamma)?;
        writeln!(f, "Vega: {:.6}", self.vega)?;
        writeln!(f, "Theta: {:.6}", self.theta)?;
        writeln!(f, "Rho: {:.6}", self.rho)?;
        writeln!(f, "Dividend Rho: {:.6}", self.dividend_rho)?;
        writeln!(f, "Theta per Day: {:.6}", self.theta_per_day)?;
        write!(f, "Strike Sensitivity: {:.6}", self.strike_sensitivity)
    }
}

/// Prices the configured option on the analytic engine.
pub fn european_option_report(config: &EuropeanOptionConfig) -> Result<EuropeanOptionReport> {
    let option = VanillaOption::european(config.option_type, config.strike, config.expiry_date);
    let process = market_process(
        config.valuation_date,
        config.spot,
        config.risk_free_rate,
        config.dividend_yield,
        config.volatility,
    );
    let engine = AnalyticEuropeanEngine::new(process);
    let results = option.price(&engine)?;
    EuropeanOptionReport::from_results(&results)
}
