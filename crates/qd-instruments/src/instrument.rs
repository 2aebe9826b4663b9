//! `Instrument` base trait and pricing-engine plumbing.
//!
//! Concrete instruments hold their contract terms; market data lives in
//! the engines. Pricing is a single call from immutable inputs to a
//! [`PricingResults`] value, with no shared evaluation-date state.

use qd_core::{Error, Real, Result};
use qd_time::Date;
use std::collections::HashMap;

/// Results of pricing an instrument.
///
/// Contains the NPV and optionally additional named results
/// (e.g. "delta", "gamma", "theta").
#[derive(Debug, Clone, Default)]
pub struct PricingResults {
    /// Net present value.
    pub npv: Real,
    /// Error estimate (e.g. from a lattice or simulation method).
    pub error_estimate: Option<Real>,
    /// Additional named results.
    pub additional_results: HashMap<String, Real>,
}

impl PricingResults {
    /// Create pricing results with just an NPV.
    pub fn from_npv(npv: Real) -> Self {
        Self {
            npv,
            error_estimate: None,
            additional_results: HashMap::new(),
        }
    }

    /// Add a named result.
    pub fn with_result(mut self, key: impl Into<String>, value: Real) -> Self {
        self.additional_results.insert(key.into(), value);
        self
    }

    /// Look up a named result; errors if the engine did not provide it.
    pub fn result(&self, key: &str) -> Result<Real> {
        self.additional_results
            .get(key)
            .copied()
            .ok_or_else(|| Error::Runtime(format!("no result named {:?}", key)))
    }
}

/// Base trait for all pricing engines.
///
/// A pricing engine computes [`PricingResults`] for a specific
/// instrument type described by `Args`.
pub trait PricingEngine<Args>: std::fmt::Debug + Send + Sync {
    /// Price the instrument described by `args`.
    fn calculate(&self, args: &Args) -> Result<PricingResults>;
}

/// Base trait for all financial instruments.
pub trait Instrument: std::fmt::Debug + Send + Sync {
    /// Whether the instrument has no remaining rights or flows as seen
    /// from `reference_date`.
    fn is_expired(&self, reference_date: Date) -> bool;

    /// The maturity or last relevant date.
    fn maturity_date(&self) -> Option<Date> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pricing_results_builder() {
        let r = PricingResults::from_npv(42.0)
            .with_result("delta", 0.55)
            .with_result("gamma", 0.02);
        assert!((r.npv - 42.0).abs() < 1e-15);
        assert!((r.additional_results["delta"] - 0.55).abs() < 1e-15);
        assert!((r.additional_results["gamma"] - 0.02).abs() < 1e-15);
        assert!(r.error_estimate.is_none());
    }

    #[test]
    fn missing_result_is_an_error() {
        let r = PricingResults::from_npv(1.0).with_result("delta", 0.5);
        assert!((r.result("delta").unwrap() - 0.5).abs() < 1e-15);
        assert!(matches!(r.result("vega"), Err(Error::Runtime(_))));
    }
}
