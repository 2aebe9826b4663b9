//! Generalized Black-Scholes process.
//!
//! `dS / S = (r(t) - q(t)) dt + sigma dW`
//!
//! where `r` is the risk-free rate, `q` the continuous dividend yield, and
//! `sigma` the Black volatility. The engines read the process as a market
//! snapshot: spot, the two curves, and the volatility structure.

use std::sync::Arc;

use qd_core::{Real, Result};
use qd_quotes::Quote;
use qd_termstructures::{BlackVolTermStructure, FlatForward, YieldTermStructure};
use qd_time::Actual365Fixed;

/// A generalized Black-Scholes process.
#[derive(Debug)]
pub struct GeneralizedBlackScholesProcess {
    spot: Arc<dyn Quote>,
    risk_free_rate: Arc<dyn YieldTermStructure>,
    dividend_yield: Arc<dyn YieldTermStructure>,
    black_vol: Arc<dyn BlackVolTermStructure>,
}

impl GeneralizedBlackScholesProcess {
    /// Bundles spot, curves, and volatility into a process.
    pub fn new(
        spot: Arc<dyn Quote>,
        risk_free_rate: Arc<dyn YieldTermStructure>,
        dividend_yield: Arc<dyn YieldTermStructure>,
        black_vol: Arc<dyn BlackVolTermStructure>,
    ) -> Self {
        Self {
            spot,
            risk_free_rate,
            dividend_yield,
            black_vol,
        }
    }

    /// The spot quote.
    pub fn spot(&self) -> &dyn Quote {
        &*self.spot
    }

    /// The current spot value.
    ///
    /// # Errors
    /// Fails with [`qd_core::Error::NullValue`] if the quote is empty.
    pub fn spot_value(&self) -> Result<Real> {
        self.spot.valid_value()
    }

    /// The risk-free rate curve.
    pub fn risk_free_rate(&self) -> &dyn YieldTermStructure {
        &*self.risk_free_rate
    }

    /// The dividend yield curve.
    pub fn dividend_yield(&self) -> &dyn YieldTermStructure {
        &*self.dividend_yield
    }

    /// The Black volatility structure.
    pub fn black_volatility(&self) -> &dyn BlackVolTermStructure {
        &*self.black_vol
    }
}

/// A Black-Scholes process without dividends (`q = 0`).
pub fn black_scholes_process(
    spot: Arc<dyn Quote>,
    risk_free_rate: Arc<dyn YieldTermStructure>,
    black_vol: Arc<dyn BlackVolTermStructure>,
) -> GeneralizedBlackScholesProcess {
    let reference = risk_free_rate.reference_date();
    let no_dividends: Arc<dyn YieldTermStructure> =
        Arc::new(FlatForward::continuous(reference, 0.0, Actual365Fixed));
    GeneralizedBlackScholesProcess::new(spot, risk_free_rate, no_dividends, black_vol)
}

/// A Black-Scholes-Merton process with a continuous dividend yield.
pub fn black_scholes_merton_process(
    spot: Arc<dyn Quote>,
    risk_free_rate: Arc<dyn YieldTermStructure>,
    dividend_yield: Arc<dyn YieldTermStructure>,
    black_vol: Arc<dyn BlackVolTermStructure>,
) -> GeneralizedBlackScholesProcess {
    GeneralizedBlackScholesProcess::new(spot, risk_free_rate, dividend_yield, black_vol)
}
