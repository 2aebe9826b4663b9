//! Market data assembly shared by the option reports.

use std::sync::Arc;

use qd_core::{Rate, Real, Volatility};
use qd_math::Calibrator;
use qd_processes::{black_scholes_merton_process, GeneralizedBlackScholesProcess};
use qd_quotes::{Quote, SimpleQuote};
use qd_termstructures::{BlackConstantVol, BlackVolTermStructure, FlatForward, YieldTermStructure};
use qd_time::{ActualActualIsda, Date, UnitedStates};

/// Flat curves, constant Black vol, and a spot quote rolled into a
/// Black-Scholes-Merton process.
///
/// Rates compound continuously; times run on Actual/Actual (ISDA) with
/// the US settlement calendar on the vol surface.
pub(crate) fn market_process(
    valuation_date: Date,
    spot: Real,
    risk_free_rate: Rate,
    dividend_yield: Rate,
    volatility: Volatility,
) -> Arc<GeneralizedBlackScholesProcess> {
    let quote: Arc<dyn Quote> = Arc::new(SimpleQuote::new(spot));
    let rates: Arc<dyn YieldTermStructure> = Arc::new(FlatForward::continuous(
        valuation_date,
        risk_free_rate,
        ActualActualIsda,
    ));
    let dividends: Arc<dyn YieldTermStructure> = Arc::new(FlatForward::continuous(
        valuation_date,
        dividend_yield,
        ActualActualIsda,
    ));
    let vol: Arc<dyn BlackVolTermStructure> = Arc::new(
        BlackConstantVol::new(valuation_date, volatility, ActualActualIsda)
            .with_calendar(UnitedStates),
    );
    Arc::new(black_scholes_merton_process(quote, rates, dividends, vol))
}

/// The implied-volatility search: vol in `[1e-7, 4.0]`, price matched
/// to `1e-4`, at most 100 iterations.
pub(crate) fn implied_vol_calibrator() -> Calibrator {
    Calibrator::new((1e-7, 4.0), 1e-4, 100)
}
