//! Finite difference engine for American vanilla options.
//!
//! Rolls the payoff back through a Crank-Nicolson grid with the
//! early-exercise obstacle applied after every time step. Delta and gamma
//! come off the spatial grid; the lattice produces no further Greeks.

use qd_core::{ensure, Real, Result, Size};
use qd_instruments::{ExerciseType, PricingEngine, PricingResults, VanillaOptionArguments};
use qd_methods::{FdmBlackScholesSolver, FdmScheme};
use qd_processes::GeneralizedBlackScholesProcess;
use qd_termstructures::{BlackVolTermStructure, TermStructure};

use std::sync::Arc;

/// Finite difference pricing engine for American vanilla options.
#[derive(Debug)]
pub struct FdAmericanEngine {
    process: Arc<GeneralizedBlackScholesProcess>,
    time_steps: Size,
    grid_points: Size,
    scheme: FdmScheme,
}

impl FdAmericanEngine {
    /// Create a Crank-Nicolson engine over a `time_steps` by
    /// `grid_points` rollback grid.
    pub fn new(
        process: Arc<GeneralizedBlackScholesProcess>,
        time_steps: Size,
        grid_points: Size,
    ) -> Self {
        Self {
            process,
            time_steps,
            grid_points,
            scheme: FdmScheme::CrankNicolson,
        }
    }

    /// Use a different rollback scheme.
    pub fn with_scheme(mut self, scheme: FdmScheme) -> Self {
        self.scheme = scheme;
        self
    }
}

impl PricingEngine<VanillaOptionArguments> for FdAmericanEngine {
    fn calculate(&self, args: &VanillaOptionArguments) -> Result<PricingResults> {
        ensure!(
            args.exercise.exercise_type() == ExerciseType::American,
            "the finite difference engine prices American exercise, got {:?}",
            args.exercise.exercise_type()
        );
        let spot = self.process.spot_value()?;
        let strike = args.payoff.strike();
        let expiry = args.exercise.last_date();
        let t = self.process.risk_free_rate().time_from_reference(expiry);

        if t <= 0.0 {
            return Ok(PricingResults::from_npv(args.payoff.value(spot))
                .with_result("delta", 0.0)
                .with_result("gamma", 0.0));
        }

        let sigma = self.process.black_volatility().black_vol(expiry, strike);
        let solver = FdmBlackScholesSolver::from_process(
            &self.process,
            t,
            self.time_steps,
            self.grid_points,
            self.scheme,
        )?;
        let payoff = |s: Real| args.payoff.value(s);
        let solution = solver.solve_american(spot, sigma, &payoff);

        Ok(PricingResults::from_npv(solution.value)
            .with_result("delta", solution.delta)
            .with_result("gamma", solution.gamma))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytic_european_engine::black_scholes_merton;
    use approx::assert_abs_diff_eq;
    use qd_instruments::{Exercise, OptionType, PlainVanillaPayoff};
    use qd_quotes::SimpleQuote;
    use qd_termstructures::{BlackConstantVol, FlatForward, YieldTermStructure};
    use qd_time::{Actual365Fixed, Date};

    fn process_at(
        spot: Real,
        r: Real,
        q: Real,
        sigma: Real,
        reference: Date,
    ) -> Arc<GeneralizedBlackScholesProcess> {
        let rf: Arc<dyn YieldTermStructure> =
            Arc::new(FlatForward::continuous(reference, r, Actual365Fixed));
        let div: Arc<dyn YieldTermStructure> =
            Arc::new(FlatForward::continuous(reference, q, Actual365Fixed));
        let vol: Arc<dyn BlackVolTermStructure> =
            Arc::new(BlackConstantVol::new(reference, sigma, Actual365Fixed));
        Arc::new(GeneralizedBlackScholesProcess::new(
            Arc::new(SimpleQuote::new(spot)),
            rf,
            div,
            vol,
        ))
    }

    fn american_args(option_type: OptionType, strike: Real, from: Date, to: Date) -> VanillaOptionArguments {
        VanillaOptionArguments {
            payoff: Arc::new(PlainVanillaPayoff::new(option_type, strike)),
            exercise: Exercise::american(from, to),
        }
    }

    #[test]
    fn american_call_without_dividends_matches_the_closed_form() {
        let reference = Date::from_ymd(2025, 1, 15).unwrap();
        let expiry = Date::from_ymd(2026, 1, 15).unwrap();
        let engine = FdAmericanEngine::new(process_at(100.0, 0.05, 0.0, 0.20, reference), 200, 200);

        let results = engine
            .calculate(&american_args(OptionType::Call, 100.0, reference, expiry))
            .unwrap();
        // without dividends early exercise of a call is never optimal
        let european = black_scholes_merton(OptionType::Call, 100.0, 100.0, 0.05, 0.0, 0.20, 1.0);
        assert_abs_diff_eq!(results.npv, european.value, epsilon = 0.05);
        assert_abs_diff_eq!(results.additional_results["delta"], european.delta, epsilon = 0.01);
        assert_abs_diff_eq!(results.additional_results["gamma"], european.gamma, epsilon = 0.002);
    }

    #[test]
    fn american_put_dominates_intrinsic_and_european() {
        let reference = Date::from_ymd(2025, 1, 15).unwrap();
        let expiry = Date::from_ymd(2026, 1, 15).unwrap();
        let engine = FdAmericanEngine::new(process_at(80.0, 0.05, 0.0, 0.20, reference), 200, 200);

        let results = engine
            .calculate(&american_args(OptionType::Put, 100.0, reference, expiry))
            .unwrap();
        let european = black_scholes_merton(OptionType::Put, 80.0, 100.0, 0.05, 0.0, 0.20, 1.0);
        assert!(results.npv >= 20.0 - 1e-9, "below intrinsic: {}", results.npv);
        assert!(
            results.npv > european.value,
            "no early exercise premium: {} vs {}",
            results.npv,
            european.value
        );
    }

    #[test]
    fn engine_rejects_european_exercise() {
        let reference = Date::from_ymd(2025, 1, 15).unwrap();
        let expiry = Date::from_ymd(2026, 1, 15).unwrap();
        let engine = FdAmericanEngine::new(process_at(100.0, 0.05, 0.0, 0.20, reference), 100, 100);

        let args = VanillaOptionArguments {
            payoff: Arc::new(PlainVanillaPayoff::new(OptionType::Call, 100.0)),
            exercise: Exercise::european(expiry),
        };
        let err = engine.calculate(&args).unwrap_err();
        assert!(matches!(err, qd_core::Error::Precondition(_)));
    }

    #[test]
    fn expired_option_pays_intrinsic() {
        let reference = Date::from_ymd(2025, 1, 15).unwrap();
        let engine = FdAmericanEngine::new(process_at(90.0, 0.05, 0.0, 0.20, reference), 100, 100);

        let expiry = Date::from_ymd(2025, 1, 15).unwrap();
        let results = engine
            .calculate(&american_args(OptionType::Put, 100.0, expiry, expiry))
            .unwrap();
        assert_abs_diff_eq!(results.npv, 10.0, epsilon = 1e-15);
        assert_eq!(results.additional_results["delta"], 0.0);
    }
}
