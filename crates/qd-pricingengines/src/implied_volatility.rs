//! Implied volatility calibration for vanilla options.

use qd_core::{ensure, Real, Result, Size};
use qd_instruments::{ExerciseType, VanillaOption};
use qd_math::{CalibrationResult, Calibrator};
use qd_methods::{FdmBlackScholesSolver, FdmScheme};
use qd_processes::GeneralizedBlackScholesProcess;
use qd_termstructures::{TermStructure, YieldTermStructure};

use crate::analytic_european_engine::black_scholes_merton;

/// Backs the volatility out of a quoted option price.
///
/// The process supplies the spot and both curves; its own volatility
/// surface plays no part, since the volatility is the parameter being
/// calibrated. European exercise reprices through the closed form,
/// American exercise through a Crank-Nicolson finite difference
/// rollback with `time_steps` by `grid_points` resolution (the grid
/// arguments are ignored for European exercise).
pub fn implied_volatility(
    option: &VanillaOption,
    process: &GeneralizedBlackScholesProcess,
    target_price: Real,
    time_steps: Size,
    grid_points: Size,
    calibrator: &Calibrator,
) -> Result<CalibrationResult> {
    let spot = process.spot_value()?;
    let expiry = option.exercise().last_date();
    let t = process.risk_free_rate().time_from_reference(expiry);
    ensure!(t > 0.0, "cannot imply a volatility for the expired option");

    match option.exercise().exercise_type() {
        ExerciseType::European => {
            let option_type = option.payoff().option_type();
            let strike = option.payoff().strike();
            let r = process.risk_free_rate().zero_rate_impl(t);
            let q = process.dividend_yield().zero_rate_impl(t);
            let price = |sigma: Real| {
                black_scholes_merton(option_type, spot, strike, r, q, sigma, t).value
            };
            Ok(calibrator.solve(price, target_price)?)
        }
        ExerciseType::American => {
            let solver = FdmBlackScholesSolver::from_process(
                process,
                t,
                time_steps,
                grid_points,
                FdmScheme::CrankNicolson,
            )?;
            let payoff = |s: Real| option.payoff().value(s);
            let price = |sigma: Real| solver.solve_american(spot, sigma, &payoff).value;
            Ok(calibrator.solve(price, target_price)?)
        }
    }
}
