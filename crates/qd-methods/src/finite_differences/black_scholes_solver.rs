//! 1-D finite difference rollback for the Black-Scholes PDE.

use qd_core::{ensure, Rate, Real, Result, Size, Time};
use qd_processes::GeneralizedBlackScholesProcess;
use qd_termstructures::YieldTermStructure;

use super::{FdmScheme, TridiagonalOperator};

/// Value and spot sensitivities read off the finite difference grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FdmSolution {
    /// Present value at the spot.
    pub value: Real,
    /// First derivative of the value with respect to the spot.
    pub delta: Real,
    /// Second derivative of the value with respect to the spot.
    pub gamma: Real,
}

/// A 1-D finite difference solver for the Black-Scholes PDE.
///
/// Solves `∂V/∂t + ½σ²S²·∂²V/∂S² + (r−q)S·∂V/∂S − rV = 0` backward in
/// time from the terminal payoff on a uniform log-spot grid centred on
/// the spot. The short rate and dividend rate may vary per time step;
/// the volatility is a rollback argument, so one solver prices a whole
/// family of trial volatilities during calibration.
#[derive(Debug, Clone)]
pub struct FdmBlackScholesSolver {
    step_rates: Vec<Rate>,
    step_dividends: Vec<Rate>,
    maturity: Time,
    grid_points: Size,
    scheme: FdmScheme,
}

impl FdmBlackScholesSolver {
    /// Creates a solver from per-step short rates and dividend rates.
    ///
    /// `step_rates[k]` and `step_dividends[k]` hold over the `k`-th of
    /// the uniform time intervals covering `[0, maturity]`.
    pub fn new(
        step_rates: Vec<Rate>,
        step_dividends: Vec<Rate>,
        maturity: Time,
        grid_points: Size,
        scheme: FdmScheme,
    ) -> Result<Self> {
        ensure!(
            !step_rates.is_empty(),
            "the rollback needs at least one time step"
        );
        ensure!(
            step_rates.len() == step_dividends.len(),
            "{} rate steps against {} dividend steps",
            step_rates.len(),
            step_dividends.len()
        );
        ensure!(
            maturity.is_finite() && maturity > 0.0,
            "maturity must be positive, got {}",
            maturity
        );
        ensure!(
            grid_points >= 5,
            "the grid needs at least 5 points, got {}",
            grid_points
        );
        Ok(Self {
            step_rates,
            step_dividends,
            maturity,
            grid_points,
            scheme,
        })
    }

    /// Creates a solver whose per-step rates are the forward rates the
    /// process curves imply over each time interval.
    ///
    /// The forward over `[t_k, t_{k+1}]` comes from the discount ratio
    /// `ln(df(t_k)/df(t_{k+1})) / Δt`, so a flat curve reproduces its
    /// own rate exactly and a bootstrapped curve contributes its local
    /// forwards.
    pub fn from_process(
        process: &GeneralizedBlackScholesProcess,
        maturity: Time,
        time_steps: Size,
        grid_points: Size,
        scheme: FdmScheme,
    ) -> Result<Self> {
        ensure!(time_steps >= 1, "time_steps must be at least 1");
        ensure!(
            maturity.is_finite() && maturity > 0.0,
            "maturity must be positive, got {}",
            maturity
        );
        let dt = maturity / time_steps as Real;
        let forwards = |curve: &dyn YieldTermStructure| -> Vec<Rate> {
            (0..time_steps)
                .map(|k| {
                    let t = k as Real * dt;
                    (curve.discount(t) / curve.discount(t + dt)).ln() / dt
                })
                .collect()
        };
        Self::new(
            forwards(process.risk_free_rate()),
            forwards(process.dividend_yield()),
            maturity,
            grid_points,
            scheme,
        )
    }

    /// Number of time steps in the rollback.
    pub fn time_steps(&self) -> Size {
        self.step_rates.len()
    }

    /// Rolls a European-exercise payoff back to the valuation date.
    ///
    /// The spot and volatility are taken as given; engines validate
    /// market inputs before building a solver, which keeps this path
    /// total inside calibration closures.
    pub fn solve_european(
        &self,
        spot: Real,
        sigma: Real,
        payoff: &dyn Fn(Real) -> Real,
    ) -> FdmSolution {
        self.roll_back(spot, sigma, payoff, false)
    }

    /// Rolls back with the early-exercise obstacle
    /// `V = max(V_continuation, payoff)` applied after every time step.
    pub fn solve_american(
        &self,
        spot: Real,
        sigma: Real,
        payoff: &dyn Fn(Real) -> Real,
    ) -> FdmSolution {
        self.roll_back(spot, sigma, payoff, true)
    }

    fn roll_back(
        &self,
        spot: Real,
        sigma: Real,
        payoff: &dyn Fn(Real) -> Real,
        early_exercise: bool,
    ) -> FdmSolution {
        let n = self.grid_points;
        let steps = self.step_rates.len();
        let dt = self.maturity / steps as Real;
        let theta = self.scheme.implicit_weight();

        // Uniform log-spot grid centred on the spot, four standard
        // deviations either side, floored so that a vanishing
        // volatility still leaves room around the spot.
        let x_center = spot.ln();
        let half_width = (4.0 * sigma * self.maturity.sqrt()).max(1.0);
        let x_min = x_center - half_width;
        let dx = 2.0 * half_width / (n - 1) as Real;

        let s_grid: Vec<Real> = (0..n).map(|i| (x_min + i as Real * dx).exp()).collect();
        let intrinsic: Vec<Real> = s_grid.iter().map(|&s| payoff(s)).collect();
        let mut values = intrinsic.clone();

        // Backward induction from maturity; step k covers [t_k, t_{k+1}]
        // with that interval's rates. The θ-scheme solves
        // (I − θ·Δt·L)·V_new = (I + (1−θ)·Δt·L)·V_old.
        for k in (0..steps).rev() {
            let spatial = spatial_operator(n, dx, sigma, self.step_rates[k], self.step_dividends[k]);

            let mut explicit_side = spatial.clone();
            explicit_side.scale((1.0 - theta) * dt);
            explicit_side.add_identity(1.0);
            let rhs = explicit_side.apply(&values);

            values = if theta > 0.0 {
                let mut implicit_side = spatial;
                implicit_side.scale(-theta * dt);
                implicit_side.add_identity(1.0);
                implicit_side.solve(&rhs)
            } else {
                rhs
            };

            // Boundary rows carry no spatial information; extend the
            // interior linearly in log-space.
            values[0] = 2.0 * values[1] - values[2];
            values[n - 1] = 2.0 * values[n - 2] - values[n - 3];

            if early_exercise {
                for (v, &floor) in values.iter_mut().zip(&intrinsic) {
                    *v = v.max(floor);
                }
            }
        }

        // Quadratic fit through the three nodes nearest the spot gives
        // the value and the log-space derivatives; the chain rule maps
        // them back to spot space.
        let j = (((x_center - x_min) / dx).round() as usize).clamp(1, n - 2);
        let u = (x_center - (x_min + j as Real * dx)) / dx;
        let (below, at, above) = (values[j - 1], values[j], values[j + 1]);
        let curvature = above - 2.0 * at + below;
        let slope = 0.5 * (above - below) + u * curvature;
        let value = at + 0.5 * u * (above - below) + 0.5 * u * u * curvature;

        let dv_dx = slope / dx;
        let d2v_dx2 = curvature / (dx * dx);
        FdmSolution {
            value,
            delta: dv_dx / spot,
            gamma: (d2v_dx2 - dv_dx) / (spot * spot),
        }
    }
}

/// Central-difference discretisation of the spatial part of the PDE,
/// `L·V ≈ α·V_xx + β·V_x − r·V` with `α = σ²/2` and `β = r − q − σ²/2`.
/// Boundary rows are left empty; the rollback replaces boundary values
/// by extrapolation after each step.
fn spatial_operator(n: Size, dx: Real, sigma: Real, r: Rate, q: Rate) -> TridiagonalOperator {
    let alpha = 0.5 * sigma * sigma;
    let beta = r - q - 0.5 * sigma * sigma;
    let diffusion = alpha / (dx * dx);
    let convection = beta / (2.0 * dx);

    let mut op = TridiagonalOperator::new(n);
    for i in 1..n - 1 {
        op.lower[i] = diffusion - convection;
        op.diag[i] = -2.0 * diffusion - r;
        op.upper[i] = diffusion + convection;
    }
    op
}
