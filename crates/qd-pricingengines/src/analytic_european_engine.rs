//! Analytic European option engine (Black-Scholes-Merton).
//!
//! Closed-form prices for European vanilla options, with the full set of
//! sensitivities read off the same formula: delta, gamma, vega, theta (per
//! year and per day), rho, dividend rho, and strike sensitivity.

use qd_core::{ensure, Real, Result};
use qd_instruments::{
    ExerciseType, OptionType, PricingEngine, PricingResults, VanillaOptionArguments,
};
use qd_math::{normal_cdf, normal_pdf};
use qd_processes::GeneralizedBlackScholesProcess;
use qd_termstructures::{BlackVolTermStructure, TermStructure, YieldTermStructure};

use std::sync::Arc;

/// Value and sensitivities of a European vanilla option.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BlackScholesGreeks {
    /// Present value.
    pub value: Real,
    /// First derivative with respect to the spot.
    pub delta: Real,
    /// Second derivative with respect to the spot.
    pub gamma: Real,
    /// Sensitivity to an absolute shift of the volatility.
    pub vega: Real,
    /// Time decay per year.
    pub theta: Real,
    /// Time decay per calendar day (theta / 365).
    pub theta_per_day: Real,
    /// Sensitivity to an absolute shift of the risk-free rate.
    pub rho: Real,
    /// Sensitivity to an absolute shift of the dividend yield.
    pub dividend_rho: Real,
    /// First derivative with respect to the strike.
    pub strike_sensitivity: Real,
}

/// Compute the Black-Scholes-Merton value and Greeks for a European option
/// under flat continuously compounded rates.
///
/// `value = φ (S e^{-qT} Φ(φ d₁) - K e^{-rT} Φ(φ d₂))` with `φ = +1` for a
/// call and `−1` for a put. An expired option (`T ≤ 0`) is worth its
/// intrinsic value; with vanishing variance the forward payoff is
/// deterministic and the vol sensitivities collapse to zero.
pub fn black_scholes_merton(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    risk_free_rate: Real,
    dividend_yield: Real,
    volatility: Real,
    time_to_expiry: Real,
) -> BlackScholesGreeks {
    let phi = option_type.sign();
    let t = time_to_expiry;

    if t <= 0.0 {
        return BlackScholesGreeks {
            value: (phi * (spot - strike)).max(0.0),
            ..BlackScholesGreeks::default()
        };
    }

    let r = risk_free_rate;
    let q = dividend_yield;
    let sigma = volatility;
    let sqrt_t = t.sqrt();
    let std_dev = sigma * sqrt_t;
    let df_r = (-r * t).exp();
    let df_q = (-q * t).exp();
    let forward = spot * ((r - q) * t).exp();

    let (d1, d2) = if std_dev > 1e-15 {
        let d1 = ((spot / strike).ln() + (r - q + 0.5 * sigma * sigma) * t) / std_dev;
        (d1, d1 - std_dev)
    } else {
        let tail = if forward > strike { 1e15 } else { -1e15 };
        (tail, tail)
    };

    let nd1 = normal_cdf(phi * d1);
    let nd2 = normal_cdf(phi * d2);
    let npd1 = normal_pdf(d1);

    let value = phi * (spot * df_q * nd1 - strike * df_r * nd2);
    let delta = phi * df_q * nd1;
    let (gamma, vega) = if std_dev > 1e-15 {
        (df_q * npd1 / (spot * std_dev), spot * df_q * npd1 * sqrt_t)
    } else {
        (0.0, 0.0)
    };
    // Theta (per year, through the Black calculator identity)
    let theta = -(df_r.ln() * value
        + (forward / spot).ln() * spot * delta
        + 0.5 * std_dev * std_dev * spot * spot * gamma)
        / t;
    // Rho (per 1.0 rate shift)
    let rho = phi * strike * t * df_r * nd2;
    let dividend_rho = -phi * t * spot * df_q * nd1;
    let strike_sensitivity = -phi * df_r * nd2;

    BlackScholesGreeks {
        value,
        delta,
        gamma,
        vega,
        theta,
        theta_per_day: theta / 365.0,
        rho,
        dividend_rho,
        strike_sensitivity,
    }
}

/// Analytic pricing engine for European vanilla options.
///
/// Reads spot, zero rates, and the Black volatility off the process at the
/// exercise date and evaluates [`black_scholes_merton`].
#[derive(Debug)]
pub struct AnalyticEuropeanEngine {
    process: Arc<GeneralizedBlackScholesProcess>,
}

impl AnalyticEuropeanEngine {
    /// Create a new engine with the given Black-Scholes process.
    pub fn new(process: Arc<GeneralizedBlackScholesProcess>) -> Self {
        Self { process }
    }
}

impl PricingEngine<VanillaOptionArguments> for AnalyticEuropeanEngine {
    fn calculate(&self, args: &VanillaOptionArguments) -> Result<PricingResults> {
        ensure!(
            args.exercise.exercise_type() == ExerciseType::European,
            "the analytic engine prices European exercise, got {:?}",
            args.exercise.exercise_type()
        );
        let spot = self.process.spot_value()?;
        let strike = args.payoff.strike();
        let option_type = args.payoff.option_type();
        let expiry = args.exercise.last_date();

        let rates = self.process.risk_free_rate();
        let t = rates.time_from_reference(expiry);
        let r = rates.zero_rate_impl(t);
        let q = self.process.dividend_yield().zero_rate_impl(t);
        let sigma = self.process.black_volatility().black_vol(expiry, strike);

        let greeks = black_scholes_merton(option_type, spot, strike, r, q, sigma, t);

        Ok(PricingResults::from_npv(greeks.value)
            .with_result("delta", greeks.delta)
            .with_result("gamma", greeks.gamma)
            .with_result("vega", greeks.vega)
            .with_result("theta", greeks.theta)
            .with_result("theta_per_day", greeks.theta_per_day)
            .with_result("rho", greeks.rho)
            .with_result("dividend_rho", greeks.dividend_rho)
            .with_result("strike_sensitivity", greeks.strike_sensitivity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;
    use qd_instruments::{Exercise, PlainVanillaPayoff};
    use qd_quotes::SimpleQuote;
    use qd_termstructures::{BlackConstantVol, FlatForward};
    use qd_time::{Actual365Fixed, Date};

    #[test]
    fn bs_call_price_and_greeks() {
        // S=100, K=100, r=5%, q=0%, sigma=20%, T=1: d1=0.35, d2=0.15
        let g = black_scholes_merton(OptionType::Call, 100.0, 100.0, 0.05, 0.0, 0.20, 1.0);
        assert_abs_diff_eq!(g.value, 10.4506, epsilon = 1e-3);
        assert_abs_diff_eq!(g.delta, 0.636831, epsilon = 1e-4);
        assert_abs_diff_eq!(g.gamma, 0.0187620, epsilon = 1e-5);
        assert_abs_diff_eq!(g.vega, 37.5240, epsilon = 1e-2);
        assert_abs_diff_eq!(g.rho, 53.2325, epsilon = 1e-2);
        assert_abs_diff_eq!(g.theta_per_day, g.theta / 365.0, epsilon = 1e-15);
    }

    #[test]
    fn greeks_match_finite_difference_bumps() {
        let (s, k, r, q, sigma, t) = (105.0, 100.0, 0.04, 0.015, 0.30, 0.75);
        let h = 1e-4;
        for option_type in [OptionType::Call, OptionType::Put] {
            let v = |s2: Real, k2: Real, r2: Real, q2: Real, sig2: Real, t2: Real| {
                black_scholes_merton(option_type, s2, k2, r2, q2, sig2, t2).value
            };
            let g = black_scholes_merton(option_type, s, k, r, q, sigma, t);

            let delta_fd = (v(s + h, k, r, q, sigma, t) - v(s - h, k, r, q, sigma, t)) / (2.0 * h);
            assert_abs_diff_eq!(g.delta, delta_fd, epsilon = 1e-6);

            let gamma_fd = (v(s + h, k, r, q, sigma, t) - 2.0 * v(s, k, r, q, sigma, t)
                + v(s - h, k, r, q, sigma, t))
                / (h * h);
            assert_abs_diff_eq!(g.gamma, gamma_fd, epsilon = 1e-5);

            let vega_fd =
                (v(s, k, r, q, sigma + h, t) - v(s, k, r, q, sigma - h, t)) / (2.0 * h);
            assert_abs_diff_eq!(g.vega, vega_fd, epsilon = 1e-5);

            let rho_fd = (v(s, k, r + h, q, sigma, t) - v(s, k, r - h, q, sigma, t)) / (2.0 * h);
            assert_abs_diff_eq!(g.rho, rho_fd, epsilon = 1e-5);

            let div_rho_fd =
                (v(s, k, r, q + h, sigma, t) - v(s, k, r, q - h, sigma, t)) / (2.0 * h);
            assert_abs_diff_eq!(g.dividend_rho, div_rho_fd, epsilon = 1e-5);

            let strike_fd = (v(s, k + h, r, q, sigma, t) - v(s, k - h, r, q, sigma, t)) / (2.0 * h);
            assert_abs_diff_eq!(g.strike_sensitivity, strike_fd, epsilon = 1e-6);

            // theta is the decay as the clock moves forward
            let theta_fd = -(v(s, k, r, q, sigma, t + h) - v(s, k, r, q, sigma, t - h)) / (2.0 * h);
            assert_abs_diff_eq!(g.theta, theta_fd, epsilon = 1e-5);
        }
    }

    #[test]
    fn zero_vol_is_the_deterministic_forward_payoff() {
        // forward = 100 e^{0.03} > 95: exercise is certain
        let g = black_scholes_merton(OptionType::Call, 100.0, 95.0, 0.05, 0.02, 0.0, 1.0);
        let df_r = (-0.05_f64).exp();
        let df_q = (-0.02_f64).exp();
        assert_abs_diff_eq!(g.value, 100.0 * df_q - 95.0 * df_r, epsilon = 1e-12);
        assert_abs_diff_eq!(g.delta, df_q, epsilon = 1e-12);
        assert_eq!(g.gamma, 0.0);
        assert_eq!(g.vega, 0.0);
        assert_abs_diff_eq!(g.strike_sensitivity, -df_r, epsilon = 1e-12);

        // an out-of-the-forward put expires worthless
        let worthless = black_scholes_merton(OptionType::Put, 100.0, 95.0, 0.05, 0.02, 0.0, 1.0);
        assert_eq!(worthless.value, 0.0);
        assert_eq!(worthless.delta, 0.0);
    }

    #[test]
    fn expired_option_pays_intrinsic() {
        let g = black_scholes_merton(OptionType::Put, 90.0, 100.0, 0.05, 0.0, 0.20, 0.0);
        assert_abs_diff_eq!(g.value, 10.0, epsilon = 1e-15);
        assert_eq!(g.delta, 0.0);
        assert_eq!(g.vega, 0.0);
    }

    proptest! {
        #[test]
        fn put_call_parity_holds_everywhere(
            s in 1.0f64..300.0,
            k in 1.0f64..300.0,
            r in -0.02f64..0.15,
            q in 0.0f64..0.10,
            sigma in 0.01f64..1.0,
            t in 0.01f64..5.0,
        ) {
            let call = black_scholes_merton(OptionType::Call, s, k, r, q, sigma, t).value;
            let put = black_scholes_merton(OptionType::Put, s, k, r, q, sigma, t).value;
            let forward = s * (-q * t).exp() - k * (-r * t).exp();
            prop_assert!((call - put - forward).abs() < 1e-8);
        }
    }

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

    #[test]
    fn engine_reads_the_process() {
        let reference = Date::from_ymd(2014, 1, 13).unwrap();
        let expiry = Date::from_ymd(2015, 1, 13).unwrap();
        let engine = AnalyticEuropeanEngine::new(process_at(123.0, 0.01, 0.02, 0.03, reference));

        let args = VanillaOptionArguments {
            payoff: Arc::new(PlainVanillaPayoff::new(OptionType::Call, 123.0)),
            exercise: Exercise::european(expiry),
        };
        let results = engine.calculate(&args).unwrap();
        assert_abs_diff_eq!(results.npv, 0.9240, epsilon = 5e-3);
        for key in [
            "delta",
            "gamma",
            "vega",
            "theta",
            "theta_per_day",
            "rho",
            "dividend_rho",
            "strike_sensitivity",
        ] {
            assert!(results.additional_results.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn engine_rejects_american_exercise() {
        let reference = Date::from_ymd(2014, 1, 13).unwrap();
        let expiry = Date::from_ymd(2015, 1, 13).unwrap();
        let engine = AnalyticEuropeanEngine::new(process_at(123.0, 0.01, 0.02, 0.03, reference));

        let args = VanillaOptionArguments {
            payoff: Arc::new(PlainVanillaPayoff::new(OptionType::Call, 123.0)),
            exercise: Exercise::american(reference, expiry),
        };
        let err = engine.calculate(&args).unwrap_err();
        assert!(matches!(err, qd_core::Error::Precondition(_)));
    }
}
