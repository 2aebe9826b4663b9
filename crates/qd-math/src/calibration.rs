//! Calibration of a scalar pricing parameter to an observed price.
//!
//! [`Calibrator::solve`] adjusts one free parameter of a pricing
//! function until the function reproduces a target price. The search is
//! bracket-and-refine: both domain endpoints are evaluated once, and the
//! interval is then narrowed with bisection, secant, and inverse
//! quadratic candidate steps while it keeps straddling the target.
//!
//! The pricing function is expected to be total over the domain;
//! anything fallible (curve building, engine validation) belongs before
//! calibration, so that a failed solve can only mean one of the three
//! [`CalibrationError`] cases.

use qd_core::Real;
use thiserror::Error;

/// A successfully calibrated parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationResult {
    /// Parameter value reproducing the target price within tolerance.
    pub parameter: Real,
    /// Number of refinement steps taken after the endpoint evaluations.
    pub iterations: u32,
    /// Remaining pricing error `price(parameter) - target`.
    pub residual: Real,
}

/// Why a calibration did not produce a parameter.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalibrationError {
    /// The target price is not attained anywhere between the domain
    /// endpoints: both residuals have the same sign.
    #[error(
        "target {target} not bracketed on [{lo}, {hi}]: \
         residuals {f_lo} and {f_hi} do not straddle zero"
    )]
    NoBracket {
        /// Target price asked for.
        target: Real,
        /// Lower domain endpoint.
        lo: Real,
        /// Upper domain endpoint.
        hi: Real,
        /// Residual at the lower endpoint.
        f_lo: Real,
        /// Residual at the upper endpoint.
        f_hi: Real,
    },
    /// The iteration budget ran out before the residual met tolerance.
    #[error("no convergence after {iterations} iterations, best residual {residual}")]
    CalibrationFailed {
        /// Refinement steps taken.
        iterations: u32,
        /// Best residual seen when the budget ran out.
        residual: Real,
    },
    /// The domain is empty, non-finite, or the tolerance is not positive.
    #[error("invalid calibration domain [{lo}, {hi}] with tolerance {tolerance}")]
    InvalidDomain {
        /// Lower domain endpoint.
        lo: Real,
        /// Upper domain endpoint.
        hi: Real,
        /// Tolerance passed in.
        tolerance: Real,
    },
}

impl From<CalibrationError> for qd_core::Error {
    fn from(err: CalibrationError) -> Self {
        qd_core::Error::Calibration(err.to_string())
    }
}

/// Solves `pricing_function(p) = target_price` for `p` on a closed
/// interval.
///
/// ```
/// use qd_math::Calibrator;
///
/// let calibrator = Calibrator::new((0.0, 1.0), 1e-6, 100);
/// let result = calibrator.solve(|p| 10.0 + 50.0 * p, 17.5).unwrap();
/// assert!((result.parameter - 0.15).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Calibrator {
    lo: Real,
    hi: Real,
    tolerance: Real,
    max_iterations: u32,
}

impl Calibrator {
    /// Creates a calibrator over `domain` with a price-space `tolerance`
    /// and an iteration budget.
    pub fn new(domain: (Real, Real), tolerance: Real, max_iterations: u32) -> Calibrator {
        Calibrator {
            lo: domain.0,
            hi: domain.1,
            tolerance,
            max_iterations,
        }
    }

    /// Finds the parameter at which `pricing_function` reproduces
    /// `target_price` within tolerance.
    ///
    /// An endpoint already within tolerance is returned with zero
    /// iterations. Every refinement step keeps the current interval
    /// straddling the target, and every evaluation stays inside the
    /// domain.
    pub fn solve<F>(
        &self,
        pricing_function: F,
        target_price: Real,
    ) -> Result<CalibrationResult, CalibrationError>
    where
        F: Fn(Real) -> Real,
    {
        let (lo, hi) = (self.lo, self.hi);
        if !lo.is_finite() || !hi.is_finite() || lo >= hi || !(self.tolerance > 0.0) {
            return Err(CalibrationError::InvalidDomain {
                lo,
                hi,
                tolerance: self.tolerance,
            });
        }
        let residual = |p: Real| pricing_function(p) - target_price;

        let mut a = lo;
        let mut b = hi;
        let mut fa = residual(a);
        let mut fb = residual(b);

        if fa.abs() <= self.tolerance {
            return Ok(CalibrationResult {
                parameter: a,
                iterations: 0,
                residual: fa,
            });
        }
        if fb.abs() <= self.tolerance {
            return Ok(CalibrationResult {
                parameter: b,
                iterations: 0,
                residual: fb,
            });
        }
        if !(fa * fb < 0.0) {
            return Err(CalibrationError::NoBracket {
                target: target_price,
                lo,
                hi,
                f_lo: fa,
                f_hi: fb,
            });
        }

        // Brent refinement; b is the best point so far and [b, c]
        // straddles the target throughout.
        let mut c = a;
        let mut fc = fa;
        let mut d = b - a;
        let mut e = d;
        let mut iterations = 0u32;

        loop {
            if fb * fc > 0.0 {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            if fb.abs() <= self.tolerance {
                return Ok(CalibrationResult {
                    parameter: b,
                    iterations,
                    residual: fb,
                });
            }

            let width_floor = 2.0 * f64::EPSILON * b.abs() + f64::EPSILON;
            let xm = 0.5 * (c - b);
            if xm.abs() <= width_floor {
                // The interval collapsed to machine width; b is as good
                // as the domain resolution allows.
                return Ok(CalibrationResult {
                    parameter: b,
                    iterations,
                    residual: fb,
                });
            }

            if iterations == self.max_iterations {
                return Err(CalibrationError::CalibrationFailed {
                    iterations,
                    residual: fb,
                });
            }
            iterations += 1;

            if e.abs() >= width_floor && fa.abs() > fb.abs() {
                // Secant step with two distinct points, inverse
                // quadratic with three.
                let s = fb / fa;
                let (mut p, mut q) = if a == c {
                    (2.0 * xm * s, 1.0 - s)
                } else {
                    let q0 = fa / fc;
                    let r = fb / fc;
                    (
                        s * (2.0 * xm * q0 * (q0 - r) - (b - a) * (r - 1.0)),
                        (q0 - 1.0) * (r - 1.0) * (s - 1.0),
                    )
                };
                if p > 0.0 {
                    q = -q;
                } else {
                    p = -p;
                }
                if 2.0 * p < (3.0 * xm * q - (width_floor * q).abs())
                    && 2.0 * p < (e * q).abs()
                {
                    e = d;
                    d = p / q;
                } else {
                    d = xm;
                    e = d;
                }
            } else {
                d = xm;
                e = d;
            }

            a = b;
            fa = fb;
            b += if d.abs() > width_floor {
                d
            } else if xm > 0.0 {
                width_floor
            } else {
                -width_floor
            };
            fb = residual(b);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;

    #[test]
    fn linear_pricing_function() {
        let calibrator = Calibrator::new((0.0, 1.0), 1e-6, 100);
        let result = calibrator.solve(|p| 10.0 + 50.0 * p, 17.5).unwrap();
        assert!(
            (result.parameter - 0.15).abs() < 1e-6,
            "got parameter {}",
            result.parameter
        );
        assert!(result.residual.abs() <= 1e-6);
        assert!(result.iterations <= 5, "took {} iterations", result.iterations);
    }

    #[test]
    fn converges_on_smooth_monotone_functions() {
        let calibrator = Calibrator::new((0.0, 10.0), 1e-10, 100);
        let result = calibrator.solve(|p| p * p, 2.0).unwrap();
        assert!((result.parameter - 2.0_f64.sqrt()).abs() < 1e-9);
        assert!(
            result.iterations < 20,
            "superlinear refinement expected, took {}",
            result.iterations
        );
    }

    #[test]
    fn is_idempotent() {
        let calibrator = Calibrator::new((0.0, 4.0), 1e-8, 100);
        let first = calibrator.solve(|p| p.exp(), 7.5).unwrap();
        let second = calibrator.solve(|p| p.exp(), 7.5).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn evaluations_stay_inside_the_domain() {
        let evaluated = RefCell::new(Vec::new());
        let calibrator = Calibrator::new((0.25, 0.75), 1e-9, 100);
        let result = calibrator
            .solve(
                |p| {
                    evaluated.borrow_mut().push(p);
                    (10.0 * p).sin() + 2.0 * p
                },
                1.5,
            )
            .unwrap();
        assert!(result.parameter >= 0.25 && result.parameter <= 0.75);
        for &p in evaluated.borrow().iter() {
            assert!((0.25..=0.75).contains(&p), "evaluated outside domain: {p}");
        }
    }

    #[test]
    fn endpoint_already_within_tolerance() {
        let calibrator = Calibrator::new((0.15, 1.0), 1e-6, 100);
        let result = calibrator.solve(|p| 10.0 + 50.0 * p, 17.5).unwrap();
        assert_eq!(result.iterations, 0);
        assert_eq!(result.parameter, 0.15);
    }

    #[test]
    fn unreachable_target_reports_no_bracket() {
        let calibrator = Calibrator::new((0.0, 1.0), 1e-6, 100);
        let err = calibrator.solve(|p| 10.0 + 50.0 * p, 1000.0).unwrap_err();
        match err {
            CalibrationError::NoBracket { target, lo, hi, f_lo, f_hi } => {
                assert_eq!(target, 1000.0);
                assert_eq!((lo, hi), (0.0, 1.0));
                assert!(f_lo < 0.0 && f_hi < 0.0);
            }
            other => panic!("expected NoBracket, got {other:?}"),
        }
    }

    #[test]
    fn exhausted_budget_reports_failure() {
        let calibrator = Calibrator::new((0.0, 10.0), 1e-12, 1);
        let err = calibrator.solve(|p| p * p, 2.0).unwrap_err();
        match err {
            CalibrationError::CalibrationFailed { iterations, residual } => {
                assert_eq!(iterations, 1);
                assert!(residual.abs() > 1e-12);
            }
            other => panic!("expected CalibrationFailed, got {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_domains() {
        let f = |p: Real| p;
        for calibrator in [
            Calibrator::new((1.0, 0.0), 1e-6, 100),
            Calibrator::new((0.0, 0.0), 1e-6, 100),
            Calibrator::new((0.0, f64::INFINITY), 1e-6, 100),
            Calibrator::new((0.0, 1.0), 0.0, 100),
            Calibrator::new((0.0, 1.0), -1.0, 100),
        ] {
            assert!(matches!(
                calibrator.solve(f, 0.5),
                Err(CalibrationError::InvalidDomain { .. })
            ));
        }
    }

    #[test]
    fn converts_into_core_error() {
        let calibrator = Calibrator::new((0.0, 1.0), 1e-6, 100);
        let err = calibrator.solve(|p| p, 5.0).unwrap_err();
        let core: qd_core::Error = err.into();
        assert!(matches!(core, qd_core::Error::Calibration(_)));
    }

    proptest! {
        #[test]
        fn solves_random_linear_maps(
            slope in 1.0f64..200.0,
            intercept in -50.0f64..50.0,
            root in 0.01f64..0.99,
        ) {
            let target = intercept + slope * root;
            let calibrator = Calibrator::new((0.0, 1.0), 1e-9, 100);
            let result = calibrator
                .solve(|p| intercept + slope * p, target)
                .unwrap();
            prop_assert!((result.parameter - root).abs() < 1e-7);
            prop_assert!(result.residual.abs() <= 1e-9);
        }
    }
}
