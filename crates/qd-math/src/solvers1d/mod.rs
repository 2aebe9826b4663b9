//! 1D root-finding solvers.
//!
//! Each solver takes a bracket `[x_min, x_max]` whose endpoint values
//! straddle zero and an accuracy on the abscissa; accuracy values at or
//! below zero fall back to [`DEFAULT_ACCURACY`].

use qd_core::{Error, Real, Result};

/// Iteration cap shared by all solvers.
pub const MAX_ITERATIONS: u32 = 100;

/// Abscissa accuracy used when the caller passes a non-positive one.
pub const DEFAULT_ACCURACY: Real = 1.0e-11;

fn effective_accuracy(accuracy: Real) -> Real {
    if accuracy > 0.0 {
        accuracy
    } else {
        DEFAULT_ACCURACY
    }
}

// ── Brent ────────────────────────────────────────────────────────────────

/// Brent's method for finding a root of `f` in `[x_min, x_max]`.
///
/// Combines bisection, secant, and inverse quadratic interpolation;
/// the bracket is preserved at every step.
pub fn brent<F>(mut f: F, x_min: Real, x_max: Real, accuracy: Real) -> Result<Real>
where
    F: FnMut(Real) -> Real,
{
    let acc = effective_accuracy(accuracy);
    let mut a = x_min;
    let mut b = x_max;
    let mut fa = f(a);
    let mut fb = f(b);

    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }
    if fa * fb > 0.0 {
        return Err(Error::Precondition(format!(
            "Brent: root not bracketed, f({a}) = {fa} and f({b}) = {fb}"
        )));
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for _ in 0..MAX_ITERATIONS {
        if fb * fc > 0.0 {
            // b and c no longer straddle the root; reset c to a.
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
        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * acc;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol || fb == 0.0 {
            return Ok(b);
        }
        if e.abs() >= tol && fa.abs() > fb.abs() {
            // Try secant (two points) or inverse quadratic (three).
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                (2.0 * xm * s, 1.0 - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            } else {
                p = -p;
            }
            if 2.0 * p < (3.0 * xm * q - (tol * q).abs()) && 2.0 * p < (e * q).abs() {
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
        b += if d.abs() > tol {
            d
        } else if xm > 0.0 {
            tol
        } else {
            -tol
        };
        fb = f(b);
    }
    Err(Error::Runtime(
        "Brent solver: maximum iterations reached".into(),
    ))
}

// ── Bisection ────────────────────────────────────────────────────────────

/// Plain interval halving.
pub fn bisection<F>(mut f: F, x_min: Real, x_max: Real, accuracy: Real) -> Result<Real>
where
    F: FnMut(Real) -> Real,
{
    let acc = effective_accuracy(accuracy);
    let mut a = x_min;
    let mut b = x_max;
    let fa = f(a);
    let mut fm;

    if fa == 0.0 {
        return Ok(a);
    }
    let fb = f(b);
    if fb == 0.0 {
        return Ok(b);
    }
    if fa * fb > 0.0 {
        return Err(Error::Precondition(format!(
            "Bisection: root not bracketed by [{a}, {b}]"
        )));
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = 0.5 * (a + b);
        fm = f(mid);
        if fm == 0.0 || 0.5 * (b - a).abs() < acc {
            return Ok(mid);
        }
        if fm * fa > 0.0 {
            a = mid;
        } else {
            b = mid;
        }
    }
    Err(Error::Runtime(
        "Bisection solver: maximum iterations reached".into(),
    ))
}

// ── Newton-safe ──────────────────────────────────────────────────────────

/// Newton-Raphson with a bisection safety net.
///
/// `f_df` returns the function value and its derivative. Steps that
/// would leave the bracket, or that converge slower than halving it,
/// are replaced by bisection steps.
pub fn newton_safe<F>(mut f_df: F, x_min: Real, x_max: Real, accuracy: Real) -> Result<Real>
where
    F: FnMut(Real) -> (Real, Real),
{
    let acc = effective_accuracy(accuracy);
    let (f_lo, _) = f_df(x_min);
    let (f_hi, _) = f_df(x_max);

    if f_lo == 0.0 {
        return Ok(x_min);
    }
    if f_hi == 0.0 {
        return Ok(x_max);
    }
    if f_lo * f_hi > 0.0 {
        return Err(Error::Precondition(format!(
            "NewtonSafe: root not bracketed by [{x_min}, {x_max}]"
        )));
    }

    // Orient the search so that f(xl) < 0.
    let (mut xl, mut xh) = if f_lo < 0.0 {
        (x_min, x_max)
    } else {
        (x_max, x_min)
    };

    let mut x = 0.5 * (xl + xh);
    let mut dx_old = (xh - xl).abs();
    let mut dx = dx_old;
    let (mut fx, mut dfx) = f_df(x);

    for _ in 0..MAX_ITERATIONS {
        let newton_leaves_bracket = ((x - xh) * dfx - fx) * ((x - xl) * dfx - fx) > 0.0;
        let converging_too_slowly = (2.0 * fx).abs() > (dx_old * dfx).abs();

        if newton_leaves_bracket || converging_too_slowly {
            dx_old = dx;
            dx = 0.5 * (xh - xl);
            x = xl + dx;
        } else {
            dx_old = dx;
            dx = fx / dfx;
            x -= dx;
        }

        if dx.abs() < acc {
            return Ok(x);
        }

        let (new_fx, new_dfx) = f_df(x);
        fx = new_fx;
        dfx = new_dfx;

        if fx.abs() < acc {
            return Ok(x);
        }
        if fx < 0.0 {
            xl = x;
        } else {
            xh = x;
        }
    }
    Err(Error::Runtime(
        "NewtonSafe solver: maximum iterations reached".into(),
    ))
}
