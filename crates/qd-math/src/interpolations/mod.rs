//! 1D interpolation.

use qd_core::{ensure, Real, Result};

/// A 1D function defined by interpolating a set of known points.
pub trait Interpolation1D: std::fmt::Debug + Send + Sync {
    /// Evaluates the interpolation at `x`.
    ///
    /// Outside `[x_min, x_max]` the boundary segment is extended.
    fn value(&self, x: Real) -> Real;

    /// Lower bound of the interpolation domain.
    fn x_min(&self) -> Real;

    /// Upper bound of the interpolation domain.
    fn x_max(&self) -> Real;

    /// Whether `x` lies within the interpolation domain.
    fn is_in_range(&self, x: Real) -> bool {
        x >= self.x_min() && x <= self.x_max()
    }
}

/// Piecewise-linear interpolation.
///
/// `f(x) = y[i] + (y[i+1] - y[i]) * (x - x[i]) / (x[i+1] - x[i])`
#[derive(Debug, Clone)]
pub struct LinearInterpolation {
    xs: Vec<Real>,
    ys: Vec<Real>,
}

impl LinearInterpolation {
    /// Builds a linear interpolation over strictly increasing abscissas.
    pub fn new(xs: &[Real], ys: &[Real]) -> Result<Self> {
        ensure!(xs.len() >= 2, "need at least 2 points for interpolation");
        ensure!(
            xs.len() == ys.len(),
            "got {} abscissas but {} ordinates",
            xs.len(),
            ys.len()
        );
        ensure!(
            xs.windows(2).all(|w| w[0] < w[1]),
            "interpolation abscissas must be strictly increasing"
        );
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        })
    }

    /// Index of the segment containing `x`, clamped to the boundary
    /// segments outside the domain.
    fn locate(&self, x: Real) -> usize {
        let n = self.xs.len();
        if x <= self.xs[0] {
            return 0;
        }
        if x >= self.xs[n - 1] {
            return n - 2;
        }
        let mut lo = 0;
        let mut hi = n - 1;
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if self.xs[mid] <= x {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        lo
    }
}

impl Interpolation1D for LinearInterpolation {
    fn value(&self, x: Real) -> Real {
        let i = self.locate(x);
        let dx = self.xs[i + 1] - self.xs[i];
        self.ys[i] + (x - self.xs[i]) * (self.ys[i + 1] - self.ys[i]) / dx
    }

    fn x_min(&self) -> Real {
        self.xs[0]
    }

    fn x_max(&self) -> Real {
        self.xs[self.xs.len() - 1]
    }
}
