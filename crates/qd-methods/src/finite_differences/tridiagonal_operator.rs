//! Tridiagonal matrix operator with a Thomas-algorithm solve.

use qd_core::Real;

/// A tridiagonal matrix, stored as three bands.
///
/// Row `i` holds `lower[i]`, `diag[i]`, `upper[i]` around the
/// diagonal; `lower[0]` and `upper[n-1]` are unused. The rollback
/// assembles a spatial discretisation once per time step and derives
/// the two sides of the θ-scheme from it with [`scale`] and
/// [`add_identity`].
///
/// [`scale`]: TridiagonalOperator::scale
/// [`add_identity`]: TridiagonalOperator::add_identity
#[derive(Debug, Clone)]
pub struct TridiagonalOperator {
    /// Lower band, `(i, i-1)` entries.
    pub lower: Vec<Real>,
    /// Main diagonal.
    pub diag: Vec<Real>,
    /// Upper band, `(i, i+1)` entries.
    pub upper: Vec<Real>,
}

impl TridiagonalOperator {
    /// A zero operator of size `n`.
    pub fn new(n: usize) -> Self {
        Self {
            lower: vec![0.0; n],
            diag: vec![0.0; n],
            upper: vec![0.0; n],
        }
    }

    /// The identity operator of size `n`.
    pub fn identity(n: usize) -> Self {
        let mut op = Self::new(n);
        op.add_identity(1.0);
        op
    }

    /// Number of rows.
    pub fn size(&self) -> usize {
        self.diag.len()
    }

    /// Applies the operator: `y = A·x`.
    pub fn apply(&self, x: &[Real]) -> Vec<Real> {
        let n = self.size();
        assert_eq!(x.len(), n, "operand length must match operator size");
        (0..n)
            .map(|i| {
                let mut y = self.diag[i] * x[i];
                if i > 0 {
                    y += self.lower[i] * x[i - 1];
                }
                if i + 1 < n {
                    y += self.upper[i] * x[i + 1];
                }
                y
            })
            .collect()
    }

    /// Solves `A·x = rhs` by the Thomas algorithm.
    ///
    /// The operator must be non-singular; the rollback only solves
    /// against the θ-scheme's implicit side, which is strictly
    /// diagonally dominant.
    pub fn solve(&self, rhs: &[Real]) -> Vec<Real> {
        let n = self.size();
        assert_eq!(rhs.len(), n, "right-hand side length must match operator size");

        // Forward elimination; `scratch[i]` holds the modified upper
        // band entry of row i-1.
        let mut scratch = vec![0.0; n];
        let mut x = vec![0.0; n];

        let mut pivot = self.diag[0];
        x[0] = rhs[0] / pivot;
        for i in 1..n {
            scratch[i] = self.upper[i - 1] / pivot;
            pivot = self.diag[i] - self.lower[i] * scratch[i];
            x[i] = (rhs[i] - self.lower[i] * x[i - 1]) / pivot;
        }

        // Back substitution.
        for i in (0..n - 1).rev() {
            let correction = scratch[i + 1] * x[i + 1];
            x[i] -= correction;
        }
        x
    }

    /// Scales every entry: `A ← factor·A`.
    pub fn scale(&mut self, factor: Real) {
        for band in [&mut self.lower, &mut self.diag, &mut self.upper] {
            for entry in band.iter_mut() {
                *entry *= factor;
            }
        }
    }

    /// Adds a scaled identity: `A ← A + scalar·I`.
    pub fn add_identity(&mut self, scalar: Real) {
        for d in &mut self.diag {
            *d += scalar;
        }
    }
}
