//! Compounding conventions.

/// How interest is compounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compounding {
    /// Simple interest: `1 + r·t`
    Simple,
    /// Compounded interest: `(1 + r/f)^(f·t)`
    Compounded,
    /// Continuously compounded: `e^(r·t)`
    Continuous,
    /// Simple interest **up to** the first coupon, compounded thereafter.
    SimpleThenCompounded,
}
