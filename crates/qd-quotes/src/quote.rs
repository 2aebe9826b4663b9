//! The [`Quote`] trait and its basic implementation.

use std::fmt::Debug;

use qd_core::{Error, Real, Result};

/// A single observable market value.
///
/// A quote may be temporarily empty, for instance before the first market
/// snapshot of the day. Consumers that cannot price without the value should
/// call [`Quote::valid_value`] and propagate the error.
pub trait Quote: Debug + Send + Sync {
    /// Returns the current value, or `None` if no value is available.
    fn value(&self) -> Option<Real>;

    /// Returns `true` if the quote holds a valid value.
    fn is_valid(&self) -> bool {
        self.value().is_some()
    }

    /// Returns the current value, or [`Error::NullValue`] if the quote
    /// is empty.
    fn valid_value(&self) -> Result<Real> {
        self.value().ok_or(Error::NullValue)
    }
}

// ── SimpleQuote ─────────────────────────────────────────────────────────────

/// Market element whose value is set directly.
///
/// This is the workhorse quote: equity spots, flat rates, volatilities and
/// spreads are all published to the pricing layer through `SimpleQuote`s
/// wrapped in `Arc<dyn Quote>`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleQuote {
    value: Option<Real>,
}

impl SimpleQuote {
    /// Creates a quote holding `value`.
    pub fn new(value: Real) -> Self {
        Self { value: Some(value) }
    }

    /// Creates an empty quote.
    pub fn empty() -> Self {
        Self { value: None }
    }

    /// Sets a new value and returns the previous one.
    pub fn set_value(&mut self, value: Option<Real>) -> Option<Real> {
        std::mem::replace(&mut self.value, value)
    }

    /// Resets the quote to the empty state.
    pub fn reset(&mut self) {
        self.value = None;
    }
}

impl Quote for SimpleQuote {
    fn value(&self) -> Option<Real> {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_quote_holds_value() {
        let q = SimpleQuote::new(100.0);
        assert!(q.is_valid());
        assert_eq!(q.value(), Some(100.0));
        assert_eq!(q.valid_value().unwrap(), 100.0);
    }

    #[test]
    fn empty_quote_is_invalid() {
        let q = SimpleQuote::empty();
        assert!(!q.is_valid());
        assert_eq!(q.value(), None);
        assert!(matches!(q.valid_value(), Err(Error::NullValue)));
    }

    #[test]
    fn set_value_returns_previous() {
        let mut q = SimpleQuote::new(0.03);
        let old = q.set_value(Some(0.035));
        assert_eq!(old, Some(0.03));
        assert_eq!(q.value(), Some(0.035));
    }

    #[test]
    fn reset_empties_the_quote() {
        let mut q = SimpleQuote::new(0.02);
        q.reset();
        assert!(!q.is_valid());
    }

    #[test]
    fn quote_works_behind_a_trait_object() {
        use std::sync::Arc;

        let q: Arc<dyn Quote> = Arc::new(SimpleQuote::new(21.3));
        assert_eq!(q.valid_value().unwrap(), 21.3);
    }
}
