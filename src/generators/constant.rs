// src/generators/constant.rs
//! A "signal" that never changes

use super::{GeneratorState, SignalGenerator};
use crate::config::constants::generators::DEFAULT_CONSTANT_VALUE;
use crate::error::LedResult;
use crate::utils::validation::validate_numeric;

/// Generator that returns the same value on every pull
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    value: f64,
    state: GeneratorState,
}

impl Constant {
    /// Create a constant generator, defaulting to zero
    pub fn new(value: Option<f64>) -> LedResult<Self> {
        let value = validate_numeric("value", value.unwrap_or(DEFAULT_CONSTANT_VALUE))?;
        Ok(Self {
            value,
            state: GeneratorState::new(),
        })
    }

    /// A generator that feeds silence into a model
    pub fn zero() -> Self {
        Self {
            value: DEFAULT_CONSTANT_VALUE,
            state: GeneratorState::new(),
        }
    }

    /// Value returned on every pull
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl Default for Constant {
    fn default() -> Self {
        Self::zero()
    }
}

impl SignalGenerator for Constant {
    fn next_value(&mut self) -> Option<f64> {
        self.state.record(Some(self.value))
    }

    fn current(&self) -> Option<f64> {
        self.state.current()
    }

    fn counter(&self) -> u64 {
        self.state.counter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        let mut generator = Constant::default();
        assert_eq!(generator.current(), None);
        assert_eq!(generator.next_value(), Some(0.0));
    }

    #[test]
    fn test_repeats_value() {
        let mut generator = Constant::new(Some(-4.0)).unwrap();
        for tick in 1..=5 {
            assert_eq!(generator.next_value(), Some(-4.0));
            assert_eq!(generator.counter(), tick);
        }
        assert!(!generator.end_of_signal());
        assert!(!generator.is_finite());
    }

    #[test]
    fn test_non_finite_value_rejected() {
        use crate::error::LedError;

        assert!(matches!(
            Constant::new(Some(f64::NAN)),
            Err(LedError::Validation { field, .. }) if field == "value"
        ));
        assert!(Constant::new(Some(f64::INFINITY)).is_err());
        assert_eq!(Constant::new(None).unwrap().value(), 0.0);
    }
}
