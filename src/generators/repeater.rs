// src/generators/repeater.rs
//! Replay of a previously recorded signal

use super::{GeneratorState, SignalGenerator};
use crate::config::constants::generators::DEFAULT_SCALING_FACTOR;
use crate::error::{LedError, LedResult};
use crate::utils::validation::{require_regular_file, validate_numeric};
use serde_json::error::Category;
use std::path::Path;
use tracing::{debug, warn};

/// Finite generator that plays back a stored sequence of samples
///
/// Values are scaled first and, when `logarithmic` is set, compressed:
/// sequences with a non-positive minimum use `ln(x + 1 - min)`, strictly
/// positive ones use `log10(x)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalRepeater {
    values: Vec<f64>,
    scaling_factor: f64,
    logarithmic: bool,
    signal_minimum: f64,
    signal_maximum: f64,
    state: GeneratorState,
}

impl SignalRepeater {
    /// Load a flat JSON array of numbers
    pub fn from_file(path: impl AsRef<Path>, scaling_factor: Option<f64>, logarithmic: bool) -> LedResult<Self> {
        let path = path.as_ref();
        require_regular_file(path)?;

        let content = std::fs::read_to_string(path)?;
        let values: Vec<f64> = serde_json::from_str(&content).map_err(|e| match e.classify() {
            Category::Data => LedError::validation(
                "signal file",
                format!("{} must contain a flat JSON list of numbers: {}", path.display(), e),
            ),
            _ => LedError::Parse {
                source_name: path.display().to_string(),
                reason: e.to_string(),
            },
        })?;

        debug!(path = %path.display(), samples = values.len(), "loaded repeater signal");
        Self::from_values(values, scaling_factor, logarithmic)
    }

    /// Replay an in-memory sequence
    pub fn from_values(mut values: Vec<f64>, scaling_factor: Option<f64>, logarithmic: bool) -> LedResult<Self> {
        if values.is_empty() {
            return Err(LedError::validation("signal", "must contain at least one value"));
        }
        for (index, value) in values.iter().enumerate() {
            validate_numeric(&format!("signal[{}]", index), *value)?;
        }

        let scaling_factor = validate_numeric("scaling_factor", scaling_factor.unwrap_or(DEFAULT_SCALING_FACTOR))?;
        if scaling_factor == 0.0 {
            warn!("scaling factor of zero turns the replayed signal into all zeros");
        }
        if scaling_factor != 1.0 {
            values.iter_mut().for_each(|value| *value *= scaling_factor);
        }

        let (mut minimum, mut maximum) = bounds(&values);
        if logarithmic {
            if minimum <= 0.0 {
                let offset = 1.0 - minimum;
                values.iter_mut().for_each(|value| *value = (*value + offset).ln());
            } else {
                values.iter_mut().for_each(|value| *value = value.log10());
            }
            (minimum, maximum) = bounds(&values);
        }
        for (index, value) in values.iter().enumerate() {
            validate_numeric(&format!("processed signal[{}]", index), *value)?;
        }

        Ok(Self {
            values,
            scaling_factor,
            logarithmic,
            signal_minimum: minimum,
            signal_maximum: maximum,
            state: GeneratorState::new(),
        })
    }

    /// Samples in the stored sequence
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Never true, empty sequences are rejected
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Processed samples, in playback order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Factor applied to every stored value
    pub fn scaling_factor(&self) -> f64 {
        self.scaling_factor
    }

    /// Whether values were log-compressed
    pub fn logarithmic(&self) -> bool {
        self.logarithmic
    }

    /// Smallest processed value
    pub fn signal_minimum(&self) -> f64 {
        self.signal_minimum
    }

    /// Largest processed value
    pub fn signal_maximum(&self) -> f64 {
        self.signal_maximum
    }
}

fn bounds(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| (min.min(v), max.max(v)))
}

impl SignalGenerator for SignalRepeater {
    fn next_value(&mut self) -> Option<f64> {
        self.state.pull_from(&self.values)
    }

    fn current(&self) -> Option<f64> {
        self.state.current()
    }

    fn counter(&self) -> u64 {
        self.state.counter()
    }

    fn is_finite(&self) -> bool {
        true
    }

    fn end_of_signal(&self) -> bool {
        self.state.end_of_signal()
    }
}
