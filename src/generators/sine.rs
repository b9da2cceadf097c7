// src/generators/sine.rs
//! Digital sine wave source

use super::{GeneratorState, SignalGenerator};
use crate::config::constants::generators::{DEFAULT_AMPLITUDE, DEFAULT_PHASE, DEFAULT_WAVELENGTH};
use crate::error::{LedError, LedResult};
use crate::utils::validation::validate_numeric;
use std::f64::consts::PI;
use tracing::debug;

/// Sine wave sampled once per tick
///
/// The sample at tick `n` is `amplitude * sin(2π·n / wavelength + phase)`.
/// Wavelength is measured in samples and may be fractional, which produces
/// aperiodic sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct SineWave {
    wavelength: f64,
    amplitude: f64,
    phase: f64,
    state: GeneratorState,
}

impl SineWave {
    /// Create a sine wave; every parameter falls back to its default when absent
    pub fn new(wavelength: Option<f64>, amplitude: Option<f64>, phase: Option<f64>) -> LedResult<Self> {
        let wavelength = wavelength.unwrap_or(DEFAULT_WAVELENGTH);
        if !wavelength.is_finite() || wavelength <= 0.0 {
            return Err(LedError::validation(
                "wavelength",
                format!("must be a positive value, {} is invalid", wavelength),
            ));
        }

        let amplitude = validate_numeric("amplitude", amplitude.unwrap_or(DEFAULT_AMPLITUDE))?;
        let phase = validate_numeric("phase", phase.unwrap_or(DEFAULT_PHASE))?;
        debug!(wavelength, amplitude, phase, "created sine wave generator");

        Ok(Self {
            wavelength,
            amplitude,
            phase,
            state: GeneratorState::new(),
        })
    }

    /// Samples per period
    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    /// Peak value
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Phase offset in radians
    pub fn phase(&self) -> f64 {
        self.phase
    }
}

impl Default for SineWave {
    fn default() -> Self {
        Self {
            wavelength: DEFAULT_WAVELENGTH,
            amplitude: DEFAULT_AMPLITUDE,
            phase: DEFAULT_PHASE,
            state: GeneratorState::new(),
        }
    }
}

impl SignalGenerator for SineWave {
    fn next_value(&mut self) -> Option<f64> {
        let tick = self.state.counter() as f64;
        let value = self.amplitude * (2.0 * PI * tick / self.wavelength + self.phase).sin();
        self.state.record(Some(value))
    }

    fn current(&self) -> Option<f64> {
        self.state.current()
    }

    fn counter(&self) -> u64 {
        self.state.counter()
    }
}
