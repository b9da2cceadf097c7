// src/models/quarter_wave.rs
//! Quarter-wave antenna: a lossless line with an open end

use super::{scalar_sample, DisplayModel, Frame, InputKind};
use crate::error::LedResult;
use crate::simulation::Sample;
use crate::utils::validation::{validate_numeric, validate_positive_length};
use tracing::debug;

/// Current travelling along a line of lights with a reflection at the far end
///
/// Forward current moves one pixel toward the far end per tick. Whatever falls
/// off the far end re-enters as backward current moving toward the near end.
/// The observable current is `forward - backward`, so an impulse comes back
/// inverted after `length` ticks and leaves the line after `2 * length`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuarterWave {
    length: usize,
    current_forward: Vec<f64>,
    current_backward: Vec<f64>,
}

impl QuarterWave {
    /// Antenna of `length` pixels with no current on it
    pub fn new(length: usize) -> LedResult<Self> {
        let length = validate_positive_length("length", length)?;
        debug!(length, "created quarter-wave model");
        Ok(Self {
            length,
            current_forward: vec![0.0; length],
            current_backward: vec![0.0; length],
        })
    }

    /// Feed current into the near end; an absent value counts as zero
    pub fn input(&mut self, value: Option<f64>) -> LedResult<()> {
        let value = match value {
            Some(v) => validate_numeric("value", v)?,
            None => 0.0,
        };

        let last = self.length - 1;
        let reflected = self.current_forward[last];

        self.current_forward.copy_within(..last, 1);
        self.current_forward[0] = value;

        self.current_backward.copy_within(1.., 0);
        self.current_backward[last] = reflected;

        Ok(())
    }

    /// Total current at each pixel
    pub fn current(&self) -> Vec<f64> {
        self.current_forward
            .iter()
            .zip(&self.current_backward)
            .map(|(forward, backward)| forward - backward)
            .collect()
    }

    /// Current travelling away from the feed point
    pub fn current_forward(&self) -> &[f64] {
        &self.current_forward
    }

    /// Current reflected back from the open end
    pub fn current_backward(&self) -> &[f64] {
        &self.current_backward
    }
}

impl DisplayModel for QuarterWave {
    fn length(&self) -> usize {
        self.length
    }

    fn input_kind(&self) -> InputKind {
        InputKind::Scalar
    }

    fn ingest(&mut self, sample: &Sample) -> LedResult<()> {
        let value = scalar_sample("QuarterWave", sample)?;
        self.input(value)
    }

    fn snapshot(&self) -> Frame {
        Frame::from_reals(&self.current())
    }
}
