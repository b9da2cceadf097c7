// src/simulation/recording.rs
//! Time series and frame sequence accumulated over one or more runs

use crate::error::{LedError, LedResult};
use crate::models::Frame;
use serde::{Deserialize, Serialize};

/// Value fed into a model during one tick
///
/// Serializes as a bare number (or `null`) for scalar sources and as a list
/// for vector sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sample {
    /// One value, or none
    Scalar(Option<f64>),
    /// One value per aggregated channel
    Vector(Vec<Option<f64>>),
}

impl Sample {
    /// The value of a present scalar sample
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Sample::Scalar(value) => *value,
            Sample::Vector(_) => None,
        }
    }

    /// Channel values of a vector sample
    pub fn as_vector(&self) -> Option<&[Option<f64>]> {
        match self {
            Sample::Scalar(_) => None,
            Sample::Vector(values) => Some(values),
        }
    }
}

impl From<f64> for Sample {
    fn from(value: f64) -> Self {
        Sample::Scalar(Some(value))
    }
}

/// Everything a driver recorded: one sample and one frame per tick
///
/// Pass a recording back into the driver to extend it with another phase,
/// e.g. a waveform followed by silence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    time_series: Vec<Sample>,
    frames: Vec<Frame>,
}

impl Recording {
    /// Empty recording
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a recording from its parts; both must have one entry per tick
    pub fn from_parts(time_series: Vec<Sample>, frames: Vec<Frame>) -> LedResult<Self> {
        if time_series.len() != frames.len() {
            return Err(LedError::validation(
                "recording",
                format!(
                    "time series has {} entries but frame sequence has {}",
                    time_series.len(),
                    frames.len()
                ),
            ));
        }
        Ok(Self { time_series, frames })
    }

    pub(crate) fn push(&mut self, sample: Sample, frame: Frame) {
        self.time_series.push(sample);
        self.frames.push(frame);
    }

    /// Number of ticks recorded
    pub fn len(&self) -> usize {
        self.time_series.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.time_series.is_empty()
    }

    /// Sample fed to the model at each tick
    pub fn time_series(&self) -> &[Sample] {
        &self.time_series
    }

    /// Frame shown after each tick
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Split into time series and frames
    pub fn into_parts(self) -> (Vec<Sample>, Vec<Frame>) {
        (self.time_series, self.frames)
    }
}
