// src/models/mod.rs
//! Spatial display models for a string of addressable lights
//!
//! A model owns a fixed-length buffer, takes one sample per tick and exposes
//! a [`Frame`] snapshot of exactly `length` pixels.

pub mod frame;
pub mod quarter_wave;
pub mod scrolling;
pub mod gauges;

pub use frame::Frame;
pub use quarter_wave::QuarterWave;
pub use scrolling::{ScrollDirection, ScrollingWindow};
pub use gauges::Gauges;

use crate::error::{LedError, LedResult};
use crate::simulation::Sample;

/// Shape of the sample a model takes each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// One value per tick, fed through `input`
    Scalar,
    /// One value per channel per tick, fed through `inputs`
    Vector,
}

/// Common contract for every display model
pub trait DisplayModel {
    /// Number of pixels
    fn length(&self) -> usize;

    /// Shape of sample the model accepts
    fn input_kind(&self) -> InputKind;

    /// Update the model with one tick's sample
    fn ingest(&mut self, sample: &Sample) -> LedResult<()>;

    /// Copy of the current frame, safe to hold while the model keeps mutating
    fn snapshot(&self) -> Frame;
}

/// Unwrap the scalar carried by a sample for a scalar-only model
pub(crate) fn scalar_sample(model: &str, sample: &Sample) -> LedResult<Option<f64>> {
    match sample {
        Sample::Scalar(value) => Ok(*value),
        Sample::Vector(values) => Err(LedError::validation(
            "sample",
            format!("{} takes one value per tick, got a vector of {}", model, values.len()),
        )),
    }
}

impl<M: DisplayModel + ?Sized> DisplayModel for Box<M> {
    fn length(&self) -> usize {
        (**self).length()
    }

    fn input_kind(&self) -> InputKind {
        (**self).input_kind()
    }

    fn ingest(&mut self, sample: &Sample) -> LedResult<()> {
        (**self).ingest(sample)
    }

    fn snapshot(&self) -> Frame {
        (**self).snapshot()
    }
}
