// src/models/gauges.rs
//! Several independent gauges sharing one string of lights

use super::{DisplayModel, Frame, InputKind};
use crate::config::constants::models::{GAUGE_BORDER_PIXELS, MIN_PIXELS_PER_GAUGE};
use crate::error::{LedError, LedResult};
use crate::simulation::Sample;
use crate::utils::validation::{validate_optional_values, validate_positive_length};
use tracing::debug;

/// Equal-width gauge bands laid out one after another
///
/// Each band is `length / gauges` pixels wide: a zero border pixel on each
/// side of `length / gauges - 2` interior pixels showing the gauge value.
/// Pixels left over after the last band stay zero. A gauge value of `None`
/// means the channel has no data, which is not the same as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Gauges {
    length: usize,
    values: Vec<Option<f64>>,
}

impl Gauges {
    /// Split `length` pixels into `gauges` bands of at least three pixels
    pub fn new(length: usize, gauges: usize) -> LedResult<Self> {
        let length = validate_positive_length("length", length)?;
        let max_gauges = length / MIN_PIXELS_PER_GAUGE;
        if gauges == 0 {
            return Err(LedError::validation(
                "gauges",
                format!("must be a positive integer, {} is invalid", gauges),
            ));
        }
        if gauges > max_gauges {
            return Err(LedError::validation(
                "gauges",
                format!(
                    "cannot be greater than one-third of the length ({} in this case), {} is invalid",
                    max_gauges, gauges
                ),
            ));
        }

        debug!(length, gauges, "created gauges model");
        Ok(Self {
            length,
            values: vec![Some(0.0); gauges],
        })
    }

    /// Replace every gauge value at once
    ///
    /// Values are copied positionally; gauges beyond the supplied values are
    /// reset to zero and extra values are ignored. `None` resets every gauge.
    pub fn inputs(&mut self, values: Option<&[Option<f64>]>) -> LedResult<()> {
        let Some(values) = values else {
            self.values.fill(Some(0.0));
            return Ok(());
        };
        validate_optional_values("values", values)?;

        let supplied = values.len().min(self.values.len());
        self.values[..supplied].copy_from_slice(&values[..supplied]);
        self.values[supplied..].fill(Some(0.0));
        Ok(())
    }

    /// Current value of every gauge
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Number of gauge bands
    pub fn gauge_count(&self) -> usize {
        self.values.len()
    }

    /// Interior pixels per gauge band
    pub fn pixels_per_gauge(&self) -> usize {
        self.length / self.values.len() - GAUGE_BORDER_PIXELS
    }

    /// Render every gauge band onto a buffer of `length` pixels
    pub fn compute_frame(&self) -> Vec<Option<f64>> {
        let pixels = self.pixels_per_gauge();
        let mut frame = Vec::with_capacity(self.length);

        for value in &self.values {
            frame.push(Some(0.0));
            frame.extend(std::iter::repeat(*value).take(pixels));
            frame.push(Some(0.0));
        }
        frame.resize(self.length, Some(0.0));
        frame
    }

    /// Inclusive first and last interior pixel of each gauge
    pub fn gauge_locations(&self) -> Vec<(usize, usize)> {
        let pixels = self.pixels_per_gauge();
        let band = pixels + GAUGE_BORDER_PIXELS;
        (0..self.values.len())
            .map(|gauge| {
                let start = gauge * band + 1;
                (start, start + pixels - 1)
            })
            .collect()
    }
}

impl DisplayModel for Gauges {
    fn length(&self) -> usize {
        self.length
    }

    fn input_kind(&self) -> InputKind {
        InputKind::Vector
    }

    fn ingest(&mut self, sample: &Sample) -> LedResult<()> {
        match sample {
            Sample::Vector(values) => self.inputs(Some(values.as_slice())),
            Sample::Scalar(Some(value)) => {
                let single = [Some(*value)];
                self.inputs(Some(&single[..]))
            }
            Sample::Scalar(None) => self.inputs(None),
        }
    }

    fn snapshot(&self) -> Frame {
        Frame::new(self.compute_frame())
    }
}
