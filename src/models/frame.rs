// src/models/frame.rs
//! Per-tick snapshot of a display model

use serde::{Deserialize, Serialize};

/// One value per pixel; `None` marks a pixel with no data
///
/// Serializes as a flat JSON list with `null` for missing values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frame(Vec<Option<f64>>);

impl Frame {
    /// Wrap per-pixel values
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self(values)
    }

    /// Build a frame where every pixel carries data
    pub fn from_reals(values: &[f64]) -> Self {
        Self(values.iter().copied().map(Some).collect())
    }

    /// Number of pixels
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the frame has no pixels
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Per-pixel values
    pub fn values(&self) -> &[Option<f64>] {
        &self.0
    }

    /// Value at a pixel, `None` when out of range or without data
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied().flatten()
    }

    /// Pixel values with missing data replaced by `fill`
    pub fn reals_or(&self, fill: f64) -> Vec<f64> {
        self.0.iter().map(|value| value.unwrap_or(fill)).collect()
    }

    /// Take the per-pixel values
    pub fn into_inner(self) -> Vec<Option<f64>> {
        self.0
    }
}

impl From<Vec<f64>> for Frame {
    fn from(values: Vec<f64>) -> Self {
        Self::from_reals(&values)
    }
}
