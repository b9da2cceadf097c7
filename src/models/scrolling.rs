// src/models/scrolling.rs
//! Scrolling window over an incoming series of values

use super::{scalar_sample, DisplayModel, Frame, InputKind};
use crate::config::constants::models::DEFAULT_DIRECTION;
use crate::error::{LedError, LedResult};
use crate::simulation::Sample;
use crate::utils::validation::{validate_numeric, validate_positive_length};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Direction in which a [`ScrollingWindow`] moves its contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    /// New values enter at the tail and move toward the head
    Left,
    /// New values enter at the head and move toward the tail
    Right,
    /// New values enter at the input origin and spread outward
    Both,
}

impl FromStr for ScrollDirection {
    type Err = LedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(ScrollDirection::Left),
            "right" => Ok(ScrollDirection::Right),
            "both" => Ok(ScrollDirection::Both),
            _ => Err(LedError::validation(
                "direction",
                format!("must be either \"left\", \"right\" or \"both\", \"{}\" is invalid", s),
            )),
        }
    }
}

impl fmt::Display for ScrollDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScrollDirection::Left => "left",
            ScrollDirection::Right => "right",
            ScrollDirection::Both => "both",
        };
        f.write_str(name)
    }
}

/// Fixed-length window that scrolls by one pixel per tick
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollingWindow {
    length: usize,
    direction: ScrollDirection,
    input_origin: Option<usize>,
    frame: Vec<f64>,
}

impl ScrollingWindow {
    /// Create a window from a direction name (case-insensitive, defaults to left)
    ///
    /// `input_origin` is only consulted when the direction is "both"; it
    /// defaults to the middle of the window.
    pub fn new(length: usize, direction: Option<&str>, input_origin: Option<usize>) -> LedResult<Self> {
        let direction = direction.unwrap_or(DEFAULT_DIRECTION).parse()?;
        Self::with_direction(length, direction, input_origin)
    }

    /// Create a window with an already parsed direction
    pub fn with_direction(length: usize, direction: ScrollDirection, input_origin: Option<usize>) -> LedResult<Self> {
        let length = validate_positive_length("length", length)?;

        let input_origin = match direction {
            ScrollDirection::Both => {
                let origin = input_origin.unwrap_or(length / 2);
                if origin >= length {
                    return Err(LedError::validation(
                        "input_origin",
                        format!("must be between 0 and {}, {} is invalid", length - 1, origin),
                    ));
                }
                Some(origin)
            }
            _ => None,
        };

        debug!(length, %direction, ?input_origin, "created scrolling window");
        Ok(Self {
            length,
            direction,
            input_origin,
            frame: vec![0.0; length],
        })
    }

    /// Scroll one pixel and insert `value`; an absent value counts as zero
    pub fn input(&mut self, value: Option<f64>) -> LedResult<()> {
        let value = match value {
            Some(v) => validate_numeric("value", v)?,
            None => 0.0,
        };
        let last = self.length - 1;

        match (self.direction, self.input_origin) {
            (ScrollDirection::Left, _) => {
                self.frame.copy_within(1.., 0);
                self.frame[last] = value;
            }
            (ScrollDirection::Right, _) => {
                self.frame.copy_within(..last, 1);
                self.frame[0] = value;
            }
            (ScrollDirection::Both, origin) => {
                let origin = origin.unwrap_or(self.length / 2);
                // right half first: it only writes past the origin, so the
                // left half still reads pre-tick values
                self.frame.copy_within(origin..last, origin + 1);
                self.frame.copy_within(1..origin + 1, 0);
                self.frame[origin] = value;
            }
        }

        Ok(())
    }

    /// Pixel values
    pub fn frame(&self) -> &[f64] {
        &self.frame
    }

    /// Scrolling direction
    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    /// Insertion point, only set when scrolling in both directions
    pub fn input_origin(&self) -> Option<usize> {
        self.input_origin
    }
}

impl DisplayModel for ScrollingWindow {
    fn length(&self) -> usize {
        self.length
    }

    fn input_kind(&self) -> InputKind {
        InputKind::Scalar
    }

    fn ingest(&mut self, sample: &Sample) -> LedResult<()> {
        let value = scalar_sample("ScrollingWindow", sample)?;
        self.input(value)
    }

    fn snapshot(&self) -> Frame {
        Frame::from_reals(&self.frame)
    }
}
