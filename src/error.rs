// src/error.rs
//! Unified error handling for LED-Core
//!
//! Every fallible constructor and operation in the crate returns [`LedResult`].
//! Running out of samples is not an error: finite generators report it through
//! their end-of-signal marker and absent samples.

use crate::simulation::Recording;
use std::path::PathBuf;
use thiserror::Error;

/// Result type used across the crate
pub type LedResult<T> = Result<T, LedError>;

/// Unified error type for generators, models, aggregators and the driver
#[derive(Error, Debug)]
pub enum LedError {
    /// Bad construction parameter or input value
    #[error("Invalid {field}: {reason}")]
    Validation {
        /// Parameter or input that was rejected
        field: String,
        /// What was wrong with it
        reason: String,
    },

    /// Referenced file does not exist or is not a regular file
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Morse text contains characters with no symbol mapping
    #[error("{count} character(s) cannot be encoded as Morse code")]
    UnmappableInput {
        /// Characters without a mapping
        count: usize,
    },

    /// Driver or project configuration that cannot run
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Every problem found while validating a signal set
    #[error("Signal set {source_name} is invalid:\n{}", .problems.join("\n"))]
    SignalSet {
        /// File or origin of the signal set
        source_name: String,
        /// One entry per problem, in signal-set order
        problems: Vec<String>,
    },

    /// Syntax error in a TOML or JSON document
    #[error("Failed to parse {source_name}: {reason}")]
    Parse {
        /// Document that failed to parse
        source_name: String,
        /// Parser message
        reason: String,
    },

    /// A driver run failed part-way; carries everything recorded before the failure
    #[error("Simulation interrupted after {tick} tick(s): {source}")]
    Interrupted {
        /// Ticks completed by the run before it failed
        tick: usize,
        /// Why the tick failed
        source: Box<LedError>,
        /// Everything recorded, including entries the run was extending
        recording: Box<Recording>,
    },

    /// Underlying I/O failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LedError {
    /// Shorthand for a [`LedError::Validation`]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        LedError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Problems carried by this error, one entry per problem
    pub fn problems(&self) -> Vec<String> {
        match self {
            LedError::SignalSet { problems, .. } => problems.clone(),
            other => vec![other.to_string()],
        }
    }

    /// The recording saved by an interrupted run, if any
    pub fn into_recording(self) -> Option<Recording> {
        match self {
            LedError::Interrupted { recording, .. } => Some(*recording),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = LedError::validation("length", "must be a positive integer, 0 is invalid");
        assert_eq!(err.to_string(), "Invalid length: must be a positive integer, 0 is invalid");
    }

    #[test]
    fn test_signal_set_lists_every_problem() {
        let err = LedError::SignalSet {
            source_name: "signals.json".to_string(),
            problems: vec!["first".to_string(), "second".to_string()],
        };
        let text = err.to_string();
        assert!(text.contains("signals.json"));
        assert!(text.ends_with("first\nsecond"));
        assert_eq!(err.problems().len(), 2);
    }

    #[test]
    fn test_interrupted_keeps_recording() {
        let err = LedError::Interrupted {
            tick: 2,
            source: Box::new(LedError::validation("value", "must be a finite numeric value, inf is invalid")),
            recording: Box::new(Recording::new()),
        };
        assert!(err.to_string().starts_with("Simulation interrupted after 2 tick(s): Invalid value"));
        assert_eq!(err.into_recording(), Some(Recording::new()));
        assert_eq!(LedError::Configuration("x".to_string()).into_recording(), None);
    }

    #[test]
    fn test_single_error_problems() {
        let err = LedError::UnmappableInput { count: 3 };
        assert_eq!(err.problems(), vec![err.to_string()]);
    }
}
