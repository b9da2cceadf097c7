//! Common utility functions for LED-Core
//!
//! - Construction-time validation helpers
//! - Signal file path resolution

pub mod validation;
pub mod paths;

pub use validation::{
    validate_positive_length,
    validate_numeric,
    validate_optional_values,
    require_regular_file,
};

pub use paths::{resolve_signal_path, has_path_separator};
