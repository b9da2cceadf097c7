// src/utils/validation.rs
//! Construction-time checks shared by generators, models and the aggregator

use crate::error::{LedError, LedResult};
use std::path::Path;

/// Ensure a geometry value is a positive integer
pub fn validate_positive_length(field: &str, value: usize) -> LedResult<usize> {
    if value == 0 {
        return Err(LedError::validation(
            field,
            format!("must be a positive integer, {} is invalid", value),
        ));
    }
    Ok(value)
}

/// Reject NaN and infinite samples; absent samples are handled by the caller
///
/// JSON has no spelling for infinity, so an infinite sample would come back
/// from an export as `null`.
pub fn validate_numeric(field: &str, value: f64) -> LedResult<f64> {
    if !value.is_finite() {
        return Err(LedError::validation(
            field,
            format!("must be a finite numeric value, {} is invalid", value),
        ));
    }
    Ok(value)
}

/// Validate every present value in a slice of optional samples
pub fn validate_optional_values(field: &str, values: &[Option<f64>]) -> LedResult<()> {
    for (index, value) in values.iter().enumerate() {
        if let Some(value) = value {
            validate_numeric(&format!("{}[{}]", field, index), *value)?;
        }
    }
    Ok(())
}

/// Ensure a path names an existing regular file
pub fn require_regular_file(path: &Path) -> LedResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(LedError::NotFound(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_length() {
        assert_eq!(validate_positive_length("length", 5).unwrap(), 5);
        assert!(matches!(
            validate_positive_length("length", 0),
            Err(LedError::Validation { .. })
        ));
    }

    #[test]
    fn test_numeric() {
        assert!(validate_numeric("value", -3.5).is_ok());
        assert!(validate_numeric("value", f64::MAX).is_ok());
        assert!(validate_numeric("value", f64::NAN).is_err());
        assert!(validate_numeric("value", f64::INFINITY).is_err());
        assert!(validate_numeric("value", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_optional_values_reports_index() {
        let err = validate_optional_values("values", &[Some(1.0), None, Some(f64::NAN)]).unwrap_err();
        assert!(err.to_string().contains("values[2]"));
    }

    #[test]
    fn test_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(require_regular_file(dir.path()), Err(LedError::NotFound(_))));

        let file = dir.path().join("signal.json");
        std::fs::write(&file, "[]").unwrap();
        assert!(require_regular_file(&file).is_ok());
    }
}
