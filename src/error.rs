// src/error.rs
use thiserror::Error;

/// Errors raised by the simulation engine.
///
/// Every variant is produced while validating inputs, before any path is
/// simulated. Numerical blow-up inside an exponential update is not an error:
/// it shows up as non-finite values in the returned table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SdeError {
    /// A scalar parameter is outside its admissible range
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameter {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Two inputs that must describe the same grid disagree in length
    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },
}

/// Result type alias for sde-paths operations
pub type SdeResult<T> = Result<T, SdeError>;

/// Validation utilities
pub mod validation {
    use super::{SdeError, SdeResult};

    /// Validate that a parameter is finite and strictly positive
    pub fn validate_positive(name: &str, value: f64) -> SdeResult<()> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(SdeError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be positive and finite (> 0)".to_string(),
            })
        }
    }

    /// Validate that a parameter is finite and non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> SdeResult<()> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(SdeError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative and finite (≥ 0)".to_string(),
            })
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> SdeResult<()> {
        if !value.is_finite() {
            Err(SdeError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate a step or path count
    pub fn validate_count(name: &str, count: usize) -> SdeResult<()> {
        if count == 0 {
            Err(SdeError::InvalidParameter {
                parameter: name.to_string(),
                value: 0.0,
                constraint: "must be at least 1".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that increments were sampled at the grid's step size
    pub fn validate_step_size(name: &str, expected: f64, actual: f64) -> SdeResult<()> {
        if (actual - expected).abs() <= 1e-12 * expected {
            Ok(())
        } else {
            Err(SdeError::InvalidParameter {
                parameter: name.to_string(),
                value: actual,
                constraint: format!("must match the grid step size {}", expected),
            })
        }
    }

    /// Validate that an input length matches what the grid expects
    pub fn validate_len(context: &str, expected: usize, actual: usize) -> SdeResult<()> {
        if expected != actual {
            Err(SdeError::DimensionMismatch {
                context: context.to_string(),
                expected,
                actual,
            })
        } else {
            Ok(())
        }
    }
}
