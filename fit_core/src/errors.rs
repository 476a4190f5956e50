//! # Error Types
//!
//! Structured error types for fit_core. Errors carry enough context to be
//! handled programmatically, not just printed.
//!
//! Two classes of outcome exist in this crate and only one of them is an
//! error. Expected engineering verdicts (interference fit, insufficient
//! engagement, dimension mismatch) are returned as data in the result types
//! so callers can branch on them. `FitError` is reserved for validation
//! failures: malformed geometry, non-positive engagement lengths, unknown
//! base materials. Those must fail loudly, because a silent default would
//! fabricate a safety margin that does not exist.
//!
//! ## Example
//!
//! ```rust
//! use fit_core::errors::{FitError, FitResult};
//! use rust_decimal::Decimal;
//! use rust_decimal_macros::dec;
//!
//! fn validate_pitch(pitch_mm: Decimal) -> FitResult<()> {
//!     if pitch_mm <= dec!(0) {
//!         return Err(FitError::invalid_input(
//!             "pitch_mm",
//!             pitch_mm.to_string(),
//!             "Pitch must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for fit_core operations
pub type FitResult<T> = Result<T, FitError>;

/// Structured error type for validation and lookup failures.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum FitError {
    /// An input value is invalid (out of range, malformed bounds, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field or parameter is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Base material has no strength data. This is a hard lookup: strength
    /// results depend entirely on it, so there is no conservative default.
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// Calculation could not be completed
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },
}

impl FitError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        FitError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        FitError::MissingField {
            field: field.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        FitError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(
        calculation_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        FitError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            FitError::InvalidInput { .. } => "INVALID_INPUT",
            FitError::MissingField { .. } => "MISSING_FIELD",
            FitError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            FitError::CalculationFailed { .. } => "CALCULATION_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = FitError::invalid_input("pitch_mm", "-0.8", "Pitch must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: FitError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(FitError::missing_field("installation").error_code(), "MISSING_FIELD");
        assert_eq!(
            FitError::material_not_found("unobtainium").error_code(),
            "MATERIAL_NOT_FOUND"
        );
    }

    #[test]
    fn test_error_display() {
        let error = FitError::material_not_found("unobtainium");
        assert_eq!(error.to_string(), "Material not found: unobtainium");
    }
}
