//! # Error Types
//!
//! Domain error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── CoreError        - Parsing of domain values                       │
//! │  └── ValidationError  - Data-entry validation failures                 │
//! │                                                                         │
//! │  stockroom-report errors (separate crate)                              │
//! │  └── ReportError      - Config, snapshot and I/O failures              │
//! │                                                                         │
//! │  The aggregators themselves never fail: they take slices and return   │
//! │  values, and bad numbers flow through arithmetically.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised when turning raw input into domain values.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A transaction type other than `purchase` or `sale`.
    #[error("Unknown transaction type: '{0}' (expected purchase or sale)")]
    UnknownTransactionKind(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation failures for records entered or imported by users.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnknownTransactionKind("refund".to_string());
        assert_eq!(
            err.to_string(),
            "Unknown transaction type: 'refund' (expected purchase or sale)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("title").to_string(), "title is required");

        let err = ValidationError::Negative {
            field: "unitPrice".to_string(),
        };
        assert_eq!(err.to_string(), "unitPrice must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("name").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
