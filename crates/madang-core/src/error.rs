//! # Error Types
//!
//! Domain-specific error types for madang-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  madang-core errors (this file)                                        │
//! │  ├── CoreError        - Workflow rule violations                       │
//! │  └── ValidationError  - Operator input failures                        │
//! │                                                                         │
//! │  madang-db errors (separate crate)                                     │
//! │  └── DbError          - Database / bootstrap failures                  │
//! │                                                                         │
//! │  counter app errors                                                    │
//! │  └── ApiError         - What the operator sees (stable code + message) │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Terminal     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Workflow rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The name did not resolve to a customer and no address/phone were
    /// supplied, so no customer record can be created.
    ///
    /// ## User Workflow
    /// ```text
    /// Transaction entry: name = "손흥민"
    ///      │
    ///      ▼
    /// resolve → New { name }
    ///      │
    ///      ▼
    /// submit without address
    ///      │
    ///      ▼
    /// NewCustomerDetailsRequired { name: "손흥민" }
    ///      │
    ///      ▼
    /// UI asks for address and phone
    /// ```
    #[error("'{name}' is a new customer: address is required before ordering")]
    NewCustomerDetailsRequired { name: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any query runs, so they never leave partial state behind.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., price with a decimal point, bad book token).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid_format(field: &str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.into(),
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
        let err = CoreError::NewCustomerDetailsRequired {
            name: "손흥민".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "'손흥민' is a new customer: address is required before ordering"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("price").to_string(), "price is required");

        let err = ValidationError::invalid_format("price", "digits only");
        assert_eq!(err.to_string(), "price has invalid format: digits only");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("name").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
