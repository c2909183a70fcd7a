//! # Error Types
//!
//! Domain-specific error types for inventory-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  inventory-core errors (this file)                                     │
//! │  └── ValidationError  - Unusable form input, malformed addresses       │
//! │                                                                         │
//! │  inventory-db errors (separate crate)                                  │
//! │  └── DbError          - Storage failures (wraps ValidationError)       │
//! │                                                                         │
//! │  Flow: ValidationError → DbError → caller shows a failure notice       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A blank form is NOT an error. It is reported as a "nothing to save"
//! outcome by the store.

use thiserror::Error;

/// Input validation errors.
///
/// These errors occur when caller input cannot be turned into a record
/// without guessing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Text that must be numeric could not be parsed.
    ///
    /// ## When This Occurs
    /// - Price text such as `"abc"` or `"1.2.3"`
    /// - Quantity text such as `"ten"` or `"2.5"`
    /// - Non-finite prices (`"NaN"`, `"inf"`)
    #[error("{field} is not a valid number: '{value}'")]
    NotANumber { field: String, value: String },

    /// Invalid format (e.g., an address that is not an inventory URI).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates a NotANumber error for a field and the offending text.
    pub fn not_a_number(field: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationError::NotANumber {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::not_a_number("price", "abc");
        assert_eq!(err.to_string(), "price is not a valid number: 'abc'");

        let err = ValidationError::InvalidFormat {
            field: "uri".to_string(),
            reason: "unknown path 'pets'".to_string(),
        };
        assert_eq!(err.to_string(), "uri has invalid format: unknown path 'pets'");
    }
}
