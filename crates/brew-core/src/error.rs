//! # Error Types
//!
//! Domain-specific error types for brew-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  brew-core errors (this file)                                          │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  brew-terminal errors (separate crate)                                 │
//! │  └── TerminalError    - Auth, network, API failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → TerminalError → caller/UI         │
//! │                                                                         │
//! │  No category is fatal: every error is recoverable at the retry level;  │
//! │  the engine never crashes the host application.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (rule id, limits, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-facing messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The cart has no line items where at least one is required
    /// (e.g. processing a transaction).
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart has exceeded maximum allowed rows.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Row quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when input doesn't meet requirements. Used for early
/// validation before business logic runs.
#[derive(Debug, Error)]
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

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative (zero allowed).
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g. malformed reference number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
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
        assert_eq!(CoreError::EmptyCart.to_string(), "Cart is empty");

        let err = CoreError::CartTooLarge { max: 100 };
        assert_eq!(err.to_string(), "Cart cannot have more than 100 items");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "gcashReference".to_string(),
        };
        assert_eq!(err.to_string(), "gcashReference is required");

        let err = ValidationError::Negative {
            field: "unitPrice".to_string(),
        };
        assert_eq!(err.to_string(), "unitPrice must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "value".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
