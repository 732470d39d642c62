//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── CoreError        - Edit session / lookup failures                 │
//! │  └── ValidationError  - Client-side input checks                       │
//! │                                                                         │
//! │  stockroom-sync errors (separate crate)                                │
//! │  └── SyncError        - Network, server and config failures            │
//! │                                                                         │
//! │  stockroom-console errors (app)                                        │
//! │  └── AppError         - What the rendering layer sees                  │
//! │                                                                         │
//! │  Flow: ValidationError → SyncError / CoreError → AppError              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core inventory logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product is not present in the local store.
    ///
    /// ## When This Occurs
    /// - Opening an edit for an id the last fetch did not return
    /// - The product was deleted by another client since the last fetch
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// An edit operation arrived while no edit session is open.
    #[error("No edit session is open")]
    NoActiveEdit,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These never reach the network: they are raised before a request is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The add form is missing one or more required fields.
    ///
    /// `missing` lists the offending field names in form order.
    #[error("Please fill in all fields (Name, SKU, Quantity, Description).")]
    IncompleteDraft { missing: Vec<String> },

    /// A numeric field has no leading digits.
    #[error("{field} must be a whole number, got '{value}'")]
    NotANumber { field: String, value: String },

    /// A selector (field name, bucket) was not recognized.
    #[error("Unknown {field}: '{value}'")]
    UnknownOption { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_draft_message() {
        let err = ValidationError::IncompleteDraft {
            missing: vec!["sku".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Please fill in all fields (Name, SKU, Quantity, Description)."
        );
    }

    #[test]
    fn test_not_a_number_message() {
        let err = ValidationError::NotANumber {
            field: "quantity".to_string(),
            value: "ten".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be a whole number, got 'ten'");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::NotANumber {
            field: "quantity".to_string(),
            value: "ten".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
