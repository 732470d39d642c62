//! # Validation Module
//!
//! Client-side input checks for Stockroom.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Add form (THIS MODULE)                                       │
//! │  ├── All four fields present and non-empty                             │
//! │  ├── Quantity has leading digits (sign is NOT checked)                 │
//! │  └── Fails fast: no request is built                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Edit modal (THIS MODULE)                                     │
//! │  └── Quantity has leading digits (sign is NOT checked)                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  └── Business rules; rejections come back as ServerError               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::validation::validate_draft;
//! use stockroom_core::DraftForm;
//!
//! let draft = DraftForm::new(" Widget ", "W1", "5", "desc");
//! let body = validate_draft(&draft).unwrap();
//! assert_eq!(body.name, "Widget");
//! assert_eq!(body.quantity, 5);
//! ```

use crate::error::ValidationError;
use crate::types::{DraftForm, NewProduct};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Parsing
// =============================================================================

/// Parses quantity text the way a form's integer field reads it.
///
/// Surrounding whitespace is ignored, an optional sign is accepted, and the
/// leading run of digits is taken ("3.5" is 3, "12abc" is 12). Text with no
/// leading digits, or a value outside `i64`, is rejected. The sign is not
/// checked here.
pub fn parse_quantity(text: &str) -> ValidationResult<i64> {
    let trimmed = text.trim();
    let not_a_number = || ValidationError::NotANumber {
        field: "quantity".to_string(),
        value: trimmed.to_string(),
    };

    let unsigned = trimmed.strip_prefix(&['+', '-'][..]).unwrap_or(trimmed);
    let sign_len = trimmed.len() - unsigned.len();
    let digits_len = unsigned
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits_len == 0 {
        return Err(not_a_number());
    }

    trimmed[..sign_len + digits_len]
        .parse::<i64>()
        .map_err(|_| not_a_number())
}

// =============================================================================
// Draft Validation
// =============================================================================

/// Normalizes an add-form draft into a create request body.
///
/// ## Rules
/// - name, sku, quantity, description must be non-empty after trimming
/// - quantity must start with digits (see [`parse_quantity`])
/// - the sign is left to the backend
///
/// ## Returns
/// The trimmed, parsed [`NewProduct`], or the first failing rule.
pub fn validate_draft(draft: &DraftForm) -> ValidationResult<NewProduct> {
    let fields = [
        ("name", draft.name.trim()),
        ("sku", draft.sku.trim()),
        ("quantity", draft.quantity.trim()),
        ("description", draft.description.trim()),
    ];

    let missing: Vec<String> = fields
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(ValidationError::IncompleteDraft { missing });
    }

    let quantity = parse_quantity(&draft.quantity)?;

    Ok(NewProduct {
        name: draft.name.trim().to_string(),
        sku: draft.sku.trim().to_string(),
        quantity,
        description: draft.description.trim().to_string(),
    })
}

// =============================================================================
// Search Term
// =============================================================================

/// Normalizes a search term into the lowercase needle used for matching.
pub fn normalize_search(term: &str) -> String {
    term.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_draft_is_trimmed_and_parsed() {
        let draft = DraftForm::new("  Widget", "W1  ", " 5 ", " desc ");
        let body = validate_draft(&draft).unwrap();
        assert_eq!(
            body,
            NewProduct {
                name: "Widget".to_string(),
                sku: "W1".to_string(),
                quantity: 5,
                description: "desc".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_fields_are_listed() {
        let draft = DraftForm::new("Widget", "   ", "", "desc");
        match validate_draft(&draft) {
            Err(ValidationError::IncompleteDraft { missing }) => {
                assert_eq!(missing, vec!["sku".to_string(), "quantity".to_string()]);
            }
            other => panic!("expected IncompleteDraft, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_quantity_rejected() {
        let draft = DraftForm::new("Widget", "W1", "five", "desc");
        assert!(matches!(
            validate_draft(&draft),
            Err(ValidationError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_negative_quantity_passed_through_on_create() {
        let draft = DraftForm::new("Widget", "W1", "-1", "desc");
        assert_eq!(validate_draft(&draft).unwrap().quantity, -1);
    }

    #[test]
    fn test_fractional_quantity_truncated_on_create() {
        let draft = DraftForm::new("Widget", "W1", "3.5", "desc");
        assert_eq!(validate_draft(&draft).unwrap().quantity, 3);
    }

    #[test]
    fn test_zero_quantity_allowed() {
        let draft = DraftForm::new("Widget", "W1", "0", "desc");
        assert_eq!(validate_draft(&draft).unwrap().quantity, 0);
    }

    #[test]
    fn test_parse_quantity_takes_leading_integer() {
        assert_eq!(parse_quantity("-3").unwrap(), -3);
        assert_eq!(parse_quantity("+7").unwrap(), 7);
        assert_eq!(parse_quantity(" 3.5 ").unwrap(), 3);
        assert_eq!(parse_quantity("12abc").unwrap(), 12);
        assert_eq!(parse_quantity("-0").unwrap(), 0);
    }

    #[test]
    fn test_parse_quantity_requires_leading_digits() {
        for text in ["", "   ", "-", "+", "abc", ".5", "- 3", "99999999999999999999"] {
            assert!(
                matches!(parse_quantity(text), Err(ValidationError::NotANumber { .. })),
                "accepted {text:?}"
            );
        }
    }

    #[test]
    fn test_normalize_search() {
        assert_eq!(normalize_search("  WiDget "), "widget");
        assert_eq!(normalize_search(""), "");
    }
}
