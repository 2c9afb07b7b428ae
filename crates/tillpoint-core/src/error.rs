//! # Error Types
//!
//! Domain-specific error types for tillpoint-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tillpoint-core errors (this file)                                     │
//! │  ├── ValidationError  - Request shape and field-level failures         │
//! │  ├── PricingError     - Price resolution and discount failures         │
//! │  └── MoneyError       - Decimal → minor-unit conversion failures       │
//! │                                                                         │
//! │  tillpoint-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  tillpoint-engine errors                                               │
//! │  └── SaleError        - Full commit-path taxonomy, wraps the above     │
//! │                                                                         │
//! │  Flow: ValidationError / PricingError → SaleError → HTTP status        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, line number, amounts)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Money Error
// =============================================================================

/// Decimal-to-minor-unit conversion failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Input was NaN or infinite.
    #[error("value is not a finite number")]
    NotFinite,

    /// Input magnitude exceeds the representable range.
    #[error("value is outside the representable range")]
    OutOfRange,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Sale-creation request validation failures.
///
/// These are resolved before any persistence access occurs. Item-level
/// variants carry the 1-indexed line number for error messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    MissingField { field: String },

    /// A value is not a member of a closed enumeration.
    #[error("'{value}' is not a valid {field}")]
    InvalidEnum { field: String, value: String },

    /// The items list is empty.
    #[error("sale must contain at least one item")]
    EmptyItems,

    /// Item quantity is missing, non-finite, or not greater than zero.
    #[error("item {line}: quantity must be a number greater than zero")]
    InvalidQuantity { line: usize },

    /// Item price override is non-finite or negative.
    #[error("item {line}: price must be a non-negative number")]
    InvalidPrice { line: usize },

    /// Discount is non-finite or negative.
    #[error("discount must be a non-negative number")]
    InvalidDiscount,
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Pricing Error
// =============================================================================

/// Pricing calculator failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// The resolved unit price (override or catalog) is not greater than zero.
    #[error("item {line}: resolved unit price must be greater than zero")]
    InvalidPrice { line: usize },

    /// The price × quantity product exceeds the representable amount range.
    #[error("item {line}: line total exceeds the representable amount range")]
    LineTotalOutOfRange { line: usize },

    /// The discount exceeds the sale subtotal.
    #[error("discount {discount} exceeds subtotal {subtotal}")]
    DiscountExceedsSubtotal { discount: Money, subtotal: Money },
}

/// Result type for pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MissingField {
            field: "attendantId".to_string(),
        };
        assert_eq!(err.to_string(), "attendantId is required");

        let err = ValidationError::InvalidQuantity { line: 2 };
        assert_eq!(
            err.to_string(),
            "item 2: quantity must be a number greater than zero"
        );

        let err = ValidationError::InvalidEnum {
            field: "paymentMethod".to_string(),
            value: "barter".to_string(),
        };
        assert_eq!(err.to_string(), "'barter' is not a valid paymentMethod");
    }

    #[test]
    fn test_pricing_error_messages() {
        let err = PricingError::DiscountExceedsSubtotal {
            discount: Money::from_cents(2000),
            subtotal: Money::from_cents(1998),
        };
        assert_eq!(err.to_string(), "discount $20.00 exceeds subtotal $19.98");
    }
}
