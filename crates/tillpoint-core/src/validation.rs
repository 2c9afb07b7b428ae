//! # Validation Module
//!
//! Sale-creation request validation for Tillpoint.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Serde (deserialization)                                      │
//! │  └── Shape and type checks on the raw JSON body                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Field-level constraints, enum membership, minor-unit conversion   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK constraints (quantity >= 0, totals >= 0)                    │
//! │  └── UNIQUE constraints (receipt_number)                               │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The validator is a pure function of its input: no side effects, no
//! persistence access. It produces a [`ValidatedSale`] whose quantities and
//! amounts are already in minor units, so nothing downstream touches floats.

use serde::Deserialize;

use crate::error::{ValidationError, ValidationResult};
use crate::money::{Money, Quantity};
use crate::types::PaymentMethod;

// =============================================================================
// Raw Request Payload
// =============================================================================

/// Raw sale-creation payload as received on the wire.
///
/// Every field the validator checks is optional here; the validator, not
/// serde, decides what "missing" means so it can report field-level reasons.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDraft {
    /// The user recording the sale.
    pub attendant_id: Option<String>,

    /// Payment method tag, matched case-insensitively.
    pub payment_method: Option<String>,

    /// Ordered list of line items.
    #[serde(default)]
    pub items: Vec<SaleDraftItem>,

    /// Optional discount in decimal currency. Defaults to 0.
    pub discount: Option<f64>,

    /// Optional caller-supplied receipt number.
    pub receipt_number: Option<String>,
}

/// One raw line item of a [`SaleDraft`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDraftItem {
    pub product_id: Option<String>,

    /// Decimal quantity, two-decimal precision (supports weighed goods).
    pub quantity: Option<f64>,

    /// Optional decimal price override. When present and valid it replaces
    /// the catalog price for this line.
    pub price: Option<f64>,
}

// =============================================================================
// Sanitized Request
// =============================================================================

/// A sanitized, strongly-typed sale-creation request.
/// All amounts are already in minor units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSale {
    pub attendant_id: String,
    pub payment_method: PaymentMethod,
    /// Non-empty, in request order.
    pub items: Vec<ValidatedItem>,
    /// Zero when the caller supplied none.
    pub discount: Money,
    /// Trimmed; `None` when absent or blank (the coordinator generates one).
    pub receipt_number: Option<String>,
}

/// One sanitized line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedItem {
    pub product_id: String,
    /// Strictly positive.
    pub quantity: Quantity,
    /// Non-negative when present.
    pub price_override: Option<Money>,
}

// =============================================================================
// Validator
// =============================================================================

/// Validates a raw sale-creation payload.
///
/// Checks, in order:
/// 1. attendant identity present;
/// 2. payment method present and a member of the closed enumeration
///    (case-insensitive);
/// 3. items non-empty;
/// 4. per item (1-indexed for error messages): product id present, quantity a
///    finite number > 0, price override (if supplied) a finite number >= 0;
/// 5. discount (if supplied) a finite number >= 0.
///
/// Pure function of the input; never touches storage.
///
/// ## Example
/// ```rust
/// use tillpoint_core::validation::{validate_sale_draft, SaleDraft, SaleDraftItem};
///
/// let draft = SaleDraft {
///     attendant_id: Some("u-1".into()),
///     payment_method: Some("Cash".into()),
///     items: vec![SaleDraftItem {
///         product_id: Some("p-1".into()),
///         quantity: Some(2.0),
///         price: None,
///     }],
///     discount: None,
///     receipt_number: None,
/// };
///
/// let validated = validate_sale_draft(&draft).unwrap();
/// assert_eq!(validated.items[0].quantity.hundredths(), 200);
/// ```
pub fn validate_sale_draft(draft: &SaleDraft) -> ValidationResult<ValidatedSale> {
    let attendant_id = match draft.attendant_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            return Err(ValidationError::MissingField {
                field: "attendantId".to_string(),
            })
        }
    };

    let method_tag = match draft.payment_method.as_deref().map(str::trim) {
        Some(tag) if !tag.is_empty() => tag,
        _ => {
            return Err(ValidationError::MissingField {
                field: "paymentMethod".to_string(),
            })
        }
    };
    let payment_method =
        PaymentMethod::from_tag(method_tag).ok_or_else(|| ValidationError::InvalidEnum {
            field: "paymentMethod".to_string(),
            value: method_tag.to_string(),
        })?;

    if draft.items.is_empty() {
        return Err(ValidationError::EmptyItems);
    }

    let mut items = Vec::with_capacity(draft.items.len());
    for (index, item) in draft.items.iter().enumerate() {
        let line = index + 1;

        let product_id = match item.product_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                return Err(ValidationError::MissingField {
                    field: format!("items[{line}].productId"),
                })
            }
        };

        let quantity = item
            .quantity
            .and_then(|q| Quantity::try_from_decimal(q).ok())
            .filter(Quantity::is_positive)
            .ok_or(ValidationError::InvalidQuantity { line })?;

        let price_override = match item.price {
            None => None,
            Some(raw) => {
                let price = Money::try_from_decimal(raw)
                    .map_err(|_| ValidationError::InvalidPrice { line })?;
                if price.is_negative() {
                    return Err(ValidationError::InvalidPrice { line });
                }
                Some(price)
            }
        };

        items.push(ValidatedItem {
            product_id,
            quantity,
            price_override,
        });
    }

    let discount = match draft.discount {
        None => Money::zero(),
        Some(raw) => {
            let discount =
                Money::try_from_decimal(raw).map_err(|_| ValidationError::InvalidDiscount)?;
            if discount.is_negative() {
                return Err(ValidationError::InvalidDiscount);
            }
            discount
        }
    };

    let receipt_number = draft
        .receipt_number
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string);

    Ok(ValidatedSale {
        attendant_id,
        payment_method,
        items,
        discount,
        receipt_number,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
