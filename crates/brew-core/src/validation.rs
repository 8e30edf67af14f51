//! # Validation Module
//!
//! Input and rule validation for Brew POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Terminal UI                                                  │
//! │  ├── Basic format checks (empty input, obvious typos)                  │
//! │  └── Immediate cashier feedback                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (engine gate)                                    │
//! │  ├── Quantity and cart-size bounds                                     │
//! │  ├── Catalog rule sanity (percentage range, positive amounts)          │
//! │  └── GCash reference shape                                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Sales service                                                │
//! │  └── Authoritative acceptance of the submitted payload                 │
//! │                                                                         │
//! │  Defense in depth: each layer catches what the one above missed.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{DiscountKind, DiscountRule};
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Cart Input Validators
// =============================================================================

/// Validates a quantity for a cart operation.
///
/// ## Rules
/// - Must be positive
/// - Must not exceed [`MAX_ITEM_QUANTITY`]
///
/// ## Example
/// ```rust
/// use brew_core::validation::validate_quantity;
///
/// assert!(validate_quantity(5).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(1_000_000).is_err());
/// ```
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a product name for a line item.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Discount Rule Validators
// =============================================================================

/// Sanity-checks a normalized catalog rule.
///
/// The catalog service owns rule correctness; this is the engine-side gate
/// against records that slipped through normalization.
///
/// ## Rules
/// - id and name must be non-empty
/// - percentage magnitude in [0%, 100%)
/// - fixed amount strictly positive
/// - minimum spend not negative
pub fn validate_discount_rule(rule: &DiscountRule) -> ValidationResult<()> {
    if rule.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if rule.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    match rule.kind {
        DiscountKind::Percentage(rate) => {
            if !rate.is_valid_discount() {
                return Err(ValidationError::OutOfRange {
                    field: "value".to_string(),
                    min: 0,
                    max: 9999,
                });
            }
        }
        DiscountKind::FixedAmount(amount) => {
            if !amount.is_positive() {
                return Err(ValidationError::MustBePositive {
                    field: "value".to_string(),
                });
            }
        }
    }

    if rule.min_spend.is_negative() {
        return Err(ValidationError::Negative {
            field: "minSpend".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Payment Validators
// =============================================================================

/// Validates a GCash reference number captured before submission.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 50 characters
/// - Digits only (GCash reference numbers are numeric)
pub fn validate_gcash_reference(reference: &str) -> ValidationResult<()> {
    let reference = reference.trim();

    if reference.is_empty() {
        return Err(ValidationError::Required {
            field: "gcashReference".to_string(),
        });
    }

    if reference.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "gcashReference".to_string(),
            max: 50,
        });
    }

    if !reference.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "gcashReference".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{DiscountRate, Money};
    use crate::types::DiscountScope;

    fn rule(kind: DiscountKind) -> DiscountRule {
        DiscountRule {
            id: "1".to_string(),
            name: "Promo".to_string(),
            kind,
            min_spend: Money::zero(),
            scope: DiscountScope::AllProducts,
        }
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Latte").is_ok());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"x".repeat(201)).is_err());
    }

    #[test]
    fn test_percentage_must_be_below_hundred() {
        let ok = rule(DiscountKind::Percentage(DiscountRate::from_bps(9999)));
        assert!(validate_discount_rule(&ok).is_ok());

        let bad = rule(DiscountKind::Percentage(DiscountRate::from_bps(10_000)));
        assert!(validate_discount_rule(&bad).is_err());
    }

    #[test]
    fn test_fixed_amount_must_be_positive() {
        let ok = rule(DiscountKind::FixedAmount(Money::from_cents(5000)));
        assert!(validate_discount_rule(&ok).is_ok());

        let bad = rule(DiscountKind::FixedAmount(Money::zero()));
        assert!(validate_discount_rule(&bad).is_err());
    }

    #[test]
    fn test_rule_requires_id_and_name() {
        let mut bad = rule(DiscountKind::FixedAmount(Money::from_cents(100)));
        bad.id = " ".to_string();
        assert!(validate_discount_rule(&bad).is_err());

        let mut bad = rule(DiscountKind::FixedAmount(Money::from_cents(100)));
        bad.name = String::new();
        assert!(validate_discount_rule(&bad).is_err());
    }

    #[test]
    fn test_validate_gcash_reference() {
        assert!(validate_gcash_reference("1234567890123").is_ok());
        assert!(validate_gcash_reference("  ").is_err());
        assert!(validate_gcash_reference("ref-123").is_err());
        assert!(validate_gcash_reference(&"9".repeat(51)).is_err());
    }
}
