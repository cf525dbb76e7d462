//! # Validation Module
//!
//! Input validation utilities for Lustre.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI parsing (clap / serde)                                   │
//! │  ├── Enumerated selections, numeric formats                            │
//! │  └── Malformed input never reaches the engine                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Quantities, prices, weights, descriptions                         │
//! │  └── Called by the line item assembler and the draft                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Resolvers                                                    │
//! │  └── Schedule misses degrade to a zero price + needs_review            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lustre_core::validation::{validate_description, validate_quantity};
//!
//! validate_description("Custom engraving").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_DESCRIPTION_LEN, MAX_ITEM_QUANTITY, MAX_LINE_AMOUNT_DOLLARS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a line item description.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most `MAX_DESCRIPTION_LEN` characters
///
/// ## Example
/// ```rust
/// use lustre_core::validation::validate_description;
///
/// assert!(validate_description("Rhodium plate").is_ok());
/// assert!(validate_description("   ").is_err());
/// ```
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line item quantity.
///
/// ## Rules
/// - At least 1
/// - At most `MAX_ITEM_QUANTITY` (999)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  lustre quote 2 --carats 0.3 --setting prong --quantity 0               │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  resolve() ──► ResolvedItem { quantity: 0, .. }                         │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  assemble() ──► validate_quantity(0) ← THIS FUNCTION                    │
/// │       │                                                                 │
/// │       └── Error: "quantity must be between 1 and 999"                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 || qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY as i64,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (complimentary work)
/// - At most `MAX_LINE_AMOUNT_DOLLARS`
///
/// ## Example
/// ```rust
/// use lustre_core::money::Money;
/// use lustre_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    validate_amount("price", price)
}

/// Validates a money amount against `[0, MAX_LINE_AMOUNT_DOLLARS]`.
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    if amount > Money::from_dollars(MAX_LINE_AMOUNT_DOLLARS) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::from(MAX_LINE_AMOUNT_DOLLARS),
        });
    }

    Ok(())
}

/// Validates a non-negative decimal measurement (carats, hours, weight).
pub fn validate_measure(field: &str, value: Decimal) -> ValidationResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
