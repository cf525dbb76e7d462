//! # Line Item Assembly
//!
//! The last step before an item lands on a document: apply the operator's
//! price override (if any), validate, freeze.
//!
//! ## Override Policy
//! ```text
//! ┌──────────────────────┬──────────────────┬─────────────────────────────┐
//! │ SuggestedPrice       │ override         │ result                      │
//! ├──────────────────────┼──────────────────┼─────────────────────────────┤
//! │ PerUnit(u)           │ None             │ unit u, total qty × u       │
//! │ Combined(first, t)   │ None             │ unit first, total t         │
//! │ ManualEstimate       │ None             │ Err(ManualPriceRequired)    │
//! │ any                  │ Some(p)          │ unit p, total qty × p       │
//! └──────────────────────┴──────────────────┴─────────────────────────────┘
//! ```
//! Overrides never touch the description or the quantity.

use serde::Serialize;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::resolver::{ResolvedItem, SuggestedPrice};
use crate::types::Category;
use crate::validation::{validate_amount, validate_description, validate_price, validate_quantity};

/// A priced line on an invoice or estimate.
///
/// Immutable once assembled: fields are private and there are no setters.
/// For linear items `total == quantity × unit_price`; tips and prongs with
/// more than one unit carry their combined amount in `total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct LineItem {
    #[ts(as = "String")]
    id: Uuid,
    category: Category,
    description: String,
    quantity: u32,
    #[ts(as = "String")]
    unit_price: Money,
    #[ts(as = "String")]
    total: Money,
    price_overridden: bool,
    needs_review: bool,
}

impl LineItem {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// Whether the operator replaced the schedule price.
    pub fn price_overridden(&self) -> bool {
        self.price_overridden
    }

    /// Whether the schedule had no price and nobody supplied one.
    pub fn needs_review(&self) -> bool {
        self.needs_review
    }
}

/// Builds the final line item from a resolution and an optional per-unit override.
///
/// ## Errors
/// - [`CoreError::ManualPriceRequired`] for an estimate-only service without override
/// - [`CoreError::Validation`] for an empty description, a quantity outside
///   `1..=MAX_ITEM_QUANTITY`, or a price or total outside `0..=MAX_LINE_AMOUNT_DOLLARS`
/// - [`CoreError::AmountOverflow`] when `quantity × price` cannot be represented
pub fn assemble(resolved: ResolvedItem, override_price: Option<Money>) -> CoreResult<LineItem> {
    validate_description(&resolved.description)?;
    validate_quantity(resolved.quantity)?;

    let quantity = resolved.quantity;
    let (unit_price, total, price_overridden) = match (override_price, resolved.price) {
        (Some(price), _) => (price, line_total(&resolved.description, price, quantity)?, true),
        (None, SuggestedPrice::PerUnit { unit }) => {
            (unit, line_total(&resolved.description, unit, quantity)?, false)
        }
        (None, SuggestedPrice::Combined { first_unit, total }) => {
            validate_price(first_unit)?;
            (first_unit, total, false)
        }
        (None, SuggestedPrice::ManualEstimate) => {
            return Err(CoreError::ManualPriceRequired {
                description: resolved.description,
            });
        }
    };
    validate_amount("line total", total)?;

    Ok(LineItem {
        id: Uuid::new_v4(),
        category: resolved.category,
        description: resolved.description,
        quantity,
        unit_price,
        total,
        price_overridden,
        needs_review: resolved.needs_review && !price_overridden,
    })
}

fn line_total(description: &str, unit: Money, quantity: u32) -> CoreResult<Money> {
    validate_price(unit)?;
    unit.checked_mul_quantity(quantity)
        .ok_or_else(|| CoreError::AmountOverflow {
            description: description.to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn resolved(quantity: u32, price: SuggestedPrice) -> ResolvedItem {
        ResolvedItem {
            category: Category::Misc,
            description: "Reshape Ring".to_string(),
            quantity,
            price,
            needs_review: false,
        }
    }

    #[test]
    fn test_per_unit_total() {
        let item = assemble(resolved(3, SuggestedPrice::per_unit(Money::from_dollars(18))), None)
            .unwrap();
        assert_eq!(item.unit_price(), Money::from_dollars(18));
        assert_eq!(item.total(), Money::from_dollars(54));
        assert!(!item.price_overridden());
    }

    #[test]
    fn test_override_keeps_quantity_and_description() {
        let item = assemble(
            resolved(2, SuggestedPrice::per_unit(Money::from_dollars(40))),
            Some(Money::from_dollars(35)),
        )
        .unwrap();

        assert_eq!(item.quantity(), 2);
        assert_eq!(item.description(), "Reshape Ring");
        assert_eq!(item.unit_price(), Money::from_dollars(35));
        assert_eq!(item.total(), Money::from_dollars(70));
        assert!(item.price_overridden());
    }

    #[test]
    fn test_combined_keeps_total() {
        let item = assemble(
            resolved(
                4,
                SuggestedPrice::Combined {
                    first_unit: Money::from_dollars(30),
                    total: Money::from_dollars(93),
                },
            ),
            None,
        )
        .unwrap();

        assert_eq!(item.quantity(), 4);
        assert_eq!(item.unit_price(), Money::from_dollars(30));
        assert_eq!(item.total(), Money::from_dollars(93));
    }

    #[test]
    fn test_override_on_combined_is_per_unit() {
        let item = assemble(
            resolved(
                4,
                SuggestedPrice::Combined {
                    first_unit: Money::from_dollars(30),
                    total: Money::from_dollars(93),
                },
            ),
            Some(Money::from_dollars(20)),
        )
        .unwrap();

        assert_eq!(item.total(), Money::from_dollars(80));
    }

    #[test]
    fn test_manual_estimate_requires_price() {
        let err = assemble(resolved(1, SuggestedPrice::ManualEstimate), None).unwrap_err();
        assert!(matches!(err, CoreError::ManualPriceRequired { .. }));

        let item = assemble(
            resolved(1, SuggestedPrice::ManualEstimate),
            Some(Money::from_cents(2250)),
        )
        .unwrap();
        assert_eq!(item.total(), Money::from_cents(2250));
    }

    #[test]
    fn test_rejects_bad_input() {
        let zero_qty = assemble(resolved(0, SuggestedPrice::per_unit(Money::from_dollars(5))), None);
        assert!(matches!(
            zero_qty,
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));

        let negative = assemble(
            resolved(1, SuggestedPrice::per_unit(Money::from_dollars(5))),
            Some(Money::from_cents(-1)),
        );
        assert!(negative.is_err());

        let mut blank = resolved(1, SuggestedPrice::per_unit(Money::from_dollars(5)));
        blank.description = "  ".to_string();
        assert!(assemble(blank, None).is_err());
    }

    #[test]
    fn test_oversized_prices_are_errors() {
        let huge = Money::from_decimal(rust_decimal::Decimal::MAX);

        let err = assemble(resolved(2, SuggestedPrice::per_unit(huge)), None).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { .. })
        ));

        let err = assemble(
            resolved(1, SuggestedPrice::per_unit(Money::from_dollars(5))),
            Some(huge),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        // Each unit is allowed, the line total is not
        let cap = Money::from_dollars(crate::MAX_LINE_AMOUNT_DOLLARS);
        let err = assemble(resolved(2, SuggestedPrice::per_unit(cap)), None).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { ref field, .. }) if field == "line total"
        ));
    }

    #[test]
    fn test_override_clears_review_flag() {
        let mut unpriced = resolved(1, SuggestedPrice::per_unit(Money::zero()));
        unpriced.needs_review = true;

        assert!(assemble(unpriced.clone(), None).unwrap().needs_review());
        assert!(!assemble(unpriced, Some(Money::from_dollars(12)))
            .unwrap()
            .needs_review());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = assemble(resolved(1, SuggestedPrice::per_unit(Money::zero())), None).unwrap();
        let b = assemble(resolved(1, SuggestedPrice::per_unit(Money::zero())), None).unwrap();
        assert_ne!(a.id(), b.id());
    }
}
