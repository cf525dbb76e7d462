//! # Invoice Totals
//!
//! ```text
//! subtotal        = Σ item.total
//! discount_amount = subtotal × percent / 100
//! total           = subtotal − discount_amount
//! ```
//!
//! Nothing here rounds. `Money`'s display rounds half away from zero, so a
//! document shows cents while every sum stays exact.
//!
//! Line items only come out of [`assemble`](crate::line_item::assemble),
//! which caps every total at `MAX_LINE_AMOUNT_DOLLARS`; these sums cannot overflow.

use serde::Serialize;
use ts_rs::TS;

use crate::line_item::LineItem;
use crate::money::Money;
use crate::types::DiscountPercent;

/// Totals for a set of line items under one discount.
///
/// Always derived from its inputs by [`compute_totals`], never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct InvoiceTotals {
    #[ts(as = "String")]
    pub subtotal: Money,
    #[ts(as = "String")]
    pub discount_percent: DiscountPercent,
    #[ts(as = "String")]
    pub discount_amount: Money,
    #[ts(as = "String")]
    pub total: Money,
}

/// Folds line items into subtotal, discount and total.
///
/// Order independent; an empty slice gives all zeros.
///
/// ## Example
/// ```rust
/// use lustre_core::money::Money;
/// use lustre_core::totals::compute_totals;
/// use lustre_core::types::DiscountPercent;
///
/// let totals = compute_totals(&[], DiscountPercent::from_whole(10));
/// assert_eq!(totals.total, Money::zero());
/// ```
pub fn compute_totals(items: &[LineItem], discount: DiscountPercent) -> InvoiceTotals {
    let subtotal: Money = items.iter().map(LineItem::total).sum();
    let discount_amount = subtotal.percentage(discount);

    InvoiceTotals {
        subtotal,
        discount_percent: discount,
        discount_amount,
        total: subtotal - discount_amount,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_item::assemble;
    use crate::resolver::{ResolvedItem, SuggestedPrice};
    use crate::types::Category;
    use rust_decimal_macros::dec;

    fn item(quantity: u32, unit_cents: i64) -> LineItem {
        assemble(
            ResolvedItem {
                category: Category::Custom,
                description: "Test item".to_string(),
                quantity,
                price: SuggestedPrice::per_unit(Money::from_cents(unit_cents)),
                needs_review: false,
            },
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_items() {
        let discount = DiscountPercent::from_whole(15);
        let totals = compute_totals(&[], discount);
        assert_eq!(totals.subtotal, Money::zero());
        assert_eq!(totals.discount_percent, discount);
        assert_eq!(totals.discount_amount, Money::zero());
        assert_eq!(totals.total, Money::zero());
    }

    #[test]
    fn test_ring_sizing_plus_settings_with_discount() {
        // 61 + 3 × 18 = 115, 10% off
        let items = [item(1, 6100), item(3, 1800)];
        let totals = compute_totals(&items, DiscountPercent::from_whole(10));

        assert_eq!(totals.subtotal, Money::from_dollars(115));
        assert_eq!(totals.discount_amount, Money::from_cents(1150));
        assert_eq!(totals.total, Money::from_cents(10350));
        assert_eq!(totals.total.to_string(), "$103.50");
    }

    #[test]
    fn test_zero_discount() {
        let items = [item(2, 2500)];
        let totals = compute_totals(&items, DiscountPercent::zero());
        assert_eq!(totals.total, totals.subtotal);
    }

    #[test]
    fn test_full_discount() {
        let items = [item(1, 4600)];
        let totals = compute_totals(&items, DiscountPercent::from_whole(100));
        assert_eq!(totals.total, Money::zero());
    }

    #[test]
    fn test_fractional_discount_is_not_rounded() {
        let items = [item(1, 5), item(1, 5)];
        let totals = compute_totals(&items, DiscountPercent::new(dec!(12.5)).unwrap());
        assert_eq!(totals.discount_amount.amount(), dec!(0.0125));
        assert_eq!(totals.total.amount(), dec!(0.0875));
    }

    #[test]
    fn test_order_independent() {
        let a = [item(1, 1000), item(2, 333), item(5, 17)];
        let b = [a[2].clone(), a[0].clone(), a[1].clone()];
        let pct = DiscountPercent::from_whole(7);
        assert_eq!(compute_totals(&a, pct), compute_totals(&b, pct));
    }
}
