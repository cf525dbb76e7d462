//! Property-based tests for the pricing engine.
//!
//! Properties checked:
//! 1. **Range scan**: any carat weight matches at most one round setting row
//! 2. **Determinism**: resolving the same selection twice gives the same item
//! 3. **Totals**: order independence, zero discount, exact discount split
//!    (oversized prices are rejected at assembly, so totals never overflow)
//! 4. **Numbering**: issued numbers strictly increase and round-trip through text
//!
//! ```bash
//! PROPTEST_CASES=10000 cargo test -p lustre-core --test pricing_properties
//! ```

use proptest::prelude::*;
use rust_decimal::Decimal;

use lustre_core::line_item::assemble;
use lustre_core::resolver::{
    ChainParams, PricingContext, RoundSettingParams, Selection, ShapedSettingParams, TipsParams,
};
use lustre_core::schedule::RateSchedule;
use lustre_core::types::{
    ChainService, DiscountPercent, ProngType, SettingType, StoneShape, TipMetal,
};
use lustre_core::{compute_totals, DocumentNumber, DocumentSequence, DocumentType, LineItem, Money};

// =============================================================================
// Test Strategies
// =============================================================================

/// Carat weights with two decimal places, 0.00 to 12.00.
fn carats() -> impl Strategy<Value = Decimal> {
    (0i64..=1200).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

fn setting_type() -> impl Strategy<Value = SettingType> {
    prop::sample::select(SettingType::ALL.to_vec())
}

fn shape() -> impl Strategy<Value = StoneShape> {
    prop::sample::select(StoneShape::ALL.to_vec())
}

fn discount() -> impl Strategy<Value = DiscountPercent> {
    (0i64..=10_000).prop_map(|bps| DiscountPercent::clamped(Decimal::new(bps, 2)))
}

/// Linear custom items with prices up to $500.00.
fn line_items() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec((1u32..=20, 0i64..=50_000), 0..15).prop_map(|specs| {
        specs
            .into_iter()
            .map(|(quantity, cents)| {
                let resolved = Selection::Custom(lustre_core::resolver::CustomParams {
                    description: "Bench work".to_string(),
                    unit_price: Money::from_cents(cents),
                    quantity: Some(quantity),
                })
                .resolve(&PricingContext::standard())
                .unwrap();
                assemble(resolved, None).unwrap()
            })
            .collect()
    })
}

// =============================================================================
// Range Scan
// =============================================================================

proptest! {
    #[test]
    fn round_setting_matches_at_most_one_range(ct in carats()) {
        let schedule = RateSchedule::standard();
        let matches = schedule
            .round_setting
            .iter()
            .filter(|r| r.carats.contains(ct))
            .count();
        prop_assert!(matches <= 1);
        // Two-decimal weights from 0.01 up always land in a row
        if ct >= Decimal::new(1, 2) {
            prop_assert_eq!(matches, 1);
        }
    }

    #[test]
    fn round_setting_flags_review_only_when_unmatched(ct in carats(), setting in setting_type()) {
        let item = Selection::RoundSetting(RoundSettingParams {
            carats: ct,
            setting,
            quantity: None,
        })
        .resolve(&PricingContext::standard())
        .unwrap();

        let matched = RateSchedule::standard().round_setting_rate(ct).is_some();
        prop_assert_eq!(item.needs_review, !matched);
    }

    #[test]
    fn shaped_setting_resolution_is_deterministic(ct in carats(), shape in shape()) {
        let selection = Selection::ShapedSetting(ShapedSettingParams {
            shape,
            carats: ct,
            quantity: Some(2),
        });
        let ctx = PricingContext::standard();
        prop_assert_eq!(selection.resolve(&ctx).unwrap(), selection.resolve(&ctx).unwrap());
    }
}

// =============================================================================
// Line Items
// =============================================================================

proptest! {
    #[test]
    fn tips_total_is_base_plus_additional(qty in 1u32..=50) {
        let item = assemble(
            Selection::Tips(TipsParams {
                metal: TipMetal::FourteenKtSilver,
                prong_type: ProngType::Tip,
                quantity: Some(qty),
            })
            .resolve(&PricingContext::standard())
            .unwrap(),
            None,
        )
        .unwrap();

        prop_assert_eq!(item.quantity(), qty);
        let expected = Money::from_dollars(15) + Money::from_dollars(10 * (qty - 1));
        prop_assert_eq!(item.total(), expected);
    }

    #[test]
    fn override_total_is_quantity_times_override(qty in 1u32..=999, cents in 0i64..=100_000) {
        let resolved = Selection::Chain(ChainParams {
            service: ChainService::Figure8,
            quantity: Some(qty),
        })
        .resolve(&PricingContext::standard())
        .unwrap();
        let description = resolved.description.clone();

        let item = assemble(resolved, Some(Money::from_cents(cents))).unwrap();
        prop_assert_eq!(item.total(), Money::from_cents(cents * i64::from(qty)));
        prop_assert_eq!(item.quantity(), qty);
        prop_assert_eq!(item.description(), description.as_str());
    }
}

proptest! {
    #[test]
    fn oversized_prices_are_rejected_not_panicking(
        mantissa in any::<i64>(),
        scale in 0u32..=10,
        qty in 1u32..=999,
    ) {
        let price = Money::from_decimal(Decimal::MAX - Decimal::new(mantissa.saturating_abs(), scale));
        let resolved = Selection::Custom(lustre_core::resolver::CustomParams {
            description: "Bench work".to_string(),
            unit_price: price,
            quantity: Some(qty),
        })
        .resolve(&PricingContext::standard())
        .unwrap();
        prop_assert!(assemble(resolved, None).is_err());
    }
}

// =============================================================================
// Totals
// =============================================================================

proptest! {
    #[test]
    fn totals_split_exactly(items in line_items(), pct in discount()) {
        let totals = compute_totals(&items, pct);
        let expected: Money = items.iter().map(LineItem::total).sum();
        prop_assert_eq!(totals.subtotal, expected);
        prop_assert_eq!(totals.discount_amount + totals.total, totals.subtotal);
        prop_assert!(!totals.total.is_negative());
    }

    #[test]
    fn totals_are_order_independent(items in line_items(), pct in discount()) {
        let mut reversed = items.clone();
        reversed.reverse();
        prop_assert_eq!(compute_totals(&items, pct), compute_totals(&reversed, pct));
    }

    #[test]
    fn zero_discount_keeps_subtotal(items in line_items()) {
        let totals = compute_totals(&items, DiscountPercent::zero());
        prop_assert_eq!(totals.total, totals.subtotal);
    }
}

// =============================================================================
// Numbering
// =============================================================================

proptest! {
    #[test]
    fn issued_numbers_strictly_increase(start in 0u32..100_000, count in 1usize..20) {
        let mut seq = DocumentSequence::new(start, start);
        let mut previous = start;
        for _ in 0..count {
            let number = seq.issue(DocumentType::Invoice).unwrap();
            prop_assert!(number.sequence() > previous);
            previous = number.sequence();
        }
        prop_assert_eq!(seq.last_estimate, start);
    }

    #[test]
    fn document_number_text_round_trip(seq in 0u32..=u32::MAX, invoice in any::<bool>()) {
        let kind = if invoice { DocumentType::Invoice } else { DocumentType::Estimate };
        let number = DocumentNumber::new(kind, seq);
        let parsed: DocumentNumber = number.to_string().parse().unwrap();
        prop_assert_eq!(parsed, number);
    }
}
