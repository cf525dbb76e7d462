//! # Category Resolvers
//!
//! Turns a category selection into a description, a quantity and a
//! suggested price by looking it up in the [`RateSchedule`].
//!
//! ## Resolution Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Selection::RoundSetting { carats: 0.3, setting: prong, quantity: 3 }   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RoundSettingParams::resolve(ctx)                                       │
//! │       │  scan round_setting ranges: 0.16 ≤ 0.3 ≤ 0.50 → prong = 18      │
//! │       ▼                                                                 │
//! │  ResolvedItem {                                                         │
//! │      description: "Stone Setting Round 0.3ct prong",                    │
//! │      quantity: 3,                                                       │
//! │      price: PerUnit($18),                                               │
//! │      needs_review: false,                                               │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Resolvers are pure. A selection the schedule has no price for resolves to
//! a zero price with `needs_review` set. The only resolver error is
//! [`CoreError::AmountOverflow`], for hours, weights or rates whose product
//! does not fit in a decimal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::schedule::{ChainPrice, RateSchedule, VariantKey};
use crate::types::{
    Category, ChainService, GoldColor, Karat, MaterialMetal, MiscService, ProngType, SettingType,
    SizingService, SpotPrices, StoneShape, Stones, TipMetal, WeightUnit, WidthBand,
};
use crate::DEFAULT_LABOR_RATE_DOLLARS;

// =============================================================================
// Resolution Output
// =============================================================================

/// Price suggested by the schedule, before any operator override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SuggestedPrice {
    /// Linear: total = quantity × unit.
    PerUnit { unit: Money },
    /// First unit at one price, every further unit at another.
    Combined { first_unit: Money, total: Money },
    /// No schedule price; the operator must quote one.
    ManualEstimate,
}

impl SuggestedPrice {
    pub const fn per_unit(unit: Money) -> Self {
        SuggestedPrice::PerUnit { unit }
    }
}

/// What a resolver hands to the line item assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedItem {
    pub category: Category,
    pub description: String,
    pub quantity: u32,
    pub price: SuggestedPrice,
    /// Set when the schedule had no entry and the price fell back to zero.
    pub needs_review: bool,
}

impl ResolvedItem {
    fn priced(category: Category, description: String, quantity: u32, unit: Money) -> Self {
        ResolvedItem {
            category,
            description,
            quantity,
            price: SuggestedPrice::per_unit(unit),
            needs_review: false,
        }
    }

    fn unpriced(category: Category, description: String, quantity: u32) -> Self {
        warn!(%description, "No schedule price, needs review");
        ResolvedItem {
            category,
            description,
            quantity,
            price: SuggestedPrice::per_unit(Money::zero()),
            needs_review: true,
        }
    }
}

// =============================================================================
// Pricing Context
// =============================================================================

/// Everything a resolver may read: the schedule plus shop settings.
#[derive(Debug, Clone, Copy)]
pub struct PricingContext<'a> {
    pub schedule: &'a RateSchedule,
    pub labor_rate: Money,
    pub spot: SpotPrices,
}

impl PricingContext<'static> {
    /// Standard schedule with default labor rate and spot prices.
    pub fn standard() -> Self {
        PricingContext::new(RateSchedule::standard())
    }
}

impl<'a> PricingContext<'a> {
    pub fn new(schedule: &'a RateSchedule) -> Self {
        PricingContext {
            schedule,
            labor_rate: Money::from_dollars(DEFAULT_LABOR_RATE_DOLLARS),
            spot: SpotPrices::default(),
        }
    }

    pub fn with_labor_rate(mut self, rate: Money) -> Self {
        self.labor_rate = rate;
        self
    }

    pub fn with_spot_prices(mut self, spot: SpotPrices) -> Self {
        self.spot = spot;
        self
    }
}

/// One resolution strategy per category.
pub trait PriceResolver {
    fn resolve(&self, ctx: &PricingContext<'_>) -> CoreResult<ResolvedItem>;
}

fn overflow(description: &str) -> CoreError {
    warn!(%description, "Amount overflows, refusing to price");
    CoreError::AmountOverflow {
        description: description.to_string(),
    }
}

// =============================================================================
// Ring Sizing
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingSizingParams {
    pub karat: Karat,
    pub width: WidthBand,
    pub service: SizingService,
    /// Required for gold, ignored otherwise.
    #[serde(default)]
    pub color: Option<GoldColor>,
    pub stones: Stones,
    /// Number of additional sizes, `add_up` only.
    #[serde(default)]
    pub additional_sizes: Option<u32>,
}

impl PriceResolver for RingSizingParams {
    fn resolve(&self, ctx: &PricingContext<'_>) -> CoreResult<ResolvedItem> {
        let variant = VariantKey::for_karat(self.karat, self.color, self.stones);
        let variant_label = match (variant, self.color) {
            (Some(key), _) => key.to_string(),
            (None, Some(color)) => format!("{}_{}", color, self.stones),
            (None, None) => self.stones.to_string(),
        };
        let description = format!(
            "Ring Sizing {} {} {} {}",
            self.karat, self.width, self.service, variant_label
        );
        let quantity = match self.service {
            SizingService::AdditionalUp => self.additional_sizes.unwrap_or(1),
            SizingService::SizeDown | SizingService::OneUp => 1,
        };

        let price = variant.and_then(|key| {
            ctx.schedule
                .ring_sizing_price(self.karat, self.width, self.service, key)
        });
        Ok(match price {
            Some(unit) => ResolvedItem::priced(Category::RingSizing, description, quantity, unit),
            None => ResolvedItem::unpriced(Category::RingSizing, description, quantity),
        })
    }
}

// =============================================================================
// Stone Setting
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSettingParams {
    pub carats: Decimal,
    pub setting: SettingType,
    /// Stone count.
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl PriceResolver for RoundSettingParams {
    fn resolve(&self, ctx: &PricingContext<'_>) -> CoreResult<ResolvedItem> {
        let description = format!(
            "Stone Setting Round {}ct {}",
            self.carats.normalize(),
            self.setting
        );
        let quantity = self.quantity.unwrap_or(1);

        Ok(match ctx.schedule.round_setting_rate(self.carats) {
            Some(rate) => ResolvedItem::priced(
                Category::RoundStoneSetting,
                description,
                quantity,
                rate.price_for(self.setting),
            ),
            None => ResolvedItem::unpriced(Category::RoundStoneSetting, description, quantity),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapedSettingParams {
    pub shape: StoneShape,
    pub carats: Decimal,
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl PriceResolver for ShapedSettingParams {
    fn resolve(&self, ctx: &PricingContext<'_>) -> CoreResult<ResolvedItem> {
        let description = format!(
            "Stone Setting {} {}ct",
            self.shape,
            self.carats.normalize()
        );
        let quantity = self.quantity.unwrap_or(1);

        Ok(match ctx.schedule.shaped_setting_price(self.shape, self.carats) {
            Some(unit) => {
                ResolvedItem::priced(Category::ShapedStoneSetting, description, quantity, unit)
            }
            None => ResolvedItem::unpriced(Category::ShapedStoneSetting, description, quantity),
        })
    }
}

// =============================================================================
// Tips and Prongs
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipsParams {
    pub metal: TipMetal,
    pub prong_type: ProngType,
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl PriceResolver for TipsParams {
    /// First unit at the base price, each further unit at the additional price.
    fn resolve(&self, ctx: &PricingContext<'_>) -> CoreResult<ResolvedItem> {
        let quantity = self.quantity.unwrap_or(1);
        let description = format!(
            "{} {} x{}",
            self.prong_type.display_name(),
            self.metal,
            quantity
        );

        let Some(rates) = ctx.schedule.tip_rates(self.metal) else {
            return Ok(ResolvedItem::unpriced(Category::TipsAndProngs, description, quantity));
        };

        let base = rates.base_for(self.prong_type);
        let price = if quantity > 1 {
            let total = rates
                .additional_for(self.prong_type)
                .checked_mul_quantity(quantity - 1)
                .and_then(|extra| base.checked_add(extra))
                .ok_or_else(|| overflow(&description))?;
            SuggestedPrice::Combined {
                first_unit: base,
                total,
            }
        } else {
            SuggestedPrice::per_unit(base)
        };

        Ok(ResolvedItem {
            category: Category::TipsAndProngs,
            description,
            quantity,
            price,
            needs_review: false,
        })
    }
}

// =============================================================================
// Chains
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainParams {
    pub service: ChainService,
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl PriceResolver for ChainParams {
    fn resolve(&self, ctx: &PricingContext<'_>) -> CoreResult<ResolvedItem> {
        let description = format!("Chain {}", self.service);
        let quantity = self.quantity.unwrap_or(1);

        Ok(match ctx.schedule.chain_price(self.service) {
            Some(ChainPrice::Fixed(unit)) => {
                ResolvedItem::priced(Category::Chains, description, quantity, unit)
            }
            Some(ChainPrice::ManualEstimate) => ResolvedItem {
                category: Category::Chains,
                description,
                quantity,
                price: SuggestedPrice::ManualEstimate,
                needs_review: false,
            },
            None => ResolvedItem::unpriced(Category::Chains, description, quantity),
        })
    }
}

// =============================================================================
// Miscellaneous
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiscParams {
    pub service: MiscService,
    #[serde(default)]
    pub quantity: Option<u32>,
    /// Strand length, `pearl_restringing` only.
    #[serde(default)]
    pub inches: Option<u32>,
    /// Rings beyond the first two, `unsolder_two_rings` only.
    #[serde(default)]
    pub additional_rings: Option<u32>,
}

impl PriceResolver for MiscParams {
    fn resolve(&self, ctx: &PricingContext<'_>) -> CoreResult<ResolvedItem> {
        let name = self.service.display_name();

        let Some(rate) = ctx.schedule.misc_rate(self.service) else {
            let quantity = self.quantity.unwrap_or(1);
            return Ok(ResolvedItem::unpriced(Category::Misc, name.to_string(), quantity));
        };

        Ok(match self.service {
            MiscService::UnsolderTwoRings => {
                let extra_rings = self.additional_rings.unwrap_or(0);
                let per_ring = rate.per_additional.unwrap_or_default();
                let description = if extra_rings > 0 {
                    format!("{} (+{} rings)", name, extra_rings)
                } else {
                    name.to_string()
                };
                let price = per_ring
                    .checked_mul_quantity(extra_rings)
                    .and_then(|extra| rate.price.checked_add(extra))
                    .ok_or_else(|| overflow(&description))?;
                ResolvedItem::priced(Category::Misc, description, 1, price)
            }
            MiscService::PearlRestringing => {
                let inches = self.inches.or(self.quantity).unwrap_or(1);
                let description = format!("{} {}in", name, inches);
                ResolvedItem::priced(Category::Misc, description, inches, rate.price)
            }
            _ => ResolvedItem::priced(
                Category::Misc,
                name.to_string(),
                self.quantity.unwrap_or(1),
                rate.price,
            ),
        })
    }
}

// =============================================================================
// Custom, Labor, Material
// =============================================================================

/// Free-form item priced entirely by the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomParams {
    pub description: String,
    pub unit_price: Money,
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl PriceResolver for CustomParams {
    fn resolve(&self, _ctx: &PricingContext<'_>) -> CoreResult<ResolvedItem> {
        Ok(ResolvedItem::priced(
            Category::Custom,
            self.description.trim().to_string(),
            self.quantity.unwrap_or(1),
            self.unit_price,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborParams {
    #[serde(default)]
    pub description: Option<String>,
    pub hours: Decimal,
    /// Hourly rate; the shop rate when absent.
    #[serde(default)]
    pub rate: Option<Money>,
}

impl PriceResolver for LaborParams {
    fn resolve(&self, ctx: &PricingContext<'_>) -> CoreResult<ResolvedItem> {
        let rate = self.rate.unwrap_or(ctx.labor_rate);
        let label = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or("Labor");
        let description = format!(
            "{} ({}hrs @ {}/hr)",
            label,
            self.hours.normalize(),
            rate
        );

        let price = rate
            .checked_mul(self.hours)
            .ok_or_else(|| overflow(&description))?;
        Ok(ResolvedItem::priced(Category::Labor, description, 1, price))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialParams {
    pub metal: MaterialMetal,
    pub weight: Decimal,
    pub unit: WeightUnit,
    #[serde(default)]
    pub handling_fee: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl PriceResolver for MaterialParams {
    /// `weight × troy ounces per unit × spot × purity`, plus the optional fee.
    fn resolve(&self, ctx: &PricingContext<'_>) -> CoreResult<ResolvedItem> {
        let rates = &ctx.schedule.materials;
        let fee_percent = rates.handling_fee_percent;

        let mut description = format!(
            "Material: {} ({}{})",
            self.metal.display_name(),
            self.weight.normalize(),
            self.unit.suffix()
        );
        if self.handling_fee {
            description.push_str(&format!(" +{}% fee", fee_percent.normalize()));
        }
        if let Some(note) = self.description.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            description.push_str(" - ");
            description.push_str(note);
        }

        let (Some(purity), Some(ounces_per_unit)) =
            (rates.purity(self.metal), rates.troy_ounces_per(self.unit))
        else {
            return Ok(ResolvedItem::unpriced(Category::Material, description, 1));
        };

        let fee_factor = if self.handling_fee {
            Decimal::ONE + fee_percent / Decimal::ONE_HUNDRED
        } else {
            Decimal::ONE
        };
        let cost = self
            .weight
            .checked_mul(ounces_per_unit)
            .and_then(|ounces| ounces.checked_mul(purity))
            .and_then(|fine| ctx.spot.price_for(self.metal).checked_mul(fine))
            .and_then(|cost| cost.checked_mul(fee_factor))
            .ok_or_else(|| overflow(&description))?;

        Ok(ResolvedItem::priced(Category::Material, description, 1, cost))
    }
}

// =============================================================================
// Selection
// =============================================================================

/// A category plus its parameters, as the operator (or a JSON request) gives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Selection {
    RingSizing(RingSizingParams),
    RoundSetting(RoundSettingParams),
    ShapedSetting(ShapedSettingParams),
    Tips(TipsParams),
    Chain(ChainParams),
    Misc(MiscParams),
    Custom(CustomParams),
    Labor(LaborParams),
    Material(MaterialParams),
}

impl Selection {
    pub fn category(&self) -> Category {
        match self {
            Selection::RingSizing(_) => Category::RingSizing,
            Selection::RoundSetting(_) => Category::RoundStoneSetting,
            Selection::ShapedSetting(_) => Category::ShapedStoneSetting,
            Selection::Tips(_) => Category::TipsAndProngs,
            Selection::Chain(_) => Category::Chains,
            Selection::Misc(_) => Category::Misc,
            Selection::Custom(_) => Category::Custom,
            Selection::Labor(_) => Category::Labor,
            Selection::Material(_) => Category::Material,
        }
    }

    fn resolver(&self) -> &dyn PriceResolver {
        match self {
            Selection::RingSizing(p) => p,
            Selection::RoundSetting(p) => p,
            Selection::ShapedSetting(p) => p,
            Selection::Tips(p) => p,
            Selection::Chain(p) => p,
            Selection::Misc(p) => p,
            Selection::Custom(p) => p,
            Selection::Labor(p) => p,
            Selection::Material(p) => p,
        }
    }

    /// Resolves against `ctx`. Same inputs, same output.
    pub fn resolve(&self, ctx: &PricingContext<'_>) -> CoreResult<ResolvedItem> {
        let item = self.resolver().resolve(ctx)?;
        debug!(
            category = ?item.category,
            description = %item.description,
            quantity = item.quantity,
            needs_review = item.needs_review,
            "Resolved selection"
        );
        Ok(item)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ctx() -> PricingContext<'static> {
        PricingContext::standard()
    }

    fn unit_price(item: &ResolvedItem) -> Money {
        match item.price {
            SuggestedPrice::PerUnit { unit } => unit,
            other => panic!("expected per-unit price, got {:?}", other),
        }
    }

    fn sizing(karat: Karat, color: Option<GoldColor>, stones: Stones) -> RingSizingParams {
        RingSizingParams {
            karat,
            width: WidthBand::From3To5,
            service: SizingService::OneUp,
            color,
            stones,
            additional_sizes: None,
        }
    }

    #[test]
    fn test_ring_sizing_gold() {
        let item = sizing(Karat::TenFourteen, Some(GoldColor::Yellow), Stones::ZeroToFour)
            .resolve(&ctx())
            .unwrap();
        assert_eq!(item.description, "Ring Sizing 10kt_14kt 3.01-5.0 1_up yellow_04");
        assert_eq!(item.quantity, 1);
        assert_eq!(unit_price(&item), Money::from_dollars(61));
        assert!(!item.needs_review);
    }

    #[test]
    fn test_ring_sizing_additional_up_uses_count() {
        let mut params = sizing(Karat::Eighteen, Some(GoldColor::WhiteRose), Stones::FiveToTwenty);
        params.service = SizingService::AdditionalUp;
        params.additional_sizes = Some(3);

        let item = params.resolve(&ctx()).unwrap();
        assert_eq!(item.quantity, 3);
        assert_eq!(unit_price(&item), Money::from_dollars(53));
    }

    #[test]
    fn test_ring_sizing_missing_path_needs_review() {
        let mut params = sizing(Karat::Silver, None, Stones::With);
        params.width = WidthBand::From5To8;

        let item = params.resolve(&ctx()).unwrap();
        assert_eq!(unit_price(&item), Money::zero());
        assert!(item.needs_review);
        assert_eq!(item.description, "Ring Sizing silver 5.01-8.0 1_up with");
    }

    #[test]
    fn test_ring_sizing_gold_without_color_needs_review() {
        let item = sizing(Karat::Eighteen, None, Stones::ZeroToFour)
            .resolve(&ctx())
            .unwrap();
        assert!(item.needs_review);
        assert_eq!(unit_price(&item), Money::zero());
    }

    #[test]
    fn test_round_setting() {
        let item = RoundSettingParams {
            carats: dec!(0.50),
            setting: SettingType::Prong,
            quantity: Some(3),
        }
        .resolve(&ctx())
        .unwrap();

        assert_eq!(item.description, "Stone Setting Round 0.5ct prong");
        assert_eq!(item.quantity, 3);
        assert_eq!(unit_price(&item), Money::from_dollars(18));
    }

    #[test]
    fn test_round_setting_unmatched_weight() {
        let item = RoundSettingParams {
            carats: dec!(0),
            setting: SettingType::Bezel,
            quantity: None,
        }
        .resolve(&ctx())
        .unwrap();

        assert!(item.needs_review);
        assert_eq!(unit_price(&item), Money::zero());
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_shaped_setting() {
        let item = ShapedSettingParams {
            shape: StoneShape::MarquiseEmerald,
            carats: dec!(0.75),
            quantity: None,
        }
        .resolve(&ctx())
        .unwrap();

        assert_eq!(item.description, "Stone Setting marquise_emerald 0.75ct");
        assert_eq!(unit_price(&item), Money::from_dollars(36));
    }

    #[test]
    fn test_tips_single_unit_is_linear() {
        let item = TipsParams {
            metal: TipMetal::FourteenKtSilver,
            prong_type: ProngType::Prong,
            quantity: None,
        }
        .resolve(&ctx())
        .unwrap();

        assert_eq!(item.description, "Prong 14kt_silver x1");
        assert_eq!(item.price, SuggestedPrice::per_unit(Money::from_dollars(17)));
    }

    #[test]
    fn test_tips_multiple_units_combined() {
        let item = TipsParams {
            metal: TipMetal::EighteenKt,
            prong_type: ProngType::FullProng,
            quantity: Some(4),
        }
        .resolve(&ctx())
        .unwrap();

        // 30 + 3 × 21
        assert_eq!(item.quantity, 4);
        assert_eq!(
            item.price,
            SuggestedPrice::Combined {
                first_unit: Money::from_dollars(30),
                total: Money::from_dollars(93),
            }
        );
    }

    #[test]
    fn test_chain_fixed_and_estimate() {
        let fixed = ChainParams {
            service: ChainService::TightenClasp,
            quantity: None,
        }
        .resolve(&ctx())
        .unwrap();
        assert_eq!(fixed.description, "Chain tighten_clasp");
        assert_eq!(unit_price(&fixed), Money::from_dollars(12));

        let estimate = ChainParams {
            service: ChainService::SafetyChain,
            quantity: Some(2),
        }
        .resolve(&ctx())
        .unwrap();
        assert_eq!(estimate.price, SuggestedPrice::ManualEstimate);
        assert_eq!(estimate.quantity, 2);
        assert!(!estimate.needs_review);
    }

    #[test]
    fn test_misc_unsolder_extra_rings() {
        let item = MiscParams {
            service: MiscService::UnsolderTwoRings,
            quantity: Some(5),
            inches: None,
            additional_rings: Some(2),
        }
        .resolve(&ctx())
        .unwrap();

        assert_eq!(item.quantity, 1);
        assert_eq!(unit_price(&item), Money::from_dollars(92));
        assert_eq!(item.description, "Unsolder Two Rings (+2 rings)");
    }

    #[test]
    fn test_misc_pearl_restringing_per_inch() {
        let item = MiscParams {
            service: MiscService::PearlRestringing,
            quantity: None,
            inches: Some(18),
            additional_rings: None,
        }
        .resolve(&ctx())
        .unwrap();

        assert_eq!(item.quantity, 18);
        assert_eq!(unit_price(&item), Money::from_dollars(2));
    }

    #[test]
    fn test_misc_flat_service() {
        let item = MiscParams {
            service: MiscService::CleanPolishRhodium,
            quantity: Some(2),
            inches: None,
            additional_rings: None,
        }
        .resolve(&ctx())
        .unwrap();

        assert_eq!(item.description, "Clean/Polish/Rhodium");
        assert_eq!(item.quantity, 2);
        assert_eq!(unit_price(&item), Money::from_dollars(25));
    }

    #[test]
    fn test_labor_default_and_custom_rate() {
        let item = LaborParams {
            description: None,
            hours: dec!(1.5),
            rate: None,
        }
        .resolve(&ctx())
        .unwrap();
        assert_eq!(unit_price(&item), Money::from_cents(11250));
        assert_eq!(item.description, "Labor (1.5hrs @ $75.00/hr)");

        let item = LaborParams {
            description: Some("Rebuild head".to_string()),
            hours: dec!(3),
            rate: Some(Money::from_dollars(50)),
        }
        .resolve(&ctx())
        .unwrap();
        assert_eq!(unit_price(&item), Money::from_dollars(150));
    }

    #[test]
    fn test_material_price() {
        // 20 dwt = 1 oz of 24k at $4000
        let item = MaterialParams {
            metal: MaterialMetal::Gold24k,
            weight: dec!(20),
            unit: WeightUnit::Pennyweight,
            handling_fee: false,
            description: None,
        }
        .resolve(&ctx())
        .unwrap();
        assert_eq!(unit_price(&item), Money::from_dollars(4000));
        assert_eq!(item.description, "Material: 24k Gold (20dwt)");

        let item = MaterialParams {
            metal: MaterialMetal::Silver,
            weight: dec!(1),
            unit: WeightUnit::Ounces,
            handling_fee: true,
            description: Some("bail".to_string()),
        }
        .resolve(&ctx())
        .unwrap();
        // 30 × 0.925 × 1.15
        assert_eq!(unit_price(&item).amount(), dec!(31.9125));
        assert_eq!(item.description, "Material: Sterling Silver (1oz) +15% fee - bail");
    }

    #[test]
    fn test_oversized_labor_and_material_are_errors() {
        let labor: Selection =
            serde_json::from_str(r#"{"category":"labor","hours":"79228162514264337593543950335"}"#)
                .unwrap();
        assert!(matches!(
            labor.resolve(&ctx()),
            Err(CoreError::AmountOverflow { .. })
        ));

        let material = Selection::Material(MaterialParams {
            metal: MaterialMetal::Gold24k,
            weight: Decimal::MAX,
            unit: WeightUnit::Ounces,
            handling_fee: true,
            description: None,
        });
        assert!(matches!(
            material.resolve(&ctx()),
            Err(CoreError::AmountOverflow { .. })
        ));
    }

    #[test]
    fn test_selection_dispatch_and_category() {
        let selection = Selection::Chain(ChainParams {
            service: ChainService::Rivet,
            quantity: None,
        });
        assert_eq!(selection.category(), Category::Chains);
        assert_eq!(selection.resolve(&ctx()).unwrap().category, Category::Chains);
    }

    #[test]
    fn test_selection_from_json() {
        let json = r#"{"category":"round_setting","carats":"0.3","setting":"chanel"}"#;
        let selection: Selection = serde_json::from_str(json).unwrap();
        let item = selection.resolve(&ctx()).unwrap();
        assert_eq!(unit_price(&item), Money::from_dollars(31));
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let selection = Selection::RingSizing(sizing(
            Karat::Platinum,
            None,
            Stones::FiveToTwenty,
        ));
        assert_eq!(
            selection.resolve(&ctx()).unwrap(),
            selection.resolve(&ctx()).unwrap()
        );
    }
}
