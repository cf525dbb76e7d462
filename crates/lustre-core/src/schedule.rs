//! # Rate Schedule
//!
//! The price list every resolver reads from.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RateSchedule (version "2024.1")                                        │
//! │                                                                         │
//! │  ring_sizing     karat ─► width band ─► service ─► variant ─► price     │
//! │  round_setting   [carat range] ─► prong | channel | bezel               │
//! │  shaped_setting  shape ─► [carat range] ─► price                        │
//! │  tips            metal ─► base[4] + additional[4]                       │
//! │  chains          service ─► Fixed(price) | ManualEstimate               │
//! │  misc            service ─► price (+ per additional unit)               │
//! │  materials       purity per metal, troy ounces per weight unit          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Carat range lists are sorted ascending and disjoint. Bounds are inclusive
//! on both ends and the last range is open above.
//!
//! The standard schedule is built once and shared process-wide; tests can
//! build their own with struct literals.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

use crate::money::Money;
use crate::types::{
    ChainService, GoldColor, Karat, MaterialMetal, MiscService, ProngType, SettingType,
    SizingService, StoneShape, Stones, TipMetal, WeightUnit, WidthBand,
};

/// Version tag of the compiled-in price list.
pub const SCHEDULE_VERSION: &str = "2024.1";

// =============================================================================
// Ring Sizing Keys
// =============================================================================

/// Stone count band used by gold and platinum sizing prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StoneBand {
    #[serde(rename = "04")]
    ZeroToFour,
    #[serde(rename = "520")]
    FiveToTwenty,
}

impl StoneBand {
    pub const fn label(&self) -> &'static str {
        match self {
            StoneBand::ZeroToFour => "04",
            StoneBand::FiveToTwenty => "520",
        }
    }
}

/// Innermost ring sizing key. Its composition depends on the karat family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum VariantKey {
    Gold { color: GoldColor, stones: StoneBand },
    Platinum { stones: StoneBand },
    Silver { with_stones: bool },
}

impl VariantKey {
    /// Builds the key for `karat` from the operator's selections.
    ///
    /// Returns `None` when gold has no color, or when the stone selection
    /// belongs to the other family (a silver flag on gold, a count on silver).
    pub fn for_karat(karat: Karat, color: Option<GoldColor>, stones: Stones) -> Option<Self> {
        let band = match stones {
            Stones::ZeroToFour => Some(StoneBand::ZeroToFour),
            Stones::FiveToTwenty => Some(StoneBand::FiveToTwenty),
            Stones::Without | Stones::With => None,
        };

        match karat {
            Karat::TenFourteen | Karat::Eighteen => Some(VariantKey::Gold {
                color: color?,
                stones: band?,
            }),
            Karat::Platinum => Some(VariantKey::Platinum { stones: band? }),
            Karat::Silver => match stones {
                Stones::Without => Some(VariantKey::Silver { with_stones: false }),
                Stones::With => Some(VariantKey::Silver { with_stones: true }),
                _ => None,
            },
        }
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantKey::Gold { color, stones } => write!(f, "{}_{}", color, stones.label()),
            VariantKey::Platinum { stones } => f.write_str(stones.label()),
            VariantKey::Silver { with_stones: false } => f.write_str("no"),
            VariantKey::Silver { with_stones: true } => f.write_str("with"),
        }
    }
}

impl From<VariantKey> for String {
    fn from(key: VariantKey) -> Self {
        key.to_string()
    }
}

// =============================================================================
// Table Rows
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizingRate {
    pub variant: VariantKey,
    pub price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizingServiceRates {
    pub service: SizingService,
    pub rates: Vec<SizingRate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizingBand {
    pub width: WidthBand,
    pub services: Vec<SizingServiceRates>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KaratSizing {
    pub karat: Karat,
    pub bands: Vec<SizingBand>,
}

/// Inclusive carat range; `max_ct: None` is open above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CaratRange {
    pub min_ct: Decimal,
    pub max_ct: Option<Decimal>,
}

impl CaratRange {
    pub fn contains(&self, carats: Decimal) -> bool {
        carats >= self.min_ct && self.max_ct.map_or(true, |max| carats <= max)
    }
}

/// Approximate stone diameter for a carat range. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MillimetreRange {
    pub min_mm: Decimal,
    pub max_mm: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSettingRate {
    pub carats: CaratRange,
    pub millimetres: MillimetreRange,
    pub prong: Money,
    pub channel: Money,
    pub bezel: Money,
}

impl RoundSettingRate {
    pub fn price_for(&self, setting: SettingType) -> Money {
        match setting {
            SettingType::Prong => self.prong,
            SettingType::Channel => self.channel,
            SettingType::Bezel => self.bezel,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapedSettingRate {
    pub carats: CaratRange,
    pub price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeRates {
    pub shape: StoneShape,
    pub ranges: Vec<ShapedSettingRate>,
}

/// Tips and prongs prices for one metal, indexed by [`ProngType::index`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TipRates {
    pub metal: TipMetal,
    pub base: [Money; 4],
    pub additional: [Money; 4],
}

impl TipRates {
    pub fn base_for(&self, prong: ProngType) -> Money {
        self.base[prong.index()]
    }

    pub fn additional_for(&self, prong: ProngType) -> Money {
        self.additional[prong.index()]
    }
}

/// A chain service is either flat-priced or quoted by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "price", rename_all = "snake_case")]
pub enum ChainPrice {
    Fixed(Money),
    ManualEstimate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainRate {
    pub service: ChainService,
    pub price: ChainPrice,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MiscRate {
    pub service: MiscService,
    pub price: Money,
    /// Charge per unit beyond the base (extra rings to unsolder).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_additional: Option<Money>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetalPurity {
    pub metal: MaterialMetal,
    pub purity: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnitConversion {
    pub unit: WeightUnit,
    pub troy_ounces: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialRates {
    pub purities: Vec<MetalPurity>,
    pub units: Vec<UnitConversion>,
    /// Handling fee, percent of the metal value.
    pub handling_fee_percent: Decimal,
}

impl MaterialRates {
    pub fn purity(&self, metal: MaterialMetal) -> Option<Decimal> {
        self.purities
            .iter()
            .find(|p| p.metal == metal)
            .map(|p| p.purity)
    }

    pub fn troy_ounces_per(&self, unit: WeightUnit) -> Option<Decimal> {
        self.units
            .iter()
            .find(|u| u.unit == unit)
            .map(|u| u.troy_ounces)
    }
}

// =============================================================================
// Rate Schedule
// =============================================================================

/// Immutable, versioned price list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateSchedule {
    pub version: String,
    pub ring_sizing: Vec<KaratSizing>,
    pub round_setting: Vec<RoundSettingRate>,
    pub shaped_setting: Vec<ShapeRates>,
    pub tips: Vec<TipRates>,
    pub chains: Vec<ChainRate>,
    pub misc: Vec<MiscRate>,
    pub materials: MaterialRates,
}

impl RateSchedule {
    /// The shop's standard price list.
    pub fn standard() -> &'static RateSchedule {
        static STANDARD: OnceLock<RateSchedule> = OnceLock::new();
        STANDARD.get_or_init(build_standard)
    }

    /// `schedule[karat][width][service][variant]`, `None` if any level is absent.
    pub fn ring_sizing_price(
        &self,
        karat: Karat,
        width: WidthBand,
        service: SizingService,
        variant: VariantKey,
    ) -> Option<Money> {
        self.ring_sizing
            .iter()
            .find(|k| k.karat == karat)?
            .bands
            .iter()
            .find(|b| b.width == width)?
            .services
            .iter()
            .find(|s| s.service == service)?
            .rates
            .iter()
            .find(|r| r.variant == variant)
            .map(|r| r.price)
    }

    /// First round setting row whose range contains `carats`.
    pub fn round_setting_rate(&self, carats: Decimal) -> Option<&RoundSettingRate> {
        self.round_setting.iter().find(|r| r.carats.contains(carats))
    }

    /// Price for `shape` at `carats`, scanning that shape's ranges in order.
    pub fn shaped_setting_price(&self, shape: StoneShape, carats: Decimal) -> Option<Money> {
        self.shaped_setting
            .iter()
            .find(|s| s.shape == shape)?
            .ranges
            .iter()
            .find(|r| r.carats.contains(carats))
            .map(|r| r.price)
    }

    pub fn tip_rates(&self, metal: TipMetal) -> Option<&TipRates> {
        self.tips.iter().find(|t| t.metal == metal)
    }

    pub fn chain_price(&self, service: ChainService) -> Option<ChainPrice> {
        self.chains
            .iter()
            .find(|c| c.service == service)
            .map(|c| c.price)
    }

    pub fn misc_rate(&self, service: MiscService) -> Option<&MiscRate> {
        self.misc.iter().find(|m| m.service == service)
    }
}

// =============================================================================
// Standard Price List
// =============================================================================

fn usd(dollars: u32) -> Money {
    Money::from_dollars(dollars)
}

fn ct(min: Decimal, max: Option<Decimal>) -> CaratRange {
    CaratRange {
        min_ct: min,
        max_ct: max,
    }
}

fn mm(min: Decimal, max: Option<Decimal>) -> MillimetreRange {
    MillimetreRange {
        min_mm: min,
        max_mm: max,
    }
}

/// Gold prices in column order yellow_04, white_rose_04, yellow_520, white_rose_520.
fn gold_rates(prices: [u32; 4]) -> Vec<SizingRate> {
    let keys = [
        (GoldColor::Yellow, StoneBand::ZeroToFour),
        (GoldColor::WhiteRose, StoneBand::ZeroToFour),
        (GoldColor::Yellow, StoneBand::FiveToTwenty),
        (GoldColor::WhiteRose, StoneBand::FiveToTwenty),
    ];
    keys.iter()
        .zip(prices)
        .map(|(&(color, stones), price)| SizingRate {
            variant: VariantKey::Gold { color, stones },
            price: usd(price),
        })
        .collect()
}

/// Platinum prices for 04, 520.
fn platinum_rates(prices: [u32; 2]) -> Vec<SizingRate> {
    [StoneBand::ZeroToFour, StoneBand::FiveToTwenty]
        .into_iter()
        .zip(prices)
        .map(|(stones, price)| SizingRate {
            variant: VariantKey::Platinum { stones },
            price: usd(price),
        })
        .collect()
}

/// Silver prices without / with stones.
fn silver_rates(prices: [u32; 2]) -> Vec<SizingRate> {
    [false, true]
        .into_iter()
        .zip(prices)
        .map(|(with_stones, price)| SizingRate {
            variant: VariantKey::Silver { with_stones },
            price: usd(price),
        })
        .collect()
}

fn band(
    width: WidthBand,
    size_down: Vec<SizingRate>,
    one_up: Vec<SizingRate>,
    additional_up: Vec<SizingRate>,
) -> SizingBand {
    let services = [
        (SizingService::SizeDown, size_down),
        (SizingService::OneUp, one_up),
        (SizingService::AdditionalUp, additional_up),
    ];
    SizingBand {
        width,
        services: services
            .into_iter()
            .map(|(service, rates)| SizingServiceRates { service, rates })
            .collect(),
    }
}

fn ring_sizing() -> Vec<KaratSizing> {
    use WidthBand::{From3To5, From5To8, Under3};

    vec![
        KaratSizing {
            karat: Karat::TenFourteen,
            bands: vec![
                band(Under3, gold_rates([29, 41, 35, 47]), gold_rates([55, 68, 61, 74]), gold_rates([27; 4])),
                band(From3To5, gold_rates([34, 47, 40, 53]), gold_rates([61, 74, 67, 79]), gold_rates([40; 4])),
                band(From5To8, gold_rates([40, 53, 46, 58]), gold_rates([67, 79, 73, 85]), gold_rates([53; 4])),
            ],
        },
        KaratSizing {
            karat: Karat::Eighteen,
            bands: vec![
                band(Under3, gold_rates([34, 47, 40, 53]), gold_rates([61, 74, 67, 79]), gold_rates([40; 4])),
                band(From3To5, gold_rates([40, 53, 46, 58]), gold_rates([67, 79, 73, 85]), gold_rates([53; 4])),
                band(From5To8, gold_rates([46, 58, 52, 64]), gold_rates([73, 85, 78, 91]), gold_rates([67; 4])),
            ],
        },
        KaratSizing {
            karat: Karat::Platinum,
            bands: vec![
                band(Under3, platinum_rates([40, 50]), platinum_rates([75, 90]), platinum_rates([35; 2])),
                band(From3To5, platinum_rates([45, 60]), platinum_rates([120, 130]), platinum_rates([65; 2])),
                band(From5To8, platinum_rates([50, 65]), platinum_rates([150, 165]), platinum_rates([80; 2])),
            ],
        },
        KaratSizing {
            karat: Karat::Silver,
            bands: vec![
                band(Under3, silver_rates([17, 25]), silver_rates([29, 35]), silver_rates([12; 2])),
                band(From3To5, silver_rates([23, 30]), silver_rates([35, 41]), silver_rates([17; 2])),
            ],
        },
    ]
}

/// Shared carat breakpoints for round and shaped settings.
fn carat_ranges() -> [CaratRange; 11] {
    [
        ct(dec!(0.01), Some(dec!(0.07))),
        ct(dec!(0.08), Some(dec!(0.15))),
        ct(dec!(0.16), Some(dec!(0.50))),
        ct(dec!(0.51), Some(dec!(0.75))),
        ct(dec!(0.76), Some(dec!(1.00))),
        ct(dec!(1.01), Some(dec!(1.50))),
        ct(dec!(1.51), Some(dec!(2.00))),
        ct(dec!(2.01), Some(dec!(3.00))),
        ct(dec!(3.01), Some(dec!(4.00))),
        ct(dec!(4.01), Some(dec!(5.00))),
        ct(dec!(5.01), None),
    ]
}

fn round_setting() -> Vec<RoundSettingRate> {
    let millimetres = [
        mm(dec!(0.005), Some(dec!(2.6))),
        mm(dec!(2.7), Some(dec!(3.3))),
        mm(dec!(3.4), Some(dec!(5.2))),
        mm(dec!(5.2), Some(dec!(5.8))),
        mm(dec!(5.8), Some(dec!(6.5))),
        mm(dec!(6.5), Some(dec!(7.4))),
        mm(dec!(7.4), Some(dec!(8.2))),
        mm(dec!(8.2), Some(dec!(9.4))),
        mm(dec!(9.4), Some(dec!(10.4))),
        mm(dec!(10.4), Some(dec!(11.2))),
        mm(dec!(11.2), None),
    ];
    // prong, channel, bezel
    let prices: [[u32; 3]; 11] = [
        [10, 17, 14],
        [14, 23, 17],
        [18, 31, 25],
        [20, 41, 30],
        [36, 54, 38],
        [40, 62, 45],
        [47, 71, 53],
        [54, 97, 60],
        [62, 115, 69],
        [69, 128, 72],
        [110, 133, 76],
    ];

    carat_ranges()
        .into_iter()
        .zip(millimetres)
        .zip(prices)
        .map(|((carats, millimetres), [prong, channel, bezel])| RoundSettingRate {
            carats,
            millimetres,
            prong: usd(prong),
            channel: usd(channel),
            bezel: usd(bezel),
        })
        .collect()
}

fn shaped_setting() -> Vec<ShapeRates> {
    let table: [(StoneShape, [u32; 11]); 3] = [
        (StoneShape::OvalPearHeart, [15, 20, 30, 31, 55, 62, 72, 85, 95, 107, 115]),
        (StoneShape::MarquiseEmerald, [17, 25, 32, 36, 65, 71, 85, 95, 108, 121, 127]),
        (StoneShape::Princess, [18, 25, 37, 40, 72, 81, 95, 108, 125, 140, 155]),
    ];

    table
        .into_iter()
        .map(|(shape, prices)| ShapeRates {
            shape,
            ranges: carat_ranges()
                .into_iter()
                .zip(prices)
                .map(|(carats, price)| ShapedSettingRate {
                    carats,
                    price: usd(price),
                })
                .collect(),
        })
        .collect()
}

fn tips() -> Vec<TipRates> {
    vec![
        TipRates {
            metal: TipMetal::FourteenKtSilver,
            base: [usd(15), usd(17), usd(25), usd(35)],
            additional: [usd(10), usd(12), usd(15), usd(25)],
        },
        TipRates {
            metal: TipMetal::EighteenKt,
            base: [usd(18), usd(25), usd(30), usd(40)],
            additional: [usd(12), usd(15), usd(21), usd(30)],
        },
    ]
}

fn chains() -> Vec<ChainRate> {
    use ChainService::*;

    ChainService::ALL
        .iter()
        .map(|&service| {
            let price = match service {
                Solder | Figure8Silver | SafetyChainSilver | JumpRingSolderSilver
                | TightenClasp => ChainPrice::Fixed(usd(12)),
                SolderHollow | Rivet | Tube => ChainPrice::Fixed(usd(17)),
                Figure8 | SafetyChain | JumpRingSolder => ChainPrice::ManualEstimate,
            };
            ChainRate { service, price }
        })
        .collect()
}

fn misc() -> Vec<MiscRate> {
    use MiscService::*;

    MiscService::ALL
        .iter()
        .map(|&service| {
            let price = match service {
                CleanPolishRhodium => 25,
                ReshapeRing => 17,
                RemoveStone => 6,
                PearlPostEpoxy => 6,
                SizingBumps => 35,
                UnsolderTwoRings => 46,
                StraightenHead => 23,
                PearlRestringing => 2,
                SatinFinish => 12,
                BlackEnameling => 17,
                StoneTighteningAdditional => 6,
            };
            MiscRate {
                service,
                price: usd(price),
                per_additional: (service == UnsolderTwoRings).then(|| usd(23)),
            }
        })
        .collect()
}

fn materials() -> MaterialRates {
    let purities = [
        (MaterialMetal::Gold24k, dec!(1.0)),
        (MaterialMetal::Gold22k, dec!(0.916)),
        (MaterialMetal::Gold18k, dec!(0.75)),
        (MaterialMetal::Gold14k, dec!(0.585)),
        (MaterialMetal::Gold10k, dec!(0.417)),
        (MaterialMetal::Silver, dec!(0.925)),
        (MaterialMetal::Platinum, dec!(0.95)),
        (MaterialMetal::Palladium, dec!(0.95)),
    ];
    let units = [
        (WeightUnit::Ounces, dec!(1)),
        (WeightUnit::Pennyweight, dec!(0.05)),
        (WeightUnit::Grams, dec!(0.03215)),
    ];

    MaterialRates {
        purities: purities
            .into_iter()
            .map(|(metal, purity)| MetalPurity { metal, purity })
            .collect(),
        units: units
            .into_iter()
            .map(|(unit, troy_ounces)| UnitConversion { unit, troy_ounces })
            .collect(),
        handling_fee_percent: dec!(15),
    }
}

fn build_standard() -> RateSchedule {
    RateSchedule {
        version: SCHEDULE_VERSION.to_string(),
        ring_sizing: ring_sizing(),
        round_setting: round_setting(),
        shaped_setting: shaped_setting(),
        tips: tips(),
        chains: chains(),
        misc: misc(),
        materials: materials(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn gold(color: GoldColor, stones: StoneBand) -> VariantKey {
        VariantKey::Gold { color, stones }
    }

    #[test]
    fn test_ring_sizing_known_prices() {
        let s = RateSchedule::standard();
        assert_eq!(
            s.ring_sizing_price(
                Karat::TenFourteen,
                WidthBand::From3To5,
                SizingService::OneUp,
                gold(GoldColor::Yellow, StoneBand::ZeroToFour)
            ),
            Some(usd(61))
        );
        assert_eq!(
            s.ring_sizing_price(
                Karat::Eighteen,
                WidthBand::From5To8,
                SizingService::OneUp,
                gold(GoldColor::WhiteRose, StoneBand::FiveToTwenty)
            ),
            Some(usd(91))
        );
        assert_eq!(
            s.ring_sizing_price(
                Karat::Platinum,
                WidthBand::From3To5,
                SizingService::OneUp,
                VariantKey::Platinum { stones: StoneBand::FiveToTwenty }
            ),
            Some(usd(130))
        );
        assert_eq!(
            s.ring_sizing_price(
                Karat::Silver,
                WidthBand::Under3,
                SizingService::SizeDown,
                VariantKey::Silver { with_stones: true }
            ),
            Some(usd(25))
        );
    }

    #[test]
    fn test_silver_has_no_wide_band() {
        let s = RateSchedule::standard();
        assert_eq!(
            s.ring_sizing_price(
                Karat::Silver,
                WidthBand::From5To8,
                SizingService::OneUp,
                VariantKey::Silver { with_stones: false }
            ),
            None
        );
    }

    #[test]
    fn test_wrong_family_key_is_absent() {
        let s = RateSchedule::standard();
        assert_eq!(
            s.ring_sizing_price(
                Karat::Platinum,
                WidthBand::Under3,
                SizingService::OneUp,
                gold(GoldColor::Yellow, StoneBand::ZeroToFour)
            ),
            None
        );
    }

    #[test]
    fn test_variant_key_for_karat() {
        assert_eq!(
            VariantKey::for_karat(Karat::Eighteen, Some(GoldColor::WhiteRose), Stones::FiveToTwenty),
            Some(gold(GoldColor::WhiteRose, StoneBand::FiveToTwenty))
        );
        assert_eq!(VariantKey::for_karat(Karat::Eighteen, None, Stones::ZeroToFour), None);
        assert_eq!(VariantKey::for_karat(Karat::Silver, None, Stones::ZeroToFour), None);
        assert_eq!(VariantKey::for_karat(Karat::TenFourteen, Some(GoldColor::Yellow), Stones::With), None);
        assert_eq!(
            VariantKey::for_karat(Karat::Silver, Some(GoldColor::Yellow), Stones::With),
            Some(VariantKey::Silver { with_stones: true })
        );
    }

    #[test]
    fn test_variant_key_labels() {
        assert_eq!(gold(GoldColor::WhiteRose, StoneBand::ZeroToFour).to_string(), "white_rose_04");
        assert_eq!(VariantKey::Platinum { stones: StoneBand::FiveToTwenty }.to_string(), "520");
        assert_eq!(VariantKey::Silver { with_stones: false }.to_string(), "no");
    }

    #[test]
    fn test_round_setting_boundaries() {
        let s = RateSchedule::standard();
        assert_eq!(s.round_setting_rate(dec!(0.07)).map(|r| r.prong), Some(usd(10)));
        assert_eq!(s.round_setting_rate(dec!(0.08)).map(|r| r.prong), Some(usd(14)));
        assert_eq!(s.round_setting_rate(dec!(0.50)).map(|r| r.prong), Some(usd(18)));
        assert_eq!(s.round_setting_rate(dec!(0.51)).map(|r| r.channel), Some(usd(41)));
        assert_eq!(s.round_setting_rate(dec!(12)).map(|r| r.bezel), Some(usd(76)));
    }

    #[test]
    fn test_round_setting_gaps_are_unmatched() {
        let s = RateSchedule::standard();
        assert!(s.round_setting_rate(dec!(0)).is_none());
        assert!(s.round_setting_rate(dec!(0.075)).is_none());
        assert!(s.round_setting_rate(dec!(5.005)).is_none());
    }

    #[test]
    fn test_carat_ranges_sorted_and_disjoint() {
        let s = RateSchedule::standard();
        let ranges: Vec<CaratRange> = s.round_setting.iter().map(|r| r.carats).collect();
        for pair in ranges.windows(2) {
            let upper = pair[0].max_ct.unwrap();
            assert!(upper < pair[1].min_ct);
        }
        assert!(ranges.last().unwrap().max_ct.is_none());
    }

    #[test]
    fn test_shaped_setting_prices() {
        let s = RateSchedule::standard();
        assert_eq!(s.shaped_setting_price(StoneShape::Princess, dec!(1.2)), Some(usd(81)));
        assert_eq!(s.shaped_setting_price(StoneShape::OvalPearHeart, dec!(0.01)), Some(usd(15)));
        assert_eq!(s.shaped_setting_price(StoneShape::MarquiseEmerald, dec!(9)), Some(usd(127)));
    }

    #[test]
    fn test_tip_rates_alignment() {
        let s = RateSchedule::standard();
        let r = s.tip_rates(TipMetal::EighteenKt).unwrap();
        assert_eq!(r.base_for(ProngType::FullProng), usd(30));
        assert_eq!(r.additional_for(ProngType::VProng), usd(30));
        assert_eq!(r.additional_for(ProngType::Tip), usd(12));
    }

    #[test]
    fn test_chain_and_misc_prices() {
        let s = RateSchedule::standard();
        assert_eq!(s.chain_price(ChainService::Rivet), Some(ChainPrice::Fixed(usd(17))));
        assert_eq!(s.chain_price(ChainService::Figure8), Some(ChainPrice::ManualEstimate));
        let unsolder = s.misc_rate(MiscService::UnsolderTwoRings).unwrap();
        assert_eq!(unsolder.price, usd(46));
        assert_eq!(unsolder.per_additional, Some(usd(23)));
        assert_eq!(s.misc_rate(MiscService::PearlRestringing).unwrap().price, usd(2));
    }

    #[test]
    fn test_schedule_serializes_with_labels() {
        let json = serde_json::to_value(RateSchedule::standard()).unwrap();
        assert_eq!(json["version"], SCHEDULE_VERSION);
        assert_eq!(json["ring_sizing"][0]["karat"], "10kt_14kt");
        assert_eq!(json["ring_sizing"][0]["bands"][0]["services"][0]["rates"][1]["variant"], "white_rose_04");
        assert_eq!(json["chains"][4]["price"]["kind"], "manual_estimate");
    }
}
