//! # Domain Types
//!
//! Core domain types used throughout Lustre.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │ Selection enums │   │ DiscountPercent │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  1 RingSizing   │   │  Karat          │   │  0 ..= 100      │       │
//! │  │  2 RoundSetting │   │  WidthBand      │   │  exact decimal  │       │
//! │  │  ...            │   │  SettingType    │   └─────────────────┘       │
//! │  │  9 Material     │   │  ChainService.. │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Labels
//! Every selection enum has a canonical snake_case label (`10kt_14kt`,
//! `3.01-5.0`, `1_up`). Labels appear in line item descriptions, in JSON,
//! and are what `FromStr` accepts (plus a few legacy aliases).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::ValidationResult;

/// Declares a selection enum with its canonical label and accepted aliases.
macro_rules! selection_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal $(| $alias:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $label $(, alias = $alias)*)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in schedule order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical label used in descriptions and JSON.
            pub const fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($label $(| $alias)* => Ok($name::$variant),)+
                    _ => Err(ValidationError::NotAllowed {
                        field: $field.to_string(),
                        allowed: Self::ALL.iter().map(|v| v.label().to_string()).collect(),
                    }),
                }
            }
        }
    };
}

// =============================================================================
// Discount Percent
// =============================================================================

/// A discount percentage in `[0, 100]`.
///
/// ## Why Validate Here?
/// The totals calculator is a pure function and never clamps. Out-of-range
/// percentages are rejected (or explicitly clamped) when the value is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct DiscountPercent(Decimal);

impl DiscountPercent {
    /// Creates a discount percentage, rejecting values outside `[0, 100]`.
    pub fn new(percent: Decimal) -> ValidationResult<Self> {
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(ValidationError::OutOfRange {
                field: "discount percent".to_string(),
                min: 0,
                max: 100,
            });
        }
        Ok(DiscountPercent(percent))
    }

    /// Creates a discount percentage, clamping into `[0, 100]`.
    pub fn clamped(percent: Decimal) -> Self {
        DiscountPercent(percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED))
    }

    /// Creates a whole-number discount percentage (values above 100 clamp).
    pub fn from_whole(percent: u8) -> Self {
        DiscountPercent(Decimal::from(percent.min(100)))
    }

    /// No discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountPercent(Decimal::ZERO)
    }

    /// Returns the percentage value (10 = 10%).
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Checks if there is no discount.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for DiscountPercent {
    fn default() -> Self {
        DiscountPercent::zero()
    }
}

impl TryFrom<Decimal> for DiscountPercent {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        DiscountPercent::new(value)
    }
}

impl From<DiscountPercent> for Decimal {
    fn from(percent: DiscountPercent) -> Self {
        percent.0
    }
}

impl fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

// =============================================================================
// Category
// =============================================================================

/// Service category, numbered the way the operator picks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    RingSizing = 1,
    RoundStoneSetting = 2,
    ShapedStoneSetting = 3,
    TipsAndProngs = 4,
    Chains = 5,
    Misc = 6,
    Custom = 7,
    Labor = 8,
    Material = 9,
}

impl Category {
    /// Every category, in menu order.
    pub const ALL: [Category; 9] = [
        Category::RingSizing,
        Category::RoundStoneSetting,
        Category::ShapedStoneSetting,
        Category::TipsAndProngs,
        Category::Chains,
        Category::Misc,
        Category::Custom,
        Category::Labor,
        Category::Material,
    ];

    /// Menu number (1-9).
    #[inline]
    pub const fn number(&self) -> u8 {
        *self as u8
    }

    /// Human-readable menu name.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Category::RingSizing => "Ring Sizing",
            Category::RoundStoneSetting => "Stone Setting (Round)",
            Category::ShapedStoneSetting => "Stone Setting (Other Shapes)",
            Category::TipsAndProngs => "Tips and Prongs",
            Category::Chains => "Chains",
            Category::Misc => "Miscellaneous",
            Category::Custom => "Custom",
            Category::Labor => "Labor",
            Category::Material => "Material",
        }
    }
}

impl TryFrom<u8> for Category {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.number() == value)
            .ok_or(ValidationError::OutOfRange {
                field: "category".to_string(),
                min: 1,
                max: Category::ALL.len() as i64,
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// =============================================================================
// Ring Sizing Selections
// =============================================================================

/// Ring metal for sizing.
///
/// ## Degraded Input
/// Unknown karat text never fails: [`Karat::parse_lenient`] (and JSON
/// deserialization) fall back to `10kt_14kt` and log a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Karat {
    #[default]
    #[serde(rename = "10kt_14kt")]
    TenFourteen,
    #[serde(rename = "18kt")]
    Eighteen,
    #[serde(rename = "platinum")]
    Platinum,
    #[serde(rename = "silver")]
    Silver,
}

impl Karat {
    pub const ALL: [Karat; 4] = [
        Karat::TenFourteen,
        Karat::Eighteen,
        Karat::Platinum,
        Karat::Silver,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            Karat::TenFourteen => "10kt_14kt",
            Karat::Eighteen => "18kt",
            Karat::Platinum => "platinum",
            Karat::Silver => "silver",
        }
    }

    /// Parses a karat, substituting `10kt_14kt` for anything unrecognized.
    pub fn parse_lenient(s: &str) -> Karat {
        s.parse().unwrap_or_else(|_| {
            warn!(input = %s, "Unknown karat, defaulting to 10kt_14kt");
            Karat::default()
        })
    }
}

impl FromStr for Karat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "10kt_14kt" | "10kt-14kt" | "10kt" | "14kt" => Ok(Karat::TenFourteen),
            "18kt" => Ok(Karat::Eighteen),
            "platinum" => Ok(Karat::Platinum),
            "silver" => Ok(Karat::Silver),
            _ => Err(ValidationError::NotAllowed {
                field: "karat".to_string(),
                allowed: Karat::ALL.iter().map(|k| k.label().to_string()).collect(),
            }),
        }
    }
}

impl From<String> for Karat {
    fn from(s: String) -> Self {
        Karat::parse_lenient(&s)
    }
}

impl fmt::Display for Karat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

selection_enum! {
    /// Ring shank width band (millimetres).
    WidthBand, "width" {
        /// Less than 3.0mm.
        Under3 => "<3.0" | "thin",
        /// 3.01 to 5.0mm.
        From3To5 => "3.01-5.0" | "medium",
        /// 5.01 to 8.0mm.
        From5To8 => "5.01-8.0" | "wide",
    }
}

selection_enum! {
    /// Ring sizing service.
    SizingService, "service" {
        /// Size down, up to three sizes.
        SizeDown => "small_3" | "smaller",
        /// Size up one size.
        OneUp => "1_up" | "1-up",
        /// Each additional size up.
        AdditionalUp => "add_up" | "addt-up",
    }
}

selection_enum! {
    /// Gold color family (affects rhodium work, hence price).
    GoldColor, "color" {
        Yellow => "yellow",
        WhiteRose => "white_rose" | "white-rose",
    }
}

selection_enum! {
    /// Stone selection as the operator enters it for ring sizing.
    ///
    /// Gold and platinum price by stone count band; silver by whether the
    /// ring has stones at all.
    Stones, "stones" {
        ZeroToFour => "04" | "0-4",
        FiveToTwenty => "520" | "5-20",
        Without => "no" | "without",
        With => "with",
    }
}

// =============================================================================
// Stone Setting Selections
// =============================================================================

selection_enum! {
    /// Setting style for round stones.
    SettingType, "setting type" {
        Prong => "prong",
        Channel => "channel" | "chanel",
        Bezel => "bezel",
    }
}

selection_enum! {
    /// Non-round stone shape groups priced together.
    StoneShape, "shape" {
        OvalPearHeart => "oval_pear_heart" | "oval-pear-heart",
        MarquiseEmerald => "marquise_emerald" | "marquise-emerald",
        Princess => "princess",
    }
}

// =============================================================================
// Tips and Prongs Selections
// =============================================================================

selection_enum! {
    /// Metal column of the tips-and-prongs table.
    TipMetal, "metal" {
        FourteenKtSilver => "14kt_silver" | "14kt-silver",
        EighteenKt => "18kt",
    }
}

selection_enum! {
    /// Retipping / prong work type.
    ProngType, "type" {
        Tip => "tip",
        Prong => "prong",
        FullProng => "full_prong" | "full-prong",
        VProng => "v_prong" | "v-prong",
    }
}

impl ProngType {
    /// Position in the additional-unit price array.
    pub const fn index(&self) -> usize {
        match self {
            ProngType::Tip => 0,
            ProngType::Prong => 1,
            ProngType::FullProng => 2,
            ProngType::VProng => 3,
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            ProngType::Tip => "Tip",
            ProngType::Prong => "Prong",
            ProngType::FullProng => "Full Prong",
            ProngType::VProng => "V Prong",
        }
    }
}

// =============================================================================
// Chain and Misc Services
// =============================================================================

selection_enum! {
    /// Chain repair service. `_ss` variants are sterling silver.
    ChainService, "chain service" {
        Solder => "ea_solder" | "solder",
        SolderHollow => "ea_solder_hollow" | "solder-hollow",
        Rivet => "rivet",
        Tube => "tube",
        Figure8 => "figure8",
        Figure8Silver => "figure8_ss",
        SafetyChain => "safety_chain" | "safety",
        SafetyChainSilver => "safety_chain_ss",
        JumpRingSolder => "jump_ring_solder" | "jumpring",
        JumpRingSolderSilver => "jump_ring_solder_ss",
        TightenClasp => "tighten_clasp" | "tighten",
    }
}

selection_enum! {
    /// Miscellaneous bench service.
    MiscService, "misc service" {
        CleanPolishRhodium => "clean_polish_rhodium" | "clean-polish-rhodium",
        ReshapeRing => "reshape_ring" | "reshape",
        RemoveStone => "remove_stone" | "remove-stone",
        PearlPostEpoxy => "pearl_post_epoxy" | "pearl-epoxy",
        SizingBumps => "sizing_bumps" | "sizing-bumps",
        UnsolderTwoRings => "unsolder_two_rings" | "unsolder",
        StraightenHead => "straighten_head" | "straighten-head",
        PearlRestringing => "pearl_restringing" | "pearl-restring",
        SatinFinish => "satin_finish" | "satin-finish",
        BlackEnameling => "black_enameling" | "black-enamel",
        /// Each stone tightened beyond the first ten.
        StoneTighteningAdditional => "stone_tightening_additional" | "stone-tightening-addt",
    }
}

impl MiscService {
    pub const fn display_name(&self) -> &'static str {
        match self {
            MiscService::CleanPolishRhodium => "Clean/Polish/Rhodium",
            MiscService::ReshapeRing => "Reshape Ring",
            MiscService::RemoveStone => "Remove Stone",
            MiscService::PearlPostEpoxy => "Pearl Post Epoxy",
            MiscService::SizingBumps => "Sizing Bumps",
            MiscService::UnsolderTwoRings => "Unsolder Two Rings",
            MiscService::StraightenHead => "Straighten Head",
            MiscService::PearlRestringing => "Pearl Re-Stringing (per inch)",
            MiscService::SatinFinish => "Satin Finish",
            MiscService::BlackEnameling => "Black Enameling",
            MiscService::StoneTighteningAdditional => "Stone Tightening (ea. addt'l over 10)",
        }
    }
}

// =============================================================================
// Material Selections
// =============================================================================

selection_enum! {
    /// Metal sold by weight.
    MaterialMetal, "material metal" {
        Gold24k => "gold_24k" | "gold-24k",
        Gold22k => "gold_22k" | "gold-22k",
        Gold18k => "gold_18k" | "gold-18k",
        Gold14k => "gold_14k" | "gold-14k",
        Gold10k => "gold_10k" | "gold-10k",
        Silver => "silver",
        Platinum => "platinum",
        Palladium => "palladium",
    }
}

impl MaterialMetal {
    pub const fn display_name(&self) -> &'static str {
        match self {
            MaterialMetal::Gold24k => "24k Gold",
            MaterialMetal::Gold22k => "22k Gold",
            MaterialMetal::Gold18k => "18k Gold",
            MaterialMetal::Gold14k => "14k Gold",
            MaterialMetal::Gold10k => "10k Gold",
            MaterialMetal::Silver => "Sterling Silver",
            MaterialMetal::Platinum => "Platinum",
            MaterialMetal::Palladium => "Palladium",
        }
    }
}

selection_enum! {
    /// Weight unit for material charges.
    WeightUnit, "unit" {
        Ounces => "oz",
        Pennyweight => "dwt",
        Grams => "grams" | "g",
    }
}

impl WeightUnit {
    /// Short suffix for descriptions (`2.5dwt`, `3g`).
    pub const fn suffix(&self) -> &'static str {
        match self {
            WeightUnit::Ounces => "oz",
            WeightUnit::Pennyweight => "dwt",
            WeightUnit::Grams => "g",
        }
    }
}

/// Market spot prices per troy ounce of pure metal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotPrices {
    pub gold: Money,
    pub silver: Money,
    pub platinum: Money,
    pub palladium: Money,
}

impl SpotPrices {
    /// Spot price for the pure metal behind `metal`.
    pub fn price_for(&self, metal: MaterialMetal) -> Money {
        match metal {
            MaterialMetal::Gold24k
            | MaterialMetal::Gold22k
            | MaterialMetal::Gold18k
            | MaterialMetal::Gold14k
            | MaterialMetal::Gold10k => self.gold,
            MaterialMetal::Silver => self.silver,
            MaterialMetal::Platinum => self.platinum,
            MaterialMetal::Palladium => self.palladium,
        }
    }
}

impl Default for SpotPrices {
    fn default() -> Self {
        SpotPrices {
            gold: Money::from_dollars(4000),
            silver: Money::from_dollars(30),
            platinum: Money::from_dollars(1000),
            palladium: Money::from_dollars(1100),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_discount_percent_bounds() {
        assert!(DiscountPercent::new(dec!(0)).is_ok());
        assert!(DiscountPercent::new(dec!(100)).is_ok());
        assert!(DiscountPercent::new(dec!(12.5)).is_ok());
        assert!(DiscountPercent::new(dec!(-0.01)).is_err());
        assert!(DiscountPercent::new(dec!(100.01)).is_err());
    }

    #[test]
    fn test_discount_percent_clamped() {
        assert_eq!(DiscountPercent::clamped(dec!(150)).value(), dec!(100));
        assert_eq!(DiscountPercent::clamped(dec!(-5)).value(), dec!(0));
        assert_eq!(DiscountPercent::from_whole(250).value(), dec!(100));
    }

    #[test]
    fn test_discount_percent_deserialize_rejects_out_of_range() {
        let ok: DiscountPercent = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(ok.value(), dec!(12.5));
        assert!(serde_json::from_str::<DiscountPercent>("\"101\"").is_err());
    }

    #[test]
    fn test_category_numbers() {
        assert_eq!(Category::try_from(1).unwrap(), Category::RingSizing);
        assert_eq!(Category::try_from(7).unwrap(), Category::Custom);
        assert_eq!(Category::try_from(9).unwrap(), Category::Material);
        assert!(Category::try_from(0).is_err());
        assert!(Category::try_from(10).is_err());
    }

    #[test]
    fn test_karat_lenient_fallback() {
        assert_eq!(Karat::parse_lenient("18kt"), Karat::Eighteen);
        assert_eq!(Karat::parse_lenient("PLATINUM"), Karat::Platinum);
        assert_eq!(Karat::parse_lenient("22kt"), Karat::TenFourteen);
        assert_eq!(Karat::parse_lenient(""), Karat::TenFourteen);

        let k: Karat = serde_json::from_str("\"unobtainium\"").unwrap();
        assert_eq!(k, Karat::TenFourteen);
        assert_eq!(serde_json::to_string(&Karat::Silver).unwrap(), "\"silver\"");
    }

    #[test]
    fn test_selection_labels_and_aliases() {
        assert_eq!("<3.0".parse::<WidthBand>().unwrap(), WidthBand::Under3);
        assert_eq!("wide".parse::<WidthBand>().unwrap(), WidthBand::From5To8);
        assert_eq!("chanel".parse::<SettingType>().unwrap(), SettingType::Channel);
        assert_eq!("1-up".parse::<SizingService>().unwrap(), SizingService::OneUp);
        assert_eq!(SizingService::AdditionalUp.to_string(), "add_up");
        assert!("sideways".parse::<SettingType>().is_err());
    }

    #[test]
    fn test_selection_serde_uses_labels() {
        let json = serde_json::to_string(&WidthBand::From3To5).unwrap();
        assert_eq!(json, "\"3.01-5.0\"");
        let shape: StoneShape = serde_json::from_str("\"marquise-emerald\"").unwrap();
        assert_eq!(shape, StoneShape::MarquiseEmerald);
    }

    #[test]
    fn test_prong_type_index_alignment() {
        let indices: Vec<usize> = ProngType::ALL.iter().map(|p| p.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_spot_prices_for_metal() {
        let spot = SpotPrices::default();
        assert_eq!(spot.price_for(MaterialMetal::Gold14k), Money::from_dollars(4000));
        assert_eq!(spot.price_for(MaterialMetal::Palladium), Money::from_dollars(1100));
    }
}
