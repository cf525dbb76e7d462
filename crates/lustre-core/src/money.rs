//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Rounding every line to cents compounds error across an invoice:        │
//! │    12.5% off $0.05 = $0.00625 per line → $0.01 or $0.00?               │
//! │                                                                         │
//! │  OUR SOLUTION: Exact base-10 decimals                                   │
//! │    Every intermediate value is exact; we round ONCE, for display       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lustre_core::money::Money;
//!
//! let price = Money::from_dollars(18);
//! let line = price.checked_mul_quantity(3).unwrap_or_default();
//! assert_eq!(line, Money::from_dollars(54));
//! assert_eq!(line.to_string(), "$54.00");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::types::DiscountPercent;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value as an exact decimal amount of dollars.
///
/// ## Design Decisions
/// - **Decimal**: Rate tables are whole dollars, but overrides, labor, and
///   material charges carry cents and fractional intermediates
/// - **Single field tuple struct**: Zero-cost wrapper, serializes as the decimal string
/// - **No implicit rounding**: `Display` rounds, arithmetic never does
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  RateSchedule price ──► SuggestedPrice ──► LineItem.unit_price         │
/// │                                              │                          │
/// │                                              ▼                          │
/// │                                        LineItem.total                   │
/// │                                              │                          │
/// │  InvoiceTotals.subtotal ◄────────────────────┘                          │
/// │        │                                                                │
/// │        ├──► discount_amount ──► total                                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value from an exact decimal dollar amount.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from whole dollars.
    ///
    /// ## Example
    /// ```rust
    /// use lustre_core::money::Money;
    ///
    /// let price = Money::from_dollars(61);
    /// assert_eq!(price.cents(), 6100);
    /// ```
    #[inline]
    pub fn from_dollars(dollars: u32) -> Self {
        Money(Decimal::from(dollars))
    }

    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use lustre_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.to_string(), "$10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Returns the exact decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns the amount rounded to whole cents (half away from zero).
    ///
    /// Saturates at `i64::MAX` for amounts no invoice will ever reach.
    pub fn cents(&self) -> i64 {
        self.round_to_cents()
            .0
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .unwrap_or(i64::MAX)
    }

    /// Rounds to two decimal places, half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use lustre_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// let amount = Money::from_decimal(dec!(11.505));
    /// assert_eq!(amount.round_to_cents(), Money::from_cents(1151));
    /// ```
    pub fn round_to_cents(&self) -> Self {
        Money(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Multiplies money by a quantity, `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use lustre_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// assert_eq!(unit_price.checked_mul_quantity(3), Some(Money::from_cents(897)));
    /// assert_eq!(Money::from_decimal(Decimal::MAX).checked_mul_quantity(2), None);
    /// ```
    #[inline]
    pub fn checked_mul_quantity(&self, qty: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(qty)).map(Money)
    }

    /// Multiplies by a decimal factor (hours, purity, weight), `None` on overflow.
    #[inline]
    pub fn checked_mul(&self, factor: Decimal) -> Option<Self> {
        self.0.checked_mul(factor).map(Money)
    }

    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Returns `percent` of this amount, unrounded. Never larger than `self`.
    ///
    /// ## Example
    /// ```rust
    /// use lustre_core::money::Money;
    /// use lustre_core::types::DiscountPercent;
    ///
    /// let subtotal = Money::from_dollars(115);
    /// let discount = subtotal.percentage(DiscountPercent::from_whole(10));
    /// assert_eq!(discount, Money::from_cents(1150));
    /// ```
    pub fn percentage(&self, percent: DiscountPercent) -> Money {
        // percent is at most 100, so the factor is at most one and cannot overflow
        Money(self.0 * (percent.value() / Decimal::ONE_HUNDRED))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$12.34`, rounded to cents.
///
/// ## Note
/// For debugging and plain-text output. Renderers own localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_to_cents().0;
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{}${:.2}", sign, rounded.abs())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
