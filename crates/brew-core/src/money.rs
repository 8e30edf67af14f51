//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Stacked discounts in floats accumulate drift across a shift:          │
//! │    ₱270.00 - 10% - ₱15.00 can land a centavo off the receipt           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    27000 - 2700 - 1500 = 22800, exact every time                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use brew_core::money::{DiscountRate, Money};
//!
//! // Create from centavos (preferred)
//! let price = Money::from_cents(12000); // ₱120.00
//!
//! // Percentage math stays in integer space
//! let rate = DiscountRate::from_bps(1000); // 10%
//! assert_eq!(price.percentage_of(rate).cents(), 1200);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in centavos (the smallest peso unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate arithmetic may dip negative before clamping
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::money::Money;
    ///
    /// let price = Money::from_cents(12000); // Represents ₱120.00
    /// assert_eq!(price.cents(), 12000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (pesos and centavos).
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -₱5.50, not -₱4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (pesos) portion.
    #[inline]
    pub const fn pesos(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (centavos) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Returns the smaller of two amounts.
    #[inline]
    pub const fn min(self, other: Self) -> Self {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }

    /// Clamps a possibly-negative amount up to zero.
    ///
    /// Used as the outer defensive layer on totals: even if every discount
    /// computation already clamps, a payable amount must never be negative.
    #[inline]
    pub const fn clamp_non_negative(self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            self
        }
    }

    /// Subtracts, saturating at zero instead of going negative.
    #[inline]
    pub const fn saturating_sub_to_zero(self, other: Self) -> Self {
        Money(self.0 - other.0).clamp_non_negative()
    }

    /// Computes a percentage of this amount using a [`DiscountRate`].
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`
    /// The +5000 provides rounding (5000/10000 = 0.5)
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::money::{DiscountRate, Money};
    ///
    /// let subtotal = Money::from_cents(27000); // ₱270.00
    /// let rate = DiscountRate::from_bps(1000); // 10%
    ///
    /// // ₱270.00 × 10% = ₱27.00
    /// assert_eq!(subtotal.percentage_of(rate).cents(), 2700);
    /// ```
    pub fn percentage_of(&self, rate: DiscountRate) -> Money {
        // Use i128 to prevent overflow on large amounts
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(13500); // ₱135.00 incl. add-ons
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 27000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// A percentage discount rate in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10%; the catalog may carry fractional percentages like 12.5%
/// (1250 bps) which integers represent exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        DiscountRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// A valid discount percentage lies in [0%, 100%).
    #[inline]
    pub const fn is_valid_discount(&self) -> bool {
        self.0 < 10_000
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging. The terminal UI formats amounts itself
/// to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₱{}.{:02}", sign, self.pesos().abs(), self.cents_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
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

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(12099);
        assert_eq!(money.cents(), 12099);
        assert_eq!(money.pesos(), 120);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(120, 50);
        assert_eq!(money.cents(), 12050);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(12099)), "₱120.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "₱5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-₱5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "₱0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!(vec![a, b, b].into_iter().sum::<Money>().cents(), 2000);
    }

    #[test]
    fn test_percentage_of() {
        // ₱270.00 at 10% = ₱27.00
        let subtotal = Money::from_cents(27000);
        let rate = DiscountRate::from_bps(1000);
        assert_eq!(subtotal.percentage_of(rate).cents(), 2700);
    }

    #[test]
    fn test_percentage_of_with_rounding() {
        // ₱10.01 at 12.5% = 125.125 centavos → 125 centavos
        let amount = Money::from_cents(1001);
        let rate = DiscountRate::from_bps(1250);
        assert_eq!(amount.percentage_of(rate).cents(), 125);
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(Money::from_cents(-100).clamp_non_negative().cents(), 0);
        assert_eq!(Money::from_cents(100).clamp_non_negative().cents(), 100);
    }

    #[test]
    fn test_saturating_sub_to_zero() {
        let subtotal = Money::from_cents(27000);
        let huge_discount = Money::from_cents(35000);
        assert_eq!(subtotal.saturating_sub_to_zero(huge_discount).cents(), 0);

        let small_discount = Money::from_cents(2700);
        assert_eq!(
            subtotal.saturating_sub_to_zero(small_discount).cents(),
            24300
        );
    }

    #[test]
    fn test_min() {
        let a = Money::from_cents(27000);
        let b = Money::from_cents(35000);
        assert_eq!(a.min(b), a);
        assert_eq!(b.min(a), a);
    }

    #[test]
    fn test_discount_rate_bounds() {
        assert!(DiscountRate::from_bps(0).is_valid_discount());
        assert!(DiscountRate::from_bps(9999).is_valid_discount());
        assert!(!DiscountRate::from_bps(10_000).is_valid_discount());
    }

    #[test]
    fn test_discount_rate_from_percentage() {
        let rate = DiscountRate::from_percentage(12.5);
        assert_eq!(rate.bps(), 1250);
        assert!((rate.percentage() - 12.5).abs() < 0.001);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_cents(100);
        assert!(positive.is_positive());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
    }
}
