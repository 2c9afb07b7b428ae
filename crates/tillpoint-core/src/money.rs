//! # Money Module
//!
//! Provides the `Money` and `Quantity` types for currency-safe arithmetic.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Summing N line totals in decimal floats silently drifts.               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units                                      │
//! │    Money    = i64 cents        ($19.98 = 1998)                          │
//! │    Quantity = i64 hundredths   (2.50 kg = 250)                          │
//! │                                                                         │
//! │  Decimal values exist ONLY at the serde boundary. Conversion rounds     │
//! │  half away from zero at the 2-decimal boundary, once, on the way in.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tillpoint_core::money::{Money, Quantity};
//!
//! let price = Money::try_from_decimal(9.99).unwrap();
//! let qty = Quantity::try_from_decimal(2.0).unwrap();
//!
//! assert_eq!(price.line_total(qty).unwrap().cents(), 1998);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::error::MoneyError;

/// Largest magnitude (in minor units) accepted from a decimal input.
///
/// 10^15 minor units is ten trillion major units - far beyond any retail
/// amount - and is exactly representable in f64, so the boundary conversion
/// never loses integer precision.
const MAX_MINOR_UNITS: i64 = 1_000_000_000_000_000;

/// Divides with round-half-away-from-zero semantics.
///
/// `i128` is used by callers to avoid overflow before the division.
const fn div_round_half_away(numerator: i128, divisor: i128) -> i128 {
    if numerator >= 0 {
        (numerator + divisor / 2) / divisor
    } else {
        -((-numerator + divisor / 2) / divisor)
    }
}

/// Converts a decimal value to minor units (value × 100), rounding half away
/// from zero at the 2-decimal boundary.
fn decimal_to_minor_units(value: f64) -> Result<i64, MoneyError> {
    if !value.is_finite() {
        return Err(MoneyError::NotFinite);
    }

    // f64::round rounds half away from zero, matching the system-wide rule.
    let minor = (value * 100.0).round();
    if minor.abs() > MAX_MINOR_UNITS as f64 {
        return Err(MoneyError::OutOfRange);
    }

    Ok(minor as i64)
}

// =============================================================================
// Money
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: lets intermediate arithmetic (subtotal - discount)
///   express deficits before they are rejected
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Decimal only at the boundary**: [`Money::try_from_decimal`] and
///   [`Money::to_decimal`] are the ONLY places decimal currency exists
///
/// `to_decimal(try_from_decimal(x))` round-trips exactly for every value
/// this system produces: integers up to [`MAX_MINOR_UNITS`] are exact in f64.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is strictly positive.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Converts an arbitrary decimal currency value into minor units.
    ///
    /// Rounds half away from zero at the 2-decimal boundary. Fails on NaN,
    /// infinity and values beyond the representable range.
    ///
    /// ## Example
    /// ```rust
    /// use tillpoint_core::money::Money;
    ///
    /// assert_eq!(Money::try_from_decimal(9.99).unwrap().cents(), 999);
    /// assert_eq!(Money::try_from_decimal(0.1 + 0.2).unwrap().cents(), 30);
    /// assert!(Money::try_from_decimal(f64::NAN).is_err());
    /// ```
    pub fn try_from_decimal(value: f64) -> Result<Self, MoneyError> {
        decimal_to_minor_units(value).map(Money)
    }

    /// Converts back to a decimal value for storage/presentation boundaries.
    ///
    /// Exact inverse of [`Money::try_from_decimal`] for any value produced
    /// by this system.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Computes a line total: `round(price × quantity)` in minor units,
    /// half away from zero.
    ///
    /// Fails with [`MoneyError::OutOfRange`] when the product exceeds
    /// [`MAX_MINOR_UNITS`]. Price and quantity each pass the boundary range
    /// check on their own, so their product can still overflow; the result
    /// is held to the same bound as any other accepted amount.
    ///
    /// ## Example
    /// ```rust
    /// use tillpoint_core::money::{Money, Quantity};
    ///
    /// let price = Money::from_cents(999);             // $9.99
    /// let qty = Quantity::from_hundredths(250);       // 2.50 units
    /// // 999 × 2.5 = 2497.5 → rounds to 2498
    /// assert_eq!(price.line_total(qty).unwrap().cents(), 2498);
    /// ```
    pub fn line_total(&self, quantity: Quantity) -> Result<Money, MoneyError> {
        // cents × hundredths / 100, in i128 to prevent overflow
        let raw = self.0 as i128 * quantity.hundredths() as i128;
        let cents = div_round_half_away(raw, 100);
        if cents.abs() > MAX_MINOR_UNITS as i128 {
            return Err(MoneyError::OutOfRange);
        }
        Ok(Money(cents as i64))
    }
}

/// Display implementation shows money in a human-readable format.
/// Used in error messages; API formatting goes through `to_decimal`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
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

// =============================================================================
// Quantity
// =============================================================================

/// A stock or sale quantity in hundredths of a unit.
///
/// Two-decimal fractional precision supports weighed goods (2.50 kg = 250).
/// Stored and compared as integers for the same reason [`Money`] is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Quantity(i64);

impl Quantity {
    /// Creates a quantity from hundredths of a unit.
    #[inline]
    pub const fn from_hundredths(hundredths: i64) -> Self {
        Quantity(hundredths)
    }

    /// Returns the quantity in hundredths.
    #[inline]
    pub const fn hundredths(&self) -> i64 {
        self.0
    }

    /// Zero quantity.
    #[inline]
    pub const fn zero() -> Self {
        Quantity(0)
    }

    /// Checks if the quantity is strictly positive.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Converts a decimal quantity into hundredths, rounding half away from
    /// zero at the 2-decimal boundary. Fails on non-finite input.
    pub fn try_from_decimal(value: f64) -> Result<Self, MoneyError> {
        decimal_to_minor_units(value).map(Quantity)
    }

    /// Converts back to a decimal quantity for the presentation boundary.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

impl Add for Quantity {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Quantity(self.0 + other.0)
    }
}

impl AddAssign for Quantity {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Quantity {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Quantity(self.0 - other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(Money::try_from_decimal(9.99).unwrap().cents(), 999);
        assert_eq!(Money::try_from_decimal(0.0).unwrap().cents(), 0);
        assert_eq!(Money::try_from_decimal(100.0).unwrap().cents(), 10000);
        // Float drift collapses at the boundary
        assert_eq!(Money::try_from_decimal(0.1 + 0.2).unwrap().cents(), 30);
    }

    #[test]
    fn test_money_from_decimal_rejects_non_finite() {
        assert!(Money::try_from_decimal(f64::NAN).is_err());
        assert!(Money::try_from_decimal(f64::INFINITY).is_err());
        assert!(Money::try_from_decimal(f64::NEG_INFINITY).is_err());
        assert!(Money::try_from_decimal(1e18).is_err());
    }

    #[test]
    fn test_money_round_trip() {
        for cents in [0i64, 1, 99, 100, 999, 1998, 123_456_789] {
            let money = Money::from_cents(cents);
            assert_eq!(
                Money::try_from_decimal(money.to_decimal()).unwrap().cents(),
                cents
            );
        }
    }

    #[test]
    fn test_line_total_exact() {
        // 9.99 × 2 = 19.98, no rounding involved
        let price = Money::from_cents(999);
        let qty = Quantity::from_hundredths(200);
        assert_eq!(price.line_total(qty).unwrap().cents(), 1998);
    }

    #[test]
    fn test_line_total_rounds_half_away_from_zero() {
        // 999 cents × 2.50 = 2497.5 → 2498 (integer math, no float fuzz)
        let price = Money::from_cents(999);
        let qty = Quantity::from_hundredths(250);
        assert_eq!(price.line_total(qty).unwrap().cents(), 2498);

        // 333 cents × 0.50 = 166.5 → 167
        let price = Money::from_cents(333);
        let qty = Quantity::from_hundredths(50);
        assert_eq!(price.line_total(qty).unwrap().cents(), 167);

        // 333 cents × 0.49 = 163.17 → 163
        let qty = Quantity::from_hundredths(49);
        assert_eq!(price.line_total(qty).unwrap().cents(), 163);
    }

    #[test]
    fn test_line_total_overflow_is_rejected() {
        // Price and quantity each sit exactly at the accepted boundary, so
        // both clear try_from_decimal on their own; their product (10^28
        // cents) cannot be represented and must error, never wrap
        let price = Money::from_cents(MAX_MINOR_UNITS);
        let qty = Quantity::from_hundredths(MAX_MINOR_UNITS);
        assert_eq!(price.line_total(qty), Err(MoneyError::OutOfRange));

        // One past the representable result is rejected too
        let price = Money::from_cents(MAX_MINOR_UNITS);
        let qty = Quantity::from_hundredths(101);
        assert_eq!(price.line_total(qty), Err(MoneyError::OutOfRange));

        // At the bound itself the total is accepted and exact
        let qty = Quantity::from_hundredths(100);
        assert_eq!(price.line_total(qty).unwrap().cents(), MAX_MINOR_UNITS);

        // Large negative products are bounded symmetrically
        let price = Money::from_cents(-MAX_MINOR_UNITS);
        let qty = Quantity::from_hundredths(MAX_MINOR_UNITS);
        assert_eq!(price.line_total(qty), Err(MoneyError::OutOfRange));
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(250);

        assert_eq!((a + b).cents(), 1250);
        assert_eq!((a - b).cents(), 750);

        let mut acc = Money::zero();
        acc += a;
        acc += b;
        assert_eq!(acc.cents(), 1250);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(format!("{}", Money::from_cents(1998)), "$19.98");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_quantity_from_decimal() {
        assert_eq!(Quantity::try_from_decimal(2.0).unwrap().hundredths(), 200);
        assert_eq!(Quantity::try_from_decimal(2.5).unwrap().hundredths(), 250);
        assert_eq!(Quantity::try_from_decimal(0.01).unwrap().hundredths(), 1);
        assert!(Quantity::try_from_decimal(f64::NAN).is_err());
    }

    #[test]
    fn test_quantity_below_precision_rounds_to_zero() {
        // 0.001 rounds to zero hundredths; the validator rejects it as
        // a non-positive quantity
        let qty = Quantity::try_from_decimal(0.001).unwrap();
        assert!(!qty.is_positive());
    }

    #[test]
    fn test_quantity_display() {
        assert_eq!(format!("{}", Quantity::from_hundredths(250)), "2.50");
        assert_eq!(format!("{}", Quantity::from_hundredths(1000)), "10.00");
        assert_eq!(format!("{}", Quantity::from_hundredths(5)), "0.05");
    }
}
