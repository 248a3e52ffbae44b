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
//! │  A storefront that resolves overlapping discounts by comparing float    │
//! │  candidates can pick a different "winner" on different machines.        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units                                      │
//! │    Every amount is an i64 in the smallest currency unit. Percentage     │
//! │    math runs in i128 with explicit half-up rounding, so the same input     │
//! │    always resolves to the same price everywhere.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vela_core::money::Money;
//!
//! // Create from minor units (the only constructor)
//! let price = Money::from_minor(200_000);
//!
//! // Arithmetic operations
//! let doubled = price * 2;
//! let total = price + Money::from_minor(30_000);
//!
//! // Percentage math never touches floats
//! assert_eq!(price.percent_of(10).minor(), 20_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative intermediate values for adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// EVERY monetary value in the system flows through this type: variant
/// prices, resolved discount prices, order subtotals, shipping fees, totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use vela_core::money::Money;
    ///
    /// let price = Money::from_minor(200_000);
    /// assert_eq!(price.minor(), 200_000);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
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

    /// Subtraction that clamps at zero instead of going negative.
    ///
    /// Used for fixed-amount discounts: a voucher larger than the price
    /// reduces it to zero, never below.
    ///
    /// ## Example
    /// ```rust
    /// use vela_core::money::Money;
    ///
    /// let price = Money::from_minor(40_000);
    /// let free = price.saturating_sub(Money::from_minor(50_000));
    /// assert_eq!(free, Money::zero());
    /// ```
    #[inline]
    pub fn saturating_sub(&self, other: Money) -> Money {
        Money((self.0 - other.0).max(0))
    }

    /// Computes `pct` percent of this amount with half-up rounding.
    ///
    /// ## Implementation
    /// Integer math in i128 to prevent overflow on large amounts:
    /// `(amount * pct + 50) / 100`. The +50 provides rounding (50/100 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use vela_core::money::Money;
    ///
    /// let subtotal = Money::from_minor(500_000);
    /// assert_eq!(subtotal.percent_of(10).minor(), 50_000);
    /// ```
    pub fn percent_of(&self, pct: u32) -> Money {
        let part = (self.0 as i128 * pct as i128 + 50) / 100;
        Money::from_minor(part as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use vela_core::money::Money;
    ///
    /// let unit_price = Money::from_minor(150_000);
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.minor(), 450_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money with thousands separators.
///
/// ## Note
/// This is for debugging and logs. Use frontend formatting for actual UI
/// display to handle locale and currency symbol properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        write!(f, "{}{}", sign, grouped)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor() {
        let money = Money::from_minor(200_000);
        assert_eq!(money.minor(), 200_000);
    }

    #[test]
    fn test_display_grouping() {
        assert_eq!(format!("{}", Money::from_minor(500_000)), "500,000");
        assert_eq!(format!("{}", Money::from_minor(1_250_000)), "1,250,000");
        assert_eq!(format!("{}", Money::from_minor(999)), "999");
        assert_eq!(format!("{}", Money::from_minor(-50_000)), "-50,000");
        assert_eq!(format!("{}", Money::zero()), "0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_minor(100_000);
        let b = Money::from_minor(30_000);

        assert_eq!((a + b).minor(), 130_000);
        assert_eq!((a - b).minor(), 70_000);
        let result: Money = a * 3;
        assert_eq!(result.minor(), 300_000);
    }

    #[test]
    fn test_saturating_sub_clamps_at_zero() {
        let price = Money::from_minor(40_000);
        assert_eq!(price.saturating_sub(Money::from_minor(50_000)), Money::zero());
        assert_eq!(
            price.saturating_sub(Money::from_minor(10_000)).minor(),
            30_000
        );
    }

    #[test]
    fn test_percent_of_exact() {
        let subtotal = Money::from_minor(500_000);
        assert_eq!(subtotal.percent_of(10).minor(), 50_000);
        assert_eq!(subtotal.percent_of(0).minor(), 0);
        assert_eq!(subtotal.percent_of(100).minor(), 500_000);
    }

    #[test]
    fn test_percent_of_rounds_half_up() {
        // 15% of 333 = 49.95 → 50
        assert_eq!(Money::from_minor(333).percent_of(15).minor(), 50);
        // 10% of 5 = 0.5 → 1
        assert_eq!(Money::from_minor(5).percent_of(10).minor(), 1);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_minor(150_000);
        assert_eq!(unit_price.multiply_quantity(2).minor(), 300_000);
        assert_eq!(unit_price.multiply_quantity(0).minor(), 0);
    }
}
