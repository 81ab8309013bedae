//! # Money Module
//!
//! Provides the `Money` type for monetary values and the locale-invariant
//! parsers that turn user-entered price / stock text into numbers.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Prices are parsed as exact decimals, rounded once to the cent,      │
//! │    and every later sum or product saturates at the i64 bounds.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Parsing Rules
//! ```text
//! "  -35  "    → trim → "-35"   → -35.00
//! "\t12.5\n"   → trim → "12.5"  → 12.50
//! "12,5"       → NotANumber    ('.' is the only decimal separator)
//! "abc"        → NotANumber
//! ```
//!
//! ## Usage
//! ```rust
//! use shopfront_core::money::{parse_price, Money};
//!
//! let price = parse_price(" 10.99 ").unwrap();
//! assert_eq!(price, Money::from_cents(1099));
//!
//! let doubled = price * 2;
//! assert_eq!(doubled.cents(), 2198);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ParseError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: a cart line with a negative quantity yields a negative value
/// - **Single field tuple struct**: Zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
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

    /// Divides into `parts` equal shares, rounding half to even at the cent.
    ///
    /// Dividing by zero yields zero, which is what an empty cart's average
    /// is defined to be.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(6000).divide_rounded(3).cents(), 2000);
    /// assert_eq!(Money::from_cents(1000).divide_rounded(3).cents(), 333);
    /// assert_eq!(Money::from_cents(5).divide_rounded(2).cents(), 2); // 2.5 → 2
    /// assert_eq!(Money::from_cents(100).divide_rounded(0), Money::zero());
    /// ```
    pub fn divide_rounded(&self, parts: i64) -> Money {
        if parts == 0 {
            return Money::zero();
        }

        let share = (Decimal::from(self.0) / Decimal::from(parts))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);

        // |self / parts| <= |self|, so the share always fits back into i64
        Money(share.to_i64().unwrap_or_default())
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Strips leading/trailing whitespace and control characters.
///
/// Only the ends are touched: an embedded tab still makes the text non-numeric.
fn trim_numeric(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c.is_control())
}

/// Parses a decimal using `.` as separator, independent of locale.
///
/// The value is exact: nothing is rounded.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use shopfront_core::money::parse_decimal;
///
/// assert_eq!(parse_decimal(" 0.001 ").unwrap(), Decimal::new(1, 3));
/// ```
pub fn parse_decimal(text: &str) -> Result<Decimal, ParseError> {
    let trimmed = trim_numeric(text);
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    Decimal::from_str(trimmed).map_err(|_| ParseError::NotANumber(trimmed.to_string()))
}

/// Parses a price into cents.
///
/// The exact decimal is rounded to the cent with half-to-even rounding.
/// Amounts whose cents do not fit an i64 are `NotANumber`.
///
/// ## Example
/// ```rust
/// use shopfront_core::money::parse_price;
///
/// assert_eq!(parse_price("  -35  ").unwrap().cents(), -3500);
/// assert_eq!(parse_price("0.125").unwrap().cents(), 12);
/// assert!(parse_price("ten").is_err());
/// ```
pub fn parse_price(text: &str) -> Result<Money, ParseError> {
    let value = parse_decimal(text)?;
    let not_a_number = || ParseError::NotANumber(trim_numeric(text).to_string());

    let cents = value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|c| c.to_i64())
        .ok_or_else(not_a_number)?;

    Ok(Money(cents))
}

/// Parses a stock quantity as a signed integer, after the same trimming as prices.
///
/// ## Example
/// ```rust
/// use shopfront_core::money::parse_quantity;
///
/// assert_eq!(parse_quantity(" 12 ").unwrap(), 12);
/// assert!(parse_quantity("1.5").is_err());
/// ```
pub fn parse_quantity(text: &str) -> Result<i64, ParseError> {
    let trimmed = trim_numeric(text);
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    trimmed
        .parse::<i64>()
        .map_err(|_| ParseError::NotAnInteger(trimmed.to_string()))
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging. Presentation layers format for their locale.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturating: a total past the i64 range clamps instead of wrapping.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Multiplication by a line quantity, saturating like [`Add`].
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

impl Sum for Money {
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
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
        assert_eq!(Money::from_major(30).cents(), 3000);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!((a * -2).cents(), -2000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_parse_price_trims_whitespace_and_control_characters() {
        assert_eq!(parse_price("  -35  ").unwrap(), Money::from_major(-35));
        assert_eq!(parse_price("\u{7}12.5\u{1b}").unwrap().cents(), 1250);
        assert_eq!(parse_price("\t\n 3 \r\n").unwrap().cents(), 300);
        assert_eq!(parse_price("+4.20").unwrap().cents(), 420);
    }

    #[test]
    fn test_parse_price_rejects_non_numeric_content() {
        assert_eq!(parse_price(""), Err(ParseError::Empty));
        assert_eq!(parse_price(" \t "), Err(ParseError::Empty));
        assert!(matches!(parse_price("ten"), Err(ParseError::NotANumber(_))));
        assert!(matches!(parse_price("12,5"), Err(ParseError::NotANumber(_))));
        assert!(matches!(parse_price("1\t2"), Err(ParseError::NotANumber(_))));
        assert!(matches!(parse_price("12.5abc"), Err(ParseError::NotANumber(_))));
    }

    #[test]
    fn test_parse_price_rounds_half_to_even() {
        assert_eq!(parse_price("0.125").unwrap().cents(), 12);
        assert_eq!(parse_price("0.135").unwrap().cents(), 14);
        assert_eq!(parse_price("0.001").unwrap().cents(), 0);
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_overflowing() {
        let huge = parse_price("90000000000000000").unwrap();

        assert_eq!((huge * 2).cents(), i64::MAX);
        assert_eq!((huge * -2).cents(), i64::MIN);
        assert_eq!((huge * 2 + Money::from_cents(1)).cents(), i64::MAX);

        let total: Money = vec![huge * 2, huge * 2].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);
    }

    #[test]
    fn test_parse_decimal_keeps_full_precision() {
        assert_eq!(parse_decimal("0.001").unwrap(), Decimal::new(1, 3));
        assert_eq!(parse_decimal(" -35 ").unwrap(), Decimal::from(-35));
        assert_eq!(parse_decimal("\t"), Err(ParseError::Empty));
        assert!(matches!(parse_decimal("1,5"), Err(ParseError::NotANumber(_))));
    }

    #[test]
    fn test_parse_price_rejects_amounts_beyond_cents_range() {
        // Valid decimal, but its cents overflow i64
        assert!(matches!(
            parse_price("100000000000000000000"),
            Err(ParseError::NotANumber(_))
        ));
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("5"), Ok(5));
        assert_eq!(parse_quantity("  -35  "), Ok(-35));
        assert_eq!(parse_quantity("\u{0}7\u{0}"), Ok(7));
        assert_eq!(parse_quantity(""), Err(ParseError::Empty));
        assert!(matches!(parse_quantity("1.5"), Err(ParseError::NotAnInteger(_))));
        assert!(matches!(parse_quantity("seven"), Err(ParseError::NotAnInteger(_))));
    }

    #[test]
    fn test_divide_rounded() {
        assert_eq!(Money::from_cents(6000).divide_rounded(3).cents(), 2000);
        assert_eq!(Money::from_cents(15).divide_rounded(2).cents(), 8); // 7.5 → 8
        assert_eq!(Money::from_cents(-15).divide_rounded(2).cents(), -8);
        assert!(Money::from_cents(42).divide_rounded(0).is_zero());
    }
}
