//! # Money Module
//!
//! `Money` holds prices, line totals and balances as whole cents.
//!
//! ## Integer Cents In Memory, Dollars On The Wire
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Data store row                 In memory              Browser console  │
//! │  ──────────────                 ─────────              ───────────────  │
//! │  "price": 10.99      ──parse──► Money(1099)  ──ser──►  10.99            │
//! │  "u_price": "4.50"   ──parse──► Money(450)                              │
//! │  "u_price": ""       ──parse──► None (no each price)                    │
//! │                                                                         │
//! │  All arithmetic happens on i64 cents. Fractional quantities are        │
//! │  multiplied through rust_decimal and rounded once, half away from 0.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use larder_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let case_price = Money::from_cents(1000); // $10.00
//! let total = case_price.multiply_quantity(Decimal::from(3)).unwrap();
//! assert_eq!(total.cents(), 3000);
//!
//! assert_eq!(Money::parse("$1,234.50"), Some(Money::from_cents(123450)));
//! assert_eq!(Money::parse("abc"), None);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// Signed: payments, credits and discounts are stored as negative amounts.
/// Serializes as a dollar number (`10.99`) because that is the shape of the
/// persisted line-item rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Wraps a cent amount.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal dollar amount, rounding half away from zero to cents.
    ///
    /// Returns `None` when the amount does not fit in i64 cents.
    pub fn from_decimal(dollars: Decimal) -> Option<Self> {
        dollars
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(|c| c.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|c| c.to_i64())
            .map(Money)
    }

    /// Converts a floating point dollar amount from a JSON row.
    ///
    /// Returns `None` for NaN and infinities.
    pub fn from_dollars(dollars: f64) -> Option<Self> {
        if !dollars.is_finite() {
            return None;
        }
        Decimal::from_f64_retain(dollars)
            .map(|d| d.round_dp_with_strategy(6, RoundingStrategy::MidpointAwayFromZero))
            .and_then(Money::from_decimal)
    }

    /// Parses user or CSV text such as `"12.50"`, `"$12.50"` or `"1,200"`.
    ///
    /// Blank or non-numeric text yields `None`.
    pub fn parse(text: &str) -> Option<Self> {
        let cleaned: String = text
            .trim()
            .chars()
            .filter(|c| *c != ',' && *c != '$')
            .collect();
        if cleaned.is_empty() {
            return None;
        }
        Decimal::from_str(&cleaned)
            .ok()
            .and_then(Money::from_decimal)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole dollars, truncated toward zero.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Cents past the whole dollar, 0 through 99.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// The value as an exact decimal dollar amount.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// The value as a dollar float, for serialization only.
    pub fn to_dollars(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// A positive balance means the member owes money.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Multiplies a unit price by a (possibly fractional) quantity.
    ///
    /// The product is rounded to the cent, half away from zero, which is
    /// also how wholesale cost totals are rounded to 2 decimal places.
    /// Returns `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use larder_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// // 14 each of a 12-pack at $30.00/case = 1.1666.. cases
    /// let cases = Decimal::from(14) / Decimal::from(12);
    /// let cost = Money::from_cents(3000).multiply_quantity(cases).unwrap();
    /// assert_eq!(cost.cents(), 3500);
    /// ```
    pub fn multiply_quantity(&self, qty: Decimal) -> Option<Money> {
        Decimal::from(self.0)
            .checked_mul(qty)
            .map(|c| c.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|c| c.to_i64())
            .map(Money)
    }

    /// Calculates tax on this amount, rounding half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use larder_core::money::Money;
    /// use larder_core::types::TaxRate;
    ///
    /// let taxable = Money::from_cents(9000); // $90.00
    /// let tax = taxable.calculate_tax(TaxRate::from_bps(800)); // 8%
    /// assert_eq!(tax.cents(), 720);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 keeps large order totals from overflowing
        let scaled = self.0 as i128 * rate.bps() as i128;
        let magnitude = (scaled.abs() + 5000) / 10000;
        let cents = if scaled < 0 { -magnitude } else { magnitude };
        Money::from_cents(cents as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

// Arithmetic saturates at the i64 bounds so oversized stored amounts never
// panic a total.

/// Debug-friendly display (`$10.99`, `-$5.50`).
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
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Serde
// =============================================================================

/// An amount as it appears in a stored row: a number, or text from a form
/// or CSV import.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
    /// Booleans, arrays, objects: present but not an amount.
    Other(serde::de::IgnoredAny),
}

impl RawAmount {
    fn into_money(self) -> Option<Money> {
        match self {
            RawAmount::Number(n) => Money::from_dollars(n),
            RawAmount::Text(s) => Money::parse(&s),
            RawAmount::Other(_) => None,
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_dollars())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawAmount::deserialize(deserializer)?
            .into_money()
            .ok_or_else(|| serde::de::Error::custom("amount is not a valid number"))
    }
}

/// Serde adapter for optional amounts.
///
/// `null`, a missing field, blank text and unparseable text all read as
/// `None`. Use with `#[serde(default, with = "crate::money::lenient")]`.
pub mod lenient {
    use super::{Money, RawAmount};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Money>, serializer: S) -> Result<S::Ok, S::Error> {
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Money>, D::Error> {
        Ok(Option::<RawAmount>::deserialize(deserializer)?.and_then(RawAmount::into_money))
    }
}

/// Serde adapter for stored totals.
///
/// The console writes `NaN` totals, which JSON turns into `null`; those and
/// any other unreadable value read as zero. Use with
/// `#[serde(default, with = "crate::money::or_zero")]`.
pub mod or_zero {
    use super::Money;
    use serde::{Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        Ok(super::lenient::deserialize(deserializer)?.unwrap_or_default())
    }
}
