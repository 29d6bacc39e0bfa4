//! Money type for representing currency amounts
//!
//! Wraps `rust_decimal::Decimal` so every monetary value in the engine uses
//! exact decimal arithmetic. Binary floating point is never used for amounts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// A monetary amount in the workspace base currency
///
/// Positive values are inflows, negative values are outflows.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// The zero amount
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Create a Money amount from a decimal value
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying decimal value
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Check if the amount is strictly negative
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Return the larger of two amounts
    pub fn max(self, other: Self) -> Self {
        if self.0 >= other.0 {
            self
        } else {
            other
        }
    }

    /// Multiply by a dimensionless factor (rate, exchange rate)
    pub fn scale(self, factor: Decimal) -> Self {
        Self(self.0 * factor)
    }

    /// Ratio of this amount to a base amount
    ///
    /// Returns `None` when the base is zero: the ratio is mathematically
    /// undefined and reported as "not applicable", never a division by zero.
    pub fn ratio_to(self, base: Money) -> Option<Decimal> {
        if base.is_zero() {
            None
        } else {
            Some(self.0 / base.0)
        }
    }

    /// Percentage of this amount relative to a base amount (100 = 100%)
    ///
    /// `None` when the base is zero, same rule as [`Money::ratio_to`].
    pub fn percent_of(self, base: Money) -> Option<Decimal> {
        self.ratio_to(base).map(|r| r * Decimal::ONE_HUNDRED)
    }

    /// Parse a money amount from a plain decimal string ("1234.56", "-50")
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        Decimal::from_str(s.trim())
            .map(Self)
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<i64> for Money {
    fn from(units: i64) -> Self {
        Self(Decimal::from(units))
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Always show at least two fractional digits
        if self.0.scale() < 2 {
            write!(f, "{:.2}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().amount(), dec!(10.50));
        assert_eq!(Money::parse("-10.50").unwrap().amount(), dec!(-10.50));
        assert_eq!(Money::parse(" 1000 ").unwrap().amount(), dec!(1000));
        assert!(Money::parse("ten").is_err());
    }

    #[test]
    fn test_arithmetic_is_exact() {
        // 0.1 + 0.2 is exactly 0.3 in decimal arithmetic
        let sum = Money::new(dec!(0.1)) + Money::new(dec!(0.2));
        assert_eq!(sum.amount(), dec!(0.3));

        let a = Money::new(dec!(10.00));
        let b = Money::new(dec!(5.25));
        assert_eq!((a - b).amount(), dec!(4.75));
        assert_eq!((-a).amount(), dec!(-10.00));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::new(dec!(10.5)).to_string(), "10.50");
        assert_eq!(Money::new(dec!(10)).to_string(), "10.00");
        assert_eq!(Money::new(dec!(-3.125)).to_string(), "-3.125");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_ratio_to_zero_base_is_undefined() {
        let spent = Money::new(dec!(450));
        assert_eq!(spent.ratio_to(Money::zero()), None);
        assert_eq!(spent.percent_of(Money::zero()), None);
    }

    #[test]
    fn test_percent_of() {
        let spent = Money::new(dec!(450.00));
        let planned = Money::new(dec!(400.00));
        assert_eq!(spent.percent_of(planned), Some(dec!(112.5)));
    }

    #[test]
    fn test_scale() {
        let net = Money::new(dec!(3800.00));
        assert_eq!(net.scale(dec!(0.20)).amount(), dec!(760.0000));
    }

    #[test]
    fn test_sum() {
        let total: Money = [dec!(1.10), dec!(2.20), dec!(3.30)]
            .into_iter()
            .map(Money::new)
            .sum();
        assert_eq!(total.amount(), dec!(6.60));
    }

    #[test]
    fn test_max_and_signs() {
        let a = Money::new(dec!(5));
        let b = Money::new(dec!(-5));
        assert_eq!(a.max(b), a);
        assert!(a.is_positive());
        assert!(b.is_negative());
        assert!(Money::zero().is_zero());
        assert_eq!(b.abs(), a);
    }

    #[test]
    fn test_serialization() {
        let m = Money::new(dec!(10.50));
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "\"10.50\"");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }
}
