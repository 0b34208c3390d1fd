//! Exact money amounts with a fixed two-digit scale.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Fractional digits every stored amount carries.
const SCALE: u32 = 2;

/// A signed amount of money, always held at exactly two fractional digits.
///
/// The inner decimal keeps an integer mantissa, so addition, subtraction
/// and comparison are exact. Rounding (half away from zero) happens once,
/// when a value enters through [`Money::parse`] or [`Money::from_decimal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    pub fn zero() -> Self {
        Self(Decimal::new(0, SCALE))
    }

    /// Normalizes an arbitrary decimal to the two-digit scale.
    pub fn from_decimal(value: Decimal) -> Self {
        let mut normalized =
            value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero);
        normalized.rescale(SCALE);
        Self(normalized)
    }

    /// Parses a decimal string, accepting either `.` or `,` as the
    /// fractional separator.
    pub fn parse(text: &str) -> Result<Self, MoneyError> {
        let trimmed = text.trim();
        let normalized = trimmed.replace(',', ".");
        Decimal::from_str(&normalized)
            .map(Self::from_decimal)
            .map_err(|_| MoneyError::InvalidAmount(trimmed.to_string()))
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self::from_decimal(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Decimal {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money::from_decimal(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money::from_decimal(self.0 - rhs.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // the inner decimal is always at scale 2, so this renders "0.00"
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors raised when constructing [`Money`] values from text.
pub enum MoneyError {
    InvalidAmount(String),
}

impl fmt::Display for MoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyError::InvalidAmount(text) => {
                write!(f, "not a valid amount: `{}`", text)
            }
        }
    }
}

impl std::error::Error for MoneyError {}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_accepts_dot_and_comma_separators() {
        assert_eq!(Money::parse("10.50").unwrap(), Money::parse("10,50").unwrap());
        assert_eq!(Money::parse(" 7 ").unwrap().to_string(), "7.00");
    }

    #[test]
    fn parse_rounds_half_away_from_zero() {
        assert_eq!(Money::parse("10.005").unwrap().to_string(), "10.01");
        assert_eq!(Money::parse("-10.005").unwrap().to_string(), "-10.01");
        assert_eq!(Money::parse("3.333").unwrap().to_string(), "3.33");
        assert_eq!(Money::parse("-3.333").unwrap().to_string(), "-3.33");
    }

    #[test]
    fn parse_rejects_garbage() {
        for text in ["", "abc", "10.5.0", "1 000", "12;34"] {
            assert!(matches!(
                Money::parse(text),
                Err(MoneyError::InvalidAmount(_))
            ));
        }
    }

    #[test]
    fn display_always_shows_two_digits() {
        assert_eq!(Money::zero().to_string(), "0.00");
        assert_eq!(Money::from_decimal(dec!(100)).to_string(), "100.00");
        assert_eq!(Money::from_decimal(dec!(-0.5)).to_string(), "-0.50");
    }

    #[test]
    fn arithmetic_is_exact() {
        let a = Money::parse("0.10").unwrap();
        let b = Money::parse("0.20").unwrap();
        assert_eq!((a + b).to_string(), "0.30");

        let mut total = Money::zero();
        for _ in 0..1000 {
            total = total + Money::parse("0.01").unwrap();
        }
        assert_eq!(total.to_string(), "10.00");
        assert_eq!((total - total).to_string(), "0.00");
    }

    #[test]
    fn comparison_and_positivity() {
        let small = Money::parse("1.00").unwrap();
        let big = Money::parse("2.00").unwrap();
        assert!(small < big);
        assert!(small.is_positive());
        assert!(!Money::zero().is_positive());
        assert!(!Money::parse("-1.00").unwrap().is_positive());
    }

    #[test]
    fn serde_round_trip_normalizes_scale() {
        let json = serde_json::to_string(&Money::parse("12.30").unwrap()).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_string(), "12.30");

        // a hand-edited snapshot with excess digits is normalized on read
        let edited: Money = serde_json::from_str("\"1.005\"").unwrap();
        assert_eq!(edited.to_string(), "1.01");
    }
}
