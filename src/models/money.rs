//! Money type for representing currency amounts
//!
//! Internally stores amounts in minor units (i64) to avoid floating-point
//! precision issues. Parsing from user input never goes through a float.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

/// Currency prefixes accepted (and ignored) when parsing user input
const ACCEPTED_PREFIXES: &[&str] = &["Rs.", "Rs", "$"];

/// A monetary amount stored as minor units (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest amount a single transaction may carry, in minor units
    /// (ten billion in major units)
    pub const MAX_TRANSACTION: i64 = 1_000_000_000_000;

    /// Create a Money amount from minor units
    ///
    /// # Examples
    /// ```
    /// use finance_tracker::models::Money;
    /// let amount = Money::from_minor(1050); // 10.50
    /// assert_eq!(amount.major(), 10);
    /// ```
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in minor units
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Get the whole major-unit portion (truncated toward zero)
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Get the minor portion (0-99)
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parse an amount given in major units
    ///
    /// Accepts formats: "10.50", "-10.50", "Rs 10.50", "$10.50", "10", "10.5".
    /// More than two decimal places is an error rather than a silent truncation.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let invalid = || MoneyParseError::InvalidFormat(original.trim().to_string());

        let s = s.trim();
        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped.trim_start()),
            None => (false, s),
        };

        let s = ACCEPTED_PREFIXES
            .iter()
            .find_map(|prefix| s.strip_prefix(prefix))
            .unwrap_or(s)
            .trim_start();

        let (whole, fraction) = match s.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (s, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        if fraction.len() > 2 {
            return Err(MoneyParseError::TooPrecise(original.trim().to_string()));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        let minor = whole
            .checked_mul(100)
            .and_then(|m| m.checked_add(fraction))
            .ok_or_else(|| MoneyParseError::Overflow(original.trim().to_string()))?;

        Ok(Self(if negative { -minor } else { minor }))
    }

    /// Parse an amount that must be strictly positive and no larger than
    /// [`MAX_TRANSACTION`](Self::MAX_TRANSACTION)
    pub fn parse_positive(s: &str) -> Result<Self, MoneyParseError> {
        let amount = Self::parse(s)?;
        if !amount.is_positive() {
            return Err(MoneyParseError::NotPositive(s.trim().to_string()));
        }
        if !amount.is_valid_transaction_amount() {
            return Err(MoneyParseError::Overflow(s.trim().to_string()));
        }
        Ok(amount)
    }

    /// Whether this can be the amount of one stored record
    pub const fn is_valid_transaction_amount(&self) -> bool {
        self.0 > 0 && self.0 <= Self::MAX_TRANSACTION
    }

    /// Format with a currency prefix, e.g. `Rs 12.50` or `Rs -3.00`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        format!("{}{}", symbol, self)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

// Arithmetic saturates at the i64 bounds.

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    TooPrecise(String),
    Overflow(String),
    NotPositive(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid amount '{}'. Please enter a number", s),
            Self::TooPrecise(s) => write!(f, "Amount '{}' has more than two decimal places", s),
            Self::Overflow(s) => write!(f, "Amount '{}' is too large", s),
            Self::NotPositive(s) => write!(f, "Amount must be positive (got '{}')", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor() {
        let m = Money::from_minor(1050);
        assert_eq!(m.minor(), 1050);
        assert_eq!(m.major(), 10);
        assert_eq!(m.minor_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(1050).to_string(), "10.50");
        assert_eq!(Money::from_minor(0).to_string(), "0.00");
        assert_eq!(Money::from_minor(-1050).to_string(), "-10.50");
        assert_eq!(Money::from_minor(5).to_string(), "0.05");
        assert_eq!(Money::from_minor(-5).to_string(), "-0.05");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_minor(1250).format_with_symbol("Rs "), "Rs 12.50");
        assert_eq!(Money::from_minor(-300).format_with_symbol("Rs "), "Rs -3.00");
        assert_eq!(Money::from_minor(498750).format_with_symbol("$"), "$4987.50");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().minor(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().minor(), 1050);
        assert_eq!(Money::parse("Rs 10.50").unwrap().minor(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().minor(), -1050);
        assert_eq!(Money::parse("10").unwrap().minor(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().minor(), 1050);
        assert_eq!(Money::parse("0.05").unwrap().minor(), 5);
        assert_eq!(Money::parse(".5").unwrap().minor(), 50);
        assert_eq!(Money::parse(" 12.50 ").unwrap().minor(), 1250);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(Money::parse("abc"), Err(MoneyParseError::InvalidFormat(_))));
        assert!(matches!(Money::parse(""), Err(MoneyParseError::InvalidFormat(_))));
        assert!(matches!(Money::parse("."), Err(MoneyParseError::InvalidFormat(_))));
        assert!(matches!(Money::parse("1.2.3"), Err(MoneyParseError::InvalidFormat(_))));
        assert!(matches!(Money::parse("1e5"), Err(MoneyParseError::InvalidFormat(_))));
        assert!(matches!(Money::parse("1.005"), Err(MoneyParseError::TooPrecise(_))));
        assert!(matches!(
            Money::parse("99999999999999999999"),
            Err(MoneyParseError::InvalidFormat(_)) | Err(MoneyParseError::Overflow(_))
        ));
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(Money::parse_positive("12.50").unwrap().minor(), 1250);
        assert!(matches!(Money::parse_positive("-5"), Err(MoneyParseError::NotPositive(_))));
        assert!(matches!(Money::parse_positive("0"), Err(MoneyParseError::NotPositive(_))));
        assert!(matches!(Money::parse_positive("0.00"), Err(MoneyParseError::NotPositive(_))));
        assert!(matches!(Money::parse_positive("abc"), Err(MoneyParseError::InvalidFormat(_))));
        assert_eq!(
            Money::parse_positive("10000000000").unwrap().minor(),
            Money::MAX_TRANSACTION
        );
        assert!(matches!(
            Money::parse_positive("10000000000.01"),
            Err(MoneyParseError::Overflow(_))
        ));
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(500);

        assert_eq!((a + b).minor(), 1500);
        assert_eq!((b - a).minor(), -500);
        assert_eq!((-a).minor(), -1000);

        let total: Money = vec![a, b, Money::from_minor(1)].into_iter().sum();
        assert_eq!(total.minor(), 1501);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_minor(i64::MAX);
        let min = Money::from_minor(i64::MIN);

        assert_eq!((max + Money::from_minor(1)).minor(), i64::MAX);
        assert_eq!((min - Money::from_minor(1)).minor(), i64::MIN);
        assert_eq!((-min).minor(), i64::MAX);

        let total: Money = vec![max, max, Money::from_minor(1)].into_iter().sum();
        assert_eq!(total.minor(), i64::MAX);
    }
}
