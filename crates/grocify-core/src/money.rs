//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹30.00 = 3000 paise, ₹30.00 × 2 = 6000 paise, exactly               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use grocify_core::money::Money;
//!
//! let milk = Money::from_rupees(30);
//! let line = milk.multiply_quantity(2);
//! assert_eq!(line.to_string(), "₹60.00");
//!
//! let parsed: Money = "25.50".parse().unwrap();
//! assert_eq!(parsed.paise(), 2550);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use crate::error::ValidationError;

/// Default currency symbol used by `Display`.
pub const RUPEE_SYMBOL: &str = "₹";

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paise (1/100 of a rupee).
///
/// ## Where Money is Used
/// ```text
/// CatalogItem.price ──► CartLine.unit_price ──► CartLine::line_total()
///                                                      │
///                                                      ▼
///                               Cart::compute_total() ──► Receipt total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use grocify_core::money::Money;
    ///
    /// let price = Money::from_paise(1099);
    /// assert_eq!(price.paise(), 1099);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use grocify_core::money::Money;
    ///
    /// let rice = Money::from_rupees(60);
    /// assert_eq!(rice.multiply_quantity(6), Money::from_rupees(360));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Like [`Money::multiply_quantity`], but `None` when the product does
    /// not fit in paise.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: u32) -> Option<Self> {
        match self.0.checked_mul(qty as i64) {
            Some(paise) => Some(Money(paise)),
            None => None,
        }
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(paise) => Some(Money(paise)),
            None => None,
        }
    }

    /// Formats the amount with an explicit currency symbol and separator.
    ///
    /// The receipt prints `₹ 30.00` while the cart view prints `₹30.00`,
    /// so both the symbol and the gap are caller-controlled.
    ///
    /// ```rust
    /// use grocify_core::money::Money;
    ///
    /// assert_eq!(Money::from_paise(8500).format_with("₹", " "), "₹ 85.00");
    /// assert_eq!(Money::from_paise(-550).format_with("Rs.", ""), "-Rs.5.50");
    /// ```
    pub fn format_with(&self, symbol: &str, separator: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}{}.{:02}",
            sign,
            symbol,
            separator,
            self.rupees().abs(),
            self.paise_part()
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(RUPEE_SYMBOL, ""))
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
        Money(self.0 + other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

/// Parses decimal rupee strings such as `"60"`, `"42.5"` or `"-3.25"`.
///
/// At most two fractional digits are accepted; anything else is an
/// `InvalidFormat` error rather than a silent rounding.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (major, minor) = match digits.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (digits, ""),
        };

        if major.is_empty() || !major.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected a decimal amount like 30 or 30.50"));
        }
        if minor.len() > 2 || !minor.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("at most two decimal places are allowed"));
        }

        let major: i64 = major
            .parse()
            .map_err(|_| invalid("amount is too large"))?;
        let minor: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().map_err(|_| invalid("bad paise"))? * 10,
            _ => minor.parse().map_err(|_| invalid("bad paise"))?,
        };

        let paise = major
            .checked_mul(100)
            .and_then(|p| p.checked_add(minor))
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Money(if negative { -paise } else { paise }))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(1099);
        assert_eq!(money.paise(), 1099);
        assert_eq!(money.rupees(), 10);
        assert_eq!(money.paise_part(), 99);
    }

    #[test]
    fn test_display_uses_rupee_symbol() {
        assert_eq!(Money::from_rupees(85).to_string(), "₹85.00");
        assert_eq!(Money::from_paise(5).to_string(), "₹0.05");
        assert_eq!(Money::from_paise(-550).to_string(), "-₹5.50");
        assert_eq!(Money::zero().to_string(), "₹0.00");
    }

    #[test]
    fn test_format_with() {
        let total = Money::from_rupees(360);
        assert_eq!(total.format_with("₹", " "), "₹ 360.00");
        assert_eq!(total.format_with("", ""), "360.00");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_rupees(60);
        let b = Money::from_rupees(25);
        assert_eq!((a + b).paise(), 8500);

        let total: Money = [a, b, Money::from_paise(50)].into_iter().sum();
        assert_eq!(total.paise(), 8550);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_multiply_quantity() {
        assert_eq!(Money::from_rupees(30).multiply_quantity(2).paise(), 6000);
        assert_eq!(Money::from_rupees(30).multiply_quantity(0), Money::zero());
    }

    #[test]
    fn test_checked_arithmetic() {
        let bar = Money::from_rupees(10_000_000_000_000);
        assert_eq!(
            bar.checked_multiply_quantity(3),
            Some(Money::from_rupees(30_000_000_000_000))
        );
        assert_eq!(bar.checked_multiply_quantity(10_000), None);

        let max = Money::from_paise(i64::MAX);
        assert_eq!(max.checked_add(Money::from_paise(1)), None);
        assert_eq!(
            Money::from_rupees(60).checked_add(Money::from_rupees(25)),
            Some(Money::from_rupees(85))
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("60".parse::<Money>().unwrap(), Money::from_rupees(60));
        assert_eq!("42.5".parse::<Money>().unwrap().paise(), 4250);
        assert_eq!(" 0.05 ".parse::<Money>().unwrap().paise(), 5);
        assert_eq!("-3.25".parse::<Money>().unwrap().paise(), -325);

        assert!("".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("1.234".parse::<Money>().is_err());
        assert!(".50".parse::<Money>().is_err());
        assert!("1.-5".parse::<Money>().is_err());
        assert!("99999999999999999999".parse::<Money>().is_err());
    }
}
