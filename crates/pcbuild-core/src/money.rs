//! # Money
//!
//! Component prices and build totals, held as whole cents.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  catalog.csv price "299.99"  ──► import rounds once ──► 29999 cents     │
//! │  components.price_cents      ──► ComponentRecord    ──► Money(29999)    │
//! │                                                                         │
//! │  Totals are integer sums: 29999 + 12999 = 42998 = "$429.98"             │
//! │  (as f64: 299.99 + 129.99 = 429.97999999999996)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ```rust
//! use pcbuild_core::money::Money;
//!
//! let build: Money = [29999, 12999].into_iter().map(Money::from_cents).sum();
//! assert_eq!(build.to_string(), "$429.98");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// An amount in cents. Serialized as the bare integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }
}

/// `$X.YY`, with a leading `-` for negative amounts.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// Saturates instead of overflowing; no real build gets near `i64::MAX`.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(29999).to_string(), "$299.99");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(7).to_string(), "$0.07");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_sum() {
        let total: Money = [1000, 2550, 49].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 3599);

        let empty: Money = std::iter::empty().sum();
        assert_eq!(empty, Money::ZERO);
    }

    #[test]
    fn test_add_saturates() {
        assert_eq!(
            Money::from_cents(i64::MAX) + Money::from_cents(1),
            Money::from_cents(i64::MAX)
        );
    }

    #[test]
    fn test_serializes_as_cents() {
        assert_eq!(serde_json::to_string(&Money::from_cents(8900)).unwrap(), "8900");
    }
}
