//! Type-safe price representation in integer minor units.
//!
//! Prices are stored as whole cents so cart arithmetic never touches floating
//! point. Conversion to a decimal amount only happens for display.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A USD price in minor units (cents).
///
/// Serializes as a bare integer, matching the persisted cart format.
///
/// ## Examples
///
/// ```
/// use fsblends_core::Price;
///
/// let price = Price::from_minor_units(2800);
/// assert_eq!(price.display(), "$28.00");
/// assert_eq!(price.times(5).minor_units(), 14_000);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(0);

    /// Create a price from minor units (cents).
    #[must_use]
    pub const fn from_minor_units(minor_units: u64) -> Self {
        Self(minor_units)
    }

    /// Get the amount in minor units.
    #[must_use]
    pub const fn minor_units(self) -> u64 {
        self.0
    }

    /// Get the amount in the currency's standard unit (dollars).
    #[must_use]
    pub fn amount(self) -> Decimal {
        Decimal::from(self.0) / Decimal::ONE_HUNDRED
    }

    /// Price of `quantity` units, saturating at `u64::MAX` cents.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(self) -> String {
        format!("${:.2}", self.amount())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_whole_and_fractional() {
        assert_eq!(Price::from_minor_units(2200).display(), "$22.00");
        assert_eq!(Price::from_minor_units(1899).display(), "$18.99");
        assert_eq!(Price::from_minor_units(5).display(), "$0.05");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_times() {
        assert_eq!(Price::from_minor_units(3500).times(3).minor_units(), 10_500);
        assert_eq!(Price::from_minor_units(3500).times(0), Price::ZERO);
    }

    #[test]
    fn test_times_saturates() {
        let price = Price::from_minor_units(u64::MAX / 2);
        assert_eq!(price.times(3).minor_units(), u64::MAX);
    }

    #[test]
    fn test_sum() {
        let total: Price = [2200, 2800, 3500]
            .into_iter()
            .map(Price::from_minor_units)
            .sum();
        assert_eq!(total.minor_units(), 8500);
    }

    #[test]
    fn test_serializes_as_integer() {
        assert_eq!(
            serde_json::to_string(&Price::from_minor_units(2800)).unwrap(),
            "2800"
        );
        assert!(serde_json::from_str::<Price>("-1").is_err());
    }
}
