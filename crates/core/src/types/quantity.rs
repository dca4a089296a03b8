//! Purchase quantity.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// A quantity of at least one unit.
///
/// Cart additions take a `Quantity`, so a zero-unit addition cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Largest quantity the product page accepts in one addition.
    pub const MAX_PER_ADD: u32 = 10;

    /// Create a quantity, returning `None` for zero.
    #[must_use]
    pub const fn new(units: u32) -> Option<Self> {
        match NonZeroU32::new(units) {
            Some(units) => Some(Self(units)),
            None => None,
        }
    }

    /// Clamp raw user input into `1..=MAX_PER_ADD`.
    ///
    /// Negative, zero and unparseable inputs become one unit.
    #[must_use]
    pub fn clamped(raw: i64) -> Self {
        let units = raw.clamp(1, i64::from(Self::MAX_PER_ADD));
        u32::try_from(units)
            .ok()
            .and_then(Self::new)
            .unwrap_or(Self::ONE)
    }

    /// Get the number of units.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
