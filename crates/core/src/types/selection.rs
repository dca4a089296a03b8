//! In-progress shopper selection.

use serde::{Deserialize, Serialize};

use super::options::{CandleSize, ContainerColor};

/// A partial key into a product's variant set.
///
/// Selections are transient UI state and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Selection {
    /// Chosen size, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<CandleSize>,
    /// Chosen container color, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ContainerColor>,
}

impl Selection {
    /// Create a selection from optional parts.
    #[must_use]
    pub const fn new(size: Option<CandleSize>, color: Option<ContainerColor>) -> Self {
        Self { size, color }
    }

    /// A selection with only a size chosen.
    #[must_use]
    pub const fn size(size: CandleSize) -> Self {
        Self {
            size: Some(size),
            color: None,
        }
    }

    /// A selection with both dimensions chosen.
    #[must_use]
    pub const fn full(size: CandleSize, color: ContainerColor) -> Self {
        Self {
            size: Some(size),
            color: Some(color),
        }
    }

    /// Whether nothing has been chosen.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size.is_none() && self.color.is_none()
    }
}
