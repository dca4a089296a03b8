//! Purchase options a variant is made of.
//!
//! Older catalog drafts spelled sizes as `"6 oz"` and colors as `"Black"`;
//! both spellings still parse, but the canonical forms are `"6oz"` and `"black"`.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a purchase option.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionParseError {
    /// The input is not a known candle size.
    #[error("unknown size {0:?} (expected one of 6oz, 8oz, 10oz)")]
    UnknownSize(String),
    /// The input is not a known container color.
    #[error("unknown container color {0:?} (expected black or white)")]
    UnknownColor(String),
}

/// Candle size, ordered smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CandleSize {
    #[serde(rename = "6oz", alias = "6 oz")]
    Oz6,
    #[serde(rename = "8oz", alias = "8 oz")]
    Oz8,
    #[serde(rename = "10oz", alias = "10 oz")]
    Oz10,
}

impl CandleSize {
    /// Every size in display order.
    pub const ALL: [Self; 3] = [Self::Oz6, Self::Oz8, Self::Oz10];

    /// Canonical spelling, also used inside cart line ids.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Oz6 => "6oz",
            Self::Oz8 => "8oz",
            Self::Oz10 => "10oz",
        }
    }

    /// Human label with a space before the unit (e.g., "6 oz").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Oz6 => "6 oz",
            Self::Oz8 => "8 oz",
            Self::Oz10 => "10 oz",
        }
    }
}

impl fmt::Display for CandleSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CandleSize {
    type Err = OptionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|size| size.as_str() == normalized)
            .ok_or_else(|| OptionParseError::UnknownSize(s.to_owned()))
    }
}

/// Container color of a candle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerColor {
    #[serde(alias = "Black")]
    Black,
    #[serde(alias = "White")]
    White,
}

impl ContainerColor {
    /// Every color in display order.
    pub const ALL: [Self; 2] = [Self::Black, Self::White];

    /// Canonical spelling, also used inside cart line ids.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
        }
    }
}

impl fmt::Display for ContainerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContainerColor {
    type Err = OptionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == normalized)
            .ok_or_else(|| OptionParseError::UnknownColor(s.to_owned()))
    }
}

/// The color dimension of a single variant.
///
/// Products without a container choice carry [`VariantColor::Uncolored`]
/// on every variant, so "no color" is a value rather than a missing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum VariantColor {
    #[default]
    Uncolored,
    Colored(ContainerColor),
}

impl VariantColor {
    /// Line id suffix used when a variant has no color.
    pub const UNCOLORED_SUFFIX: &'static str = "default";

    /// The container color, if this variant has one.
    #[must_use]
    pub const fn color(self) -> Option<ContainerColor> {
        match self {
            Self::Uncolored => None,
            Self::Colored(color) => Some(color),
        }
    }

    /// Whether this variant participates in a color dimension.
    #[must_use]
    pub const fn is_colored(self) -> bool {
        matches!(self, Self::Colored(_))
    }

    /// Segment appended to cart line ids.
    #[must_use]
    pub const fn line_suffix(self) -> &'static str {
        match self {
            Self::Uncolored => Self::UNCOLORED_SUFFIX,
            Self::Colored(color) => color.as_str(),
        }
    }
}

impl From<Option<ContainerColor>> for VariantColor {
    fn from(color: Option<ContainerColor>) -> Self {
        color.map_or(Self::Uncolored, Self::Colored)
    }
}
