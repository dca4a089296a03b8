//! Core types for FS Blends.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod options;
pub mod price;
pub mod product;
pub mod quantity;
pub mod selection;
pub mod variant;

pub use id::*;
pub use options::{CandleSize, ContainerColor, OptionParseError, VariantColor};
pub use price::Price;
pub use product::{CandleCollection, Product, ProductType, slugify};
pub use quantity::Quantity;
pub use selection::Selection;
pub use variant::Variant;
