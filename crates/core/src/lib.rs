//! FS Blends Core - Shared types library.
//!
//! This crate provides the catalog vocabulary shared by every FS Blends component:
//! - `storefront` - Catalog store, variant resolver and persisted cart
//! - `cli` - Command-line client for browsing the catalog and managing the cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! resolution logic. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for slugs and ids, prices, quantities,
//!   variant options, products and selections

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
