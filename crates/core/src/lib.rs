//! Fakestore Core - Shared types library.
//!
//! This crate provides common types used across all Fakestore components:
//! - `storefront` - Catalog, cart, filtering and checkout logic
//! - `cli` - Terminal storefront that renders the above
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices and quantities,
//!   plus the product, cart line and filter criteria records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
