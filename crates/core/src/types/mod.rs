//! Core types for Fakestore.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod filter;
pub mod id;
pub mod price;
pub mod product;
pub mod quantity;

pub use cart::CartLineItem;
pub use filter::{CategoryFilter, FilterCriteria, SortKey, SortKeyError};
pub use id::*;
pub use price::{Price, PriceError};
pub use product::Product;
pub use quantity::{Quantity, QuantityError};
