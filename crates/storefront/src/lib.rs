//! Fakestore storefront library.
//!
//! Catalog loading, the persisted cart, filtering, checkout and the
//! text views, independent of any particular front end. A front end drives a
//! [`state::Storefront`] with [`intent::Intent`]s and renders the
//! [`intent::UiEvent`]s it gets back.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod intent;
pub mod state;
pub mod storage;
pub mod views;
