//! Tiendita Core - Catalog and cart domain types.
//!
//! This crate holds the domain model shared by the Tiendita components:
//! - `storefront` - Server-rendered shop page and cart widget
//! - `integration-tests` - End-to-end tests against a running storefront
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP, no
//! persistence. Every cart mutation rule (one line per product, quantities
//! never below one, first-add ordering, recomputed totals) lives here and is
//! unit-tested here.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices
//! - [`catalog`] - The immutable product set offered for a session
//! - [`cart`] - The mutable cart and its reconciliation rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;

pub use cart::{Cart, CartLine, CheckoutOutcome, ClearOutcome, RemoveOutcome};
pub use catalog::{Catalog, Product};
pub use types::*;
