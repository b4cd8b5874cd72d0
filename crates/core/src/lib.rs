//! ZenPlay Core - Shared types library.
//!
//! This crate provides common types used across all ZenPlay components:
//! - `storage` - Key/value storage backends and typed collection repositories
//! - `storefront` - Shopper-facing cart and checkout
//! - `admin` - Order management dashboard
//! - `cli` - Command-line driver for both stores
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses
//! - [`models`] - Persisted records: cart items and orders

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod types;

pub use models::*;
pub use types::*;
