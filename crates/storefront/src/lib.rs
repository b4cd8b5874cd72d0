//! ZenPlay Storefront library.
//!
//! Shopper-side state: the cart persisted under the cart key, and checkout,
//! which turns the cart into a pending order.
//!
//! # Modules
//!
//! - [`cart`] - Cart store, change events, derived totals
//! - [`checkout`] - Cart → order conversion
//! - [`config`] - Environment configuration
//! - [`state`] - Shared handle bundling the above over one storage backend

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod state;

pub use cart::{CartChange, CartStore, CartSummary};
pub use checkout::{Checkout, CheckoutForm};
pub use config::StorefrontConfig;
pub use error::{CartError, CheckoutError};
pub use state::StorefrontState;
