//! Persisted records.
//!
//! These are the shapes stored as JSON arrays under the cart and order keys.
//! Field names follow the camelCase wire form the storefront pages write.

pub mod cart;
pub mod order;

pub use cart::{CartItem, Product};
pub use order::{Customer, Order, OrderItem};
