//! Storefront error types.

use thiserror::Error;

use zenplay_core::EmailError;
use zenplay_storage::StorageError;

/// Errors from cart mutations.
///
/// Only persistence failures are errors; unknown ids and rejected quantities
/// are reported through return values instead.
#[derive(Debug, Error)]
pub enum CartError {
    /// The cart could not be written.
    #[error("cart storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing in the cart to order.
    #[error("cart is empty")]
    EmptyCart,

    /// The customer email does not parse.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// A required customer field is blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The order total does not fit in a price.
    #[error("order total is too large")]
    TotalTooLarge,

    /// Could not find an unused order id.
    #[error("could not allocate a unique order id")]
    IdExhausted,

    /// The order or cart could not be written.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Clearing the cart after the order was saved failed.
    #[error("order placed but cart could not be cleared: {0}")]
    Cart(#[from] CartError),
}
