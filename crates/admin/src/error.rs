//! Admin error types.

use thiserror::Error;

use zenplay_core::OrderId;
use zenplay_storage::StorageError;

/// Errors from order collection mutations.
///
/// Unknown ids are not errors: `update_status` and `delete_order` report them
/// through their return values.
#[derive(Debug, Error)]
pub enum OrderStoreError {
    /// An order with this id is already stored.
    #[error("Duplicate order id: {0}")]
    DuplicateId(OrderId),

    /// The order collection could not be written.
    #[error("Order storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Errors from the admin gate.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The supplied password does not match the configured hash.
    #[error("Invalid password")]
    InvalidPassword,

    /// A password offered for hashing is too weak.
    #[error("Password must be at least 8 characters and contain a letter and a number")]
    WeakPassword,

    /// The configured hash could not be parsed, or hashing failed.
    #[error("Password hash error: {0}")]
    PasswordHash(String),

    /// The session flag could not be written.
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),
}
