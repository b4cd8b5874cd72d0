//! The key/value storage seam.

use std::sync::Arc;

use crate::error::StorageError;

/// Well-known storage keys.
pub mod keys {
    /// JSON array of cart items.
    pub const CART: &str = "zenplay_cart";
    /// JSON array of orders.
    pub const ORDERS: &str = "zenplay_orders";
    /// Session flag set once the admin gate has been passed.
    pub const ADMIN_SESSION: &str = "zenplay_admin_logged";
}

/// String-keyed, string-valued storage, shaped like a browser's local or
/// session storage.
///
/// Implementations take `&self` and handle their own interior mutability so a
/// single backend can be shared between stores through a [`SharedStorage`].
/// There is no versioning: concurrent writers to one key are
/// last-writer-wins.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value under `key`, or `None` if it was never set.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// A backend shared between several repositories.
pub type SharedStorage = Arc<dyn KeyValueStorage>;

/// Check that a key is limited to `[A-Za-z0-9_-]` and is not empty.
///
/// # Errors
///
/// Returns `StorageError::InvalidKey` otherwise.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_keys_are_valid() {
        for key in [keys::CART, keys::ORDERS, keys::ADMIN_SESSION] {
            assert!(validate_key(key).is_ok(), "{key} should be valid");
        }
    }

    #[test]
    fn test_rejects_path_like_keys() {
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("cart/items").is_err());
        assert!(validate_key("cart.json").is_err());
    }
}
