//! Storefront state shared across callers.

use std::sync::Arc;

use zenplay_storage::{FileStorage, SharedStorage, StorageError};

use crate::cart::CartStore;
use crate::checkout::Checkout;
use crate::config::StorefrontConfig;

/// Storefront state bundling the cart and checkout over one backend.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct StorefrontState {
    inner: Arc<StorefrontStateInner>,
}

struct StorefrontStateInner {
    cart: CartStore,
    checkout: Checkout,
}

impl StorefrontState {
    /// Build state over an explicit backend.
    #[must_use]
    pub fn new(storage: SharedStorage) -> Self {
        let cart = CartStore::new(storage.clone());
        let checkout = Checkout::new(cart.clone(), storage);
        Self {
            inner: Arc::new(StorefrontStateInner {
                cart,
                checkout,
            }),
        }
    }

    /// Build state over the file backend in `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the data directory cannot be created.
    pub fn open(config: &StorefrontConfig) -> Result<Self, StorageError> {
        let storage = FileStorage::open(&config.data_dir)?;
        Ok(Self::new(Arc::new(storage)))
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to checkout.
    #[must_use]
    pub fn checkout(&self) -> &Checkout {
        &self.inner.checkout
    }
}
