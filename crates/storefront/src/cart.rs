//! Cart store.
//!
//! Every operation loads the full cart, mutates it in memory, writes the full
//! cart back and publishes a [`CartChange`]. Presentation code subscribes via
//! [`CartStore::subscribe`] and re-renders from [`CartStore::summary`].

use tokio::sync::broadcast;
use tracing::{debug, info, instrument};

use zenplay_core::{CartItem, Price, Product, ProductId};
use zenplay_storage::{ChangeNotifier, CollectionRepository, SharedStorage, keys};

use crate::error::CartError;

/// What a persisted cart mutation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// A product was added; `quantity` is the line's new quantity.
    ItemAdded { id: ProductId, quantity: u32 },
    /// A line's quantity was set.
    QuantityChanged { id: ProductId, quantity: u32 },
    /// Lines matching `id` were removed (`removed` may be zero).
    ItemRemoved { id: ProductId, removed: usize },
    /// The cart was emptied.
    Cleared,
}

/// Derived cart figures, recomputed on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartSummary {
    /// Sum of line quantities (the navbar count).
    pub item_count: u64,
    /// Number of distinct lines (the offcanvas badge).
    pub line_count: usize,
    /// Sum of price × quantity.
    pub total: Price,
}

impl CartSummary {
    /// Compute the summary of a set of lines.
    #[must_use]
    pub fn from_items(items: &[CartItem]) -> Self {
        Self {
            item_count: items.iter().map(|item| u64::from(item.quantity)).sum(),
            line_count: items.len(),
            total: items.iter().map(CartItem::line_total).sum(),
        }
    }

    /// Whether the cart holds nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.line_count == 0
    }
}

/// The shopper's cart, persisted under [`keys::CART`].
#[derive(Debug, Clone)]
pub struct CartStore {
    items: CollectionRepository<CartItem>,
    changes: ChangeNotifier<CartChange>,
}

impl CartStore {
    /// Create a cart store over a shared backend.
    #[must_use]
    pub fn new(storage: SharedStorage) -> Self {
        Self {
            items: CollectionRepository::new(storage, keys::CART),
            changes: ChangeNotifier::default(),
        }
    }

    /// Receive a [`CartChange`] after every persisted mutation.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CartChange> {
        self.changes.subscribe()
    }

    /// The persisted cart; empty if absent or unreadable.
    #[must_use]
    pub fn get_cart(&self) -> Vec<CartItem> {
        self.items.load()
    }

    /// Item count, line count and total of the persisted cart.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary::from_items(&self.get_cart())
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line for the product's id, or appends a new
    /// line with quantity 1. Returns the resulting line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart cannot be written.
    #[instrument(skip(self, product), fields(id = %product.id))]
    pub fn add_item(&self, product: Product) -> Result<CartItem, CartError> {
        let mut cart = self.get_cart();
        let line = if let Some(existing) = cart.iter_mut().find(|item| item.id == product.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            existing.clone()
        } else {
            let line = CartItem::from(product);
            cart.push(line.clone());
            line
        };

        self.items.save(&cart)?;
        info!(quantity = line.quantity, "Added item to cart");
        self.changes.notify(CartChange::ItemAdded {
            id: line.id.clone(),
            quantity: line.quantity,
        });
        Ok(line)
    }

    /// Remove every line whose id is `id`.
    ///
    /// The cart is written back even when nothing matched. Returns how many
    /// lines were removed.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart cannot be written.
    #[instrument(skip(self))]
    pub fn remove_item(&self, id: &ProductId) -> Result<usize, CartError> {
        let mut cart = self.get_cart();
        let before = cart.len();
        cart.retain(|item| &item.id != id);
        let removed = before - cart.len();

        self.items.save(&cart)?;
        info!(removed, "Removed item from cart");
        self.changes.notify(CartChange::ItemRemoved {
            id: id.clone(),
            removed,
        });
        Ok(removed)
    }

    /// Set the quantity of the line for `id`.
    ///
    /// Quantities below 1 (or above `u32::MAX`) are ignored, as are unknown
    /// ids; in both cases nothing is written and `false` is returned.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart cannot be written.
    #[instrument(skip(self))]
    pub fn update_quantity(&self, id: &ProductId, quantity: i64) -> Result<bool, CartError> {
        let Some(quantity) = u32::try_from(quantity).ok().filter(|q| *q >= 1) else {
            debug!("Ignoring out-of-range quantity");
            return Ok(false);
        };

        let updated = self.items.update(|cart| {
            let line = cart.iter_mut().find(|item| &item.id == id)?;
            line.quantity = quantity;
            Some(())
        })?;
        if updated.is_none() {
            debug!("No cart line for id");
            return Ok(false);
        }

        info!(quantity, "Updated cart quantity");
        self.changes.notify(CartChange::QuantityChanged {
            id: id.clone(),
            quantity,
        });
        Ok(true)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart cannot be written.
    #[instrument(skip(self))]
    pub fn clear(&self) -> Result<(), CartError> {
        self.items.save(&[])?;
        info!("Cleared cart");
        self.changes.notify(CartChange::Cleared);
        Ok(())
    }
}
