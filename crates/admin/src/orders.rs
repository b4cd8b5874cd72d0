//! Order store.
//!
//! The admin side of the order collection checkout appends to. Mutations
//! follow the same load, mutate, save cycle as the cart and publish an
//! [`OrderChange`] once the write has succeeded.

use tokio::sync::broadcast;
use tracing::{debug, info, instrument};

use zenplay_core::{Order, OrderId, OrderStatus};
use zenplay_storage::{ChangeNotifier, CollectionRepository, SharedStorage, keys};

use crate::error::OrderStoreError;

/// What a persisted order mutation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderChange {
    /// A new order was stored.
    Appended { id: OrderId },
    /// An order's status was overwritten.
    StatusChanged { id: OrderId, status: OrderStatus },
    /// An order was removed.
    Deleted { id: OrderId },
}

/// Asks the operator whether an order may be deleted.
pub trait Confirm {
    /// Return `true` to go ahead with deleting `id`.
    fn confirm_delete(&self, id: &OrderId) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&OrderId) -> bool,
{
    fn confirm_delete(&self, id: &OrderId) -> bool {
        self(id)
    }
}

/// Confirms every deletion (`--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm_delete(&self, _id: &OrderId) -> bool {
        true
    }
}

/// Declines every deletion.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl Confirm for NeverConfirm {
    fn confirm_delete(&self, _id: &OrderId) -> bool {
        false
    }
}

/// The order collection, persisted under [`keys::ORDERS`].
#[derive(Debug, Clone)]
pub struct OrderStore {
    orders: CollectionRepository<Order>,
    changes: ChangeNotifier<OrderChange>,
}

impl OrderStore {
    /// Create an order store over a shared backend.
    #[must_use]
    pub fn new(storage: SharedStorage) -> Self {
        Self {
            orders: CollectionRepository::new(storage, keys::ORDERS),
            changes: ChangeNotifier::default(),
        }
    }

    /// Receive an [`OrderChange`] after every persisted mutation.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<OrderChange> {
        self.changes.subscribe()
    }

    /// All orders in insertion order; empty if absent or unreadable.
    #[must_use]
    pub fn get_orders(&self) -> Vec<Order> {
        self.orders.load()
    }

    /// Look up one order by id.
    #[must_use]
    pub fn find(&self, id: &OrderId) -> Option<Order> {
        self.get_orders().into_iter().find(|order| &order.id == id)
    }

    /// Append a new order.
    ///
    /// # Errors
    ///
    /// Returns `OrderStoreError::DuplicateId` if an order with the same id is
    /// already stored, or `OrderStoreError::Storage` if the write fails.
    #[instrument(skip(self, order), fields(id = %order.id))]
    pub fn append(&self, order: Order) -> Result<(), OrderStoreError> {
        let mut orders = self.get_orders();
        if orders.iter().any(|existing| existing.id == order.id) {
            return Err(OrderStoreError::DuplicateId(order.id));
        }
        let id = order.id.clone();
        orders.push(order);
        self.orders.save(&orders)?;

        info!(count = orders.len(), "Appended order");
        self.changes.notify(OrderChange::Appended { id });
        Ok(())
    }

    /// Overwrite the status of the order with `id`.
    ///
    /// Any status may replace any other. Unknown ids are a silent no-op that
    /// writes nothing and returns `false`.
    ///
    /// # Errors
    ///
    /// Returns `OrderStoreError::Storage` if the write fails.
    #[instrument(skip(self))]
    pub fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<bool, OrderStoreError> {
        let updated = self.orders.update(|orders| {
            let order = orders.iter_mut().find(|order| &order.id == id)?;
            let previous = order.status;
            order.status = status;
            Some(previous)
        })?;
        let Some(previous) = updated else {
            debug!("No order for id");
            return Ok(false);
        };

        info!(from = %previous, to = %status, "Updated order status");
        self.changes.notify(OrderChange::StatusChanged {
            id: id.clone(),
            status,
        });
        Ok(true)
    }

    /// Delete the order with `id` once `confirm` agrees.
    ///
    /// The confirmation is asked before anything is read. A declined
    /// confirmation or an unknown id leaves storage untouched and returns
    /// `false`. At most one order is removed.
    ///
    /// # Errors
    ///
    /// Returns `OrderStoreError::Storage` if the write fails.
    #[instrument(skip(self, confirm))]
    pub fn delete_order(&self, id: &OrderId, confirm: &dyn Confirm) -> Result<bool, OrderStoreError> {
        if !confirm.confirm_delete(id) {
            debug!("Deletion declined");
            return Ok(false);
        }

        let removed = self.orders.update(|orders| {
            let index = orders.iter().position(|order| &order.id == id)?;
            Some(orders.remove(index))
        })?;
        if removed.is_none() {
            debug!("No order for id");
            return Ok(false);
        }

        info!("Deleted order");
        self.changes.notify(OrderChange::Deleted { id: id.clone() });
        Ok(true)
    }
}
