//! Admin state shared across callers.

use std::sync::Arc;

use zenplay_core::OrderId;
use zenplay_storage::{FileStorage, SharedStorage, StorageError};

use crate::auth::AdminGate;
use crate::config::AdminConfig;
use crate::dashboard::{DashboardStats, OrderDetailView, OrderListing};
use crate::orders::OrderStore;

/// Name of the session directory under the data directory.
pub const SESSION_DIR: &str = "session";

/// Admin state bundling the order store and the admin gate.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone, Debug)]
pub struct AdminState {
    inner: Arc<AdminStateInner>,
}

#[derive(Debug)]
struct AdminStateInner {
    config: AdminConfig,
    orders: OrderStore,
    gate: AdminGate,
}

impl AdminState {
    /// Build state over explicit backends: `storage` for the order
    /// collection and `session` for the login flag.
    #[must_use]
    pub fn new(config: AdminConfig, storage: SharedStorage, session: SharedStorage) -> Self {
        let orders = OrderStore::new(storage);
        let gate = AdminGate::new(session, config.password_hash.clone());
        Self {
            inner: Arc::new(AdminStateInner {
                config,
                orders,
                gate,
            }),
        }
    }

    /// Build state over file backends in `config.data_dir` and its
    /// [`SESSION_DIR`] subdirectory.
    ///
    /// The login flag is a file there, so it persists across processes until
    /// logout.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if either directory cannot be created.
    pub fn open(config: AdminConfig) -> Result<Self, StorageError> {
        let storage = FileStorage::open(&config.data_dir)?;
        let session = FileStorage::open(config.data_dir.join(SESSION_DIR))?;
        Ok(Self::new(config, Arc::new(storage), Arc::new(session)))
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the order store.
    #[must_use]
    pub fn orders(&self) -> &OrderStore {
        &self.inner.orders
    }

    /// Get a reference to the admin gate.
    #[must_use]
    pub fn gate(&self) -> &AdminGate {
        &self.inner.gate
    }

    /// Dashboard figures over the current order collection.
    #[must_use]
    pub fn stats(&self) -> DashboardStats {
        DashboardStats::from_orders(&self.orders().get_orders())
    }

    /// Recent and full order tables, newest first.
    #[must_use]
    pub fn listing(&self) -> OrderListing {
        OrderListing::from_orders(
            &self.orders().get_orders(),
            self.config().recent_orders_limit,
        )
    }

    /// Detail view for one order.
    #[must_use]
    pub fn order_detail(&self, id: &OrderId) -> Option<OrderDetailView> {
        self.orders().find(id).as_ref().map(OrderDetailView::from)
    }
}
