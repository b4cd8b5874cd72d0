//! Subcommand implementations.

use std::fmt::Debug;

use thiserror::Error;
use tokio::sync::broadcast::{self, error::TryRecvError};

pub mod admin;
pub mod cart;
pub mod orders;

/// Errors that stop a command before it completes.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Storefront configuration error: {0}")]
    StorefrontConfig(#[from] zenplay_storefront::config::ConfigError),

    #[error("Admin configuration error: {0}")]
    AdminConfig(#[from] zenplay_admin::config::ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] zenplay_storage::StorageError),

    #[error(transparent)]
    Cart(#[from] zenplay_storefront::CartError),

    #[error("Checkout failed: {0}")]
    Checkout(#[from] zenplay_storefront::CheckoutError),

    #[error(transparent)]
    Orders(#[from] zenplay_admin::OrderStoreError),

    #[error(transparent)]
    Auth(#[from] zenplay_admin::AuthError),

    /// Order commands need `admin login` first.
    #[error("Not logged in; run `zp-cli admin login` first")]
    NotLoggedIn,

    #[error("Order not found: {0}")]
    OrderNotFound(String),
}

/// Log every change a store published during this command.
pub fn log_changes<E: Debug + Clone>(changes: &mut broadcast::Receiver<E>) {
    loop {
        match changes.try_recv() {
            Ok(change) => tracing::info!(?change, "Store changed"),
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Missed store changes");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
}
