//! ZenPlay Admin library.
//!
//! Order management for the admin dashboard: status changes, deletion,
//! aggregate statistics and order listings, all over the order collection the
//! storefront checkout appends to.
//!
//! # Security
//!
//! Access is gated by [`auth::AdminGate`], which verifies a password against a
//! configured Argon2 hash and records the result in session-scoped storage.
//! The gate is only as trustworthy as the process that evaluates it; anything
//! exposed beyond a single trusted operator needs real authorization in front.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod orders;
pub mod state;

pub use auth::AdminGate;
pub use config::AdminConfig;
pub use dashboard::{DashboardStats, OrderDetailView, OrderListing};
pub use error::{AuthError, OrderStoreError};
pub use orders::{AlwaysConfirm, Confirm, NeverConfirm, OrderChange, OrderStore};
pub use state::AdminState;
