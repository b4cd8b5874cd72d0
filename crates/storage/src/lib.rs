//! ZenPlay Storage - persisted collections over a key/value store.
//!
//! The storefront and admin stores never touch a backend directly. They go
//! through a [`CollectionRepository`], which owns one storage key and offers
//! typed load/save of the JSON array stored there.
//!
//! # Modules
//!
//! - [`backend`] - The [`KeyValueStorage`] trait and the well-known keys
//! - [`memory`] - In-process backend (tests, session scope)
//! - [`file`] - One JSON file per key under a directory
//! - [`repository`] - Typed collection load/save with empty-on-failure reads
//! - [`events`] - Change notification channel stores publish to

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod error;
pub mod events;
pub mod file;
pub mod memory;
pub mod repository;

pub use backend::{KeyValueStorage, SharedStorage, keys};
pub use error::StorageError;
pub use events::ChangeNotifier;
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use repository::{CollectionRepository, LoadError};
