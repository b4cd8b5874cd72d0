//! Integration tests for ZenPlay.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p zenplay-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Cart to checkout to admin dashboard over one data directory
//! - `persistence` - Reopening stores over the file backend
//! - `admin_gate` - Password login and the session flag
//!
//! Every test gets its own [`TestContext`], a fresh directory under the system
//! temp dir that is removed when the context drops.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use secrecy::SecretString;
use uuid::Uuid;

use zenplay_admin::{AdminConfig, AdminState, auth};
use zenplay_core::{Price, Product, ProductId};
use zenplay_storefront::{CheckoutForm, StorefrontConfig, StorefrontState};

/// Password the test admin hash is built from.
pub const ADMIN_PASSWORD: &str = "zenplay2024";

/// A scratch data directory plus helpers to open stores over it.
#[derive(Debug)]
pub struct TestContext {
    data_dir: PathBuf,
}

impl TestContext {
    /// Create a fresh, empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let data_dir = std::env::temp_dir().join(format!("zenplay-it-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&data_dir).expect("create test data dir");
        Self { data_dir }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Open the storefront over this directory.
    ///
    /// # Panics
    ///
    /// Panics if the file backend cannot be opened.
    #[must_use]
    pub fn storefront(&self) -> StorefrontState {
        StorefrontState::open(&StorefrontConfig {
            data_dir: self.data_dir.clone(),
        })
        .expect("open storefront")
    }

    /// Open the admin side over this directory, with [`ADMIN_PASSWORD`] as
    /// the admin password.
    ///
    /// # Panics
    ///
    /// Panics if the file backend cannot be opened.
    #[must_use]
    pub fn admin(&self) -> AdminState {
        AdminState::open(AdminConfig {
            data_dir: self.data_dir.clone(),
            recent_orders_limit: 5,
            password_hash: SecretString::from(admin_password_hash().to_owned()),
        })
        .expect("open admin")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.data_dir);
    }
}

/// Argon2 hash of [`ADMIN_PASSWORD`], computed once per test binary.
///
/// # Panics
///
/// Panics if hashing fails.
#[must_use]
pub fn admin_password_hash() -> &'static str {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| auth::hash_password(ADMIN_PASSWORD).expect("hash admin password"))
}

/// A product priced in cents.
///
/// # Panics
///
/// Panics if `cents` is negative.
#[must_use]
pub fn product(id: &str, name: &str, cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        price: Price::from_cents(cents).expect("non-negative price"),
        image: format!("images/{id}.jpg"),
    }
}

/// A complete checkout form.
#[must_use]
pub fn checkout_form(email: &str) -> CheckoutForm {
    CheckoutForm {
        first_name: "Jane".to_owned(),
        last_name: "Wanjiru".to_owned(),
        email: email.to_owned(),
        phone: "+254700000000".to_owned(),
        address: "12 Moi Avenue".to_owned(),
        city: "Nairobi".to_owned(),
        notes: Some("Call on arrival".to_owned()),
    }
}
