//! Admin gate and password hashing.
//!
//! The admin password is never stored in the clear: configuration carries an
//! Argon2 PHC string, and [`AdminGate::login`] verifies against it. A
//! successful login sets a flag in a separate session storage, apart from the
//! storage holding carts and orders.

use argon2::password_hash::rand_core::OsRng;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, instrument, warn};

use zenplay_storage::{SharedStorage, keys};

use crate::error::AuthError;

/// Value stored under [`keys::ADMIN_SESSION`] while logged in.
const LOGGED_IN: &str = "true";

const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash a password with Argon2 and a random salt, returning a PHC string.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` if the password fails
/// [`validate_password_strength`], or `AuthError::PasswordHash` if hashing
/// fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    validate_password_strength(password)?;

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Verify a password against a PHC string (constant-time).
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if `hash` is not a valid PHC string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// At least eight characters with at least one letter and one digit.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` otherwise.
pub fn validate_password_strength(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword);
    }

    let has_letter = password.chars().any(char::is_alphabetic);
    let has_number = password.chars().any(char::is_numeric);
    if !has_letter || !has_number {
        return Err(AuthError::WeakPassword);
    }

    Ok(())
}

/// Password check plus session flag.
///
/// The flag has no expiry: it lasts as long as the session storage does.
/// Over a [`zenplay_storage::MemoryStorage`] that is the life of the process.
/// Over the file backend (what `AdminState::open` uses) it survives restarts
/// until [`AdminGate::logout`] removes it, so one `zp-cli admin login` covers
/// later `zp-cli orders` invocations.
#[derive(Clone)]
pub struct AdminGate {
    session: SharedStorage,
    password_hash: SecretString,
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate")
            .field("password_hash", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl AdminGate {
    /// Create a gate that verifies against `password_hash` and records
    /// logins in `session`.
    #[must_use]
    pub const fn new(session: SharedStorage, password_hash: SecretString) -> Self {
        Self {
            session,
            password_hash,
        }
    }

    /// Check `password` and, if it matches, set the session flag.
    ///
    /// A wrong password leaves the session untouched.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidPassword` on mismatch,
    /// `AuthError::PasswordHash` if the configured hash is unusable, or
    /// `AuthError::Storage` if the flag cannot be written.
    #[instrument(skip_all)]
    pub fn login(&self, password: &str) -> Result<(), AuthError> {
        if !verify_password(password, self.password_hash.expose_secret())? {
            warn!("Admin login rejected");
            return Err(AuthError::InvalidPassword);
        }
        self.session.set_item(keys::ADMIN_SESSION, LOGGED_IN)?;
        info!("Admin logged in");
        Ok(())
    }

    /// Clear the session flag.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the flag cannot be removed.
    #[instrument(skip_all)]
    pub fn logout(&self) -> Result<(), AuthError> {
        self.session.remove_item(keys::ADMIN_SESSION)?;
        info!("Admin logged out");
        Ok(())
    }

    /// Whether the session flag is set. An unreadable session counts as
    /// logged out.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        match self.session.get_item(keys::ADMIN_SESSION) {
            Ok(value) => value.as_deref() == Some(LOGGED_IN),
            Err(e) => {
                warn!(error = %e, "Unreadable admin session");
                false
            }
        }
    }
}
