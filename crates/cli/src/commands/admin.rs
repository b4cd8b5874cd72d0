//! Admin session commands.
//!
//! # Usage
//!
//! ```bash
//! # Hash a password, then put the output in ZENPLAY_ADMIN_PASSWORD_HASH
//! zp-cli admin hash-password 'my-password1'
//!
//! zp-cli admin login 'my-password1'
//! zp-cli admin logout
//! ```
//!
//! # Environment Variables
//!
//! - `ZENPLAY_ADMIN_PASSWORD_HASH` - Argon2 PHC string (login and logout)
//! - `ZENPLAY_DATA_DIR` - Directory holding the session flag

use zenplay_admin::auth;

use super::CommandError;
use super::orders::open;

/// Verify the password and start a session.
#[allow(clippy::print_stdout)]
pub fn login(password: &str) -> Result<(), CommandError> {
    let state = open()?;
    state.gate().login(password)?;
    println!("Logged in");
    Ok(())
}

/// End the session.
#[allow(clippy::print_stdout)]
pub fn logout() -> Result<(), CommandError> {
    let state = open()?;
    state.gate().logout()?;
    println!("Logged out");
    Ok(())
}

/// Print an Argon2 PHC string for the password.
#[allow(clippy::print_stdout)]
pub fn hash_password(password: &str) -> Result<(), CommandError> {
    let hash = auth::hash_password(password)?;
    println!("{hash}");
    Ok(())
}
