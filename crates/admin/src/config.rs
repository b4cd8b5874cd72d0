//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ZENPLAY_ADMIN_PASSWORD_HASH` - Argon2 PHC string of the admin password
//!   (produce one with `zp-cli admin hash-password`)
//!
//! ## Optional
//! - `ZENPLAY_DATA_DIR` - Directory holding the persisted collections (default: `.zenplay`)
//! - `ZENPLAY_RECENT_ORDERS_LIMIT` - Rows in the recent-orders table (default: 5)

use std::path::PathBuf;

use argon2::password_hash::PasswordHash;
use secrecy::SecretString;
use thiserror::Error;

use crate::dashboard::DEFAULT_RECENT_LIMIT;

const DEFAULT_DATA_DIR: &str = ".zenplay";
const PASSWORD_HASH_VAR: &str = "ZENPLAY_ADMIN_PASSWORD_HASH";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "put-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Admin configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Directory for the file storage backend
    pub data_dir: PathBuf,
    /// How many orders the recent-orders table shows
    pub recent_orders_limit: usize,
    /// Argon2 PHC string the admin password is verified against
    pub password_hash: SecretString,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the password hash is missing or unusable, or
    /// if an optional variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = get_env_or_default("ZENPLAY_DATA_DIR", DEFAULT_DATA_DIR);
        let recent_orders_limit = get_optional_env("ZENPLAY_RECENT_ORDERS_LIMIT");
        let password_hash = get_required_env(PASSWORD_HASH_VAR)?;

        Self::from_parts(&data_dir, recent_orders_limit.as_deref(), password_hash)
    }

    fn from_parts(
        data_dir: &str,
        recent_orders_limit: Option<&str>,
        password_hash: String,
    ) -> Result<Self, ConfigError> {
        if data_dir.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "ZENPLAY_DATA_DIR".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let recent_orders_limit = match recent_orders_limit {
            Some(raw) => parse_limit(raw)?,
            None => DEFAULT_RECENT_LIMIT,
        };

        validate_password_hash(&password_hash)?;

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            recent_orders_limit,
            password_hash: SecretString::from(password_hash),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_limit(raw: &str) -> Result<usize, ConfigError> {
    let invalid = |reason: String| {
        ConfigError::InvalidEnvVar("ZENPLAY_RECENT_ORDERS_LIMIT".to_string(), reason)
    };
    let limit = raw.trim().parse::<usize>().map_err(|e| invalid(e.to_string()))?;
    if limit == 0 {
        return Err(invalid("must be at least 1".to_string()));
    }
    Ok(limit)
}

/// Check the configured hash is an Argon2 PHC string.
///
/// Values that do not parse are checked against the placeholder blocklist so
/// a copied `.env.example` line gets a clearer message.
fn validate_password_hash(value: &str) -> Result<(), ConfigError> {
    let parsed = PasswordHash::new(value).map_err(|e| {
        let lower = value.to_lowercase();
        PLACEHOLDER_PATTERNS
            .iter()
            .find(|pattern| lower.contains(*pattern))
            .map_or_else(
                || ConfigError::InvalidEnvVar(PASSWORD_HASH_VAR.to_string(), e.to_string()),
                |pattern| {
                    ConfigError::InsecureSecret(
                        PASSWORD_HASH_VAR.to_string(),
                        format!("appears to be a placeholder (contains '{pattern}')"),
                    )
                },
            )
    })?;

    let algorithm = parsed.algorithm.as_str();
    if !algorithm.starts_with("argon2") {
        return Err(ConfigError::InsecureSecret(
            PASSWORD_HASH_VAR.to_string(),
            format!("must be an Argon2 hash (got {algorithm})"),
        ));
    }
    Ok(())
}
