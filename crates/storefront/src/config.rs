//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ZENPLAY_DATA_DIR` - Directory holding the persisted collections (default: `.zenplay`)

use std::path::PathBuf;

use thiserror::Error;

/// Default storage directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = ".zenplay";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory for the file storage backend
    pub data_dir: PathBuf,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = get_env_or_default("ZENPLAY_DATA_DIR", DEFAULT_DATA_DIR);
        Self::from_parts(&data_dir)
    }

    fn from_parts(data_dir: &str) -> Result<Self, ConfigError> {
        if data_dir.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "ZENPLAY_DATA_DIR".to_string(),
                "must not be empty".to_string(),
            ));
        }
        Ok(Self {
            data_dir: PathBuf::from(data_dir),
        })
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
