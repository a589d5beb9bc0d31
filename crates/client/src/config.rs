//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults point at the production
//! backends and a `.shelfscan` directory next to the working directory.
//!
//! - `SHELFSCAN_API_URL` - Base URL of the Shelfscan product service
//! - `SHELFSCAN_OFF_URL` - Base URL of the Open Food Facts catalog
//! - `SHELFSCAN_DATA_DIR` - Directory holding the `session` token file and
//!   `badges.json`

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default base URL for the internal product service.
pub const DEFAULT_API_URL: &str = "https://api.shelfscan.app";

/// Default base URL for the external Open Food Facts catalog.
pub const DEFAULT_OFF_URL: &str = "https://world.openfoodfacts.org";

/// Default data directory for local state.
pub const DEFAULT_DATA_DIR: &str = ".shelfscan";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Data layer configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the internal product service.
    pub api_url: Url,
    /// Base URL of the external catalog.
    pub off_url: Url,
    /// Directory for the session token file and badge store.
    pub data_dir: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a base URL variable is present but not a
    /// valid absolute URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_url("SHELFSCAN_API_URL", DEFAULT_API_URL)?;
        let off_url = parse_url("SHELFSCAN_OFF_URL", DEFAULT_OFF_URL)?;
        let data_dir = PathBuf::from(get_env_or_default("SHELFSCAN_DATA_DIR", DEFAULT_DATA_DIR));

        Ok(Self {
            api_url,
            off_url,
            data_dir,
        })
    }

    /// Configuration with default backends and the given data directory.
    ///
    /// Used by tests and embedders that manage their own state location.
    #[must_use]
    #[allow(clippy::missing_panics_doc)] // the default URLs are valid constants
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        #[allow(clippy::unwrap_used)]
        let api_url = Url::parse(DEFAULT_API_URL).unwrap();
        #[allow(clippy::unwrap_used)]
        let off_url = Url::parse(DEFAULT_OFF_URL).unwrap();

        Self {
            api_url,
            off_url,
            data_dir,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a base URL from the environment, falling back to a default.
fn parse_url(key: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = get_env_or_default(key, default);
    Url::parse(&raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
