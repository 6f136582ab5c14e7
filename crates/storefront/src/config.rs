//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `TIENDITA_HOST` - Bind address (default: 127.0.0.1)
//! - `TIENDITA_PORT` - Listen port (default: 3000)
//! - `TIENDITA_CART_PATH` - Path of the persisted cart slot
//!   (default: data/cart.json)
//! - `TIENDITA_CATALOG` - Catalog source: `builtin`, a file path, or an
//!   http(s) URL (default: builtin)
//! - `TIENDITA_CHECKOUT_DELAY_MS` - Simulated checkout processing pause
//!   (default: 400)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::catalog::CatalogSource;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Path of the single persisted cart slot
    pub cart_path: PathBuf,
    /// Where the product catalog is loaded from
    pub catalog: CatalogSource,
    /// Cosmetic processing pause before the simulated checkout completes
    pub checkout_delay: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparsable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("TIENDITA_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("TIENDITA_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("TIENDITA_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("TIENDITA_PORT".to_string(), e.to_string()))?;
        let cart_path = PathBuf::from(get_env_or_default("TIENDITA_CART_PATH", "data/cart.json"));
        let catalog = CatalogSource::parse(&get_env_or_default("TIENDITA_CATALOG", "builtin"))
            .map_err(|e| {
                ConfigError::InvalidEnvVar("TIENDITA_CATALOG".to_string(), e.to_string())
            })?;
        let checkout_delay_ms = get_env_or_default("TIENDITA_CHECKOUT_DELAY_MS", "400")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("TIENDITA_CHECKOUT_DELAY_MS".to_string(), e.to_string())
            })?;

        Ok(Self {
            host,
            port,
            cart_path,
            catalog,
            checkout_delay: Duration::from_millis(checkout_delay_ms),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
