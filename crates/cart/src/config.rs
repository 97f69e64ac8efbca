//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ROCKETSHOES_API_URL` - Base URL of the catalog/inventory API (http or https)
//!
//! ## Optional
//! - `ROCKETSHOES_API_TOKEN` - Bearer token sent to the catalog API
//! - `ROCKETSHOES_API_TIMEOUT_SECS` - Request timeout in seconds (default: 10)
//! - `ROCKETSHOES_STORAGE_PATH` - Storage file (default: .rocketshoes/storage.json)
//! - `ROCKETSHOES_CART_KEY` - Storage key of the cart blob (default: @RocketShoes:cart)
//! - `ROCKETSHOES_LOCALE` - Notice and price locale, `pt-BR` or `en` (default: pt-BR)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;
use std::time::Duration;

use rocket_shoes_core::Locale;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::storage::CART_STORAGE_KEY;

const DEFAULT_TIMEOUT_SECS: &str = "10";
const DEFAULT_STORAGE_PATH: &str = ".rocketshoes/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// File the storage slots are kept in
    pub storage_path: PathBuf,
    /// Storage key of the cart blob
    pub cart_key: String,
    /// Locale for notices and prices
    pub locale: Locale,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Catalog API configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL; `products/{id}` and `stock/{id}` are resolved against it
    pub api_url: Url,
    /// Optional bearer token
    pub api_token: Option<SecretString>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("api_url", &self.api_url.as_str())
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl CatalogConfig {
    /// Configuration for `api_url` with no token and the default timeout.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL is not a valid http(s) URL.
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_api_url("ROCKETSHOES_API_URL", api_url)?,
            api_token: None,
            timeout: Duration::from_secs(10),
        })
    }

    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = parse_api_url(
            "ROCKETSHOES_API_URL",
            &get_required(lookup, "ROCKETSHOES_API_URL")?,
        )?;
        let api_token = lookup("ROCKETSHOES_API_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .map(SecretString::from);
        let timeout_secs = get_or_default(lookup, "ROCKETSHOES_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("ROCKETSHOES_API_TIMEOUT_SECS".to_string(), e.to_string())
            })?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "ROCKETSHOES_API_TIMEOUT_SECS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            api_url,
            api_token,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let catalog = CatalogConfig::from_lookup(&lookup)?;
        let storage_path = PathBuf::from(get_or_default(
            &lookup,
            "ROCKETSHOES_STORAGE_PATH",
            DEFAULT_STORAGE_PATH,
        ));
        let cart_key = get_or_default(&lookup, "ROCKETSHOES_CART_KEY", CART_STORAGE_KEY);
        let locale = lookup("ROCKETSHOES_LOCALE")
            .map(|value| {
                value.parse::<Locale>().map_err(|e| {
                    ConfigError::InvalidEnvVar("ROCKETSHOES_LOCALE".to_string(), e.to_string())
                })
            })
            .transpose()?
            .unwrap_or_default();
        let sentry_dsn = lookup("SENTRY_DSN").filter(|dsn| !dsn.trim().is_empty());

        Ok(Self {
            catalog,
            storage_path,
            cart_key,
            locale,
            sentry_dsn,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required variable.
fn get_required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<String, ConfigError> {
    lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a variable with a default value.
fn get_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Parse an http(s) base URL.
fn parse_api_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), format!("invalid URL: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported URL scheme: {scheme}"),
        )),
    }
}
