//! Client configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

/// Storefront configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `SWEET_SHOP_API_URL`: inventory service base URL (default: `"http://localhost:8080/api"`)
/// - `SWEET_SHOP_CART_DIR`: directory holding the persisted cart (default: `".sweet-shop"`)
/// - `SWEET_SHOP_TIMEOUT_SECS`: per-request timeout (default: `10`)
/// - `SWEET_SHOP_TOKEN`: bearer token of an already signed-in user (optional)
/// - `SWEET_SHOP_USER`: username to attach to that token (optional)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
#[derive(Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub cart_dir: PathBuf,
    pub timeout_secs: u64,
    pub token: Option<String>,
    pub username: Option<String>,
    pub log_level: String,
}

impl ClientConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults for
    /// anything missing or unparseable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            api_url: non_empty("SWEET_SHOP_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            cart_dir: non_empty("SWEET_SHOP_CART_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.cart_dir),
            timeout_secs: non_empty("SWEET_SHOP_TIMEOUT_SECS")
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            token: non_empty("SWEET_SHOP_TOKEN"),
            username: non_empty("SWEET_SHOP_USER"),
            log_level: non_empty("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080/api".to_string(),
            cart_dir: PathBuf::from(".sweet-shop"),
            timeout_secs: 10,
            token: None,
            username: None,
            log_level: "info".to_string(),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url)
            .field("cart_dir", &self.cart_dir)
            .field("timeout_secs", &self.timeout_secs)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .field("log_level", &self.log_level)
            .finish()
    }
}
