//! Configuration management for the Slotboard server.
//!
//! Loads configuration from environment variables with sensible defaults.
//! The loaded value is passed into router and gate construction at
//! startup; nothing here is process-global.

use slotboard_core::CategoryId;
use slotboard_roster::GateConfig;
use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Path prefix all API routes are nested under.
    pub api_root: String,
    /// Static API key; bypasses login and ownership checks everywhere.
    pub api_key: Option<String>,
    /// Category allow-list; empty enables all categories.
    pub allowed_category_ids: Vec<CategoryId>,
    /// Base URL of the host forum's internal API.
    pub forum_base_url: String,
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            api_root: "/api/slotboard".to_string(),
            api_key: None,
            allowed_category_ids: Vec::new(),
            forum_base_url: "http://localhost:4567/internal".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server: ServerConfig {
                host: env::var("SLOTBOARD_HOST").unwrap_or(defaults.server.host),
                port: env::var("SLOTBOARD_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.server.port),
            },
            api_root: env::var("SLOTBOARD_API_ROOT")
                .map(|root| normalize_root(&root))
                .unwrap_or(defaults.api_root),
            api_key: env::var("SLOTBOARD_API_KEY").ok().filter(|k| !k.is_empty()),
            allowed_category_ids: env::var("SLOTBOARD_ALLOWED_CATEGORIES")
                .map(|raw| parse_categories(&raw))
                .unwrap_or_default(),
            forum_base_url: env::var("SLOTBOARD_FORUM_URL").unwrap_or(defaults.forum_base_url),
        }
    }

    /// The gate configuration slice of this config.
    #[must_use]
    pub fn gate_config(&self) -> GateConfig {
        GateConfig {
            api_key: self.api_key.clone(),
            allowed_category_ids: self.allowed_category_ids.clone(),
        }
    }
}

/// Parse a comma-separated category id list; malformed entries are
/// dropped.
fn parse_categories(raw: &str) -> Vec<CategoryId> {
    raw.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .map(CategoryId)
        .collect()
}

/// Ensure a root path starts with `/` and carries no trailing slash.
fn normalize_root(raw: &str) -> String {
    let trimmed = raw.trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
