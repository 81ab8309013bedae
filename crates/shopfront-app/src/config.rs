//! # Application Configuration
//!
//! Configuration loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SHOPFRONT_*`)
//! 2. Defaults (this file)
//!
//! Read-only after initialization. Pool tuning beyond the connection count
//! lives in [`DbConfig`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use directories::ProjectDirs;
use shopfront_core::{CatalogLocalizer, Locale};
use shopfront_db::DbConfig;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// SQLite database file.
    /// Default: `shopfront.db` in the platform data directory
    pub database_path: PathBuf,

    /// Culture used for error text, e.g. "en" or "fr-FR".
    /// Default: "en"
    pub locale: String,

    /// Maximum pooled connections.
    /// Default: 5
    pub max_connections: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: default_database_path(),
            locale: "en".to_string(),
            max_connections: 5,
        }
    }
}

impl AppConfig {
    /// Creates an AppConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `SHOPFRONT_DB_PATH`: Override the database file
    /// - `SHOPFRONT_LOCALE`: Override the error-text culture
    /// - `SHOPFRONT_MAX_CONNECTIONS`: Override the pool size (ignored unless a positive integer)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = AppConfig::default();

        if let Some(path) = lookup("SHOPFRONT_DB_PATH") {
            config.database_path = PathBuf::from(path);
        }

        if let Some(locale) = lookup("SHOPFRONT_LOCALE") {
            config.locale = locale;
        }

        if let Some(max) = lookup("SHOPFRONT_MAX_CONNECTIONS") {
            if let Ok(max) = max.trim().parse::<u32>() {
                if max > 0 {
                    config.max_connections = max;
                }
            }
        }

        config
    }

    /// Database configuration for this app.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path.clone()).max_connections(self.max_connections)
    }

    /// Localizer for the configured culture.
    pub fn localizer(&self) -> CatalogLocalizer {
        CatalogLocalizer::new(Locale::from_culture(&self.locale))
    }
}

/// Platform data directory path, or the working directory when none exists.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.shopfront.shopfront/shopfront.db`
/// - **Windows**: `%APPDATA%\shopfront\shopfront\data\shopfront.db`
/// - **Linux**: `~/.local/share/shopfront/shopfront.db`
fn default_database_path() -> PathBuf {
    ProjectDirs::from("com", "shopfront", "shopfront")
        .map(|dirs| dirs.data_dir().join("shopfront.db"))
        .unwrap_or_else(|| PathBuf::from("shopfront.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[]));

        assert_eq!(config.locale, "en");
        assert_eq!(config.max_connections, 5);
        assert!(config.database_path.ends_with("shopfront.db"));
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("SHOPFRONT_DB_PATH", "/tmp/shop.db"),
            ("SHOPFRONT_LOCALE", "fr-FR"),
            ("SHOPFRONT_MAX_CONNECTIONS", "8"),
        ]));

        assert_eq!(config.database_path, PathBuf::from("/tmp/shop.db"));
        assert_eq!(config.localizer().locale(), Locale::Fr);
        assert_eq!(config.db_config().max_connections, 8);
    }

    #[test]
    fn test_bad_pool_size_is_ignored() {
        for bad in ["zero", "0", "-3"] {
            let config =
                AppConfig::from_lookup(lookup_from(&[("SHOPFRONT_MAX_CONNECTIONS", bad)]));
            assert_eq!(config.max_connections, 5);
        }
    }

    #[test]
    fn test_config_serializes_camel_case() {
        let json = serde_json::to_value(AppConfig::default()).unwrap();
        assert_eq!(json["maxConnections"], 5);
    }
}
