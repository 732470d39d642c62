//! # Sync Configuration
//!
//! Where the backend lives and how long success banners stay up.
//!
//! ## Configuration Sources (Priority Order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Configuration Loading                              │
//! │                                                                         │
//! │  1. Defaults (this file)                                               │
//! │       │   base_url = none, success_ttl_ms = 3000                        │
//! │       ▼                                                                 │
//! │  2. Config file (stockroom.toml)                                        │
//! │       │   explicit path, or the platform config dir:                    │
//! │       │   • Linux:   ~/.config/stockroom/stockroom.toml                 │
//! │       │   • macOS:   ~/Library/Application Support/com.stockroom.       │
//! │       │              stockroom/stockroom.toml                           │
//! │       ▼                                                                 │
//! │  3. Environment                                                         │
//! │       │   STOCKROOM_API_URL, STOCKROOM_SUCCESS_TTL_MS                   │
//! │       ▼                                                                 │
//! │  4. validate()                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Config File
//! ```toml
//! [api]
//! base_url = "https://inventory.example.com/Prod"
//!
//! [notifications]
//! success_ttl_ms = 3000
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{SyncError, SyncResult};

/// Environment variable overriding `[api].base_url`.
pub const ENV_API_URL: &str = "STOCKROOM_API_URL";

/// Environment variable overriding `[notifications].success_ttl_ms`.
pub const ENV_SUCCESS_TTL_MS: &str = "STOCKROOM_SUCCESS_TTL_MS";

/// Default lifetime of a success notification.
pub const DEFAULT_SUCCESS_TTL_MS: u64 = 3000;

// =============================================================================
// API Settings
// =============================================================================

/// Backend connection settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL the `/products` routes hang off.
    ///
    /// May carry a path prefix (API gateway stages such as `/Prod`).
    #[serde(default)]
    pub base_url: Option<String>,
}

// =============================================================================
// Notification Settings
// =============================================================================

/// Notification behavior settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// How long a success message stays visible (milliseconds).
    #[serde(default = "default_success_ttl")]
    pub success_ttl_ms: u64,
}

fn default_success_ttl() -> u64 {
    DEFAULT_SUCCESS_TTL_MS
}

impl Default for NotificationSettings {
    fn default() -> Self {
        NotificationSettings {
            success_ttl_ms: default_success_ttl(),
        }
    }
}

// =============================================================================
// Main Sync Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Backend connection settings.
    #[serde(default)]
    pub api: ApiSettings,

    /// Notification settings.
    #[serde(default)]
    pub notifications: NotificationSettings,
}

impl SyncConfig {
    /// Creates a config pointing at `base_url` with default notification settings.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        SyncConfig {
            api: ApiSettings {
                base_url: Some(base_url.into()),
            },
            notifications: NotificationSettings::default(),
        }
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (stockroom.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SyncResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> SyncResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| SyncError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SyncError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| SyncError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    ///
    /// A missing base URL is allowed here; it is reported by
    /// [`SyncConfig::base_url`] when a client is actually built.
    pub fn validate(&self) -> SyncResult<()> {
        if let Some(ref raw) = self.api.base_url {
            parse_base_url(raw)?;
        }

        if self.notifications.success_ttl_ms == 0 {
            return Err(SyncError::InvalidConfig(
                "success_ttl_ms must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL) {
            debug!(url = %url, "Overriding API base URL from environment");
            self.api.base_url = Some(url);
        }

        if let Some(ttl) = lookup(ENV_SUCCESS_TTL_MS) {
            match ttl.parse::<u64>() {
                Ok(ms) => self.notifications.success_ttl_ms = ms,
                Err(_) => warn!(value = %ttl, "Ignoring non-numeric success TTL in environment"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "stockroom", "stockroom")
            .map(|dirs| dirs.config_dir().join("stockroom.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the parsed base URL.
    pub fn base_url(&self) -> SyncResult<Url> {
        let raw = self.api.base_url.as_deref().ok_or(SyncError::MissingBaseUrl)?;
        parse_base_url(raw)
    }

    /// Returns how long success notifications stay visible.
    pub fn success_ttl(&self) -> Duration {
        Duration::from_millis(self.notifications.success_ttl_ms)
    }
}

/// Parses and checks a base URL (http or https, usable as a path base).
pub fn parse_base_url(raw: &str) -> SyncResult<Url> {
    let url = Url::parse(raw.trim())?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(SyncError::InvalidUrl(format!(
            "Base URL must start with http:// or https://, got: {}",
            raw
        )));
    }

    if url.cannot_be_a_base() {
        return Err(SyncError::InvalidUrl(format!(
            "Base URL cannot have path segments: {}",
            raw
        )));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = SyncConfig::default();
        assert_eq!(config.api.base_url, None);
        assert_eq!(config.notifications.success_ttl_ms, 3000);
        assert_eq!(config.success_ttl(), Duration::from_millis(3000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_base_url_required_when_used() {
        let config = SyncConfig::default();
        assert!(matches!(config.base_url(), Err(SyncError::MissingBaseUrl)));
    }

    #[test]
    fn test_config_validation() {
        let mut config = SyncConfig::with_base_url("ftp://example.com");
        assert!(config.validate().is_err());

        config.api.base_url = Some("not a url".to_string());
        assert!(config.validate().is_err());

        config.api.base_url = Some("https://example.com/Prod".to_string());
        assert!(config.validate().is_ok());

        config.notifications.success_ttl_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_API_URL, "http://localhost:9000"),
            (ENV_SUCCESS_TTL_MS, "1500"),
        ]
        .into_iter()
        .collect();

        let mut config = SyncConfig::default();
        config.apply_overrides_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.notifications.success_ttl_ms, 1500);
    }

    #[test]
    fn test_bad_ttl_override_ignored() {
        let mut config = SyncConfig::default();
        config.apply_overrides_from(|key| (key == ENV_SUCCESS_TTL_MS).then(|| "soon".to_string()));
        assert_eq!(config.notifications.success_ttl_ms, 3000);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("stockroom.toml");

        let mut config = SyncConfig::with_base_url("http://127.0.0.1:8080");
        config.notifications.success_ttl_ms = 1200;
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[api]"));
        assert!(contents.contains("[notifications]"));

        let loaded: SyncConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: SyncConfig = toml::from_str("[api]\nbase_url = \"http://x\"\n").unwrap();
        assert_eq!(config.notifications.success_ttl_ms, DEFAULT_SUCCESS_TTL_MS);
    }
}
