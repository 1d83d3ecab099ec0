//! Application configuration with layered loading.
//!
//! Loading precedence (highest wins):
//! 1. Environment variables (DROPLET_*)
//! 2. TOML config file (if DROPLET_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the cache files and the refresh marker.
    ///
    /// Set via DROPLET_CACHE_DIR environment variable.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Path to the stored access token file. The token is only read here;
    /// acquiring and refreshing it is someone else's job.
    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,

    /// Base URL of the remote bookmark API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// User-Agent string for API requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Requested bookmarks per page. The remote service may silently cap
    /// this; aggregation relies on short pages, not on the cap.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Hours before the bookmark mirror counts as stale (fractions allowed).
    #[serde(default = "default_refresh_interval")]
    pub local_cache_refresh_interval: f64,

    /// Move favourite bookmarks ahead of the rest in search results.
    #[serde(default = "default_true")]
    pub favourites_first: bool,

    /// Show the bookmark description as the primary subtitle instead of
    /// the collection/tags/host line. Key spelled as the host picker
    /// configuration spells it.
    #[serde(default)]
    pub description_in_boomark_listing: bool,

    /// Render sub-collections as full slash-joined paths instead of an
    /// indented tree.
    #[serde(default)]
    pub subcollections_as_full_paths: bool,
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir().unwrap_or_else(|| PathBuf::from(".")).join("droplet")
}

fn default_token_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("droplet").join("token.json")
}

fn default_api_base_url() -> String {
    "https://api.raindrop.io/rest/v1".into()
}

fn default_user_agent() -> String {
    "droplet/0.1".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_page_size() -> usize {
    50
}

fn default_refresh_interval() -> f64 {
    24.0
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            token_path: default_token_path(),
            api_base_url: default_api_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            page_size: default_page_size(),
            local_cache_refresh_interval: default_refresh_interval(),
            favourites_first: true,
            description_in_boomark_listing: false,
            subcollections_as_full_paths: false,
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Staleness threshold for the bookmark mirror.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs_f64(self.local_cache_refresh_interval * 3600.0)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or environment cannot be parsed,
    /// or if validation fails after loading.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("DROPLET_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("DROPLET_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "https://api.raindrop.io/rest/v1");
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.local_cache_refresh_interval, 24.0);
        assert!(config.favourites_first);
        assert!(!config.description_in_boomark_listing);
        assert!(!config.subcollections_as_full_paths);
        assert!(config.cache_dir.ends_with("droplet"));
    }

    #[test]
    fn test_timeout_and_interval_durations() {
        let config = AppConfig { local_cache_refresh_interval: 0.5, ..Default::default() };
        assert_eq!(config.timeout(), Duration::from_millis(10_000));
        assert_eq!(config.refresh_interval(), Duration::from_secs(1800));
    }
}
