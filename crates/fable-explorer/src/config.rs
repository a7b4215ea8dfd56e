//! Explorer configuration
//!
//! Read from TOML, then overridden from the environment:
//!
//! ```toml
//! base_path = "/design-system"
//! prefers_dark = false
//! theme_storage_key = "fable-theme"
//! preferences_path = "~/.config/fable/preferences.json"
//! arg_history = "push-each-edit"   # or "coalesce"
//! ```

use fable_route::BasePath;
use fable_store::{ArgHistoryPolicy, StoreConfig, DEFAULT_THEME_STORAGE_KEY};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding `base_path`
pub const BASE_PATH_ENV: &str = "FABLE_BASE_PATH";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Config path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config is not valid TOML for the expected shape
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Session settings; the base path is fixed once the explorer starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExplorerConfig {
    /// Deployment base path (`/` for root deployments)
    pub base_path: String,
    /// System dark-mode preference, used when no theme is stored
    pub prefers_dark: bool,
    /// Preference key for the theme
    pub theme_storage_key: String,
    /// JSON preference file; in-memory preferences when unset
    pub preferences_path: Option<PathBuf>,
    /// History behavior of argument edits
    pub arg_history: ArgHistoryPolicy,
}

impl ExplorerConfig {
    /// Default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With base path
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// With system dark-mode preference
    #[inline]
    #[must_use]
    pub fn with_prefers_dark(mut self, prefers_dark: bool) -> Self {
        self.prefers_dark = prefers_dark;
        self
    }

    /// With theme preference key
    #[must_use]
    pub fn with_theme_storage_key(mut self, key: impl Into<String>) -> Self {
        self.theme_storage_key = key.into();
        self
    }

    /// With preference file
    #[must_use]
    pub fn with_preferences_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.preferences_path = Some(path.into());
        self
    }

    /// With arg edit history policy
    #[inline]
    #[must_use]
    pub fn with_arg_history(mut self, policy: ArgHistoryPolicy) -> Self {
        self.arg_history = policy;
        self
    }

    /// Parse TOML; missing keys keep their defaults
    ///
    /// # Errors
    ///
    /// Fails on malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Apply `FABLE_BASE_PATH` from the process environment
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source
    #[must_use]
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(base) = lookup(BASE_PATH_ENV).filter(|v| !v.trim().is_empty()) {
            tracing::debug!(base = %base, "Base path taken from environment");
            self.base_path = base;
        }
        self
    }

    /// Normalized base path
    #[must_use]
    pub fn base_path(&self) -> BasePath {
        BasePath::new(&self.base_path)
    }

    /// Settings for the state store
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new()
            .with_theme_storage_key(self.theme_storage_key.clone())
            .with_prefers_dark(self.prefers_dark)
            .with_arg_history(self.arg_history)
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            base_path: "/".to_string(),
            prefers_dark: false,
            theme_storage_key: DEFAULT_THEME_STORAGE_KEY.to_string(),
            preferences_path: None,
            arg_history: ArgHistoryPolicy::default(),
        }
    }
}
