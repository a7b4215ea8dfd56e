//! Store configuration

use serde::{Deserialize, Serialize};

/// Default preference key for the theme
pub const DEFAULT_THEME_STORAGE_KEY: &str = "fable-theme";

/// How argument edits are written to history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArgHistoryPolicy {
    /// Every edit pushes an entry; back undoes one edit
    #[default]
    PushEachEdit,
    /// Edits replace the current entry; back leaves the story
    Coalesce,
}

/// Store settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    theme_storage_key: String,
    prefers_dark: bool,
    arg_history: ArgHistoryPolicy,
}

impl StoreConfig {
    /// Default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the theme preference key
    #[must_use]
    pub fn with_theme_storage_key(mut self, key: impl Into<String>) -> Self {
        self.theme_storage_key = key.into();
        self
    }

    /// Set the system dark-mode preference
    #[must_use]
    pub fn with_prefers_dark(mut self, prefers_dark: bool) -> Self {
        self.prefers_dark = prefers_dark;
        self
    }

    /// Set the arg edit history policy
    #[must_use]
    pub fn with_arg_history(mut self, policy: ArgHistoryPolicy) -> Self {
        self.arg_history = policy;
        self
    }

    /// Theme preference key
    #[inline]
    #[must_use]
    pub fn theme_storage_key(&self) -> &str {
        &self.theme_storage_key
    }

    /// System dark-mode preference
    #[inline]
    #[must_use]
    pub fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }

    /// Arg edit history policy
    #[inline]
    #[must_use]
    pub fn arg_history(&self) -> ArgHistoryPolicy {
        self.arg_history
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            theme_storage_key: DEFAULT_THEME_STORAGE_KEY.to_string(),
            prefers_dark: false,
            arg_history: ArgHistoryPolicy::default(),
        }
    }
}
