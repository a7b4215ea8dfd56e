//! View and theme state

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

/// Which main view is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewName {
    /// Landing page
    #[default]
    Home,
    /// Story canvas
    Component,
    /// Docs page
    Docs,
    /// Token reference
    Tokens,
    /// Icon gallery
    Icons,
    /// Playroom
    Playroom,
}

impl ViewName {
    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Component => "component",
            Self::Docs => "docs",
            Self::Tokens => "tokens",
            Self::Icons => "icons",
            Self::Playroom => "playroom",
        }
    }
}

impl Display for ViewName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// View name plus the params the view was resolved with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    /// View
    pub name: ViewName,
    /// Resolved params (`group`, `story`, `section`, `slug`, `id`, ...)
    pub params: BTreeMap<String, String>,
}

impl ViewState {
    /// View without params
    #[must_use]
    pub fn new(name: ViewName) -> Self {
        Self {
            name,
            params: BTreeMap::new(),
        }
    }

    /// Home view
    #[must_use]
    pub fn home() -> Self {
        Self::new(ViewName::Home)
    }

    /// Add one param
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Param value
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light scheme
    #[default]
    Light,
    /// Dark scheme
    Dark,
}

impl Theme {
    /// Lowercase name, as persisted
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a persisted value
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// The other scheme
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Default from the system preference
    #[must_use]
    pub const fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
