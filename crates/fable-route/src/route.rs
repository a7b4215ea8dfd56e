//! Typed route descriptors
//!
//! Provides [`Route`], the parsed result of matching a location against the
//! explorer's path patterns.

use crate::search::SearchParams;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

/// Path parameters captured by a pattern (`:group` -> `button`)
pub type RouteParams = BTreeMap<String, String>;

/// Name of a matched route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteName {
    /// `/`
    Home,
    /// `/components/:group/:story`
    Component,
    /// `/docs/:section/:slug`
    Docs,
    /// `/tokens` and `/tokens/:tokenId`
    Tokens,
    /// `/icons` and `/icons/:iconId`
    Icons,
    /// `/playroom`
    Playroom,
    /// Nothing matched
    NotFound,
}

impl RouteName {
    /// Stable kebab-case name
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Component => "component",
            Self::Docs => "docs",
            Self::Tokens => "tokens",
            Self::Icons => "icons",
            Self::Playroom => "playroom",
            Self::NotFound => "not-found",
        }
    }
}

impl Display for RouteName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed, typed result of matching a location
///
/// Routes are recomputed on every navigation and never mutated in place;
/// all fields are read through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    name: RouteName,
    params: RouteParams,
    search_params: SearchParams,
}

impl Route {
    /// Create a route
    #[inline]
    #[must_use]
    pub fn new(name: RouteName, params: RouteParams, search_params: SearchParams) -> Self {
        Self {
            name,
            params,
            search_params,
        }
    }

    /// Route with no params and an empty query
    #[inline]
    #[must_use]
    pub fn named(name: RouteName) -> Self {
        Self::new(name, RouteParams::new(), SearchParams::new())
    }

    /// Route name
    #[inline]
    #[must_use]
    pub fn name(&self) -> RouteName {
        self.name
    }

    /// All path params
    #[inline]
    #[must_use]
    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    /// Single path param
    #[inline]
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Query parameters
    #[inline]
    #[must_use]
    pub fn search_params(&self) -> &SearchParams {
        &self.search_params
    }

    /// True when no pattern matched
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.name == RouteName::NotFound
    }
}
