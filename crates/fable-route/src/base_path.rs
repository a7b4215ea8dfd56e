//! Deployment base path handling
//!
//! A path `P` served under base `B` is `B + P` externally and `P` internally.
//! [`BasePath::strip`] and [`BasePath::prepend`] are inverses for every `P`
//! starting with `/`, including `/` itself.

use std::convert::Infallible;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use url::Url;

/// Normalized deployment prefix (`/` when hosted at the root)
///
/// Always starts with `/` and never ends with `/` unless it is the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BasePath(String);

impl BasePath {
    /// Root base path
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Normalize a configured candidate
    ///
    /// Accepts `sub`, `/sub/`, or an absolute URL such as
    /// `https://host/sub/`; the latter is reduced to its path.
    #[must_use]
    pub fn new(candidate: &str) -> Self {
        let candidate = candidate.trim();
        let path = match Url::parse(candidate) {
            Ok(url) if url.has_host() => url.path().to_string(),
            _ => candidate
                .split(['?', '#'])
                .next()
                .unwrap_or_default()
                .to_string(),
        };

        let mut normalized = ensure_leading_slash(&path);
        while normalized.len() > 1 && normalized.ends_with('/') {
            normalized.pop();
        }
        Self(normalized)
    }

    /// The normalized prefix
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for `/`
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// External pathname -> internal path
    ///
    /// Only strips at a segment boundary: with base `/app`, `/app/x` becomes
    /// `/x` while `/application` is returned unchanged.
    #[must_use]
    pub fn strip(&self, pathname: &str) -> String {
        let normalized = ensure_leading_slash(pathname);
        if self.is_root() {
            return normalized;
        }
        match normalized.strip_prefix(self.0.as_str()) {
            Some("") => "/".to_string(),
            Some(rest) if rest.starts_with('/') => rest.to_string(),
            _ => normalized,
        }
    }

    /// Internal path -> external pathname
    #[must_use]
    pub fn prepend(&self, path: &str) -> String {
        let normalized = ensure_leading_slash(path);
        if self.is_root() {
            normalized
        } else if normalized == "/" {
            self.0.clone()
        } else {
            format!("{}{}", self.0, normalized)
        }
    }
}

impl Default for BasePath {
    fn default() -> Self {
        Self::root()
    }
}

impl Display for BasePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BasePath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

fn ensure_leading_slash(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
