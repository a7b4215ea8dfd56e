//! Route matching
//!
//! Provides [`RouteMatcher`], an ordered list of [`RoutePattern`]s evaluated
//! first-match-wins against a base-stripped location.

use crate::route::{Route, RouteName, RouteParams};
use crate::search::SearchParams;
use std::fmt::{self, Display, Formatter};

/// Errors building a route pattern
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// Pattern does not start with `/`
    #[error("pattern must start with '/': '{0}'")]
    MissingLeadingSlash(String),

    /// `:` with no name after it
    #[error("empty parameter name in pattern '{0}'")]
    EmptyParamName(String),

    /// Same parameter captured twice
    #[error("duplicate parameter ':{param}' in pattern '{pattern}'")]
    DuplicateParam { pattern: String, param: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// Single path pattern such as `/docs/:section/:slug`
///
/// Parameters match exactly one non-empty segment. Literal segments compare
/// exactly, so trailing slashes are significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    name: RouteName,
    source: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a pattern
    ///
    /// # Errors
    /// - `PatternError::MissingLeadingSlash` if `pattern` is relative
    /// - `PatternError::EmptyParamName` for a bare `:`
    /// - `PatternError::DuplicateParam` if a name is captured twice
    pub fn parse(name: RouteName, pattern: &str) -> Result<Self, PatternError> {
        let Some(rest) = pattern.strip_prefix('/') else {
            return Err(PatternError::MissingLeadingSlash(pattern.to_string()));
        };

        let mut segments = Vec::new();
        if !rest.is_empty() {
            for raw in rest.split('/') {
                let segment = match raw.strip_prefix(':') {
                    Some("") => return Err(PatternError::EmptyParamName(pattern.to_string())),
                    Some(param) => {
                        if segments
                            .iter()
                            .any(|s| matches!(s, Segment::Param(p) if p == param))
                        {
                            return Err(PatternError::DuplicateParam {
                                pattern: pattern.to_string(),
                                param: param.to_string(),
                            });
                        }
                        Segment::Param(param.to_string())
                    }
                    None => Segment::Literal(raw.to_string()),
                };
                segments.push(segment);
            }
        }

        Ok(Self {
            name,
            source: pattern.to_string(),
            segments,
        })
    }

    /// Route name produced on match
    #[inline]
    #[must_use]
    pub fn name(&self) -> RouteName {
        self.name
    }

    /// Original pattern text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match a pathname, returning captured params
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let rest = path.strip_prefix('/')?;
        if rest.is_empty() {
            return self.segments.is_empty().then(RouteParams::new);
        }

        let parts: Vec<&str> = rest.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = RouteParams::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Param(param) if !part.is_empty() => {
                    params.insert(param.clone(), part.to_string());
                }
                _ => return None,
            }
        }
        Some(params)
    }
}

impl Display for RoutePattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.name)
    }
}

/// Ordered route table, most specific pattern first
#[derive(Debug, Clone, Default)]
pub struct RouteMatcher {
    patterns: Vec<RoutePattern>,
}

impl RouteMatcher {
    /// Create an empty table (everything is `not-found`)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// The explorer's route table
    #[must_use]
    pub fn standard() -> Self {
        const TABLE: [(RouteName, &str); 8] = [
            (RouteName::Home, "/"),
            (RouteName::Component, "/components/:group/:story"),
            (RouteName::Docs, "/docs/:section/:slug"),
            (RouteName::Tokens, "/tokens/:tokenId"),
            (RouteName::Tokens, "/tokens"),
            (RouteName::Icons, "/icons/:iconId"),
            (RouteName::Icons, "/icons"),
            (RouteName::Playroom, "/playroom"),
        ];

        let patterns = TABLE
            .iter()
            .filter_map(|(name, pattern)| RoutePattern::parse(*name, pattern).ok())
            .collect();
        Self { patterns }
    }

    /// Append a pattern (lowest priority)
    ///
    /// # Errors
    /// Returns the pattern's parse error
    pub fn with_pattern(mut self, name: RouteName, pattern: &str) -> Result<Self, PatternError> {
        self.patterns.push(RoutePattern::parse(name, pattern)?);
        Ok(self)
    }

    /// Registered patterns in priority order
    pub fn patterns(&self) -> impl Iterator<Item = &RoutePattern> {
        self.patterns.iter()
    }

    /// Match a pathname against the table
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<(RouteName, RouteParams)> {
        self.patterns
            .iter()
            .find_map(|pattern| pattern.matches(path).map(|params| (pattern.name, params)))
    }

    /// Evaluate a base-stripped location (`path?query#hash`)
    ///
    /// Never fails: unmatched locations produce a `not-found` route that
    /// still carries the query string.
    #[must_use]
    pub fn evaluate(&self, location: &str) -> Route {
        let without_hash = location.split('#').next().unwrap_or_default();
        let (path, query) = without_hash
            .split_once('?')
            .unwrap_or((without_hash, ""));
        let path = if path.is_empty() { "/" } else { path };
        let search = SearchParams::parse(query);

        match self.match_path(path) {
            Some((name, params)) => Route::new(name, params, search),
            None => Route::new(RouteName::NotFound, RouteParams::new(), search),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn standard_table_order() {
        let matcher = RouteMatcher::standard();
        let patterns: Vec<_> = matcher.patterns().map(RoutePattern::as_str).collect();
        assert_eq!(
            patterns,
            vec![
                "/",
                "/components/:group/:story",
                "/docs/:section/:slug",
                "/tokens/:tokenId",
                "/tokens",
                "/icons/:iconId",
                "/icons",
                "/playroom",
            ]
        );
    }

    #[test]
    fn evaluates_home() {
        let matcher = RouteMatcher::standard();
        assert_eq!(matcher.evaluate("/").name(), RouteName::Home);
        assert_eq!(matcher.evaluate("").name(), RouteName::Home);
        assert_eq!(matcher.evaluate("/?story=a/b").name(), RouteName::Home);
    }

    #[test]
    fn evaluates_component_with_query() {
        let matcher = RouteMatcher::standard();
        let route = matcher.evaluate("/components/button/primary?label=Hi&disabled=true#top");

        assert_eq!(route.name(), RouteName::Component);
        assert_eq!(route.param("group"), Some("button"));
        assert_eq!(route.param("story"), Some("primary"));
        assert_eq!(route.search_params().get("label"), Some("Hi"));
        assert_eq!(route.search_params().get("disabled"), Some("true"));
    }

    #[test]
    fn tokens_and_icons_with_and_without_id() {
        let matcher = RouteMatcher::standard();

        let tokens = matcher.evaluate("/tokens");
        assert_eq!(tokens.name(), RouteName::Tokens);
        assert!(tokens.params().is_empty());

        let token = matcher.evaluate("/tokens/token-color-primary");
        assert_eq!(token.param("tokenId"), Some("token-color-primary"));

        let icon = matcher.evaluate("/icons/icon-alert");
        assert_eq!(icon.name(), RouteName::Icons);
        assert_eq!(icon.param("iconId"), Some("icon-alert"));
    }

    #[test]
    fn playroom_and_docs() {
        let matcher = RouteMatcher::standard();
        assert_eq!(matcher.evaluate("/playroom").name(), RouteName::Playroom);

        let docs = matcher.evaluate("/docs/foundations/introduction");
        assert_eq!(docs.name(), RouteName::Docs);
        assert_eq!(docs.param("section"), Some("foundations"));
        assert_eq!(docs.param("slug"), Some("introduction"));
    }

    #[test]
    fn unmatched_is_not_found_with_query() {
        let matcher = RouteMatcher::standard();

        let route = matcher.evaluate("/nowhere?x=1");
        assert!(route.is_not_found());
        assert_eq!(route.search_params().get("x"), Some("1"));

        assert!(matcher.evaluate("/components/button").is_not_found());
        assert!(matcher.evaluate("/components/button/").is_not_found());
        assert!(matcher.evaluate("/tokens/").is_not_found());
        assert!(matcher.evaluate("/docs/a/b/c").is_not_found());
    }

    #[test]
    fn empty_matcher_matches_nothing() {
        assert!(RouteMatcher::new().evaluate("/").is_not_found());
    }

    #[test]
    fn first_match_wins() {
        let matcher = RouteMatcher::new()
            .with_pattern(RouteName::Playroom, "/x/:id")
            .unwrap()
            .with_pattern(RouteName::Home, "/x/:other")
            .unwrap();
        assert_eq!(matcher.evaluate("/x/1").name(), RouteName::Playroom);
    }

    #[test]
    fn pattern_errors() {
        assert_eq!(
            RoutePattern::parse(RouteName::Home, "docs"),
            Err(PatternError::MissingLeadingSlash("docs".into()))
        );
        assert!(matches!(
            RoutePattern::parse(RouteName::Docs, "/docs/:"),
            Err(PatternError::EmptyParamName(_))
        ));
        assert!(matches!(
            RoutePattern::parse(RouteName::Docs, "/docs/:id/:id"),
            Err(PatternError::DuplicateParam { .. })
        ));
    }
}
