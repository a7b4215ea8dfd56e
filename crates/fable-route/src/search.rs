//! Ordered query-string multi-map
//!
//! [`SearchParams`] mirrors the browser's `URLSearchParams`: insertion order is
//! preserved, keys may repeat, and serialization uses
//! `application/x-www-form-urlencoded`.

use serde::Serialize;
use std::fmt::{self, Display, Formatter};
use url::form_urlencoded;

/// Ordered multi-map of query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchParams(Vec<(String, String)>);

impl SearchParams {
    /// Empty parameter list
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Parse a query string, with or without the leading `?`
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self(
            form_urlencoded::parse(query.as_bytes())
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect(),
        )
    }

    /// First value for `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, in order
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check whether `key` is present
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// Append a pair, keeping existing values for the same key
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// Set `key` to a single value
    ///
    /// The first occurrence is updated in place and later duplicates are
    /// dropped; a new key is appended.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter().position(|(k, _)| *k == key) {
            Some(first) => {
                self.0[first].1 = value;
                let mut index = 0;
                self.0.retain(|(k, _)| {
                    let keep = index <= first || *k != key;
                    index += 1;
                    keep
                });
            }
            None => self.0.push((key, value)),
        }
    }

    /// Remove every value for `key`
    pub fn remove(&mut self, key: &str) {
        self.0.retain(|(k, _)| k != key);
    }

    /// Iterate pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of pairs
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no pairs
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize without the leading `?`
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.0 {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl Display for SearchParams {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SearchParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_strips_question_mark() {
        let params = SearchParams::parse("?label=Hello+World&disabled=true");
        assert_eq!(params.get("label"), Some("Hello World"));
        assert_eq!(params.get("disabled"), Some("true"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn parse_empty() {
        assert!(SearchParams::parse("").is_empty());
        assert!(SearchParams::parse("?").is_empty());
    }

    #[test]
    fn repeated_keys_are_kept_in_order() {
        let params = SearchParams::parse("tag=a&x=1&tag=b");
        let tags: Vec<_> = params.get_all("tag").collect();
        assert_eq!(tags, vec!["a", "b"]);
        assert_eq!(params.get("tag"), Some("a"));
    }

    #[test]
    fn set_replaces_first_and_drops_duplicates() {
        let mut params = SearchParams::parse("a=1&b=2&a=3");
        params.set("a", "9");
        assert_eq!(params.to_query_string(), "a=9&b=2");

        params.set("c", "4");
        assert_eq!(params.to_query_string(), "a=9&b=2&c=4");
    }

    #[test]
    fn remove_drops_all_values() {
        let mut params = SearchParams::parse("a=1&b=2&a=3");
        params.remove("a");
        assert!(!params.contains_key("a"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn encoding_round_trips_reserved_characters() {
        let params: SearchParams = [("label", "a&b=c d?")].into_iter().collect();
        let query = params.to_query_string();
        assert_eq!(SearchParams::parse(&query), params);
    }
}
