//! Metadata registry
//!
//! Holds the docs, token and icon lists in declaration order. Lookups never
//! fail hard: callers get `None` and pick a fallback.

use crate::entry::{DocEntry, EntityKind, IconEntry, MetadataEntry, TokenEntry};
use crate::error::{MetadataError, MetadataIssue, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Docs, tokens and icons for one explorer session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataRegistry {
    docs: Vec<DocEntry>,
    tokens: Vec<TokenEntry>,
    icons: Vec<IconEntry>,
}

/// Search or recency hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRef {
    /// Entry kind
    pub kind: EntityKind,
    /// Entry id
    pub id: String,
    /// Display title
    pub title: String,
    /// Canonical path
    pub path: String,
    /// Last update, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl EntryRef {
    fn of<E: MetadataEntry>(entry: &E) -> Self {
        Self {
            kind: E::KIND,
            id: entry.id().to_string(),
            title: entry.title().to_string(),
            path: entry.path(),
            updated_at: entry.updated_at(),
        }
    }
}

impl MetadataRegistry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set docs pages
    #[must_use]
    pub fn with_docs(mut self, docs: Vec<DocEntry>) -> Self {
        self.docs = docs;
        self
    }

    /// Set tokens
    #[must_use]
    pub fn with_tokens(mut self, tokens: Vec<TokenEntry>) -> Self {
        self.tokens = tokens;
        self
    }

    /// Set icons
    #[must_use]
    pub fn with_icons(mut self, icons: Vec<IconEntry>) -> Self {
        self.icons = icons;
        self
    }

    /// Parse a `{ "docs": [...], "tokens": [...], "icons": [...] }` bundle
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or entries missing required fields.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let registry: Self = serde_json::from_str(json)?;
        tracing::debug!(
            docs = registry.docs.len(),
            tokens = registry.tokens.len(),
            icons = registry.icons.len(),
            "Loaded metadata bundle"
        );
        Ok(registry)
    }

    /// Read and parse a bundle file
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Docs pages
    #[inline]
    #[must_use]
    pub fn docs(&self) -> &[DocEntry] {
        &self.docs
    }

    /// Tokens
    #[inline]
    #[must_use]
    pub fn tokens(&self) -> &[TokenEntry] {
        &self.tokens
    }

    /// Icons
    #[inline]
    #[must_use]
    pub fn icons(&self) -> &[IconEntry] {
        &self.icons
    }

    /// True when all three lists are empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty() && self.tokens.is_empty() && self.icons.is_empty()
    }

    /// Docs page at `/docs/{section}/{slug}`
    #[must_use]
    pub fn find_doc(&self, section: &str, slug: &str) -> Option<&DocEntry> {
        self.docs.iter().find(|doc| doc.section == section && doc.slug == slug)
    }

    /// First page of a section
    #[must_use]
    pub fn first_doc_in_section(&self, section: &str) -> Option<&DocEntry> {
        self.docs.iter().find(|doc| doc.section == section)
    }

    /// Docs page by id
    #[must_use]
    pub fn doc(&self, id: &str) -> Option<&DocEntry> {
        self.docs.iter().find(|doc| doc.id == id)
    }

    /// Token by id
    #[must_use]
    pub fn token(&self, id: &str) -> Option<&TokenEntry> {
        self.tokens.iter().find(|token| token.id == id)
    }

    /// Icon by id
    #[must_use]
    pub fn icon(&self, id: &str) -> Option<&IconEntry> {
        self.icons.iter().find(|icon| icon.id == id)
    }

    /// Case-insensitive search over title, description, tags and (for docs)
    /// section; docs first, then tokens, then icons
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<EntryRef> {
        let query = query.trim().to_lowercase();
        let mut hits = Vec::new();
        collect_matches(&self.docs, &query, &mut hits);
        collect_matches(&self.tokens, &query, &mut hits);
        collect_matches(&self.icons, &query, &mut hits);
        hits
    }

    /// Up to `limit` dated entries, newest first
    ///
    /// Entries without `updatedAt` fall back to `createdAt`; undated entries
    /// are skipped. Ties keep docs, tokens, icons order.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<EntryRef> {
        let mut dated: Vec<EntryRef> = self
            .docs
            .iter()
            .map(EntryRef::of)
            .chain(self.tokens.iter().map(EntryRef::of))
            .chain(self.icons.iter().map(EntryRef::of))
            .filter(|entry| entry.updated_at.is_some())
            .collect();
        dated.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        dated.truncate(limit);
        dated
    }

    /// Structural findings: duplicate ids per kind, duplicate docs paths and
    /// blank required fields
    #[must_use]
    pub fn validate(&self) -> Vec<MetadataIssue> {
        let mut issues = Vec::new();

        check_entries(&self.docs, &mut issues);
        check_entries(&self.tokens, &mut issues);
        check_entries(&self.icons, &mut issues);

        let mut paths = HashSet::new();
        for doc in &self.docs {
            for (field, value) in [("section", &doc.section), ("slug", &doc.slug)] {
                if value.trim().is_empty() {
                    issues.push(blank(EntityKind::Docs, &doc.id, field));
                }
            }
            if !paths.insert((doc.section.as_str(), doc.slug.as_str())) {
                issues.push(MetadataIssue::DuplicateDocPath {
                    section: doc.section.clone(),
                    slug: doc.slug.clone(),
                });
            }
        }

        for token in &self.tokens {
            if token.value.trim().is_empty() {
                issues.push(blank(EntityKind::Token, &token.id, "value"));
            }
        }
        for icon in &self.icons {
            if icon.svg_path.trim().is_empty() {
                issues.push(blank(EntityKind::Icon, &icon.id, "svgPath"));
            }
        }

        if !issues.is_empty() {
            tracing::warn!(count = issues.len(), "Metadata validation found issues");
        }
        issues
    }
}

fn collect_matches<E: MetadataEntry>(entries: &[E], query: &str, hits: &mut Vec<EntryRef>) {
    hits.extend(entries.iter().filter(|entry| matches_query(*entry, query)).map(EntryRef::of));
}

fn matches_query<E: MetadataEntry>(entry: &E, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let tags = entry.taxonomy().map(|t| t.tags.as_slice()).unwrap_or_default();
    std::iter::once(entry.title())
        .chain(entry.description())
        .chain(entry.search_extra())
        .chain(tags.iter().map(String::as_str))
        .any(|field| field.to_lowercase().contains(query))
}

fn check_entries<E: MetadataEntry>(entries: &[E], issues: &mut Vec<MetadataIssue>) {
    let mut seen = HashSet::new();
    for entry in entries {
        if entry.id().trim().is_empty() {
            issues.push(blank(E::KIND, entry.id(), "id"));
        } else if !seen.insert(entry.id()) {
            issues.push(MetadataIssue::DuplicateId {
                kind: E::KIND,
                id: entry.id().to_string(),
            });
        }
        if entry.title().trim().is_empty() {
            issues.push(blank(E::KIND, entry.id(), "title"));
        }
    }
}

fn blank(kind: EntityKind, id: &str, field: &'static str) -> MetadataIssue {
    MetadataIssue::BlankField {
        kind,
        id: id.to_string(),
        field,
    }
}
