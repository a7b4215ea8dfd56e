//! Story groups: one per registered component

use crate::slug::{slugify, title_case};
use crate::story::StoryDefinition;
use crate::value::{ArgSet, LockSet, SlotSet};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Component maturity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Early development
    Alpha,
    /// Testing phase
    Beta,
    /// Production ready
    Stable,
    /// Being phased out
    Deprecated,
}

impl Status {
    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Stable => "stable",
            Self::Deprecated => "deprecated",
        }
    }

    /// Navigator badge tooltip
    #[must_use]
    pub const fn tooltip(self) -> &'static str {
        match self {
            Self::Alpha => "Early development - APIs may change",
            Self::Beta => "Testing phase - Ready for feedback",
            Self::Stable => "Production ready - Stable API",
            Self::Deprecated => "Being phased out - Use alternatives",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Group flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    /// Documentation-style group
    Docs,
}

/// Shared metadata for every story in a group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoryMeta {
    /// Display title; its slug is the group's URL segment
    pub title: String,
    /// Custom element tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Base args
    pub args: ArgSet,
    /// Default slot content
    pub slots: SlotSet,
    /// Group-level locks
    pub locked_args: LockSet,
    /// Maturity badge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    /// Group flavor
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<GroupKind>,
    /// Search tags
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl StoryMeta {
    /// Meta with a title and nothing else
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Meta for a component tag, title derived from the tag
    #[must_use]
    pub fn for_component(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            title: title_case(&tag),
            component: Some(tag),
            ..Self::default()
        }
    }

    /// Set the component tag
    #[must_use]
    pub fn with_component(mut self, tag: impl Into<String>) -> Self {
        self.component = Some(tag.into());
        self
    }

    /// Set base args
    #[must_use]
    pub fn with_args(mut self, args: ArgSet) -> Self {
        self.args = args;
        self
    }

    /// Set default slots
    #[must_use]
    pub fn with_slots(mut self, slots: SlotSet) -> Self {
        self.slots = slots;
        self
    }

    /// Set group-level locks
    #[must_use]
    pub fn with_locked_args(mut self, locks: LockSet) -> Self {
        self.locked_args = locks;
        self
    }

    /// Set status
    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Set search tags
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Fill a missing title from the component tag
    pub fn normalize(&mut self) {
        if self.title.trim().is_empty() {
            if let Some(component) = &self.component {
                self.title = title_case(component);
            }
        }
    }
}

/// All stories of one component plus their shared metadata
#[derive(Debug, Clone, Default)]
pub struct StoryGroup {
    /// Shared metadata
    pub meta: StoryMeta,
    /// Stories in declaration order
    pub stories: IndexMap<String, StoryDefinition>,
}

impl StoryGroup {
    /// Group with no stories
    #[must_use]
    pub fn new(meta: StoryMeta) -> Self {
        Self {
            meta,
            stories: IndexMap::new(),
        }
    }

    /// Add a story (replacing one with the same name in place)
    #[must_use]
    pub fn with_story(mut self, name: impl Into<String>, story: StoryDefinition) -> Self {
        self.stories.insert(name.into(), story);
        self
    }

    /// Title slug used in URLs
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(&self.meta.title)
    }

    /// Story by exact name
    #[inline]
    #[must_use]
    pub fn story(&self, name: &str) -> Option<&StoryDefinition> {
        self.stories.get(name)
    }

    /// First declared story name
    #[must_use]
    pub fn first_story_name(&self) -> Option<&str> {
        self.stories.keys().next().map(String::as_str)
    }

    /// Story names in declaration order
    pub fn story_names(&self) -> impl Iterator<Item = &str> {
        self.stories.keys().map(String::as_str)
    }

    /// Number of stories
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.stories.len()
    }

    /// True when the group has no stories
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }
}
