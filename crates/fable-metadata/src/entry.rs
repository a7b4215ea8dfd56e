//! Metadata entries for docs pages, design tokens and icons

use chrono::{DateTime, Utc};
use fable_story::Status;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

/// Entity kind of a metadata entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    /// Documentation page
    Docs,
    /// Design token
    Token,
    /// Icon
    Icon,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Docs => "docs",
            Self::Token => "token",
            Self::Icon => "icon",
        })
    }
}

/// Target platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Browsers
    Web,
    /// iOS
    Ios,
    /// Android
    Android,
}

/// Accessibility tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accessibility {
    /// Meets the baseline
    #[default]
    Baseline,
    /// Goes beyond the baseline
    Enhanced,
}

/// Shared classification block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Taxonomy {
    /// Navigator group
    pub group: String,
    /// Broad category
    pub category: String,
    /// Search tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Maturity
    pub status: Status,
    /// Target platforms
    #[serde(default)]
    pub platforms: Vec<Platform>,
    /// Accessibility tier
    #[serde(default)]
    pub accessibility: Accessibility,
}

/// Documentation page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocEntry {
    /// Stable id
    pub id: String,
    /// Page title
    pub title: String,
    /// URL section segment
    pub section: String,
    /// URL slug segment
    pub slug: String,
    /// Short summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Markdown body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Related story group slugs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_stories: Vec<String>,
    /// Classification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy: Option<Taxonomy>,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DocEntry {
    /// Minimal page
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        section: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            section: section.into(),
            slug: slug.into(),
            description: None,
            content: None,
            related_stories: Vec::new(),
            taxonomy: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Set the summary
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the last update time
    #[must_use]
    pub fn with_updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = Some(at);
        self
    }

    /// Canonical `/docs/{section}/{slug}` path
    #[must_use]
    pub fn path(&self) -> String {
        docs_path(&self.section, &self.slug)
    }
}

/// Design token category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Color value
    Color,
    /// Length or spacing
    Dimension,
    /// Font family or stack
    Font,
    /// Box shadow
    Shadow,
    /// Duration or easing
    Motion,
}

/// Design token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenEntry {
    /// Stable id
    pub id: String,
    /// Display title
    pub title: String,
    /// Category
    pub token_type: TokenType,
    /// Raw value
    pub value: String,
    /// Short summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Extra attributes such as `cssVar`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    /// Superseded token
    #[serde(default)]
    pub deprecated: bool,
    /// Classification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy: Option<Taxonomy>,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TokenEntry {
    /// Minimal token
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        token_type: TokenType,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            token_type,
            value: value.into(),
            description: None,
            attributes: BTreeMap::new(),
            deprecated: false,
            taxonomy: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Canonical `/tokens/{id}` path
    #[must_use]
    pub fn path(&self) -> String {
        token_path(&self.id)
    }
}

/// Icon drawing style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconStyle {
    /// Solid
    Filled,
    /// Stroke only
    Outline,
    /// Two-tone
    Duotone,
}

/// Icon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconEntry {
    /// Stable id
    pub id: String,
    /// Display title
    pub title: String,
    /// SVG path data
    pub svg_path: String,
    /// Drawing style
    pub style: IconStyle,
    /// Nominal size in px
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Short summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Release that introduced the icon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduced_in: Option<String>,
    /// Classification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy: Option<Taxonomy>,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl IconEntry {
    /// Minimal icon
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, svg_path: impl Into<String>, style: IconStyle) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            svg_path: svg_path.into(),
            style,
            size: None,
            description: None,
            introduced_in: None,
            taxonomy: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Canonical `/icons/{id}` path
    #[must_use]
    pub fn path(&self) -> String {
        icon_path(&self.id)
    }
}

/// `/docs/{section}/{slug}`
#[must_use]
pub fn docs_path(section: &str, slug: &str) -> String {
    format!("/docs/{section}/{slug}")
}

/// `/tokens/{id}`
#[must_use]
pub fn token_path(id: &str) -> String {
    format!("/tokens/{id}")
}

/// `/icons/{id}`
#[must_use]
pub fn icon_path(id: &str) -> String {
    format!("/icons/{id}")
}

/// Uniform read access across entry kinds
pub trait MetadataEntry {
    /// Entry kind
    const KIND: EntityKind;

    /// Stable id
    fn id(&self) -> &str;
    /// Display title
    fn title(&self) -> &str;
    /// Short summary
    fn description(&self) -> Option<&str>;
    /// Classification
    fn taxonomy(&self) -> Option<&Taxonomy>;
    /// Last update time
    fn updated_at(&self) -> Option<DateTime<Utc>>;
    /// Canonical path
    fn path(&self) -> String;

    /// Extra text matched by search besides title, description and tags
    fn search_extra(&self) -> Option<&str> {
        None
    }
}

macro_rules! impl_entry {
    ($ty:ty, $kind:expr) => {
        impl MetadataEntry for $ty {
            const KIND: EntityKind = $kind;

            fn id(&self) -> &str {
                &self.id
            }

            fn title(&self) -> &str {
                &self.title
            }

            fn description(&self) -> Option<&str> {
                self.description.as_deref()
            }

            fn taxonomy(&self) -> Option<&Taxonomy> {
                self.taxonomy.as_ref()
            }

            fn updated_at(&self) -> Option<DateTime<Utc>> {
                self.updated_at.or(self.created_at)
            }

            fn path(&self) -> String {
                <$ty>::path(self)
            }
        }
    };
}

impl_entry!(TokenEntry, EntityKind::Token);
impl_entry!(IconEntry, EntityKind::Icon);

impl MetadataEntry for DocEntry {
    const KIND: EntityKind = EntityKind::Docs;

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn taxonomy(&self) -> Option<&Taxonomy> {
        self.taxonomy.as_ref()
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at.or(self.created_at)
    }

    fn path(&self) -> String {
        DocEntry::path(self)
    }

    fn search_extra(&self) -> Option<&str> {
        Some(&self.section)
    }
}
