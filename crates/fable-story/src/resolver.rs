//! Story lookup and effective argument resolution
//!
//! # Core Concepts
//!
//! - **Selection**: a `(group index, story name)` pair. It is a weak reference;
//!   callers re-validate it against the current group list on every read.
//! - **Slug lookup**: groups are scanned in order and the first story whose
//!   name slug matches, inside a group whose title slug matches, wins.
//! - **Effective args**: `meta.args`, then the story's derivation over them,
//!   then URL overrides. Locks are the meta locks with story locks layered
//!   on top per key; URL overrides never touch them.

use crate::group::StoryGroup;
use crate::slug::slugify;
use crate::story::StoryDefinition;
use crate::value::{ArgSet, LockSet, SlotSet};
use serde::{Deserialize, Serialize};

/// Reference to one story inside a group list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedStory {
    /// Index into the group list
    pub group_index: usize,
    /// Story name (exact, not slugged)
    pub name: String,
}

impl SelectedStory {
    /// New selection
    #[must_use]
    pub fn new(group_index: usize, name: impl Into<String>) -> Self {
        Self {
            group_index,
            name: name.into(),
        }
    }

    /// Group and story this selection still points at, if any
    #[must_use]
    pub fn resolve<'a>(&self, groups: &'a [StoryGroup]) -> Option<(&'a StoryGroup, &'a StoryDefinition)> {
        lookup(groups, self.group_index, &self.name)
    }

    /// True if the selection still points at a story
    #[must_use]
    pub fn is_valid(&self, groups: &[StoryGroup]) -> bool {
        self.resolve(groups).is_some()
    }
}

/// Values a selected story starts with
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectiveArgs {
    /// Effective args
    pub args: ArgSet,
    /// Slot content from the group meta
    pub slots: SlotSet,
    /// Merged locks
    pub locked_args: LockSet,
}

/// Group and story at `(group_index, name)`
#[must_use]
pub fn lookup<'a>(
    groups: &'a [StoryGroup],
    group_index: usize,
    name: &str,
) -> Option<(&'a StoryGroup, &'a StoryDefinition)> {
    let group = groups.get(group_index)?;
    group.story(name).map(|story| (group, story))
}

/// Find a story by URL slugs
///
/// A group whose title matches but holds no matching story does not end
/// the scan; a later group with the same slug may still match.
#[must_use]
pub fn find_by_slugs(groups: &[StoryGroup], group_slug: &str, story_slug: &str) -> Option<SelectedStory> {
    groups
        .iter()
        .enumerate()
        .filter(|(_, group)| slugify(&group.meta.title) == group_slug)
        .find_map(|(index, group)| {
            group
                .story_names()
                .find(|name| slugify(name) == story_slug)
                .map(|name| SelectedStory::new(index, name))
        })
}

/// First story of the first group
#[must_use]
pub fn default_story(groups: &[StoryGroup]) -> Option<SelectedStory> {
    let group = groups.first()?;
    group.first_story_name().map(|name| SelectedStory::new(0, name))
}

/// Args, slots and locks for a story with optional URL overrides
///
/// Returns `None` when the group has no story called `name`.
#[must_use]
pub fn resolve_effective_args(group: &StoryGroup, name: &str, overrides: Option<&ArgSet>) -> Option<EffectiveArgs> {
    let story = group.story(name)?;

    let mut args = story.derive_args(&group.meta.args);
    if let Some(overrides) = overrides {
        for (key, value) in overrides {
            args.insert(key.clone(), value.clone());
        }
    }

    let mut locked_args = group.meta.locked_args.clone();
    if let Some(story_locks) = story.locked_args() {
        for (key, locked) in story_locks {
            locked_args.insert(key.clone(), *locked);
        }
    }

    Some(EffectiveArgs {
        args,
        slots: group.meta.slots.clone(),
        locked_args,
    })
}
