//! Store change notifications

use crate::view::{Theme, ViewState};
use fable_story::{ArgSet, LockSet, SelectedStory, SlotSet};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// State key a change refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateKey {
    /// Story group list
    Stories,
    /// Metadata registry
    Metadata,
    /// Selection
    SelectedStory,
    /// Current args
    CurrentArgs,
    /// Current slots
    CurrentSlots,
    /// Locks
    LockedArgs,
    /// Current view
    View,
    /// Theme
    Theme,
    /// Source drawer visibility
    SourceDrawerOpen,
}

impl StateKey {
    /// camelCase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stories => "stories",
            Self::Metadata => "metadata",
            Self::SelectedStory => "selectedStory",
            Self::CurrentArgs => "currentArgs",
            Self::CurrentSlots => "currentSlots",
            Self::LockedArgs => "lockedArgs",
            Self::View => "view",
            Self::Theme => "theme",
            Self::SourceDrawerOpen => "sourceDrawerOpen",
        }
    }
}

impl Display for StateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One mutated key together with its new value
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    /// Story groups were replaced (read them through the store)
    Stories,
    /// Metadata registry was replaced
    Metadata,
    /// New selection
    SelectedStory(Option<SelectedStory>),
    /// New args snapshot
    CurrentArgs(Arc<ArgSet>),
    /// New slots snapshot
    CurrentSlots(Arc<SlotSet>),
    /// New locks snapshot
    LockedArgs(Arc<LockSet>),
    /// New view
    View(ViewState),
    /// New theme
    Theme(Theme),
    /// Drawer toggled
    SourceDrawerOpen(bool),
}

impl StateChange {
    /// Key this change refers to
    #[must_use]
    pub const fn key(&self) -> StateKey {
        match self {
            Self::Stories => StateKey::Stories,
            Self::Metadata => StateKey::Metadata,
            Self::SelectedStory(_) => StateKey::SelectedStory,
            Self::CurrentArgs(_) => StateKey::CurrentArgs,
            Self::CurrentSlots(_) => StateKey::CurrentSlots,
            Self::LockedArgs(_) => StateKey::LockedArgs,
            Self::View(_) => StateKey::View,
            Self::Theme(_) => StateKey::Theme,
            Self::SourceDrawerOpen(_) => StateKey::SourceDrawerOpen,
        }
    }
}
