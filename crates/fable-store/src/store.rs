//! Application state store
//!
//! # Core Concepts
//!
//! - **Snapshots**: args, slots and locks live behind `Arc`s and are replaced,
//!   never edited in place, so a reader holding an old snapshot keeps a
//!   consistent view.
//! - **One lock, then events**: every action swaps its new state in under a
//!   single write lock, releases it, and only then emits one
//!   [`StateChange`] per mutated key. Listeners may call back into the store.
//! - **URL sync**: selection and arg edits write the canonical story URL
//!   through the [`Navigator`]; the store never reads the URL itself.

use crate::config::{ArgHistoryPolicy, StoreConfig};
use crate::events::{StateChange, StateKey};
use crate::preferences::PreferenceStore;
use crate::view::{Theme, ViewState};
use fable_metadata::MetadataRegistry;
use fable_route::{ListenerSet, NavigateOptions, Navigator, Subscription};
use fable_story::{
    build_story_path, lookup, resolve_effective_args, ArgSet, ArgValue, LockSet, SelectedStory, SlotSet, StoryGroup,
};
use parking_lot::RwLock;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Result of an argument edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Value stored
    Applied,
    /// Key is locked; nothing changed
    Locked,
}

impl EditOutcome {
    /// True if the edit was stored
    #[inline]
    #[must_use]
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// Options for [`AppStore::select_story`]
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOptions {
    /// Values layered over the story's effective args
    pub args_override: Option<ArgSet>,
    /// Values layered over the group's slots
    pub slots_override: Option<SlotSet>,
    /// Push the canonical story URL after selecting
    pub sync_url: bool,
}

impl SelectOptions {
    /// Select and sync the URL
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer args over the story's effective args
    #[must_use]
    pub fn with_args(mut self, args: ArgSet) -> Self {
        self.args_override = Some(args);
        self
    }

    /// Layer slots over the group's slots
    #[must_use]
    pub fn with_slots(mut self, slots: SlotSet) -> Self {
        self.slots_override = Some(slots);
        self
    }

    /// Do not touch the URL (the route already reflects this selection)
    #[must_use]
    pub fn without_url_sync(mut self) -> Self {
        self.sync_url = false;
        self
    }
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            args_override: None,
            slots_override: None,
            sync_url: true,
        }
    }
}

#[derive(Clone)]
struct AppState {
    stories: Arc<Vec<StoryGroup>>,
    metadata: Arc<MetadataRegistry>,
    selected: Option<SelectedStory>,
    args: Arc<ArgSet>,
    slots: Arc<SlotSet>,
    locks: Arc<LockSet>,
    view: ViewState,
    theme: Theme,
    source_drawer_open: bool,
}

impl AppState {
    fn clear_selection(&mut self) -> Vec<StateChange> {
        self.selected = None;
        self.args = Arc::default();
        self.slots = Arc::default();
        self.locks = Arc::default();
        self.selection_changes()
    }

    fn selection_changes(&self) -> Vec<StateChange> {
        vec![
            StateChange::SelectedStory(self.selected.clone()),
            StateChange::CurrentArgs(Arc::clone(&self.args)),
            StateChange::CurrentSlots(Arc::clone(&self.slots)),
            StateChange::LockedArgs(Arc::clone(&self.locks)),
        ]
    }
}

/// Serializable view of the store
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    /// Selection
    pub selected_story: Option<SelectedStory>,
    /// Current args
    pub current_args: ArgSet,
    /// Current slots
    pub current_slots: SlotSet,
    /// Locks
    pub locked_args: LockSet,
    /// Current view
    pub view: ViewState,
    /// Theme
    pub theme: Theme,
    /// Source drawer visibility
    pub source_drawer_open: bool,
}

/// Explorer state: stories, selection, args, view and theme
pub struct AppStore {
    state: RwLock<AppState>,
    listeners: ListenerSet<StateChange>,
    navigator: Arc<dyn Navigator>,
    preferences: Arc<dyn PreferenceStore>,
    config: StoreConfig,
}

impl AppStore {
    /// Create a store; the theme comes from preferences, else the system
    /// preference in `config`
    #[must_use]
    pub fn new(navigator: Arc<dyn Navigator>, preferences: Arc<dyn PreferenceStore>, config: StoreConfig) -> Self {
        let theme = initial_theme(preferences.as_ref(), &config);
        tracing::debug!(%theme, arg_history = ?config.arg_history(), "Store created");

        Self {
            state: RwLock::new(AppState {
                stories: Arc::default(),
                metadata: Arc::default(),
                selected: None,
                args: Arc::default(),
                slots: Arc::default(),
                locks: Arc::default(),
                view: ViewState::home(),
                theme,
                source_drawer_open: false,
            }),
            listeners: ListenerSet::new(),
            navigator,
            preferences,
            config,
        }
    }

    // ------------------------------------------------------------------
    // Getters
    // ------------------------------------------------------------------

    /// Story groups
    #[must_use]
    pub fn stories(&self) -> Arc<Vec<StoryGroup>> {
        Arc::clone(&self.state.read().stories)
    }

    /// Metadata registry
    #[must_use]
    pub fn metadata(&self) -> Arc<MetadataRegistry> {
        Arc::clone(&self.state.read().metadata)
    }

    /// Current selection
    #[must_use]
    pub fn selected_story(&self) -> Option<SelectedStory> {
        self.state.read().selected.clone()
    }

    /// Current args snapshot
    #[must_use]
    pub fn current_args(&self) -> Arc<ArgSet> {
        Arc::clone(&self.state.read().args)
    }

    /// Current slots snapshot
    #[must_use]
    pub fn current_slots(&self) -> Arc<SlotSet> {
        Arc::clone(&self.state.read().slots)
    }

    /// Current locks snapshot
    #[must_use]
    pub fn locked_args(&self) -> Arc<LockSet> {
        Arc::clone(&self.state.read().locks)
    }

    /// True if `key` is currently read-only
    #[must_use]
    pub fn is_locked(&self, key: &str) -> bool {
        self.state.read().locks.get(key).copied().unwrap_or(false)
    }

    /// Current view
    #[must_use]
    pub fn view(&self) -> ViewState {
        self.state.read().view.clone()
    }

    /// Current theme
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.state.read().theme
    }

    /// Source drawer visibility
    #[must_use]
    pub fn is_source_drawer_open(&self) -> bool {
        self.state.read().source_drawer_open
    }

    /// Group of the selected story, if the selection still resolves
    #[must_use]
    pub fn current_story(&self) -> Option<StoryGroup> {
        let state = self.state.read();
        let selected = state.selected.as_ref()?;
        selected.resolve(&state.stories).map(|(group, _)| group.clone())
    }

    /// Slots declared by the group's meta, current values taking precedence
    #[must_use]
    pub fn processed_slots(&self) -> SlotSet {
        let state = self.state.read();
        let Some((group, _)) = state.selected.as_ref().and_then(|s| s.resolve(&state.stories)) else {
            return SlotSet::new();
        };
        group
            .meta
            .slots
            .iter()
            .map(|(key, default)| {
                let value = state.slots.get(key).unwrap_or(default);
                (key.clone(), value.clone())
            })
            .collect()
    }

    /// Render the selected story with current args and processed slots
    #[must_use]
    pub fn render_current(&self) -> Option<String> {
        let slots = self.processed_slots();
        let state = self.state.read();
        let selected = state.selected.as_ref()?;
        let (_, story) = selected.resolve(&state.stories)?;
        Some(story.render(&state.args, &slots))
    }

    /// Canonical URL of the current selection with current args
    #[must_use]
    pub fn story_path(&self) -> Option<String> {
        let state = self.state.read();
        let selected = state.selected.as_ref()?;
        build_story_path(&state.stories, selected.group_index, &selected.name, &state.args)
    }

    /// Serializable copy of the current state
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.read();
        StoreSnapshot {
            selected_story: state.selected.clone(),
            current_args: (*state.args).clone(),
            current_slots: (*state.slots).clone(),
            locked_args: (*state.locks).clone(),
            view: state.view.clone(),
            theme: state.theme,
            source_drawer_open: state.source_drawer_open,
        }
    }

    /// Store settings
    #[inline]
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------

    /// Receive every change
    pub fn subscribe(&self, callback: impl Fn(&StateChange) + Send + Sync + 'static) -> Subscription {
        self.listeners.subscribe(callback)
    }

    /// Receive changes for one key
    pub fn subscribe_key(
        &self,
        key: StateKey,
        callback: impl Fn(&StateChange) + Send + Sync + 'static,
    ) -> Subscription {
        self.listeners.subscribe(move |change: &StateChange| {
            if change.key() == key {
                callback(change);
            }
        })
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Replace the story groups wholesale
    ///
    /// A selection that no longer resolves is cleared along with its args,
    /// slots and locks.
    pub fn set_stories(&self, groups: Vec<StoryGroup>) {
        let count = groups.len();
        self.mutate(|state| {
            state.stories = Arc::new(groups);
            let mut changes = vec![StateChange::Stories];
            let stale = state
                .selected
                .as_ref()
                .is_some_and(|selected| !selected.is_valid(&state.stories));
            if stale {
                changes.extend(state.clear_selection());
            }
            ((), changes)
        });
        tracing::info!(groups = count, "Stories replaced");
    }

    /// Replace the metadata registry
    pub fn set_metadata(&self, registry: MetadataRegistry) {
        self.mutate(|state| {
            state.metadata = Arc::new(registry);
            ((), vec![StateChange::Metadata])
        });
    }

    /// Select a story and reset args, slots and locks from its definition
    ///
    /// An out-of-range group index or unknown story name changes nothing
    /// and returns `false`.
    pub fn select_story(&self, group_index: usize, name: &str, options: SelectOptions) -> bool {
        let SelectOptions {
            args_override,
            slots_override,
            sync_url,
        } = options;

        let selected = self.mutate(|state| {
            let Some((group, _)) = lookup(&state.stories, group_index, name) else {
                return (false, Vec::new());
            };
            let Some(effective) = resolve_effective_args(group, name, args_override.as_ref()) else {
                return (false, Vec::new());
            };

            let mut slots = effective.slots;
            if let Some(overrides) = slots_override {
                slots.extend(overrides);
            }

            state.selected = Some(SelectedStory::new(group_index, name));
            state.args = Arc::new(effective.args);
            state.slots = Arc::new(slots);
            state.locks = Arc::new(effective.locked_args);
            (true, state.selection_changes())
        });

        if !selected {
            tracing::debug!(group_index, name, "Ignoring selection of unknown story");
            return false;
        }
        tracing::debug!(group_index, name, sync_url, "Story selected");

        if sync_url {
            self.sync_url(NavigateOptions::push());
        }
        true
    }

    /// Clear the selection
    pub fn clear_selection(&self) {
        self.mutate(|state| {
            if state.selected.is_none() {
                return ((), Vec::new());
            }
            ((), state.clear_selection())
        });
    }

    /// Set one argument unless it is locked, then re-sync the URL
    pub fn update_arg(&self, key: &str, value: impl Into<ArgValue>) -> EditOutcome {
        let value = value.into();
        let outcome = self.mutate(|state| {
            if state.locks.get(key).copied().unwrap_or(false) {
                return (EditOutcome::Locked, Vec::new());
            }
            let mut args = (*state.args).clone();
            args.insert(key.to_string(), value);
            state.args = Arc::new(args);
            (EditOutcome::Applied, vec![StateChange::CurrentArgs(Arc::clone(&state.args))])
        });

        match outcome {
            EditOutcome::Locked => tracing::debug!(key, "Rejected edit of locked arg"),
            EditOutcome::Applied => {
                let options = match self.config.arg_history() {
                    ArgHistoryPolicy::PushEachEdit => NavigateOptions::push(),
                    ArgHistoryPolicy::Coalesce => NavigateOptions::replace(),
                };
                self.sync_url(options);
            }
        }
        outcome
    }

    /// Set one slot's content
    pub fn update_slot(&self, key: &str, value: impl Into<String>) {
        let value = value.into();
        self.mutate(|state| {
            let mut slots = (*state.slots).clone();
            slots.insert(key.to_string(), value);
            state.slots = Arc::new(slots);
            ((), vec![StateChange::CurrentSlots(Arc::clone(&state.slots))])
        });
    }

    /// Make an argument editable; its value is left as is
    pub fn unlock_arg(&self, key: &str) {
        self.mutate(|state| {
            let mut locks = (*state.locks).clone();
            locks.insert(key.to_string(), false);
            state.locks = Arc::new(locks);
            ((), vec![StateChange::LockedArgs(Arc::clone(&state.locks))])
        });
    }

    /// Switch views; emits only if the view changed
    pub fn set_view(&self, view: ViewState) {
        self.mutate(|state| {
            if state.view == view {
                return ((), Vec::new());
            }
            state.view = view;
            ((), vec![StateChange::View(state.view.clone())])
        });
    }

    /// Set and persist the theme
    ///
    /// A persistence failure is logged; the in-memory theme still changes.
    pub fn set_theme(&self, theme: Theme) {
        self.mutate(|state| {
            state.theme = theme;
            ((), vec![StateChange::Theme(theme)])
        });
        if let Err(error) = self.preferences.save(self.config.theme_storage_key(), theme.as_str()) {
            tracing::warn!(%error, %theme, "Failed to persist theme");
        }
    }

    /// Flip between light and dark
    pub fn toggle_theme(&self) {
        self.set_theme(self.theme().toggled());
    }

    /// Flip the source drawer
    pub fn toggle_source_drawer(&self) {
        self.mutate(|state| {
            state.source_drawer_open = !state.source_drawer_open;
            ((), vec![StateChange::SourceDrawerOpen(state.source_drawer_open)])
        });
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut AppState) -> (R, Vec<StateChange>)) -> R {
        let (result, changes) = {
            let mut state = self.state.write();
            f(&mut state)
        };
        for change in &changes {
            self.listeners.emit(change);
        }
        result
    }

    fn sync_url(&self, options: NavigateOptions) {
        if let Some(path) = self.story_path() {
            self.navigator.navigate_to(&path, options);
        }
    }
}

impl fmt::Debug for AppStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("AppStore")
            .field("groups", &state.stories.len())
            .field("selected", &state.selected)
            .field("view", &state.view)
            .field("theme", &state.theme)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

fn initial_theme(preferences: &dyn PreferenceStore, config: &StoreConfig) -> Theme {
    match preferences.load(config.theme_storage_key()) {
        Ok(Some(stored)) => match Theme::parse(&stored) {
            Some(theme) => return theme,
            None => tracing::warn!(value = %stored, "Ignoring unknown stored theme"),
        },
        Ok(None) => {}
        Err(error) => tracing::warn!(%error, "Failed to read theme preference"),
    }
    Theme::from_system(config.prefers_dark())
}
