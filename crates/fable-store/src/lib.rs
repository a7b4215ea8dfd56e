//! Fable Application State Store
//!
//! One explicit [`AppStore`] per explorer session: story groups, metadata,
//! the selected story with its args/slots/locks, the current view and the
//! theme.
//!
//! # Example
//!
//! ```
//! use fable_route::{BasePath, MemoryHistory, NavigationBridge, RouteMatcher};
//! use fable_store::{AppStore, MemoryPreferences, SelectOptions, StoreConfig};
//! use fable_story::{StoryDefinition, StoryGroup, StoryMeta};
//! use std::sync::Arc;
//!
//! let bridge = Arc::new(NavigationBridge::new(MemoryHistory::default(), BasePath::root(), RouteMatcher::standard()));
//! let store = AppStore::new(bridge.clone(), Arc::new(MemoryPreferences::new()), StoreConfig::new());
//!
//! store.set_stories(vec![StoryGroup::new(StoryMeta::new("Button"))
//!     .with_story("Primary", StoryDefinition::direct(|_, _| String::new()))]);
//! store.select_story(0, "Primary", SelectOptions::new());
//!
//! assert_eq!(bridge.location(), "/components/button/primary");
//! ```

mod config;
mod events;
mod preferences;
mod store;
mod view;

pub use config::{ArgHistoryPolicy, StoreConfig, DEFAULT_THEME_STORAGE_KEY};
pub use events::{StateChange, StateKey};
pub use preferences::{FilePreferences, MemoryPreferences, PreferenceError, PreferenceStore};
pub use store::{AppStore, EditOutcome, SelectOptions, StoreSnapshot};
pub use view::{Theme, ViewName, ViewState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
