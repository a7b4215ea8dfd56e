//! Fable Story Registry
//!
//! Story groups, slug lookup, effective argument resolution and the
//! query-string codec for story arguments.
//!
//! # Core Concepts
//!
//! - **Group**: one component's stories plus shared [`StoryMeta`]
//! - **Story**: a [`StoryDefinition`], either a bare render function or a
//!   configured story that derives args and adds locks
//! - **Selection**: a weak [`SelectedStory`] reference, re-validated on read
//! - **Codec**: [`decode`]/[`encode`] between [`ArgSet`] and query params
//!
//! # Example
//!
//! ```
//! use fable_story::{args, find_by_slugs, resolve_effective_args, ArgValue, StoryDefinition, StoryGroup, StoryMeta};
//!
//! let groups = vec![StoryGroup::new(
//!     StoryMeta::new("Button").with_args(args([("label", ArgValue::from("Click"))])),
//! )
//! .with_story("Primary", StoryDefinition::direct(|_, _| String::new()))];
//!
//! let selected = find_by_slugs(&groups, "button", "primary").unwrap();
//! let effective = resolve_effective_args(&groups[selected.group_index], &selected.name, None).unwrap();
//! assert_eq!(effective.args["label"], ArgValue::from("Click"));
//! ```

mod codec;
mod error;
mod filter;
mod group;
pub mod manifest;
mod resolver;
mod slug;
mod story;
mod value;

pub use codec::{build_story_path, decode, encode, legacy_story_slugs, ROUTING_KEY};
pub use error::{Result, StoryError};
pub use filter::{filter_stories, FilteredGroup};
pub use group::{GroupKind, Status, StoryGroup, StoryMeta};
pub use resolver::{default_story, find_by_slugs, lookup, resolve_effective_args, EffectiveArgs, SelectedStory};
pub use slug::{slugify, title_case};
pub use story::{ArgTransform, RenderFn, StoryDefinition};
pub use value::{args, ArgSet, ArgValue, LockSet, SlotSet};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
