//! Fable Explorer
//!
//! Route-to-state controller and session wiring for the Fable story
//! explorer.
//!
//! # Core Concepts
//!
//! - **Controller**: [`RouteController`] turns each route into view and
//!   selection state, redirecting unresolvable references to canonical URLs
//! - **Session**: [`Explorer`] owns the bridge, store and controller
//! - **Config**: [`ExplorerConfig`] from TOML plus `FABLE_BASE_PATH`
//!
//! # Example
//!
//! ```
//! use fable_explorer::{Explorer, ExplorerConfig};
//! use fable_story::{StoryDefinition, StoryGroup, StoryMeta};
//!
//! let explorer = Explorer::in_memory(ExplorerConfig::new().with_base_path("/ds"), "/ds/components/button/nope");
//! explorer.store().set_stories(vec![StoryGroup::new(StoryMeta::new("Button"))
//!     .with_story("Primary", StoryDefinition::direct(|_, _| String::new()))]);
//! explorer.start();
//!
//! assert_eq!(explorer.location(), "/ds");
//! ```

mod config;
mod controller;
mod explorer;
mod logging;

pub use config::{ConfigError, ExplorerConfig, BASE_PATH_ENV};
pub use controller::{RouteController, RouteOutcome};
pub use explorer::{Explorer, SessionReport};
pub use logging::{init_logging, LogFormat};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
