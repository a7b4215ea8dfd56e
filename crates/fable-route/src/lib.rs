//! Fable Route
//!
//! Turns locations into typed routes and keeps a history stack in sync with them.
//!
//! # Core Concepts
//!
//! - [`Route`]: Immutable result of matching a location (name + params + query)
//! - [`RouteMatcher`]: Ordered, first-match-wins pattern table
//! - [`BasePath`]: Deployment prefix stripped before matching, prepended on output
//! - [`NavigationBridge`]: Owns a [`HistoryBackend`], navigates and broadcasts routes
//! - [`Navigator`]: The narrow navigation seam other crates depend on
//!
//! # Example
//!
//! ```rust
//! use fable_route::{BasePath, MemoryHistory, NavigateOptions, NavigationBridge, RouteMatcher, RouteName};
//!
//! let bridge = NavigationBridge::new(
//!     MemoryHistory::new("/app/"),
//!     BasePath::new("/app"),
//!     RouteMatcher::standard(),
//! );
//! assert_eq!(bridge.initialize().name(), RouteName::Home);
//!
//! bridge.navigate_to("/tokens/token-color-primary", NavigateOptions::push());
//! assert_eq!(bridge.current_route().param("tokenId"), Some("token-color-primary"));
//! assert_eq!(bridge.location(), "/app/tokens/token-color-primary");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod base_path;
mod bridge;
mod history;
mod listeners;
mod matcher;
mod route;
mod search;

// Re-exports
pub use base_path::BasePath;
pub use bridge::{
    NavigateOptions, NavigationBridge, Navigator, SubscribeOptions, MAX_DISPATCH_ROUNDS,
};
pub use history::{HistoryBackend, MemoryHistory, TraversableHistory};
pub use listeners::{ListenerSet, Subscription};
pub use matcher::{PatternError, RouteMatcher, RoutePattern};
pub use route::{Route, RouteName, RouteParams};
pub use search::SearchParams;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
