//! Explorer session wiring
//!
//! [`Explorer`] owns the navigation bridge, the store and the route
//! controller, and holds the controller's route subscription. The bridge
//! keeps the controller alive through that subscription while the
//! controller points back at the bridge; dropping the explorer (or calling
//! [`Explorer::stop`]) releases the subscription and with it the cycle.

use crate::config::ExplorerConfig;
use crate::controller::{RouteController, RouteOutcome};
use fable_metadata::MetadataRegistry;
use fable_route::{
    HistoryBackend, MemoryHistory, NavigateOptions, NavigationBridge, Route, RouteMatcher, SubscribeOptions,
    Subscription, TraversableHistory,
};
use fable_store::{AppStore, FilePreferences, MemoryPreferences, PreferenceStore, StoreSnapshot};
use fable_story::StoryGroup;
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// One explorer session over a history backend
pub struct Explorer<H: HistoryBackend + 'static> {
    config: ExplorerConfig,
    bridge: Arc<NavigationBridge<H>>,
    store: Arc<AppStore>,
    controller: Arc<RouteController>,
    subscription: Mutex<Option<Subscription>>,
}

impl<H: HistoryBackend + 'static> Explorer<H> {
    /// Wire a session; preferences come from `config.preferences_path`
    /// when set, otherwise they live in memory
    #[must_use]
    pub fn new(config: ExplorerConfig, history: H) -> Self {
        let preferences: Arc<dyn PreferenceStore> = match &config.preferences_path {
            Some(path) => Arc::new(FilePreferences::new(path)),
            None => Arc::new(MemoryPreferences::new()),
        };
        Self::with_preferences(config, history, preferences)
    }

    /// Wire a session with an explicit preference backend
    #[must_use]
    pub fn with_preferences(config: ExplorerConfig, history: H, preferences: Arc<dyn PreferenceStore>) -> Self {
        let bridge = Arc::new(NavigationBridge::new(
            history,
            config.base_path(),
            RouteMatcher::standard(),
        ));
        let store = Arc::new(AppStore::new(bridge.clone(), preferences, config.store_config()));
        let controller = Arc::new(RouteController::new(Arc::clone(&store), bridge.clone()));

        Self {
            config,
            bridge,
            store,
            controller,
            subscription: Mutex::new(None),
        }
    }

    /// Initialize routing and apply the current location
    ///
    /// Idempotent. The controller receives the initial route through its
    /// subscription, so a redirect issued for it is applied in the same call.
    pub fn start(&self) -> Route {
        let mut subscription = self.subscription.lock();
        if subscription.is_some() {
            return self.bridge.current_route();
        }

        let route = self.bridge.initialize();
        tracing::info!(location = %self.bridge.location(), route = %route.name(), "Explorer started");

        let controller = Arc::clone(&self.controller);
        *subscription = Some(self.bridge.subscribe(
            move |route| {
                controller.handle(route);
            },
            SubscribeOptions::default(),
        ));
        drop(subscription);

        self.bridge.current_route()
    }

    /// Detach the controller from routing
    pub fn stop(&self) {
        if self.subscription.lock().take().is_some() {
            tracing::info!("Explorer stopped");
        }
    }

    /// True between [`start`](Self::start) and [`stop`](Self::stop)
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.subscription.lock().is_some()
    }

    /// Replace the story groups and re-apply the current route
    pub fn load_stories(&self, groups: Vec<StoryGroup>) -> Option<RouteOutcome> {
        self.store.set_stories(groups);
        self.reapply()
    }

    /// Replace the metadata and re-apply the current route
    pub fn load_metadata(&self, registry: MetadataRegistry) -> Option<RouteOutcome> {
        self.store.set_metadata(registry);
        self.reapply()
    }

    /// Push a navigation
    pub fn navigate_to(&self, path: &str) {
        self.bridge.navigate_to(path, NavigateOptions::push());
    }

    /// Host history change (popstate)
    pub fn history_changed(&self) {
        self.bridge.history_changed();
    }

    /// State store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &Arc<AppStore> {
        &self.store
    }

    /// Navigation bridge
    #[inline]
    #[must_use]
    pub fn bridge(&self) -> &Arc<NavigationBridge<H>> {
        &self.bridge
    }

    /// Session configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// External location of the current history entry
    #[must_use]
    pub fn location(&self) -> String {
        self.bridge.location()
    }

    fn reapply(&self) -> Option<RouteOutcome> {
        if !self.is_running() {
            return None;
        }
        let route = self.bridge.current_route();
        tracing::debug!(route = %route.name(), "Re-applying route after reload");
        Some(self.controller.refresh(&route))
    }
}

impl<H: TraversableHistory + 'static> Explorer<H> {
    /// Browser back button
    pub fn back(&self) -> bool {
        self.bridge.back()
    }

    /// Browser forward button
    pub fn forward(&self) -> bool {
        self.bridge.forward()
    }
}

/// Summary of an in-memory session
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    /// External location of the current entry
    pub location: String,
    /// Current route
    pub route: Route,
    /// Store state
    pub state: StoreSnapshot,
    /// Canonical URL of the selected story, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_path: Option<String>,
    /// History entries, oldest first
    pub history: Vec<String>,
    /// Index of the current entry
    pub cursor: usize,
}

impl Explorer<MemoryHistory> {
    /// Session over an in-memory history starting at `location`
    #[must_use]
    pub fn in_memory(config: ExplorerConfig, location: &str) -> Self {
        Self::new(config, MemoryHistory::new(location))
    }

    /// Snapshot of location, route, state and history
    #[must_use]
    pub fn report(&self) -> SessionReport {
        let (history, cursor) = self
            .bridge
            .with_history(|h| (h.entries().to_vec(), h.cursor()));
        SessionReport {
            location: self.location(),
            route: self.bridge.current_route(),
            state: self.store.snapshot(),
            story_path: self.store.story_path(),
            history,
            cursor,
        }
    }
}

impl<H: HistoryBackend + 'static> Drop for Explorer<H> {
    fn drop(&mut self) {
        self.subscription.get_mut().take();
    }
}

impl<H: HistoryBackend + 'static> fmt::Debug for Explorer<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Explorer")
            .field("config", &self.config)
            .field("bridge", &self.bridge)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}
