//! Navigation history bridge
//!
//! [`NavigationBridge`] is the only writer of the history stack. Every change,
//! whether programmatic (`navigate_to`) or host-driven (`history_changed`,
//! back/forward), re-evaluates the [`Route`] and broadcasts it to subscribers.
//!
//! # Re-entrancy
//!
//! A subscriber may navigate while a route is being delivered (corrective
//! redirects do exactly that). Such a navigation updates the history stack
//! immediately but its broadcast is deferred until the current round has
//! reached every subscriber; then a single further round is delivered for
//! the latest location. At most [`MAX_DISPATCH_ROUNDS`] rounds follow one
//! trigger.

use crate::base_path::BasePath;
use crate::history::{HistoryBackend, TraversableHistory};
use crate::listeners::{ListenerSet, Subscription};
use crate::matcher::RouteMatcher;
use crate::route::Route;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Maximum delivery rounds triggered by one navigation
pub const MAX_DISPATCH_ROUNDS: usize = 5;

/// How a navigation writes the history stack
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Overwrite the current entry instead of pushing a new one
    pub replace: bool,
}

impl NavigateOptions {
    /// Push a new entry (user-initiated navigation)
    #[inline]
    #[must_use]
    pub const fn push() -> Self {
        Self { replace: false }
    }

    /// Replace the current entry (corrective redirect)
    #[inline]
    #[must_use]
    pub const fn replace() -> Self {
        Self { replace: true }
    }
}

/// Subscription behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscribeOptions {
    /// Deliver the last known route synchronously before returning
    pub immediate: bool,
}

impl Default for SubscribeOptions {
    fn default() -> Self {
        Self { immediate: true }
    }
}

/// Navigation seam used by the store and the route controller
pub trait Navigator: Send + Sync {
    /// Navigate to an internal path (`/components/a/b?x=1`)
    fn navigate_to(&self, path: &str, options: NavigateOptions);

    /// Last broadcast route, or a fresh evaluation if none yet
    fn current_route(&self) -> Route;
}

#[derive(Debug, Default)]
struct DispatchState {
    delivering: bool,
    pending: bool,
}

/// Bridge between a history stack and route subscribers
pub struct NavigationBridge<H: HistoryBackend> {
    base: BasePath,
    matcher: RouteMatcher,
    history: Mutex<H>,
    current: RwLock<Option<Route>>,
    listeners: ListenerSet<Route>,
    dispatch: Mutex<DispatchState>,
    initialized: AtomicBool,
}

impl<H: HistoryBackend> NavigationBridge<H> {
    /// Create a bridge; nothing is evaluated until [`initialize`](Self::initialize)
    #[must_use]
    pub fn new(history: H, base: BasePath, matcher: RouteMatcher) -> Self {
        Self {
            base,
            matcher,
            history: Mutex::new(history),
            current: RwLock::new(None),
            listeners: ListenerSet::new(),
            dispatch: Mutex::new(DispatchState::default()),
            initialized: AtomicBool::new(false),
        }
    }

    /// Evaluate the current location once and arm [`history_changed`](Self::history_changed)
    ///
    /// Idempotent: later calls return the last known route.
    pub fn initialize(&self) -> Route {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return self.current_route();
        }
        let route = self.evaluate();
        tracing::info!(route = %route.name(), base = %self.base, "router initialized");
        *self.current.write() = Some(route.clone());
        route
    }

    /// Whether [`initialize`](Self::initialize) has run
    #[inline]
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Register a route callback
    ///
    /// With `immediate`, the last known route (if any) is delivered before
    /// this returns. The callback is registered first, so a navigation it
    /// issues during that delivery reaches it in the following round.
    pub fn subscribe(
        &self,
        callback: impl Fn(&Route) + Send + Sync + 'static,
        options: SubscribeOptions,
    ) -> Subscription {
        let callback = Arc::new(callback);
        let registered = Arc::clone(&callback);
        let subscription = self.listeners.subscribe(move |route| registered(route));

        let initial = if options.immediate {
            self.current.read().clone()
        } else {
            None
        };
        if let Some(route) = initial {
            let owns_round = self.begin_delivery();
            callback(&route);
            if owns_round {
                self.drain_pending(1);
            }
        }
        subscription
    }

    /// Push or replace one entry, then re-evaluate and broadcast
    pub fn navigate_to(&self, path: &str, options: NavigateOptions) {
        let (pathname, search) = path.split_once('?').unwrap_or((path, ""));
        let pathname = if pathname.is_empty() { "/" } else { pathname };
        let mut url = self.base.prepend(pathname);
        if !search.is_empty() {
            url.push('?');
            url.push_str(search);
        }

        {
            let mut history = self.history.lock();
            if options.replace {
                history.replace(&url);
            } else {
                history.push(&url);
            }
        }
        tracing::debug!(%url, replace = options.replace, "navigate");
        self.notify();
    }

    /// Host hook for history changes the bridge did not make (popstate)
    ///
    /// Ignored until the bridge is initialized.
    pub fn history_changed(&self) {
        if self.is_initialized() {
            self.notify();
        }
    }

    /// Last broadcast route, or a fresh evaluation
    #[must_use]
    pub fn current_route(&self) -> Route {
        if let Some(route) = self.current.read().as_ref() {
            return route.clone();
        }
        self.evaluate()
    }

    /// External location of the current history entry
    #[must_use]
    pub fn location(&self) -> String {
        self.history.lock().location()
    }

    /// Deployment base path
    #[inline]
    #[must_use]
    pub fn base_path(&self) -> &BasePath {
        &self.base
    }

    /// Route table
    #[inline]
    #[must_use]
    pub fn matcher(&self) -> &RouteMatcher {
        &self.matcher
    }

    /// Read the history backend
    pub fn with_history<R>(&self, f: impl FnOnce(&H) -> R) -> R {
        f(&self.history.lock())
    }

    /// Number of route subscribers
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn evaluate(&self) -> Route {
        let location = self.history.lock().location();
        let (pathname, rest) = match location.find(['?', '#']) {
            Some(index) => location.split_at(index),
            None => (location.as_str(), ""),
        };
        let internal = format!("{}{}", self.base.strip(pathname), rest);
        self.matcher.evaluate(&internal)
    }

    fn notify(&self) {
        {
            let mut dispatch = self.dispatch.lock();
            if dispatch.delivering {
                dispatch.pending = true;
                return;
            }
            dispatch.delivering = true;
        }
        self.broadcast();
        self.drain_pending(1);
    }

    /// Claim the delivery slot; `false` if a round is already in flight
    fn begin_delivery(&self) -> bool {
        let mut dispatch = self.dispatch.lock();
        !std::mem::replace(&mut dispatch.delivering, true)
    }

    fn broadcast(&self) {
        let route = self.evaluate();
        *self.current.write() = Some(route.clone());
        self.listeners.emit(&route);
    }

    /// Deliver rounds for navigations recorded during delivery, then
    /// release the delivery slot
    fn drain_pending(&self, mut rounds: usize) {
        loop {
            {
                let mut dispatch = self.dispatch.lock();
                if !dispatch.pending {
                    dispatch.delivering = false;
                    return;
                }
                dispatch.pending = false;
                if rounds >= MAX_DISPATCH_ROUNDS {
                    dispatch.delivering = false;
                    drop(dispatch);
                    tracing::warn!(
                        rounds,
                        location = %self.history.lock().location(),
                        "route dispatch limit reached; dropping further rounds"
                    );
                    return;
                }
            }
            self.broadcast();
            rounds += 1;
        }
    }
}

impl<H: TraversableHistory> NavigationBridge<H> {
    /// Move through history by `delta` entries and broadcast
    ///
    /// Returns `false` if the move was out of range.
    pub fn go(&self, delta: isize) -> bool {
        let moved = self.history.lock().go(delta);
        if moved {
            self.history_changed();
        }
        moved
    }

    /// Browser back button
    pub fn back(&self) -> bool {
        self.go(-1)
    }

    /// Browser forward button
    pub fn forward(&self) -> bool {
        self.go(1)
    }
}

impl<H: HistoryBackend> Navigator for NavigationBridge<H> {
    fn navigate_to(&self, path: &str, options: NavigateOptions) {
        NavigationBridge::navigate_to(self, path, options);
    }

    fn current_route(&self) -> Route {
        NavigationBridge::current_route(self)
    }
}

impl<H: HistoryBackend> fmt::Debug for NavigationBridge<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationBridge")
            .field("base", &self.base)
            .field("location", &self.location())
            .field("subscribers", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryHistory;
    use crate::route::RouteName;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn bridge(initial: &str, base: &str) -> Arc<NavigationBridge<MemoryHistory>> {
        Arc::new(NavigationBridge::new(
            MemoryHistory::new(initial),
            BasePath::new(base),
            RouteMatcher::standard(),
        ))
    }

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&Route) + Send + Sync + 'static) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        (log, move |route: &Route| {
            sink.lock().push(route.name().to_string());
        })
    }

    #[test]
    fn initialize_is_idempotent() {
        let bridge = bridge("/app/tokens", "/app");
        let first = bridge.initialize();
        bridge.navigate_to("/icons", NavigateOptions::push());
        let second = bridge.initialize();

        assert_eq!(first.name(), RouteName::Tokens);
        assert_eq!(second.name(), RouteName::Icons);
    }

    #[test]
    fn navigate_prefixes_base_and_keeps_query() {
        let bridge = bridge("/app", "/app");
        bridge.initialize();
        bridge.navigate_to("/components/button/primary?label=Hi", NavigateOptions::push());

        assert_eq!(bridge.location(), "/app/components/button/primary?label=Hi");
        let route = bridge.current_route();
        assert_eq!(route.name(), RouteName::Component);
        assert_eq!(route.search_params().get("label"), Some("Hi"));
    }

    #[test]
    fn navigate_home_under_base() {
        let bridge = bridge("/app/tokens", "/app");
        bridge.initialize();
        bridge.navigate_to("/", NavigateOptions::push());
        assert_eq!(bridge.location(), "/app");
        assert_eq!(bridge.current_route().name(), RouteName::Home);

        bridge.navigate_to("?x=1", NavigateOptions::replace());
        assert_eq!(bridge.location(), "/app?x=1");
    }

    #[test]
    fn replace_does_not_grow_history() {
        let bridge = bridge("/", "/");
        bridge.initialize();
        bridge.navigate_to("/nowhere", NavigateOptions::push());
        bridge.navigate_to("/", NavigateOptions::replace());

        bridge.with_history(|history| {
            assert_eq!(history.entries(), &["/".to_string(), "/".to_string()]);
        });
    }

    #[test]
    fn subscribe_immediate_delivers_last_route() {
        let bridge = bridge("/icons", "/");
        let (log, callback) = recorder();

        let before_init = bridge.subscribe(|_| panic!("no route known yet"), SubscribeOptions::default());
        drop(before_init);

        bridge.initialize();
        let _sub = bridge.subscribe(callback, SubscribeOptions::default());
        assert_eq!(*log.lock(), vec!["icons"]);
    }

    #[test]
    fn subscribe_lazily() {
        let bridge = bridge("/icons", "/");
        bridge.initialize();
        let (log, callback) = recorder();

        let _sub = bridge.subscribe(callback, SubscribeOptions { immediate: false });
        assert!(log.lock().is_empty());

        bridge.navigate_to("/tokens", NavigateOptions::push());
        assert_eq!(*log.lock(), vec!["tokens"]);
    }

    #[test]
    fn back_and_forward_broadcast() {
        let bridge = bridge("/", "/");
        bridge.initialize();
        bridge.navigate_to("/tokens", NavigateOptions::push());
        bridge.navigate_to("/icons", NavigateOptions::push());

        let (log, callback) = recorder();
        let _sub = bridge.subscribe(callback, SubscribeOptions { immediate: false });

        assert!(bridge.back());
        assert!(bridge.back());
        assert!(!bridge.back());
        assert!(bridge.forward());

        assert_eq!(*log.lock(), vec!["tokens", "home", "tokens"]);
    }

    #[test]
    fn history_changed_ignored_before_initialize() {
        let bridge = bridge("/", "/");
        let (log, callback) = recorder();
        let _sub = bridge.subscribe(callback, SubscribeOptions { immediate: false });

        bridge.history_changed();
        assert!(log.lock().is_empty());
    }

    #[test]
    fn redirect_from_subscriber_is_deferred_not_nested() {
        let bridge = bridge("/", "/");
        bridge.initialize();

        let redirector = {
            let weak = Arc::downgrade(&bridge);
            bridge.subscribe(
                move |route| {
                    if route.is_not_found() {
                        if let Some(bridge) = weak.upgrade() {
                            bridge.navigate_to("/", NavigateOptions::replace());
                        }
                    }
                },
                SubscribeOptions { immediate: false },
            )
        };
        let (log, callback) = recorder();
        let _observer = bridge.subscribe(callback, SubscribeOptions { immediate: false });

        bridge.navigate_to("/missing", NavigateOptions::push());

        // The observer sees the invalid route first, then the corrected one.
        assert_eq!(*log.lock(), vec!["not-found", "home"]);
        assert_eq!(bridge.current_route().name(), RouteName::Home);
        bridge.with_history(|history| assert_eq!(history.len(), 2));
        drop(redirector);
    }

    #[test]
    fn immediate_subscriber_sees_its_own_redirect() {
        let bridge = bridge("/nope", "/");
        bridge.initialize();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let _sub = {
            let weak = Arc::downgrade(&bridge);
            let seen = Arc::clone(&seen);
            bridge.subscribe(
                move |route| {
                    seen.lock().push(route.name().to_string());
                    if route.is_not_found() {
                        if let Some(bridge) = weak.upgrade() {
                            bridge.navigate_to("/", NavigateOptions::replace());
                        }
                    }
                },
                SubscribeOptions::default(),
            )
        };

        assert_eq!(*seen.lock(), vec!["not-found", "home"]);
        assert_eq!(bridge.location(), "/");
        assert_eq!(bridge.current_route().name(), RouteName::Home);
    }

    #[test]
    fn immediate_delivery_inside_a_round_defers_to_that_round() {
        let bridge = bridge("/", "/");
        bridge.initialize();

        let late = Arc::new(Mutex::new(Vec::new()));
        let late_subs = Arc::new(Mutex::new(Vec::new()));
        let _outer = {
            let weak = Arc::downgrade(&bridge);
            let late = Arc::clone(&late);
            let late_subs = Arc::clone(&late_subs);
            bridge.subscribe(
                move |route| {
                    if route.name() != RouteName::Tokens {
                        return;
                    }
                    let Some(bridge) = weak.upgrade() else { return };
                    let late = Arc::clone(&late);
                    let sub = bridge.subscribe(
                        move |route| late.lock().push(route.name().to_string()),
                        SubscribeOptions::default(),
                    );
                    late_subs.lock().push(sub);
                },
                SubscribeOptions { immediate: false },
            )
        };

        bridge.navigate_to("/tokens", NavigateOptions::push());

        assert_eq!(*late.lock(), vec!["tokens"]);
        assert_eq!(bridge.subscriber_count(), 2);
    }

    #[test]
    fn redirect_loop_is_bounded() {
        let bridge = bridge("/", "/");
        bridge.initialize();

        let count = Arc::new(Mutex::new(0usize));
        let _looper = {
            let weak = Arc::downgrade(&bridge);
            let count = Arc::clone(&count);
            bridge.subscribe(
                move |_| {
                    *count.lock() += 1;
                    if let Some(bridge) = weak.upgrade() {
                        bridge.navigate_to("/tokens", NavigateOptions::replace());
                    }
                },
                SubscribeOptions { immediate: false },
            )
        };

        bridge.navigate_to("/icons", NavigateOptions::push());
        assert_eq!(*count.lock(), MAX_DISPATCH_ROUNDS);
    }
}
