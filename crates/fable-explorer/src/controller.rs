//! Route-to-state controller
//!
//! Maps every broadcast [`Route`] onto the store: picks the view, resolves
//! the referenced story or metadata entry, and redirects (always with
//! `replace`) when the reference does not resolve. Redirect targets are
//! canonical paths of existing entries, so the follow-up route settles
//! without a further redirect.
//!
//! | Route       | Resolved                          | Unresolved                         |
//! |-------------|-----------------------------------|------------------------------------|
//! | `home`      | legacy `?story=` -> component URL | legacy query -> `/`                |
//! | `component` | select story, view `component`    | `/`, view `home`                   |
//! | `docs`      | view `{section, slug, id}`        | first doc of section, or first     |
//! | `tokens`    | view `{tokenId}`                  | first token; bare `/tokens` stays  |
//! | `icons`     | view `{iconId}`                   | first icon, also for bare `/icons` |
//! | `playroom`  | view `playroom`                   |                                    |
//! | `not-found` |                                   | `/`, view `home`                   |

use fable_metadata::MetadataRegistry;
use fable_route::{NavigateOptions, Navigator, Route, RouteName};
use fable_store::{AppStore, SelectOptions, ViewName, ViewState};
use fable_story::{build_story_path, decode, encode, find_by_slugs, legacy_story_slugs, ROUTING_KEY};
use std::fmt;
use std::sync::Arc;

/// What handling a route did to the URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// State now reflects the route
    Settled,
    /// A corrective navigation (replace) was issued
    Redirected {
        /// Internal path navigated to
        to: String,
    },
}

impl RouteOutcome {
    /// True if a redirect was issued
    #[inline]
    #[must_use]
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirected { .. })
    }
}

/// Per-kind settings for the token and icon routes
#[derive(Debug, Clone, Copy)]
struct EntityRoute {
    view: ViewName,
    param: &'static str,
    redirect_bare: bool,
}

impl EntityRoute {
    /// `/tokens` shows the first token in place
    const TOKENS: Self = Self {
        view: ViewName::Tokens,
        param: "tokenId",
        redirect_bare: false,
    };

    /// `/icons` moves to the first icon's URL
    const ICONS: Self = Self {
        view: ViewName::Icons,
        param: "iconId",
        redirect_bare: true,
    };
}

/// Applies routes to the store
pub struct RouteController {
    store: Arc<AppStore>,
    navigator: Arc<dyn Navigator>,
}

impl RouteController {
    /// Controller writing to `store` and redirecting through `navigator`
    #[must_use]
    pub fn new(store: Arc<AppStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }

    /// Apply one route
    pub fn handle(&self, route: &Route) -> RouteOutcome {
        self.apply(route, false)
    }

    /// Apply a route after the story or metadata registries were replaced
    ///
    /// Unlike [`handle`](Self::handle), a component route always re-selects
    /// its story, so args, slots and locks come from the new definition.
    pub fn refresh(&self, route: &Route) -> RouteOutcome {
        self.apply(route, true)
    }

    fn apply(&self, route: &Route, reload: bool) -> RouteOutcome {
        tracing::debug!(route = %route.name(), params = ?route.params(), reload, "Handling route");

        match route.name() {
            RouteName::Home => self.handle_home(route),
            RouteName::Component => self.handle_component(route, reload),
            RouteName::Docs => self.handle_docs(route),
            RouteName::Tokens => self.handle_tokens(route),
            RouteName::Icons => self.handle_icons(route),
            RouteName::Playroom => {
                self.store.set_view(ViewState::new(ViewName::Playroom));
                RouteOutcome::Settled
            }
            RouteName::NotFound => {
                self.store.set_view(ViewState::home());
                self.redirect(route, "/".to_string())
            }
        }
    }

    fn handle_home(&self, route: &Route) -> RouteOutcome {
        self.store.set_view(ViewState::home());

        let params = route.search_params();
        if !params.contains_key(ROUTING_KEY) {
            return RouteOutcome::Settled;
        }

        let stories = self.store.stories();
        if stories.is_empty() {
            // resolved again once stories are loaded
            return RouteOutcome::Settled;
        }

        let target = legacy_story_slugs(params)
            .and_then(|(group, story)| find_by_slugs(&stories, group, story))
            .and_then(|selected| build_story_path(&stories, selected.group_index, &selected.name, &decode(params)));

        match target {
            Some(path) => self.redirect(route, path),
            None => self.redirect(route, "/".to_string()),
        }
    }

    fn handle_component(&self, route: &Route, reload: bool) -> RouteOutcome {
        let stories = self.store.stories();
        if stories.is_empty() {
            self.store.set_view(ViewState::new(ViewName::Component));
            return RouteOutcome::Settled;
        }

        let group_slug = route.param("group").unwrap_or_default();
        let story_slug = route.param("story").unwrap_or_default();

        let Some(selected) = find_by_slugs(&stories, group_slug, story_slug) else {
            tracing::info!(group = group_slug, story = story_slug, "Unknown story; returning home");
            self.store.set_view(ViewState::home());
            return self.redirect(route, "/".to_string());
        };

        let url_args = decode(route.search_params());
        let already_shown = !reload
            && self.store.selected_story().as_ref() == Some(&selected)
            && decode(&encode(&self.store.current_args())) == url_args;

        if !already_shown {
            self.store.select_story(
                selected.group_index,
                &selected.name,
                SelectOptions::new().with_args(url_args).without_url_sync(),
            );
        }

        self.store.set_view(
            ViewState::new(ViewName::Component)
                .with_param("group", group_slug)
                .with_param("story", story_slug),
        );
        RouteOutcome::Settled
    }

    fn handle_docs(&self, route: &Route) -> RouteOutcome {
        let metadata = self.store.metadata();
        if metadata.docs().is_empty() {
            self.store.set_view(ViewState::new(ViewName::Docs));
            return RouteOutcome::Settled;
        }

        let section = route.param("section").unwrap_or_default();
        let slug = route.param("slug").unwrap_or_default();

        let (doc, exact) = match metadata.find_doc(section, slug) {
            Some(doc) => (doc, true),
            None => match metadata.first_doc_in_section(section).or_else(|| metadata.docs().first()) {
                Some(doc) => (doc, false),
                None => return RouteOutcome::Settled,
            },
        };

        self.store.set_view(
            ViewState::new(ViewName::Docs)
                .with_param("section", &doc.section)
                .with_param("slug", &doc.slug)
                .with_param("id", &doc.id),
        );

        if exact {
            RouteOutcome::Settled
        } else {
            self.redirect(route, doc.path())
        }
    }

    fn handle_tokens(&self, route: &Route) -> RouteOutcome {
        let metadata = self.store.metadata();
        self.handle_entity(
            route,
            EntityRoute::TOKENS,
            &metadata,
            |registry, id| registry.token(id).map(|t| (t.id.clone(), t.path())),
            |registry| registry.tokens().first().map(|t| (t.id.clone(), t.path())),
        )
    }

    fn handle_icons(&self, route: &Route) -> RouteOutcome {
        let metadata = self.store.metadata();
        self.handle_entity(
            route,
            EntityRoute::ICONS,
            &metadata,
            |registry, id| registry.icon(id).map(|i| (i.id.clone(), i.path())),
            |registry| registry.icons().first().map(|i| (i.id.clone(), i.path())),
        )
    }

    /// Shared token/icon handling: an unknown id redirects to the first
    /// entry; a missing id shows the first entry, redirecting to it when
    /// the route asks for that
    fn handle_entity(
        &self,
        route: &Route,
        entity: EntityRoute,
        metadata: &MetadataRegistry,
        find: impl Fn(&MetadataRegistry, &str) -> Option<(String, String)>,
        first: impl Fn(&MetadataRegistry) -> Option<(String, String)>,
    ) -> RouteOutcome {
        let EntityRoute { view, param, redirect_bare } = entity;
        let Some((first_id, first_path)) = first(metadata) else {
            self.store.set_view(ViewState::new(view));
            return RouteOutcome::Settled;
        };

        if let Some((id, _)) = route.param(param).and_then(|requested| find(metadata, requested)) {
            self.store.set_view(ViewState::new(view).with_param(param, id));
            return RouteOutcome::Settled;
        }

        self.store.set_view(ViewState::new(view).with_param(param, first_id));
        if route.param(param).is_some() || redirect_bare {
            self.redirect(route, first_path)
        } else {
            RouteOutcome::Settled
        }
    }

    fn redirect(&self, from: &Route, to: String) -> RouteOutcome {
        tracing::info!(from = %from.name(), params = ?from.params(), to = %to, "Redirecting");
        self.navigator.navigate_to(&to, NavigateOptions::replace());
        RouteOutcome::Redirected { to }
    }
}

impl fmt::Debug for RouteController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteController").field("store", &self.store).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fable_route::{RouteMatcher, SearchParams};
    use fable_store::{MemoryPreferences, StoreConfig};
    use fable_story::{ArgValue, SelectedStory};
    use fable_test_utils::{locks, metadata, slots, story_groups, RecordingNavigator};
    use pretty_assertions::assert_eq;

    struct Harness {
        navigator: Arc<RecordingNavigator>,
        store: Arc<AppStore>,
        controller: RouteController,
    }

    fn harness() -> Harness {
        let navigator = Arc::new(RecordingNavigator::new());
        let store = Arc::new(AppStore::new(
            navigator.clone(),
            Arc::new(MemoryPreferences::new()),
            StoreConfig::new(),
        ));
        store.set_stories(story_groups());
        store.set_metadata(metadata());
        let controller = RouteController::new(Arc::clone(&store), navigator.clone());
        Harness {
            navigator,
            store,
            controller,
        }
    }

    fn route(url: &str) -> Route {
        RouteMatcher::standard().evaluate(url)
    }

    fn redirect(to: &str) -> RouteOutcome {
        RouteOutcome::Redirected { to: to.to_string() }
    }

    #[test]
    fn component_route_selects_story_with_url_args() {
        let h = harness();
        let outcome = h.controller.handle(&route("/components/button/secondary?label=Hi&disabled=true"));

        assert_eq!(outcome, RouteOutcome::Settled);
        assert_eq!(h.store.selected_story(), Some(SelectedStory::new(0, "Secondary")));
        assert_eq!(h.store.current_args()["label"], ArgValue::from("Hi"));
        assert_eq!(h.store.current_args()["disabled"], ArgValue::Bool(true));
        assert_eq!(h.store.current_args()["variant"], ArgValue::from("secondary"));
        assert!(h.store.is_locked("label"));
        assert_eq!(
            h.store.view(),
            ViewState::new(ViewName::Component)
                .with_param("group", "button")
                .with_param("story", "secondary")
        );
        assert!(h.navigator.calls().is_empty());
    }

    #[test]
    fn unknown_component_redirects_home() {
        let h = harness();
        assert_eq!(h.controller.handle(&route("/components/button/nope")), redirect("/"));
        assert_eq!(h.store.view(), ViewState::home());
        assert_eq!(h.navigator.last(), Some(("/".to_string(), NavigateOptions::replace())));
    }

    #[test]
    fn empty_registry_shows_loading_component_view() {
        let h = harness();
        h.store.set_stories(Vec::new());

        assert_eq!(h.controller.handle(&route("/components/button/primary")), RouteOutcome::Settled);
        assert_eq!(h.store.view(), ViewState::new(ViewName::Component));
        assert_eq!(h.store.selected_story(), None);
    }

    #[test]
    fn same_story_same_args_keeps_unlocks() {
        let h = harness();
        h.controller.handle(&route("/components/button/primary"));
        h.store.unlock_arg("label");
        h.store.update_arg("label", "Edited");
        let synced = h.navigator.last().map(|(path, _)| path).unwrap();

        h.controller.handle(&route(&synced));

        assert!(!h.store.is_locked("label"));
        assert_eq!(h.store.current_args()["label"], ArgValue::from("Edited"));
    }

    #[test]
    fn different_args_reselect_and_reset_locks() {
        let h = harness();
        h.controller.handle(&route("/components/button/primary"));
        h.store.unlock_arg("label");

        h.controller.handle(&route("/components/button/primary?label=Other"));

        assert!(h.store.is_locked("label"));
        assert_eq!(h.store.current_args()["label"], ArgValue::from("Other"));
    }

    #[test]
    fn docs_fallback_to_first_in_section() {
        let h = harness();
        assert_eq!(
            h.controller.handle(&route("/docs/foundations/missing")),
            redirect("/docs/foundations/intro")
        );
        assert_eq!(
            h.store.view(),
            ViewState::new(ViewName::Docs)
                .with_param("section", "foundations")
                .with_param("slug", "intro")
                .with_param("id", "d1")
        );
    }

    #[test]
    fn docs_fallback_to_first_overall() {
        let h = harness();
        assert_eq!(h.controller.handle(&route("/docs/nowhere/x")), redirect("/docs/foundations/intro"));
        assert_eq!(h.controller.handle(&route("/docs/components/button-guidelines")), RouteOutcome::Settled);
        assert_eq!(h.store.view().param("id"), Some("d3"));
    }

    #[test]
    fn docs_without_entries() {
        let h = harness();
        h.store.set_metadata(fable_metadata::MetadataRegistry::new());
        assert_eq!(h.controller.handle(&route("/docs/a/b")), RouteOutcome::Settled);
        assert_eq!(h.store.view(), ViewState::new(ViewName::Docs));
    }

    #[test]
    fn tokens_first_entry_without_redirect_when_no_id() {
        let h = harness();
        assert_eq!(h.controller.handle(&route("/tokens")), RouteOutcome::Settled);
        assert_eq!(h.store.view().param("tokenId"), Some("token-color-primary"));
        assert!(h.navigator.calls().is_empty());
    }

    #[test]
    fn unknown_token_redirects_to_first() {
        let h = harness();
        assert_eq!(h.controller.handle(&route("/tokens/nope")), redirect("/tokens/token-color-primary"));
        assert_eq!(h.controller.handle(&route("/tokens/token-space-md")), RouteOutcome::Settled);
        assert_eq!(h.store.view().param("tokenId"), Some("token-space-md"));
    }

    #[test]
    fn icons_redirect_to_first_when_bare_or_unknown() {
        let h = harness();
        assert_eq!(h.controller.handle(&route("/icons/nope")), redirect("/icons/icon-alert"));
        assert_eq!(h.controller.handle(&route("/icons")), redirect("/icons/icon-alert"));
        assert_eq!(h.store.view().param("iconId"), Some("icon-alert"));
        assert_eq!(h.controller.handle(&route("/icons/icon-arrow-right")), RouteOutcome::Settled);
        assert_eq!(h.store.view().param("iconId"), Some("icon-arrow-right"));

        h.store.set_metadata(fable_metadata::MetadataRegistry::new());
        assert_eq!(h.controller.handle(&route("/icons/x")), RouteOutcome::Settled);
        assert_eq!(h.store.view(), ViewState::new(ViewName::Icons));
    }

    #[test]
    fn refresh_reselects_from_new_definition() {
        let h = harness();
        let url = "/components/button/primary?label=Click+me&variant=primary&disabled=false";
        h.controller.handle(&route(url));
        assert!(h.store.is_locked("label"));

        let mut groups = story_groups();
        groups[0].meta.locked_args = locks([("variant", true), ("label", false)]);
        groups[0].meta.slots = slots([("default", "Press")]);
        h.store.set_stories(groups);

        // a plain route change keeps the story already on screen
        assert_eq!(h.controller.handle(&route(url)), RouteOutcome::Settled);
        assert!(h.store.is_locked("label"));

        assert_eq!(h.controller.refresh(&route(url)), RouteOutcome::Settled);
        assert!(!h.store.is_locked("label"));
        assert_eq!(
            h.store.current_slots().get("default").map(String::as_str),
            Some("Press")
        );
        assert!(h.navigator.calls().is_empty());
    }

    #[test]
    fn playroom_and_not_found() {
        let h = harness();
        assert_eq!(h.controller.handle(&route("/playroom")), RouteOutcome::Settled);
        assert_eq!(h.store.view().name, ViewName::Playroom);

        assert_eq!(h.controller.handle(&route("/what/ever")), redirect("/"));
        assert_eq!(h.store.view(), ViewState::home());
    }

    #[test]
    fn legacy_story_query_redirects_to_component_url() {
        let h = harness();
        let outcome = h.controller.handle(&route("/?story=card/elevated&heading=Hi"));
        assert_eq!(outcome, redirect("/components/card/elevated?heading=Hi"));

        assert_eq!(h.controller.handle(&route("/?story=card/nope")), redirect("/"));
        assert_eq!(h.controller.handle(&route("/")), RouteOutcome::Settled);
    }

    #[test]
    fn redirect_targets_settle() {
        let h = harness();
        for url in ["/components/x/y", "/docs/foundations/missing", "/tokens/nope", "/icons/nope", "/nope"] {
            let RouteOutcome::Redirected { to } = h.controller.handle(&route(url)) else {
                panic!("{url} should redirect");
            };
            assert_eq!(h.controller.handle(&route(&to)), RouteOutcome::Settled, "{url} -> {to}");
        }
    }

    #[test]
    fn search_params_survive_into_not_found() {
        let r = route("/nope?x=1");
        assert_eq!(r.search_params(), &SearchParams::parse("x=1"));
    }
}
