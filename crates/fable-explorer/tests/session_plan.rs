//! Scenario Plan: a browsing session where the store and the URL drive each
//! other.
//!
//! The store writes URLs when the user picks a story or edits an argument;
//! the controller reads them back when the route changes. The loop must
//! settle after one round and must not undo what the user just did.
//!
//! Expected system behavior:
//! - Selecting a story pushes its canonical URL; the controller sees the
//!   story already shown and leaves its locks alone.
//! - Argument edits push (or replace, when coalescing) a URL carrying every
//!   current argument.
//! - Back and forward re-select whatever the URL names, with the args it
//!   carries.
//! - Reloading stories re-selects the shown story from its new definition.
//! - Manifests and metadata bundles load from JSON and route like fixtures.
//! - A file-backed theme preference survives a new session.
//!
//! Test plan dimensions:
//! - Source of change: store action, push, back/forward
//! - History policy: push per edit, coalesce
//! - Inputs: in-code fixtures, JSON manifests, TOML config

use fable_explorer::{Explorer, ExplorerConfig};
use fable_metadata::MetadataRegistry;
use fable_route::MemoryHistory;
use fable_store::{ArgHistoryPolicy, EditOutcome, SelectOptions, Theme, ViewName};
use fable_story::{ArgValue, SelectedStory};
use fable_test_utils::{locks, metadata, slots, story_groups, METADATA_JSON, STORY_MANIFEST_JSON};
use pretty_assertions::assert_eq;

const PRIMARY_URL: &str = "/components/button/primary?label=Click+me&variant=primary&disabled=false";
const DISABLED_URL: &str = "/components/button/disabled?label=Click+me&variant=primary&disabled=true";

fn session(config: ExplorerConfig) -> Explorer<MemoryHistory> {
    let explorer = Explorer::in_memory(config, "/");
    explorer.store().set_stories(story_groups());
    explorer.store().set_metadata(metadata());
    explorer.start();
    explorer
}

/// Tenet: picking a story writes its URL and the controller settles on it.
#[test]
fn selecting_story_pushes_canonical_url() {
    let explorer = session(ExplorerConfig::new());

    assert!(explorer.store().select_story(0, "Primary", SelectOptions::new()));

    let report = explorer.report();
    assert_eq!(report.location, PRIMARY_URL);
    assert_eq!(report.history, vec!["/".to_string(), PRIMARY_URL.to_string()]);
    assert_eq!(report.story_path.as_deref(), Some(PRIMARY_URL));
    assert_eq!(report.state.view.name, ViewName::Component);
    assert_eq!(report.state.view.param("story"), Some("primary"));
}

/// Tenet: an unlock survives the URL round trip caused by the next edit.
///
/// If this fails, the controller re-selected the story it was already
/// showing and reset the locks from the story definition.
#[test]
fn edits_keep_unlocked_args_unlocked() {
    let explorer = session(ExplorerConfig::new());
    explorer.store().select_story(0, "Primary", SelectOptions::new());

    assert_eq!(explorer.store().update_arg("variant", "ghost"), EditOutcome::Locked);

    explorer.store().unlock_arg("variant");
    assert_eq!(explorer.store().update_arg("variant", "ghost"), EditOutcome::Applied);

    assert!(!explorer.store().is_locked("variant"));
    assert_eq!(
        explorer.location(),
        "/components/button/primary?label=Click+me&variant=ghost&disabled=false"
    );
    assert_eq!(explorer.report().history.len(), 3);
}

/// Tenet: with coalescing, edits replace the story's entry.
#[test]
fn coalesced_edits_replace_entry() {
    let explorer = session(ExplorerConfig::new().with_arg_history(ArgHistoryPolicy::Coalesce));
    explorer.store().select_story(0, "Disabled", SelectOptions::new());

    explorer.store().update_arg("label", "Wait");
    explorer.store().update_arg("label", "Saving");

    let report = explorer.report();
    assert_eq!(
        report.history,
        vec![
            "/".to_string(),
            "/components/button/disabled?label=Saving&variant=primary&disabled=true".to_string(),
        ]
    );
}

/// Tenet: back and forward re-select the story and args the URL names.
#[test]
fn back_and_forward_reselect() {
    let explorer = session(ExplorerConfig::new());
    explorer.store().select_story(0, "Primary", SelectOptions::new());
    explorer.store().select_story(0, "Disabled", SelectOptions::new());
    explorer.store().update_arg("label", "Busy");

    assert!(explorer.back());
    assert_eq!(explorer.location(), DISABLED_URL);
    assert_eq!(
        explorer.store().current_args().get("label"),
        Some(&ArgValue::from("Click me"))
    );

    assert!(explorer.back());
    assert_eq!(
        explorer.store().selected_story(),
        Some(SelectedStory::new(0, "Primary"))
    );
    assert!(explorer.store().is_locked("label"));

    assert!(explorer.forward());
    assert_eq!(
        explorer.store().selected_story(),
        Some(SelectedStory::new(0, "Disabled"))
    );
    assert!(!explorer.store().is_locked("label"));

    // traversal never adds entries
    assert_eq!(explorer.report().history.len(), 4);
}

/// Tenet: back to home keeps the previous selection but shows home.
#[test]
fn back_to_home_switches_view() {
    let explorer = session(ExplorerConfig::new());
    explorer.store().select_story(1, "Elevated", SelectOptions::new());

    assert!(explorer.back());
    assert_eq!(explorer.location(), "/");
    assert_eq!(explorer.store().view().name, ViewName::Home);
    assert!(!explorer.back());
}

/// Tenet: reloading stories resets the shown story to its new definition,
/// even when the URL already carries every argument.
#[test]
fn reload_applies_new_story_definition() {
    let explorer = session(ExplorerConfig::new());
    explorer.store().select_story(0, "Primary", SelectOptions::new());
    assert!(explorer.store().is_locked("label"));

    let mut groups = story_groups();
    groups[0].meta.locked_args = locks([("variant", true), ("label", false)]);
    groups[0].meta.slots = slots([("default", "Press")]);
    explorer.load_stories(groups);

    assert_eq!(
        explorer.store().selected_story(),
        Some(SelectedStory::new(0, "Primary"))
    );
    assert!(!explorer.store().is_locked("label"));
    assert_eq!(
        explorer.store().current_slots().get("default").map(String::as_str),
        Some("Press")
    );
    assert_eq!(explorer.location(), PRIMARY_URL);
    assert_eq!(explorer.report().history.len(), 2);
}

/// Tenet: a stopped session no longer reacts to URLs.
#[test]
fn stop_detaches_controller() {
    let explorer = session(ExplorerConfig::new());
    explorer.stop();
    assert!(!explorer.is_running());

    explorer.navigate_to("/components/x/y");
    assert_eq!(explorer.location(), "/components/x/y");
    assert_eq!(explorer.bridge().subscriber_count(), 0);
}

/// Tenet: JSON manifests and metadata bundles route like in-code fixtures.
#[test]
fn json_inputs_route_end_to_end() {
    let groups = fable_story::manifest::from_json_str(STORY_MANIFEST_JSON).expect("manifest parses");
    let registry = MetadataRegistry::from_json_str(METADATA_JSON).expect("metadata parses");
    assert!(registry.validate().is_empty());

    let explorer = Explorer::in_memory(ExplorerConfig::new(), "/components/fablr-button/disabled");
    explorer.start();
    explorer.load_stories(groups);
    explorer.load_metadata(registry);

    assert_eq!(
        explorer.store().selected_story(),
        Some(SelectedStory::new(0, "Disabled"))
    );
    assert!(explorer.store().is_locked("variant"));
    assert!(explorer.store().is_locked("disabled"));
    assert_eq!(
        explorer.store().render_current().as_deref(),
        Some("<fablr-button label=\"Click me\" variant=\"primary\" disabled>Button</fablr-button>")
    );

    explorer.navigate_to("/docs/foundations/nope");
    assert_eq!(explorer.location(), "/docs/foundations/intro");

    explorer.navigate_to("/icons/nope");
    assert_eq!(explorer.location(), "/icons/icon-alert");
}

/// Tenet: the theme is read from and written to the preference file.
#[test]
fn theme_persists_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let config = ExplorerConfig::new().with_preferences_path(dir.path().join("state/preferences.json"));

    {
        let explorer = session(config.clone());
        assert_eq!(explorer.store().theme(), Theme::Light);
        explorer.store().toggle_theme();
    }

    let text = std::fs::read_to_string(dir.path().join("state/preferences.json")).unwrap();
    assert!(text.contains("\"fable-theme\": \"dark\""));

    let explorer = session(config.with_prefers_dark(false));
    assert_eq!(explorer.store().theme(), Theme::Dark);
}

/// Tenet: a TOML config with a base path and coalescing drives the session.
#[test]
fn toml_config_drives_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fable.toml");
    std::fs::write(&path, "base_path = \"/ds/\"\narg_history = \"coalesce\"\n").unwrap();

    let config = ExplorerConfig::load(&path).unwrap();
    let explorer = Explorer::in_memory(config, "/ds/components/card/default");
    explorer.store().set_stories(story_groups());
    explorer.start();

    explorer.store().update_arg("heading", "Hello");

    let report = explorer.report();
    assert_eq!(
        report.history,
        vec!["/ds/components/card/default?heading=Hello&elevated=false".to_string()]
    );
    assert_eq!(report.state.view.param("group"), Some("card"));
}
