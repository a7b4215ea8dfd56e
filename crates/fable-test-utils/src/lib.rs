//! Testing utilities for the Fable workspace
//!
//! Shared story and metadata fixtures plus a navigator that records calls.

#![allow(missing_docs)]

use fable_metadata::{DocEntry, IconEntry, IconStyle, MetadataRegistry, TokenEntry, TokenType};
use fable_route::{NavigateOptions, Navigator, Route, RouteMatcher};
use fable_story::{args, ArgSet, ArgValue, LockSet, SlotSet, Status, StoryDefinition, StoryGroup, StoryMeta};
use parking_lot::Mutex;

pub fn locks<const N: usize>(pairs: [(&str, bool); N]) -> LockSet {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

pub fn slots<const N: usize>(pairs: [(&str, &str); N]) -> SlotSet {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn render_label(args: &ArgSet, _: &SlotSet) -> String {
    format!("<button>{}</button>", args.get("label").map(ToString::to_string).unwrap_or_default())
}

fn with_arg(key: &'static str, value: ArgValue) -> impl Fn(&ArgSet) -> ArgSet + Send + Sync + 'static {
    move |base| {
        let mut next = base.clone();
        next.insert(key.to_string(), value.clone());
        next
    }
}

/// `Button`: Primary (direct), Secondary (derives variant), Disabled
/// (derives and locks `disabled`, unlocks `label`)
pub fn button_group() -> StoryGroup {
    StoryGroup::new(
        StoryMeta::new("Button")
            .with_component("fablr-button")
            .with_status(Status::Stable)
            .with_tags(["action", "form"])
            .with_args(args([
                ("label", ArgValue::from("Click me")),
                ("variant", "primary".into()),
                ("disabled", false.into()),
            ]))
            .with_slots(slots([("default", "Button"), ("icon", "")]))
            .with_locked_args(locks([("variant", true), ("label", true)])),
    )
    .with_story("Primary", StoryDefinition::direct(render_label))
    .with_story(
        "Secondary",
        StoryDefinition::configured(render_label).with_args(with_arg("variant", "secondary".into())),
    )
    .with_story(
        "Disabled",
        StoryDefinition::configured(render_label)
            .with_args(with_arg("disabled", true.into()))
            .with_locked_args(locks([("disabled", true), ("label", false)])),
    )
}

/// `Card`: Default and Elevated
pub fn card_group() -> StoryGroup {
    StoryGroup::new(
        StoryMeta::new("Card")
            .with_component("fablr-card")
            .with_status(Status::Beta)
            .with_args(args([("heading", ArgValue::from("Card title")), ("elevated", false.into())]))
            .with_slots(slots([("default", "Body")])),
    )
    .with_story("Default", StoryDefinition::direct(render_label))
    .with_story(
        "Elevated",
        StoryDefinition::configured(render_label).with_args(with_arg("elevated", true.into())),
    )
}

pub fn story_groups() -> Vec<StoryGroup> {
    vec![button_group(), card_group()]
}

/// Docs `d1` is `/docs/foundations/intro`
pub fn metadata() -> MetadataRegistry {
    MetadataRegistry::new()
        .with_docs(vec![
            DocEntry::new("d1", "Introduction", "foundations", "intro").with_description("Getting started"),
            DocEntry::new("d2", "Color", "foundations", "color"),
            DocEntry::new("d3", "Button Guidelines", "components", "button-guidelines"),
        ])
        .with_tokens(vec![
            TokenEntry::new("token-color-primary", "Primary Color", TokenType::Color, "#5B3CC4"),
            TokenEntry::new("token-space-md", "Medium Space", TokenType::Dimension, "16px"),
        ])
        .with_icons(vec![
            IconEntry::new("icon-alert", "Alert", "M1 21h22L12 2 1 21z", IconStyle::Outline),
            IconEntry::new("icon-arrow-right", "Arrow Right", "M12 4l8 8-8 8", IconStyle::Filled),
        ])
}

pub const STORY_MANIFEST_JSON: &str = r#"{
    "groups": [
        {
            "meta": {
                "component": "fablr-button",
                "args": { "label": "Click me", "variant": "primary", "disabled": false },
                "slots": { "default": "Button" },
                "lockedArgs": { "variant": true },
                "status": "stable"
            },
            "stories": {
                "Primary": null,
                "Disabled": { "args": { "disabled": true }, "lockedArgs": { "disabled": true } }
            }
        },
        {
            "meta": { "title": "Card", "component": "fablr-card", "args": { "heading": "Card title" } },
            "stories": { "Default": null }
        }
    ]
}"#;

pub const METADATA_JSON: &str = r##"{
    "docs": [
        { "id": "d1", "title": "Introduction", "section": "foundations", "slug": "intro",
          "updatedAt": "2024-05-10T00:00:00.000Z" },
        { "id": "d3", "title": "Button Guidelines", "section": "components", "slug": "button-guidelines" }
    ],
    "tokens": [
        { "id": "token-color-primary", "title": "Primary Color", "tokenType": "color", "value": "#5B3CC4" }
    ],
    "icons": [
        { "id": "icon-alert", "title": "Alert", "svgPath": "M1 21h22L12 2 1 21z", "style": "outline" }
    ]
}"##;

/// Navigator that records every call and evaluates the last path it saw
#[derive(Debug)]
pub struct RecordingNavigator {
    calls: Mutex<Vec<(String, NavigateOptions)>>,
    matcher: RouteMatcher,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            matcher: RouteMatcher::standard(),
        }
    }

    pub fn calls(&self) -> Vec<(String, NavigateOptions)> {
        self.calls.lock().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(path, _)| path.clone()).collect()
    }

    pub fn last(&self) -> Option<(String, NavigateOptions)> {
        self.calls.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

impl Default for RecordingNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, path: &str, options: NavigateOptions) {
        self.calls.lock().push((path.to_string(), options));
    }

    fn current_route(&self) -> Route {
        let calls = self.calls.lock();
        let path = calls.last().map_or("/", |(path, _)| path.as_str());
        self.matcher.evaluate(path)
    }
}
