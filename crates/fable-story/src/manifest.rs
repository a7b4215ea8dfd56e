//! JSON story manifests
//!
//! ```json
//! { "groups": [
//!     { "meta": { "component": "fablr-button", "args": { "label": "Click" } },
//!       "stories": { "Primary": null,
//!                    "Disabled": { "args": { "disabled": true }, "lockedArgs": { "disabled": true } } } }
//! ] }
//! ```
//!
//! Story `args` are overlaid on the group's base args. Every story renders
//! as the group's custom element.

use crate::error::{Result, StoryError};
use crate::group::{StoryGroup, StoryMeta};
use crate::story::StoryDefinition;
use crate::value::{ArgSet, ArgValue, LockSet, SlotSet};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt::Write as _;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct Manifest {
    groups: Vec<GroupEntry>,
}

#[derive(Debug, Deserialize)]
struct GroupEntry {
    #[serde(default)]
    meta: StoryMeta,
    #[serde(default)]
    stories: IndexMap<String, Option<StoryEntry>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StoryEntry {
    args: Option<ArgSet>,
    locked_args: Option<LockSet>,
}

/// Parse a manifest from JSON text
///
/// # Errors
///
/// Fails on malformed JSON, on a group with neither title nor component and
/// on a group without stories.
pub fn from_json_str(json: &str) -> Result<Vec<StoryGroup>> {
    let manifest: Manifest = serde_json::from_str(json)?;

    manifest
        .groups
        .into_iter()
        .enumerate()
        .map(|(index, entry)| build_group(index, entry))
        .collect()
}

/// Read and parse a manifest file
///
/// # Errors
///
/// Fails if the file cannot be read or does not parse.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<StoryGroup>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| StoryError::io(path, e))?;
    from_json_str(&text)
}

fn build_group(index: usize, entry: GroupEntry) -> Result<StoryGroup> {
    let mut meta = entry.meta;
    meta.normalize();
    if meta.title.trim().is_empty() {
        return Err(StoryError::UntitledGroup { index });
    }
    if entry.stories.is_empty() {
        return Err(StoryError::EmptyGroup { title: meta.title });
    }

    let tag = meta
        .component
        .clone()
        .unwrap_or_else(|| crate::slug::slugify(&meta.title));

    let mut group = StoryGroup::new(meta);
    for (name, story) in entry.stories {
        let definition = build_story(&tag, story.unwrap_or_default());
        group.stories.insert(name, definition);
    }
    Ok(group)
}

fn build_story(tag: &str, entry: StoryEntry) -> StoryDefinition {
    let tag = tag.to_string();
    let mut story = StoryDefinition::direct(move |args, slots| render_element(&tag, args, slots));

    if let Some(overlay) = entry.args {
        story = story.with_args(move |base| {
            let mut args = base.clone();
            for (key, value) in &overlay {
                args.insert(key.clone(), value.clone());
            }
            args
        });
    }
    if let Some(locks) = entry.locked_args {
        story = story.with_locked_args(locks);
    }
    story
}

/// Render a custom element: `true` args become bare attributes, `false`
/// args are omitted, the `default` slot is the element's text and other
/// slots are wrapped in `<span slot="...">`
#[must_use]
pub fn render_element(tag: &str, args: &ArgSet, slots: &SlotSet) -> String {
    let mut out = format!("<{tag}");
    for (name, value) in args {
        match value {
            ArgValue::Bool(true) => {
                let _ = write!(out, " {name}");
            }
            ArgValue::Bool(false) => {}
            ArgValue::Text(text) => {
                let _ = write!(out, " {name}=\"{}\"", escape(text));
            }
        }
    }
    out.push('>');

    for (name, content) in slots {
        if name == "default" {
            out.push_str(&escape(content));
        } else {
            let _ = write!(out, "<span slot=\"{name}\">{}</span>", escape(content));
        }
    }

    let _ = write!(out, "</{tag}>");
    out
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}
