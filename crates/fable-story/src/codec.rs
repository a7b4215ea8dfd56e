//! Argument codec: [`ArgSet`] <-> query parameters
//!
//! Booleans travel as the literals `true` and `false`, so a text argument
//! holding either literal decodes back as a boolean. The key `story` is
//! reserved for the legacy `?story=group/story` form and never decodes as an
//! argument.

use crate::group::StoryGroup;
use crate::slug::slugify;
use crate::value::{ArgSet, ArgValue};
use fable_route::SearchParams;

/// Query key reserved for legacy story links
pub const ROUTING_KEY: &str = "story";

/// Decode query parameters into args; a repeated key keeps its last value
#[must_use]
pub fn decode(params: &SearchParams) -> ArgSet {
    let mut args = ArgSet::new();
    for (key, value) in params.iter().filter(|(key, _)| *key != ROUTING_KEY) {
        args.insert(key.to_string(), ArgValue::from_query(value));
    }
    args
}

/// Encode args as query parameters in insertion order
#[must_use]
pub fn encode(args: &ArgSet) -> SearchParams {
    args.iter().map(|(key, value)| (key.as_str(), value.to_string())).collect()
}

/// Canonical `/components/{group}/{story}` path with encoded args
///
/// Returns `None` when the group index is out of range.
#[must_use]
pub fn build_story_path(groups: &[StoryGroup], group_index: usize, name: &str, args: &ArgSet) -> Option<String> {
    let group = groups.get(group_index)?;
    let path = format!("/components/{}/{}", group.slug(), slugify(name));
    let query = encode(args).to_query_string();

    Some(if query.is_empty() {
        path
    } else {
        format!("{path}?{query}")
    })
}

/// `(group slug, story slug)` from a legacy `?story=group/story` query
#[must_use]
pub fn legacy_story_slugs(params: &SearchParams) -> Option<(&str, &str)> {
    let (group, story) = params.get(ROUTING_KEY)?.split_once('/')?;
    let story = story.split('/').next().unwrap_or(story);
    (!group.is_empty() && !story.is_empty()).then_some((group, story))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::StoryMeta;
    use crate::story::StoryDefinition;
    use crate::value::args;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn decode_coerces_booleans_and_skips_routing_key() {
        let params = SearchParams::parse("?story=button/primary&disabled=true&label=Hi&on=false");
        let decoded = decode(&params);

        assert_eq!(
            decoded,
            args([("disabled", ArgValue::Bool(true)), ("label", "Hi".into()), ("on", false.into())])
        );
    }

    #[test]
    fn repeated_key_keeps_last_value() {
        let decoded = decode(&SearchParams::parse("size=s&size=l"));
        assert_eq!(decoded["size"], ArgValue::from("l"));
        assert_eq!(decoded.len(), 1);
    }

    #[test]
    fn encode_keeps_insertion_order() {
        let encoded = encode(&args([("z", ArgValue::from("last")), ("a", true.into())]));
        assert_eq!(encoded.to_query_string(), "z=last&a=true");
    }

    #[test]
    fn text_literal_true_decodes_as_bool() {
        let original = args([("flag", ArgValue::from("true"))]);
        assert_eq!(decode(&encode(&original))["flag"], ArgValue::Bool(true));
    }

    #[test]
    fn story_path_uses_slugs() {
        let groups = vec![StoryGroup::new(StoryMeta::new("Fablr Button"))
            .with_story("Primary Large", StoryDefinition::direct(|_, _| String::new()))];

        assert_eq!(
            build_story_path(&groups, 0, "Primary Large", &args([("label", ArgValue::from("Save it"))])),
            Some("/components/fablr-button/primary-large?label=Save+it".to_string())
        );
        assert_eq!(
            build_story_path(&groups, 0, "Primary Large", &ArgSet::new()),
            Some("/components/fablr-button/primary-large".to_string())
        );
        assert_eq!(build_story_path(&groups, 3, "Primary Large", &ArgSet::new()), None);
    }

    #[test]
    fn legacy_slugs() {
        assert_eq!(
            legacy_story_slugs(&SearchParams::parse("story=button/primary")),
            Some(("button", "primary"))
        );
        assert_eq!(legacy_story_slugs(&SearchParams::parse("story=button")), None);
        assert_eq!(legacy_story_slugs(&SearchParams::parse("story=/primary")), None);
        assert_eq!(legacy_story_slugs(&SearchParams::parse("label=x")), None);
    }

    fn arg_value() -> impl Strategy<Value = ArgValue> {
        prop_oneof![
            any::<bool>().prop_map(ArgValue::Bool),
            ".{0,12}"
                .prop_filter("boolean literals decode as booleans", |s| s != "true" && s != "false")
                .prop_map(ArgValue::Text),
        ]
    }

    proptest! {
        #[test]
        fn prop_round_trip(entries in proptest::collection::vec(("[a-zA-Z_][a-zA-Z0-9_ &=]{0,8}", arg_value()), 0..8)) {
            let original: ArgSet = entries
                .into_iter()
                .filter(|(key, _)| key != ROUTING_KEY)
                .collect();
            let decoded = decode(&SearchParams::parse(&encode(&original).to_query_string()));
            prop_assert_eq!(decoded, original);
        }
    }
}
