//! Navigator search over story groups

use crate::group::StoryGroup;

/// One group in a filtered navigator listing
#[derive(Debug, Clone)]
pub struct FilteredGroup<'a> {
    /// Index into the unfiltered group list
    pub group_index: usize,
    /// The group itself
    pub group: &'a StoryGroup,
    /// Listed story names, in declaration order
    pub stories: Vec<&'a str>,
}

/// Filter groups by a case-insensitive query
///
/// A blank query lists everything. A group whose title or one of its tags
/// contains the query lists all its stories; otherwise only stories whose
/// names contain the query are listed, and groups with none are dropped.
#[must_use]
pub fn filter_stories<'a>(groups: &'a [StoryGroup], query: &str) -> Vec<FilteredGroup<'a>> {
    let query = query.trim().to_lowercase();

    groups
        .iter()
        .enumerate()
        .filter_map(|(group_index, group)| {
            let names = group.story_names();
            if query.is_empty() || group_matches(group, &query) {
                return Some(FilteredGroup {
                    group_index,
                    group,
                    stories: names.collect(),
                });
            }

            let stories: Vec<&str> = names.filter(|name| contains(name, &query)).collect();
            (!stories.is_empty()).then_some(FilteredGroup {
                group_index,
                group,
                stories,
            })
        })
        .collect()
}

fn group_matches(group: &StoryGroup, query: &str) -> bool {
    contains(&group.meta.title, query) || group.meta.tags.iter().any(|tag| contains(tag, query))
}

fn contains(text: &str, lowered_query: &str) -> bool {
    text.to_lowercase().contains(lowered_query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::StoryMeta;
    use crate::story::StoryDefinition;

    fn groups() -> Vec<StoryGroup> {
        let story = || StoryDefinition::direct(|_, _| String::new());
        vec![
            StoryGroup::new(StoryMeta::new("Button").with_tags(["action", "form"]))
                .with_story("Primary", story())
                .with_story("Secondary", story()),
            StoryGroup::new(StoryMeta::new("Card"))
                .with_story("Default", story())
                .with_story("With Primary Action", story()),
        ]
    }

    fn listing(filtered: &[FilteredGroup<'_>]) -> Vec<(usize, Vec<String>)> {
        filtered
            .iter()
            .map(|g| (g.group_index, g.stories.iter().map(ToString::to_string).collect()))
            .collect()
    }

    #[test]
    fn blank_query_lists_everything() {
        let groups = groups();
        assert_eq!(filter_stories(&groups, "   ").len(), 2);
    }

    #[test]
    fn title_match_lists_all_stories() {
        let groups = groups();
        assert_eq!(
            listing(&filter_stories(&groups, "BUTT")),
            vec![(0, vec!["Primary".to_string(), "Secondary".to_string()])]
        );
    }

    #[test]
    fn tag_match_counts_as_group_match() {
        let groups = groups();
        assert_eq!(listing(&filter_stories(&groups, "form"))[0].1.len(), 2);
    }

    #[test]
    fn story_match_lists_only_matching_names() {
        let groups = groups();
        assert_eq!(
            listing(&filter_stories(&groups, "primary")),
            vec![
                (0, vec!["Primary".to_string()]),
                (1, vec!["With Primary Action".to_string()]),
            ]
        );
        assert!(filter_stories(&groups, "zzz").is_empty());
    }
}
