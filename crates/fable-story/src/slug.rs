//! URL slugs for group titles and story names

use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new("[^a-z0-9]+").expect("static regex"));

/// Lowercase, collapse every run of non `[a-z0-9]` characters into one `-`,
/// then trim leading and trailing hyphens
///
/// ```
/// use fable_story::slugify;
///
/// assert_eq!(slugify("My Button!"), "my-button");
/// assert_eq!(slugify("my-button"), "my-button");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_ALPHANUMERIC
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// `fablr-button` -> `Fablr Button`
#[must_use]
pub fn title_case(tag: &str) -> String {
    tag.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn slug_examples() {
        assert_eq!(slugify("Fablr Button"), "fablr-button");
        assert_eq!(slugify("  --Primary  (Large)-- "), "primary-large");
        assert_eq!(slugify("Card/Default"), "card-default");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("Ünïcode Title"), "n-code-title");
    }

    #[test]
    fn case_and_separator_insensitive() {
        assert_eq!(slugify("My Button!"), slugify("my-button"));
        assert_eq!(slugify("MY_BUTTON"), slugify("my button"));
    }

    #[test]
    fn title_case_from_tag() {
        assert_eq!(title_case("fablr-button"), "Fablr Button");
        assert_eq!(title_case("icon"), "Icon");
        assert_eq!(title_case("nav--group"), "Nav  Group");
    }

    proptest! {
        #[test]
        fn prop_slugify_is_idempotent(s in ".{0,40}") {
            let once = slugify(&s);
            prop_assert_eq!(slugify(&once), once.clone());
        }

        #[test]
        fn prop_slug_alphabet(s in ".{0,40}") {
            let slug = slugify(&s);
            prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
            prop_assert!(!slug.starts_with('-') && !slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }
    }
}
