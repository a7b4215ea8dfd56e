//! Story definitions
//!
//! A story is either a bare render function or a configured story that can
//! derive its arguments from the group's base args and declare extra locks.

use crate::value::{ArgSet, LockSet, SlotSet};
use std::fmt;
use std::sync::Arc;

/// Renders a story's markup from its effective args and slots
pub type RenderFn = Arc<dyn Fn(&ArgSet, &SlotSet) -> String + Send + Sync>;

/// Derives a story's args from the group's base args
pub type ArgTransform = Arc<dyn Fn(&ArgSet) -> ArgSet + Send + Sync>;

/// Named rendering variant of a component
#[derive(Clone)]
pub enum StoryDefinition {
    /// Render function only; uses the group's base args as-is
    Direct(RenderFn),
    /// Render function plus optional arg derivation and locks
    Configured {
        /// Optional `base -> args` derivation
        args: Option<ArgTransform>,
        /// Story-level locks, layered over the group's
        locked_args: Option<LockSet>,
        /// Render function
        render: RenderFn,
    },
}

impl StoryDefinition {
    /// Bare render function
    #[must_use]
    pub fn direct(render: impl Fn(&ArgSet, &SlotSet) -> String + Send + Sync + 'static) -> Self {
        Self::Direct(Arc::new(render))
    }

    /// Configured story with no derivation or locks yet
    #[must_use]
    pub fn configured(
        render: impl Fn(&ArgSet, &SlotSet) -> String + Send + Sync + 'static,
    ) -> Self {
        Self::Configured {
            args: None,
            locked_args: None,
            render: Arc::new(render),
        }
    }

    /// Attach an arg derivation (turns a direct story into a configured one)
    #[must_use]
    pub fn with_args(self, transform: impl Fn(&ArgSet) -> ArgSet + Send + Sync + 'static) -> Self {
        let (locked_args, render) = self.into_parts();
        Self::Configured {
            args: Some(Arc::new(transform)),
            locked_args,
            render,
        }
    }

    /// Attach story-level locks (turns a direct story into a configured one)
    #[must_use]
    pub fn with_locked_args(self, locks: LockSet) -> Self {
        let args = self.arg_transform().cloned();
        let (_, render) = self.into_parts();
        Self::Configured {
            args,
            locked_args: Some(locks),
            render,
        }
    }

    /// Args for this story given the group's base args
    #[must_use]
    pub fn derive_args(&self, base: &ArgSet) -> ArgSet {
        match self.arg_transform() {
            Some(transform) => transform(base),
            None => base.clone(),
        }
    }

    /// Story-level locks
    #[must_use]
    pub fn locked_args(&self) -> Option<&LockSet> {
        match self {
            Self::Direct(_) => None,
            Self::Configured { locked_args, .. } => locked_args.as_ref(),
        }
    }

    /// Render with effective args and slots
    #[must_use]
    pub fn render(&self, args: &ArgSet, slots: &SlotSet) -> String {
        (self.render_fn())(args, slots)
    }

    /// True for configured stories
    #[inline]
    #[must_use]
    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Configured { .. })
    }

    fn arg_transform(&self) -> Option<&ArgTransform> {
        match self {
            Self::Direct(_) => None,
            Self::Configured { args, .. } => args.as_ref(),
        }
    }

    fn render_fn(&self) -> &RenderFn {
        match self {
            Self::Direct(render) | Self::Configured { render, .. } => render,
        }
    }

    fn into_parts(self) -> (Option<LockSet>, RenderFn) {
        match self {
            Self::Direct(render) => (None, render),
            Self::Configured {
                locked_args,
                render,
                ..
            } => (locked_args, render),
        }
    }
}

impl fmt::Debug for StoryDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(_) => f.write_str("StoryDefinition::Direct"),
            Self::Configured {
                args, locked_args, ..
            } => f
                .debug_struct("StoryDefinition::Configured")
                .field("derives_args", &args.is_some())
                .field("locked_args", locked_args)
                .finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{args, ArgValue};

    fn label(args: &ArgSet, _: &SlotSet) -> String {
        args.get("label").map(ToString::to_string).unwrap_or_default()
    }

    #[test]
    fn direct_story_uses_base_args() {
        let story = StoryDefinition::direct(label);
        let base = args([("label", ArgValue::from("Base"))]);

        assert_eq!(story.derive_args(&base), base);
        assert!(story.locked_args().is_none());
        assert!(!story.is_configured());
    }

    #[test]
    fn configured_story_derives_args() {
        let story = StoryDefinition::configured(label).with_args(|base| {
            let mut next = base.clone();
            next.insert("label".into(), "Derived".into());
            next
        });
        let base = args([("label", ArgValue::from("Base"))]);
        let derived = story.derive_args(&base);

        assert_eq!(derived["label"], ArgValue::from("Derived"));
        assert_eq!(story.render(&derived, &SlotSet::new()), "Derived");
    }

    #[test]
    fn builders_keep_each_other() {
        let locks: LockSet = [("disabled".to_string(), true)].into_iter().collect();
        let story = StoryDefinition::direct(label)
            .with_args(|base| base.clone())
            .with_locked_args(locks.clone());

        assert!(story.is_configured());
        assert_eq!(story.locked_args(), Some(&locks));
        assert!(format!("{story:?}").contains("derives_args: true"));
    }
}
