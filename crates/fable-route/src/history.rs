//! History backends
//!
//! The bridge talks to the host's history stack through [`HistoryBackend`].
//! [`MemoryHistory`] is a complete in-process stack used by the CLI and tests.

/// Host history stack
pub trait HistoryBackend: Send {
    /// Current external location (`/base/path?query#hash`)
    fn location(&self) -> String;

    /// Add an entry after the current one, discarding forward entries
    fn push(&mut self, url: &str);

    /// Overwrite the current entry
    fn replace(&mut self, url: &str);
}

/// History stack that supports back/forward traversal
pub trait TraversableHistory: HistoryBackend {
    /// Move the cursor by `delta` entries
    ///
    /// Returns `false` (and stays put) if the target is out of range.
    fn go(&mut self, delta: isize) -> bool;
}

/// In-memory history stack with a cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl MemoryHistory {
    /// Start with a single entry
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            cursor: 0,
        }
    }

    /// All entries, oldest first
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Index of the current entry
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a history stack has at least one entry
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if `go(-1)` would move
    #[inline]
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    /// True if `go(1)` would move
    #[inline]
    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl HistoryBackend for MemoryHistory {
    fn location(&self) -> String {
        self.entries[self.cursor].clone()
    }

    fn push(&mut self, url: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(url.to_string());
        self.cursor += 1;
    }

    fn replace(&mut self, url: &str) {
        self.entries[self.cursor] = url.to_string();
    }
}

impl TraversableHistory for MemoryHistory {
    fn go(&mut self, delta: isize) -> bool {
        match self.cursor.checked_add_signed(delta) {
            Some(target) if target < self.entries.len() && delta != 0 => {
                self.cursor = target;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_replace() {
        let mut history = MemoryHistory::new("/");
        history.push("/tokens");
        history.replace("/tokens/a");

        assert_eq!(history.entries(), &["/".to_string(), "/tokens/a".to_string()]);
        assert_eq!(history.location(), "/tokens/a");
    }

    #[test]
    fn back_and_forward() {
        let mut history = MemoryHistory::new("/");
        history.push("/a");
        history.push("/b");

        assert!(history.go(-1));
        assert_eq!(history.location(), "/a");
        assert!(history.go(1));
        assert_eq!(history.location(), "/b");
        assert!(!history.go(1));
        assert!(!history.go(-5));
        assert_eq!(history.location(), "/b");
    }

    #[test]
    fn push_discards_forward_entries() {
        let mut history = MemoryHistory::new("/");
        history.push("/a");
        history.push("/b");
        history.go(-2);
        history.push("/c");

        assert_eq!(history.len(), 2);
        assert!(!history.can_go_forward());
        assert!(history.can_go_back());
    }
}
