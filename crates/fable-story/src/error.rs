//! Error types for story manifests

use std::path::PathBuf;

/// Story manifest errors
#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    /// Manifest file could not be read
    #[error("failed to read story manifest {path}: {source}")]
    Io {
        /// Manifest path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Manifest is not valid JSON for the expected shape
    #[error("invalid story manifest: {0}")]
    Parse(#[from] serde_json::Error),

    /// A group has neither a title nor a component tag
    #[error("group {index} has no title and no component tag")]
    UntitledGroup {
        /// Position in the manifest
        index: usize,
    },

    /// A group declares no stories
    #[error("group '{title}' declares no stories")]
    EmptyGroup {
        /// Group title
        title: String,
    },
}

impl StoryError {
    /// Create an I/O error for a path
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for manifest operations
pub type Result<T> = std::result::Result<T, StoryError>;
