//! Error types for metadata loading and validation

use crate::entry::EntityKind;
use std::path::PathBuf;

/// Metadata loading errors
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// Bundle file could not be read
    #[error("failed to read metadata bundle {path}: {source}")]
    Io {
        /// Bundle path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Bundle is not valid JSON for the expected shape
    #[error("invalid metadata bundle: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result alias for metadata operations
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Validation finding; a registry with findings still loads
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetadataIssue {
    /// Two entries of one kind share an id
    #[error("duplicate {kind} id '{id}'")]
    DuplicateId {
        /// Entry kind
        kind: EntityKind,
        /// Repeated id
        id: String,
    },

    /// Two docs pages resolve to the same URL
    #[error("duplicate docs path /docs/{section}/{slug}")]
    DuplicateDocPath {
        /// Section segment
        section: String,
        /// Slug segment
        slug: String,
    },

    /// A required field is blank
    #[error("{kind} '{id}' has a blank {field}")]
    BlankField {
        /// Entry kind
        kind: EntityKind,
        /// Entry id (may itself be blank)
        id: String,
        /// Field name
        field: &'static str,
    },
}
