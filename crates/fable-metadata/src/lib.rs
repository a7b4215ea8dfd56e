//! Fable Metadata Registry
//!
//! Docs pages, design tokens and icons with stable ids and canonical paths.
//!
//! # Core Concepts
//!
//! - **Entries**: [`DocEntry`], [`TokenEntry`] and [`IconEntry`] share a
//!   [`Taxonomy`] block and the [`MetadataEntry`] read interface
//! - **Paths**: `/docs/{section}/{slug}`, `/tokens/{id}`, `/icons/{id}`
//! - **Validation**: [`MetadataRegistry::validate`] reports
//!   [`MetadataIssue`]s without refusing to load
//!
//! # Example
//!
//! ```
//! use fable_metadata::{DocEntry, MetadataRegistry};
//!
//! let registry = MetadataRegistry::new()
//!     .with_docs(vec![DocEntry::new("d1", "Intro", "foundations", "intro")]);
//!
//! let doc = registry.find_doc("foundations", "intro");
//! assert_eq!(doc.map(DocEntry::path).as_deref(), Some("/docs/foundations/intro"));
//! assert!(registry.validate().is_empty());
//! ```

mod entry;
mod error;
mod registry;

pub use entry::{
    docs_path, icon_path, token_path, Accessibility, DocEntry, EntityKind, IconEntry, IconStyle, MetadataEntry,
    Platform, Taxonomy, TokenEntry, TokenType,
};
pub use error::{MetadataError, MetadataIssue, Result};
pub use registry::{EntryRef, MetadataRegistry};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
