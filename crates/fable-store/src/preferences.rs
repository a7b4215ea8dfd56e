//! Durable preference storage
//!
//! The store persists only small string values (the theme). Two backends:
//! [`MemoryPreferences`] for tests and embedding, [`FilePreferences`] for a
//! JSON object on disk.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Preference storage errors
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    /// Preference file could not be read or written
    #[error("preference file {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Preference file is not a JSON object of strings
    #[error("invalid preference file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Key/value preference backend
pub trait PreferenceStore: Send + Sync {
    /// Stored value for `key`
    ///
    /// # Errors
    ///
    /// Backend read failure.
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    /// Store `value` under `key`
    ///
    /// # Errors
    ///
    /// Backend write failure.
    fn save(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// In-memory preferences
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryPreferences {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with one value
    #[must_use]
    pub fn with_value(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.lock().insert(key.into(), value.into());
        self
    }
}

impl PreferenceStore for MemoryPreferences {
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept as a JSON object in one file
///
/// A missing file reads as empty. Writes rewrite the whole file.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FilePreferences {
    /// Preferences at `path`; the file is created on first save
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// File location
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> PreferenceError {
        PreferenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PreferenceStore for FilePreferences {
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.read_all()?.remove(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let _guard = self.write_lock.lock();
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let text = serde_json::to_string_pretty(&values)?;
        std::fs::write(&self.path, text).map_err(|e| self.io_error(e))?;
        tracing::debug!(key, path = %self.path.display(), "Preference saved");
        Ok(())
    }
}
