//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::storage::{FileEntry, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores file contents in memory keyed by virtual path. Use the builder
/// methods to configure the mock with test data. Contents are behind a lock
/// so tests can simulate edits on a shared storage.
///
/// # Example
///
/// ```ignore
/// use docsite_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("docs/guide.md", "# Guide\n\nContent.")
///     .with_mtime("docs/guide.md", 1_700_000_000.0);
///
/// let files = storage.list("docs").unwrap();
/// let content = storage.read("docs/guide.md").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    contents: RwLock<BTreeMap<String, String>>,
    mtimes: RwLock<BTreeMap<String, f64>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given virtual path and content.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.contents
            .write()
            .unwrap()
            .insert(path.into(), content.into());
        self
    }

    /// Set modification time for a path, as seconds since Unix epoch.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_mtime(self, path: impl Into<String>, mtime: f64) -> Self {
        self.mtimes.write().unwrap().insert(path.into(), mtime);
        self
    }

    /// Replace the content of an existing file (or add a new one).
    ///
    /// Useful for simulating edits between reads in refresh tests.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn update_file(&self, path: impl Into<String>, content: impl Into<String>) {
        self.contents
            .write()
            .unwrap()
            .insert(path.into(), content.into());
    }

    /// Remove a file.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn remove_file(&self, path: &str) {
        self.contents.write().unwrap().remove(path);
        self.mtimes.write().unwrap().remove(path);
    }
}

impl Storage for MockStorage {
    fn list(&self, dir: &str) -> Result<Vec<FileEntry>, StorageError> {
        let prefix = if dir.is_empty() {
            String::new()
        } else {
            format!("{dir}/")
        };
        // BTreeMap iteration keeps the listing sorted by virtual path.
        Ok(self
            .contents
            .read()
            .unwrap()
            .keys()
            .filter(|path| path.starts_with(&prefix))
            .map(FileEntry::from_virtual_path)
            .collect())
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        self.contents
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| {
                StorageError::new(StorageErrorKind::NotFound)
                    .with_path(path)
                    .with_backend(BACKEND)
            })
    }

    fn exists(&self, path: &str) -> bool {
        self.contents.read().unwrap().contains_key(path)
    }

    fn mtime(&self, path: &str) -> Result<f64, StorageError> {
        self.mtimes.read().unwrap().get(path).copied().ok_or_else(|| {
            StorageError::new(StorageErrorKind::NotFound)
                .with_path(path)
                .with_backend(BACKEND)
        })
    }
}
