//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading documents from a local directory tree.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::storage::{FileEntry, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// Walks a source directory recursively, returning files as virtual paths
/// relative to that root. Dotfiles and dot-directories are skipped.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use docsite_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("content"));
/// let files = storage.list("docs")?;
/// ```
pub struct FsStorage {
    /// Root directory the virtual tree maps onto.
    source_dir: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `source_dir`.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Validate that a virtual path doesn't escape the source directory.
    ///
    /// Rejects paths containing parent directory components (`..`) to prevent
    /// path traversal (e.g., `../../../etc/passwd`).
    fn validate_path(path: &str) -> Result<(), StorageError> {
        let has_parent_dir = Path::new(path)
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir));

        if has_parent_dir {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    /// Walk a directory recursively, collecting file entries.
    ///
    /// `prefix` is the virtual path of `dir_path` relative to the root
    /// ("" for the root itself).
    fn walk(dir_path: &Path, prefix: &str, out: &mut Vec<FileEntry>) -> Result<(), StorageError> {
        let entries = fs::read_dir(dir_path)
            .map_err(|e| StorageError::io(e, Some(dir_path.to_path_buf())).with_backend(BACKEND))?;

        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let virtual_path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}/{name}")
            };

            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            if is_dir {
                Self::walk(&entry.path(), &virtual_path, out)?;
            } else {
                out.push(FileEntry::from_virtual_path(virtual_path));
            }
        }

        Ok(())
    }
}

impl Storage for FsStorage {
    fn list(&self, dir: &str) -> Result<Vec<FileEntry>, StorageError> {
        Self::validate_path(dir)?;

        let full_dir = if dir.is_empty() {
            self.source_dir.clone()
        } else {
            self.source_dir.join(dir)
        };
        if !full_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        Self::walk(&full_dir, dir, &mut files)?;
        files.sort_by(|a, b| a.virtual_path.cmp(&b.virtual_path));
        Ok(files)
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        Self::validate_path(path)?;
        let full_path = self.source_dir.join(path);
        fs::read_to_string(&full_path)
            .map_err(|e| StorageError::io(e, Some(full_path.clone())).with_backend(BACKEND))
    }

    fn exists(&self, path: &str) -> bool {
        Self::validate_path(path).is_ok() && self.source_dir.join(path).is_file()
    }

    fn mtime(&self, path: &str) -> Result<f64, StorageError> {
        Self::validate_path(path)?;
        let full_path = self.source_dir.join(path);
        let metadata = fs::metadata(&full_path)
            .map_err(|e| StorageError::io(e, Some(full_path.clone())).with_backend(BACKEND))?;
        let modified = metadata
            .modified()
            .map_err(|e| StorageError::io(e, Some(full_path)).with_backend(BACKEND))?;
        Ok(modified
            .duration_since(UNIX_EPOCH)
            .map_or(0.0, |d| d.as_secs_f64()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_storage_is_send_sync() {
        assert_send_sync::<FsStorage>();
    }

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn test_list_empty_dir() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let files = storage.list("").unwrap();

        assert!(files.is_empty());
    }

    #[test]
    fn test_list_missing_dir() {
        let storage = FsStorage::new(PathBuf::from("/nonexistent"));
        let files = storage.list("").unwrap();

        assert!(files.is_empty());
    }

    #[test]
    fn test_list_flat_structure_sorted() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("guide.md"), "# Guide").unwrap();
        fs::write(temp_dir.path().join("api.md"), "# API").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let files = storage.list("").unwrap();

        let paths: Vec<_> = files.iter().map(|f| f.virtual_path.as_str()).collect();
        assert_eq!(paths, vec!["api.md", "guide.md"]);
    }

    #[test]
    fn test_list_nested_structure() {
        let temp_dir = create_test_dir();
        let sub = temp_dir.path().join("docs").join("deploy");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("hosting.md"), "# Hosting").unwrap();
        fs::write(temp_dir.path().join("docs").join("intro.md"), "# Intro").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let files = storage.list("docs").unwrap();

        let paths: Vec<_> = files.iter().map(|f| f.virtual_path.as_str()).collect();
        assert_eq!(paths, vec!["docs/deploy/hosting.md", "docs/intro.md"]);
    }

    #[test]
    fn test_list_skips_dotfiles() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join(".hidden.md"), "# Hidden").unwrap();
        fs::write(temp_dir.path().join("visible.md"), "# Visible").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let files = storage.list("").unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].virtual_path, "visible.md");
    }

    #[test]
    fn test_list_includes_non_markdown() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("menu.json"), "[]").unwrap();
        fs::write(temp_dir.path().join("page.md"), "# Page").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let files = storage.list("").unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "menu.json");
        assert_eq!(files[0].extension, "json");
    }

    #[test]
    fn test_read_existing_file() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("guide.md"), "# Guide\n\nContent.").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let content = storage.read("guide.md").unwrap();

        assert_eq!(content, "# Guide\n\nContent.");
    }

    #[test]
    fn test_read_nested_file() {
        let temp_dir = create_test_dir();
        let sub = temp_dir.path().join("docs");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("guide.md"), "# Docs Guide").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let content = storage.read("docs/guide.md").unwrap();

        assert_eq!(content, "# Docs Guide");
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let err = storage.read("nonexistent.md").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Fs"));
    }

    #[test]
    fn test_exists() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("guide.md"), "# Guide").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert!(storage.exists("guide.md"));
        assert!(!storage.exists("nonexistent.md"));
    }

    #[test]
    fn test_mtime_returns_modification_time() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("guide.md"), "# Guide").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let mtime = storage.mtime("guide.md").unwrap();

        let now = std::time::SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs_f64();
        assert!(mtime > now - 60.0);
        assert!(mtime <= now);
    }

    #[test]
    fn test_mtime_missing_file() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let err = storage.mtime("nonexistent.md").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
    }

    #[test]
    fn test_read_rejects_path_traversal() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let err = storage.read("../etc/passwd").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
        assert_eq!(err.backend, Some("Fs"));
    }

    #[test]
    fn test_list_rejects_path_traversal() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let err = storage.list("docs/../..").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_exists_rejects_path_traversal() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert!(!storage.exists("../etc/passwd"));
    }
}
