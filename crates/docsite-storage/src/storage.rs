//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for abstracting file enumeration and
//! retrieval, along with [`StorageError`] for unified error handling across
//! backends.
//!
//! # Virtual Path Convention
//!
//! All path parameters in Storage methods are **virtual paths**: forward-slash
//! separated, relative to the storage root:
//! - `""` - the root itself
//! - `"docs"` - a directory
//! - `"docs/guide.md"` - a nested file
//!
//! Storage implementations handle the mapping from virtual paths to their
//! internal storage format.

use std::path::PathBuf;

/// A file discovered by a storage listing.
///
/// Paths are virtual paths relative to the storage root, with `/` separators
/// regardless of platform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileEntry {
    /// Virtual path relative to the storage root (e.g., "docs/guide.md").
    pub virtual_path: String,
    /// File name including extension (e.g., "guide.md").
    pub name: String,
    /// Lowercased extension without the dot, empty if none.
    pub extension: String,
}

impl FileEntry {
    /// Build an entry from a virtual path, deriving name and extension.
    #[must_use]
    pub fn from_virtual_path(virtual_path: impl Into<String>) -> Self {
        let virtual_path = virtual_path.into();
        let name = virtual_path
            .rsplit('/')
            .next()
            .unwrap_or(virtual_path.as_str())
            .to_owned();
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        Self {
            virtual_path,
            name,
            extension,
        }
    }

    /// File name without its extension.
    #[must_use]
    pub fn stem(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map_or(self.name.as_str(), |(stem, _)| stem)
    }
}

/// Semantic error categories (inspired by Object Store + `OpenDAL`).
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Invalid path or identifier.
    InvalidPath,
    /// Backend is temporarily unavailable.
    Unavailable,
    /// Operation timed out.
    Timeout,
    /// Other/unknown error category.
    Other,
}

/// Retry guidance (from `OpenDAL`).
#[derive(Debug, PartialEq, Eq, Default)]
pub enum ErrorStatus {
    /// Don't retry (config error, not found, invalid path).
    #[default]
    Permanent,
    /// Retry immediately (timeout, connection reset).
    Temporary,
    /// Retry with backoff (service unavailable).
    Persistent,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Retry guidance.
    pub status: ErrorStatus,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            status: ErrorStatus::Permanent,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set retry status.
    #[must_use]
    pub fn with_status(mut self, status: ErrorStatus) -> Self {
        self.status = status;
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::TimedOut => StorageErrorKind::Timeout,
            _ => StorageErrorKind::Other,
        };
        let status = match err.kind() {
            std::io::ErrorKind::TimedOut => ErrorStatus::Temporary,
            _ => ErrorStatus::Permanent,
        };
        let mut error = Self::new(kind).with_status(status).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Unavailable => "Unavailable",
            StorageErrorKind::Timeout => "Timeout",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Storage abstraction for file enumeration and retrieval.
///
/// Provides a unified interface for walking a document tree regardless of
/// backend. Implementations handle backend-specific details like recursion
/// and path resolution.
///
/// # Virtual Paths
///
/// All path parameters are **virtual paths** relative to the storage root
/// (see module docs). Returned [`FileEntry`] paths use the same convention,
/// so an entry's `virtual_path` can be passed straight back to [`read`]
/// or [`mtime`].
///
/// [`read`]: Storage::read
/// [`mtime`]: Storage::mtime
pub trait Storage: Send + Sync {
    /// List all files under a directory, recursively.
    ///
    /// Returns entries sorted by virtual path. Listing a directory that
    /// does not exist returns an empty list, not an error, so callers can
    /// treat an absent content root as an empty site.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if enumeration fails (e.g., permission
    /// denied, backend unavailable).
    fn list(&self, dir: &str) -> Result<Vec<FileEntry>, StorageError>;

    /// Read full text content of a file.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file doesn't exist or can't be read.
    fn read(&self, path: &str) -> Result<String, StorageError>;

    /// Check whether a file exists at the given virtual path.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, path: &str) -> bool;

    /// Get modification time as seconds since Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file doesn't exist or mtime can't be
    /// retrieved.
    fn mtime(&self, path: &str) -> Result<f64, StorageError>;
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_file_entry_from_virtual_path() {
        let entry = FileEntry::from_virtual_path("docs/guide/setup.md");

        assert_eq!(entry.virtual_path, "docs/guide/setup.md");
        assert_eq!(entry.name, "setup.md");
        assert_eq!(entry.extension, "md");
        assert_eq!(entry.stem(), "setup");
    }

    #[test]
    fn test_file_entry_top_level() {
        let entry = FileEntry::from_virtual_path("readme.md");

        assert_eq!(entry.virtual_path, "readme.md");
        assert_eq!(entry.name, "readme.md");
        assert_eq!(entry.extension, "md");
    }

    #[test]
    fn test_file_entry_no_extension() {
        let entry = FileEntry::from_virtual_path("docs/LICENSE");

        assert_eq!(entry.name, "LICENSE");
        assert_eq!(entry.extension, "");
        assert_eq!(entry.stem(), "LICENSE");
    }

    #[test]
    fn test_file_entry_extension_lowercased() {
        let entry = FileEntry::from_virtual_path("docs/Page.MD");

        assert_eq!(entry.extension, "md");
        assert_eq!(entry.stem(), "Page");
    }

    #[test]
    fn test_storage_error_new() {
        let err = StorageError::new(StorageErrorKind::NotFound);

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.status, ErrorStatus::Permanent);
        assert!(err.path.is_none());
        assert!(err.backend.is_none());
    }

    #[test]
    fn test_storage_error_with_path() {
        let err = StorageError::new(StorageErrorKind::NotFound).with_path("docs/guide.md");

        assert_eq!(err.path.as_deref(), Some(Path::new("docs/guide.md")));
    }

    #[test]
    fn test_storage_error_with_backend() {
        let err = StorageError::new(StorageErrorKind::NotFound).with_backend("Fs");

        assert_eq!(err.backend, Some("Fs"));
    }

    #[test]
    fn test_storage_error_with_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = StorageError::new(StorageErrorKind::NotFound).with_source(io_err);

        assert!(err.downcast_source::<std::io::Error>().is_some());
    }

    #[test]
    fn test_storage_error_not_found() {
        let err = StorageError::not_found("docs/guide.md");

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.path.as_deref(), Some(Path::new("docs/guide.md")));
    }

    #[test]
    fn test_storage_error_io_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = StorageError::io(io_err, Some(PathBuf::from("docs/guide.md")));

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.status, ErrorStatus::Permanent);
        assert_eq!(err.path.as_deref(), Some(Path::new("docs/guide.md")));
    }

    #[test]
    fn test_storage_error_io_timeout() {
        let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let err = StorageError::io(io_err, None);

        assert_eq!(err.kind, StorageErrorKind::Timeout);
        assert_eq!(err.status, ErrorStatus::Temporary);
    }

    #[test]
    fn test_storage_error_display_simple() {
        let err = StorageError::new(StorageErrorKind::NotFound);

        assert_eq!(err.to_string(), "Not found");
    }

    #[test]
    fn test_storage_error_display_full() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = StorageError::new(StorageErrorKind::NotFound)
            .with_backend("Fs")
            .with_path("docs/guide.md")
            .with_source(io_err);

        assert_eq!(
            err.to_string(),
            "[Fs] Not found: file not found (path: docs/guide.md)"
        );
    }

    #[test]
    fn test_storage_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StorageError>();
    }

    #[test]
    fn test_error_status_default() {
        assert_eq!(ErrorStatus::default(), ErrorStatus::Permanent);
    }
}
