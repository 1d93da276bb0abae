//! Errors raised while loading documents.

use docsite_renderer::RenderError;
use docsite_storage::StorageError;
use thiserror::Error;

/// Error loading a document from storage.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The backing storage failed (missing file, permission, backend down).
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The markdown pipeline rejected the document body.
    #[error("render failed for {path}")]
    Render {
        path: String,
        #[source]
        source: RenderError,
    },

    /// The front matter block could not be decoded.
    #[error("invalid front matter in {path}: {message}")]
    FrontMatter { path: String, message: String },
}
