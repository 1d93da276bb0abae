//! Render error types.

use thiserror::Error;

/// Errors raised while rendering a document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    /// A callout container was configured with a kind that has no style
    /// settings. Misconfigured callouts fail the whole render rather than
    /// degrading silently.
    #[error("unknown callout kind: {0}")]
    UnknownCalloutKind(String),
}
