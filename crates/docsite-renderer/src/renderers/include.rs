//! Inline include expansion.

use crate::error::RenderError;
use crate::registry::{InlineContainer, RenderContext};

/// Expands `::include path.md::` to the pre-rendered preview of another
/// document.
///
/// Resolution rules (default folders, slug fallbacks) live with the
/// [`IncludeSource`](crate::IncludeSource) implementor; this renderer only
/// wraps the result. A missing document renders a visible placeholder so
/// broken includes show up in the page rather than vanishing.
pub struct IncludeRenderer;

impl InlineContainer for IncludeRenderer {
    fn render(&self, payload: &str, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        if payload.is_empty() {
            return Ok(String::new());
        }

        let preview = if payload.ends_with(".md") {
            ctx.includes.and_then(|source| source.resolve(payload))
        } else {
            None
        };

        match preview {
            Some(preview) => Ok(format!("<div>{preview}\n</div>")),
            None => {
                tracing::error!(include = payload, "could not find include");
                Ok(format!("<div>Could not find: {payload}\n</div>"))
            }
        }
    }
}
