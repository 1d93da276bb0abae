//! Verbatim `pre` block container.

use crate::error::RenderError;
use crate::html::escape_html;
use crate::registry::{BlockBody, BlockContainer};

/// Renders its body HTML-escaped inside a `<pre class="pre">`.
///
/// The body is captured raw, so Markdown and container syntax inside stay
/// literal.
pub struct PreRenderer;

impl BlockContainer for PreRenderer {
    fn body(&self) -> BlockBody {
        BlockBody::Raw
    }

    fn render_raw(&self, _args: &str, body: &str) -> Result<String, RenderError> {
        if body.is_empty() {
            tracing::error!("empty pre container body");
            return Ok("<pre class=\"pre\">\nCould not find original Text\n</pre>".to_owned());
        }
        Ok(format!("<pre class=\"pre\">\n{}</pre>", escape_html(body)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_body_is_escaped() {
        let html = PreRenderer.render_raw("", "<b>1 & 2</b>\n").unwrap();
        assert_eq!(html, "<pre class=\"pre\">\n&lt;b&gt;1 &amp; 2&lt;/b&gt;\n</pre>");
    }

    #[test]
    fn test_markdown_stays_literal() {
        let html = PreRenderer.render_raw("", "# not a heading\n**bold**\n").unwrap();
        assert!(html.contains("# not a heading"));
        assert!(html.contains("**bold**"));
        assert!(!html.contains("<strong>"));
    }

    #[test]
    fn test_empty_body_reports_missing_text() {
        let html = PreRenderer.render_raw("", "").unwrap();
        assert!(html.contains("Could not find original Text"));
    }

    #[test]
    fn test_captures_body_raw() {
        assert_eq!(PreRenderer.body(), BlockBody::Raw);
    }
}
