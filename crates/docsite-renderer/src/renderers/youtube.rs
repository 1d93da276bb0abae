//! YouTube embeds via `lite-youtube` custom elements.

use crate::error::RenderError;
use crate::html::escape_html;
use crate::registry::{BlockBody, BlockContainer, InlineContainer, RenderContext};

fn lite_youtube(video_id: &str, playlabel: Option<&str>) -> String {
    let id = escape_html(video_id);
    let playlabel = match playlabel {
        Some(label) => format!(" playlabel=\"{}\"", escape_html(label)),
        None => String::new(),
    };
    format!(
        "<lite-youtube class=\"w-full mx-4 my-4\" width=\"560\" height=\"315\" \
         videoid=\"{id}\"{playlabel} \
         style=\"background-image:url('https://img.youtube.com/vi/{id}/maxresdefault.jpg')\">\
         </lite-youtube>"
    )
}

/// Block embed: `:::youtube VIDEO_ID` with an optional play label as the
/// first body line.
pub struct YouTubeBlockRenderer;

impl BlockContainer for YouTubeBlockRenderer {
    fn body(&self) -> BlockBody {
        BlockBody::Raw
    }

    fn render_raw(&self, args: &str, body: &str) -> Result<String, RenderError> {
        // Tolerate a trailing colon left over from `:::youtube id:::`
        // written on one line.
        let video_id = args.trim().trim_end_matches(':');
        if video_id.is_empty() {
            return Ok("<!-- youtube: Missing YouTube Video Id -->".to_owned());
        }

        let playlabel = body
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("");
        Ok(lite_youtube(video_id, Some(playlabel)))
    }
}

/// Inline embed: `::youtube VIDEO_ID::`, wrapped in a centering flex div.
pub struct YouTubeInlineRenderer;

impl InlineContainer for YouTubeInlineRenderer {
    fn render(&self, payload: &str, _ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        let video_id = payload.trim();
        if video_id.is_empty() {
            return Ok(String::new());
        }

        Ok(format!(
            "<div class=\"flex justify-center\">\n{}\n</div>",
            lite_youtube(video_id, None)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_embed_with_playlabel() {
        let html = YouTubeBlockRenderer
            .render_raw("dQw4w9WgXcQ", "Watch the demo\n")
            .unwrap();
        assert!(html.contains("videoid=\"dQw4w9WgXcQ\""));
        assert!(html.contains("playlabel=\"Watch the demo\""));
        assert!(html.contains("img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg"));
        assert!(!html.contains("flex justify-center"));
    }

    #[test]
    fn test_block_embed_trailing_colons_stripped() {
        let html = YouTubeBlockRenderer.render_raw("abc123::", "").unwrap();
        assert!(html.contains("videoid=\"abc123\""));
    }

    #[test]
    fn test_block_embed_missing_id() {
        let html = YouTubeBlockRenderer.render_raw("", "").unwrap();
        assert_eq!(html, "<!-- youtube: Missing YouTube Video Id -->");
    }

    #[test]
    fn test_inline_embed_is_centered() {
        let ctx = RenderContext { includes: None };
        let html = YouTubeInlineRenderer.render("abc123", &ctx).unwrap();
        assert!(html.starts_with("<div class=\"flex justify-center\">"));
        assert!(html.contains("videoid=\"abc123\""));
        assert!(!html.contains("playlabel"));
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn test_inline_embed_empty_payload_renders_nothing() {
        let ctx = RenderContext { includes: None };
        assert_eq!(YouTubeInlineRenderer.render("", &ctx).unwrap(), "");
    }
}
