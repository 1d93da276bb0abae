//! Line-by-line container processor.

use crate::container::fence::FenceTracker;
use crate::container::parser::{find_inline_span, parse_block_line, BlockLine};
use crate::error::RenderError;
use crate::html::escape_html;
use crate::registry::{BlockBody, ContainerRegistry, IncludeSource, RenderContext};

/// Output of a preprocessing pass.
#[derive(Debug)]
pub(crate) struct Processed {
    /// Source with container syntax replaced by HTML.
    pub text: String,
    /// Non-fatal problems found along the way (stray or missing fences).
    pub warnings: Vec<String>,
}

/// Open block container awaiting its closing fence.
struct OpenBlock {
    name: String,
    open_len: usize,
}

/// Raw-body container currently capturing lines verbatim.
struct RawCapture {
    name: String,
    args: String,
    open_len: usize,
    body: Vec<String>,
}

/// Single-pass container preprocessor.
///
/// Consumes the source line by line and rewrites container syntax into the
/// HTML produced by the registered handlers. A fresh processor is built for
/// every render; all state here is per-document.
pub(crate) struct ContainerProcessor<'a> {
    registry: &'a ContainerRegistry,
    delimiter: Option<char>,
    includes: Option<&'a dyn IncludeSource>,
    fence: FenceTracker,
    stack: Vec<OpenBlock>,
    raw: Option<RawCapture>,
    out: String,
    warnings: Vec<String>,
}

impl<'a> ContainerProcessor<'a> {
    pub(crate) fn new(
        registry: &'a ContainerRegistry,
        delimiter: Option<char>,
        includes: Option<&'a dyn IncludeSource>,
    ) -> Self {
        Self {
            registry,
            delimiter,
            includes,
            fence: FenceTracker::new(),
            stack: Vec::new(),
            raw: None,
            out: String::new(),
            warnings: Vec::new(),
        }
    }

    /// Run the preprocessing pass over `source`.
    pub(crate) fn process(mut self, source: &str) -> Result<Processed, RenderError> {
        for (index, line) in source.lines().enumerate() {
            self.process_line(index + 1, line)?;
        }
        self.finish()?;

        Ok(Processed {
            text: self.out,
            warnings: self.warnings,
        })
    }

    fn process_line(&mut self, line_no: usize, line: &str) -> Result<(), RenderError> {
        // Raw captures swallow everything until their closing fence,
        // including code fences and nested container syntax.
        if self.raw.is_some() {
            let closes = match parse_block_line(line) {
                Some(BlockLine::Close { len }) => {
                    self.raw.as_ref().is_some_and(|c| len >= c.open_len)
                }
                _ => false,
            };
            if closes {
                if let Some(capture) = self.raw.take() {
                    let html = self.render_raw(&capture)?;
                    self.out.push_str(&html);
                    self.out.push('\n');
                }
            } else if let Some(capture) = self.raw.as_mut() {
                capture.body.push(line.to_owned());
            }
            return Ok(());
        }

        let fence_marker = self.fence.update(line);
        if fence_marker || self.fence.in_fence() {
            self.out.push_str(line);
            self.out.push('\n');
            return Ok(());
        }

        match parse_block_line(line) {
            Some(BlockLine::Close { len }) => {
                let closes_top = self
                    .stack
                    .last()
                    .is_some_and(|open| len >= open.open_len);
                if closes_top {
                    if let Some(open) = self.stack.pop() {
                        self.out.push('\n');
                        self.out.push_str(&self.block_end(&open.name));
                        self.out.push('\n');
                    }
                } else {
                    self.warnings
                        .push(format!("unmatched container close at line {line_no}"));
                    self.out.push_str(line);
                    self.out.push('\n');
                }
            }
            Some(BlockLine::Open { name, args, len }) => {
                match self.registry.block(name) {
                    Some(handler) if handler.body() == BlockBody::Raw => {
                        self.raw = Some(RawCapture {
                            name: name.to_owned(),
                            args: args.to_owned(),
                            open_len: len,
                            body: Vec::new(),
                        });
                    }
                    Some(handler) => {
                        let start = handler.start(args)?;
                        self.out.push_str(&start);
                        // Blank line after the opening HTML so the body
                        // parses as block-level Markdown.
                        self.out.push_str("\n\n");
                        self.stack.push(OpenBlock {
                            name: name.to_owned(),
                            open_len: len,
                        });
                    }
                    // Unregistered names fall through to a plain div that
                    // keeps the fence's attributes; the body still renders
                    // as Markdown.
                    None => {
                        let class = if args.is_empty() {
                            name.to_owned()
                        } else {
                            format!("{name} {args}")
                        };
                        self.out
                            .push_str(&format!(r#"<div class="{}">"#, escape_html(&class)));
                        self.out.push_str("\n\n");
                        self.stack.push(OpenBlock {
                            name: name.to_owned(),
                            open_len: len,
                        });
                    }
                }
            }
            None => {
                self.process_inline(line)?;
                self.out.push('\n');
            }
        }

        Ok(())
    }

    /// Rewrite inline container spans in an ordinary line.
    fn process_inline(&mut self, line: &str) -> Result<(), RenderError> {
        let Some(delim) = self.delimiter else {
            self.out.push_str(line);
            return Ok(());
        };

        let ctx = RenderContext {
            includes: self.includes,
        };
        let mut rest = line;
        while let Some(span) = find_inline_span(rest, delim) {
            self.out.push_str(&rest[..span.start]);
            match self.registry.inline(span.name) {
                Some(handler) => {
                    let html = handler.render(span.payload, &ctx)?;
                    self.out.push_str(&html);
                }
                None => {
                    // Unregistered names pass through as their span text
                    // without the delimiters.
                    let width = 2 * delim.len_utf8();
                    self.out.push_str(&rest[span.start + width..span.end - width]);
                }
            }
            rest = &rest[span.end..];
        }
        self.out.push_str(rest);

        Ok(())
    }

    /// Closing HTML for a block container, `</div>` for the passthrough
    /// default.
    fn block_end(&self, name: &str) -> String {
        match self.registry.block(name) {
            Some(handler) => handler.end(),
            None => "</div>".to_owned(),
        }
    }

    fn render_raw(&self, capture: &RawCapture) -> Result<String, RenderError> {
        let body = if capture.body.is_empty() {
            String::new()
        } else {
            let mut joined = capture.body.join("\n");
            joined.push('\n');
            joined
        };

        match self.registry.block(&capture.name) {
            Some(handler) => handler.render_raw(&capture.args, &body),
            None => Ok(String::new()),
        }
    }

    /// Close out anything still open at end of input.
    fn finish(&mut self) -> Result<(), RenderError> {
        if let Some(capture) = self.raw.take() {
            self.warnings
                .push(format!("unclosed container: {}", capture.name));
            let html = self.render_raw(&capture)?;
            self.out.push_str(&html);
            self.out.push('\n');
        }

        while let Some(open) = self.stack.pop() {
            self.warnings
                .push(format!("unclosed container: {}", open.name));
            self.out.push('\n');
            self.out.push_str(&self.block_end(&open.name));
            self.out.push('\n');
        }

        Ok(())
    }
}
