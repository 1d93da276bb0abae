//! Container registry and handler traits.
//!
//! The registry maps container names to handlers for the three extension
//! points of the pipeline:
//!
//! - **Block containers** (`:::name args` ... `:::`): wrap a body of
//!   Markdown (or capture it verbatim, see [`BlockBody::Raw`]).
//! - **Inline containers** (`::name payload::`): expand to HTML within a
//!   line.
//! - **Fenced-code renderers**: take over rendering of fenced code blocks
//!   by language tag (e.g. the `files` directory-tree renderer).
//!
//! Registration is last-write-wins, so applications can override any
//! built-in by re-registering its name. The registry is built once and then
//! shared immutably by every render pass.

use std::collections::HashMap;

use crate::error::RenderError;
use crate::renderers::{
    CalloutRenderer, CopyBoxRenderer, FilesTreeRenderer, IncludeRenderer, PreRenderer,
    YouTubeBlockRenderer, YouTubeInlineRenderer,
};

/// Source of pre-rendered include fragments.
///
/// Implemented by the page collections; the renderer only asks for the
/// preview HTML of an include path and leaves resolution rules (default
/// prefixes, slug fallbacks) to the implementor.
pub trait IncludeSource: Send + Sync {
    /// Resolve an include path (e.g., `"header.md"`) to its rendered HTML.
    fn resolve(&self, path: &str) -> Option<String>;
}

/// Per-render context handed to inline container handlers.
pub struct RenderContext<'a> {
    /// Include fragment source, if the caller provides one.
    pub includes: Option<&'a dyn IncludeSource>,
}

/// How a block container consumes its body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockBody {
    /// Body lines stay in the document and render as Markdown between the
    /// handler's start and end HTML.
    Markdown,
    /// Body lines are captured verbatim and handed to
    /// [`BlockContainer::render_raw`]; nothing inside is re-interpreted.
    Raw,
}

/// Handler for a `:::name` block container.
pub trait BlockContainer: Send + Sync {
    /// How the container body is consumed. Defaults to Markdown.
    fn body(&self) -> BlockBody {
        BlockBody::Markdown
    }

    /// HTML emitted in place of the opening fence (Markdown-body mode).
    fn start(&self, args: &str) -> Result<String, RenderError> {
        let _ = args;
        Ok(String::new())
    }

    /// HTML emitted in place of the closing fence (Markdown-body mode).
    fn end(&self) -> String {
        String::new()
    }

    /// Render the whole container from its captured body (Raw mode).
    fn render_raw(&self, args: &str, body: &str) -> Result<String, RenderError> {
        let _ = (args, body);
        Ok(String::new())
    }
}

/// Handler for a `::name payload::` inline container.
pub trait InlineContainer: Send + Sync {
    /// Render the span to HTML. `payload` is the text after the first
    /// whitespace inside the delimiters, trimmed.
    fn render(&self, payload: &str, ctx: &RenderContext<'_>) -> Result<String, RenderError>;
}

/// Handler that takes over a fenced code block by language tag.
pub trait FencedCodeRenderer: Send + Sync {
    /// Render the code block source to HTML.
    fn render(&self, source: &str) -> String;
}

/// Registry of container handlers, keyed by name.
///
/// # Example
///
/// ```ignore
/// use docsite_renderer::{ContainerRegistry, CopyBoxRenderer};
///
/// let mut registry = ContainerRegistry::with_builtins();
/// registry.remove(&["youtube"]);
/// registry.register_block("cmd", CopyBoxRenderer::shell());
/// ```
pub struct ContainerRegistry {
    blocks: HashMap<String, Box<dyn BlockContainer>>,
    inlines: HashMap<String, Box<dyn InlineContainer>>,
    code_blocks: HashMap<String, Box<dyn FencedCodeRenderer>>,
}

impl ContainerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            blocks: HashMap::new(),
            inlines: HashMap::new(),
            code_blocks: HashMap::new(),
        }
    }

    /// Create a registry pre-populated with the built-in handlers:
    /// callouts (`info`, `tip`, `warning`, `danger`), copy boxes (`copy`,
    /// `sh`), `pre`, block and inline `youtube`, inline `include`, and the
    /// `files` fenced-code renderer.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_block("copy", CopyBoxRenderer::copy());
        registry.register_block("sh", CopyBoxRenderer::shell());
        registry.register_block("tip", CalloutRenderer::new("tip"));
        registry.register_block("info", CalloutRenderer::new("info"));
        registry.register_block("warning", CalloutRenderer::new("warning"));
        registry.register_block("danger", CalloutRenderer::new("danger"));
        registry.register_block("pre", PreRenderer);
        registry.register_block("youtube", YouTubeBlockRenderer);
        registry.register_inline("include", IncludeRenderer);
        registry.register_inline("youtube", YouTubeInlineRenderer);
        registry.register_code_block("files", FilesTreeRenderer);
        registry
    }

    /// Register a block container handler. Replaces any existing handler
    /// with the same name.
    pub fn register_block(
        &mut self,
        name: impl Into<String>,
        handler: impl BlockContainer + 'static,
    ) {
        self.blocks.insert(name.into(), Box::new(handler));
    }

    /// Register an inline container handler. Replaces any existing handler
    /// with the same name.
    pub fn register_inline(
        &mut self,
        name: impl Into<String>,
        handler: impl InlineContainer + 'static,
    ) {
        self.inlines.insert(name.into(), Box::new(handler));
    }

    /// Register a fenced-code renderer by language tag. Replaces any
    /// existing handler with the same name.
    pub fn register_code_block(
        &mut self,
        name: impl Into<String>,
        handler: impl FencedCodeRenderer + 'static,
    ) {
        self.code_blocks.insert(name.into(), Box::new(handler));
    }

    /// Remove block and inline handlers by name.
    ///
    /// Unknown names are ignored, so a caller can exclude a fixed set of
    /// built-ins without caring which are present.
    pub fn remove(&mut self, names: &[&str]) {
        for name in names {
            self.blocks.remove(*name);
            self.inlines.remove(*name);
        }
    }

    /// Resolve a block container handler by name.
    #[must_use]
    pub fn block(&self, name: &str) -> Option<&dyn BlockContainer> {
        self.blocks.get(name).map(Box::as_ref)
    }

    /// Resolve an inline container handler by name.
    #[must_use]
    pub fn inline(&self, name: &str) -> Option<&dyn InlineContainer> {
        self.inlines.get(name).map(Box::as_ref)
    }

    /// Resolve a fenced-code renderer by language tag.
    #[must_use]
    pub fn code_block(&self, name: &str) -> Option<&dyn FencedCodeRenderer> {
        self.code_blocks.get(name).map(Box::as_ref)
    }
}

impl Default for ContainerRegistry {
    /// The default registry carries the built-in handlers.
    fn default() -> Self {
        Self::with_builtins()
    }
}
