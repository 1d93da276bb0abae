//! The markdown rendering pipeline.

use pulldown_cmark::{Options, Parser};

use crate::container::processor::ContainerProcessor;
use crate::document_map::build_document_map;
use crate::error::RenderError;
use crate::menu::MenuNode;
use crate::registry::{ContainerRegistry, IncludeSource};
use crate::renderer::EventRenderer;

/// Result of rendering a document.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Two-level heading navigation extracted during rendering.
    pub document_map: Vec<MenuNode>,
    /// Non-fatal problems found along the way (stray or missing container
    /// fences).
    pub warnings: Vec<String>,
}

/// Pipeline configuration: the container registry plus parsing options.
pub struct PipelineConfig {
    registry: ContainerRegistry,
    gfm: bool,
    inline_delimiter: Option<char>,
}

impl PipelineConfig {
    #[must_use]
    pub fn new(registry: ContainerRegistry) -> Self {
        Self {
            registry,
            gfm: true,
            inline_delimiter: None,
        }
    }

    /// Enable or disable GitHub Flavored Markdown features (tables,
    /// strikethrough, task lists). Enabled by default.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Install the inline container delimiter character.
    ///
    /// The first installation wins; later calls are no-ops. The pipeline
    /// installs `':'` itself, so calling this before building the pipeline
    /// is the way to choose a different delimiter.
    pub fn install_inline_delimiter(&mut self, delimiter: char) {
        if self.inline_delimiter.is_none() {
            self.inline_delimiter = Some(delimiter);
        }
    }
}

/// Renders markdown documents with container extensions.
///
/// ```
/// use docsite_renderer::Pipeline;
///
/// let pipeline = Pipeline::with_defaults();
/// let result = pipeline.render(":::tip\nUse the CLI.\n:::").unwrap();
/// assert!(result.html.contains(">TIP</span>"));
/// ```
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    #[must_use]
    pub fn new(mut config: PipelineConfig) -> Self {
        config.install_inline_delimiter(':');
        Self { config }
    }

    /// Pipeline with the built-in container registry and GFM enabled.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(PipelineConfig::new(ContainerRegistry::with_builtins()))
    }

    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.config.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render a document without include resolution.
    ///
    /// Includes referenced by the document render as visible "Could not
    /// find" placeholders; use [`Pipeline::render_with_includes`] to
    /// resolve them.
    pub fn render(&self, markdown: &str) -> Result<RenderResult, RenderError> {
        self.render_with_includes(markdown, None)
    }

    /// Render a document, resolving `::include path.md::` spans against
    /// `includes`.
    pub fn render_with_includes(
        &self,
        markdown: &str,
        includes: Option<&dyn IncludeSource>,
    ) -> Result<RenderResult, RenderError> {
        let processed = ContainerProcessor::new(
            &self.config.registry,
            self.config.inline_delimiter,
            includes,
        )
        .process(markdown)?;

        let events: Vec<_> = Parser::new_ext(&processed.text, self.parser_options()).collect();
        let document_map = build_document_map(&events);
        let html = EventRenderer::new(&self.config.registry).render(events);

        Ok(RenderResult {
            html,
            document_map,
            warnings: processed.warnings,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}
