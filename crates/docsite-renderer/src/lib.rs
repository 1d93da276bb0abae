//! Markdown rendering pipeline for documentation sites.
//!
//! Extends `CommonMark` with the container syntax used across the docs:
//!
//! - **Block containers**: `:::kind args` ... `:::` fences for callouts,
//!   copy boxes, verbatim `pre` blocks, and video embeds. Most bodies
//!   render as Markdown; some (like `pre`) capture their body verbatim.
//! - **Inline containers**: `::name payload::` spans, used for document
//!   includes and inline video embeds.
//! - **Fenced-code renderers**: language-tagged code blocks with custom
//!   rendering, such as the ` ```files ` directory-tree view.
//!
//! Container syntax is resolved by a line-oriented preprocessor before the
//! Markdown parser runs, so handlers receive plain strings and emit plain
//! HTML. Handlers live in a [`ContainerRegistry`]; registration is
//! last-write-wins and applications can remove or override any built-in.
//!
//! # Example
//!
//! ```
//! use docsite_renderer::{ContainerRegistry, Pipeline, PipelineConfig};
//!
//! let mut registry = ContainerRegistry::with_builtins();
//! registry.remove(&["youtube"]);
//!
//! let pipeline = Pipeline::new(PipelineConfig::new(registry));
//! let result = pipeline.render("## Install\n\n:::tip\nUse stable.\n:::").unwrap();
//!
//! assert!(result.html.contains(r#"<h2 id="install""#));
//! assert_eq!(result.document_map[0].text, "Install");
//! ```

mod container;
mod document_map;
mod error;
mod html;
mod menu;
mod pipeline;
mod registry;
mod renderer;
mod renderers;
mod state;

pub use error::RenderError;
pub use html::{escape_html, slugify};
pub use menu::MenuNode;
pub use pipeline::{Pipeline, PipelineConfig, RenderResult};
pub use registry::{
    BlockBody, BlockContainer, ContainerRegistry, FencedCodeRenderer, IncludeSource,
    InlineContainer, RenderContext,
};
pub use renderers::{
    CalloutRenderer, CopyBoxRenderer, FilesTreeRenderer, IncludeRenderer, PreRenderer,
    YouTubeBlockRenderer, YouTubeInlineRenderer,
};
