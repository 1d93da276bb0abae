//! Built-in container renderers.

mod callout;
mod copy;
mod files;
mod include;
mod pre;
mod youtube;

pub use callout::CalloutRenderer;
pub use copy::CopyBoxRenderer;
pub use files::FilesTreeRenderer;
pub use include::IncludeRenderer;
pub use pre::PreRenderer;
pub use youtube::{YouTubeBlockRenderer, YouTubeInlineRenderer};
