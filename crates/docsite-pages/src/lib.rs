//! Document collections for markdown documentation sites.
//!
//! Builds on [`docsite_storage`] and [`docsite_renderer`]: documents are
//! read from a storage backend, their front matter decoded, their bodies
//! rendered once at load time, and the results indexed by slug.
//!
//! - [`DocumentLoader`] loads and renders a single document.
//! - [`Pages`] holds a content tree: slug lookup, draft/date visibility,
//!   sidebar navigation, `menu.json` ordering manifests, and dev-mode
//!   refresh-on-read.
//! - [`Includes`] holds shared fragments spliced into pages with
//!   `::include name.md::` spans.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use docsite_pages::{Pages, PagesConfig};
//! use docsite_storage::MockStorage;
//!
//! let storage = MockStorage::new()
//!     .with_file("docs/intro.md", "---\ntitle: Introduction\n---\n\n# Hi\n");
//! let mut pages = Pages::new(Arc::new(storage), PagesConfig::new());
//! pages.load_from("docs").unwrap();
//!
//! let page = pages.get_by_slug("intro").unwrap();
//! assert_eq!(page.title.as_deref(), Some("Introduction"));
//! assert!(page.preview.contains("Hi"));
//! ```

mod error;
mod frontmatter;
mod includes;
mod loader;
mod page;
mod pages;
mod sidebar;

pub use error::LoadError;
pub use frontmatter::strip_frontmatter;
pub use includes::{IncludeResolver, Includes};
pub use loader::DocumentLoader;
pub use page::{FeatureAvailability, Page, PageMeta};
pub use pages::{Environment, Pages, PagesConfig};
pub use sidebar::FolderMenu;
