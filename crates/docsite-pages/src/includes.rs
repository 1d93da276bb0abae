//! Shared document fragments.
//!
//! Includes are markdown documents kept outside the served page tree
//! (conventionally under `_includes/`) and spliced into pages with
//! `::include name.md::` spans. They load as their own collection so their
//! pre-rendered previews are ready when the main pages render.

use std::sync::Arc;

use docsite_renderer::{IncludeSource, Pipeline};
use docsite_storage::Storage;

use crate::error::LoadError;
use crate::loader::DocumentLoader;
use crate::page::Page;
use crate::pages::Pages;

/// A collection of include documents.
pub struct Includes {
    storage: Arc<dyn Storage>,
    loader: DocumentLoader,
    root: String,
    pages: Vec<Page>,
}

impl Includes {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_pipeline(storage, Pipeline::with_defaults())
    }

    #[must_use]
    pub fn with_pipeline(storage: Arc<dyn Storage>, pipeline: Pipeline) -> Self {
        Self {
            storage,
            loader: DocumentLoader::new(pipeline),
            root: String::new(),
            pages: Vec::new(),
        }
    }

    /// Scan `root` and (re)build the collection.
    ///
    /// Include previews render without include resolution of their own, so
    /// an include nested inside another include shows its placeholder.
    /// Unlike served pages, nested include slugs keep their folder segments
    /// as written.
    pub fn load_from(&mut self, root: &str) -> Result<(), LoadError> {
        self.pages.clear();
        self.root = root.trim_matches('/').to_owned();

        let files = self.storage.list(&self.root)?;
        for file in files {
            if file.extension != "md" {
                continue;
            }
            match self.loader.load(&*self.storage, &file.virtual_path) {
                Ok(mut page) => {
                    let relative = file
                        .virtual_path
                        .strip_prefix(&self.root)
                        .unwrap_or(&file.virtual_path)
                        .trim_start_matches('/');
                    if let Some((dirs, _)) = relative.rsplit_once('/') {
                        page.slug = format!("{dirs}/{}", page.slug);
                    }
                    self.pages.push(page);
                }
                Err(err) => {
                    tracing::error!(path = %file.virtual_path, error = %err, "couldn't load include");
                }
            }
        }
        tracing::info!(root = %self.root, includes = self.pages.len(), "loaded includes");
        Ok(())
    }

    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Find an include by its full virtual path.
    #[must_use]
    pub fn find_by_path(&self, path: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.path == path)
    }
}

/// Resolves `::include name.md::` spans against loaded collections.
///
/// A bare path defaults under `_includes/`; a leading `/` escapes to the
/// storage root. When the exact path misses and a page collection is
/// attached, visible pages are searched by slug as a fallback.
pub struct IncludeResolver<'a> {
    includes: &'a Includes,
    pages: Option<&'a Pages>,
}

impl<'a> IncludeResolver<'a> {
    #[must_use]
    pub fn new(includes: &'a Includes) -> Self {
        Self {
            includes,
            pages: None,
        }
    }

    /// Also search `pages` by slug when the include path has no exact match.
    #[must_use]
    pub fn with_pages(mut self, pages: &'a Pages) -> Self {
        self.pages = Some(pages);
        self
    }
}

impl IncludeSource for IncludeResolver<'_> {
    fn resolve(&self, path: &str) -> Option<String> {
        let normalized = if path.starts_with('/') {
            path.trim_start_matches('/').to_owned()
        } else {
            format!("_includes/{path}")
        };

        if let Some(page) = self.includes.find_by_path(&normalized) {
            return Some(page.preview.clone());
        }

        let pages = self.pages?;
        let prefix = normalized.split('/').next()?;
        let slug = normalized.split('.').next()?;
        pages
            .visible_pages(Some(prefix), true)
            .into_iter()
            .find(|p| p.slug == slug)
            .map(|p| p.preview.clone())
    }
}
