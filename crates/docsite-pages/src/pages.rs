//! The served page collection.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use docsite_renderer::{slugify, MenuNode, Pipeline};
use docsite_storage::Storage;

use crate::error::LoadError;
use crate::includes::{IncludeResolver, Includes};
use crate::loader::DocumentLoader;
use crate::page::{Page, PageMeta};
use crate::sidebar::{self, FolderMenu};

/// Text of the renderer's placeholder for an include that didn't resolve;
/// previews containing it are re-rendered after a scan completes.
const UNRESOLVED_INCLUDE: &str = "Could not find: ";

/// Runtime environment, controlling draft visibility and refresh-on-read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Configuration for a [`Pages`] collection.
#[derive(Clone, Copy, Debug)]
pub struct PagesConfig {
    environment: Environment,
}

impl PagesConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            environment: Environment::Production,
        }
    }

    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// An indexed tree of markdown pages.
///
/// Pages load once via [`Pages::load_from`] and are then served from
/// memory; in development, [`Pages::get_by_slug`] reloads the document
/// first so edits show up without a rescan.
pub struct Pages {
    storage: Arc<dyn Storage>,
    loader: DocumentLoader,
    environment: Environment,
    includes: Option<Arc<Includes>>,
    root: String,
    pages: Vec<Page>,
    folder_menus: HashMap<String, Vec<FolderMenu>>,
    sidebars: HashMap<String, Vec<MenuNode>>,
    generation: u64,
}

impl Pages {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, config: PagesConfig) -> Self {
        Self::with_pipeline(storage, config, Pipeline::with_defaults())
    }

    #[must_use]
    pub fn with_pipeline(
        storage: Arc<dyn Storage>,
        config: PagesConfig,
        pipeline: Pipeline,
    ) -> Self {
        Self {
            storage,
            loader: DocumentLoader::new(pipeline),
            environment: config.environment,
            includes: None,
            root: String::new(),
            pages: Vec::new(),
            folder_menus: HashMap::new(),
            sidebars: HashMap::new(),
            generation: 0,
        }
    }

    /// Attach an include collection; documents loaded afterwards resolve
    /// their `::include::` spans against it.
    #[must_use]
    pub fn with_includes(mut self, includes: Arc<Includes>) -> Self {
        self.includes = Some(includes);
        self
    }

    /// Scan `root` and (re)build the collection.
    ///
    /// Replaces all previously loaded pages, folder menus, and cached
    /// sidebars. Documents that fail to load are logged and skipped; the
    /// rest of the scan continues.
    pub fn load_from(&mut self, root: &str) -> Result<(), LoadError> {
        self.pages.clear();
        self.folder_menus.clear();
        self.sidebars.clear();
        self.root = root.trim_matches('/').to_owned();

        let files = self.storage.list(&self.root)?;
        tracing::info!(root = %self.root, files = files.len(), "scanning content root");

        for file in files {
            if file.extension == "md" {
                match self.load_document(&file.virtual_path) {
                    Ok(mut page) => {
                        page.slug = self.nested_slug(&file.virtual_path, &page.slug);
                        self.pages.push(page);
                    }
                    Err(err) => {
                        tracing::error!(path = %file.virtual_path, error = %err, "couldn't load page");
                    }
                }
            } else if file.name == "menu.json" {
                self.load_folder_menu(&file.virtual_path);
            }
        }

        if self.includes.is_some() {
            self.resolve_pending_includes();
        }

        self.generation += 1;
        tracing::info!(
            pages = self.pages.len(),
            folder_menus = self.folder_menus.len(),
            "loaded content root"
        );
        Ok(())
    }

    /// Whether a page is served in the current environment.
    ///
    /// Development shows everything; production hides drafts and pages
    /// dated in the future.
    #[must_use]
    pub fn is_visible(&self, page: &Page) -> bool {
        self.environment.is_development()
            || (!page.draft && page.date.map_or(true, |date| date <= Utc::now()))
    }

    /// Visible pages, optionally restricted to a slug folder.
    ///
    /// With a `prefix`, only pages whose slug sits under `prefix/` are
    /// returned; `all_directories` includes nested folders, otherwise only
    /// direct children. Sorted by `order` (unranked first) then path.
    #[must_use]
    pub fn visible_pages(&self, prefix: Option<&str>, all_directories: bool) -> Vec<&Page> {
        let mut pages: Vec<&Page> = match prefix {
            None => self.pages.iter().filter(|p| self.is_visible(p)).collect(),
            Some(prefix) => {
                let prefix = prefix.trim_matches('/');
                let under = format!("{prefix}/");
                let depth = prefix.matches('/').count() + 1;
                self.pages
                    .iter()
                    .filter(|p| {
                        self.is_visible(p)
                            && p.slug.starts_with(&under)
                            && (all_directories || p.slug.matches('/').count() == depth)
                    })
                    .collect()
            }
        };
        pages.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.path.cmp(&b.path)));
        pages
    }

    /// Find a visible page by slug.
    ///
    /// In development the document is reloaded from storage first, so
    /// edits show up without a rescan.
    pub fn get_by_slug(&mut self, slug: &str) -> Option<&Page> {
        let slug = slug.trim_matches('/');
        let index = self
            .pages
            .iter()
            .position(|p| p.slug == slug && self.is_visible(p))?;

        if self.environment.is_development() {
            self.refresh(index);
        }
        Some(&self.pages[index])
    }

    /// Metadata projections of all visible pages.
    #[must_use]
    pub fn get_all_meta(&self) -> Vec<PageMeta> {
        self.visible_pages(None, false)
            .into_iter()
            .map(Page::to_meta)
            .collect()
    }

    /// Sidebar tree for `folder`, built on first use and cached until the
    /// next [`Pages::load_from`].
    pub fn get_sidebar(&mut self, folder: &str) -> Vec<MenuNode> {
        if let Some(cached) = self.sidebars.get(folder) {
            return cached.clone();
        }
        let built = {
            let pages = self.visible_pages(Some(folder), true);
            sidebar::build(&pages, folder, &self.folder_menus)
        };
        self.sidebars.insert(folder.to_owned(), built.clone());
        built
    }

    /// Bumped on every scan and dev-mode refresh; lets callers invalidate
    /// derived caches.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    fn load_document(&self, path: &str) -> Result<Page, LoadError> {
        match self.includes.as_deref() {
            Some(includes) => {
                let resolver = IncludeResolver::new(includes).with_pages(self);
                self.loader
                    .load_with_includes(&*self.storage, path, Some(&resolver))
            }
            None => self.loader.load(&*self.storage, path),
        }
    }

    /// Second resolution pass for includes that reference pages by slug.
    ///
    /// During the scan a document can reference a page that loads after it,
    /// so any preview still carrying the renderer's not-found placeholder is
    /// rendered again once the whole collection is indexed.
    fn resolve_pending_includes(&mut self) {
        let pending: Vec<usize> = self
            .pages
            .iter()
            .enumerate()
            .filter(|(_, page)| page.preview.contains(UNRESOLVED_INCLUDE))
            .map(|(index, _)| index)
            .collect();
        for index in pending {
            self.refresh(index);
        }
    }

    /// Replace the page at `index` with a fresh load of its source.
    fn refresh(&mut self, index: usize) {
        let path = self.pages[index].path.clone();
        match self.load_document(&path) {
            Ok(mut fresh) => {
                // The nested slug was computed at scan time; keep it.
                fresh.slug.clone_from(&self.pages[index].slug);
                self.pages[index] = fresh;
                self.generation += 1;
            }
            Err(err) => {
                tracing::warn!(path = %path, error = %err, "refresh failed, serving stale page");
            }
        }
    }

    /// Nested documents get their folder path folded into the slug, with
    /// every segment slugified.
    fn nested_slug(&self, virtual_path: &str, file_slug: &str) -> String {
        let relative = virtual_path
            .strip_prefix(&self.root)
            .unwrap_or(virtual_path)
            .trim_start_matches('/');
        match relative.rsplit_once('/') {
            Some((dirs, _)) => {
                let mut segments: Vec<String> = dirs.split('/').map(slugify).collect();
                segments.push(file_slug.to_owned());
                segments.join("/")
            }
            None => file_slug.to_owned(),
        }
    }

    fn load_folder_menu(&mut self, path: &str) {
        let folder = path
            .strip_prefix(&self.root)
            .unwrap_or(path)
            .trim_matches('/')
            .trim_end_matches("menu.json")
            .trim_matches('/')
            .to_owned();

        let json = match self.storage.read(path) {
            Ok(json) => json,
            Err(err) => {
                tracing::error!(path, error = %err, "couldn't read folder menu");
                return;
            }
        };
        match serde_json::from_str::<Vec<FolderMenu>>(&json) {
            Ok(menu) => {
                self.folder_menus.insert(folder, menu);
            }
            Err(err) => {
                tracing::error!(path, error = %err, "couldn't parse folder menu");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use docsite_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    fn production(storage: MockStorage) -> Pages {
        let mut pages = Pages::new(Arc::new(storage), PagesConfig::new());
        pages.load_from("docs").unwrap();
        pages
    }

    fn development(storage: Arc<MockStorage>) -> Pages {
        let config = PagesConfig::new().with_environment(Environment::Development);
        let mut pages = Pages::new(storage, config);
        pages.load_from("docs").unwrap();
        pages
    }

    #[test]
    fn test_nested_slugs_slugify_every_segment() {
        let pages = production(
            MockStorage::new().with_file("docs/Set Up/Install Guide.md", "hi"),
        );

        assert_eq!(pages.pages()[0].slug, "set-up/install-guide");
    }

    #[test]
    fn test_visible_pages_depth_filter() {
        let mut pages = production(
            MockStorage::new()
                .with_file("docs/setup/a.md", "a")
                .with_file("docs/setup/deep/b.md", "b")
                .with_file("docs/other/c.md", "c"),
        );

        let direct: Vec<&str> = pages
            .visible_pages(Some("setup"), false)
            .iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(direct, vec!["setup/a"]);

        let all: Vec<&str> = pages
            .visible_pages(Some("setup"), true)
            .iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(all, vec!["setup/a", "setup/deep/b"]);

        assert!(pages.get_by_slug("other/c").is_some());
    }

    #[test]
    fn test_order_ranks_before_path() {
        let pages = production(
            MockStorage::new()
                .with_file("docs/a.md", "---\norder: 2\n---\nx")
                .with_file("docs/b.md", "---\norder: 1\n---\nx")
                .with_file("docs/c.md", "x"),
        );

        let slugs: Vec<&str> = pages
            .visible_pages(None, false)
            .iter()
            .map(|p| p.slug.as_str())
            .collect();

        // Unranked first, then ascending order.
        assert_eq!(slugs, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_drafts_hidden_in_production_only() {
        let content = "---\ndraft: true\n---\nx";
        let mut prod = production(MockStorage::new().with_file("docs/wip.md", content));
        assert!(prod.get_by_slug("wip").is_none());

        let storage = Arc::new(MockStorage::new().with_file("docs/wip.md", content));
        let mut dev = development(storage);
        assert!(dev.get_by_slug("wip").is_some());
    }

    #[test]
    fn test_future_dated_page_hidden() {
        let mut pages = production(
            MockStorage::new().with_file("docs/soon.md", "---\ndate: 2999-01-01\n---\nx"),
        );

        assert!(pages.get_by_slug("soon").is_none());
        assert!(pages.visible_pages(None, false).is_empty());
    }

    #[test]
    fn test_get_by_slug_trims_slashes() {
        let mut pages = production(MockStorage::new().with_file("docs/guide.md", "x"));

        assert!(pages.get_by_slug("/guide/").is_some());
    }

    #[test]
    fn test_slug_collision_first_loaded_wins() {
        let mut pages = production(
            MockStorage::new()
                .with_file("docs/a b.md", "first")
                .with_file("docs/a-b.md", "second"),
        );

        // Both files map to the slug "a-b"; lookup returns the first in
        // path order and the later one stays shadowed.
        let page = pages.get_by_slug("a-b").unwrap();
        assert_eq!(page.path, "docs/a b.md");
        assert_eq!(pages.pages().len(), 2);
    }

    #[test]
    fn test_development_refresh_rereads_storage() {
        let storage = Arc::new(MockStorage::new().with_file("docs/live.md", "old text"));
        let mut pages = development(Arc::clone(&storage));
        let before = pages.generation();

        storage.update_file("docs/live.md", "new text");

        let page = pages.get_by_slug("live").unwrap();
        assert!(page.preview.contains("new text"));
        assert!(pages.generation() > before);
    }

    #[test]
    fn test_production_serves_from_index() {
        let storage = Arc::new(MockStorage::new().with_file("docs/live.md", "old text"));
        let mut pages = Pages::new(
            Arc::clone(&storage) as Arc<dyn Storage>,
            PagesConfig::new(),
        );
        pages.load_from("docs").unwrap();
        let before = pages.generation();

        storage.update_file("docs/live.md", "new text");

        let page = pages.get_by_slug("live").unwrap();
        assert!(page.preview.contains("old text"));
        assert_eq!(pages.generation(), before);
    }

    #[test]
    fn test_broken_document_skipped() {
        use docsite_renderer::{CalloutRenderer, ContainerRegistry, PipelineConfig};

        let mut registry = ContainerRegistry::with_builtins();
        registry.register_block("note", CalloutRenderer::new("note"));
        let pipeline = Pipeline::new(PipelineConfig::new(registry));

        let storage = MockStorage::new()
            .with_file("docs/bad.md", ":::note\nx\n:::")
            .with_file("docs/good.md", "fine");
        let mut pages = Pages::with_pipeline(Arc::new(storage), PagesConfig::new(), pipeline);
        pages.load_from("docs").unwrap();

        let slugs: Vec<&str> = pages.pages().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["good"]);
    }

    #[test]
    fn test_folder_menu_loaded_and_bad_json_contained() {
        let pages = production(
            MockStorage::new()
                .with_file("docs/setup/a.md", "x")
                .with_file("docs/setup/menu.json", r#"[{"PageName":"a.md"}]"#)
                .with_file("docs/other/menu.json", "not json")
                .with_file("docs/other/b.md", "x"),
        );

        assert_eq!(pages.folder_menus.len(), 1);
        assert!(pages.folder_menus.contains_key("setup"));
        assert_eq!(pages.pages().len(), 2);
    }

    #[test]
    fn test_sidebar_cached_until_rescan() {
        let storage = Arc::new(
            MockStorage::new().with_file("docs/setup/a.md", "---\ntitle: Alpha\n---\nx"),
        );
        let mut pages = Pages::new(
            Arc::clone(&storage) as Arc<dyn Storage>,
            PagesConfig::new(),
        );
        pages.load_from("docs").unwrap();

        let first = pages.get_sidebar("setup");
        assert_eq!(first.len(), 1);

        storage.update_file("docs/setup/b.md", "---\ntitle: Beta\n---\nx");

        // Cached; the new file is invisible until the next scan.
        assert_eq!(pages.get_sidebar("setup").len(), 1);

        pages.load_from("docs").unwrap();
        assert_eq!(pages.get_sidebar("setup").len(), 2);
    }

    #[test]
    fn test_get_all_meta() {
        let pages = production(
            MockStorage::new()
                .with_file("docs/a.md", "---\ntitle: Alpha\n---\nbody")
                .with_file("docs/b.md", "---\ndraft: true\n---\nbody"),
        );

        let meta = pages.get_all_meta();

        assert_eq!(meta.len(), 1);
        assert_eq!(meta[0].url, "/a");
        assert_eq!(meta[0].title.as_deref(), Some("Alpha"));
    }

    fn empty_includes() -> Arc<Includes> {
        let mut includes = Includes::new(Arc::new(MockStorage::new()));
        includes.load_from("_includes").unwrap();
        Arc::new(includes)
    }

    #[test]
    fn test_rooted_include_falls_back_to_page_slugs() {
        let storage = MockStorage::new()
            .with_file("docs/setup/a.md", "shared body\n")
            .with_file("docs/setup/z.md", "::include /setup/a.md::\n");
        let mut pages =
            Pages::new(Arc::new(storage), PagesConfig::new()).with_includes(empty_includes());
        pages.load_from("docs").unwrap();

        let page = pages.get_by_slug("setup/z").unwrap();
        assert!(page.preview.contains("shared body"));
        assert!(!page.preview.contains("Could not find"));
    }

    #[test]
    fn test_include_fallback_resolves_forward_references() {
        // a.md loads before zeta/b.md exists in the index; the post-scan
        // pass re-renders it against the full collection.
        let storage = MockStorage::new()
            .with_file("docs/a.md", "::include /zeta/b.md::\n")
            .with_file("docs/zeta/b.md", "shared body\n");
        let mut pages =
            Pages::new(Arc::new(storage), PagesConfig::new()).with_includes(empty_includes());
        pages.load_from("docs").unwrap();

        let page = pages.get_by_slug("a").unwrap();
        assert!(page.preview.contains("shared body"));
        assert!(!page.preview.contains("Could not find"));
    }

    #[test]
    fn test_truly_missing_include_keeps_placeholder() {
        let storage = MockStorage::new().with_file("docs/a.md", "::include /nope/x.md::\n");
        let mut pages =
            Pages::new(Arc::new(storage), PagesConfig::new()).with_includes(empty_includes());
        pages.load_from("docs").unwrap();

        let page = pages.get_by_slug("a").unwrap();
        assert!(page.preview.contains("Could not find: /nope/x.md"));
    }

    #[test]
    fn test_includes_resolved_while_loading() {
        let include_storage =
            Arc::new(MockStorage::new().with_file("_includes/header.md", "**Shared**"));
        let mut includes = Includes::new(include_storage);
        includes.load_from("_includes").unwrap();

        let storage = MockStorage::new()
            .with_file("docs/a.md", "intro\n\n::include header.md::\n");
        let mut pages = Pages::new(Arc::new(storage), PagesConfig::new())
            .with_includes(Arc::new(includes));
        pages.load_from("docs").unwrap();

        let page = pages.get_by_slug("a").unwrap();
        assert!(page.preview.contains("<strong>Shared</strong>"));
    }
}
