//! Loading a single document from storage.

use chrono::{DateTime, NaiveDate, Utc};
use docsite_renderer::{slugify, IncludeSource, Pipeline};
use docsite_storage::{FileEntry, Storage};

use crate::error::LoadError;
use crate::frontmatter;
use crate::page::{self, Page};

/// Loads and renders individual markdown documents.
///
/// The loader owns the rendering pipeline; collections share one loader so
/// every document in a tree renders with the same container registry.
pub struct DocumentLoader {
    pipeline: Pipeline,
}

impl DocumentLoader {
    #[must_use]
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// Load `path` from `storage` without include resolution.
    pub fn load(&self, storage: &dyn Storage, path: &str) -> Result<Page, LoadError> {
        self.load_with_includes(storage, path, None)
    }

    /// Load `path`, resolving `::include name.md::` spans through `includes`.
    pub fn load_with_includes(
        &self,
        storage: &dyn Storage,
        path: &str,
        includes: Option<&dyn IncludeSource>,
    ) -> Result<Page, LoadError> {
        let content = storage.read(path)?;
        let entry = FileEntry::from_virtual_path(path);

        let (front_matter, body) =
            frontmatter::extract(&content).map_err(|message| LoadError::FrontMatter {
                path: path.to_owned(),
                message,
            })?;

        let rendered = self
            .pipeline
            .render_with_includes(body, includes)
            .map_err(|source| LoadError::Render {
                path: path.to_owned(),
                source,
            })?;
        for warning in &rendered.warnings {
            tracing::warn!(path, warning = %warning, "render warning");
        }

        let date = front_matter
            .date
            .as_deref()
            .and_then(parse_date)
            .or_else(|| storage.mtime(path).ok().and_then(timestamp_to_datetime));

        let slug = slugify(entry.stem());
        let title = front_matter.title.or_else(|| Some(entry.name.clone()));

        Ok(Page {
            path: path.to_owned(),
            slug,
            file_name: entry.name,
            layout: front_matter.layout,
            draft: front_matter.draft,
            title,
            summary: front_matter.summary,
            image: front_matter.image,
            author: front_matter.author,
            tags: front_matter.tags,
            date,
            group: front_matter.group,
            order: front_matter.order,
            sidebar_label: front_matter.sidebar_label,
            menu_icon: front_matter.menu_icon,
            word_count: page::word_count(&content),
            line_count: page::line_count(&content),
            content,
            preview: rendered.html,
            document_map: rendered.document_map,
            feature_availability: front_matter.feature_availability,
        })
    }
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new(Pipeline::with_defaults())
    }
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

#[allow(clippy::cast_possible_truncation)]
fn timestamp_to_datetime(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() || secs < 0.0 {
        return None;
    }
    DateTime::from_timestamp(secs as i64, 0)
}
