//! The loaded document model.

use chrono::{DateTime, Utc};
use docsite_renderer::MenuNode;
use serde::{Deserialize, Serialize};

/// Average reading speed used by [`Page::minutes_to_read`].
const WORDS_PER_MINUTE: usize = 225;

/// Characters that separate words when counting them.
const WORD_BOUNDARIES: [char; 8] = [' ', '.', '?', '!', '(', ')', '[', ']'];

/// Hosting availability notes attached to a page via front matter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureAvailability {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_hosted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_hosted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A markdown document loaded from storage: decoded front matter, the raw
/// content, and the pre-rendered preview with its heading map.
///
/// `slug` starts as the slugified file stem; collections fold the folder
/// path into it for nested documents.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Page {
    /// Virtual path of the source file.
    pub path: String,
    /// Url-safe identity, unique per collection in a well-formed tree.
    pub slug: String,
    /// File name including extension.
    pub file_name: String,
    pub layout: Option<String>,
    pub draft: bool,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub author: Option<String>,
    pub tags: Vec<String>,
    /// Front matter date, or the file modification time when absent.
    pub date: Option<DateTime<Utc>>,
    pub group: Option<String>,
    /// Manual sort rank within listings; unranked pages sort first.
    pub order: Option<i32>,
    /// Overrides `title` as the sidebar entry text.
    pub sidebar_label: Option<String>,
    pub menu_icon: Option<String>,
    /// Raw markdown, front matter included.
    pub content: String,
    /// Pre-rendered HTML of the document body.
    pub preview: String,
    pub word_count: usize,
    pub line_count: usize,
    /// Two-level heading navigation extracted during rendering.
    pub document_map: Vec<MenuNode>,
    pub feature_availability: Option<FeatureAvailability>,
}

impl Page {
    /// Estimated reading time in whole minutes.
    #[must_use]
    pub fn minutes_to_read(&self) -> usize {
        self.word_count.div_ceil(WORDS_PER_MINUTE)
    }

    /// Lightweight projection for feeds and client-side indexes.
    #[must_use]
    pub fn to_meta(&self) -> PageMeta {
        PageMeta {
            slug: self.slug.clone(),
            title: self.title.clone(),
            summary: self.summary.clone(),
            date: self.date,
            tags: self.tags.clone(),
            author: self.author.clone(),
            image: self.image.clone(),
            word_count: self.word_count,
            line_count: self.line_count,
            url: format!("/{}", self.slug),
            group: self.group.clone(),
            order: self.order,
        }
    }
}

/// Page metadata without content or rendered HTML.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageMeta {
    pub slug: String,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub author: Option<String>,
    pub image: Option<String>,
    pub word_count: usize,
    pub line_count: usize,
    /// Site-absolute url, `/{slug}`.
    pub url: String,
    pub group: Option<String>,
    pub order: Option<i32>,
}

/// Count words separated by spaces and common punctuation.
pub(crate) fn word_count(content: &str) -> usize {
    content
        .split(&WORD_BOUNDARIES[..])
        .filter(|word| !word.is_empty())
        .count()
}

pub(crate) fn line_count(content: &str) -> usize {
    content.matches('\n').count()
}
