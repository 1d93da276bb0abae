//! HTML escaping and heading slug helpers.

use std::borrow::Cow;
use std::collections::HashMap;

/// Escape text for safe inclusion in HTML content or attribute values.
///
/// Returns the input unchanged (borrowed) when no escaping is needed.
#[must_use]
pub fn escape_html(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Turn arbitrary text into a URL-safe slug.
///
/// Lowercases, keeps alphanumerics, and collapses everything else into
/// single hyphens. Leading and trailing separators are dropped, so the
/// function is idempotent: `slugify(slugify(x)) == slugify(x)`.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            for lc in c.to_lowercase() {
                slug.push(lc);
            }
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Deduplicating heading id generator.
///
/// Repeated heading texts get a numeric suffix (`setup`, `setup-1`, ...).
/// Two generators seeded over the same heading sequence produce identical
/// ids, which is what keeps document-map links and rendered heading ids in
/// agreement across passes.
#[derive(Debug, Default)]
pub(crate) struct SlugGenerator {
    seen: HashMap<String, usize>,
}

impl SlugGenerator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn generate(&mut self, text: &str) -> String {
        let base = slugify(text);
        let count = self.seen.entry(base.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            base
        } else {
            format!("{base}-{}", *count - 1)
        }
    }
}
