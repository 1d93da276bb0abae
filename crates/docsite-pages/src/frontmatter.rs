//! Front matter extraction and decoding.
//!
//! Front matter is a `---` fenced block of `key: value` lines at the top of
//! a document. Values are loosely typed strings; the handful of keys the
//! page model gives a richer type (`draft`, `order`, `tags`, and the
//! `feature_availability` sub-block) are coerced before decoding the whole
//! map through serde.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::page::FeatureAvailability;

/// Keys recognised inside a `feature_availability:` sub-block.
const FEATURE_KEYS: [&str; 3] = ["self_hosted", "cloud_hosted", "notes"];

/// Decoded front matter. Every field is optional; a document without a
/// front matter block decodes to the default.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct FrontMatter {
    pub layout: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub author: Option<String>,
    pub draft: bool,
    pub date: Option<String>,
    pub group: Option<String>,
    pub order: Option<i32>,
    pub sidebar_label: Option<String>,
    pub menu_icon: Option<String>,
    pub tags: Vec<String>,
    pub feature_availability: Option<FeatureAvailability>,
}

/// Split a document into its decoded front matter and body.
///
/// A document opens a front matter block only when its very first line is
/// `---`; anything else decodes to the default front matter with the whole
/// input as body. An unterminated block is treated the same way.
pub(crate) fn extract(content: &str) -> Result<(FrontMatter, &str), String> {
    let Some((block, body)) = front_matter_block(content) else {
        return Ok((FrontMatter::default(), content));
    };
    Ok((decode(block)?, body))
}

/// Drop a leading front matter block, returning the trimmed remainder.
///
/// Content without both fence markers is returned unchanged. Used when the
/// raw markdown is served to clients that do their own rendering.
#[must_use]
pub fn strip_frontmatter(content: &str) -> &str {
    let Some(start) = content.find("---") else {
        return content;
    };
    let Some(end) = content[start + 3..].find("---") else {
        return content;
    };
    content[start + 3 + end + 3..].trim()
}

fn front_matter_block(content: &str) -> Option<(&str, &str)> {
    let first_line_end = content.find('\n')?;
    if content[..first_line_end].trim_end() != "---" {
        return None;
    }

    let inner_start = first_line_end + 1;
    let mut pos = inner_start;
    for line in content[inner_start..].split_inclusive('\n') {
        if line.trim() == "---" {
            return Some((&content[inner_start..pos], &content[pos + line.len()..]));
        }
        pos += line.len();
    }
    None
}

fn decode(block: &str) -> Result<FrontMatter, String> {
    let mut map = Map::new();
    let mut features = Map::new();
    let mut in_features = false;

    for line in block.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() {
            continue;
        }

        if key == "feature_availability" {
            in_features = true;
            continue;
        }
        if in_features && FEATURE_KEYS.contains(&key) {
            features.insert(key.to_owned(), Value::String(unquote(value).to_owned()));
            continue;
        }

        let coerced = match key {
            "draft" => Value::Bool(value.eq_ignore_ascii_case("true")),
            "order" => match value.parse::<i64>() {
                Ok(n) => Value::Number(n.into()),
                Err(_) => continue,
            },
            "tags" => Value::Array(parse_tags(value)),
            _ => Value::String(unquote(value).to_owned()),
        };
        map.insert(key.to_owned(), coerced);
    }

    if !features.is_empty() {
        map.insert("feature_availability".to_owned(), Value::Object(features));
    }

    serde_json::from_value(Value::Object(map)).map_err(|err| err.to_string())
}

/// Tags are either a bracketed list (`[a, b]`) or a bare comma list.
fn parse_tags(value: &str) -> Vec<Value> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);
    inner
        .split(',')
        .map(|tag| unquote(tag.trim()))
        .filter(|tag| !tag.is_empty())
        .map(|tag| Value::String(tag.to_owned()))
        .collect()
}

fn unquote(value: &str) -> &str {
    let quoted = value.len() >= 2
        && (value.starts_with('"') && value.ends_with('"')
            || value.starts_with('\'') && value.ends_with('\''));
    if quoted {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
