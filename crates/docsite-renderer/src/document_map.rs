//! Heading map extraction.
//!
//! Builds the two-level navigation tree for a document: `h2` headings at
//! the top level with their following `h3` headings nested beneath.

use pulldown_cmark::{Event, Tag, TagEnd};

use crate::html::SlugGenerator;
use crate::menu::MenuNode;
use crate::state::heading_level_to_num;

/// Collect the document map from a parsed event stream.
///
/// Every heading feeds the slug generator, including levels the map
/// ignores, so the fragment links here match the ids the renderer writes.
pub(crate) fn build_document_map(events: &[Event<'_>]) -> Vec<MenuNode> {
    let mut map: Vec<MenuNode> = Vec::new();
    let mut slugs = SlugGenerator::new();
    let mut current: Option<(u8, String)> = None;

    for event in events {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some((heading_level_to_num(*level), String::new()));
            }
            Event::Text(text) => {
                if let Some((_, buffer)) = current.as_mut() {
                    buffer.push_str(text);
                }
            }
            Event::Code(code) => {
                if let Some((_, buffer)) = current.as_mut() {
                    buffer.push_str(code);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, text)) = current.take() {
                    let id = slugs.generate(&text);
                    match level {
                        2 => map.push(MenuNode::heading(text, id)),
                        3 => {
                            // An h3 before any h2 has no parent and is
                            // dropped from the map.
                            if let Some(parent) = map.last_mut() {
                                parent
                                    .children
                                    .get_or_insert_with(Vec::new)
                                    .push(MenuNode::heading(text, id));
                            }
                        }
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    map
}
