//! Directory tree rendering for ` ```files ` code blocks.
//!
//! The block body is an indented listing where directories start with `/`
//! and indentation (two spaces per level) expresses nesting:
//!
//! ```text
//! /src
//!   main.rs
//! README.md
//! ```

use crate::html::escape_html;
use crate::registry::FencedCodeRenderer;

const CHEVRON_ICON: &str = r#"<svg class="mr-1 text-slate-600 inline-block select-none align-text-bottom overflow-visible" aria-hidden="true" focusable="false" role="img" viewBox="0 0 12 12" width="12" height="12" fill="currentColor"><path d="M6 8.825c-.2 0-.4-.1-.5-.2l-3.3-3.3c-.3-.3-.3-.8 0-1.1.3-.3.8-.3 1.1 0l2.7 2.7 2.7-2.7c.3-.3.8-.3 1.1 0 .3.3.3.8 0 1.1l-3.2 3.2c-.2.2-.4.3-.6.3Z"></path></svg>"#;

const FOLDER_ICON: &str = r#"<svg class="mr-1 text-sky-500" aria-hidden="true" focusable="false" role="img" viewBox="0 0 16 16" width="16" height="16" fill="currentColor"><path d="M.513 1.513A1.75 1.75 0 0 1 1.75 1h3.5c.55 0 1.07.26 1.4.7l.9 1.2a.25.25 0 0 0 .2.1H13a1 1 0 0 1 1 1v.5H2.75a.75.75 0 0 0 0 1.5h11.978a1 1 0 0 1 .994 1.117L15 13.25A1.75 1.75 0 0 1 13.25 15H1.75A1.75 1.75 0 0 1 0 13.25V2.75c0-.464.184-.91.513-1.237Z"></path></svg>"#;

const FILE_ICON: &str = r#"<svg class="mr-1 text-slate-600 inline-block select-none align-text-bottom overflow-visible" aria-hidden="true" focusable="false" role="img" viewBox="0 0 16 16" width="16" height="16" fill="currentColor"><path d="M2 1.75C2 .784 2.784 0 3.75 0h6.586c.464 0 .909.184 1.237.513l2.914 2.914c.329.328.513.773.513 1.237v9.586A1.75 1.75 0 0 1 13.25 16h-9.5A1.75 1.75 0 0 1 2 14.25Zm1.75-.25a.25.25 0 0 0-.25.25v12.5c0 .138.112.25.25.25h9.5a.25.25 0 0 0 .25-.25V6h-2.75A1.75 1.75 0 0 1 9 4.25V1.5Zm6.75.062V4.25c0 .138.112.25.25.25h2.688l-.011-.013-2.914-2.914-.013-.011Z"></path></svg>"#;

const INDENT: usize = 2;

/// One parsed directory level.
#[derive(Default)]
struct Node {
    /// Subdirectories in listing order, deduplicated by name (a repeated
    /// directory name replaces the earlier entry).
    dirs: Vec<(String, usize)>,
    files: Vec<String>,
}

/// Renders a folder/file tree with chevron, folder, and file icons.
pub struct FilesTreeRenderer;

impl FencedCodeRenderer for FilesTreeRenderer {
    fn render(&self, source: &str) -> String {
        let nodes = parse_tree(source);
        let mut out = String::from("<div>\n");
        render_node(&nodes, 0, &mut out);
        out.push_str("</div>\n");
        out
    }
}

fn parse_tree(source: &str) -> Vec<Node> {
    let mut nodes = vec![Node::default()];
    let mut stack = vec![0_usize];

    for line in source.trim().lines() {
        let name = line.trim();
        if name.is_empty() {
            continue;
        }
        let depth = line.chars().take_while(|c| c.is_whitespace()).count() / INDENT;

        while stack.len() > depth + 1 {
            stack.pop();
        }
        let parent = stack.last().copied().unwrap_or(0);

        if let Some(dir_name) = name.strip_prefix('/') {
            let child = nodes.len();
            nodes.push(Node::default());
            let existing = nodes[parent]
                .dirs
                .iter_mut()
                .find(|(existing, _)| existing == dir_name);
            match existing {
                Some((_, slot)) => *slot = child,
                None => nodes[parent].dirs.push((dir_name.to_owned(), child)),
            }
            stack.push(child);
        } else {
            nodes[parent].files.push(name.to_owned());
        }
    }

    nodes
}

fn render_node(nodes: &[Node], index: usize, out: &mut String) {
    for (name, child) in &nodes[index].dirs {
        out.push_str("<div class=\"ml-6\">\n");
        out.push_str("  <div class=\"flex items-center text-base leading-8\">\n");
        out.push_str("    ");
        out.push_str(CHEVRON_ICON);
        out.push('\n');
        out.push_str("    ");
        out.push_str(FOLDER_ICON);
        out.push('\n');
        out.push_str("    <span>");
        out.push_str(&escape_html(name));
        out.push_str("</span>\n");
        out.push_str("  </div>\n");
        render_node(nodes, *child, out);
        out.push_str("</div>\n");
    }

    if !nodes[index].files.is_empty() {
        out.push_str("<div>\n");
        for file in &nodes[index].files {
            out.push_str("<div class=\"ml-6 flex items-center text-base leading-8\">\n");
            out.push_str("  ");
            out.push_str(FILE_ICON);
            out.push('\n');
            out.push_str("  <span>");
            out.push_str(&escape_html(file));
            out.push_str("</span>\n");
            out.push_str("</div>\n");
        }
        out.push_str("</div>\n");
    }
}
