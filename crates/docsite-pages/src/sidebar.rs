//! Sidebar navigation built from the folder structure of a page tree.
//!
//! Each visible page contributes its path segments as nested folder nodes
//! plus a leaf entry for the document itself. Folders from different pages
//! merge on segment text. A folder's `menu.json` manifest pins the order of
//! its entries; without one, entries sort alphabetically.

use std::collections::HashMap;

use docsite_renderer::MenuNode;
use serde::{Deserialize, Serialize};

use crate::page::Page;

/// One entry of a folder's `menu.json` ordering manifest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FolderMenu {
    /// Sidebar entry text this rank applies to.
    pub page_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Build the ordered sidebar tree for `folder` from its visible pages.
pub(crate) fn build(
    pages: &[&Page],
    folder: &str,
    folder_menus: &HashMap<String, Vec<FolderMenu>>,
) -> Vec<MenuNode> {
    let mut sidebar: Vec<MenuNode> = Vec::new();
    for page in pages {
        insert_page(&mut sidebar, page);
    }
    apply_order(sidebar, folder, folder_menus)
}

/// Thread one page's path into the tree.
///
/// The first path segment is the content root and the second anchors
/// `menu_path`, so only segments past those become nodes. A page sitting
/// directly in the content root contributes nothing.
fn insert_page(sidebar: &mut Vec<MenuNode>, page: &Page) {
    let segments: Vec<&str> = page.path.split('/').collect();
    let (Some(&last), Some(&anchor)) = (segments.last(), segments.get(1)) else {
        return;
    };
    let mut prev_path = anchor.to_owned();
    let mut current: Option<Vec<usize>> = None;

    for &segment in &segments[2..] {
        let menu_path = format!("{prev_path}/{segment}");
        prev_path.clone_from(&menu_path);

        if segment == last {
            let leaf = leaf_node(page, menu_path);
            if current.is_none() {
                sidebar.push(leaf);
                continue;
            }
            // The index path was built from live lookups this iteration, so
            // the walk cannot miss.
            if let Some(parent) = current.as_deref().and_then(|path| node_mut(sidebar, path)) {
                match parent.children.as_mut() {
                    None => parent.children = Some(vec![leaf]),
                    Some(children) => {
                        children.push(leaf);
                        children.sort_by(|a, b| a.text.cmp(&b.text));
                    }
                }
            }
            continue;
        }

        let folder_node = MenuNode {
            icon: page.menu_icon.clone(),
            text: segment.to_owned(),
            menu_path: menu_path.clone(),
            ..MenuNode::default()
        };

        current = match current.take() {
            Some(mut path) => node_mut(sidebar, &path).map(|parent| {
                let children = parent.children.get_or_insert_with(Vec::new);
                let index = match children.iter().position(|c| c.text == segment) {
                    Some(index) => index,
                    None => {
                        children.push(folder_node);
                        children.len() - 1
                    }
                };
                path.push(index);
                path
            }),
            None => {
                let index = match sidebar.iter().position(|c| c.text == segment) {
                    Some(index) => index,
                    None => {
                        sidebar.push(folder_node);
                        sidebar.sort_by(|a, b| a.text.cmp(&b.text));
                        // The sort moved the new node; find it again.
                        sidebar
                            .iter()
                            .position(|c| c.text == segment)
                            .unwrap_or(sidebar.len() - 1)
                    }
                };
                Some(vec![index])
            }
        };
    }
}

fn leaf_node(page: &Page, menu_path: String) -> MenuNode {
    let title = page.title.clone().unwrap_or_default();
    let text = match page.sidebar_label.as_deref() {
        Some(label) if !label.trim().is_empty() => label.to_owned(),
        _ => title.clone(),
    };
    MenuNode {
        icon: page.menu_icon.clone(),
        text,
        link: Some(page.slug.clone()),
        id: Some(title.to_lowercase().replace(' ', "_")),
        menu_path,
        children: None,
    }
}

/// Walk an index path into the tree.
fn node_mut<'t>(tree: &'t mut [MenuNode], path: &[usize]) -> Option<&'t mut MenuNode> {
    let (&first, rest) = path.split_first()?;
    let mut node = tree.get_mut(first)?;
    for &index in rest {
        node = node.children.as_mut()?.get_mut(index)?;
    }
    Some(node)
}

/// Order every level of the tree, bottom-up.
///
/// Levels with a `menu.json` manifest sort by manifest rank; entries the
/// manifest doesn't name keep rank 0 and float to the front in their
/// existing relative order. Levels without a manifest sort by text.
fn apply_order(
    mut menu: Vec<MenuNode>,
    menu_path: &str,
    folder_menus: &HashMap<String, Vec<FolderMenu>>,
) -> Vec<MenuNode> {
    for item in &mut menu {
        if let Some(children) = item.children.take() {
            let child_path = item.menu_path.clone();
            item.children = Some(apply_order(children, &child_path, folder_menus));
        }
    }

    let manifest = if menu_path.trim().is_empty() {
        None
    } else {
        folder_menus.get(menu_path)
    };
    match manifest {
        Some(manifest) => {
            let rank: HashMap<&str, usize> = manifest
                .iter()
                .enumerate()
                .map(|(index, entry)| (entry.page_name.as_str(), index))
                .collect();
            menu.sort_by_key(|item| rank.get(item.text.as_str()).copied().unwrap_or(0));
        }
        None => menu.sort_by(|a, b| a.text.cmp(&b.text)),
    }
    menu
}
