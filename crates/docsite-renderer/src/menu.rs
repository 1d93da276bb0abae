//! Navigation tree node shared by document maps and sidebars.

use serde::{Deserialize, Serialize};

/// A node in a navigation tree.
///
/// Used both for the per-document heading map (where `link` is a `#fragment`)
/// and for folder sidebars (where `link` is a page slug). `menu_path` is the
/// merge key used when sidebar entries from different pages land on the same
/// folder.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub menu_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MenuNode>>,
}

impl MenuNode {
    /// Build a heading entry linking to an in-page fragment.
    #[must_use]
    pub fn heading(text: impl Into<String>, id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            text: text.into(),
            link: Some(format!("#{id}")),
            id: Some(id),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_heading_node() {
        let node = MenuNode::heading("Install Steps", "install-steps");

        assert_eq!(node.text, "Install Steps");
        assert_eq!(node.link.as_deref(), Some("#install-steps"));
        assert_eq!(node.id.as_deref(), Some("install-steps"));
        assert!(node.children.is_none());
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let node = MenuNode::heading("Intro", "intro");
        let json = serde_json::to_string(&node).unwrap();

        assert_eq!(json, r##"{"text":"Intro","link":"#intro","id":"intro"}"##);
    }

    #[test]
    fn test_deserialize_partial() {
        let node: MenuNode = serde_json::from_str(r#"{"text":"Docs","menu_path":"docs/setup"}"#).unwrap();

        assert_eq!(node.text, "Docs");
        assert_eq!(node.menu_path, "docs/setup");
        assert!(node.link.is_none());
    }
}
