//! Click-to-copy box containers.

use crate::error::RenderError;
use crate::registry::BlockContainer;

const COPIED_ICON: &str = r#"<svg class="copied w-6 h-6" fill="none" stroke="currentColor" viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M5 13l4 4L19 7"></path></svg>"#;

const NOCOPY_ICON: &str = r#"<svg class="nocopy w-6 h-6" title="copy" fill='none' stroke='white' viewBox='0 0 24 24' xmlns='http://www.w3.org/2000/svg'><path stroke-linecap='round' stroke-linejoin='round' stroke-width='1' d='M8 7v8a2 2 0 002 2h6M8 7V5a2 2 0 012-2h4.586a1 1 0 01.707.293l4.414 4.414a1 1 0 01.293.707V15a2 2 0 01-2 2h-2M8 7H6a2 2 0 00-2 2v10a2 2 0 002 2h8a2 2 0 002-2v-2'></path></svg>"#;

/// Box whose contents copy to the clipboard on click.
///
/// Emits an `onclick="copy(this)"` hook and the copied/nocopy icon pair the
/// site script toggles between. Styling is adjustable through the `with_*`
/// builders; [`CopyBoxRenderer::copy`] and [`CopyBoxRenderer::shell`] are
/// the stock presets.
pub struct CopyBoxRenderer {
    class: String,
    box_class: String,
    icon_class: String,
    text_class: String,
}

impl CopyBoxRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            class: String::new(),
            box_class: "bg-gray-700".to_owned(),
            icon_class: String::new(),
            text_class: "text-lg text-white".to_owned(),
        }
    }

    /// Preset for copying rendered text.
    #[must_use]
    pub fn copy() -> Self {
        Self::new()
            .with_class("not-prose copy cp")
            .with_icon_class("bg-sky-500")
    }

    /// Preset for shell commands: preserves whitespace and uses a darker
    /// box.
    #[must_use]
    pub fn shell() -> Self {
        Self::new()
            .with_class("not-prose sh-copy cp")
            .with_box_class("bg-gray-800")
            .with_icon_class("bg-green-600")
            .with_text_class("whitespace-pre text-base text-gray-100")
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    #[must_use]
    pub fn with_box_class(mut self, class: impl Into<String>) -> Self {
        self.box_class = class.into();
        self
    }

    #[must_use]
    pub fn with_icon_class(mut self, class: impl Into<String>) -> Self {
        self.icon_class = class.into();
        self
    }

    #[must_use]
    pub fn with_text_class(mut self, class: impl Into<String>) -> Self {
        self.text_class = class.into();
        self
    }
}

impl Default for CopyBoxRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockContainer for CopyBoxRenderer {
    fn start(&self, _args: &str) -> Result<String, RenderError> {
        Ok(format!(
            "<div class=\"{} flex cursor-pointer mb-3\" onclick=\"copy(this)\">\n\
             <div class=\"flex-grow {}\">\n\
             <div class=\"pl-4 py-1 pb-1.5 align-middle {}\">",
            self.class, self.box_class, self.text_class
        ))
    }

    fn end(&self) -> String {
        format!(
            "</div>\n\
             </div>\n\
             <div class=\"flex\">\n\
             <div class=\"{} text-white p-1.5 pb-0\">\n\
             {COPIED_ICON}\n\
             {NOCOPY_ICON}\n\
             </div>\n\
             </div>\n\
             </div>",
            self.icon_class
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_preset() {
        let html = CopyBoxRenderer::copy().start("").unwrap();
        assert!(html.contains("not-prose copy cp"));
        assert!(html.contains("onclick=\"copy(this)\""));
        assert!(html.contains("bg-gray-700"));
        assert!(html.contains("text-lg text-white"));
    }

    #[test]
    fn test_shell_preset() {
        let html = CopyBoxRenderer::shell().start("").unwrap();
        assert!(html.contains("not-prose sh-copy cp"));
        assert!(html.contains("bg-gray-800"));
        assert!(html.contains("whitespace-pre text-base text-gray-100"));

        let end = CopyBoxRenderer::shell().end();
        assert!(end.contains("bg-green-600"));
    }

    #[test]
    fn test_end_carries_icon_pair() {
        let end = CopyBoxRenderer::copy().end();
        assert!(end.contains("class=\"copied w-6 h-6\""));
        assert!(end.contains("class=\"nocopy w-6 h-6\""));
        assert!(end.ends_with("</div>"));
    }
}
