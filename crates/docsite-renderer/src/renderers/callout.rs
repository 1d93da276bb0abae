//! Callout (admonition) block containers.

use crate::error::RenderError;
use crate::html::escape_html;
use crate::registry::BlockContainer;

const TIP_ICON: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 16 16" fill="none"><path fill-rule="evenodd" clip-rule="evenodd" d="M8 1.83337C7.35812 1.83337 6.74664 1.95823 6.18761 2.18452C5.93165 2.28813 5.64015 2.16463 5.53654 1.90866C5.43292 1.65269 5.55643 1.3612 5.8124 1.25758C6.48861 0.983859 7.22735 0.833374 8 0.833374C11.2217 0.833374 13.8333 3.44505 13.8333 6.66671C13.8333 8.89963 12.1998 10.581 11.1933 11.4137C10.7637 11.7692 10.5 12.2581 10.5 12.7512C10.5 14.0853 9.41856 15.1667 8.08453 15.1667H7.92513C6.58577 15.1667 5.5 14.0809 5.5 12.7416C5.5 12.2509 5.24113 11.765 4.81768 11.4107C3.81536 10.5721 2.16667 8.87316 2.16667 6.66671C2.16667 5.28769 2.64582 4.01921 3.4463 3.02064C3.61902 2.80518 3.9337 2.77053 4.14916 2.94325C4.36462 3.11597 4.39927 3.43065 4.22655 3.64611C3.56315 4.47367 3.16667 5.5232 3.16667 6.66671C3.16667 8.39121 4.48638 9.82971 5.45937 10.6438C5.75262 10.8891 6.00735 11.193 6.19138 11.5381C6.20098 11.5421 6.21051 11.5464 6.21996 11.551C6.22075 11.5514 6.22154 11.5518 6.22233 11.5522L6.21996 11.551C6.2213 11.5516 6.22525 11.5535 6.23166 11.5563C6.24449 11.5619 6.26745 11.5715 6.30057 11.584C6.36677 11.6088 6.47366 11.6447 6.62127 11.6816C6.91617 11.7554 7.37546 11.8334 8 11.8334C8.27615 11.8334 8.5 12.0572 8.5 12.3334C8.5 12.6095 8.27615 12.8334 8 12.8334C7.36436 12.8334 6.8639 12.7621 6.49924 12.6803C6.49975 12.7007 6.5 12.7211 6.5 12.7416C6.5 13.5287 7.13806 14.1667 7.92513 14.1667H8.08453C8.86627 14.1667 9.5 13.533 9.5 12.7512C9.5 11.8987 9.94861 11.1457 10.5558 10.6433C11.5246 9.84173 12.8333 8.4198 12.8333 6.66671C12.8333 3.99733 10.6694 1.83337 8 1.83337ZM6.22327 11.5527C6.22323 11.5526 6.22331 11.5527 6.22327 11.5527V11.5527Z" fill="#6B9E32"/></svg>"##;

const WARNING_ICON: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 16 16" fill="none"><g clip-path="url(#clip0_536_1825)"><path fill-rule="evenodd" clip-rule="evenodd" d="M9.1705 2.15142C8.42921 1.81671 7.57983 1.81671 6.83854 2.15142C6.46645 2.31944 6.09047 2.67757 5.59928 3.39251C5.1101 4.10453 4.55267 5.0989 3.78741 6.46545L3.5534 6.88331C2.81764 8.19718 2.28317 9.15262 1.94451 9.91295C1.60498 10.6753 1.49766 11.168 1.54329 11.5669C1.63397 12.3596 2.05462 13.0772 2.70191 13.5436C3.02768 13.7784 3.51001 13.9255 4.34103 14.0017C5.16989 14.0777 6.26466 14.0782 7.77052 14.0782H8.23853C9.74439 14.0782 10.8392 14.0777 11.668 14.0017C12.499 13.9255 12.9814 13.7784 13.3071 13.5436C13.9544 13.0772 14.3751 12.3596 14.4658 11.5669C14.5114 11.168 14.4041 10.6753 14.0645 9.91295C13.7259 9.15262 13.1914 8.19718 12.4556 6.8833L12.2216 6.46544C11.4564 5.0989 10.8989 4.10452 10.4098 3.39251C9.91858 2.67757 9.5426 2.31944 9.1705 2.15142ZM6.42702 1.24002C7.42994 0.787179 8.5791 0.787179 9.58202 1.24002C10.2103 1.52369 10.7147 2.07035 11.234 2.82624C11.7522 3.58056 12.3316 4.61521 13.0807 5.95288L13.3414 6.41843C14.0612 7.70365 14.6185 8.69887 14.978 9.50608C15.3389 10.3163 15.5359 11.0106 15.4593 11.6806C15.3366 12.753 14.7675 13.7239 13.8917 14.355C13.3447 14.7491 12.6426 14.9165 11.7594 14.9975C10.8794 15.0782 9.73877 15.0782 8.26577 15.0782H7.74328C6.27028 15.0782 5.12965 15.0782 4.24969 14.9975C3.36647 14.9165 2.66437 14.7491 2.11731 14.355C1.24157 13.7239 0.672448 12.753 0.549773 11.6806C0.47314 11.0106 0.670165 10.3163 1.03103 9.50608C1.39056 8.69888 1.94788 7.70367 2.66759 6.41846L2.92829 5.95294C3.6774 4.61524 4.2568 3.58058 4.77506 2.82624C5.29438 2.07035 5.79879 1.52369 6.42702 1.24002ZM8.00452 5.41156C8.28066 5.41156 8.50452 5.63542 8.50452 5.91156V8.57823C8.50452 8.85437 8.28066 9.07823 8.00452 9.07823C7.72838 9.07823 7.50452 8.85437 7.50452 8.57823V5.91156C7.50452 5.63542 7.72838 5.41156 8.00452 5.41156ZM7.17119 10.9116C7.17119 10.4513 7.54428 10.0782 8.00452 10.0782C8.46476 10.0782 8.83786 10.4513 8.83786 10.9116C8.83786 11.3718 8.46476 11.7449 8.00452 11.7449C7.54428 11.7449 7.17119 11.3718 7.17119 10.9116Z" fill="#F79009"/></g><defs><clipPath id="clip0_536_1825"><rect width="16" height="16" fill="white"/></clipPath></defs></svg>"##;

const DANGER_ICON: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 16 16" fill="none"><g clip-path="url(#clip0_536_1272)"><path fill-rule="evenodd" clip-rule="evenodd" d="M7.99998 1.83398C4.59422 1.83398 1.83331 4.5949 1.83331 8.00065C1.83331 11.4064 4.59422 14.1673 7.99998 14.1673C11.4057 14.1673 14.1666 11.4064 14.1666 8.00065C14.1666 4.5949 11.4057 1.83398 7.99998 1.83398ZM0.833313 8.00065C0.833313 4.04261 4.04194 0.833984 7.99998 0.833984C11.958 0.833984 15.1666 4.04261 15.1666 8.00065C15.1666 11.9587 11.958 15.1673 7.99998 15.1673C4.04194 15.1673 0.833313 11.9587 0.833313 8.00065ZM5.64643 5.6471C5.84169 5.45184 6.15827 5.45184 6.35353 5.6471L7.99998 7.29354L9.64643 5.6471C9.84169 5.45184 10.1583 5.45184 10.3535 5.6471C10.5488 5.84236 10.5488 6.15894 10.3535 6.35421L8.70709 8.00065L10.3535 9.6471C10.5488 9.84236 10.5488 10.1589 10.3535 10.3542C10.1583 10.5495 9.84169 10.5495 9.64643 10.3542L7.99998 8.70776L6.35353 10.3542C6.15827 10.5495 5.84169 10.5495 5.64643 10.3542C5.45116 10.1589 5.45116 9.84236 5.64643 9.6471L7.29287 8.00065L5.64643 6.35421C5.45116 6.15894 5.45116 5.84236 5.64643 5.6471Z" fill="#EA0044"></path></g><defs><clipPath id="clip0_536_1272"><rect width="16" height="16" fill="white"></rect></clipPath></defs></svg>"##;

/// Style settings for a callout kind: title text color, accent bar color,
/// icon markup, and the title used when the fence gives none.
struct CalloutStyle {
    text_class: &'static str,
    bar_class: &'static str,
    icon: &'static str,
    default_title: &'static str,
}

fn style_for(kind: &str) -> Option<CalloutStyle> {
    let style = match kind {
        "info" => CalloutStyle {
            text_class: "text-[#619DFF]",
            bar_class: "bg-[#619DFF]",
            icon: "",
            default_title: "INFO",
        },
        "tip" => CalloutStyle {
            text_class: "text-[#A4CD80]",
            bar_class: "bg-[#A4CD80]",
            icon: TIP_ICON,
            default_title: "TIP",
        },
        "warning" => CalloutStyle {
            text_class: "text-[#F79009]",
            bar_class: "bg-[#F79009]",
            icon: WARNING_ICON,
            default_title: "WARNING",
        },
        "danger" => CalloutStyle {
            text_class: "text-[#FF7D87]",
            bar_class: "bg-[#FF7D87]",
            icon: DANGER_ICON,
            default_title: "DANGER",
        },
        "quote" => CalloutStyle {
            text_class: "text-bodyText",
            bar_class: "bg-brand",
            icon: "",
            default_title: "QUOTE",
        },
        _ => return None,
    };
    Some(style)
}

/// Styled callout box with a colored accent bar and titled header.
///
/// The fence arguments override the title: `:::info Heads up` renders the
/// info styling with "Heads up" as the header text.
pub struct CalloutRenderer {
    kind: String,
}

impl CalloutRenderer {
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

impl BlockContainer for CalloutRenderer {
    fn start(&self, args: &str) -> Result<String, RenderError> {
        let style = style_for(&self.kind)
            .ok_or_else(|| RenderError::UnknownCalloutKind(self.kind.clone()))?;
        let title = if args.is_empty() {
            style.default_title
        } else {
            args
        };

        // A blank line here would end the HTML block when the output is
        // re-parsed, so the icon line is omitted entirely when empty.
        let icon_line = if style.icon.is_empty() {
            String::new()
        } else {
            format!("{}\n", style.icon)
        };

        Ok(format!(
            "<div class=\"flex items-start gap-4 py-2 pr-6 mt-4 rounded-lg \">\n\
             <div class=\"w-1 2xl:mr-11 mr-5 shrink-0 self-stretch {}\"></div>\n\
             <div class=\"w-full text-base leading-7 text-bodyText\">\n\
             <div class=\"flex items-center gap-2 mb-3\">\n\
             {}<span class=\"{}\">{}</span>\n\
             </div>",
            style.bar_class,
            icon_line,
            style.text_class,
            escape_html(title)
        ))
    }

    fn end(&self) -> String {
        "</div>\n</div>".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_title_is_uppercase_kind() {
        let html = CalloutRenderer::new("warning").start("").unwrap();
        assert!(html.contains(">WARNING</span>"));
        assert!(html.contains("bg-[#F79009]"));
    }

    #[test]
    fn test_args_override_title() {
        let html = CalloutRenderer::new("info").start("Heads up").unwrap();
        assert!(html.contains(">Heads up</span>"));
        assert!(!html.contains("INFO"));
    }

    #[test]
    fn test_title_is_escaped() {
        let html = CalloutRenderer::new("tip").start("<script>").unwrap();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_info_has_no_icon() {
        let html = CalloutRenderer::new("info").start("").unwrap();
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn test_tip_has_icon() {
        let html = CalloutRenderer::new("tip").start("").unwrap();
        assert!(html.contains("fill=\"#6B9E32\""));
    }

    #[test]
    fn test_unknown_kind_is_an_error() {
        let err = CalloutRenderer::new("fancy").start("").unwrap_err();
        assert!(matches!(err, RenderError::UnknownCalloutKind(kind) if kind == "fancy"));
    }

    #[test]
    fn test_end_closes_both_wrappers() {
        assert_eq!(CalloutRenderer::new("tip").end(), "</div>\n</div>");
    }
}
