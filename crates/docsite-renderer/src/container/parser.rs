//! Container syntax parsing.
//!
//! Recognizes block fence lines (`:::name args`, closing `:::`) and inline
//! spans (`::name payload::`) within a line.

/// A line recognized as block container syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BlockLine<'a> {
    /// Opening fence: `:::name args`
    Open {
        name: &'a str,
        args: &'a str,
        /// Number of colons in the fence; the closing fence must have at
        /// least this many.
        len: usize,
    },
    /// Closing fence: `:::` (or longer)
    Close { len: usize },
}

/// An inline container span found within a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InlineSpan<'a> {
    /// Byte offset of the opening delimiter run.
    pub start: usize,
    /// Byte offset just past the closing delimiter run.
    pub end: usize,
    pub name: &'a str,
    pub payload: &'a str,
}

/// Parse a line for block fence syntax.
///
/// Returns `None` for anything that is not a well-formed fence line;
/// such lines pass through as ordinary Markdown.
pub(crate) fn parse_block_line(line: &str) -> Option<BlockLine<'_>> {
    let trimmed = line.trim();
    if !trimmed.starts_with(":::") {
        return None;
    }

    let len = trimmed.chars().take_while(|&c| c == ':').count();
    let rest = trimmed[len..].trim();

    if rest.is_empty() {
        return Some(BlockLine::Close { len });
    }

    let name_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let name = &rest[..name_end];
    if !is_valid_container_name(name) {
        return None;
    }

    let args = rest[name_end..].trim();
    Some(BlockLine::Open { name, args, len })
}

/// Find the first inline container span in a line.
///
/// Opening and closing delimiters are runs of exactly two `delim`
/// characters; longer runs belong to block fences and never match. The
/// span content splits at the first whitespace into a name and a payload.
/// A candidate whose name is invalid is skipped and scanning resumes
/// inside it, so stray delimiter pairs don't hide later spans.
pub(crate) fn find_inline_span(line: &str, delim: char) -> Option<InlineSpan<'_>> {
    let delim_width = delim.len_utf8();
    let mut from = 0;

    while let Some((open, open_len)) = find_delim_run(line, delim, from) {
        if open_len != 2 {
            from = open + open_len * delim_width;
            continue;
        }

        let content_start = open + 2 * delim_width;
        let mut search = content_start;
        loop {
            let (close, close_len) = find_delim_run(line, delim, search)?;
            if close_len != 2 {
                search = close + close_len * delim_width;
                continue;
            }

            let content = line[content_start..close].trim();
            let (name, payload) = match content.split_once(char::is_whitespace) {
                Some((name, payload)) => (name, payload.trim()),
                None => (content, ""),
            };

            if is_valid_container_name(name) {
                return Some(InlineSpan {
                    start: open,
                    end: close + 2 * delim_width,
                    name,
                    payload,
                });
            }
            break;
        }

        // Invalid candidate: the failed closer may open the next span.
        from = content_start;
    }

    None
}

/// Find the next run of `delim` characters at or after byte `from`.
///
/// Returns the run's byte offset and character count.
fn find_delim_run(line: &str, delim: char, from: usize) -> Option<(usize, usize)> {
    let offset = line.get(from..)?.find(delim)?;
    let start = from + offset;
    let count = line[start..].chars().take_while(|&c| c == delim).count();
    Some((start, count))
}

/// Valid names contain only alphanumeric characters, hyphens, and
/// underscores.
fn is_valid_container_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}
