//! Code fence awareness for the container preprocessor.
//!
//! Container fences (`:::`) inside fenced code blocks are examples, not
//! syntax, so the processor needs to know when a line sits inside one.

/// An open code fence: its marker character and run length.
///
/// Per `CommonMark`, a fence opens with three or more backticks or tildes
/// and closes with a run of the same marker at least as long, followed by
/// nothing but whitespace.
#[derive(Clone, Copy, Debug)]
struct Fence {
    marker: char,
    len: usize,
}

impl Fence {
    fn open(stripped: &str) -> Option<Self> {
        let marker = stripped.chars().next().filter(|&c| c == '`' || c == '~')?;
        let len = stripped.chars().take_while(|&c| c == marker).count();
        (len >= 3).then_some(Self { marker, len })
    }

    fn closed_by(self, stripped: &str) -> bool {
        let run = stripped.chars().take_while(|&c| c == self.marker).count();
        run >= self.len && stripped.chars().skip(run).all(char::is_whitespace)
    }
}

/// Line-by-line code fence state.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<Fence>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed the next line, returning whether it is itself a fence marker.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let stripped = line.trim_start();
        match self.open {
            Some(fence) => {
                if fence.closed_by(stripped) {
                    self.open = None;
                    true
                } else {
                    false
                }
            }
            None => {
                self.open = Fence::open(stripped);
                self.open.is_some()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_lines(tracker: &mut FenceTracker, source: &str) -> Vec<bool> {
        source
            .lines()
            .map(|line| {
                let marker = tracker.update(line);
                !marker && tracker.in_fence()
            })
            .collect()
    }

    #[test]
    fn test_backtick_block_covers_its_body() {
        let mut tracker = FenceTracker::new();
        let inside = body_lines(&mut tracker, "```js\nconsole.log(':::tip')\n```\nafter");
        assert_eq!(inside, vec![false, true, false, false]);
    }

    #[test]
    fn test_tilde_block() {
        let mut tracker = FenceTracker::new();
        assert!(tracker.update("~~~python"));
        assert!(tracker.in_fence());
        assert!(tracker.update("~~~"));
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_close_run_must_match_marker_and_length() {
        let mut tracker = FenceTracker::new();
        assert!(tracker.update("````"));

        assert!(!tracker.update("```"));
        assert!(!tracker.update("~~~~"));
        assert!(tracker.in_fence());

        assert!(tracker.update("`````"));
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_trailing_text_keeps_fence_open() {
        let mut tracker = FenceTracker::new();
        assert!(tracker.update("```"));
        assert!(!tracker.update("``` not a close"));
        assert!(tracker.in_fence());
        assert!(tracker.update("```   "));
    }

    #[test]
    fn test_indentation_ignored() {
        let mut tracker = FenceTracker::new();
        assert!(tracker.update("   ```rust"));
        assert!(tracker.update("  ```"));
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_short_runs_are_inline_code() {
        let mut tracker = FenceTracker::new();
        assert!(!tracker.update("``inline code``"));
        assert!(!tracker.in_fence());
    }
}
