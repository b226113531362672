//! Lines of code counting for Python source.
//!
//! # Line Counting Rules
//!
//! - **Physical Lines**: Raw line count from file (includes all lines)
//! - **Code Lines**: Lines containing code, including lines inside multi-line strings
//! - **Comment Lines**: Lines that contain nothing but a `#` comment
//! - **Blank Lines**: Lines containing only whitespace
//!
//! The invariant `physical_lines == code_lines + comment_lines + blank_lines` always holds.
//! Code lines that end in a `#` comment are additionally tallied in `inline_comments`.
//!
//! String state is tracked across lines, so `#` inside a string literal or a
//! triple-quoted block is never mistaken for a comment.

/// Individual file line count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocCount {
    /// Raw line count from file
    pub physical_lines: usize,
    /// Lines containing code
    pub code_lines: usize,
    /// Lines that are only a comment
    pub comment_lines: usize,
    /// Lines containing only whitespace
    pub blank_lines: usize,
    /// Code lines that also carry a trailing comment
    pub inline_comments: usize,
}

impl LocCount {
    /// Every line carrying a comment, whole-line or trailing.
    pub fn total_comments(&self) -> usize {
        self.comment_lines + self.inline_comments
    }

    /// Comment lines as a percentage of source (non-blank) lines.
    pub fn comment_percentage(&self) -> f64 {
        let source_lines = self.code_lines + self.comment_lines;
        if source_lines == 0 {
            return 0.0;
        }
        self.total_comments() as f64 / source_lines as f64 * 100.0
    }
}

/// Counts lines of Python source.
///
/// # Examples
///
/// ```rust
/// use riskmap::metrics::loc_counter::LocCounter;
///
/// let count = LocCounter::default().count_content("# setup\nx = 1  # one\n\n");
/// assert_eq!(count.code_lines, 1);
/// assert_eq!(count.comment_lines, 1);
/// assert_eq!(count.inline_comments, 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LocCounter;

impl LocCounter {
    pub fn count_content(&self, content: &str) -> LocCount {
        let mut count = LocCount {
            physical_lines: content.lines().count(),
            ..LocCount::default()
        };
        let mut state = LineState::default();

        for line in content.lines() {
            match classify_line(line, &mut state) {
                LineType::Blank => count.blank_lines += 1,
                LineType::Comment => count.comment_lines += 1,
                LineType::Code { trailing_comment } => {
                    count.code_lines += 1;
                    if trailing_comment {
                        count.inline_comments += 1;
                    }
                }
            }
        }

        count
    }
}

/// Line type classification for LOC counting
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LineType {
    Blank,
    Comment,
    Code { trailing_comment: bool },
}

/// String literal left open at the end of the previous line.
#[derive(Clone, Copy, Debug, Default)]
struct LineState {
    open_triple: Option<u8>,
}

fn classify_line(line: &str, state: &mut LineState) -> LineType {
    let trimmed = line.trim();
    let starts_inside_string = state.open_triple.is_some();

    if !starts_inside_string {
        if trimmed.is_empty() {
            return LineType::Blank;
        }
        if trimmed.starts_with('#') {
            return LineType::Comment;
        }
    }

    LineType::Code {
        trailing_comment: scan_for_comment(trimmed, state),
    }
}

/// Walk a line outside-in, updating the triple-quote state; returns whether a
/// comment starts somewhere on the line.
fn scan_for_comment(line: &str, state: &mut LineState) -> bool {
    let bytes = line.as_bytes();
    let mut single: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];

        if let Some(quote) = state.open_triple {
            if c == b'\\' {
                i += 2;
                continue;
            }
            if bytes[i..].starts_with(&[quote, quote, quote]) {
                state.open_triple = None;
                i += 3;
                continue;
            }
            i += 1;
            continue;
        }

        if let Some(quote) = single {
            if c == b'\\' {
                i += 2;
                continue;
            }
            if c == quote {
                single = None;
            }
            i += 1;
            continue;
        }

        match c {
            b'#' => return true,
            b'\'' | b'"' if bytes[i..].starts_with(&[c, c, c]) => {
                state.open_triple = Some(c);
                i += 3;
                continue;
            }
            b'\'' | b'"' => single = Some(c),
            _ => {}
        }
        i += 1;
    }

    false
}
