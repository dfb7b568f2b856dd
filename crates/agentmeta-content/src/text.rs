//! Line and body-text helpers shared by both parsers.

use std::path::Path;

use agentmeta_core::{Error, Result};

/// A single line of a document, located by byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Offset of the first byte of the line.
    pub start: usize,
    /// Offset of the first byte of the following line (or end of input).
    pub next: usize,
    /// Line content without its terminating `\n`.
    pub text: &'a str,
}

impl Line<'_> {
    /// Whether the line holds only whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Iterate over the lines of `content` with their offsets.
pub fn lines(content: &str) -> impl Iterator<Item = Line<'_>> {
    let mut start = 0;
    content.split_inclusive('\n').map(move |raw| {
        let line = Line {
            start,
            next: start + raw.len(),
            text: raw.strip_suffix('\n').unwrap_or(raw),
        };
        start = line.next;
        line
    })
}

/// Offset of the line following the one containing `pos`.
pub fn next_line_start(content: &str, pos: usize) -> usize {
    content[pos..]
        .find('\n')
        .map_or(content.len(), |offset| pos + offset + 1)
}

/// Advance `pos` (a line start) past any whitespace-only lines.
pub fn skip_blank_lines(content: &str, mut pos: usize) -> usize {
    while pos < content.len() {
        let next = next_line_start(content, pos);
        if !content[pos..next].trim().is_empty() {
            break;
        }
        pos = next;
    }
    pos
}

/// Drop exactly one trailing line ending (`\n` or `\r\n`), keeping all
/// other whitespace.
///
/// ```
/// use agentmeta_content::text::strip_trailing_newline;
///
/// assert_eq!(strip_trailing_newline("body\n\n"), "body\n");
/// assert_eq!(strip_trailing_newline("body\r\n"), "body");
/// assert_eq!(strip_trailing_newline("  "), "  ");
/// ```
pub fn strip_trailing_newline(body: &str) -> &str {
    body.strip_suffix("\r\n")
        .or_else(|| body.strip_suffix('\n'))
        .unwrap_or(body)
}

/// Read a whole document into memory.
pub fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))
}
