//! Splitting source text into trimmed physical lines.

use crate::span::Span;

/// Marker opening a comment line.
pub(crate) const COMMENT_MARKER: &str = "%%";

/// A trimmed physical line and its location in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SourceLine<'src> {
    /// 1-based line number
    pub number: usize,
    /// Line content without surrounding whitespace
    pub text: &'src str,
    /// Byte range of `text` in the source
    pub span: Span,
}

impl SourceLine<'_> {
    /// Blank lines and `%%` comments carry no content.
    pub fn is_ignorable(&self) -> bool {
        self.text.is_empty() || self.text.starts_with(COMMENT_MARKER)
    }
}

/// Iterate over the physical lines of `source`.
///
/// Both `\n` and `\r\n` line endings are accepted.
pub(crate) fn source_lines(source: &str) -> impl Iterator<Item = SourceLine<'_>> {
    let mut offset = 0;
    source
        .split_inclusive('\n')
        .enumerate()
        .map(move |(index, raw)| {
            let line_start = offset;
            offset += raw.len();

            let content = raw.trim_end_matches(['\n', '\r']);
            let leading = content.len() - content.trim_start().len();
            let text = content.trim();
            let start = line_start + leading;

            SourceLine {
                number: index + 1,
                text,
                span: Span::new(start..start + text.len()),
            }
        })
}
