//! Line reader with comment harvesting and 1-based line tracking

use std::collections::BTreeMap;
use std::io::BufRead;

use tracing::warn;

use super::tokenize::split_fields_nullable;

/// Marker opening a comment line
pub const COMMENT_CHAR: char = '#';

/// One advance of the line reader.
///
/// `content` is `None` at end of stream; `number` is then the count of
/// physical lines consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    pub content: Option<String>,
}

/// Comment lines harvested during one parse.
///
/// A comment holding `=` is read as `KEY=VALUE` (key upper-cased); anything
/// else is kept as a free-text line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentBlock {
    lines: Vec<String>,
    key_values: BTreeMap<String, String>,
}

impl CommentBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw comment line, including its leading `#`
    pub fn add(&mut self, raw: &str) {
        let body = raw.strip_prefix(COMMENT_CHAR).unwrap_or(raw);
        if body.is_empty() {
            return;
        }

        if body.contains('=') {
            let fields = split_fields_nullable(body, "= ");
            match fields.as_slice() {
                [_] | [] => {},
                [Some(key), Some(value)] => {
                    self.key_values.insert(key.to_uppercase(), value.clone());
                },
                [_, _] => {},
                _ => {
                    warn!(
                        tokens = fields.len(),
                        "Bad comment KEY=VALUE field: got more tokens than expected"
                    );
                },
            }
        } else {
            self.lines.push(body.to_string());
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.key_values.get(&key.to_uppercase()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.key_values.is_empty()
    }
}

impl std::fmt::Display for CommentBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        if !self.key_values.is_empty() {
            let pairs: Vec<String> = self
                .key_values
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            write!(f, "{{{}}}", pairs.join(", "))?;
        }
        Ok(())
    }
}

/// Reads physical lines, skipping blanks and harvesting `#` comments.
///
/// One reader (and so one [`CommentBlock`]) exists per parse call.
pub struct LineReader<R> {
    inner: R,
    number: usize,
    comment: CommentBlock,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            number: 0,
            comment: CommentBlock::new(),
        }
    }

    /// Next content line, trimmed; blanks and comments are skipped.
    pub fn next_line(&mut self) -> std::io::Result<Line> {
        self.next_content(true)
    }

    /// Next content line with only the line terminator removed.
    ///
    /// Blank (whitespace-only) and comment lines are still skipped.
    pub fn next_line_trimless(&mut self) -> std::io::Result<Line> {
        self.next_content(false)
    }

    /// Next non-blank line, trimmed. `#` lines are returned as content.
    pub fn next_non_empty_line(&mut self) -> std::io::Result<Line> {
        loop {
            match self.read_raw()? {
                None => return Ok(self.end()),
                Some(raw) => {
                    let trimmed = raw.trim();
                    if !trimmed.is_empty() {
                        return Ok(self.content(trimmed.to_string()));
                    }
                },
            }
        }
    }

    /// Line number of the most recently consumed physical line
    pub fn line_number(&self) -> usize {
        self.number
    }

    pub fn comment(&self) -> &CommentBlock {
        &self.comment
    }

    /// Consume the reader, keeping the harvested comments
    pub fn into_comment(self) -> CommentBlock {
        self.comment
    }

    fn next_content(&mut self, trim: bool) -> std::io::Result<Line> {
        loop {
            let raw = match self.read_raw()? {
                None => return Ok(self.end()),
                Some(raw) => raw,
            };

            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.starts_with(COMMENT_CHAR) {
                // The trimless variant only treats a '#' in column one as a comment
                if trim || raw.starts_with(COMMENT_CHAR) {
                    self.comment.add(trimmed);
                    continue;
                }
            }

            let content = if trim { trimmed.to_string() } else { raw };
            return Ok(self.content(content));
        }
    }

    /// Bytes that are not valid UTF-8 decode to U+FFFD
    fn read_raw(&mut self) -> std::io::Result<Option<String>> {
        let mut bytes = Vec::new();
        if self.inner.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        self.number += 1;
        let mut buf = String::from_utf8_lossy(&bytes).into_owned();
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') {
                buf.pop();
            }
        }
        Ok(Some(buf))
    }

    fn content(&self, content: String) -> Line {
        Line {
            number: self.number,
            content: Some(content),
        }
    }

    fn end(&self) -> Line {
        Line {
            number: self.number,
            content: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_next_line_skips_blanks_and_comments() {
        let input = "# a free comment\n\n  #TYPE=expression\n  first  \n\nsecond\n";
        let mut reader = LineReader::new(Cursor::new(input));

        let line = reader.next_line().unwrap();
        assert_eq!(line.number, 4);
        assert_eq!(line.content.as_deref(), Some("first"));

        let line = reader.next_line().unwrap();
        assert_eq!(line.number, 6);
        assert_eq!(line.content.as_deref(), Some("second"));

        let end = reader.next_line().unwrap();
        assert_eq!(end.number, 6);
        assert!(end.content.is_none());

        let comment = reader.into_comment();
        assert_eq!(comment.lines(), &[" a free comment".to_string()]);
        assert_eq!(comment.get("type"), Some("expression"));
    }

    #[test]
    fn test_next_line_trimless_keeps_trailing_tabs() {
        let input = "a\tb\t\t\r\n\t\t\nc\t\n";
        let mut reader = LineReader::new(Cursor::new(input));

        assert_eq!(reader.next_line_trimless().unwrap().content.as_deref(), Some("a\tb\t\t"));
        let line = reader.next_line_trimless().unwrap();
        assert_eq!(line.number, 3);
        assert_eq!(line.content.as_deref(), Some("c\t"));
    }

    #[test]
    fn test_next_non_empty_line_returns_hash_lines() {
        let mut reader = LineReader::new(Cursor::new("\n#NAME\tx\n"));
        let line = reader.next_non_empty_line().unwrap();
        assert_eq!(line.number, 2);
        assert_eq!(line.content.as_deref(), Some("#NAME\tx"));
        assert!(reader.comment().is_empty());
    }

    #[test]
    fn test_comment_with_too_many_tokens_is_dropped() {
        let mut comment = CommentBlock::new();
        comment.add("#A=1=2");
        comment.add("#b = 2");
        assert_eq!(comment.get("A"), None);
        assert_eq!(comment.get("B"), Some("2"));
        assert_eq!(comment.to_string(), "{B=2}");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut lines = LineReader::new(Cursor::new(b"caf\xe9\tx\nnext\n".to_vec()));
        let line = lines.next_line().unwrap();
        assert_eq!(line.number, 1);
        assert_eq!(line.content.as_deref(), Some("caf\u{fffd}\tx"));
        assert_eq!(lines.next_line().unwrap().content.as_deref(), Some("next"));
    }
}
