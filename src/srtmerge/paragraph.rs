//! Paragraph splitting.
//!
//! A paragraph is a maximal run of non-blank lines. A line counts as blank when every
//! character in it is whitespace, so `"   \n"` and `"\t\r\n"` separate paragraphs just
//! like `"\n"` does. `\n`, `\r\n` and a bare `\r` all end a line. Lines keep their
//! terminators, which means a paragraph's text is exactly what the author typed, newlines
//! included.
//!
//! Text after the last blank line is not a paragraph unless [`ParseOptions::flush_trailing`]
//! is set. Existing subtitle sources rely on that, so it stays the default.

use crate::error::{MergeError, Result};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// One block of subtitle text, never empty and never whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph(String);

impl Paragraph {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Paragraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Keep a final paragraph even when no blank line follows it.
    pub flush_trailing: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    pub paragraphs: Vec<Paragraph>,
    /// Unterminated text at end of input that was left out.
    pub dropped: Option<String>,
}

impl ParseOutcome {
    pub fn dropped_lines(&self) -> usize {
        self.dropped.as_deref().map_or(0, |s| split_lines(s).count())
    }
}

/// Lines of `text` with their terminators attached.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = match rest.find(|c: char| c == '\n' || c == '\r') {
            Some(i) if rest[i..].starts_with("\r\n") => i + 2,
            Some(i) => i + 1,
            None => rest.len(),
        };
        let (line, tail) = rest.split_at(end);
        rest = tail;
        Some(line)
    })
}

fn is_blank(line: &str) -> bool {
    line.chars().all(char::is_whitespace)
}

/// Splits `text` with the default options.
pub fn parse_paragraphs(text: &str) -> Vec<Paragraph> {
    parse_paragraphs_with(text, ParseOptions::default()).paragraphs
}

pub fn parse_paragraphs_with(text: &str, options: ParseOptions) -> ParseOutcome {
    let mut paragraphs = Vec::new();
    let mut buffer = String::new();

    for line in split_lines(text) {
        if is_blank(line) {
            if !buffer.is_empty() {
                paragraphs.push(Paragraph(std::mem::take(&mut buffer)));
            }
        } else {
            buffer.push_str(line);
        }
    }

    let dropped = if buffer.is_empty() {
        None
    } else if options.flush_trailing {
        paragraphs.push(Paragraph(buffer));
        None
    } else {
        Some(buffer)
    };

    ParseOutcome {
        paragraphs,
        dropped,
    }
}

/// Reads and splits the source text file.
pub fn read_paragraphs(path: &Path, options: ParseOptions) -> Result<ParseOutcome> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => MergeError::SourceNotFound(path.to_path_buf()),
        _ => MergeError::Io(e),
    })?;

    let outcome = parse_paragraphs_with(&text, options);
    debug!(
        path = %path.display(),
        paragraphs = outcome.paragraphs.len(),
        dropped_lines = outcome.dropped_lines(),
        "parsed source text"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn texts(paragraphs: &[Paragraph]) -> Vec<&str> {
        paragraphs.iter().map(Paragraph::as_str).collect()
    }

    #[test]
    fn test_splits_on_blank_lines_and_drops_unterminated_tail() {
        let paragraphs = parse_paragraphs("a\nb\n\nc\n\n\nd\n");
        assert_eq!(texts(&paragraphs), vec!["a\nb\n", "c\n"]);
    }

    #[test]
    fn test_whitespace_only_line_is_a_separator() {
        let with_spaces = parse_paragraphs("a\n   \nb\n\t\n");
        let with_empty = parse_paragraphs("a\n\nb\n\n");
        assert_eq!(with_spaces, with_empty);
        assert_eq!(texts(&with_spaces), vec!["a\n", "b\n"]);
    }

    #[test]
    fn test_leading_and_repeated_blank_lines_produce_nothing() {
        let paragraphs = parse_paragraphs("\n \n\nfirst\n\n \n\n");
        assert_eq!(texts(&paragraphs), vec!["first\n"]);
    }

    #[test]
    fn test_crlf_terminators_are_preserved() {
        let paragraphs = parse_paragraphs("one\r\ntwo\r\n\r\nthree\r\n\r\n");
        assert_eq!(texts(&paragraphs), vec!["one\r\ntwo\r\n", "three\r\n"]);
    }

    #[test]
    fn test_empty_input() {
        let outcome = parse_paragraphs_with("", ParseOptions::default());
        assert!(outcome.paragraphs.is_empty());
        assert_eq!(outcome.dropped, None);
    }

    #[test]
    fn test_tail_without_newline_is_dropped_by_default() {
        let outcome = parse_paragraphs_with("a\n\nb\nc", ParseOptions::default());
        assert_eq!(texts(&outcome.paragraphs), vec!["a\n"]);
        assert_eq!(outcome.dropped.as_deref(), Some("b\nc"));
        assert_eq!(outcome.dropped_lines(), 2);
    }

    #[test]
    fn test_flush_trailing_keeps_last_paragraph() {
        let options = ParseOptions {
            flush_trailing: true,
        };
        let outcome = parse_paragraphs_with("a\nb\n\nc\n\n\nd\n", options);
        assert_eq!(texts(&outcome.paragraphs), vec!["a\nb\n", "c\n", "d\n"]);
        assert_eq!(outcome.dropped, None);
    }

    #[test]
    fn test_bare_carriage_returns_end_lines() {
        let paragraphs = parse_paragraphs("a\r\rb\r\r");
        assert_eq!(texts(&paragraphs), vec!["a\r", "b\r"]);
    }

    #[test]
    fn test_mixed_line_endings() {
        let outcome = parse_paragraphs_with("a\r\nb\r\n\rc\n\nd\re", ParseOptions::default());
        assert_eq!(texts(&outcome.paragraphs), vec!["a\r\nb\r\n", "c\n"]);
        assert_eq!(outcome.dropped.as_deref(), Some("d\re"));
        assert_eq!(outcome.dropped_lines(), 2);
    }

    #[test]
    fn test_paragraph_display() {
        let paragraphs = parse_paragraphs("x\ny\nz\n\n");
        assert_eq!(paragraphs[0].to_string(), "x\ny\nz\n");
    }

    #[test]
    fn test_read_missing_source() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("subtitles.txt");

        let err = read_paragraphs(&path, ParseOptions::default()).unwrap_err();
        assert!(matches!(err, MergeError::SourceNotFound(p) if p == path));
    }

    #[test]
    fn test_read_invalid_utf8_is_io_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("subtitles.txt");
        fs::write(&path, b"\xff\xfe\n\n").unwrap();

        let err = read_paragraphs(&path, ParseOptions::default()).unwrap_err();
        assert!(matches!(err, MergeError::Io(e) if e.kind() == ErrorKind::InvalidData));
    }

    #[test]
    fn test_read_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("subtitles.txt");
        fs::write(&path, "Hello\nthere\n\nGeneral\n\n").unwrap();

        let outcome = read_paragraphs(&path, ParseOptions::default()).unwrap();
        assert_eq!(texts(&outcome.paragraphs), vec!["Hello\nthere\n", "General\n"]);
    }
}
