//! SRT templates with positional placeholders.
//!
//! A template is parsed once into literal and placeholder segments, then rendered against
//! the paragraph list. Parsing and rendering never touch the filesystem; [`read_template`]
//! and [`write_output`] are the only I/O here.
//!
//! Placeholder syntax:
//!
//! - `{0}`, `{1}`, ... insert the paragraph with that zero-based index
//! - `{}` inserts the next paragraph in sequence (cannot be mixed with `{N}`)
//! - `{{` and `}}` are literal braces

use crate::error::{MergeError, Result};
use crate::paragraph::Paragraph;
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Numbering {
    Unknown,
    Automatic,
    Explicit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(text: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut numbering = Numbering::Unknown;
        let mut next_auto = 0usize;
        let mut chars = text.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            match c {
                '{' => {
                    if chars.next_if(|&(_, c)| c == '{').is_some() {
                        literal.push('{');
                        continue;
                    }

                    let mut field = String::new();
                    let mut closed = false;
                    for (inner, c) in chars.by_ref() {
                        match c {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => {
                                return Err(MergeError::syntax(
                                    inner,
                                    "unexpected '{' inside placeholder",
                                ))
                            }
                            _ => field.push(c),
                        }
                    }
                    if !closed {
                        return Err(MergeError::syntax(offset, "unterminated placeholder"));
                    }

                    let index = if field.is_empty() {
                        if numbering == Numbering::Explicit {
                            return Err(MergeError::syntax(
                                offset,
                                "cannot mix '{}' with numbered placeholders",
                            ));
                        }
                        numbering = Numbering::Automatic;
                        next_auto += 1;
                        next_auto - 1
                    } else if field.bytes().all(|b| b.is_ascii_digit()) {
                        if numbering == Numbering::Automatic {
                            return Err(MergeError::syntax(
                                offset,
                                "cannot mix numbered placeholders with '{}'",
                            ));
                        }
                        numbering = Numbering::Explicit;
                        field.parse::<usize>().map_err(|_| {
                            MergeError::syntax(offset, format!("index too large: {{{field}}}"))
                        })?
                    } else {
                        return Err(MergeError::syntax(
                            offset,
                            format!("unsupported placeholder {{{field}}}"),
                        ));
                    };

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(index));
                }
                '}' => {
                    if chars.next_if(|&(_, c)| c == '}').is_none() {
                        return Err(MergeError::syntax(offset, "single '}' in template"));
                    }
                    literal.push('}');
                }
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(i) => Some(*i),
            Segment::Literal(_) => None,
        })
    }

    pub fn placeholder_count(&self) -> usize {
        self.indices().count()
    }

    pub fn max_index(&self) -> Option<usize> {
        self.indices().max()
    }

    /// Paragraphs out of `available` that no placeholder refers to.
    pub fn unused_paragraphs(&self, available: usize) -> usize {
        let used: BTreeSet<usize> = self.indices().filter(|&i| i < available).collect();
        available - used.len()
    }

    /// Substitutes paragraphs into the template. Fails before producing any text if a
    /// placeholder points past the end of `paragraphs`.
    pub fn render(&self, paragraphs: &[Paragraph]) -> Result<String> {
        if let Some(index) = self.max_index() {
            if index >= paragraphs.len() {
                return Err(MergeError::PlaceholderIndex {
                    index,
                    available: paragraphs.len(),
                });
            }
        }

        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(i) => out.push_str(paragraphs[*i].as_str()),
            }
        }
        Ok(out)
    }
}

/// Parses `template_text` and fills it with `paragraphs`.
pub fn merge(template_text: &str, paragraphs: &[Paragraph]) -> Result<String> {
    Template::parse(template_text)?.render(paragraphs)
}

pub fn read_template(path: &Path) -> Result<Template> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => MergeError::TemplateNotFound(path.to_path_buf()),
        _ => MergeError::Io(e),
    })?;

    let template = Template::parse(&text)?;
    debug!(
        path = %path.display(),
        placeholders = template.placeholder_count(),
        "parsed template"
    );
    Ok(template)
}

/// Writes the merged text, replacing whatever is at `path`.
pub fn write_output(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(MergeError::Io)?;
    debug!(path = %path.display(), bytes = text.len(), "wrote output");
    Ok(())
}
