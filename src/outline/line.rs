//! Line classification
//!
//! Every line of an outline is classified on its own, from its prefix and
//! indentation alone:
//!
//! | Prefix (after indentation) | Kind |
//! |----------------------------|------|
//! | `# `                       | topic heading |
//! | `## `                      | task heading |
//! | `- `                       | list item, level = indentation / 2 |
//! | (whitespace only)          | blank |
//! | anything else              | plain text |

/// Spaces per indentation level
pub const INDENT_WIDTH: usize = 2;

const TOPIC_MARKER: &str = "# ";
const TASK_MARKER: &str = "## ";
const ITEM_MARKER: &str = "- ";

/// Classification of a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `# name`
    TopicHeading(&'a str),
    /// `## name`
    TaskHeading(&'a str),
    /// `- text`, indented by `level` units
    ListItem { level: usize, text: &'a str },
    Blank,
    Plain(&'a str),
}

impl LineKind<'_> {
    /// Returns true for topic and task headings
    pub fn is_heading(&self) -> bool {
        matches!(self, LineKind::TopicHeading(_) | LineKind::TaskHeading(_))
    }

    /// Returns true for a list item declaring a todo
    pub fn is_todo(&self) -> bool {
        matches!(self, LineKind::ListItem { level: 0, .. })
    }

    /// Lines that end a description or detail block
    pub fn is_boundary(&self) -> bool {
        self.is_heading() || self.is_todo()
    }
}

/// Classifies one line
pub fn classify(line: &str) -> LineKind<'_> {
    let line = line.trim_end();
    let content = line.trim_start();

    if content.is_empty() {
        return LineKind::Blank;
    }

    if let Some(name) = content.strip_prefix(TASK_MARKER) {
        return LineKind::TaskHeading(name.trim());
    }

    if let Some(name) = content.strip_prefix(TOPIC_MARKER) {
        return LineKind::TopicHeading(name.trim());
    }

    if let Some(text) = content.strip_prefix(ITEM_MARKER) {
        let indent = indent_width(&line[..line.len() - content.len()]);
        return LineKind::ListItem {
            level: indent / INDENT_WIDTH,
            text: text.trim(),
        };
    }

    LineKind::Plain(content)
}

/// Width of leading whitespace; a tab counts as one full level
fn indent_width(indent: &str) -> usize {
    indent
        .chars()
        .map(|c| if c == '\t' { INDENT_WIDTH } else { 1 })
        .sum()
}

/// A classified line with its 1-based position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub number: usize,
    pub raw: &'a str,
    pub kind: LineKind<'a>,
}

impl<'a> Line<'a> {
    /// The line with surrounding whitespace removed
    pub fn trimmed(&self) -> &'a str {
        self.raw.trim()
    }
}

/// Classifies every line of a document
pub fn lines(text: &str) -> impl Iterator<Item = Line<'_>> {
    text.lines().enumerate().map(|(idx, raw)| Line {
        number: idx + 1,
        raw,
        kind: classify(raw),
    })
}
