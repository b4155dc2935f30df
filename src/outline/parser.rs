//! Outline parser (text → topics)
//!
//! A single pass over classified lines with two open cursors, the current
//! topic and the current task. Headings close whatever is open at their
//! level and below; todos attach to the current task.
//!
//! Input that is out of order never fails. A task heading with no open topic
//! gets a default topic, and a todo with no open task gets a default task
//! (and topic). Attachment is decided when a node is first seen and is not
//! revisited when a real heading shows up later.

use chrono::{DateTime, Utc};

use super::line::{lines, Line, LineKind};
use crate::domain::{IdGenerator, Task, Todo, Topic};

/// Name of the topic synthesized for tasks that precede any topic heading
pub const DEFAULT_TOPIC_NAME: &str = "Default Topic";

/// Name of the task synthesized for todos that precede any task heading
pub const DEFAULT_TASK_NAME: &str = "Default Task";

const PROGRESS_LABELS: &[&str] = &["progress", "进度"];
const NOTE_LABELS: &[&str] = &["note", "备注"];

/// Options controlling parse recovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub default_topic_name: String,
    pub default_task_name: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            default_topic_name: DEFAULT_TOPIC_NAME.to_string(),
            default_task_name: DEFAULT_TASK_NAME.to_string(),
        }
    }
}

/// Parses outline text with default options
pub fn parse(text: &str) -> Vec<Topic> {
    parse_with(text, &ParseOptions::default())
}

/// Parses outline text
///
/// Always succeeds; the result is empty when the text holds no headings or
/// todos.
pub fn parse_with(text: &str, options: &ParseOptions) -> Vec<Topic> {
    Parser::new(text, options).run()
}

/// A recognised todo detail field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Detail<'a> {
    Progress(u32),
    Note(&'a str),
}

impl<'a> Detail<'a> {
    /// Parses the text of a level-1 list item
    fn parse(text: &'a str) -> Option<Self> {
        if let Some(value) = labelled(text, PROGRESS_LABELS) {
            return percentage(value).map(Detail::Progress);
        }
        labelled(text, NOTE_LABELS).map(|value| Detail::Note(value.trim()))
    }
}

/// Strips `<label>:` (or full-width `：`) from the start of `text`
fn labelled<'a>(text: &'a str, labels: &[&str]) -> Option<&'a str> {
    labels.iter().find_map(|label| {
        let head = text.get(..label.len())?;
        if !head.eq_ignore_ascii_case(label) {
            return None;
        }
        let rest = text[label.len()..].trim_start();
        rest.strip_prefix(':').or_else(|| rest.strip_prefix('：'))
    })
}

/// Reads `<digits>%`
fn percentage(value: &str) -> Option<u32> {
    let value = value.trim_start();
    let digits_end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    if digits_end == 0 {
        return None;
    }

    if !value[digits_end..].trim_start().starts_with('%') {
        return None;
    }

    // Overlong digit runs saturate and are clamped later.
    Some(value[..digits_end].parse().unwrap_or(u32::MAX))
}

struct Parser<'a> {
    lines: Vec<Line<'a>>,
    pos: usize,
    options: &'a ParseOptions,
    ids: IdGenerator,
    now: DateTime<Utc>,
    topics: Vec<Topic>,
    current_topic: Option<Topic>,
    current_task: Option<Task>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, options: &'a ParseOptions) -> Self {
        let ids = IdGenerator::new();
        let now = ids.created_at();
        Self {
            lines: lines(text).collect(),
            pos: 0,
            options,
            ids,
            now,
            topics: Vec::new(),
            current_topic: None,
            current_task: None,
        }
    }

    fn run(mut self) -> Vec<Topic> {
        while let Some(line) = self.advance() {
            match line.kind {
                LineKind::TopicHeading(name) => self.open_topic(name),
                LineKind::TaskHeading(name) => self.open_task(name),
                LineKind::ListItem { level: 0, text } => self.add_todo(text),
                _ => {}
            }
        }

        self.flush_topic();
        self.topics
    }

    fn peek(&self) -> Option<Line<'a>> {
        self.lines.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Line<'a>> {
        let line = self.peek()?;
        self.pos += 1;
        Some(line)
    }

    fn open_topic(&mut self, name: &str) {
        self.flush_topic();

        let mut topic = Topic::created(self.ids.next_id(), name, self.now);
        topic.description = self.collect_description();
        self.current_topic = Some(topic);
    }

    fn open_task(&mut self, name: &str) {
        self.ensure_topic();
        self.flush_task();

        let mut task = Task::created(self.ids.next_id(), name, self.now);
        task.description = self.collect_description();
        self.current_task = Some(task);
    }

    fn add_todo(&mut self, title: &str) {
        let mut todo = Todo::created(self.ids.next_id(), title, self.now);
        self.collect_details(&mut todo);
        self.ensure_task().push_todo(todo);
    }

    fn ensure_topic(&mut self) -> &mut Topic {
        let (ids, now) = (&mut self.ids, self.now);
        let name = &self.options.default_topic_name;
        self.current_topic
            .get_or_insert_with(|| Topic::created(ids.next_id(), name.as_str(), now))
    }

    fn ensure_task(&mut self) -> &mut Task {
        if self.current_task.is_none() {
            self.ensure_topic();
        }
        let (ids, now) = (&mut self.ids, self.now);
        let name = &self.options.default_task_name;
        self.current_task
            .get_or_insert_with(|| Task::created(ids.next_id(), name.as_str(), now))
    }

    fn flush_task(&mut self) {
        if let Some(task) = self.current_task.take() {
            self.ensure_topic().push_task(task);
        }
    }

    fn flush_topic(&mut self) {
        self.flush_task();
        if let Some(topic) = self.current_topic.take() {
            self.topics.push(topic);
        }
    }

    /// Joins the non-blank lines up to the next heading or todo
    fn collect_description(&mut self) -> String {
        let mut parts = Vec::new();

        while let Some(line) = self.peek() {
            if line.kind.is_boundary() {
                break;
            }
            self.pos += 1;
            if line.kind != LineKind::Blank {
                parts.push(line.trimmed());
            }
        }

        parts.join("\n")
    }

    /// Applies level-1 detail items up to the next heading or todo
    fn collect_details(&mut self, todo: &mut Todo) {
        while let Some(line) = self.peek() {
            if line.kind.is_boundary() {
                break;
            }
            self.pos += 1;

            let LineKind::ListItem { level: 1, text } = line.kind else {
                continue;
            };
            match Detail::parse(text) {
                Some(Detail::Progress(value)) => todo.record_progress(value),
                Some(Detail::Note(note)) => todo.set_note(note),
                None => {}
            }
        }
    }
}
