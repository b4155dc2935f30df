//! Outline renderer (topics → text)
//!
//! Produces the canonical text form:
//!
//! ```text
//! # <topic>
//! <topic description>
//!
//! ## <task>
//! <task description>
//!
//! - <todo>
//!   - progress: <n>%
//!   - note: <note>
//! ```
//!
//! Descriptions and notes are only written when present; the progress line
//! always is. IDs, timestamps, `completed` and todo descriptions are not part
//! of the text and do not survive a round trip.

use crate::domain::{Task, Todo, Topic};

/// Renders topics to canonical outline text
///
/// The result ends with a single newline, or is empty for an empty plan.
pub fn render(topics: &[Topic]) -> String {
    let mut out = String::new();

    for topic in topics {
        render_topic(&mut out, topic);
    }

    let trimmed = out.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}\n", trimmed)
    }
}

fn render_topic(out: &mut String, topic: &Topic) {
    heading(out, "#", &topic.name, &topic.description);

    for task in &topic.tasks {
        render_task(out, task);
    }
}

fn render_task(out: &mut String, task: &Task) {
    heading(out, "##", &task.name, &task.description);

    for todo in &task.todos {
        render_todo(out, todo);
    }
    if !task.todos.is_empty() {
        out.push('\n');
    }
}

fn render_todo(out: &mut String, todo: &Todo) {
    out.push_str(&format!("- {}\n", todo.title));
    out.push_str(&format!("  - progress: {}%\n", todo.progress));
    if todo.has_note() {
        out.push_str(&format!("  - note: {}\n", todo.note));
    }
}

fn heading(out: &mut String, marker: &str, name: &str, description: &str) {
    out.push_str(&format!("{} {}\n", marker, name));
    if !description.is_empty() {
        out.push_str(description);
        out.push('\n');
    }
    out.push('\n');
}
