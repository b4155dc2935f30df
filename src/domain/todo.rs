//! Todo domain model
//!
//! Todos are the leaves of a plan: a single actionable item inside a task,
//! with a completion flag, a progress percentage and a free-form note.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::NodeId;

/// Highest accepted progress value
pub const MAX_PROGRESS: u8 = 100;

/// A single item of work inside a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier
    pub id: NodeId,

    /// Human-readable title
    pub title: String,

    /// Optional longer description (not part of the outline text)
    #[serde(default)]
    pub description: String,

    /// Whether the todo is done
    #[serde(default)]
    pub completed: bool,

    /// Completion percentage, 0-100
    #[serde(default)]
    pub progress: u8,

    /// Free-form note
    #[serde(default)]
    pub note: String,

    /// When the todo was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Creates a new, not yet started todo
    pub fn new(id: NodeId, title: impl Into<String>) -> Self {
        Self::created(id, title, Utc::now())
    }

    /// Creates a new todo with an explicit creation time
    pub fn created(id: NodeId, title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            completed: false,
            progress: 0,
            note: String::new(),
            created_at,
        }
    }

    /// Sets progress, rejecting values above 100
    ///
    /// Does not change `completed`.
    pub fn set_progress(&mut self, progress: u32) -> Result<(), DomainError> {
        if progress > u32::from(MAX_PROGRESS) {
            return Err(DomainError::InvalidProgress(progress));
        }
        self.progress = progress as u8;
        Ok(())
    }

    /// Sets progress from an outline detail line.
    ///
    /// Out-of-range values are clamped, and `completed` is derived: it is
    /// true exactly when the stated progress is 100.
    pub(crate) fn record_progress(&mut self, progress: u32) {
        self.progress = progress.min(u32::from(MAX_PROGRESS)) as u8;
        self.completed = self.progress == MAX_PROGRESS;
    }

    /// Marks the todo as done (progress is left untouched)
    pub fn complete(&mut self) {
        self.completed = true;
    }

    /// Marks the todo as not done
    pub fn reopen(&mut self) {
        self.completed = false;
    }

    /// Sets the note
    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    /// Returns true if the todo carries a non-blank note
    pub fn has_note(&self) -> bool {
        !self.note.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo() -> Todo {
        Todo::new(NodeId::new("td-1"), "Write docs")
    }

    #[test]
    fn new_todo_defaults() {
        let todo = todo();
        assert_eq!(todo.title, "Write docs");
        assert!(!todo.completed);
        assert_eq!(todo.progress, 0);
        assert!(todo.note.is_empty());
        assert!(!todo.has_note());
    }

    #[test]
    fn set_progress_does_not_complete() {
        let mut todo = todo();
        todo.set_progress(100).unwrap();
        assert_eq!(todo.progress, 100);
        assert!(!todo.completed);
    }

    #[test]
    fn set_progress_rejects_out_of_range() {
        let mut todo = todo();
        assert_eq!(todo.set_progress(101), Err(DomainError::InvalidProgress(101)));
        assert_eq!(todo.progress, 0);
    }

    #[test]
    fn complete_does_not_force_progress() {
        let mut todo = todo();
        todo.set_progress(40).unwrap();
        todo.complete();
        assert!(todo.completed);
        assert_eq!(todo.progress, 40);

        todo.reopen();
        assert!(!todo.completed);
    }

    #[test]
    fn record_progress_derives_completion() {
        let mut todo = todo();
        todo.record_progress(100);
        assert!(todo.completed);

        todo.record_progress(50);
        assert!(!todo.completed);
        assert_eq!(todo.progress, 50);

        todo.record_progress(250);
        assert_eq!(todo.progress, 100);
        assert!(todo.completed);
    }

    #[test]
    fn blank_note_is_not_a_note() {
        let mut todo = todo();
        todo.set_note("   ");
        assert!(!todo.has_note());
        todo.set_note("ask Bob");
        assert!(todo.has_note());
    }

    #[test]
    fn deserialize_camel_case_with_defaults() {
        let json = r#"{"id":"1","title":"Ship","createdAt":"2024-01-01T00:00:00Z"}"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo.title, "Ship");
        assert_eq!(todo.progress, 0);
        assert!(!todo.completed);
        assert!(todo.note.is_empty());

        let out = serde_json::to_value(&todo).unwrap();
        assert!(out.get("createdAt").is_some());
    }
}
