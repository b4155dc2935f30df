//! Task domain model
//!
//! Tasks group the todos of a topic. Todo order is insertion order and is
//! what the outline renderer emits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::NodeId;
use super::todo::Todo;

/// A task within a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier
    pub id: NodeId,

    /// Human-readable name
    pub name: String,

    /// Description, newline-joined
    #[serde(default)]
    pub description: String,

    /// When the task was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Todos in order
    #[serde(default)]
    pub todos: Vec<Todo>,
}

impl Task {
    /// Creates a new empty task
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self::created(id, name, Utc::now())
    }

    /// Creates a new empty task with an explicit creation time
    pub fn created(id: NodeId, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            created_at,
            todos: Vec::new(),
        }
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Appends a todo
    pub fn push_todo(&mut self, todo: Todo) {
        self.todos.push(todo);
    }

    /// Removes a todo by ID, returning it
    pub fn remove_todo(&mut self, id: &NodeId) -> Option<Todo> {
        let pos = self.todos.iter().position(|t| &t.id == id)?;
        Some(self.todos.remove(pos))
    }

    /// Returns a todo by ID
    pub fn todo(&self, id: &NodeId) -> Option<&Todo> {
        self.todos.iter().find(|t| &t.id == id)
    }

    /// Number of completed todos
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }
}
