//! Topic domain model
//!
//! A topic is the top level of a plan and owns an ordered list of tasks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::NodeId;
use super::task::Task;

/// A topic heading and its tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Unique identifier
    pub id: NodeId,

    /// Human-readable name
    pub name: String,

    /// Description, newline-joined
    #[serde(default)]
    pub description: String,

    /// When the topic was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Tasks in order
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Topic {
    /// Creates a new empty topic
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self::created(id, name, Utc::now())
    }

    /// Creates a new empty topic with an explicit creation time
    pub fn created(id: NodeId, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            created_at,
            tasks: Vec::new(),
        }
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Appends a task
    pub fn push_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Removes a task (and its todos) by ID
    pub fn remove_task(&mut self, id: &NodeId) -> Option<Task> {
        let pos = self.tasks.iter().position(|t| &t.id == id)?;
        Some(self.tasks.remove(pos))
    }

    /// Returns a task by ID
    pub fn task(&self, id: &NodeId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Total number of todos across all tasks
    pub fn todo_count(&self) -> usize {
        self.tasks.iter().map(|t| t.todos.len()).sum()
    }
}
