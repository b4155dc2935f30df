//! Todo CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::domain::tree::{self, NodeKind};
use crate::domain::{IdGenerator, NodeId, Todo};
use crate::storage::Project;

#[derive(Subcommand)]
pub enum TodoCommands {
    /// Add a todo to the end of a task
    Add {
        /// Task ID
        task: String,

        /// Todo title
        title: String,

        /// Initial note
        #[arg(long, short)]
        note: Option<String>,
    },

    /// Set progress (0-100)
    ///
    /// Does not change the done flag; use `done` or `reopen` for that.
    Progress {
        /// Todo ID
        id: String,

        /// Percentage
        progress: u32,
    },

    /// Replace the note
    Note {
        /// Todo ID
        id: String,

        /// Note text (empty clears it)
        text: String,
    },

    /// Mark as done
    Done {
        /// Todo ID
        id: String,
    },

    /// Mark as not done
    Reopen {
        /// Todo ID
        id: String,
    },

    /// Remove a todo
    Remove {
        /// Todo ID
        id: String,
    },
}

pub fn run(cmd: TodoCommands, output: &Output) -> Result<()> {
    match cmd {
        TodoCommands::Add { task, title, note } => add_todo(output, &task, &title, note),
        TodoCommands::Progress { id, progress } => {
            edit_todo(output, &id, "progress", |todo| Ok(todo.set_progress(progress)?))
        }
        TodoCommands::Note { id, text } => edit_todo(output, &id, "note", |todo| {
            todo.set_note(text);
            Ok(())
        }),
        TodoCommands::Done { id } => edit_todo(output, &id, "done", |todo| {
            todo.complete();
            Ok(())
        }),
        TodoCommands::Reopen { id } => edit_todo(output, &id, "reopen", |todo| {
            todo.reopen();
            Ok(())
        }),
        TodoCommands::Remove { id } => remove_todo(output, &id),
    }
}

fn add_todo(output: &Output, task_id: &str, title: &str, note: Option<String>) -> Result<()> {
    let project = Project::open_current()?;
    let task_id = NodeId::from(task_id);
    let mut ids = IdGenerator::new();

    let todo = project.topic_store().modify(|topics| {
        let id = tree::fresh_id(&mut ids, topics);
        let mut todo = Todo::created(id, title, ids.created_at());
        if let Some(note) = note {
            todo.set_note(note);
        }
        tree::find_task_mut(topics, &task_id)?.push_todo(todo.clone());
        Ok(todo)
    })?;
    output.verbose_ctx("todo", &format!("Added todo {} to task {}", todo.id, task_id));

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": todo.id,
            "task": task_id,
            "title": todo.title,
        }));
    } else {
        output.success(&format!("Created todo {}: {}", todo.id, todo.title));
    }

    Ok(())
}

/// Applies an edit to one todo and reports its new state
fn edit_todo(
    output: &Output,
    id: &str,
    action: &str,
    edit: impl FnOnce(&mut Todo) -> Result<()>,
) -> Result<()> {
    let project = Project::open_current()?;
    let id = NodeId::from(id);

    let todo = project.topic_store().modify(|topics| {
        let todo = tree::find_todo_mut(topics, &id)?;
        edit(todo)?;
        Ok(todo.clone())
    })?;
    output.verbose_ctx("todo", &format!("Applied {} to {}", action, id));

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": todo.id,
            "progress": todo.progress,
            "completed": todo.completed,
            "note": todo.note,
        }));
    } else {
        let state = if todo.completed { "done" } else { "open" };
        output.success(&format!(
            "Todo {}: {} ({}%, {})",
            todo.id, todo.title, todo.progress, state
        ));
    }

    Ok(())
}

fn remove_todo(output: &Output, id: &str) -> Result<()> {
    let project = Project::open_current()?;
    let id = NodeId::from(id);

    let removed = project
        .topic_store()
        .modify(|topics| Ok(tree::remove_kind(topics, &id, NodeKind::Todo)?))?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id,
            "removed": removed.label(),
        }));
    } else {
        output.success(&format!("Removed todo {}: {}", id, removed.label()));
    }

    Ok(())
}
