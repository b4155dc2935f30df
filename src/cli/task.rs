//! Task CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::domain::tree::{self, NodeKind};
use crate::domain::{IdGenerator, NodeId, Task};
use crate::storage::Project;

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task to the end of a topic
    ///
    /// Example:
    ///   planmark task add 1718000000000a1b2c3d4e "Write docs"
    Add {
        /// Topic ID
        topic: String,

        /// Task name
        name: String,

        /// Task description
        #[arg(long, short)]
        description: Option<String>,
    },

    /// Remove a task with all its todos
    Remove {
        /// Task ID
        id: String,
    },
}

pub fn run(cmd: TaskCommands, output: &Output) -> Result<()> {
    match cmd {
        TaskCommands::Add {
            topic,
            name,
            description,
        } => add_task(output, &topic, &name, description),
        TaskCommands::Remove { id } => remove_task(output, &id),
    }
}

fn add_task(output: &Output, topic_id: &str, name: &str, description: Option<String>) -> Result<()> {
    let project = Project::open_current()?;
    let topic_id = NodeId::from(topic_id);
    let mut ids = IdGenerator::new();

    let task = project.topic_store().modify(|topics| {
        let id = tree::fresh_id(&mut ids, topics);
        let task = Task::created(id, name, ids.created_at())
            .with_description(description.unwrap_or_default());
        tree::find_topic_mut(topics, &topic_id)?.push_task(task.clone());
        Ok(task)
    })?;
    output.verbose_ctx("task", &format!("Added task {} to topic {}", task.id, topic_id));

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": task.id,
            "topic": topic_id,
            "name": task.name,
        }));
    } else {
        output.success(&format!("Created task {}: {}", task.id, task.name));
    }

    Ok(())
}

fn remove_task(output: &Output, id: &str) -> Result<()> {
    let project = Project::open_current()?;
    let id = NodeId::from(id);

    let removed = project
        .topic_store()
        .modify(|topics| Ok(tree::remove_kind(topics, &id, NodeKind::Task)?))?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id,
            "removed": removed.label(),
        }));
    } else {
        output.success(&format!("Removed task {}: {}", id, removed.label()));
    }

    Ok(())
}
