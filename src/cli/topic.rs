//! Topic CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::domain::tree::{self, NodeKind};
use crate::domain::{IdGenerator, NodeId, Topic};
use crate::storage::Project;

#[derive(Subcommand)]
pub enum TopicCommands {
    /// Add a topic at the end of the plan
    Add {
        /// Topic name
        name: String,

        /// Topic description
        #[arg(long, short)]
        description: Option<String>,
    },

    /// Remove a topic with all its tasks and todos
    Remove {
        /// Topic ID
        id: String,
    },
}

pub fn run(cmd: TopicCommands, output: &Output) -> Result<()> {
    match cmd {
        TopicCommands::Add { name, description } => add_topic(output, &name, description),
        TopicCommands::Remove { id } => remove_topic(output, &id),
    }
}

fn add_topic(output: &Output, name: &str, description: Option<String>) -> Result<()> {
    let project = Project::open_current()?;
    let mut ids = IdGenerator::new();

    let topic = project.topic_store().modify(|topics| {
        let id = tree::fresh_id(&mut ids, topics);
        let topic = Topic::created(id, name, ids.created_at())
            .with_description(description.unwrap_or_default());
        topics.push(topic.clone());
        Ok(topic)
    })?;
    output.verbose_ctx("topic", &format!("Added topic {}", topic.id));

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": topic.id,
            "name": topic.name,
        }));
    } else {
        output.success(&format!("Created topic {}: {}", topic.id, topic.name));
    }

    Ok(())
}

fn remove_topic(output: &Output, id: &str) -> Result<()> {
    let project = Project::open_current()?;
    let id = NodeId::from(id);

    let removed = project
        .topic_store()
        .modify(|topics| Ok(tree::remove_kind(topics, &id, NodeKind::Topic)?))?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id,
            "removed": removed.label(),
        }));
    } else {
        output.success(&format!("Removed topic {}: {}", id, removed.label()));
    }

    Ok(())
}
