//! Read-only views over the stored plan (list, status)

use anyhow::Result;

use super::output::Output;
use crate::domain::Summary;
use crate::storage::Project;

/// Show every topic, task and todo with their IDs
pub fn list(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    output.verbose_ctx(
        "list",
        &format!("Opened project at: {}", project.root().display()),
    );

    let topics = project.topic_store().read_all()?;
    output.verbose_ctx("list", &format!("Loaded {} topics", topics.len()));

    if output.is_json() {
        output.data(&topics);
        return Ok(());
    }

    if topics.is_empty() {
        println!("No topics yet. Import an outline or run 'planmark topic add'.");
        return Ok(());
    }

    for topic in &topics {
        println!("{}  {}", topic.id, topic.name);
        for task in &topic.tasks {
            println!(
                "  {}  {} ({}/{})",
                task.id,
                task.name,
                task.completed_count(),
                task.todos.len()
            );
            for todo in &task.todos {
                let mark = if todo.completed { "x" } else { " " };
                println!("    [{}] {}  {} {}%", mark, todo.id, todo.title, todo.progress);
                if todo.has_note() {
                    println!("        note: {}", todo.note);
                }
            }
        }
    }

    Ok(())
}

/// Show plan summary
pub fn status(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    output.verbose_ctx(
        "status",
        &format!("Opened project at: {}", project.root().display()),
    );

    let summary = Summary::of(&project.topic_store().read_all()?);

    if output.is_json() {
        output.data(&summary);
    } else {
        println!("Project: {}", project.root().display());
        println!();
        println!("Topics: {}", summary.topics);
        println!("Tasks:  {}", summary.tasks);
        println!(
            "Todos:  {} ({} completed, {:.0}% average progress)",
            summary.todos, summary.completed, summary.average_progress
        );
    }

    Ok(())
}
