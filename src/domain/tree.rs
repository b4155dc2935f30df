//! Lookups and edits over a sequence of topics
//!
//! Plans are plain `Vec<Topic>` trees; these helpers locate nodes by ID and
//! compute summary counts without any index structure.

use std::collections::HashSet;

use serde::Serialize;

use super::error::DomainError;
use super::id::{IdGenerator, NodeId};
use super::task::Task;
use super::todo::Todo;
use super::topic::Topic;

/// Kind of node in the plan tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Topic,
    Task,
    Todo,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Topic => "topic",
            NodeKind::Task => "task",
            NodeKind::Todo => "todo",
        }
    }
}

/// A node detached from the tree by [`remove_node`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovedNode {
    Topic(Topic),
    Task(Task),
    Todo(Todo),
}

impl RemovedNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            RemovedNode::Topic(_) => NodeKind::Topic,
            RemovedNode::Task(_) => NodeKind::Task,
            RemovedNode::Todo(_) => NodeKind::Todo,
        }
    }

    /// Name or title of the removed node
    pub fn label(&self) -> &str {
        match self {
            RemovedNode::Topic(t) => &t.name,
            RemovedNode::Task(t) => &t.name,
            RemovedNode::Todo(t) => &t.title,
        }
    }
}

/// Returns the kind of node an ID refers to
pub fn kind_of(topics: &[Topic], id: &NodeId) -> Option<NodeKind> {
    for topic in topics {
        if &topic.id == id {
            return Some(NodeKind::Topic);
        }
        for task in &topic.tasks {
            if &task.id == id {
                return Some(NodeKind::Task);
            }
            if task.todos.iter().any(|t| &t.id == id) {
                return Some(NodeKind::Todo);
            }
        }
    }
    None
}

/// Finds a topic by ID
pub fn find_topic_mut<'a>(topics: &'a mut [Topic], id: &NodeId) -> Result<&'a mut Topic, DomainError> {
    match topics.iter().position(|t| &t.id == id) {
        Some(pos) => Ok(&mut topics[pos]),
        None => Err(lookup_error(topics, id, NodeKind::Topic)),
    }
}

/// Finds a task by ID in any topic
pub fn find_task_mut<'a>(topics: &'a mut [Topic], id: &NodeId) -> Result<&'a mut Task, DomainError> {
    let kind = kind_of(topics, id);
    if kind != Some(NodeKind::Task) {
        return Err(kind_error(id, NodeKind::Task, kind));
    }

    topics
        .iter_mut()
        .flat_map(|topic| topic.tasks.iter_mut())
        .find(|task| &task.id == id)
        .ok_or_else(|| DomainError::NotFound(id.to_string()))
}

/// Finds a todo by ID in any task
pub fn find_todo_mut<'a>(topics: &'a mut [Topic], id: &NodeId) -> Result<&'a mut Todo, DomainError> {
    let kind = kind_of(topics, id);
    if kind != Some(NodeKind::Todo) {
        return Err(kind_error(id, NodeKind::Todo, kind));
    }

    topics
        .iter_mut()
        .flat_map(|topic| topic.tasks.iter_mut())
        .flat_map(|task| task.todos.iter_mut())
        .find(|todo| &todo.id == id)
        .ok_or_else(|| DomainError::NotFound(id.to_string()))
}

/// Removes a topic, task or todo by ID, along with everything it contains
pub fn remove_node(topics: &mut Vec<Topic>, id: &NodeId) -> Result<RemovedNode, DomainError> {
    if let Some(pos) = topics.iter().position(|t| &t.id == id) {
        return Ok(RemovedNode::Topic(topics.remove(pos)));
    }

    for topic in topics.iter_mut() {
        if let Some(task) = topic.remove_task(id) {
            return Ok(RemovedNode::Task(task));
        }
        for task in topic.tasks.iter_mut() {
            if let Some(todo) = task.remove_todo(id) {
                return Ok(RemovedNode::Todo(todo));
            }
        }
    }

    Err(DomainError::NotFound(id.to_string()))
}

/// Removes a node only if it is of the expected kind
pub fn remove_kind(
    topics: &mut Vec<Topic>,
    id: &NodeId,
    expected: NodeKind,
) -> Result<RemovedNode, DomainError> {
    let kind = kind_of(topics, id);
    if kind != Some(expected) {
        return Err(kind_error(id, expected, kind));
    }
    remove_node(topics, id)
}

/// Issues an ID not already used anywhere in `topics`
pub fn fresh_id(ids: &mut IdGenerator, topics: &[Topic]) -> NodeId {
    loop {
        let id = ids.next_id();
        if kind_of(topics, &id).is_none() {
            return id;
        }
    }
}

/// Gives fresh IDs to incoming nodes whose IDs are already taken
///
/// An ID is taken if it appears in `existing` or earlier in `incoming`.
/// Returns the number of nodes that were re-keyed.
pub fn rekey_collisions(ids: &mut IdGenerator, existing: &[Topic], incoming: &mut [Topic]) -> usize {
    let mut taken = HashSet::new();
    for topic in existing {
        taken.insert(topic.id.clone());
        for task in &topic.tasks {
            taken.insert(task.id.clone());
            taken.extend(task.todos.iter().map(|todo| todo.id.clone()));
        }
    }

    let mut rekeyed = 0;
    let mut claim = |id: &mut NodeId| {
        if taken.insert(id.clone()) {
            return;
        }
        let mut fresh = ids.next_id();
        while !taken.insert(fresh.clone()) {
            fresh = ids.next_id();
        }
        *id = fresh;
        rekeyed += 1;
    };

    for topic in incoming.iter_mut() {
        claim(&mut topic.id);
        for task in topic.tasks.iter_mut() {
            claim(&mut task.id);
            for todo in task.todos.iter_mut() {
                claim(&mut todo.id);
            }
        }
    }

    rekeyed
}

fn lookup_error(topics: &[Topic], id: &NodeId, expected: NodeKind) -> DomainError {
    kind_error(id, expected, kind_of(topics, id))
}

fn kind_error(id: &NodeId, expected: NodeKind, actual: Option<NodeKind>) -> DomainError {
    match actual {
        Some(actual) => DomainError::WrongKind {
            id: id.to_string(),
            expected: expected.as_str(),
            actual: actual.as_str(),
        },
        None => DomainError::NotFound(id.to_string()),
    }
}

/// Aggregate counts over a plan
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub topics: usize,
    pub tasks: usize,
    pub todos: usize,
    pub completed: usize,
    /// Mean todo progress, 0 when there are no todos
    pub average_progress: f64,
}

impl Summary {
    pub fn of(topics: &[Topic]) -> Self {
        let mut summary = Summary {
            topics: topics.len(),
            ..Default::default()
        };
        let mut progress_total: u64 = 0;

        for task in topics.iter().flat_map(|t| &t.tasks) {
            summary.tasks += 1;
            for todo in &task.todos {
                summary.todos += 1;
                if todo.completed {
                    summary.completed += 1;
                }
                progress_total += u64::from(todo.progress);
            }
        }

        if summary.todos > 0 {
            summary.average_progress = progress_total as f64 / summary.todos as f64;
        }

        summary
    }
}
