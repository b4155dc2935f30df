//! Domain models for planmark
//!
//! The three-level plan hierarchy (Topic → Task → Todo) without any I/O
//! concerns.

mod error;
mod id;
mod task;
mod todo;
mod topic;
pub mod tree;

pub use error::DomainError;
pub use id::{IdGenerator, NodeId};
pub use task::Task;
pub use todo::{Todo, MAX_PROGRESS};
pub use topic::Topic;
pub use tree::{NodeKind, RemovedNode, Summary};
