//! planmark - outline text to Topic/Task/Todo plans and back
//!
//! Outlines use `#` for topics, `##` for tasks and `- ` list items for
//! todos, with indented `progress:` and `note:` detail lines. The
//! [`outline`] module converts between that text and the [`domain`] tree;
//! [`storage`] and [`cli`] wrap it in a small local-first tool.

pub mod domain;
pub mod outline;
pub mod storage;
pub mod cli;

pub use domain::{NodeId, Task, Todo, Topic};
pub use outline::{parse, parse_with, render, validate, ParseOptions, Validation};
