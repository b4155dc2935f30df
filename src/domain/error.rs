//! Errors raised by programmatic edits of the plan tree

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid progress: expected 0-100, got {0}")]
    InvalidProgress(u32),

    #[error("No topic, task or todo with ID '{0}'")]
    NotFound(String),

    #[error("'{id}' is a {actual}, expected a {expected}")]
    WrongKind {
        id: String,
        expected: &'static str,
        actual: &'static str,
    },
}
