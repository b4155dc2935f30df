//! Structural lint for outline text
//!
//! Reports what the parser would have to repair: task headings before any
//! topic heading, todos before any task heading, and documents missing a
//! level altogether. The parser recovers from all of these on its own, so a
//! failed validation is a warning for the caller to show, not an error.

use std::fmt;

use serde::Serialize;

use super::line::{lines, LineKind};

/// What a diagnostic is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    TaskOutsideTopic,
    TodoOutsideTask,
    MissingTopic,
    MissingTask,
    MissingTodo,
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// 1-based line number; `None` for findings about the whole document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    fn at(line: usize, kind: DiagnosticKind, message: String) -> Self {
        Self {
            line: Some(line),
            kind,
            message,
        }
    }

    fn document(kind: DiagnosticKind, message: &str) -> Self {
        Self {
            line: None,
            kind,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Result of validating a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub valid: bool,
    pub errors: Vec<Diagnostic>,
}

impl Validation {
    fn from_errors(errors: Vec<Diagnostic>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Checks the structure of outline text
pub fn validate(text: &str) -> Validation {
    let mut has_topic = false;
    let mut has_task = false;
    let mut has_todo = false;
    let mut errors = Vec::new();

    for line in lines(text) {
        match line.kind {
            LineKind::TopicHeading(_) => has_topic = true,
            LineKind::TaskHeading(_) => {
                has_task = true;
                if !has_topic {
                    errors.push(Diagnostic::at(
                        line.number,
                        DiagnosticKind::TaskOutsideTopic,
                        format!("task \"{}\" is not inside any topic", line.trimmed()),
                    ));
                }
            }
            LineKind::ListItem { level: 0, .. } => {
                has_todo = true;
                if !has_task {
                    errors.push(Diagnostic::at(
                        line.number,
                        DiagnosticKind::TodoOutsideTask,
                        format!("todo \"{}\" is not inside any task", line.trimmed()),
                    ));
                }
            }
            _ => {}
        }
    }

    if !has_topic {
        errors.push(Diagnostic::document(
            DiagnosticKind::MissingTopic,
            "missing topic heading (# title)",
        ));
    }
    if !has_task {
        errors.push(Diagnostic::document(
            DiagnosticKind::MissingTask,
            "missing task heading (## title)",
        ));
    }
    if !has_todo {
        errors.push(Diagnostic::document(
            DiagnosticKind::MissingTodo,
            "missing todo item (- content)",
        ));
    }

    Validation::from_errors(errors)
}
