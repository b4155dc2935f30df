//! Import/export file formats
//!
//! | Extension | Format |
//! |-----------|--------|
//! | `.json` | JSON array of topics, or `{"topics": [...]}` backups |
//! | anything else (`.md`, `.txt`, ...) | outline text |
//!
//! Outline input is validated before parsing so callers can show the
//! findings; the parse itself always succeeds.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{DomainError, Topic, MAX_PROGRESS};
use crate::outline::{self, ParseOptions, Validation};

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("Invalid JSON plan: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid JSON plan: todo '{id}': {source}")]
    InvalidTodo { id: String, source: DomainError },
}

/// Document format for import and export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeFormat {
    #[default]
    Outline,
    Json,
}

impl ExchangeFormat {
    /// Picks the format from a file extension
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExchangeFormat::Json,
            _ => ExchangeFormat::Outline,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeFormat::Outline => "outline",
            ExchangeFormat::Json => "json",
        }
    }
}

/// Accepted JSON layouts
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonPlan {
    Topics(Vec<Topic>),
    Backup { topics: Vec<Topic> },
}

/// A decoded document
#[derive(Debug, Clone)]
pub struct Document {
    pub format: ExchangeFormat,
    pub topics: Vec<Topic>,
    /// Structural findings; only outline input is validated
    pub validation: Option<Validation>,
}

impl Document {
    /// True when validation ran and reported findings
    pub fn has_findings(&self) -> bool {
        self.validation.as_ref().is_some_and(|v| !v.valid)
    }
}

/// Decodes document content
pub fn decode(
    content: &str,
    format: ExchangeFormat,
    options: &ParseOptions,
) -> Result<Document, ExchangeError> {
    match format {
        ExchangeFormat::Outline => Ok(Document {
            format,
            validation: Some(outline::validate(content)),
            topics: outline::parse_with(content, options),
        }),
        ExchangeFormat::Json => {
            let topics = match serde_json::from_str(content)? {
                JsonPlan::Topics(topics) | JsonPlan::Backup { topics } => topics,
            };
            check_progress(&topics)?;
            Ok(Document {
                format,
                topics,
                validation: None,
            })
        }
    }
}

/// Rejects todos whose progress lies outside 0-100
fn check_progress(topics: &[Topic]) -> Result<(), ExchangeError> {
    let out_of_range = topics
        .iter()
        .flat_map(|topic| &topic.tasks)
        .flat_map(|task| &task.todos)
        .find(|todo| todo.progress > MAX_PROGRESS);

    match out_of_range {
        Some(todo) => Err(ExchangeError::InvalidTodo {
            id: todo.id.to_string(),
            source: DomainError::InvalidProgress(u32::from(todo.progress)),
        }),
        None => Ok(()),
    }
}

/// Encodes topics in the given format
pub fn encode(topics: &[Topic], format: ExchangeFormat) -> Result<String, ExchangeError> {
    match format {
        ExchangeFormat::Outline => Ok(outline::render(topics)),
        ExchangeFormat::Json => {
            let mut json = serde_json::to_string_pretty(topics)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Reads and decodes a file, picking the format from its extension
pub fn read_document(path: &Path, options: &ParseOptions) -> Result<Document> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    decode(&content, ExchangeFormat::from_path(path), options)
        .with_context(|| format!("Failed to load {}", path.display()))
}

/// Encodes topics and writes them to a file
pub fn write_document(path: &Path, topics: &[Topic], format: ExchangeFormat) -> Result<()> {
    let content = encode(topics, format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
