//! JSONL storage for topics
//!
//! Topics are stored in `.planmark/topics.jsonl` with one JSON object per
//! line, in plan order. Uses file locking for concurrent access safety.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::config::PROJECT_DIR;
use crate::domain::Topic;

/// Store for topic data in JSONL format
pub struct TopicStore {
    path: PathBuf,
}

impl TopicStore {
    /// Creates a new topic store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the default store for a project
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(project_root.join(PROJECT_DIR).join("topics.jsonl"))
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all topics in stored order
    pub fn read_all(&self) -> Result<Vec<Topic>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open topic store: {}", self.path.display()))?;

        // Acquire shared lock for reading
        file.lock_shared()
            .context("Failed to acquire read lock on topic store")?;

        let reader = BufReader::new(&file);
        let mut topics = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

            if line.trim().is_empty() {
                continue;
            }

            let topic: Topic = serde_json::from_str(&line)
                .with_context(|| format!("Failed to parse topic at line {}", line_num + 1))?;

            topics.push(topic);
        }

        // Lock is released when file is dropped
        Ok(topics)
    }

    /// Writes all topics to the store (full rewrite)
    pub fn write_all(&self, topics: &[Topic]) -> Result<()> {
        self.ensure_parent()?;

        // Write to temp file first
        let temp_path = self.path.with_extension("jsonl.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            // Acquire exclusive lock
            file.lock_exclusive()
                .context("Failed to acquire write lock on topic store")?;

            let mut writer = BufWriter::new(&file);

            for topic in topics {
                let line = serde_json::to_string(topic).context("Failed to serialize topic")?;
                writeln!(writer, "{}", line).context("Failed to write topic")?;
            }

            writer.flush().context("Failed to flush topic store")?;
        }

        // Atomic rename
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    /// Appends topics after the stored ones without a full rewrite
    pub fn append(&self, topics: &[Topic]) -> Result<()> {
        self.ensure_parent()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open topic store: {}", self.path.display()))?;

        // Acquire exclusive lock
        file.lock_exclusive()
            .context("Failed to acquire write lock on topic store")?;

        let mut writer = BufWriter::new(&file);
        for topic in topics {
            let line = serde_json::to_string(topic).context("Failed to serialize topic")?;
            writeln!(writer, "{}", line).context("Failed to write topic")?;
        }

        writer.flush().context("Failed to flush topic store")?;

        Ok(())
    }

    /// Reads all topics, applies `edit`, and writes the result back
    pub fn modify<T>(&self, edit: impl FnOnce(&mut Vec<Topic>) -> Result<T>) -> Result<T> {
        let mut topics = self.read_all()?;
        let value = edit(&mut topics)?;
        self.write_all(&topics)?;
        Ok(value)
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        Ok(())
    }
}
