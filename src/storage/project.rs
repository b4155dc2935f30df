//! Project management
//!
//! Handles project initialization and provides access to the topic store.
//! A [`Project`] is the explicit context handed to every command that
//! touches stored plans.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::config::PROJECT_DIR;
use super::{Config, TopicStore};
use crate::outline::ParseOptions;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a planmark project. Run 'planmark init' first.")]
    NotInProject,
}

const DEFAULT_CONFIG: &str = r#"# planmark configuration

[outline]
# Name of the topic created for tasks that appear before any '# topic'
default_topic_name = "Default Topic"
# Name of the task created for todos that appear before any '## task'
default_task_name = "Default Task"

[import]
# Refuse outlines with structural warnings unless --force is given
require_valid = true
# "append" or "replace"
mode = "append"
"#;

const GITIGNORE: &str = r#"# Temp files from interrupted writes
*.tmp
"#;

/// A planmark project
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(PROJECT_DIR).is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the project at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_project_root().ok_or(ProjectError::NotInProject)?;

        Self::open(root)
    }

    /// Initializes a new project at the given path
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let data_dir = root.join(PROJECT_DIR);

        fs::create_dir_all(&data_dir).with_context(|| {
            format!("Failed to create {} directory: {}", PROJECT_DIR, data_dir.display())
        })?;

        write_if_missing(&data_dir.join("config.toml"), DEFAULT_CONFIG)?;
        write_if_missing(&data_dir.join(".gitignore"), GITIGNORE)?;

        let store = TopicStore::for_project(&root);
        if !store.path().exists() {
            store.write_all(&[])?;
        }

        Self::open(root)
    }

    /// Returns the project root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .planmark directory path
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the topic store
    pub fn topic_store(&self) -> TopicStore {
        TopicStore::for_project(&self.root)
    }

    /// Parser options from the project configuration
    pub fn parse_options(&self) -> ParseOptions {
        self.config.project.outline.parse_options()
    }
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
