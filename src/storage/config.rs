//! Configuration handling for planmark
//!
//! Configuration is stored in `.planmark/config.toml` (project) and
//! `~/.config/planmark/config.toml` (global).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::outline::{ParseOptions, DEFAULT_TASK_NAME, DEFAULT_TOPIC_NAME};

/// Name of the per-project data directory
pub const PROJECT_DIR: &str = ".planmark";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Settings for outline parsing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutlineConfig {
    /// Name given to the topic created for tasks that precede any topic
    pub default_topic_name: String,

    /// Name given to the task created for todos that precede any task
    pub default_task_name: String,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            default_topic_name: DEFAULT_TOPIC_NAME.to_string(),
            default_task_name: DEFAULT_TASK_NAME.to_string(),
        }
    }
}

impl OutlineConfig {
    /// Parser options for these settings
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            default_topic_name: self.default_topic_name.clone(),
            default_task_name: self.default_task_name.clone(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_topic_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "outline.default_topic_name must not be empty".to_string(),
            ));
        }
        if self.default_task_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "outline.default_task_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// How imported topics are combined with the stored ones
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Add imported topics after the existing ones
    #[default]
    Append,
    /// Discard stored topics first
    Replace,
}

/// Settings for `planmark import`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ImportConfig {
    /// Refuse outlines with validation findings unless `--force` is given
    pub require_valid: bool,

    /// Default import mode
    pub mode: ImportMode,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            require_valid: true,
            mode: ImportMode::Append,
        }
    }
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Outline parsing settings
    pub outline: OutlineConfig,

    /// Import settings
    pub import: ImportConfig,
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
}

impl Config {
    /// Loads configuration for a specific project
    pub fn for_project(project_root: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project_config(project_root)?;

        Ok(Self { project, global })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "planmark", "planmark").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    pub fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Loads project configuration from a specific root
    fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
        let config_path = project_root.join(PROJECT_DIR).join("config.toml");

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse project config")?;

        config
            .outline
            .validate()
            .with_context(|| format!("Invalid project config: {}", config_path.display()))?;

        Ok(config)
    }

    /// Finds the project root by looking for a `.planmark/` directory
    pub fn find_project_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::find_project_root_from(&current)
    }

    /// Finds the project root starting from `start` and walking up
    pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(PROJECT_DIR).is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }
}
