//! # Storage Layer
//!
//! Persistence and file exchange for planmark. Nothing in here is needed to
//! parse or render outlines; it is the shell around [`crate::outline`].
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Topics | JSONL (one topic per line) | `.planmark/topics.jsonl` |
//! | Config | TOML | `.planmark/config.toml` |
//! | Import/export | Outline text or JSON | anywhere |
//!
//! ## Concurrency Safety
//!
//! - [`TopicStore`] uses file locking (`fs2`) for concurrent access
//! - Full rewrites are atomic (temp file + rename)
//!
//! ## Key Types
//!
//! - [`Project`] - Entry point for accessing a planmark project
//! - [`TopicStore`] - Read/write topics as JSONL
//! - [`Config`] - Project and global configuration
//! - [`ExchangeFormat`] - Import/export file formats

mod config;
pub mod exchange;
mod jsonl;
mod project;

pub use config::{
    Config, ConfigError, GlobalConfig, ImportConfig, ImportMode, OutlineConfig, OutputFormat,
    ProjectConfig, PROJECT_DIR,
};
pub use exchange::{Document, ExchangeError, ExchangeFormat};
pub use jsonl::TopicStore;
pub use project::{Project, ProjectError};
