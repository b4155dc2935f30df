//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Project management | `init`, `status`, `list` |
//! | Outline | Project-free file tools | `validate`, `convert` |
//! | Transfer | Move plans in and out of the store | `import`, `export` |
//! | Edit | Change stored plans | `topic add`, `task add`, `todo progress` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! When the flag is omitted, `default_format` from the global config is used.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! planmark --verbose import plan.md
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod outline_cmd;
mod output;
mod query;
mod task;
mod todo;
mod topic;
mod transfer;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
