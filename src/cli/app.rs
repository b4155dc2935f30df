//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{outline_cmd, query, task, todo, topic, transfer};
use crate::storage::{Config, ExchangeFormat, Project};

#[derive(Parser)]
#[command(name = "planmark")]
#[command(author, version, about = "Convert between outline text and Topic/Task/Todo plans")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new planmark project
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Check the structure of an outline file
    Validate {
        /// Outline file to check
        file: PathBuf,

        /// Fail when any issue is found
        #[arg(long)]
        strict: bool,
    },

    /// Convert between outline text and JSON
    ///
    /// The input format is taken from the file extension (.json is JSON,
    /// anything else is outline text). Without --to, the other format is
    /// produced. Works outside a project.
    Convert {
        /// Input file
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum)]
        to: Option<ExchangeFormat>,

        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Import an outline or JSON file into the project
    Import {
        /// File to import
        file: PathBuf,

        /// Replace stored topics instead of appending
        #[arg(long)]
        replace: bool,

        /// Import even if the outline has structural issues
        #[arg(long)]
        force: bool,
    },

    /// Export stored topics
    Export {
        /// Export format (defaults to the output file extension, then outline)
        #[arg(long = "as", value_enum)]
        as_format: Option<ExchangeFormat>,

        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Show stored topics as a tree
    List,

    /// Show plan summary
    Status,

    /// Manage topics
    #[command(subcommand)]
    Topic(topic::TopicCommands),

    /// Manage tasks
    #[command(subcommand)]
    Task(task::TaskCommands),

    /// Manage todos
    #[command(subcommand)]
    Todo(todo::TodoCommands),
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = match cli.format {
        Some(format) => format,
        None => Config::load_global()?.default_format.into(),
    };
    let output = Output::new(format, cli.verbose);

    output.verbose("planmark starting");

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing project at: {}", path));
            let project = Project::init(&path)?;
            output.verbose_ctx(
                "init",
                &format!("Created data directory at: {}", project.data_dir().display()),
            );
            output.success(&format!(
                "Initialized planmark project at {}",
                project.root().display()
            ));
        }

        Commands::Validate { file, strict } => outline_cmd::validate(&output, &file, strict)?,
        Commands::Convert { file, to, output: dest } => {
            outline_cmd::convert(&output, &file, to, dest.as_deref())?
        }

        Commands::Import { file, replace, force } => {
            transfer::import(&output, &file, replace, force)?
        }
        Commands::Export { as_format, output: dest } => {
            transfer::export(&output, as_format, dest.as_deref())?
        }

        Commands::List => query::list(&output)?,
        Commands::Status => query::status(&output)?,

        Commands::Topic(cmd) => topic::run(cmd, &output)?,
        Commands::Task(cmd) => task::run(cmd, &output)?,
        Commands::Todo(cmd) => todo::run(cmd, &output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
