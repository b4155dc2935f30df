//! Outline file commands that work without a project

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use super::output::Output;
use crate::domain::Summary;
use crate::outline::{self, ParseOptions};
use crate::storage::exchange::{self, ExchangeFormat};
use crate::storage::{Config, Project};

pub fn validate(output: &Output, file: &Path, strict: bool) -> Result<()> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let validation = outline::validate(&content);
    output.verbose_ctx(
        "validate",
        &format!("{} finding(s) in {}", validation.errors.len(), file.display()),
    );

    if output.is_json() {
        output.data(&validation);
    } else if validation.valid {
        println!("{}: ok", file.display());
    } else {
        println!("{}: {} issue(s)", file.display(), validation.errors.len());
        for diagnostic in &validation.errors {
            println!("  {}", diagnostic);
        }
    }

    if strict && !validation.valid {
        bail!("{} has structural issues", file.display());
    }

    Ok(())
}

pub fn convert(
    output: &Output,
    file: &Path,
    to: Option<ExchangeFormat>,
    dest: Option<&Path>,
) -> Result<()> {
    let options = parse_options(output)?;
    let document = exchange::read_document(file, &options)?;

    let target = to.unwrap_or(match document.format {
        ExchangeFormat::Outline => ExchangeFormat::Json,
        ExchangeFormat::Json => ExchangeFormat::Outline,
    });
    output.verbose_ctx(
        "convert",
        &format!("{} -> {}", document.format.as_str(), target.as_str()),
    );

    if let Some(validation) = &document.validation {
        output.diagnostics(&validation.errors);
    }

    match dest {
        Some(path) => {
            exchange::write_document(path, &document.topics, target)?;
            let summary = Summary::of(&document.topics);

            if output.is_json() {
                output.data(&serde_json::json!({
                    "output": path.display().to_string(),
                    "format": target.as_str(),
                    "summary": summary,
                }));
            } else {
                output.success(&format!(
                    "Wrote {} topic(s), {} task(s), {} todo(s) to {}",
                    summary.topics,
                    summary.tasks,
                    summary.todos,
                    path.display()
                ));
            }
        }
        None => print!("{}", exchange::encode(&document.topics, target)?),
    }

    Ok(())
}

/// Parser options from the enclosing project, or the built-in defaults
fn parse_options(output: &Output) -> Result<ParseOptions> {
    match Config::find_project_root() {
        Some(root) => {
            output.verbose_ctx("config", &format!("Using project at {}", root.display()));
            Ok(Project::open(root)?.parse_options())
        }
        None => Ok(ParseOptions::default()),
    }
}
