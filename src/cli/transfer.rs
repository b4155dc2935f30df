//! Import and export between files and the project store

use std::path::Path;

use anyhow::{bail, Result};

use super::output::Output;
use crate::domain::{tree, IdGenerator, Summary};
use crate::storage::exchange::{self, ExchangeFormat};
use crate::storage::{ImportMode, Project};

pub fn import(output: &Output, file: &Path, replace: bool, force: bool) -> Result<()> {
    let project = Project::open_current()?;
    let settings = &project.config().project.import;

    let mut document = exchange::read_document(file, &project.parse_options())?;
    output.verbose_ctx(
        "import",
        &format!("Read {} as {}", file.display(), document.format.as_str()),
    );

    if let Some(validation) = document.validation.as_ref().filter(|v| !v.valid) {
        output.diagnostics(&validation.errors);
        if settings.require_valid && !force {
            bail!(
                "{} has {} structural issue(s); fix them or pass --force",
                file.display(),
                validation.errors.len()
            );
        }
    }

    let mode = if replace { ImportMode::Replace } else { settings.mode };
    let store = project.topic_store();
    let mut ids = IdGenerator::new();
    match mode {
        ImportMode::Append => {
            let rekeyed = store.modify(|topics| {
                let rekeyed = tree::rekey_collisions(&mut ids, topics, &mut document.topics);
                topics.extend(document.topics.iter().cloned());
                Ok(rekeyed)
            })?;
            if rekeyed > 0 {
                output.verbose_ctx("import", &format!("Gave {} node(s) fresh IDs", rekeyed));
            }
        }
        ImportMode::Replace => {
            tree::rekey_collisions(&mut ids, &[], &mut document.topics);
            store.write_all(&document.topics)?
        }
    }
    output.verbose_ctx("import", &format!("Stored in {}", store.path().display()));

    let summary = Summary::of(&document.topics);
    if output.is_json() {
        output.data(&serde_json::json!({
            "file": file.display().to_string(),
            "mode": match mode {
                ImportMode::Append => "append",
                ImportMode::Replace => "replace",
            },
            "imported": summary,
        }));
    } else {
        output.success(&format!(
            "Imported {} topic(s), {} task(s), {} todo(s) from {}",
            summary.topics,
            summary.tasks,
            summary.todos,
            file.display()
        ));
    }

    Ok(())
}

pub fn export(output: &Output, as_format: Option<ExchangeFormat>, dest: Option<&Path>) -> Result<()> {
    let project = Project::open_current()?;
    let topics = project.topic_store().read_all()?;

    let format = as_format
        .or_else(|| dest.map(ExchangeFormat::from_path))
        .unwrap_or_default();
    output.verbose_ctx(
        "export",
        &format!("Exporting {} topic(s) as {}", topics.len(), format.as_str()),
    );

    match dest {
        Some(path) => {
            exchange::write_document(path, &topics, format)?;
            if output.is_json() {
                output.data(&serde_json::json!({
                    "output": path.display().to_string(),
                    "format": format.as_str(),
                    "topics": topics.len(),
                }));
            } else {
                output.success(&format!("Exported {} topic(s) to {}", topics.len(), path.display()));
            }
        }
        None => print!("{}", exchange::encode(&topics, format)?),
    }

    Ok(())
}
