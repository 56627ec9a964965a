//! `hooks ls` rendering shared by crates and targets

use crate::common::RuntimeContext;
use crate::error::Result;
use crate::ui::{Palette, indented};
use clap::ValueEnum;
use serde::Serialize;
use synctropy_engine::{Entity, Reporter};
use synctropy_engine::hooks::{HookEntry, list_hooks};

/// Output format for listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented, human-readable lines
    #[default]
    Simple,
    /// A JSON array on stdout
    Json,
}

#[derive(Debug, Serialize)]
struct EntityHooks {
    entity: String,
    hooks: Vec<HookEntry>,
}

/// Print the hooks of every entity, with the entry command for each
pub fn print_hooks(
    context: &RuntimeContext,
    entities: &[&dyn Entity],
    format: OutputFormat,
) -> Result<()> {
    let shell = &context.program.default_shell;

    if format == OutputFormat::Json {
        let listing = entities
            .iter()
            .map(|entity| {
                Ok(EntityHooks {
                    entity: entity.label(),
                    hooks: list_hooks(*entity, shell)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    let reporter = context.reporter();
    let theme = reporter.theme();
    for (index, entity) in entities.iter().enumerate() {
        reporter.blank();
        reporter.counter(index + 1, entities.len());
        reporter.section(&format!("Listing hooks ({})", entity.label()), 0);

        let hooks = list_hooks(*entity, shell)?;
        if hooks.is_empty() {
            reporter.attention("No hooks found", 1);
        }
        for hook in hooks {
            let line = format!("- {} ({})", hook.name, theme.paint(Palette::ORANGE, &hook.entry));
            println!("{}", indented(&line, 1));
        }
    }
    Ok(())
}
