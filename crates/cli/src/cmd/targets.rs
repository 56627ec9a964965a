//! `targets` subcommands

use super::hooks::{OutputFormat, print_hooks};
use super::{BatchFlags, print_item};
use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::{CommandError, Result};
use crate::selection::{CrateSelection, TargetSelection};
use crate::ui::prompt;
use clap::Args;
use synctropy_core::Error;
use synctropy_engine::{Entity, MarkerChange, Reporter, Scratch, TargetBatch, Template};

/// List targets of each crate with their `ls` descriptions
#[derive(Debug, Args)]
pub struct LsCommand {
    #[command(flatten)]
    pub selection: CrateSelection,
}

impl Command for LsCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let catalog = context.catalog();
        let crates = self.selection.resolve(&catalog)?;
        let reporter = context.reporter();
        let executor = context.executor();
        let orchestrator = context.orchestrator(&executor, Scratch::MANAGED);

        for (index, krate) in crates.iter().enumerate() {
            reporter.blank();
            reporter.counter(index + 1, crates.len());
            reporter.section(&format!("Listing targets ({})", krate.label()), 0);
            reporter.blank();

            let targets = catalog.targets(krate)?;
            if targets.is_empty() {
                reporter.attention("No targets found", 1);
            }
            for target in &targets {
                let mut description = orchestrator.describe(target);
                if target.is_disabled().map_err(Error::from)? {
                    description = Some(match description {
                        Some(text) => format!("{text}, disabled"),
                        None => "disabled".to_string(),
                    });
                }
                print_item(context, &target.name, description.as_deref(), 1);
            }
        }
        Ok(())
    }
}

/// Create a target inside an existing crate
#[derive(Debug, Args)]
pub struct CreateCommand {
    /// Crate name
    #[arg(short = 'c', long = "crate", value_name = "NAME")]
    pub krate: String,

    /// Target name
    pub name: String,

    /// Target template to copy from the templates directory
    #[arg(long, value_name = "NAME")]
    pub template: Option<String>,
}

impl Command for CreateCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let krate = context.catalog().crate_named(&self.krate)?;
        let template = self
            .template
            .as_deref()
            .map(|name| Template::find(&context.program.target_templates_dir, name))
            .transpose()?;
        let target = krate.target(&self.name);

        let executor = context.executor();
        context
            .orchestrator(&executor, Scratch::MANAGED)
            .create_target(&target, template.as_ref())?;
        Ok(())
    }
}

/// Remove targets
#[derive(Debug, Args)]
pub struct RmCommand {
    #[command(flatten)]
    pub selection: TargetSelection,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

impl Command for RmCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let (krate, targets) = self.selection.resolve(&context.catalog())?;
        let reporter = context.reporter();

        if !self.yes {
            reporter.blank();
            reporter.attention(
                &format!(
                    "This action will delete {} targets from crate '{}'",
                    targets.len(),
                    krate.name
                ),
                0,
            );
            if !prompt::confirm(
                "Enter 'yes/y' to confirm or 'no/n' to cancel the operation",
                1,
            )? {
                return Err(CommandError::Cancelled);
            }
        }

        let executor = context.executor();
        let orchestrator = context.orchestrator(&executor, Scratch::MANAGED);
        for (index, target) in targets.iter().enumerate() {
            reporter.blank();
            reporter.counter(index + 1, targets.len());
            reporter.section(&format!("Removing ({})", target.label()), 0);
            orchestrator.remove_target(target, 1)?;
        }
        Ok(())
    }
}

/// Run the `edit` hook of each target
#[derive(Debug, Args)]
pub struct EditCommand {
    #[command(flatten)]
    pub selection: TargetSelection,
}

impl Command for EditCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let batch = TargetBatch::new(vec!["edit".to_string()]);
        run_batch(context, &self.selection, &batch, BatchFlags::default())
    }
}

/// Run the `view` hook of each target
#[derive(Debug, Args)]
pub struct ViewCommand {
    #[command(flatten)]
    pub selection: TargetSelection,
}

impl Command for ViewCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let batch = TargetBatch::new(vec!["view".to_string()]);
        run_batch(context, &self.selection, &batch, BatchFlags::default())
    }
}

/// Run the sync transaction over the selected targets
#[derive(Debug, Args)]
pub struct SyncCommand {
    #[command(flatten)]
    pub selection: TargetSelection,
}

impl Command for SyncCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let (krate, targets) = self.selection.resolve(&context.catalog())?;
        let executor = context.executor();
        let report = context
            .orchestrator(&executor, Scratch::MANAGED)
            .sync(&krate, &targets)?;

        tracing::info!(
            synced = report.synced.len(),
            disabled = report.disabled.len(),
            tolerated = report.tolerated.len(),
            "Sync finished"
        );
        let reporter = context.reporter();
        reporter.blank();
        reporter.success(
            &format!(
                "Synced {} target(s), skipped {} disabled",
                report.synced.len(),
                report.disabled.len()
            ),
            0,
        );
        if !report.tolerated.is_empty() {
            reporter.attention(
                &format!(
                    "{} transaction hook(s) failed without stopping the sync",
                    report.tolerated.len()
                ),
                0,
            );
        }
        Ok(())
    }
}

/// Clear the `disabled` marker of each target
#[derive(Debug, Args)]
pub struct EnableCommand {
    #[command(flatten)]
    pub selection: TargetSelection,
}

impl Command for EnableCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        toggle(context, &self.selection, Toggle::Enable)
    }
}

/// Set the `disabled` marker of each target
#[derive(Debug, Args)]
pub struct DisableCommand {
    #[command(flatten)]
    pub selection: TargetSelection,
}

impl Command for DisableCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        toggle(context, &self.selection, Toggle::Disable)
    }
}

#[derive(Debug, Clone, Copy)]
enum Toggle {
    Enable,
    Disable,
}

fn toggle(context: &RuntimeContext, selection: &TargetSelection, toggle: Toggle) -> Result<()> {
    let (_, targets) = selection.resolve(&context.catalog())?;
    let reporter = context.reporter();

    for target in &targets {
        reporter.blank();
        let (heading, unchanged, result) = match toggle {
            Toggle::Enable => ("Enabling", "Target already enabled", target.enable()),
            Toggle::Disable => ("Disabling", "Target already disabled", target.disable()),
        };
        reporter.section(&format!("{heading} ({})", target.label()), 0);
        match result.map_err(Error::from)? {
            MarkerChange::Applied => reporter.success("Finished", 1),
            MarkerChange::Unchanged => reporter.attention(unchanged, 1),
        }
    }
    Ok(())
}

/// List target hooks and their entry commands
#[derive(Debug, Args)]
pub struct HooksLsCommand {
    #[command(flatten)]
    pub selection: TargetSelection,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

impl Command for HooksLsCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let (_, targets) = self.selection.resolve(&context.catalog())?;
        let entities: Vec<&dyn Entity> = targets.iter().map(|t| t as &dyn Entity).collect();
        print_hooks(context, &entities, self.format)
    }
}

/// Run named hooks on each target
#[derive(Debug, Args)]
pub struct HooksRunCommand {
    #[command(flatten)]
    pub selection: TargetSelection,

    /// Hook name(s), run in the order given
    #[arg(short = 'k', long = "hook", value_name = "HOOK", required = true, value_delimiter = ',')]
    pub hooks: Vec<String>,

    /// Crate hook(s) to run before the first target
    #[arg(long = "cratepre", value_name = "HOOK", value_delimiter = ',')]
    pub crate_pre: Vec<String>,

    /// Crate hook(s) to run after the last target
    #[arg(long = "cratepost", value_name = "HOOK", value_delimiter = ',')]
    pub crate_post: Vec<String>,

    #[command(flatten)]
    pub batch: BatchFlags,
}

impl Command for HooksRunCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let batch = TargetBatch {
            crate_pre: self.crate_pre.clone(),
            hooks: self.hooks.clone(),
            crate_post: self.crate_post.clone(),
        };
        run_batch(context, &self.selection, &batch, self.batch)
    }
}

fn run_batch(
    context: &RuntimeContext,
    selection: &TargetSelection,
    batch: &TargetBatch,
    flags: BatchFlags,
) -> Result<()> {
    let (krate, targets) = selection.resolve(&context.catalog())?;
    let executor = context.executor();
    context
        .orchestrator(&executor, flags.scratch())
        .run_target_hooks(&krate, &targets, batch, context.hook_options(flags.quiet))?;
    Ok(())
}
