//! `crates` subcommands

use super::hooks::{OutputFormat, print_hooks};
use super::{BatchFlags, print_item};
use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::{CommandError, Result};
use crate::selection::CrateSelection;
use crate::ui::prompt;
use clap::Args;
use synctropy_engine::{Crate, Entity, Reporter, Scratch, Template};

/// List crates with their `ls` descriptions
#[derive(Debug, Args)]
pub struct LsCommand {}

impl Command for LsCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let reporter = context.reporter();
        reporter.blank();
        reporter.section("Listing crates", 0);
        reporter.blank();

        let crates = context.catalog().crates()?;
        if crates.is_empty() {
            reporter.attention("No crates found", 1);
        }

        let executor = context.executor();
        let orchestrator = context.orchestrator(&executor, Scratch::MANAGED);
        for krate in &crates {
            let description = orchestrator.describe(krate);
            print_item(context, &krate.name, description.as_deref(), 1);
        }
        Ok(())
    }
}

/// Create a crate
#[derive(Debug, Args)]
pub struct CreateCommand {
    /// Crate name
    pub name: String,

    /// Crate template to copy from the templates directory
    #[arg(long, value_name = "NAME")]
    pub template: Option<String>,
}

impl Command for CreateCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let template = self
            .template
            .as_deref()
            .map(|name| Template::find(&context.program.crate_templates_dir, name))
            .transpose()?;
        let krate = Crate::new(&context.program, &self.name);

        let executor = context.executor();
        context
            .orchestrator(&executor, Scratch::MANAGED)
            .create_crate(&krate, template.as_ref())?;
        Ok(())
    }
}

/// Remove crates, their targets included
#[derive(Debug, Args)]
pub struct RmCommand {
    #[command(flatten)]
    pub selection: CrateSelection,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

impl Command for RmCommand {
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
            reporter.section(&format!("Removing ({})", krate.label()), 0);

            let targets = catalog.targets(krate)?;
            if targets.is_empty() {
                reporter.attention("Crate has no targets. Keeping on...", 1);
            } else {
                reporter.attention(
                    &format!(
                        "This action will delete {} targets from this crate",
                        targets.len()
                    ),
                    1,
                );
                if !self.yes
                    && !prompt::confirm(
                        "Enter 'yes/y' to confirm or 'no/n' to cancel the operation",
                        2,
                    )?
                {
                    return Err(CommandError::Cancelled);
                }
            }

            orchestrator.remove_crate(krate, &targets, 1)?;
        }
        Ok(())
    }
}

/// Run the `edit` hook of each crate
#[derive(Debug, Args)]
pub struct EditCommand {
    #[command(flatten)]
    pub selection: CrateSelection,
}

impl Command for EditCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        run_batch(context, &self.selection, &["edit".to_string()], BatchFlags::default())
    }
}

/// Run the `view` hook of each crate
#[derive(Debug, Args)]
pub struct ViewCommand {
    #[command(flatten)]
    pub selection: CrateSelection,
}

impl Command for ViewCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        run_batch(context, &self.selection, &["view".to_string()], BatchFlags::default())
    }
}

/// List crate hooks and their entry commands
#[derive(Debug, Args)]
pub struct HooksLsCommand {
    #[command(flatten)]
    pub selection: CrateSelection,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

impl Command for HooksLsCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let crates = self.selection.resolve(&context.catalog())?;
        let entities: Vec<&dyn Entity> = crates.iter().map(|k| k as &dyn Entity).collect();
        print_hooks(context, &entities, self.format)
    }
}

/// Run named hooks on each crate
#[derive(Debug, Args)]
pub struct HooksRunCommand {
    #[command(flatten)]
    pub selection: CrateSelection,

    /// Hook name(s), run in the order given
    #[arg(short = 'k', long = "hook", value_name = "HOOK", required = true, value_delimiter = ',')]
    pub hooks: Vec<String>,

    #[command(flatten)]
    pub batch: BatchFlags,
}

impl Command for HooksRunCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        run_batch(context, &self.selection, &self.hooks, self.batch)
    }
}

fn run_batch(
    context: &RuntimeContext,
    selection: &CrateSelection,
    hooks: &[String],
    batch: BatchFlags,
) -> Result<()> {
    let crates = selection.resolve(&context.catalog())?;
    let executor = context.executor();
    context
        .orchestrator(&executor, batch.scratch())
        .run_crate_hooks(&crates, hooks, context.hook_options(batch.quiet))?;
    Ok(())
}
