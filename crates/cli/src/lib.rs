//! synctropy CLI library
//!
//! This library provides the command-line interface for synctropy.
//! It can be used programmatically or through the `synctropy` binary.

pub mod cmd;
pub mod command;
pub mod common;
pub mod error;
pub mod selection;
pub mod ui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use synctropy_engine::Reporter;

use cmd::utils::UtilsCommands;
use command::Command;
use common::RuntimeContext;
use error::Result;

/// synctropy - run user hooks for crates and their targets
#[derive(Parser)]
#[command(name = "synctropy")]
#[command(about = "Orchestrate user-defined hooks over crates and targets")]
#[command(version)]
#[command(long_about = "Orchestrate user-defined hooks over crates and targets

Crates are directories holding hooks and a set of targets. A sync runs the
crate and target hooks in a fixed transactional order and stops at the first
mandatory failure.")]
pub struct Cli {
    /// Use a custom user data directory
    #[arg(short = 'D', long, env = "SYNCTROPY_DIR", value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Enable verbose output (shows DEBUG level logs)
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to a file (useful for debugging)
    #[arg(long, env = "SYNCTROPY_LOG_FILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for synctropy CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Create the user data directory
    Init(cmd::init::InitCommand),

    /// Display program and environment information
    Info(cmd::info::InfoCommand),

    /// Manage crates
    #[command(subcommand)]
    Crates(CratesCommands),

    /// Manage targets of a crate
    #[command(subcommand)]
    Targets(TargetsCommands),

    /// Helpers for hook scripts (colored messages, rulers, confirmations)
    #[command(subcommand)]
    Utils(UtilsCommands),
}

/// Commands operating on crates
#[derive(Subcommand)]
pub enum CratesCommands {
    /// List crates
    Ls(cmd::crates::LsCommand),

    /// Create a new crate
    Create(cmd::crates::CreateCommand),

    /// Remove crates and all their targets
    Rm(cmd::crates::RmCommand),

    /// Run the `edit` hook of crates
    Edit(cmd::crates::EditCommand),

    /// Run the `view` hook of crates
    View(cmd::crates::ViewCommand),

    /// Crate hooks
    #[command(subcommand)]
    Hooks(CrateHooksCommands),
}

/// Commands operating on crate hooks
#[derive(Subcommand)]
pub enum CrateHooksCommands {
    /// List hooks of crates
    Ls(cmd::crates::HooksLsCommand),

    /// Run hooks of crates
    Run(cmd::crates::HooksRunCommand),
}

/// Commands operating on targets
#[derive(Subcommand)]
pub enum TargetsCommands {
    /// List targets of crates
    Ls(cmd::targets::LsCommand),

    /// Create a new target in a crate
    Create(cmd::targets::CreateCommand),

    /// Remove targets from a crate
    Rm(cmd::targets::RmCommand),

    /// Run the `edit` hook of targets
    Edit(cmd::targets::EditCommand),

    /// Run the `view` hook of targets
    View(cmd::targets::ViewCommand),

    /// Synchronize targets of a crate
    Sync(cmd::targets::SyncCommand),

    /// Enable targets so sync includes them again
    Enable(cmd::targets::EnableCommand),

    /// Disable targets so sync skips them
    Disable(cmd::targets::DisableCommand),

    /// Target hooks
    #[command(subcommand)]
    Hooks(TargetHooksCommands),
}

/// Commands operating on target hooks
#[derive(Subcommand)]
pub enum TargetHooksCommands {
    /// List hooks of targets
    Ls(cmd::targets::HooksLsCommand),

    /// Run hooks of targets
    Run(cmd::targets::HooksRunCommand),
}

/// Main entry point for the CLI logic
///
/// # Errors
///
/// Returns an error if:
/// - Logging initialization fails
/// - The user data directory or configuration cannot be resolved
/// - Command execution fails
pub fn run(cli: Cli) -> Result<()> {
    // Initialize logging based on verbosity
    synctropy_config::logging::init(cli.verbose, cli.log_file.as_deref())?;

    // Hook helpers never touch the user data directory
    if let Some(Commands::Utils(command)) = &cli.command {
        return cmd::utils::run(command);
    }

    let context = RuntimeContext::load(cli.directory.as_deref())?;
    if cli.directory.is_some() {
        context.reporter().attention(
            &format!(
                "Running synctropy using a custom user data directory: {}",
                context.program.data_dir.display()
            ),
            0,
        );
    }

    let Some(command) = cli.command else {
        cmd::info::InfoCommand { json: false }.execute(&context)?;
        println!();
        println!("Run synctropy --help/-h to get started.");
        return Ok(());
    };

    execute_command(command, &context)
}

fn execute_command(command: Commands, context: &RuntimeContext) -> Result<()> {
    match command {
        Commands::Init(cmd) => cmd.execute(context),
        Commands::Info(cmd) => cmd.execute(context),
        Commands::Utils(cmd) => cmd::utils::run(&cmd),
        Commands::Crates(command) => {
            context.ensure_initialized()?;
            match command {
                CratesCommands::Ls(cmd) => cmd.execute(context),
                CratesCommands::Create(cmd) => cmd.execute(context),
                CratesCommands::Rm(cmd) => cmd.execute(context),
                CratesCommands::Edit(cmd) => cmd.execute(context),
                CratesCommands::View(cmd) => cmd.execute(context),
                CratesCommands::Hooks(CrateHooksCommands::Ls(cmd)) => cmd.execute(context),
                CratesCommands::Hooks(CrateHooksCommands::Run(cmd)) => cmd.execute(context),
            }
        }
        Commands::Targets(command) => {
            context.ensure_initialized()?;
            match command {
                TargetsCommands::Ls(cmd) => cmd.execute(context),
                TargetsCommands::Create(cmd) => cmd.execute(context),
                TargetsCommands::Rm(cmd) => cmd.execute(context),
                TargetsCommands::Edit(cmd) => cmd.execute(context),
                TargetsCommands::View(cmd) => cmd.execute(context),
                TargetsCommands::Sync(cmd) => cmd.execute(context),
                TargetsCommands::Enable(cmd) => cmd.execute(context),
                TargetsCommands::Disable(cmd) => cmd.execute(context),
                TargetsCommands::Hooks(TargetHooksCommands::Ls(cmd)) => cmd.execute(context),
                TargetsCommands::Hooks(TargetHooksCommands::Run(cmd)) => cmd.execute(context),
            }
        }
    }
}
