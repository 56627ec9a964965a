//! Shared state for CLI commands

use crate::error::Result;
use crate::ui::{TerminalReporter, Theme};
use std::path::{Path, PathBuf};
use synctropy_config::{Config, Program};
use synctropy_engine::hooks::{HookExecutor, HookOptions};
use synctropy_engine::{Catalog, Orchestrator, Reporter, Scratch};

/// Everything a command needs: program layout, configuration and output
pub struct RuntimeContext {
    /// Resolved program identity and user directories
    pub program: Program,
    /// Loaded `config.toml`
    pub config: Config,
    reporter: TerminalReporter,
}

impl RuntimeContext {
    /// Resolve the data directory, load its configuration and the program
    pub fn load(custom_dir: Option<&Path>) -> Result<Self> {
        let data_dir = synctropy_config::resolve_data_dir(custom_dir)?;
        let config = Config::load_or_default(&data_dir)?;
        Self::new(data_dir, config)
    }

    /// Context for an already resolved data directory
    pub fn new(data_dir: PathBuf, config: Config) -> Result<Self> {
        let program = Program::new(data_dir, &config)?;
        let reporter = TerminalReporter::new(Theme::detect(config.ui.color));
        Ok(Self {
            program,
            config,
            reporter,
        })
    }

    /// Terminal reporter configured from `[ui]`
    pub fn reporter(&self) -> &TerminalReporter {
        &self.reporter
    }

    /// Entity lookup over the crates root
    pub fn catalog(&self) -> Catalog<'_> {
        Catalog::new(&self.program)
    }

    /// Hook executor reporting to the terminal, with `[env]` applied
    pub fn executor(&self) -> HookExecutor<'_> {
        HookExecutor::builder(&self.program.default_shell)
            .reporter(&self.reporter)
            .env_vars(self.config.env.clone())
            .build()
    }

    /// Hook display options from `[ui]`; `quiet` discards hook output
    pub fn hook_options(&self, quiet: bool) -> HookOptions {
        HookOptions {
            capture_output: !quiet,
            show_entry_command: self.config.ui.show_entry_command,
            show_transition_rulers: self.config.ui.show_rulers,
            show_advisory_messages: self.config.ui.show_advisories,
        }
    }

    /// Orchestrator over `executor` honoring `[general]` and `[ui]`
    pub fn orchestrator<'a>(&self, executor: &'a HookExecutor<'a>, scratch: Scratch) -> Orchestrator<'a> {
        Orchestrator::new(executor)
            .hook_options(self.hook_options(false))
            .scratch(scratch)
            .strict_teardown(self.config.general.strict_teardown)
    }

    /// Create any missing directory of the user data layout
    pub fn ensure_initialized(&self) -> Result<()> {
        let created = self.program.bootstrap()?;
        if created.first().is_some_and(|dir| dir == &self.program.data_dir) {
            self.reporter.attention(
                &format!(
                    "Created user data directory at {}",
                    self.program.data_dir.display()
                ),
                0,
            );
            self.reporter.blank();
        }
        Ok(())
    }
}
