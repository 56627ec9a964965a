//! Hook execution
//!
//! Runs one named hook against one entity: checks that the hook exists,
//! resolves its entry command, builds the environment snapshot and hands
//! everything to a [`CommandRunner`]. The result is classified into a
//! [`HookOutcome`]; deciding whether that outcome is fatal is left to the
//! orchestrator.

use super::entry;
use super::runner::{CommandRunner, OutputMode, PtyRunner};
use crate::entity::{Entity, Environment};
use crate::report::{Reporter, SilentReporter};
use std::path::{Path, PathBuf};
use synctropy_core::Error;

/// Presentation switches for a single hook run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookOptions {
    /// Show hook output live; when false it is collected but not displayed
    pub capture_output: bool,
    /// Print the resolved entry command first
    pub show_entry_command: bool,
    /// Draw rulers around the hook output
    pub show_transition_rulers: bool,
    /// Print advisories such as the silent-run warning
    pub show_advisory_messages: bool,
}

impl HookOptions {
    /// Everything visible, as used by sync and lifecycle hooks
    pub const fn interactive() -> Self {
        Self {
            capture_output: true,
            show_entry_command: true,
            show_transition_rulers: true,
            show_advisory_messages: true,
        }
    }

    /// Nothing visible, for hooks whose output is consumed by the caller
    pub const fn silent() -> Self {
        Self {
            capture_output: false,
            show_entry_command: false,
            show_transition_rulers: false,
            show_advisory_messages: false,
        }
    }
}

impl Default for HookOptions {
    fn default() -> Self {
        Self::interactive()
    }
}

/// Classified result of one hook invocation
#[derive(Debug)]
pub enum HookOutcome {
    /// No hook file with that name
    Missing,
    /// The hook ran and exited non-zero
    Failed {
        /// Exit code of the hook
        exit_code: i32,
        /// Collected terminal output
        output: String,
    },
    /// The hook ran and exited zero
    Succeeded {
        /// Collected terminal output
        output: String,
    },
    /// The hook could not be run at all
    ExecutionError {
        /// Resolver or runner failure
        cause: Error,
    },
}

impl HookOutcome {
    /// Whether the hook ran and exited zero
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// Collected output, when the hook ran
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Succeeded { output } | Self::Failed { output, .. } => Some(output),
            Self::Missing | Self::ExecutionError { .. } => None,
        }
    }
}

/// Runs hooks for crates and targets
///
/// Use [`HookExecutor::builder`] to configure the runner, reporter and
/// extra environment.
pub struct HookExecutor<'a> {
    default_shell: PathBuf,
    base_env: Environment,
    runner: &'a dyn CommandRunner,
    reporter: &'a dyn Reporter,
}

impl<'a> HookExecutor<'a> {
    /// Create a builder for an executor falling back to `default_shell`
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let executor = HookExecutor::builder(&program.default_shell)
    ///     .reporter(&terminal)
    ///     .env_vars(config.env.clone())
    ///     .build();
    /// let outcome = executor.execute(&target, "sync", HookOptions::interactive(), 1);
    /// ```
    pub fn builder(default_shell: impl Into<PathBuf>) -> HookExecutorBuilder<'a> {
        HookExecutorBuilder::new(default_shell.into())
    }

    /// Reporter used for hook advisories
    pub fn reporter(&self) -> &'a dyn Reporter {
        self.reporter
    }

    /// Interpreter for hooks without a sidecar
    pub fn default_shell(&self) -> &Path {
        &self.default_shell
    }

    /// Environment a hook of `entity` receives
    ///
    /// Inherited variables come first (sorted by name), then configured
    /// extras, then the entity's own variables, later entries winning.
    pub fn snapshot(&self, entity: &dyn Entity) -> Environment {
        let mut env = self.base_env.clone();
        env.extend(
            entity
                .environment()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        env
    }

    /// Run `hook` against `entity`
    ///
    /// `depth` is the nesting level of the caller's phase heading; details
    /// are reported one level deeper.
    #[tracing::instrument(skip(self, entity, options), fields(entity = %entity.label()))]
    pub fn execute(
        &self,
        entity: &dyn Entity,
        hook: &str,
        options: HookOptions,
        depth: usize,
    ) -> HookOutcome {
        let hook_path = entity.hook_path(hook);
        match hook_path.try_exists() {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!("Hook not found");
                return HookOutcome::Missing;
            }
            Err(e) => return HookOutcome::ExecutionError { cause: e.into() },
        }

        let command = match entry::resolve(&hook_path, &self.default_shell) {
            Ok(command) => command,
            Err(cause) => return HookOutcome::ExecutionError { cause },
        };

        let detail = depth + 1;
        if options.show_entry_command {
            self.reporter
                .note(&format!("Entry command: {}", command.program_name()), detail);
        }
        if !options.capture_output && options.show_advisory_messages {
            self.reporter.note(
                "> The command will run silently. Interactive commands may not work; \
                 press Ctrl+C or the program's own shortcut to quit.",
                detail,
            );
        }

        let env = self.snapshot(entity);
        let mode = if options.capture_output {
            OutputMode::Stream
        } else {
            OutputMode::Discard
        };

        if options.show_transition_rulers {
            self.reporter.ruler(detail);
        }
        let result = self.runner.run(&command, &env, mode);
        if options.show_transition_rulers {
            self.reporter.ruler(detail);
        }

        match result {
            Ok(done) if done.success() => HookOutcome::Succeeded {
                output: done.output,
            },
            Ok(done) => {
                tracing::debug!(exit_code = done.exit_code, "Hook failed");
                HookOutcome::Failed {
                    exit_code: done.exit_code,
                    output: done.output,
                }
            }
            Err(cause) => {
                tracing::debug!("Hook could not run: {cause}");
                HookOutcome::ExecutionError { cause }
            }
        }
    }
}

/// Builder for [`HookExecutor`]
pub struct HookExecutorBuilder<'a> {
    default_shell: PathBuf,
    env_vars: Environment,
    runner: &'a dyn CommandRunner,
    reporter: &'a dyn Reporter,
}

impl<'a> HookExecutorBuilder<'a> {
    /// Create a builder that inherits the process environment
    ///
    /// This is typically called via [`HookExecutor::builder`].
    pub fn new(default_shell: PathBuf) -> Self {
        let mut inherited: Vec<(String, String)> = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        inherited.sort();

        Self {
            default_shell,
            env_vars: inherited.into_iter().collect(),
            runner: &PtyRunner,
            reporter: &SilentReporter,
        }
    }

    /// Use a different command runner
    pub fn runner(mut self, runner: &'a dyn CommandRunner) -> Self {
        self.runner = runner;
        self
    }

    /// Report hook advisories through `reporter`
    pub fn reporter(mut self, reporter: &'a dyn Reporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// Drop the inherited process environment
    pub fn clear_env(mut self) -> Self {
        self.env_vars.clear();
        self
    }

    /// Add a variable to every hook environment
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Add several variables to every hook environment
    pub fn env_vars(mut self, vars: Environment) -> Self {
        self.env_vars.extend(vars);
        self
    }

    /// Build the executor
    pub fn build(self) -> HookExecutor<'a> {
        HookExecutor {
            default_shell: self.default_shell,
            base_env: self.env_vars,
            runner: self.runner,
            reporter: self.reporter,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use crate::entity::Crate;
    use crate::hooks::entry::EntryCommand;
    use crate::hooks::runner::CompletedCommand;
    use crate::report::Tone;
    use crate::testing::RecordingReporter;
    use std::cell::RefCell;
    use std::fs;
    use synctropy_config::Program;
    use tempfile::TempDir;

    /// Runner returning a fixed exit code and remembering what it was asked
    struct FixedRunner {
        exit_code: i32,
        calls: RefCell<Vec<(EntryCommand, Environment, OutputMode)>>,
    }

    impl FixedRunner {
        fn new(exit_code: i32) -> Self {
            Self {
                exit_code,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandRunner for FixedRunner {
        fn run(
            &self,
            command: &EntryCommand,
            env: &Environment,
            mode: OutputMode,
        ) -> synctropy_core::Result<CompletedCommand> {
            self.calls
                .borrow_mut()
                .push((command.clone(), env.clone(), mode));
            Ok(CompletedCommand {
                output: "out\n".to_string(),
                exit_code: self.exit_code,
            })
        }
    }

    struct BrokenRunner;

    impl CommandRunner for BrokenRunner {
        fn run(
            &self,
            command: &EntryCommand,
            _env: &Environment,
            _mode: OutputMode,
        ) -> synctropy_core::Result<CompletedCommand> {
            Err(Error::Spawn {
                program: command.program_name(),
                source: "no such interpreter".into(),
            })
        }
    }

    fn setup() -> (TempDir, Crate) {
        let temp = TempDir::new().unwrap();
        let program = Program::with_paths(
            temp.path().to_path_buf(),
            PathBuf::from("/bin/sh"),
            PathBuf::from("synctropy"),
        );
        let krate = Crate::new(&program, "alpha");
        fs::create_dir_all(krate.hooks_dir()).unwrap();
        (temp, krate)
    }

    #[test]
    fn test_missing_hook_never_runs() {
        let (_temp, krate) = setup();
        let runner = FixedRunner::new(0);
        let executor = HookExecutor::builder("/bin/sh").runner(&runner).build();

        let outcome = executor.execute(&krate, "sync", HookOptions::interactive(), 0);
        assert!(matches!(outcome, HookOutcome::Missing));
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_success_and_failure_classification() {
        let (_temp, krate) = setup();
        fs::write(krate.hook_path("sync"), "exit 0").unwrap();

        let ok = FixedRunner::new(0);
        let executor = HookExecutor::builder("/bin/sh").runner(&ok).build();
        let outcome = executor.execute(&krate, "sync", HookOptions::interactive(), 0);
        assert!(outcome.is_success());
        assert_eq!(outcome.output(), Some("out\n"));

        let failing = FixedRunner::new(3);
        let executor = HookExecutor::builder("/bin/sh").runner(&failing).build();
        match executor.execute(&krate, "sync", HookOptions::interactive(), 0) {
            HookOutcome::Failed { exit_code, output } => {
                assert_eq!(exit_code, 3);
                assert_eq!(output, "out\n");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_runner_failure_is_execution_error() {
        let (_temp, krate) = setup();
        fs::write(krate.hook_path("sync"), "exit 0").unwrap();

        let executor = HookExecutor::builder("/bin/sh")
            .runner(&BrokenRunner)
            .build();
        let outcome = executor.execute(&krate, "sync", HookOptions::silent(), 0);
        assert!(matches!(
            outcome,
            HookOutcome::ExecutionError {
                cause: Error::Spawn { .. }
            }
        ));
        assert_eq!(outcome.output(), None);
    }

    #[test]
    fn test_unreadable_sidecar_is_execution_error() {
        let (_temp, krate) = setup();
        fs::write(krate.hook_path("sync"), "exit 0").unwrap();
        fs::create_dir(entry::sidecar_path(&krate.hook_path("sync"))).unwrap();

        let runner = FixedRunner::new(0);
        let executor = HookExecutor::builder("/bin/sh").runner(&runner).build();
        let outcome = executor.execute(&krate, "sync", HookOptions::interactive(), 0);
        assert!(matches!(
            outcome,
            HookOutcome::ExecutionError {
                cause: Error::EntryRead { .. }
            }
        ));
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_resolved_command_and_mode_reach_runner() {
        let (_temp, krate) = setup();
        let hook = krate.hook_path("sync");
        fs::write(&hook, "print()").unwrap();
        fs::write(entry::sidecar_path(&hook), "python3 -u").unwrap();

        let runner = FixedRunner::new(0);
        let executor = HookExecutor::builder("/bin/sh").runner(&runner).build();
        executor.execute(&krate, "sync", HookOptions::silent(), 0);

        let calls = runner.calls.borrow();
        let (command, _, mode) = &calls[0];
        assert_eq!(command.program, "python3");
        assert_eq!(command.args.last().unwrap(), hook.as_os_str());
        assert_eq!(*mode, OutputMode::Discard);
    }

    #[test]
    fn test_snapshot_layering() {
        let (_temp, krate) = setup();
        let executor = HookExecutor::builder("/bin/sh")
            .clear_env()
            .env("ZED", "1")
            .env("CRATE_NAME", "overridden")
            .env("AGENT_SOCK", "/tmp/agent.sock")
            .build();

        let env = executor.snapshot(&krate);
        assert_eq!(env["ZED"], "1");
        assert_eq!(env["AGENT_SOCK"], "/tmp/agent.sock");
        // Entity variables win over configured extras
        assert_eq!(env["CRATE_NAME"], "alpha");
        assert_eq!(executor.snapshot(&krate), env);
    }

    #[test]
    fn test_inherited_environment_is_sorted() {
        let builder = HookExecutorBuilder::new(PathBuf::from("/bin/sh"));
        let keys: Vec<&String> = builder.env_vars.keys().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_interactive_options_report_entry_command() {
        let (_temp, krate) = setup();
        fs::write(krate.hook_path("edit"), "exit 0").unwrap();

        let reporter = RecordingReporter::new();
        let runner = FixedRunner::new(0);
        let executor = HookExecutor::builder("/bin/sh")
            .runner(&runner)
            .reporter(&reporter)
            .build();

        executor.execute(&krate, "edit", HookOptions::interactive(), 1);
        assert!(reporter.contains(Tone::Note, "Entry command: /bin/sh"));
        assert!(reporter.lines().iter().all(|(_, _, depth)| *depth == 2));

        let quiet = HookOptions {
            capture_output: false,
            ..HookOptions::interactive()
        };
        executor.execute(&krate, "edit", quiet, 1);
        assert!(reporter.contains(Tone::Note, "will run silently"));
    }
}
