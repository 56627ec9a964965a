//! Transaction orchestration
//!
//! Sequences hook executions into multi-phase transactions and decides,
//! per phase, whether an outcome continues the run or ends it. Every
//! scratch directory that was set up is torn down again, also on the way
//! out of a failed phase; a teardown problem never replaces the failure
//! that ended the run.
//!
//! Sync transaction for one crate:
//!
//! ```text
//! scratch up -> crate pre_transaction -> per target:
//!     disabled? skip
//!     scratch up -> pre_transaction (tolerated) -> sync (fatal)
//!                -> post_transaction (tolerated) -> scratch down
//! -> crate post_transaction -> scratch down
//! ```

use crate::entity::{Crate, Entity, Target};
use crate::error::Abort;
use crate::hooks::{HookExecutor, HookOptions, HookOutcome};
use crate::report::Reporter;
use crate::scratch::{Scratch, SetupOutcome, TeardownOutcome};
use synctropy_core::Error;

/// Hook run before and after a crate's or target's sync work
pub const PRE_TRANSACTION: &str = "pre_transaction";
/// Hook run after a successful sync
pub const POST_TRANSACTION: &str = "post_transaction";
/// The sync payload hook
pub const SYNC: &str = "sync";

/// Whether a missing hook ends the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Requirement {
    Optional,
    Required,
}

/// Hooks requested for a target batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetBatch {
    /// Crate hooks run once before the first target
    pub crate_pre: Vec<String>,
    /// Hooks run for every target
    pub hooks: Vec<String>,
    /// Crate hooks run once after the last target
    pub crate_post: Vec<String>,
}

impl TargetBatch {
    /// Batch running `hooks` on every target, without crate hooks
    pub fn new(hooks: Vec<String>) -> Self {
        Self {
            hooks,
            ..Self::default()
        }
    }
}

/// What a completed sync transaction did
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Targets whose `sync` hook succeeded, in order
    pub synced: Vec<String>,
    /// Targets skipped because of the `disabled` marker
    pub disabled: Vec<String>,
    /// Failures of target bracket hooks that did not stop the run
    pub tolerated: Vec<Abort>,
}

/// Runs hook batches and sync transactions
pub struct Orchestrator<'a> {
    pub(crate) executor: &'a HookExecutor<'a>,
    pub(crate) reporter: &'a dyn Reporter,
    pub(crate) options: HookOptions,
    scratch: Scratch,
    strict_teardown: bool,
}

impl<'a> Orchestrator<'a> {
    /// Orchestrator reporting through the executor's reporter
    pub fn new(executor: &'a HookExecutor<'a>) -> Self {
        Self {
            executor,
            reporter: executor.reporter(),
            options: HookOptions::interactive(),
            scratch: Scratch::MANAGED,
            strict_teardown: false,
        }
    }

    /// Display options for hooks run by sync and lifecycle operations
    ///
    /// Hook batches take their options per call instead.
    #[must_use]
    pub fn hook_options(mut self, options: HookOptions) -> Self {
        self.options = options;
        self
    }

    /// Scratch directory create/remove policy
    #[must_use]
    pub fn scratch(mut self, scratch: Scratch) -> Self {
        self.scratch = scratch;
        self
    }

    /// Fail an otherwise successful run when a scratch directory cannot be removed
    #[must_use]
    pub fn strict_teardown(mut self, strict: bool) -> Self {
        self.strict_teardown = strict;
        self
    }

    /// Run the named hooks on each crate in turn
    ///
    /// Every requested hook is mandatory. The first failing or missing hook
    /// tears down that crate's scratch directory and ends the whole batch;
    /// later crates are never attempted.
    pub fn run_crate_hooks<S: AsRef<str>>(
        &self,
        crates: &[Crate],
        hooks: &[S],
        options: HookOptions,
    ) -> Result<(), Abort> {
        for (index, krate) in crates.iter().enumerate() {
            self.reporter.blank();
            self.reporter.counter(index + 1, crates.len());
            self.reporter
                .section(&format!("Running hook(s) ({})", krate.label()), 0);

            self.setup_scratch(krate, 1)?;
            let result = self.run_hooks(krate, hooks, options, 1);
            let teardown = self.teardown_scratch(krate, 1);
            self.settle(result, teardown)?;
        }
        Ok(())
    }

    /// Run a hook batch on targets of one crate
    ///
    /// The crate scratch directory brackets the whole batch and each target
    /// gets its own for its hook sequence. Failure policy matches
    /// [`Orchestrator::run_crate_hooks`].
    pub fn run_target_hooks(
        &self,
        krate: &Crate,
        targets: &[Target],
        batch: &TargetBatch,
        options: HookOptions,
    ) -> Result<(), Abort> {
        self.reporter.blank();
        self.reporter
            .section(&format!("Running hook(s) ({})", krate.label()), 0);

        self.setup_scratch(krate, 1)?;
        let result = self.run_target_batch(krate, targets, batch, options);
        let teardown = self.teardown_scratch(krate, 1);
        self.settle(result, teardown)
    }

    fn run_target_batch(
        &self,
        krate: &Crate,
        targets: &[Target],
        batch: &TargetBatch,
        options: HookOptions,
    ) -> Result<(), Abort> {
        self.run_hooks(krate, &batch.crate_pre, options, 1)?;

        for (index, target) in targets.iter().enumerate() {
            self.reporter.blank();
            self.reporter.counter(index + 1, targets.len());
            self.reporter
                .section(&format!("Running hook(s) ({})", target.label()), 1);

            self.setup_scratch(target, 2)?;
            let result = self.run_hooks(target, &batch.hooks, options, 2);
            let teardown = self.teardown_scratch(target, 2);
            self.settle(result, teardown)?;
        }

        self.run_hooks(krate, &batch.crate_post, options, 1)
    }

    /// Sync the given targets of `krate`
    ///
    /// `targets` are processed in the order given, which callers take from
    /// the catalog listing.
    #[tracing::instrument(skip(self, krate, targets), fields(krate = %krate.name))]
    pub fn sync(&self, krate: &Crate, targets: &[Target]) -> Result<SyncReport, Abort> {
        let options = self.options;

        self.reporter.blank();
        self.reporter
            .section(&format!("Syncing crate ({})", krate.label()), 0);

        self.setup_scratch(krate, 1)?;
        let result = self.sync_transaction(krate, targets, options);
        let teardown = self.teardown_scratch(krate, 1);
        self.settle(result, teardown)
    }

    fn sync_transaction(
        &self,
        krate: &Crate,
        targets: &[Target],
        options: HookOptions,
    ) -> Result<SyncReport, Abort> {
        let mut report = SyncReport::default();

        self.phase(krate, PRE_TRANSACTION, Requirement::Optional, options, 1)?;

        for target in targets {
            self.reporter.blank();
            self.reporter
                .section(&format!("Syncing ({})", target.label()), 1);

            let disabled = target.is_disabled().map_err(Error::from)?;
            if disabled {
                tracing::debug!(target_name = %target.label(), "Skipping disabled target");
                self.reporter.attention("Target is disabled", 2);
                report.disabled.push(target.name.clone());
                continue;
            }

            self.setup_scratch(target, 2)?;
            let result = self.sync_target(target, options, &mut report);
            let teardown = self.teardown_scratch(target, 2);
            self.settle(result, teardown)?;
            report.synced.push(target.name.clone());
        }

        self.phase(krate, POST_TRANSACTION, Requirement::Optional, options, 1)?;
        Ok(report)
    }

    fn sync_target(
        &self,
        target: &Target,
        options: HookOptions,
        report: &mut SyncReport,
    ) -> Result<(), Abort> {
        if let Err(abort) = self.phase(target, PRE_TRANSACTION, Requirement::Optional, options, 2)
        {
            tracing::warn!("{abort}");
            report.tolerated.push(abort);
        }

        self.phase(target, SYNC, Requirement::Required, options, 2)?;

        if let Err(abort) = self.phase(target, POST_TRANSACTION, Requirement::Optional, options, 2)
        {
            tracing::warn!("{abort}");
            report.tolerated.push(abort);
        }
        Ok(())
    }

    fn run_hooks<S: AsRef<str>>(
        &self,
        entity: &dyn Entity,
        hooks: &[S],
        options: HookOptions,
        depth: usize,
    ) -> Result<(), Abort> {
        for hook in hooks {
            self.phase(entity, hook.as_ref(), Requirement::Required, options, depth)?;
        }
        Ok(())
    }

    /// Run one hook and map its outcome to continue (`Ok`) or abort (`Err`)
    pub(crate) fn phase(
        &self,
        entity: &dyn Entity,
        hook: &str,
        requirement: Requirement,
        options: HookOptions,
        depth: usize,
    ) -> Result<(), Abort> {
        self.reporter.blank();
        self.reporter
            .section(&format!("Running {hook} hook ({})", entity.label()), depth);

        let detail = depth + 1;
        match self.executor.execute(entity, hook, options, depth) {
            HookOutcome::Succeeded { .. } => {
                self.reporter.success("Finished", detail);
                Ok(())
            }
            HookOutcome::Missing if requirement == Requirement::Optional => {
                self.reporter.attention("Hook not found", detail);
                Ok(())
            }
            HookOutcome::Missing => {
                self.reporter
                    .error(&format!("No '{hook}' hook found"), detail);
                Err(Abort::HookMissing {
                    entity: entity.label(),
                    hook: hook.to_string(),
                })
            }
            HookOutcome::Failed { exit_code, .. } => {
                self.reporter.error(
                    &format!("Failed to execute hook: exit code {exit_code}"),
                    detail,
                );
                Err(Abort::HookFailed {
                    entity: entity.label(),
                    hook: hook.to_string(),
                    exit_code,
                })
            }
            HookOutcome::ExecutionError { cause } => {
                self.reporter
                    .error(&format!("Failed to execute hook: {cause}"), detail);
                Err(Abort::Execution {
                    entity: entity.label(),
                    hook: hook.to_string(),
                    source: cause,
                })
            }
        }
    }

    pub(crate) fn setup_scratch(&self, entity: &dyn Entity, depth: usize) -> Result<(), Abort> {
        self.reporter.section("Setting up temporary directory", depth);
        let detail = depth + 1;
        match self.scratch.setup(entity.temp_dir()) {
            Ok(SetupOutcome::Created) => self.reporter.success("Finished", detail),
            Ok(SetupOutcome::Recreated) => self
                .reporter
                .attention("Temporary directory already existed and was recreated", detail),
            Ok(SetupOutcome::Skipped) => self.reporter.attention("Skipping", detail),
            Err(e) => {
                self.reporter.error(&e.to_string(), detail);
                return Err(e.into());
            }
        }
        Ok(())
    }

    pub(crate) fn teardown_scratch(&self, entity: &dyn Entity, depth: usize) -> Result<(), Abort> {
        self.reporter.section("Removing temporary directory", depth);
        let detail = depth + 1;
        match self.scratch.teardown(entity.temp_dir()) {
            Ok(TeardownOutcome::Removed) => self.reporter.success("Finished", detail),
            Ok(TeardownOutcome::NotFound) => self
                .reporter
                .attention("Temporary directory not found", detail),
            Ok(TeardownOutcome::Skipped) => self.reporter.attention("Skipping", detail),
            Err(e) => {
                self.reporter.error(&e.to_string(), detail);
                return Err(e.into());
            }
        }
        Ok(())
    }

    /// Combine a phase result with the teardown that followed it
    ///
    /// The phase failure always wins. A teardown failure after a successful
    /// phase only ends the run under strict teardown.
    pub(crate) fn settle<T>(
        &self,
        result: Result<T, Abort>,
        teardown: Result<(), Abort>,
    ) -> Result<T, Abort> {
        match (result, teardown) {
            (Err(abort), Err(secondary)) => {
                tracing::warn!("Scratch teardown also failed: {secondary}");
                Err(abort)
            }
            (Err(abort), Ok(())) => Err(abort),
            (Ok(value), Ok(())) => Ok(value),
            (Ok(value), Err(secondary)) if !self.strict_teardown => {
                tracing::warn!("Scratch teardown failed: {secondary}");
                Ok(value)
            }
            (Ok(_), Err(secondary)) => Err(secondary),
        }
    }
}
