//! Creating, removing and describing crates and targets

use crate::entity::{Crate, Entity, Target, validate_name};
use crate::error::Abort;
use crate::hooks::{HookOptions, HookOutcome};
use crate::orchestrator::{Orchestrator, Requirement};
use crate::template::Template;
use std::fs;
use std::path::Path;
use synctropy_core::Error;

/// Hook run right after an entity's directories were created
pub const POST_CREATE: &str = "post_create";
/// Hook run before an entity's tree is deleted
pub const PRE_RM: &str = "pre_rm";
/// Hook whose output describes an entity in listings
pub const LS: &str = "ls";

impl Orchestrator<'_> {
    /// Create a crate, optionally seeded from a template
    ///
    /// The crate always ends up with `hooks/` and `targets/` directories.
    pub fn create_crate(&self, krate: &Crate, template: Option<&Template>) -> Result<(), Abort> {
        self.create(krate, &krate.name, template, &[krate.targets_dir()])
    }

    /// Create a target, optionally seeded from a template
    ///
    /// The owning crate must already exist.
    pub fn create_target(&self, target: &Target, template: Option<&Template>) -> Result<(), Abort> {
        self.create(target, &target.name, template, &[])
    }

    fn create(
        &self,
        entity: &dyn Entity,
        name: &str,
        template: Option<&Template>,
        extra_dirs: &[&Path],
    ) -> Result<(), Abort> {
        validate_name(name)?;

        self.reporter.blank();
        self.reporter
            .section(&format!("Creating ({})", entity.label()), 0);
        if entity.path().exists() {
            self.reporter.attention("Already exists", 1);
            return Err(Error::AlreadyExists(entity.label()).into());
        }

        self.reporter.section("Creating directory", 1);
        fs::create_dir(entity.path()).map_err(|source| Error::DirectoryCreate {
            path: entity.path().to_path_buf(),
            source,
        })?;
        self.reporter.success("Finished", 2);

        let result = self
            .populate(entity, template, extra_dirs)
            .and_then(|()| {
                self.phase(
                    entity,
                    POST_CREATE,
                    Requirement::Optional,
                    self.options,
                    1,
                )
            });
        if let Err(abort) = result {
            self.rollback(entity);
            return Err(abort);
        }

        tracing::info!(entity = %entity.label(), "Created");
        self.reporter.success("Finished", 1);
        Ok(())
    }

    fn populate(
        &self,
        entity: &dyn Entity,
        template: Option<&Template>,
        extra_dirs: &[&Path],
    ) -> Result<(), Abort> {
        if let Some(template) = template {
            self.reporter.blank();
            self.reporter
                .section(&format!("Copying template ({})", template.name), 1);
            if let Err(e) = template.copy_into(entity.path()) {
                self.reporter.error(&e.to_string(), 2);
                return Err(e.into());
            }
            self.reporter.success("Finished", 2);
        }

        for dir in std::iter::once(&entity.hooks_dir()).chain(extra_dirs) {
            fs::create_dir_all(dir).map_err(|source| Error::DirectoryCreate {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    fn rollback(&self, entity: &dyn Entity) {
        self.reporter.blank();
        self.reporter.section("Removing directory", 1);
        match fs::remove_dir_all(entity.path()) {
            Ok(()) => self.reporter.attention("Removed", 2),
            Err(e) => {
                tracing::warn!(path = %entity.path().display(), "Rollback failed: {e}");
                self.reporter.attention("Failed to remove directory", 2);
            }
        }
    }

    /// Delete a crate and all of its targets
    ///
    /// Every target's `pre_rm` hook runs first, then the crate's own. A
    /// failing hook stops before anything is deleted. Confirming the
    /// removal is up to the caller.
    pub fn remove_crate(&self, krate: &Crate, targets: &[Target], depth: usize) -> Result<(), Abort> {
        for target in targets {
            self.pre_rm(target, depth)?;
        }
        self.pre_rm(krate, depth)?;
        self.remove_tree(krate, depth)
    }

    /// Delete a single target after its `pre_rm` hook
    pub fn remove_target(&self, target: &Target, depth: usize) -> Result<(), Abort> {
        self.pre_rm(target, depth)?;
        self.remove_tree(target, depth)
    }

    fn pre_rm(&self, entity: &dyn Entity, depth: usize) -> Result<(), Abort> {
        self.phase(
            entity,
            PRE_RM,
            Requirement::Optional,
            self.options,
            depth,
        )
    }

    fn remove_tree(&self, entity: &dyn Entity, depth: usize) -> Result<(), Abort> {
        self.reporter.blank();
        self.reporter
            .section(&format!("Removing files ({})", entity.label()), depth);
        fs::remove_dir_all(entity.path()).map_err(|source| Error::DirectoryRemove {
            path: entity.path().to_path_buf(),
            source,
        })?;
        tracing::info!(entity = %entity.label(), "Removed");
        self.reporter.success("Finished", depth + 1);
        Ok(())
    }

    /// One-line description from the entity's `ls` hook
    ///
    /// The hook runs silently. A missing or failing hook, or one printing
    /// only whitespace, yields no description.
    pub fn describe(&self, entity: &dyn Entity) -> Option<String> {
        match self.executor.execute(entity, LS, HookOptions::silent(), 0) {
            HookOutcome::Succeeded { output } => {
                let description = output.trim();
                (!description.is_empty()).then(|| description.to_string())
            }
            HookOutcome::Failed { exit_code, .. } => {
                tracing::debug!(entity = %entity.label(), exit_code, "ls hook failed");
                None
            }
            HookOutcome::Missing | HookOutcome::ExecutionError { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::HookExecutor;
    use crate::report::Tone;
    use crate::testing::{Fixture, RecordingReporter, ScriptRunner};
    use synctropy_core::exit_code;

    #[test]
    fn test_create_crate_lays_out_directories() {
        let fx = Fixture::new();
        let krate = Crate::new(&fx.program, "dotfiles");

        let runner = ScriptRunner::default();
        let executor = HookExecutor::builder("/bin/sh").runner(&runner).build();
        Orchestrator::new(&executor).create_crate(&krate, None).unwrap();

        assert!(krate.hooks_dir().is_dir());
        assert!(krate.targets_dir().is_dir());
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_create_refuses_existing_entity() {
        let fx = Fixture::new();
        let krate = fx.krate("dotfiles");
        fx.hook(&krate, POST_CREATE, 0);

        let runner = ScriptRunner::default();
        let executor = HookExecutor::builder("/bin/sh").runner(&runner).build();
        let abort = Orchestrator::new(&executor).create_crate(&krate, None).unwrap_err();

        assert!(matches!(abort, Abort::Engine(Error::AlreadyExists(_))));
        assert_eq!(abort.exit_code(), exit_code::FAILURE);
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_create_rejects_bad_names() {
        let fx = Fixture::new();
        let executor = HookExecutor::builder("/bin/sh").build();
        let orchestrator = Orchestrator::new(&executor);

        for name in ["", ".hidden", "a/b", "with space"] {
            let krate = Crate::new(&fx.program, name);
            assert!(orchestrator.create_crate(&krate, None).is_err(), "{name:?}");
        }
    }

    #[test]
    fn test_create_target_inside_crate() {
        let fx = Fixture::new();
        let krate = fx.krate("dotfiles");
        let target = krate.target("laptop");

        let executor = HookExecutor::builder("/bin/sh").build();
        Orchestrator::new(&executor).create_target(&target, None).unwrap();

        assert!(target.hooks_dir().is_dir());
        assert!(!target.is_disabled().unwrap());
    }

    fn template_with_post_create(fx: &Fixture, code: i32) -> Template {
        let hooks = fx.program.target_templates_dir.join("seeded").join("hooks");
        fs::create_dir_all(&hooks).unwrap();
        fs::write(hooks.join(POST_CREATE), format!("exit {code}\n")).unwrap();
        Template::find(&fx.program.target_templates_dir, "seeded").unwrap()
    }

    #[test]
    fn test_template_post_create_runs() {
        let fx = Fixture::new();
        let krate = fx.krate("dotfiles");
        let target = krate.target("laptop");
        let template = template_with_post_create(&fx, 0);

        let runner = ScriptRunner::default();
        let executor = HookExecutor::builder("/bin/sh").runner(&runner).build();
        Orchestrator::new(&executor)
            .create_target(&target, Some(&template))
            .unwrap();

        assert_eq!(runner.calls(), ["dotfiles/laptop:post_create"]);
        assert!(target.hook_path(POST_CREATE).is_file());
    }

    #[test]
    fn test_failed_post_create_rolls_back() {
        let fx = Fixture::new();
        let krate = fx.krate("dotfiles");
        let target = krate.target("laptop");
        let template = template_with_post_create(&fx, 12);

        let runner = ScriptRunner::default();
        let reporter = RecordingReporter::new();
        let executor = HookExecutor::builder("/bin/sh")
            .runner(&runner)
            .reporter(&reporter)
            .build();
        let abort = Orchestrator::new(&executor)
            .create_target(&target, Some(&template))
            .unwrap_err();

        assert_eq!(abort.exit_code(), 12);
        assert!(!target.path().exists());
        assert!(krate.path().is_dir());
        assert!(reporter.contains(Tone::Attention, "Removed"));
    }

    #[test]
    fn test_pre_rm_runs_targets_first() {
        let fx = Fixture::new();
        let krate = fx.krate("dotfiles");
        let t1 = fx.target(&krate, "t1");
        let t2 = fx.target(&krate, "t2");
        fx.hook(&krate, PRE_RM, 0);
        fx.hook(&t1, PRE_RM, 0);
        fx.hook(&t2, PRE_RM, 0);

        let runner = ScriptRunner::default();
        let executor = HookExecutor::builder("/bin/sh").runner(&runner).build();
        Orchestrator::new(&executor)
            .remove_crate(&krate, &[t1, t2], 1)
            .unwrap();

        assert_eq!(
            runner.calls(),
            ["dotfiles/t1:pre_rm", "dotfiles/t2:pre_rm", "dotfiles:pre_rm"]
        );
        assert!(!krate.path().exists());
    }

    #[test]
    fn test_failing_pre_rm_keeps_tree() {
        let fx = Fixture::new();
        let krate = fx.krate("dotfiles");
        let t1 = fx.target(&krate, "t1");
        fx.hook(&t1, PRE_RM, 8);
        fx.hook(&krate, PRE_RM, 0);

        let runner = ScriptRunner::default();
        let executor = HookExecutor::builder("/bin/sh").runner(&runner).build();
        let abort = Orchestrator::new(&executor)
            .remove_crate(&krate, std::slice::from_ref(&t1), 1)
            .unwrap_err();

        assert_eq!(abort.exit_code(), 8);
        assert_eq!(runner.calls(), ["dotfiles/t1:pre_rm"]);
        assert!(t1.path().is_dir());
    }

    #[test]
    fn test_remove_target_without_hook() {
        let fx = Fixture::new();
        let krate = fx.krate("dotfiles");
        let t1 = fx.target(&krate, "t1");
        let t2 = fx.target(&krate, "t2");

        let executor = HookExecutor::builder("/bin/sh").build();
        Orchestrator::new(&executor).remove_target(&t1, 1).unwrap();

        assert!(!t1.path().exists());
        assert!(t2.path().is_dir());
    }

    #[test]
    fn test_describe_uses_trimmed_ls_output() {
        let fx = Fixture::new();
        let krate = fx.krate("dotfiles");
        let t1 = fx.target(&krate, "t1");
        let t2 = fx.target(&krate, "t2");
        fx.script(&krate, LS, "echo   personal config  ");
        fx.hook(&t1, LS, 1);
        fx.script(&t2, LS, "echo");

        let runner = ScriptRunner::default();
        let executor = HookExecutor::builder("/bin/sh").runner(&runner).build();
        let orchestrator = Orchestrator::new(&executor);

        assert_eq!(orchestrator.describe(&krate).as_deref(), Some("personal config"));
        assert_eq!(orchestrator.describe(&t1), None);
        assert_eq!(orchestrator.describe(&t2), None);
        assert_eq!(orchestrator.describe(&fx.target(&krate, "t3")), None);
    }

    #[test]
    fn test_dotdot_target_never_reaches_removal() {
        let fx = Fixture::new();
        let krate = fx.krate("dotfiles");
        let t1 = fx.target(&krate, "t1");
        fx.hook(&krate, PRE_RM, 0);

        let catalog = crate::Catalog::new(&fx.program);
        let runner = ScriptRunner::default();
        let executor = HookExecutor::builder("/bin/sh").runner(&runner).build();
        let orchestrator = Orchestrator::new(&executor);

        for name in ["..", "."] {
            assert!(catalog.targets_named(&krate, &[name]).is_err());
            assert!(catalog.crates_named(&[name]).is_err());
        }
        let targets = catalog.targets_named(&krate, &["t1"]).unwrap();
        orchestrator.remove_target(&targets[0], 1).unwrap();

        assert!(runner.calls().is_empty());
        assert!(!t1.path().exists());
        assert!(krate.hooks_dir().join(PRE_RM).is_file());
        assert!(krate.targets_dir().is_dir());
    }
}
