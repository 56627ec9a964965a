//! Shared fixtures for orchestration tests

use crate::entity::{Crate, Entity, Environment, Target};
use crate::hooks::{CommandRunner, CompletedCommand, EntryCommand, OutputMode};
use crate::report::{Reporter, Tone};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use synctropy_config::Program;
use tempfile::TempDir;

/// Pretends to run hook files whose whole content is `exit N`
///
/// Calls are recorded as `entity:hook`. A script may also be `echo TEXT`,
/// which succeeds with `TEXT` as output.
#[derive(Default)]
pub struct ScriptRunner {
    calls: RefCell<Vec<String>>,
    pub scratch_seen: RefCell<Vec<(String, bool)>>,
}

impl ScriptRunner {
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for ScriptRunner {
    fn run(
        &self,
        command: &EntryCommand,
        env: &Environment,
        _mode: OutputMode,
    ) -> synctropy_core::Result<CompletedCommand> {
        let hook = PathBuf::from(command.args.last().unwrap());
        let script = fs::read_to_string(&hook).unwrap();
        let script = script.trim();
        let exit_code = script
            .strip_prefix("exit ")
            .and_then(|code| code.parse().ok())
            .unwrap_or(0);
        let output = script
            .strip_prefix("echo ")
            .map(|text| format!("{text}\n"))
            .unwrap_or_default();

        let entity = match env.get("TARGET_NAME") {
            Some(target) => format!("{}/{target}", env["CRATE_NAME"]),
            None => env["CRATE_NAME"].clone(),
        };
        let name = hook.file_name().unwrap().to_string_lossy().into_owned();
        self.calls.borrow_mut().push(format!("{entity}:{name}"));

        for key in ["CRATE_TEMP_DIR", "TARGET_TEMP_DIR"] {
            if let Some(dir) = env.get(key) {
                self.scratch_seen
                    .borrow_mut()
                    .push((key.to_string(), Path::new(dir).is_dir()));
            }
        }

        Ok(CompletedCommand { output, exit_code })
    }
}

/// Bootstrapped data directory in a temporary location
pub struct Fixture {
    _temp: TempDir,
    pub program: Program,
}

impl Fixture {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let program = Program::with_paths(
            temp.path().to_path_buf(),
            PathBuf::from("/bin/sh"),
            PathBuf::from("synctropy"),
        );
        program.bootstrap().unwrap();
        Self {
            _temp: temp,
            program,
        }
    }

    /// Crate with its directory tree on disk
    pub fn krate(&self, name: &str) -> Crate {
        let krate = Crate::new(&self.program, name);
        fs::create_dir_all(krate.hooks_dir()).unwrap();
        fs::create_dir_all(krate.targets_dir()).unwrap();
        krate
    }

    /// Target of `krate` with its directory tree on disk
    pub fn target(&self, krate: &Crate, name: &str) -> Target {
        let target = krate.target(name);
        fs::create_dir_all(target.hooks_dir()).unwrap();
        target
    }

    /// Hook that exits with `code`
    pub fn hook(&self, entity: &dyn Entity, name: &str, code: i32) {
        self.script(entity, name, &format!("exit {code}"));
    }

    pub fn script(&self, entity: &dyn Entity, name: &str, script: &str) {
        fs::write(entity.hook_path(name), format!("{script}\n")).unwrap();
    }
}

/// Reporter that keeps every message, for assertions
#[derive(Debug, Default)]
pub struct RecordingReporter {
    lines: RefCell<Vec<(Tone, String, usize)>>,
}

impl RecordingReporter {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded `(tone, text, depth)` lines
    pub fn lines(&self) -> Vec<(Tone, String, usize)> {
        self.lines.borrow().clone()
    }

    /// Whether any line of `tone` contains `needle`
    pub fn contains(&self, tone: Tone, needle: &str) -> bool {
        self.lines
            .borrow()
            .iter()
            .any(|(t, text, _)| *t == tone && text.contains(needle))
    }
}

impl Reporter for RecordingReporter {
    fn message(&self, tone: Tone, text: &str, depth: usize) {
        self.lines.borrow_mut().push((tone, text.to_string(), depth));
    }

    fn counter(&self, index: usize, total: usize) {
        self.note(&format!("({index}/{total})"), 0);
    }

    fn ruler(&self, _depth: usize) {}

    fn blank(&self) {}
}
