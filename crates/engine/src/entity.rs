//! Crates and targets
//!
//! Entities are materialized from directory names whenever they are
//! referenced; nothing about them is persisted besides the directory tree
//! and the target `disabled` marker.

use indexmap::IndexMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use synctropy_config::Program;
use synctropy_core::{Error, Result};

/// Variables handed to a hook, in insertion order
pub type Environment = IndexMap<String, String>;

/// Directory holding an entity's hooks
pub const HOOKS_DIR: &str = "hooks";
/// Directory holding a crate's targets
pub const TARGETS_DIR: &str = "targets";
/// Per-entity scratch directory
pub const TEMP_DIR: &str = ".tmp";
/// Marker file that disables a target
pub const DISABLED_MARKER: &str = "disabled";

/// Behaviour shared by crates and targets
pub trait Entity {
    /// Human-readable label (`crate` or `crate/target`)
    fn label(&self) -> String;

    /// Root directory of the entity
    fn path(&self) -> &Path;

    /// Directory holding the entity's hooks
    fn hooks_dir(&self) -> &Path;

    /// Scratch directory bracketing the entity's active phase
    fn temp_dir(&self) -> &Path;

    /// Entity-scoped variables, program variables included
    fn environment(&self) -> &Environment;

    /// Path of a named hook
    fn hook_path(&self, hook: &str) -> PathBuf {
        self.hooks_dir().join(hook)
    }

    /// Whether the backing directory exists
    fn exists(&self) -> bool {
        self.path().is_dir()
    }
}

/// Reject names that would escape the crates root or hide the entity
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::Message("Name cannot be empty".to_string()));
    }
    if name.starts_with('.') {
        return Err(Error::Message(format!(
            "Name '{name}' cannot start with '.'"
        )));
    }
    if name.contains(['/', '\\']) || name.chars().any(char::is_whitespace) {
        return Err(Error::Message(format!(
            "Name '{name}' cannot contain path separators or whitespace"
        )));
    }
    Ok(())
}

fn path_value(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// A top-level configuration bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crate {
    /// Crate name, unique within the crates root
    pub name: String,
    path: PathBuf,
    hooks_dir: PathBuf,
    targets_dir: PathBuf,
    temp_dir: PathBuf,
    environment: Environment,
}

impl Crate {
    /// Materialize a crate from its name
    pub fn new(program: &Program, name: &str) -> Self {
        let path = program.crates_dir.join(name);
        let hooks_dir = path.join(HOOKS_DIR);
        let targets_dir = path.join(TARGETS_DIR);
        let temp_dir = path.join(TEMP_DIR);

        let mut environment = program.environment();
        environment.insert("CRATE_NAME".to_string(), name.to_string());
        environment.insert("CRATE_DIR".to_string(), path_value(&path));
        environment.insert("CRATE_HOOKS_DIR".to_string(), path_value(&hooks_dir));
        environment.insert("CRATE_TARGETS_DIR".to_string(), path_value(&targets_dir));
        environment.insert("CRATE_TEMP_DIR".to_string(), path_value(&temp_dir));

        Self {
            name: name.to_string(),
            path,
            hooks_dir,
            targets_dir,
            temp_dir,
            environment,
        }
    }

    /// Directory holding the crate's targets
    pub fn targets_dir(&self) -> &Path {
        &self.targets_dir
    }

    /// Materialize one of this crate's targets
    pub fn target(&self, name: &str) -> Target {
        Target::new(self, name)
    }
}

impl Entity for Crate {
    fn label(&self) -> String {
        self.name.clone()
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn hooks_dir(&self) -> &Path {
        &self.hooks_dir
    }

    fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    fn environment(&self) -> &Environment {
        &self.environment
    }
}

/// Result of toggling the `disabled` marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerChange {
    /// The marker was created or removed
    Applied,
    /// The target was already in the requested state
    Unchanged,
}

/// A sync destination belonging to exactly one crate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Owning crate name
    pub crate_name: String,
    /// Target name, unique within the crate
    pub name: String,
    path: PathBuf,
    hooks_dir: PathBuf,
    temp_dir: PathBuf,
    disabled_path: PathBuf,
    environment: Environment,
}

impl Target {
    /// Materialize a target of `krate` from its name
    pub fn new(krate: &Crate, name: &str) -> Self {
        let path = krate.targets_dir.join(name);
        let hooks_dir = path.join(HOOKS_DIR);
        let temp_dir = path.join(TEMP_DIR);
        let disabled_path = path.join(DISABLED_MARKER);

        let mut environment = krate.environment.clone();
        environment.insert("TARGET_NAME".to_string(), name.to_string());
        environment.insert("TARGET_DIR".to_string(), path_value(&path));
        environment.insert("TARGET_HOOKS_DIR".to_string(), path_value(&hooks_dir));
        environment.insert("TARGET_TEMP_DIR".to_string(), path_value(&temp_dir));

        Self {
            crate_name: krate.name.clone(),
            name: name.to_string(),
            path,
            hooks_dir,
            temp_dir,
            disabled_path,
            environment,
        }
    }

    /// Path of the `disabled` marker file
    pub fn disabled_path(&self) -> &Path {
        &self.disabled_path
    }

    /// Whether the target carries the `disabled` marker
    pub fn is_disabled(&self) -> io::Result<bool> {
        self.disabled_path.try_exists()
    }

    /// Remove the `disabled` marker
    pub fn enable(&self) -> io::Result<MarkerChange> {
        if !self.is_disabled()? {
            return Ok(MarkerChange::Unchanged);
        }
        fs::remove_file(&self.disabled_path)?;
        tracing::debug!(target_name = %self.label(), "Removed disabled marker");
        Ok(MarkerChange::Applied)
    }

    /// Create an empty `disabled` marker
    pub fn disable(&self) -> io::Result<MarkerChange> {
        if self.is_disabled()? {
            return Ok(MarkerChange::Unchanged);
        }
        fs::File::create(&self.disabled_path)?;
        tracing::debug!(target_name = %self.label(), "Created disabled marker");
        Ok(MarkerChange::Applied)
    }
}

impl Entity for Target {
    fn label(&self) -> String {
        format!("{}/{}", self.crate_name, self.name)
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn hooks_dir(&self) -> &Path {
        &self.hooks_dir
    }

    fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    fn environment(&self) -> &Environment {
        &self.environment
    }
}
