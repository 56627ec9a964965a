//! Crate and target discovery
//!
//! Lists the crates root and each crate's `targets/` directory. Hidden
//! entries and plain files are ignored, and results come back sorted by
//! name, which is the "listing order" every batch runs in.

use crate::entity::{Crate, Entity, Target, validate_name};
use std::fs;
use std::path::Path;
use synctropy_config::Program;
use synctropy_core::{Error, Result};

/// Visible subdirectory names of `dir`, sorted
pub fn visible_dirs(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|source| Error::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        // Follow symlinks so linked crates count as directories
        if entry.path().is_dir() {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Entity lookup over the user's crates root
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    program: &'a Program,
}

impl<'a> Catalog<'a> {
    /// Create a catalog over `program`'s crates root
    pub fn new(program: &'a Program) -> Self {
        Self { program }
    }

    /// Names of every crate
    pub fn crate_names(&self) -> Result<Vec<String>> {
        visible_dirs(&self.program.crates_dir)
    }

    /// Every crate, in listing order
    pub fn crates(&self) -> Result<Vec<Crate>> {
        Ok(self
            .crate_names()?
            .iter()
            .map(|name| Crate::new(self.program, name))
            .collect())
    }

    /// Materialize the named crates, failing with every missing name at once
    ///
    /// Names are validated first so `..` or `a/b` never resolve outside the
    /// crates root.
    pub fn crates_named<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Crate>> {
        for name in names {
            validate_name(name.as_ref())?;
        }
        let crates: Vec<Crate> = names
            .iter()
            .map(|name| Crate::new(self.program, name.as_ref()))
            .collect();
        let missing: Vec<String> = crates
            .iter()
            .filter(|krate| !krate.path().is_dir())
            .map(|krate| krate.name.clone())
            .collect();
        if missing.is_empty() {
            Ok(crates)
        } else {
            Err(Error::CrateNotFound(missing))
        }
    }

    /// Materialize one named crate
    pub fn crate_named(&self, name: &str) -> Result<Crate> {
        let mut crates = self.crates_named(&[name])?;
        crates
            .pop()
            .ok_or_else(|| Error::CrateNotFound(vec![name.to_string()]))
    }

    /// Names of the crate's targets
    pub fn target_names(&self, krate: &Crate) -> Result<Vec<String>> {
        visible_dirs(krate.targets_dir())
    }

    /// Every target of the crate, in listing order
    pub fn targets(&self, krate: &Crate) -> Result<Vec<Target>> {
        Ok(self
            .target_names(krate)?
            .iter()
            .map(|name| krate.target(name))
            .collect())
    }

    /// Materialize the named targets, failing with every missing name at once
    pub fn targets_named<S: AsRef<str>>(&self, krate: &Crate, names: &[S]) -> Result<Vec<Target>> {
        for name in names {
            validate_name(name.as_ref())?;
        }
        let targets: Vec<Target> = names.iter().map(|name| krate.target(name.as_ref())).collect();
        let missing: Vec<String> = targets
            .iter()
            .filter(|target| !target.path().is_dir())
            .map(|target| target.name.clone())
            .collect();
        if missing.is_empty() {
            Ok(targets)
        } else {
            Err(Error::TargetNotFound {
                crate_name: krate.name.clone(),
                targets: missing,
            })
        }
    }
}
