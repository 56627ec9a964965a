//! Scratch directory lifecycle
//!
//! Each entity owns a `.tmp` directory that exists only while one of its
//! phases is active. Setup never trusts leftovers: an existing directory is
//! removed and recreated.

use std::fs;
use std::io;
use std::path::Path;
use synctropy_core::{Error, Result};

/// Result of [`Scratch::setup`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupOutcome {
    /// Directory created
    Created,
    /// A stale directory was found and replaced
    Recreated,
    /// Creation was skipped by request
    Skipped,
}

/// Result of [`Scratch::teardown`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownOutcome {
    /// Directory removed
    Removed,
    /// Nothing to remove
    NotFound,
    /// Removal was skipped by request
    Skipped,
}

/// Create/remove policy for scratch directories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scratch {
    /// Leave directory creation to the hooks
    pub skip_create: bool,
    /// Keep directories after the phase ends
    pub skip_remove: bool,
}

impl Scratch {
    /// Create and remove every scratch directory
    pub const MANAGED: Self = Self {
        skip_create: false,
        skip_remove: false,
    };

    /// Ensure an empty directory exists at `dir`
    pub fn setup(self, dir: &Path) -> Result<SetupOutcome> {
        if self.skip_create {
            return Ok(SetupOutcome::Skipped);
        }

        let stale = dir.try_exists().map_err(|source| Error::DirectoryCreate {
            path: dir.to_path_buf(),
            source,
        })?;
        if stale {
            tracing::debug!(dir = %dir.display(), "Removing stale scratch directory");
            remove(dir).map_err(|source| Error::DirectoryCreate {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        create(dir).map_err(|source| Error::DirectoryCreate {
            path: dir.to_path_buf(),
            source,
        })?;

        Ok(if stale {
            SetupOutcome::Recreated
        } else {
            SetupOutcome::Created
        })
    }

    /// Ensure nothing exists at `dir`
    pub fn teardown(self, dir: &Path) -> Result<TeardownOutcome> {
        if self.skip_remove {
            return Ok(TeardownOutcome::Skipped);
        }

        match remove(dir) {
            Ok(()) => Ok(TeardownOutcome::Removed),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(TeardownOutcome::NotFound),
            Err(source) => Err(Error::DirectoryRemove {
                path: dir.to_path_buf(),
                source,
            }),
        }
    }
}

fn remove(dir: &Path) -> io::Result<()> {
    // A stray file where the directory belongs is removed too
    if fs::symlink_metadata(dir)?.is_dir() {
        fs::remove_dir_all(dir)
    } else {
        fs::remove_file(dir)
    }
}

#[cfg(unix)]
fn create(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().mode(0o755).create(dir)
}

#[cfg(not(unix))]
fn create(dir: &Path) -> io::Result<()> {
    fs::create_dir(dir)
}
