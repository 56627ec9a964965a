//! Directory templates for new crates and targets

use crate::catalog::visible_dirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use synctropy_core::{Error, Result};
use walkdir::WalkDir;

/// A named template directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Directory name under the templates root
    pub name: String,
    /// Template root
    pub path: PathBuf,
}

impl Template {
    /// Look up `name` under `root`
    ///
    /// Unknown names produce an error listing what is available.
    pub fn find(root: &Path, name: &str) -> Result<Self> {
        let available = visible_dirs(root)?;
        if !available.iter().any(|t| t == name) {
            let listing = if available.is_empty() {
                "none".to_string()
            } else {
                available.join(", ")
            };
            return Err(Error::Message(format!(
                "Template '{name}' not found in {} (available: {listing})",
                root.display()
            )));
        }
        Ok(Self {
            name: name.to_string(),
            path: root.join(name),
        })
    }

    /// Copy the template's contents into the existing directory `dest`
    pub fn copy_into(&self, dest: &Path) -> Result<()> {
        tracing::debug!(template = %self.name, dest = %dest.display(), "Copying template");
        copy_tree(&self.path, dest).map_err(Error::from)
    }
}

/// Copy every entry below `src` into `dest`
///
/// Files keep their permission bits and symlinks are recreated as links.
fn copy_tree(src: &Path, dest: &Path) -> io::Result<()> {
    for entry in WalkDir::new(src).min_depth(1).follow_links(false) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let to = dest.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&to)?;
        } else if file_type.is_symlink() {
            copy_link(entry.path(), &to)?;
        } else {
            fs::copy(entry.path(), &to)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_link(from: &Path, to: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(fs::read_link(from)?, to)
}

#[cfg(not(unix))]
fn copy_link(from: &Path, to: &Path) -> io::Result<()> {
    fs::copy(from, to).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_lists_available_on_miss() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("dotfiles")).unwrap();
        fs::create_dir(temp.path().join("notes")).unwrap();

        let found = Template::find(temp.path(), "notes").unwrap();
        assert_eq!(found.path, temp.path().join("notes"));

        let err = Template::find(temp.path(), "missing").unwrap_err();
        assert!(err.to_string().contains("available: dotfiles, notes"));
    }

    #[test]
    fn test_hidden_directories_are_not_templates() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".cache")).unwrap();

        let err = Template::find(temp.path(), ".cache").unwrap_err();
        assert!(err.to_string().contains("available: none"));
    }

    #[test]
    fn test_copy_into_preserves_tree() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("templates");
        let hooks = root.join("basic").join("hooks");
        fs::create_dir_all(&hooks).unwrap();
        fs::write(hooks.join("sync"), "#!/bin/sh\n").unwrap();
        fs::write(root.join("basic").join("README"), "notes").unwrap();

        let dest = temp.path().join("new");
        fs::create_dir(&dest).unwrap();
        Template::find(&root, "basic").unwrap().copy_into(&dest).unwrap();

        assert_eq!(fs::read_to_string(dest.join("README")).unwrap(), "notes");
        assert!(dest.join("hooks").join("sync").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_keeps_modes_and_links() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let template = temp.path().join("basic");
        fs::create_dir(&template).unwrap();
        let script = template.join("run");
        fs::write(&script, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        std::os::unix::fs::symlink("run", template.join("alias")).unwrap();

        let dest = temp.path().join("new");
        fs::create_dir(&dest).unwrap();
        Template::find(temp.path(), "basic").unwrap().copy_into(&dest).unwrap();

        let mode = fs::metadata(dest.join("run")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
        assert_eq!(fs::read_link(dest.join("alias")).unwrap(), Path::new("run"));
    }

    #[cfg(unix)]
    #[test]
    fn test_nested_tree_and_linked_directory() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("deep");
        let nested = template.join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("leaf"), "x").unwrap();
        std::os::unix::fs::symlink("a", template.join("link")).unwrap();

        let dest = temp.path().join("new");
        fs::create_dir(&dest).unwrap();
        Template::find(temp.path(), "deep").unwrap().copy_into(&dest).unwrap();

        assert_eq!(fs::read_to_string(dest.join("a").join("b").join("leaf")).unwrap(), "x");
        let link = fs::symlink_metadata(dest.join("link")).unwrap();
        assert!(link.file_type().is_symlink());
    }
}
