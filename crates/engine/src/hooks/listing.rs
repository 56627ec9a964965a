//! Hook discovery for `hooks ls`

use super::entry;
use crate::entity::Entity;
use serde::Serialize;
use std::fs;
use std::path::Path;
use synctropy_core::{Error, Result};

/// A hook file and the command line that would run it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookEntry {
    /// Hook name
    pub name: String,
    /// Sidecar line, or the default shell
    pub entry: String,
}

/// Hooks of `entity`, sorted by name
///
/// Hidden files and `.entry` sidecars are not hooks.
pub fn list_hooks(entity: &dyn Entity, default_shell: &Path) -> Result<Vec<HookEntry>> {
    let dir = entity.hooks_dir();
    let entries = fs::read_dir(dir).map_err(|source| Error::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut hooks = Vec::new();
    for item in entries {
        let item = item.map_err(|source| Error::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;
        let file_name = item.file_name();
        if entry::is_sidecar(&file_name) {
            continue;
        }
        let name = file_name.to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        hooks.push(HookEntry {
            entry: entry::describe(&item.path(), default_shell)?,
            name,
        });
    }
    hooks.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(hooks)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use crate::entity::Crate;
    use std::path::PathBuf;
    use synctropy_config::Program;
    use tempfile::TempDir;

    #[test]
    fn test_lists_hooks_with_entry_commands() {
        let temp = TempDir::new().unwrap();
        let program = Program::with_paths(
            temp.path().to_path_buf(),
            PathBuf::from("/bin/sh"),
            PathBuf::from("synctropy"),
        );
        let krate = Crate::new(&program, "alpha");
        fs::create_dir_all(krate.hooks_dir()).unwrap();
        for name in ["sync", "edit", ".swp"] {
            fs::write(krate.hook_path(name), "").unwrap();
        }
        fs::write(krate.hook_path("sync.entry"), "python3 -u\n").unwrap();

        let hooks = list_hooks(&krate, Path::new("/bin/sh")).unwrap();
        assert_eq!(
            hooks,
            vec![
                HookEntry {
                    name: "edit".to_string(),
                    entry: "/bin/sh".to_string()
                },
                HookEntry {
                    name: "sync".to_string(),
                    entry: "python3 -u".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_missing_hooks_dir_is_error() {
        let temp = TempDir::new().unwrap();
        let program = Program::with_paths(
            temp.path().to_path_buf(),
            PathBuf::from("/bin/sh"),
            PathBuf::from("synctropy"),
        );
        let krate = Crate::new(&program, "ghost");
        assert!(matches!(
            list_hooks(&krate, Path::new("/bin/sh")),
            Err(Error::DirectoryRead { .. })
        ));
    }
}
