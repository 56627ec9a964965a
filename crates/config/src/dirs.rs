//! XDG directory utilities
//!
//! This module provides XDG-compliant directory paths for synctropy.
//! It follows the XDG Base Directory specification using the `xdg` crate:
//! - `XDG_DATA_HOME` defaults to ~/.local/share

use std::path::{Path, PathBuf};
use synctropy_core::{Error, Result};
use xdg::BaseDirectories;

/// Name of the config file inside the user data directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Get the synctropy data directory
///
/// Returns `$XDG_DATA_HOME/synctropy` or `~/.local/share/synctropy`
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    BaseDirectories::with_prefix("synctropy").get_data_home()
}

/// Resolve the user data directory, honouring a `--directory` override
///
/// The result is always absolute so that every path handed to hooks is absolute.
pub fn resolve_data_dir(custom: Option<&Path>) -> Result<PathBuf> {
    let dir = match custom {
        Some(dir) => dir.to_path_buf(),
        None => data_dir().ok_or_else(|| {
            Error::Config("cannot determine the user data directory ($HOME unset)".to_string())
        })?,
    };
    Ok(std::path::absolute(dir)?)
}

/// Config file path inside a user data directory
#[must_use]
pub fn config_file(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_data_dir_contains_program_name() {
        if let Some(path) = data_dir() {
            assert!(
                path.to_string_lossy().contains("synctropy"),
                "data_dir path should contain 'synctropy': {path:?}"
            );
            assert!(path.is_absolute());
        }
    }

    #[test]
    fn test_resolve_data_dir_keeps_absolute_override() {
        let dir = resolve_data_dir(Some(Path::new("/srv/synctropy"))).unwrap();
        assert_eq!(dir, PathBuf::from("/srv/synctropy"));
    }

    #[test]
    fn test_resolve_data_dir_makes_relative_override_absolute() {
        let dir = resolve_data_dir(Some(Path::new("relative/data"))).unwrap();
        assert!(dir.is_absolute());
        assert!(dir.ends_with("relative/data"));
    }

    #[test]
    fn test_resolve_data_dir_defaults_to_xdg() {
        if let Some(expected) = data_dir() {
            assert_eq!(resolve_data_dir(None).unwrap(), expected);
        }
    }

    #[test]
    fn test_config_file_is_child_of_data_dir() {
        let data = Path::new("/data/synctropy");
        let config = config_file(data);
        assert!(config.starts_with(data));
        assert_eq!(config.file_name().and_then(|n| n.to_str()), Some("config.toml"));
    }
}
