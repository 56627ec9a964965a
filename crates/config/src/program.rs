//! Program identity and the user directory layout
//!
//! Every hook sees the same set of program-level variables, built here from
//! the resolved user data directory and configuration.

use crate::Config;
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use synctropy_core::{Error, Result};

/// Program name used in the environment and on screen
pub const PROGRAM_NAME: &str = "synctropy";

/// Resolved program identity and user directories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// Program name
    pub name: String,
    /// Program version
    pub version: String,
    /// Path of the running executable
    pub exec: PathBuf,
    /// Absolute path of the default hook interpreter
    pub default_shell: PathBuf,
    /// User data directory
    pub data_dir: PathBuf,
    /// `<data>/crates`
    pub crates_dir: PathBuf,
    /// `<data>/templates`
    pub templates_dir: PathBuf,
    /// `<data>/templates/crates`
    pub crate_templates_dir: PathBuf,
    /// `<data>/templates/targets`
    pub target_templates_dir: PathBuf,
}

impl Program {
    /// Resolve the program from a data directory and loaded configuration
    ///
    /// The default shell is looked up on `PATH` so hooks always get an
    /// absolute interpreter path.
    pub fn new(data_dir: PathBuf, config: &Config) -> Result<Self> {
        let shell = &config.general.default_shell;
        let default_shell = which::which(shell)
            .map_err(|e| Error::Config(format!("Default shell '{shell}' not found: {e}")))?;
        let exec = std::env::current_exe().unwrap_or_else(|_| PathBuf::from(PROGRAM_NAME));
        Ok(Self::with_paths(data_dir, default_shell, exec))
    }

    /// Build a program from explicit paths
    pub fn with_paths(data_dir: PathBuf, default_shell: PathBuf, exec: PathBuf) -> Self {
        let crates_dir = data_dir.join("crates");
        let templates_dir = data_dir.join("templates");
        Self {
            name: PROGRAM_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            exec,
            default_shell,
            crate_templates_dir: templates_dir.join("crates"),
            target_templates_dir: templates_dir.join("targets"),
            templates_dir,
            crates_dir,
            data_dir,
        }
    }

    /// Command prefix hooks use to call back into `synctropy utils`
    pub fn utils_command(&self) -> String {
        format!("{} utils", self.exec.display())
    }

    /// Program-level variables exposed to every hook
    pub fn environment(&self) -> IndexMap<String, String> {
        let path = |p: &Path| p.to_string_lossy().into_owned();
        IndexMap::from([
            ("PROGRAM_NAME".to_string(), self.name.clone()),
            ("DEFAULT_SHELL".to_string(), path(&self.default_shell)),
            ("SYNCTROPY_EXEC".to_string(), path(&self.exec)),
            ("SYNCTROPY_UTILS".to_string(), self.utils_command()),
            ("USER_DATA_DIR".to_string(), path(&self.data_dir)),
            ("USER_CRATES_DIR".to_string(), path(&self.crates_dir)),
            ("USER_TEMPLATES_DIR".to_string(), path(&self.templates_dir)),
            (
                "USER_CRATES_TEMPLATES_DIR".to_string(),
                path(&self.crate_templates_dir),
            ),
            (
                "USER_TARGETS_TEMPLATES_DIR".to_string(),
                path(&self.target_templates_dir),
            ),
        ])
    }

    /// Directories created by `init`, in creation order
    pub fn layout(&self) -> [&Path; 5] {
        [
            &self.data_dir,
            &self.crates_dir,
            &self.templates_dir,
            &self.crate_templates_dir,
            &self.target_templates_dir,
        ]
    }

    /// Whether the crates root exists
    pub fn is_initialized(&self) -> bool {
        self.crates_dir.is_dir()
    }

    /// Create any missing directory of the user layout
    ///
    /// Returns the directories that were newly created.
    pub fn bootstrap(&self) -> Result<Vec<PathBuf>> {
        let mut created = Vec::new();
        for dir in self.layout() {
            if dir.is_dir() {
                continue;
            }
            fs::create_dir_all(dir).map_err(|source| Error::DirectoryCreate {
                path: dir.to_path_buf(),
                source,
            })?;
            tracing::debug!(dir = %dir.display(), "Created directory");
            created.push(dir.to_path_buf());
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use tempfile::TempDir;

    fn test_program(data_dir: &Path) -> Program {
        Program::with_paths(
            data_dir.to_path_buf(),
            PathBuf::from("/bin/sh"),
            PathBuf::from("/usr/bin/synctropy"),
        )
    }

    #[test]
    fn test_layout_paths() {
        let program = test_program(Path::new("/data"));
        assert_eq!(program.crates_dir, PathBuf::from("/data/crates"));
        assert_eq!(program.templates_dir, PathBuf::from("/data/templates"));
        assert_eq!(program.crate_templates_dir, PathBuf::from("/data/templates/crates"));
        assert_eq!(program.target_templates_dir, PathBuf::from("/data/templates/targets"));
    }

    #[test]
    fn test_environment_names_and_values() {
        let program = test_program(Path::new("/data"));
        let env = program.environment();

        assert_eq!(env["PROGRAM_NAME"], "synctropy");
        assert_eq!(env["DEFAULT_SHELL"], "/bin/sh");
        assert_eq!(env["SYNCTROPY_EXEC"], "/usr/bin/synctropy");
        assert_eq!(env["SYNCTROPY_UTILS"], "/usr/bin/synctropy utils");
        assert_eq!(env["USER_DATA_DIR"], "/data");
        assert_eq!(env["USER_CRATES_DIR"], "/data/crates");
        assert_eq!(env["USER_TEMPLATES_DIR"], "/data/templates");
        assert_eq!(env["USER_CRATES_TEMPLATES_DIR"], "/data/templates/crates");
        assert_eq!(env["USER_TARGETS_TEMPLATES_DIR"], "/data/templates/targets");
        assert_eq!(env.len(), 9);
    }

    #[test]
    fn test_environment_is_deterministic() {
        let program = test_program(Path::new("/data"));
        assert_eq!(program.environment(), program.environment());
    }

    #[test]
    fn test_bootstrap_creates_layout_once() {
        let temp = TempDir::new().unwrap();
        let program = test_program(&temp.path().join("data"));
        assert!(!program.is_initialized());

        let created = program.bootstrap().unwrap();
        assert_eq!(created.len(), 5);
        assert!(program.is_initialized());
        assert!(program.target_templates_dir.is_dir());

        let created = program.bootstrap().unwrap();
        assert!(created.is_empty());
    }

    #[test]
    fn test_new_resolves_shell_to_absolute_path() {
        let temp = TempDir::new().unwrap();
        let program = Program::new(temp.path().to_path_buf(), &Config::default()).unwrap();
        assert!(program.default_shell.is_absolute());
    }

    #[test]
    fn test_new_rejects_unknown_shell() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.general.default_shell = "definitely-not-a-shell-xyz".to_string();
        let err = Program::new(temp.path().to_path_buf(), &config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
