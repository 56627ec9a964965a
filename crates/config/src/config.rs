//! Configuration management
//!
//! This module handles loading the optional `config.toml` that lives in the
//! user data directory.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use synctropy_core::{Error, Result};

/// General configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Interpreter for hooks without an `.entry` sidecar
    #[serde(default = "default_shell", rename = "defaultShell")]
    pub default_shell: String,

    /// Abort a successful run when a scratch directory cannot be removed
    #[serde(default, rename = "strictTeardown")]
    pub strict_teardown: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_shell: default_shell(),
            strict_teardown: false,
        }
    }
}

/// UI configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Print the resolved entry command before running a hook
    #[serde(default = "default_true", rename = "showEntryCommand")]
    pub show_entry_command: bool,

    /// Draw rulers around hook output
    #[serde(default = "default_true", rename = "showRulers")]
    pub show_rulers: bool,

    /// Print "running"/"not found" advisories for each hook
    #[serde(default = "default_true", rename = "showAdvisories")]
    pub show_advisories: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_entry_command: true,
            show_rulers: true,
            show_advisories: true,
        }
    }
}

/// Synctropy configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// General configuration section
    #[serde(default)]
    pub general: GeneralConfig,

    /// UI configuration
    #[serde(default)]
    pub ui: UiConfig,

    /// Extra variables added to every hook environment
    #[serde(default)]
    pub env: IndexMap<String, String>,
}

fn default_shell() -> String {
    "sh".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or TOML parsing fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|e| {
            Error::Config(format!("Failed to parse config file {}: {e}", path.display()))
        })?;

        if let Some(parent) = path.parent() {
            config.general.default_shell =
                Self::resolve_path(Path::new(&config.general.default_shell), parent)
                    .to_string_lossy()
                    .into_owned();
        }

        Ok(config)
    }

    /// Write the configuration as TOML to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Load `config.toml` from the data directory, or defaults if it is absent
    pub fn load_or_default(data_dir: &Path) -> Result<Self> {
        let path = crate::dirs::config_file(data_dir);
        if path.try_exists()? {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Expand `~/` and resolve `./`-style paths; bare command names are left alone
    fn resolve_path(path: &Path, base_dir: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();

        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = ::dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~"
            && let Some(home) = ::dirs::home_dir()
        {
            return home;
        }

        if path.is_relative() && path.components().count() > 1 {
            base_dir.join(path)
        } else {
            path.to_path_buf()
        }
    }
}
