//! Init command implementation
//!
//! Create the user data directory layout and a default `config.toml`.

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;
use clap::Args;
use synctropy_config::config_file;
use synctropy_engine::Reporter;
use tracing::debug;

/// Create the user data directory
#[derive(Debug, Args)]
pub struct InitCommand {}

impl Command for InitCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let program = &context.program;
        let reporter = context.reporter();

        reporter.blank();
        reporter.section(
            &format!("Creating user data directory at {}", program.data_dir.display()),
            0,
        );

        let created = program.bootstrap()?;
        if created.is_empty() {
            reporter.attention("> User data directory already exists", 1);
        }
        for dir in &created {
            reporter.note(&format!("Created {}", dir.display()), 1);
        }

        let config_path = config_file(&program.data_dir);
        if config_path.is_file() {
            debug!(path = %config_path.display(), "Keeping existing config file");
        } else {
            context.config.save(&config_path)?;
            reporter.note(&format!("Wrote {}", config_path.display()), 1);
        }

        reporter.success("Finished", 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synctropy_config::Config;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_layout_and_config() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("data");
        let context = RuntimeContext::new(data_dir.clone(), Config::default()).unwrap();

        InitCommand {}.execute(&context).unwrap();

        assert!(data_dir.join("crates").is_dir());
        assert!(data_dir.join("templates").join("crates").is_dir());
        assert!(data_dir.join("templates").join("targets").is_dir());
        assert!(config_file(&data_dir).is_file());

        // Second run keeps what is there
        std::fs::write(config_file(&data_dir), "[ui]\ncolor = false\n").unwrap();
        InitCommand {}.execute(&context).unwrap();
        let content = std::fs::read_to_string(config_file(&data_dir)).unwrap();
        assert_eq!(content, "[ui]\ncolor = false\n");
    }
}
