//! Integration tests for user data directory resolution

#![allow(clippy::unwrap_used, clippy::panic)]

use serial_test::serial;
use std::path::PathBuf;
use synctropy_config::{Config, Program, config_file, data_dir, resolve_data_dir};
use tempfile::TempDir;

#[test]
#[serial]
fn test_xdg_data_home_is_honoured() {
    let temp = TempDir::new().unwrap();
    temp_env::with_var("XDG_DATA_HOME", Some(temp.path()), || {
        assert_eq!(data_dir(), Some(temp.path().join("synctropy")));
        assert_eq!(resolve_data_dir(None).unwrap(), temp.path().join("synctropy"));
    });
}

#[test]
#[serial]
fn test_override_beats_xdg_data_home() {
    let temp = TempDir::new().unwrap();
    let custom = temp.path().join("custom");
    temp_env::with_var("XDG_DATA_HOME", Some(temp.path()), || {
        assert_eq!(resolve_data_dir(Some(&custom)).unwrap(), custom);
    });
}

#[test]
#[serial]
fn test_program_from_config_file_in_data_dir() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        config_file(temp.path()),
        "[general]\ndefaultShell = \"sh\"\n\n[env]\nEXTRA = \"1\"\n",
    )
    .unwrap();

    let config = Config::load_or_default(temp.path()).unwrap();
    let program = Program::new(temp.path().to_path_buf(), &config).unwrap();

    assert_eq!(config.env["EXTRA"], "1");
    assert!(program.default_shell.ends_with("sh"));
    assert_eq!(program.crates_dir, PathBuf::from(temp.path()).join("crates"));
}
