//! Configuration management for synctropy
//!
//! This crate handles:
//! - Configuration loading
//! - XDG directory management
//! - Program identity and the user directory layout
//! - Logging initialization

pub mod config;
pub mod dirs;
pub mod logging;
pub mod program;

// Re-export error types from core
pub use synctropy_core::{Error, Result};

// Re-export main types
pub use config::{Config, GeneralConfig, UiConfig};
pub use dirs::{config_file, data_dir, resolve_data_dir};
pub use program::{PROGRAM_NAME, Program};
