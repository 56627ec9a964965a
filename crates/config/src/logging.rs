//! Logging configuration for the synctropy CLI
//!
//! Diagnostics go to stderr so they never interleave with hook output
//! captured from the pseudo-terminal. An optional file layer records
//! everything at debug level.

use std::path::Path;
use std::sync::Mutex;
use synctropy_core::{Error, Result};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter directives for a given level
fn default_directives(level: &str) -> String {
    format!(
        "synctropy={level},synctropy_engine={level},synctropy_config={level},synctropy_core={level}"
    )
}

/// Initialize the logging system
///
/// # Arguments
/// * `verbose` - Enable debug level logging
/// * `log_file` - Optional path to write logs to a file
///
/// # Examples
/// ```ignore
/// // Warnings only
/// init(false, None)?;
///
/// // Verbose mode with debug level, mirrored to a file
/// init(true, Some(Path::new("debug.log")))?;
/// ```
pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };

    // RUST_LOG wins over the flag
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    // Sits on the registry so both stderr stacks below share one type
    let file_layer = match log_file {
        Some(log_path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .pretty()
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        None => None,
    };
    let registry = tracing_subscriber::registry().with(file_layer);

    let result = if verbose {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_file(false)
            .with_line_number(false)
            .compact()
            .with_ansi(true)
            .with_filter(env_filter);

        registry.with(stderr_layer).try_init()
    } else {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_file(false)
            .with_line_number(false)
            .without_time() // No timestamps in normal mode
            .compact()
            .with_ansi(true)
            .with_filter(env_filter);

        registry.with(stderr_layer).try_init()
    };

    result.map_err(|e| Error::Message(format!("Failed to initialize logging: {e}")))
}
