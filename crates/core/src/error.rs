//! Base error types for synctropy
//!
//! Every failure that is not a hook's own exit status lands here. Each variant
//! maps to a fixed process exit code so operators can tell an I/O problem from
//! a hook that signalled failure.

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes surfaced to the operator for failures that are not hook exits.
///
/// Values follow `sysexits.h` so they stay clear of the small codes hook
/// scripts usually return.
pub mod exit_code {
    /// Successful run
    pub const SUCCESS: i32 = 0;
    /// Generic failure (bad selection, missing entity, declined prompt)
    pub const FAILURE: i32 = 1;
    /// Process could not be spawned or no pseudo-terminal was available
    pub const OS_ERROR: i32 = 71;
    /// Directory create/remove/read failure
    pub const IO_ERROR: i32 = 74;
    /// Unreadable entry sidecar or config file
    pub const CONFIG_ERROR: i32 = 78;
    /// A hook that was explicitly requested does not exist
    pub const HOOK_NOT_FOUND: i32 = 127;
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Base error type for shared functionality
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error creating a directory
    #[error("Failed to create directory {}: {source}", path.display())]
    DirectoryCreate {
        /// Path involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Error removing a directory
    #[error("Failed to remove directory {}: {source}", path.display())]
    DirectoryRemove {
        /// Path involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Error listing a directory
    #[error("Failed to read directory {}: {source}", path.display())]
    DirectoryRead {
        /// Path involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Entry sidecar exists but could not be read
    #[error("Failed to read entry file {}: {source}", path.display())]
    EntryRead {
        /// Path involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Process could not be started
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying spawn error
        #[source]
        source: BoxError,
    },

    /// No pseudo-terminal could be allocated
    #[error("Failed to allocate pseudo-terminal: {0}")]
    PtyAllocation(#[source] BoxError),

    /// One or more crates do not exist
    #[error("Crate(s) not found: {}", .0.join(", "))]
    CrateNotFound(Vec<String>),

    /// One or more targets do not exist in a crate
    #[error("Target(s) not found in crate '{crate_name}': {}", targets.join(", "))]
    TargetNotFound {
        /// Crate that was searched
        crate_name: String,
        /// Names that were not found
        targets: Vec<String>,
    },

    /// Entity already exists
    #[error("{0} already exists")]
    AlreadyExists(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error message
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_)
            | Self::DirectoryCreate { .. }
            | Self::DirectoryRemove { .. }
            | Self::DirectoryRead { .. } => exit_code::IO_ERROR,
            Self::EntryRead { .. } | Self::Config(_) => exit_code::CONFIG_ERROR,
            Self::Spawn { .. } | Self::PtyAllocation(_) => exit_code::OS_ERROR,
            Self::CrateNotFound(_)
            | Self::TargetNotFound { .. }
            | Self::AlreadyExists(_)
            | Self::Message(_) => exit_code::FAILURE,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
